//! Hoop Hub entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, PointerEvent};

    use hoop_hub::audio::{AudioManager, SoundEffect, SoundPlayer, WithSound};
    use hoop_hub::feedback::{FeedbackSink, Muted, NotificationKind, Toast};
    use hoop_hub::platform::frame::AnimationLoop;
    use hoop_hub::platform::haptics::WebFeedback;
    use hoop_hub::platform::{self, now_ms};
    use hoop_hub::renderer::canvas::CanvasRenderer;
    use hoop_hub::renderer::shapes::Hud;
    use hoop_hub::renderer::{SceneOptions, build_scene, colors};
    use hoop_hub::session::{RoundPhase, RoundSummary, ShotSession};
    use hoop_hub::sim::{Gesture, TickInput, launch_velocity};
    use hoop_hub::tasks::{TaskProgress, find_task};
    use hoop_hub::{Leaderboard, Settings, ShotTuning};

    const TUNING_KEY: &str = "hoop_hub_tuning";
    const TASKS_KEY: &str = "hoop_hub_tasks";
    /// Arc preview length (frames)
    const HINT_FRAMES: usize = 45;

    thread_local! {
        static FRAME_LOOP: RefCell<Option<AnimationLoop>> = const { RefCell::new(None) };
    }

    /// Pointer held down on the canvas
    struct Press {
        start: Vec2,
        current: Vec2,
        at: f64,
    }

    /// Game instance holding all state
    struct Game {
        session: ShotSession,
        settings: Settings,
        leaderboard: Leaderboard,
        feedback: WebFeedback,
        audio: AudioManager,
        renderer: CanvasRenderer,
        input: TickInput,
        press: Option<Press>,
    }

    impl Game {
        fn pointer_down(&mut self, pos: Vec2, now: f64) {
            match self.session.phase() {
                RoundPhase::Ready | RoundPhase::Finished => self.session.start(),
                RoundPhase::Paused => {
                    self.session.toggle_pause();
                    return;
                }
                RoundPhase::Playing => {}
            }
            self.press = Some(Press {
                start: pos,
                current: pos,
                at: now,
            });
        }

        fn pointer_move(&mut self, pos: Vec2) {
            if let Some(press) = &mut self.press {
                press.current = pos;
            }
        }

        fn pointer_up(&mut self, pos: Vec2, now: f64) {
            if let Some(press) = self.press.take() {
                let gesture = Gesture::new(press.start, pos, (now - press.at) as f32);
                self.input.gesture = Some(gesture);
            }
        }

        /// Launch velocity the current press would produce
        fn aim(&self, now: f64) -> Option<Vec2> {
            if !self.settings.show_trajectory {
                return None;
            }
            let press = self.press.as_ref()?;
            let gesture = Gesture::new(press.start, press.current, (now - press.at) as f32);
            launch_velocity(&gesture, &self.session.state().tuning)
        }

        fn frame(&mut self, now: f64) {
            let input = std::mem::take(&mut self.input);
            let summary = if self.settings.haptics {
                let mut sink = WithSound {
                    audio: &self.audio,
                    inner: &mut self.feedback,
                };
                self.session.frame(&input, &mut sink)
            } else {
                let mut muted = Muted(&mut self.feedback);
                let mut sink = WithSound {
                    audio: &self.audio,
                    inner: &mut muted,
                };
                self.session.frame(&input, &mut sink)
            };
            if let Some(summary) = summary {
                self.finish_round(&summary, now);
            }
            self.render(now);
        }

        fn finish_round(&mut self, summary: &RoundSummary, now: f64) {
            self.audio.play(SoundEffect::Buzzer);
            if let Some(rank) = self.leaderboard.add_result(summary, now) {
                self.audio.play(SoundEffect::NewRecord);
                self.feedback
                    .notify(Toast::success(format!("New record! #{rank}")));
                if let Err(e) = self.leaderboard.save() {
                    log::error!("Error saving leaderboard: {}", e);
                }
            }
            for task in summary.completed_tasks.iter().filter_map(|id| find_task(id)) {
                self.feedback.notify(
                    Toast::success(format!("Task complete: {}", task.title))
                        .with_description(format!("Claim {} coins in Tasks", task.reward)),
                );
            }
            if let Err(e) = platform::save_json(TASKS_KEY, self.session.tasks()) {
                log::error!("Error saving task progress: {}", e);
            }
        }

        /// Idle-screen text when no notice is showing
        fn prompt(&self) -> Option<(String, [f32; 4])> {
            let text = match self.session.phase() {
                RoundPhase::Ready => "Swipe up to shoot".to_string(),
                RoundPhase::Paused => "Paused".to_string(),
                RoundPhase::Finished => {
                    format!("Final score {}", self.session.state().board.score)
                }
                RoundPhase::Playing => return None,
            };
            Some((text, colors::HUD_TEXT))
        }

        fn render(&self, now: f64) {
            let banner = self.feedback.banner(now).map(|toast| {
                let color = match toast.kind {
                    NotificationKind::Error => colors::ERROR,
                    _ => colors::SUCCESS,
                };
                (toast.title.clone(), color)
            });
            let state = self.session.state();
            let opts = SceneOptions {
                spin: self.settings.spin_enabled(),
                aim: self.aim(now),
                hint_frames: HINT_FRAMES,
                hud: Some(Hud {
                    score: state.board.score,
                    seconds_left: self.session.seconds_left(),
                    combo: state.board.combo,
                    banner: banner.or_else(|| self.prompt()),
                }),
            };
            let cmds = build_scene(state, &opts);
            if let Err(e) = self.renderer.draw(&cmds) {
                log::warn!("Render error: {:?}", e);
            }
        }
    }

    fn load_tuning() -> ShotTuning {
        match platform::load_json::<ShotTuning>(TUNING_KEY) {
            Ok(Some(tuning)) => match tuning.validate() {
                Ok(()) => {
                    log::info!("Using stored tuning");
                    tuning
                }
                Err(e) => {
                    log::warn!("Ignoring stored tuning: {}", e);
                    ShotTuning::default()
                }
            },
            Ok(None) => ShotTuning::default(),
            Err(e) => {
                log::warn!("Ignoring stored tuning: {}", e);
                ShotTuning::default()
            }
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Hoop Hub starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| JsValue::from_str("no canvas"))?
            .dyn_into()?;

        let mut renderer = CanvasRenderer::new(canvas.clone(), window.device_pixel_ratio())?;
        let (width, height) = renderer.fit_to_client();

        let settings = Settings::load();
        let settings_volume = settings.volume;
        let tasks: TaskProgress = platform::load_or_default(TASKS_KEY);
        let mut session = ShotSession::new(width, height, load_tuning()).with_tasks(tasks);
        session.set_combo_text(settings.effective_combo_text());

        let game = Rc::new(RefCell::new(Game {
            session,
            settings,
            leaderboard: Leaderboard::load(),
            feedback: WebFeedback::new(),
            audio: AudioManager::new(settings_volume),
            renderer,
            input: TickInput::default(),
            press: None,
        }));
        log::info!("Court initialized at {}x{}", width, height);

        setup_input_handlers(&canvas, game.clone())?;
        setup_auto_pause(game.clone())?;

        let frame_game = game.clone();
        let frame_loop = AnimationLoop::start(move |_ts| frame_game.borrow_mut().frame(now_ms()))?;
        FRAME_LOOP.with(|slot| *slot.borrow_mut() = Some(frame_loop));

        // Leaving the page stops the loop
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let stopped = FRAME_LOOP.with(|slot| slot.borrow_mut().take());
            drop(stopped);
        });
        window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref())?;
        closure.forget();

        log::info!("Hoop Hub running!");
        Ok(())
    }

    fn pointer_pos(event: &PointerEvent) -> Vec2 {
        Vec2::new(event.offset_x() as f32, event.offset_y() as f32)
    }

    fn setup_input_handlers(
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), JsValue> {
        // Press
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                event.prevent_default();
                let _ = canvas_clone.set_pointer_capture(event.pointer_id());
                game.borrow_mut().pointer_down(pointer_pos(&event), now_ms());
            });
            canvas.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Drag
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                game.borrow_mut().pointer_move(pointer_pos(&event));
            });
            canvas.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Release
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                game.borrow_mut().pointer_up(pointer_pos(&event), now_ms());
            });
            canvas.add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Cancelled press never throws
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                game.borrow_mut().press = None;
            });
            canvas
                .add_event_listener_with_callback("pointercancel", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

        // Viewport changes rebuild the court
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut g = game.borrow_mut();
                let (w, h) = g.renderer.fit_to_client();
                g.input.resize = Some(Vec2::new(w, h));
            });
            window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Keyboard
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    " " | "Enter" if g.session.phase() != RoundPhase::Playing => g.session.start(),
                    "Escape" | "p" | "P" => g.session.toggle_pause(),
                    _ => {}
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    if g.session.phase() == RoundPhase::Playing {
                        g.session.toggle_pause();
                        log::info!("Auto-paused (tab hidden)");
                    }
                }
            });
            document
                .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut g = game.borrow_mut();
                if g.session.phase() == RoundPhase::Playing {
                    g.session.toggle_pause();
                    log::info!("Auto-paused (window blur)");
                }
            });
            window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use glam::Vec2;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use hoop_hub::feedback::LogFeedback;
    use hoop_hub::platform;
    use hoop_hub::rewards::{self, Inventory, RewardChest};
    use hoop_hub::session::{RoundSummary, ShotSession};
    use hoop_hub::sim::{Gesture, TickInput};
    use hoop_hub::wallet::{InMemoryWallet, WalletService};
    use hoop_hub::{Leaderboard, ShotTuning, UserId};

    /// Frames between scripted throws
    const THROW_EVERY: u32 = 45;

    pub fn load_tuning(path: &str) -> ShotTuning {
        let parsed = std::fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|json| ShotTuning::from_json(&json).map_err(|e| e.to_string()));
        match parsed {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path);
                tuning
            }
            Err(e) => {
                log::warn!("Using default tuning ({}: {})", path, e);
                ShotTuning::default()
            }
        }
    }

    /// Play one timed round with randomized upward flicks
    fn play_round(session: &mut ShotSession, rng: &mut Pcg32) -> RoundSummary {
        let mut feedback = LogFeedback;
        session.start();
        let rest = session.state().court.rest;

        let mut frame = 0u32;
        loop {
            let mut input = TickInput::default();
            if frame % THROW_EVERY == 0 {
                let end = rest + Vec2::new(rng.random_range(-40.0..40.0), -200.0);
                input.gesture = Some(Gesture::new(rest, end, rng.random_range(90.0..160.0)));
            }
            frame += 1;
            if let Some(summary) = session.frame(&input, &mut feedback) {
                return summary;
            }
        }
    }

    pub fn run(tuning: ShotTuning, seed: u64) {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut session = ShotSession::new(400.0, 800.0, tuning);
        let summary = play_round(&mut session, &mut rng);

        let mut wallet = InMemoryWallet::new(UserId::new("demo-player"), 0);
        for id in &summary.completed_tasks {
            match session.tasks_mut().claim(id, &mut wallet) {
                Ok(coins) => log::info!("Claimed task {}: +{} coins", id, coins),
                Err(e) => log::error!("Error claiming task {}: {}", id, e),
            }
        }

        let mut chest = RewardChest::new(seed);
        let mut inventory = Inventory::default();
        let reward = chest.open();
        if let Err(e) = rewards::claim(&reward, &mut wallet, &mut inventory) {
            log::error!("Error claiming reward: {}", e);
        }

        let mut leaderboard = Leaderboard::load();
        let rank = leaderboard.add_result(&summary, platform::now_ms());
        if let Err(e) = leaderboard.save() {
            log::error!("Error saving leaderboard: {}", e);
        }

        println!(
            "Round over: {} points, {}/{} makes ({:.0}%), best combo {}",
            summary.score, summary.makes, summary.attempts, summary.accuracy, summary.best_combo
        );
        if let Some(rank) = rank {
            println!("Leaderboard rank: #{}", rank);
        }
        println!("Chest: {} ({})", reward.title(), reward.destination());
        println!("Wallet balance: {} coins", wallet.balance());
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Hoop Hub (native) starting...");
    log::info!("Native mode plays a scripted round - serve the wasm build for the playable game");

    let tuning = match std::env::args().nth(1) {
        Some(path) => headless::load_tuning(&path),
        None => hoop_hub::ShotTuning::default(),
    };
    let seed = hoop_hub::platform::now_ms() as u64;
    headless::run(tuning, seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
