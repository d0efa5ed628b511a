//! Timed shooting round
//!
//! Wraps the simulator with a round clock, forwards simulator events to the
//! player as haptics and notices, and folds the final tally into task
//! progress.

use serde::{Deserialize, Serialize};

use crate::feedback::{FeedbackSink, Haptic, Toast};
use crate::sim::{GameEvent, GameState, TickInput, combo_callout, tick};
use crate::tasks::TaskProgress;
use crate::tuning::ShotTuning;

/// Round lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Waiting for the player to start
    Ready,
    /// Clock running, gestures accepted
    Playing,
    /// Clock stopped mid-round
    Paused,
    /// Clock ran out and the last flight resolved
    Finished,
}

/// Final tally of a round
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundSummary {
    pub score: u32,
    pub makes: u32,
    pub attempts: u32,
    pub best_combo: u32,
    /// Make percentage in [0, 100]
    pub accuracy: f32,
    /// Game tasks this round completed
    pub completed_tasks: Vec<String>,
}

/// One player's shooting round plus their task progress
pub struct ShotSession {
    state: GameState,
    phase: RoundPhase,
    frames_left: u32,
    tasks: TaskProgress,
    combo_text: bool,
}

impl ShotSession {
    pub fn new(width: f32, height: f32, tuning: ShotTuning) -> Self {
        let frames_left = tuning.round_frames;
        Self {
            state: GameState::new(width, height, tuning),
            phase: RoundPhase::Ready,
            frames_left,
            tasks: TaskProgress::new(),
            combo_text: true,
        }
    }

    /// Carry over previously saved task progress
    pub fn with_tasks(mut self, tasks: TaskProgress) -> Self {
        self.tasks = tasks;
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn tasks(&self) -> &TaskProgress {
        &self.tasks
    }

    pub fn tasks_mut(&mut self) -> &mut TaskProgress {
        &mut self.tasks
    }

    pub fn set_combo_text(&mut self, enabled: bool) {
        self.combo_text = enabled;
    }

    pub fn frames_left(&self) -> u32 {
        self.frames_left
    }

    /// Whole seconds left on the clock, rounded up
    pub fn seconds_left(&self) -> u32 {
        let fps = crate::consts::FRAMES_PER_SECOND;
        self.frames_left.div_ceil(fps)
    }

    /// Begin a fresh round: score and clock reset
    pub fn start(&mut self) {
        self.state.reset_score();
        self.frames_left = self.state.tuning.round_frames;
        self.phase = RoundPhase::Playing;
        log::info!("round started ({} frames)", self.frames_left);
    }

    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            RoundPhase::Playing => RoundPhase::Paused,
            RoundPhase::Paused => RoundPhase::Playing,
            other => other,
        };
    }

    /// Advance one display frame.
    ///
    /// Returns the summary on the frame the round finishes.
    pub fn frame(
        &mut self,
        input: &TickInput,
        feedback: &mut dyn FeedbackSink,
    ) -> Option<RoundSummary> {
        if self.phase != RoundPhase::Playing {
            if let Some(size) = input.resize {
                self.state.resize(size.x, size.y);
            }
            return None;
        }

        if self.frames_left == 0 {
            // Overtime: only the ball already in the air may finish
            let overtime = TickInput {
                gesture: None,
                resize: input.resize,
            };
            tick(&mut self.state, &overtime);
        } else {
            tick(&mut self.state, input);
            self.frames_left -= 1;
        }

        for event in self.state.drain_events() {
            self.forward(event, feedback);
        }

        if self.frames_left == 0 && !self.state.ball.is_flying() {
            return Some(self.finish());
        }
        None
    }

    fn forward(&self, event: GameEvent, feedback: &mut dyn FeedbackSink) {
        match event {
            GameEvent::Launched { .. } => feedback.haptic(Haptic::LIGHT),
            GameEvent::BackboardHit { .. } => feedback.haptic(Haptic::MEDIUM),
            GameEvent::Make { combo, .. } => {
                feedback.haptic(Haptic::SUCCESS);
                if self.combo_text {
                    if let Some(text) = combo_callout(combo) {
                        feedback.notify(
                            Toast::success(text).with_description(format!("{combo} in a row")),
                        );
                    }
                }
            }
            GameEvent::Miss { .. } => feedback.haptic(Haptic::ERROR),
        }
    }

    fn finish(&mut self) -> RoundSummary {
        self.phase = RoundPhase::Finished;
        let board = &self.state.board;
        let completed = self.tasks.record_round(board);
        log::info!(
            "round over: {} points, {}/{} makes, best combo {}",
            board.score,
            board.makes,
            board.attempts,
            board.best_combo
        );
        RoundSummary {
            score: board.score,
            makes: board.makes,
            attempts: board.attempts,
            best_combo: board.best_combo,
            accuracy: board.accuracy(),
            completed_tasks: completed.iter().map(|t| t.id.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::RecordingFeedback;
    use crate::sim::Gesture;
    use glam::Vec2;

    fn short_round(frames: u32) -> ShotSession {
        let mut tuning = ShotTuning::default();
        tuning.round_frames = frames;
        ShotSession::new(400.0, 800.0, tuning)
    }

    fn throw() -> TickInput {
        TickInput {
            gesture: Some(Gesture::new(
                Vec2::new(200.0, 700.0),
                Vec2::new(200.0, 500.0),
                150.0,
            )),
            ..Default::default()
        }
    }

    /// Drop the ball straight through the hoop
    fn drop_in(session: &mut ShotSession) {
        let state = session.state_mut();
        state.ball.pos = Vec2::new(state.court.rim.center_x, state.court.rim.y - 10.0);
        state.ball.launch(Vec2::new(0.0, 4.0));
        state.board.record_attempt();
    }

    #[test]
    fn test_gestures_ignored_until_started() {
        let mut session = short_round(60);
        let mut fb = RecordingFeedback::default();
        assert_eq!(session.frame(&throw(), &mut fb), None);
        assert_eq!(session.phase(), RoundPhase::Ready);
        assert!(!session.state().ball.is_flying());
        assert!(fb.haptics.is_empty());
    }

    #[test]
    fn test_clock_runs_out_into_summary() {
        let mut session = short_round(10);
        let mut fb = RecordingFeedback::default();
        session.start();
        assert_eq!(session.seconds_left(), 1);

        let idle = TickInput::default();
        let mut summary = None;
        for _ in 0..10 {
            summary = session.frame(&idle, &mut fb);
        }
        let summary = summary.expect("round should end on its last frame");
        assert_eq!(session.phase(), RoundPhase::Finished);
        assert_eq!(summary.attempts, 0);
        assert!(summary.completed_tasks.is_empty());
    }

    #[test]
    fn test_flight_in_air_resolves_after_clock() {
        let mut session = short_round(2);
        let mut fb = RecordingFeedback::default();
        session.start();
        assert_eq!(session.frame(&throw(), &mut fb), None);
        assert_eq!(session.frame(&TickInput::default(), &mut fb), None);
        assert_eq!(session.frames_left(), 0);
        assert!(session.state().ball.is_flying());

        let mut summary = None;
        for _ in 0..700 {
            // Late gestures must not start another shot
            summary = session.frame(&throw(), &mut fb);
            if summary.is_some() {
                break;
            }
        }
        let summary = summary.expect("flight should resolve");
        assert_eq!(summary.attempts, 1);
        assert_eq!(summary.completed_tasks, vec!["6".to_string()]);
        assert_eq!(fb.haptics.first(), Some(&Haptic::LIGHT));
    }

    #[test]
    fn test_make_feedback_and_combo_text() {
        let mut session = short_round(600);
        let mut fb = RecordingFeedback::default();
        session.start();

        for _ in 0..2 {
            drop_in(&mut session);
            while session.state().ball.is_flying() {
                session.frame(&TickInput::default(), &mut fb);
            }
        }
        assert_eq!(session.state().board.combo, 2);
        assert_eq!(fb.haptics, vec![Haptic::SUCCESS, Haptic::SUCCESS]);
        assert_eq!(fb.toasts.len(), 1);
        assert_eq!(fb.toasts[0].title, "Nice!");
    }

    #[test]
    fn test_combo_text_can_be_disabled() {
        let mut session = short_round(600);
        session.set_combo_text(false);
        let mut fb = RecordingFeedback::default();
        session.start();
        for _ in 0..3 {
            drop_in(&mut session);
            while session.state().ball.is_flying() {
                session.frame(&TickInput::default(), &mut fb);
            }
        }
        assert!(fb.toasts.is_empty());
    }

    #[test]
    fn test_pause_freezes_clock() {
        let mut session = short_round(30);
        let mut fb = RecordingFeedback::default();
        session.start();
        session.frame(&TickInput::default(), &mut fb);
        session.toggle_pause();
        for _ in 0..50 {
            assert_eq!(session.frame(&throw(), &mut fb), None);
        }
        assert_eq!(session.frames_left(), 29);
        assert_eq!(session.phase(), RoundPhase::Paused);
        session.toggle_pause();
        assert_eq!(session.phase(), RoundPhase::Playing);
    }

    #[test]
    fn test_restart_clears_score() {
        let mut session = short_round(600);
        let mut fb = RecordingFeedback::default();
        session.start();
        drop_in(&mut session);
        while session.state().ball.is_flying() {
            session.frame(&TickInput::default(), &mut fb);
        }
        assert_eq!(session.state().board.score, 2);
        session.start();
        assert_eq!(session.state().board.score, 0);
        assert_eq!(session.frames_left(), 600);
    }
}
