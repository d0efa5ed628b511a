//! Sound effects
//!
//! Every effect is a short list of procedurally generated tones, played
//! through the Web Audio API in the browser. No external files needed.

use crate::feedback::{FeedbackSink, Haptic, ImpactStyle, NotificationKind, Toast};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ball leaves the hand
    Launch,
    /// Ball hits the backboard
    Backboard,
    /// Ball drops through the net
    Swish,
    /// Flight ended without a make
    Miss,
    /// Round clock ran out
    Buzzer,
    /// Round made the leaderboard
    NewRecord,
}

impl SoundEffect {
    /// Effect that accompanies a haptic pulse, if any
    pub fn for_haptic(signal: Haptic) -> Option<Self> {
        match signal {
            Haptic::Impact(ImpactStyle::Light) => Some(SoundEffect::Launch),
            Haptic::Impact(ImpactStyle::Medium) => Some(SoundEffect::Backboard),
            Haptic::Notification(NotificationKind::Success) => Some(SoundEffect::Swish),
            Haptic::Notification(NotificationKind::Error) => Some(SoundEffect::Miss),
            _ => None,
        }
    }

    /// The tones making up this effect
    pub fn tones(self) -> Vec<Tone> {
        match self {
            // Whoosh up
            SoundEffect::Launch => vec![Tone::sweep(Wave::Triangle, 200.0, 600.0, 0.3, 0.25)],
            // Solid thump
            SoundEffect::Backboard => vec![Tone::sweep(Wave::Sine, 150.0, 60.0, 0.6, 0.15)],
            // Rising ding
            SoundEffect::Swish => [600.0, 800.0, 1000.0]
                .iter()
                .enumerate()
                .map(|(i, f)| Tone::note(Wave::Sine, *f, 0.25, 0.2).after(i as f64 * 0.08))
                .collect(),
            // Flat descend
            SoundEffect::Miss => vec![Tone::sweep(Wave::Sawtooth, 300.0, 120.0, 0.15, 0.3)],
            SoundEffect::Buzzer => vec![Tone::note(Wave::Square, 220.0, 0.2, 0.6)],
            SoundEffect::NewRecord => [500.0, 600.0, 700.0, 800.0, 1000.0]
                .iter()
                .enumerate()
                .map(|(i, f)| Tone::note(Wave::Triangle, *f, 0.25, 0.3).after(i as f64 * 0.08))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wave {
    Sine,
    Triangle,
    Square,
    Sawtooth,
}

/// One oscillator burst with an exponential decay
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub wave: Wave,
    pub freq_start: f32,
    pub freq_end: f32,
    /// Peak gain before volume scaling
    pub gain: f32,
    /// Start offset (s)
    pub delay: f64,
    /// Length (s)
    pub duration: f64,
}

impl Tone {
    fn note(wave: Wave, freq: f32, gain: f32, duration: f64) -> Self {
        Self::sweep(wave, freq, freq, gain, duration)
    }

    fn sweep(wave: Wave, freq_start: f32, freq_end: f32, gain: f32, duration: f64) -> Self {
        Self {
            wave,
            freq_start,
            freq_end,
            gain,
            delay: 0.0,
            duration,
        }
    }

    fn after(mut self, delay: f64) -> Self {
        self.delay = delay;
        self
    }
}

/// Something that can play effects
pub trait SoundPlayer {
    fn play(&self, effect: SoundEffect);
}

/// Plays the matching effect for every haptic, then passes everything on
pub struct WithSound<'a> {
    pub audio: &'a dyn SoundPlayer,
    pub inner: &'a mut dyn FeedbackSink,
}

impl FeedbackSink for WithSound<'_> {
    fn haptic(&mut self, signal: Haptic) {
        if let Some(effect) = SoundEffect::for_haptic(signal) {
            self.audio.play(effect);
        }
        self.inner.haptic(signal);
    }

    fn notify(&mut self, toast: Toast) {
        self.inner.notify(toast);
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{SoundEffect, SoundPlayer, Tone, Wave};

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        volume: f32,
    }

    impl Default for AudioManager {
        fn default() -> Self {
            Self::new(0.8)
        }
    }

    impl AudioManager {
        pub fn new(volume: f32) -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                volume: volume.clamp(0.0, 1.0),
            }
        }

        pub fn set_volume(&mut self, volume: f32) {
            self.volume = volume.clamp(0.0, 1.0);
        }

        fn create_osc(ctx: &AudioContext, tone: &Tone) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(match tone.wave {
                Wave::Sine => OscillatorType::Sine,
                Wave::Triangle => OscillatorType::Triangle,
                Wave::Square => OscillatorType::Square,
                Wave::Sawtooth => OscillatorType::Sawtooth,
            });
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        fn play_tone(&self, ctx: &AudioContext, tone: &Tone) {
            let Some((osc, gain)) = Self::create_osc(ctx, tone) else {
                return;
            };
            let t = ctx.current_time() + tone.delay;
            let end = t + tone.duration;

            gain.gain().set_value_at_time(self.volume * tone.gain, t).ok();
            gain.gain().exponential_ramp_to_value_at_time(0.01, end).ok();
            osc.frequency().set_value_at_time(tone.freq_start, t).ok();
            if tone.freq_end != tone.freq_start {
                osc.frequency()
                    .exponential_ramp_to_value_at_time(tone.freq_end, end)
                    .ok();
            }

            osc.start_with_when(t).ok();
            osc.stop_with_when(end + 0.05).ok();
        }
    }

    impl SoundPlayer for AudioManager {
        fn play(&self, effect: SoundEffect) {
            if self.volume <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            // Browsers start suspended until a user gesture
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }
            for tone in effect.tones() {
                self.play_tone(ctx, &tone);
            }
        }
    }
}
