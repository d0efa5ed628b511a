//! Hoop Hub - basketball fan hub mini-game
//!
//! Core modules:
//! - `sim`: Deterministic shot simulator (gesture → flight → make/miss)
//! - `tuning`: Data-driven simulator constants
//! - `session`: Timed shooting round driving the simulator
//! - `wallet`, `rewards`, `tasks`, `swipes`: Coin economy around the game
//! - `realtime`, `chat`: Push-style subscription channel and its chat feed
//! - `feedback`: Haptics and transient notices
//! - `audio`: Procedural sound effects
//! - `renderer`: Scene building and canvas drawing
//! - `leaderboard`, `settings`: Locally persisted results and preferences
//! - `platform`: Browser/native platform abstraction

pub mod audio;
pub mod chat;
pub mod feedback;
pub mod leaderboard;
pub mod platform;
pub mod realtime;
pub mod renderer;
pub mod rewards;
pub mod session;
pub mod settings;
pub mod sim;
pub mod swipes;
pub mod tasks;
pub mod tuning;
pub mod wallet;

pub use leaderboard::Leaderboard;
pub use session::{RoundPhase, RoundSummary, ShotSession};
pub use settings::Settings;
pub use tuning::ShotTuning;

/// Game configuration constants
pub mod consts {
    /// Display frames per second the per-frame constants are tuned for
    pub const FRAMES_PER_SECOND: u32 = 60;

    /// Length of a timed round (60 seconds)
    pub const ROUND_SECONDS: u32 = 60;

    /// Default downward acceleration (px/frame²)
    pub const GRAVITY: f32 = 0.6;

    /// Launch power clamp (px/frame)
    pub const MIN_LAUNCH_POWER: f32 = 8.0;
    pub const MAX_LAUNCH_POWER: f32 = 26.0;

    /// Gestures shorter than this (px) are ignored
    pub const MIN_SWIPE_DISTANCE: f32 = 20.0;

    /// Points awarded per make
    pub const POINTS_PER_MAKE: u32 = 2;

    /// Fraction of horizontal speed applied to ball spin (radians per px)
    pub const SPIN_FACTOR: f32 = 0.02;

    /// Backboard bounce keeps this fraction of the reflected speed
    pub const BACKBOARD_DAMPING: f32 = 0.6;

    /// Hard cap on a single flight so every attempt resolves (10 seconds)
    pub const MAX_FLIGHT_FRAMES: u32 = 600;
}

/// Opaque handle of the signed-in player
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct UserId(pub String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Clamp a vector's length into `[min, max]`, keeping its direction
#[inline]
pub fn clamp_length(v: glam::Vec2, min: f32, max: f32) -> glam::Vec2 {
    let len = v.length();
    if len <= f32::EPSILON {
        return glam::Vec2::ZERO;
    }
    v * (len.clamp(min, max) / len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_clamp_length() {
        let v = clamp_length(Vec2::new(30.0, 40.0), 1.0, 10.0);
        assert!((v.length() - 10.0).abs() < 1e-4);
        assert!((v.x - 6.0).abs() < 1e-4);

        let v = clamp_length(Vec2::new(0.3, 0.4), 1.0, 10.0);
        assert!((v.length() - 1.0).abs() < 1e-4);

        assert_eq!(clamp_length(Vec2::ZERO, 1.0, 10.0), Vec2::ZERO);
    }
}
