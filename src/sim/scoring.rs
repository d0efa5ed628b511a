//! Score and combo bookkeeping for a shooting session

use serde::{Deserialize, Serialize};

/// Running tally for one session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub score: u32,
    /// Consecutive makes since the last miss
    pub combo: u32,
    pub best_combo: u32,
    pub makes: u32,
    pub attempts: u32,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a launched shot
    pub fn record_attempt(&mut self) {
        self.attempts += 1;
    }

    /// Apply a make, returning the new combo
    pub fn record_make(&mut self, points: u32) -> u32 {
        self.score += points;
        self.makes += 1;
        self.combo += 1;
        self.best_combo = self.best_combo.max(self.combo);
        self.combo
    }

    /// Apply a miss; combo always returns to zero
    pub fn record_miss(&mut self) {
        self.combo = 0;
    }

    pub fn misses(&self) -> u32 {
        self.attempts.saturating_sub(self.makes)
    }

    /// Make percentage in [0, 100]
    pub fn accuracy(&self) -> f32 {
        if self.attempts == 0 {
            0.0
        } else {
            self.makes as f32 * 100.0 / self.attempts as f32
        }
    }
}

/// Escalating feedback text for a combo (nothing for a single make)
pub fn combo_callout(combo: u32) -> Option<&'static str> {
    match combo {
        0 | 1 => None,
        2 => Some("Nice!"),
        3 | 4 => Some("On fire!"),
        5..=9 => Some("Sharpshooter!"),
        _ => Some("Unstoppable!"),
    }
}
