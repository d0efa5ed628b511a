//! Player settings and preferences
//!
//! Persisted separately from progress in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::platform::{self, StorageError};

/// Player preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Feedback ===
    /// Vibration on launch, bounce, make and miss
    pub haptics: bool,
    /// Combo callouts ("Nice!", "On fire!") after consecutive makes
    pub combo_text: bool,

    // === HUD ===
    /// Dotted arc preview while aiming
    pub show_trajectory: bool,

    // === Audio ===
    /// Sound volume (0.0 - 1.0)
    pub volume: f32,

    // === Accessibility ===
    /// Reduced motion (no ball spin, no combo pop)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            haptics: true,
            combo_text: true,
            show_trajectory: true,
            volume: 0.8,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "hoop_hub_settings";

    /// Effective ball spin (respects reduced_motion)
    pub fn spin_enabled(&self) -> bool {
        !self.reduced_motion
    }

    /// Effective combo callouts (respects reduced_motion)
    pub fn effective_combo_text(&self) -> bool {
        self.combo_text && !self.reduced_motion
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = if volume.is_finite() {
            volume.clamp(0.0, 1.0)
        } else {
            0.0
        };
    }

    pub fn load() -> Self {
        let mut settings: Self = platform::load_or_default(Self::STORAGE_KEY);
        settings.set_volume(settings.volume);
        settings
    }

    pub fn save(&self) -> Result<(), StorageError> {
        platform::save_json(Self::STORAGE_KEY, self)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduced_motion_overrides() {
        let mut settings = Settings::default();
        assert!(settings.spin_enabled());
        assert!(settings.effective_combo_text());

        settings.reduced_motion = true;
        assert!(!settings.spin_enabled());
        assert!(!settings.effective_combo_text());
    }

    #[test]
    fn test_volume_is_clamped() {
        let mut settings = Settings::default();
        settings.set_volume(3.0);
        assert_eq!(settings.volume, 1.0);
        settings.set_volume(f32::NAN);
        assert_eq!(settings.volume, 0.0);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"haptics":false}"#).unwrap();
        assert!(!settings.haptics);
        assert!(settings.combo_text);
        assert_eq!(settings.volume, 0.8);
    }

    #[test]
    fn test_save_and_load() {
        let mut settings = Settings::default();
        settings.show_trajectory = false;
        settings.save().unwrap();
        assert_eq!(Settings::load(), settings);
    }
}
