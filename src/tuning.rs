//! Data-driven simulator balance
//!
//! Every constant the shot simulator reads lives in [`ShotTuning`], so a
//! build can ship alternative balance files (JSON) without code changes.
//! Geometry is expressed as fractions of the viewport and turned into pixels
//! by [`crate::sim::Court::from_viewport`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// How a release gesture becomes a launch velocity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum LaunchModel {
    /// Speed-based: power = gesture speed (px/ms) * `speed_scale`, clamped
    Flick { speed_scale: f32 },
    /// Velocity = displacement * `scale`, length clamped
    Displacement { scale: f32 },
}

impl Default for LaunchModel {
    fn default() -> Self {
        LaunchModel::Flick { speed_scale: 12.0 }
    }
}

/// Simulator constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShotTuning {
    /// Downward acceleration (px/frame²)
    pub gravity: f32,
    pub launch: LaunchModel,
    /// Launch speed clamp (px/frame)
    pub min_power: f32,
    pub max_power: f32,
    /// Shortest accepted gesture (px)
    pub min_swipe_distance: f32,
    /// Rotation per px of horizontal travel (radians)
    pub spin_factor: f32,

    // === Geometry (fractions of viewport) ===
    /// Ball radius as a fraction of viewport width
    pub ball_radius_frac: f32,
    /// Resting position height as a fraction of viewport height
    pub rest_y_frac: f32,
    /// Rim center x as a fraction of viewport width
    pub rim_x_frac: f32,
    /// Rim y as a fraction of viewport height
    pub rim_y_frac: f32,
    /// Rim inner width as a fraction of viewport width
    pub rim_width_frac: f32,
    /// Rim band height (make-detection window) as a fraction of viewport height
    pub rim_band_frac: f32,
    /// Backboard size as fractions of viewport width/height
    pub backboard_width_frac: f32,
    pub backboard_height_frac: f32,
    /// Gap between rim and backboard bottom edge, fraction of viewport height
    pub backboard_gap_frac: f32,

    // === Response ===
    /// Fraction of reflected speed kept after a backboard bounce
    pub backboard_damping: f32,
    /// Points per make (2 or 3)
    pub points_per_make: u32,
    /// Flight length cap before a forced miss
    pub max_flight_frames: u32,
    /// Round length in frames
    pub round_frames: u32,
}

impl Default for ShotTuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            launch: LaunchModel::default(),
            min_power: MIN_LAUNCH_POWER,
            max_power: MAX_LAUNCH_POWER,
            min_swipe_distance: MIN_SWIPE_DISTANCE,
            spin_factor: SPIN_FACTOR,

            ball_radius_frac: 0.05,
            rest_y_frac: 0.85,
            rim_x_frac: 0.5,
            rim_y_frac: 0.35,
            rim_width_frac: 0.3,
            rim_band_frac: 0.02,
            backboard_width_frac: 0.45,
            backboard_height_frac: 0.12,
            backboard_gap_frac: 0.04,

            backboard_damping: BACKBOARD_DAMPING,
            points_per_make: POINTS_PER_MAKE,
            max_flight_frames: MAX_FLIGHT_FRAMES,
            round_frames: ROUND_SECONDS * FRAMES_PER_SECOND,
        }
    }
}

/// Rejected tuning values
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("tuning parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{field} must be positive (got {value})")]
    NotPositive { field: &'static str, value: f32 },

    #[error("{field} must be within [0, 1] (got {value})")]
    OutOfUnitRange { field: &'static str, value: f32 },

    #[error("max_power ({max}) is below min_power ({min})")]
    PowerRange { min: f32, max: f32 },

    #[error("{0} must be non-zero")]
    Zero(&'static str),
}

impl ShotTuning {
    /// Parse and validate tuning from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: ShotTuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every constant the simulator relies on
    pub fn validate(&self) -> Result<(), TuningError> {
        positive("gravity", self.gravity)?;
        positive("min_power", self.min_power)?;
        positive("max_power", self.max_power)?;
        if self.max_power < self.min_power {
            return Err(TuningError::PowerRange {
                min: self.min_power,
                max: self.max_power,
            });
        }
        match self.launch {
            LaunchModel::Flick { speed_scale } => positive("launch.speed_scale", speed_scale)?,
            LaunchModel::Displacement { scale } => positive("launch.scale", scale)?,
        }

        unit("rest_y_frac", self.rest_y_frac)?;
        unit("rim_x_frac", self.rim_x_frac)?;
        unit("rim_y_frac", self.rim_y_frac)?;
        unit("backboard_damping", self.backboard_damping)?;
        for (field, value) in [
            ("ball_radius_frac", self.ball_radius_frac),
            ("rim_width_frac", self.rim_width_frac),
            ("rim_band_frac", self.rim_band_frac),
            ("backboard_width_frac", self.backboard_width_frac),
            ("backboard_height_frac", self.backboard_height_frac),
        ] {
            positive(field, value)?;
            unit(field, value)?;
        }
        unit("backboard_gap_frac", self.backboard_gap_frac)?;

        if self.points_per_make == 0 {
            return Err(TuningError::Zero("points_per_make"));
        }
        if self.max_flight_frames == 0 {
            return Err(TuningError::Zero("max_flight_frames"));
        }
        if self.round_frames == 0 {
            return Err(TuningError::Zero("round_frames"));
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(TuningError::NotPositive { field, value })
    }
}

fn unit(field: &'static str, value: f32) -> Result<(), TuningError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(TuningError::OutOfUnitRange { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        ShotTuning::default().validate().unwrap();
    }

    #[test]
    fn test_partial_json_takes_defaults() {
        let tuning = ShotTuning::from_json(r#"{ "gravity": 0.8, "points_per_make": 3 }"#).unwrap();
        assert_eq!(tuning.gravity, 0.8);
        assert_eq!(tuning.points_per_make, 3);
        assert_eq!(tuning.max_power, MAX_LAUNCH_POWER);
    }

    #[test]
    fn test_launch_model_tagging() {
        let tuning =
            ShotTuning::from_json(r#"{ "launch": { "model": "displacement", "scale": 0.1 } }"#)
                .unwrap();
        assert_eq!(tuning.launch, LaunchModel::Displacement { scale: 0.1 });
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            ShotTuning::from_json(r#"{ "gravity": 0.0 }"#),
            Err(TuningError::NotPositive { field: "gravity", .. })
        ));
        assert!(matches!(
            ShotTuning::from_json(r#"{ "min_power": 10.0, "max_power": 5.0 }"#),
            Err(TuningError::PowerRange { .. })
        ));
        assert!(matches!(
            ShotTuning::from_json(r#"{ "backboard_damping": 1.5 }"#),
            Err(TuningError::OutOfUnitRange { .. })
        ));
        assert!(matches!(
            ShotTuning::from_json(r#"{ "points_per_make": 0 }"#),
            Err(TuningError::Zero("points_per_make"))
        ));
        assert!(matches!(
            ShotTuning::from_json("not json"),
            Err(TuningError::Parse(_))
        ));
    }

    #[test]
    fn test_json_round_trip_preserves_model() {
        let mut tuning = ShotTuning::default();
        tuning.launch = LaunchModel::Displacement { scale: 0.05 };
        let back = ShotTuning::from_json(&tuning.to_json().unwrap()).unwrap();
        assert_eq!(back, tuning);
    }
}
