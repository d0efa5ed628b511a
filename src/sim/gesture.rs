//! Release gesture → launch velocity

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::clamp_length;
use crate::tuning::{LaunchModel, ShotTuning};

/// Shortest gesture duration used for speed math (ms)
const MIN_GESTURE_MS: f32 = 1.0;

/// A completed press-drag-release or swipe
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gesture {
    pub start: Vec2,
    pub end: Vec2,
    /// Press-to-release time in milliseconds
    pub duration_ms: f32,
}

impl Gesture {
    pub fn new(start: Vec2, end: Vec2, duration_ms: f32) -> Self {
        Self {
            start,
            end,
            duration_ms,
        }
    }

    #[inline]
    pub fn displacement(&self) -> Vec2 {
        self.end - self.start
    }

    #[inline]
    pub fn distance(&self) -> f32 {
        self.displacement().length()
    }

    /// Gesture speed in px/ms
    pub fn speed(&self) -> f32 {
        self.distance() / self.duration_ms.max(MIN_GESTURE_MS)
    }
}

/// Turn a gesture into a launch velocity (px/frame).
///
/// Returns `None` for gestures that are too short or do not point upward.
pub fn launch_velocity(gesture: &Gesture, tuning: &ShotTuning) -> Option<Vec2> {
    let d = gesture.displacement();
    let distance = d.length();
    if !distance.is_finite() || distance < tuning.min_swipe_distance || d.y >= 0.0 {
        return None;
    }

    let vel = match tuning.launch {
        LaunchModel::Flick { speed_scale } => {
            let power = (gesture.speed() * speed_scale).clamp(tuning.min_power, tuning.max_power);
            d / distance * power
        }
        LaunchModel::Displacement { scale } => {
            clamp_length(d * scale, tuning.min_power, tuning.max_power)
        }
    };
    Some(vel)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flick(dx: f32, dy: f32, ms: f32) -> Gesture {
        Gesture::new(Vec2::new(200.0, 700.0), Vec2::new(200.0 + dx, 700.0 + dy), ms)
    }

    #[test]
    fn test_upward_flick_goes_up() {
        let tuning = ShotTuning::default();
        let v = launch_velocity(&flick(0.0, -200.0, 150.0), &tuning).unwrap();
        assert!(v.y < 0.0);
        assert!(v.x.abs() < 1e-5);
        // 200px / 150ms * 12 = 16 px/frame
        assert!((v.length() - 16.0).abs() < 1e-3);
    }

    #[test]
    fn test_fast_flick_is_clamped() {
        let tuning = ShotTuning::default();
        let v = launch_velocity(&flick(30.0, -400.0, 10.0), &tuning).unwrap();
        assert!((v.length() - tuning.max_power).abs() < 1e-3);
        assert!(v.x > 0.0);
    }

    #[test]
    fn test_slow_drag_gets_min_power() {
        let tuning = ShotTuning::default();
        let v = launch_velocity(&flick(0.0, -50.0, 5000.0), &tuning).unwrap();
        assert!((v.length() - tuning.min_power).abs() < 1e-3);
    }

    #[test]
    fn test_zero_duration_does_not_divide_by_zero() {
        let tuning = ShotTuning::default();
        let v = launch_velocity(&flick(0.0, -100.0, 0.0), &tuning).unwrap();
        assert!(v.is_finite());
    }

    #[test]
    fn test_rejects_short_and_downward() {
        let tuning = ShotTuning::default();
        assert!(launch_velocity(&flick(0.0, -5.0, 100.0), &tuning).is_none());
        assert!(launch_velocity(&flick(0.0, 200.0, 100.0), &tuning).is_none());
        assert!(launch_velocity(&flick(200.0, 0.0, 100.0), &tuning).is_none());
    }

    #[test]
    fn test_displacement_model() {
        let tuning = ShotTuning {
            launch: LaunchModel::Displacement { scale: 0.1 },
            ..ShotTuning::default()
        };
        let v = launch_velocity(&flick(0.0, -150.0, 999.0), &tuning).unwrap();
        assert!((v.y - -15.0).abs() < 1e-4);
    }
}
