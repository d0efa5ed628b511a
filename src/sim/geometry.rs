//! Court geometry: playfield bounds, rim, backboard and resting spot
//!
//! Screen coordinates: origin top-left, +y pointing down. Everything here is
//! derived from the viewport size and [`ShotTuning`] fractions, so a resize
//! simply rebuilds the [`Court`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::tuning::ShotTuning;

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Build from a center and full size
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }

    /// Closest point inside the rectangle to `p`
    #[inline]
    pub fn clamp_point(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min, self.max)
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// The hoop: a rim opening plus its make-detection band
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rim {
    /// Horizontal center of the opening
    pub center_x: f32,
    /// Rim height (screen y)
    pub y: f32,
    /// Inner width of the opening
    pub inner_width: f32,
    /// Height of the detection band centered on `y`
    pub band_height: f32,
}

impl Rim {
    /// Top of the detection band
    #[inline]
    pub fn band_top(&self) -> f32 {
        self.y - self.band_height / 2.0
    }

    /// Bottom of the detection band
    #[inline]
    pub fn band_bottom(&self) -> f32 {
        self.y + self.band_height / 2.0
    }

    /// Largest horizontal offset from center at which a ball of `radius`
    /// passes through the opening without touching the rim edge
    #[inline]
    pub fn clearance(&self, radius: f32) -> f32 {
        self.inner_width / 2.0 - radius
    }

    /// Left and right rim edge x coordinates
    pub fn edges(&self) -> (f32, f32) {
        let half = self.inner_width / 2.0;
        (self.center_x - half, self.center_x + half)
    }
}

/// All static geometry for one viewport size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Court {
    /// Playfield size in px
    pub size: Vec2,
    pub rim: Rim,
    pub backboard: Rect,
    /// Where the ball sits between attempts (bottom-center)
    pub rest: Vec2,
    pub ball_radius: f32,
}

impl Court {
    /// Lay out the court proportionally for a `width` x `height` viewport
    pub fn from_viewport(width: f32, height: f32, tuning: &ShotTuning) -> Self {
        let rim = Rim {
            center_x: width * tuning.rim_x_frac,
            y: height * tuning.rim_y_frac,
            inner_width: width * tuning.rim_width_frac,
            band_height: height * tuning.rim_band_frac,
        };

        // Backboard sits above the rim, centered on it
        let board_w = width * tuning.backboard_width_frac;
        let board_h = height * tuning.backboard_height_frac;
        let board_bottom = rim.y - height * tuning.backboard_gap_frac;
        let backboard = Rect::new(
            Vec2::new(rim.center_x - board_w / 2.0, board_bottom - board_h),
            Vec2::new(rim.center_x + board_w / 2.0, board_bottom),
        );

        Self {
            size: Vec2::new(width, height),
            rim,
            backboard,
            rest: Vec2::new(width / 2.0, height * tuning.rest_y_frac),
            ball_radius: width * tuning.ball_radius_frac,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_basics() {
        let r = Rect::from_center(Vec2::new(10.0, 20.0), Vec2::new(4.0, 6.0));
        assert_eq!(r.min, Vec2::new(8.0, 17.0));
        assert_eq!(r.max, Vec2::new(12.0, 23.0));
        assert_eq!(r.width(), 4.0);
        assert_eq!(r.height(), 6.0);
        assert!(r.contains(Vec2::new(12.0, 23.0)));
        assert!(!r.contains(Vec2::new(12.1, 20.0)));
        assert_eq!(r.clamp_point(Vec2::new(0.0, 100.0)), Vec2::new(8.0, 23.0));
    }

    #[test]
    fn test_court_layout_is_proportional() {
        let tuning = ShotTuning::default();
        let small = Court::from_viewport(400.0, 800.0, &tuning);
        let big = Court::from_viewport(800.0, 1600.0, &tuning);

        assert!((big.rim.center_x - small.rim.center_x * 2.0).abs() < 1e-3);
        assert!((big.rim.y - small.rim.y * 2.0).abs() < 1e-3);
        assert!((big.rim.inner_width - small.rim.inner_width * 2.0).abs() < 1e-3);
        assert!((big.ball_radius - small.ball_radius * 2.0).abs() < 1e-3);
        assert_eq!(small.rest, Vec2::new(200.0, 680.0));
    }

    #[test]
    fn test_backboard_above_rim() {
        let court = Court::from_viewport(400.0, 800.0, &ShotTuning::default());
        assert!(court.backboard.max.y < court.rim.y);
        assert!((court.backboard.center().x - court.rim.center_x).abs() < 1e-3);
        // Ball must fit through the opening
        assert!(court.rim.clearance(court.ball_radius) > 0.0);
    }
}
