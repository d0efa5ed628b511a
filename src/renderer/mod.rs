//! Rendering module
//!
//! `shapes` turns a game state into a flat list of draw commands; `canvas`
//! replays that list on a 2D canvas context in the browser.

pub mod shapes;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

use glam::Vec2;

pub use shapes::{SceneOptions, build_scene, trajectory_hint};

/// Linear RGBA
pub type Color = [f32; 4];

/// One 2D primitive in screen pixels
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Rect { min: Vec2, max: Vec2, color: Color },
    Circle { center: Vec2, radius: f32, color: Color },
    Line { from: Vec2, to: Vec2, width: f32, color: Color },
    Text { pos: Vec2, size: f32, text: String, color: Color },
}

/// CSS `rgba(...)` string for a color
pub fn css_color(c: Color) -> String {
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!(
        "rgba({},{},{},{})",
        channel(c[0]),
        channel(c[1]),
        channel(c[2]),
        c[3].clamp(0.0, 1.0)
    )
}

/// Colors for game elements
pub mod colors {
    use super::Color;

    pub const BACKGROUND: Color = [0.06, 0.07, 0.12, 1.0];
    pub const FLOOR: Color = [0.55, 0.33, 0.16, 1.0];
    pub const BACKBOARD: Color = [0.95, 0.95, 0.97, 1.0];
    pub const BACKBOARD_FRAME: Color = [0.85, 0.15, 0.12, 1.0];
    pub const RIM: Color = [1.0, 0.42, 0.1, 1.0];
    pub const NET: Color = [0.9, 0.9, 0.9, 0.7];
    pub const BALL: Color = [0.96, 0.5, 0.13, 1.0];
    pub const BALL_SEAM: Color = [0.15, 0.08, 0.03, 1.0];
    pub const HUD_TEXT: Color = [1.0, 1.0, 1.0, 1.0];
    pub const SUCCESS: Color = [0.3, 0.85, 0.45, 1.0];
    pub const ERROR: Color = [0.95, 0.3, 0.3, 1.0];
}
