//! Deterministic shot simulation
//!
//! All mini-game logic lives here. This module must be pure and deterministic:
//! - One step per display frame, constants in px/frame
//! - No randomness: make detection is purely geometric
//! - No rendering or platform dependencies

pub mod collision;
pub mod geometry;
pub mod gesture;
pub mod scoring;
pub mod state;
pub mod tick;

pub use collision::{CollisionResult, ball_rect_collision, damped_bounce, rim_make};
pub use geometry::{Court, Rect, Rim};
pub use gesture::{Gesture, launch_velocity};
pub use scoring::{Scoreboard, combo_callout};
pub use state::{Ball, BallState, GameEvent, GameState, MissReason, ShotOutcome};
pub use tick::{TickInput, tick, try_launch};
