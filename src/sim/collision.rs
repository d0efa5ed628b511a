//! Collision detection and response against static court geometry
//!
//! The ball is a circle; the backboard is an axis-aligned box; the rim is an
//! opening with a thin detection band. Make detection is purely geometric.

use glam::Vec2;

use super::geometry::{Rect, Rim};
use super::state::MissReason;

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Contact point on the surface (if hit)
    pub point: Vec2,
    /// Surface normal at contact, pointing toward the ball center
    pub normal: Vec2,
    /// Penetration depth (for position correction)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            point: Vec2::ZERO,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Did this frame's movement from `prev` to `pos` drop the ball through the rim?
///
/// Conditions:
/// - moving downward (`vel.y > 0`)
/// - the vertical span swept this frame overlaps the rim band (so a fast ball
///   cannot skip over a thin band)
/// - while inside the band, the horizontal distance from the rim center stays
///   at most `inner_width / 2 - radius` (inclusive)
///
/// The path is a straight segment, so x inside the band is checked where the
/// segment enters and leaves the band.
pub fn rim_make(prev: Vec2, pos: Vec2, vel: Vec2, radius: f32, rim: &Rim) -> bool {
    if vel.y <= 0.0 {
        return false;
    }
    let top = rim.band_top();
    let bottom = rim.band_bottom();
    if prev.y.max(pos.y) < top || prev.y.min(pos.y) > bottom {
        return false;
    }

    let dy = pos.y - prev.y;
    let x_at = |y: f32| {
        if dy.abs() <= f32::EPSILON {
            return pos.x;
        }
        let t = ((y - prev.y) / dy).clamp(0.0, 1.0);
        prev.x + (pos.x - prev.x) * t
    };
    let clearance = rim.clearance(radius);
    [x_at(top), x_at(bottom)]
        .iter()
        .all(|x| (x - rim.center_x).abs() <= clearance)
}

/// Check collision between a ball and an axis-aligned box
pub fn ball_rect_collision(ball_pos: Vec2, ball_radius: f32, rect: &Rect) -> CollisionResult {
    let closest = rect.clamp_point(ball_pos);
    let offset = ball_pos - closest;
    let dist_sq = offset.length_squared();

    if dist_sq > 0.0 {
        if dist_sq >= ball_radius * ball_radius {
            return CollisionResult::miss();
        }
        let dist = dist_sq.sqrt();
        return CollisionResult {
            hit: true,
            point: closest,
            normal: offset / dist,
            penetration: ball_radius - dist,
        };
    }

    // Center is inside the box: push out through the nearest face
    let faces = [
        (ball_pos.x - rect.min.x, Vec2::NEG_X),
        (rect.max.x - ball_pos.x, Vec2::X),
        (ball_pos.y - rect.min.y, Vec2::NEG_Y),
        (rect.max.y - ball_pos.y, Vec2::Y),
    ];
    let (depth, normal) = faces
        .into_iter()
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .unwrap_or((0.0, Vec2::NEG_Y));

    CollisionResult {
        hit: true,
        point: ball_pos + normal * depth,
        normal,
        penetration: depth + ball_radius,
    }
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Bounce with damping: the component along `normal` is reversed and scaled
/// by `damping`; the tangential component is kept.
///
/// A side contact (normal ±x) is the classic `vx = -vx * damping`.
/// Velocity already separating from the surface is returned unchanged.
pub fn damped_bounce(velocity: Vec2, normal: Vec2, damping: f32) -> Vec2 {
    let vn = velocity.dot(normal);
    if vn >= 0.0 {
        return velocity;
    }
    let reflected = reflect_velocity(velocity, normal);
    // reflected normal component is -vn; keep `damping` of it
    reflected - normal * (-vn) * (1.0 - damping)
}

/// Has the ball fully left the playfield through the bottom or a side?
///
/// Leaving through the top is allowed; gravity brings the ball back.
pub fn out_of_bounds(ball_pos: Vec2, ball_radius: f32, field: Vec2) -> Option<MissReason> {
    if ball_pos.y - ball_radius > field.y {
        Some(MissReason::Bottom)
    } else if ball_pos.x + ball_radius < 0.0 {
        Some(MissReason::Left)
    } else if ball_pos.x - ball_radius > field.x {
        Some(MissReason::Right)
    } else {
        None
    }
}
