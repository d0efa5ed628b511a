//! Per-frame simulation step
//!
//! One call per display frame. Integration is explicit Euler in px/frame
//! units: position advances by the current velocity, then gravity is added.

use glam::Vec2;

use super::collision::{ball_rect_collision, damped_bounce, out_of_bounds, rim_make};
use super::gesture::{Gesture, launch_velocity};
use super::state::{GameEvent, GameState, MissReason, ShotOutcome};

/// Input gathered since the previous frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Completed release gesture
    pub gesture: Option<Gesture>,
    /// New viewport size
    pub resize: Option<Vec2>,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    if let Some(size) = input.resize {
        state.resize(size.x, size.y);
    }

    state.time_ticks += 1;

    if let Some(gesture) = &input.gesture {
        try_launch(state, gesture);
    }

    if state.ball.is_flying() {
        if let Some(outcome) = step_ball(state) {
            log::debug!(
                "flight resolved after {} frames: {:?}",
                state.ball.flight_frames,
                outcome
            );
            state.resolve(outcome);
        }
    }
}

/// Launch from a gesture. Ignored while a shot is in flight or when the
/// gesture is not a valid upward throw.
pub fn try_launch(state: &mut GameState, gesture: &Gesture) -> bool {
    if state.ball.is_flying() {
        return false;
    }
    let Some(velocity) = launch_velocity(gesture, &state.tuning) else {
        return false;
    };
    state.ball.launch(velocity);
    state.board.record_attempt();
    state.events.push(GameEvent::Launched { velocity });
    true
}

/// Integrate one frame of flight and check for an outcome
fn step_ball(state: &mut GameState) -> Option<ShotOutcome> {
    let tuning = &state.tuning;
    let court = &state.court;
    let ball = &mut state.ball;

    let prev = ball.pos;
    ball.pos += ball.vel;
    ball.vel.y += tuning.gravity;
    ball.rotation += ball.vel.x * tuning.spin_factor;
    ball.flight_frames += 1;

    let hit = ball_rect_collision(ball.pos, ball.radius, &court.backboard);
    if hit.hit {
        ball.pos += hit.normal * hit.penetration;
        let before = ball.vel;
        ball.vel = damped_bounce(ball.vel, hit.normal, tuning.backboard_damping);
        if ball.vel != before {
            state.events.push(GameEvent::BackboardHit {
                speed: before.length(),
            });
        }
    }

    let moved = ball.pos - prev;
    if rim_make(prev, ball.pos, moved, ball.radius, &court.rim) {
        return Some(ShotOutcome::Make);
    }
    if let Some(reason) = out_of_bounds(ball.pos, ball.radius, court.size) {
        return Some(ShotOutcome::Miss(reason));
    }
    if ball.flight_frames >= tuning.max_flight_frames {
        return Some(ShotOutcome::Miss(MissReason::Timeout));
    }
    None
}
