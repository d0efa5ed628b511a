//! Game state and core simulation types
//!
//! Everything a shooting session needs to be replayed lives here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Court;
use super::scoring::Scoreboard;
use crate::tuning::ShotTuning;

/// Ball state - at rest on the launch spot or in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BallState {
    /// Sitting at the resting position, waiting for a gesture
    Resting,
    /// Governed by the physics step
    Flying,
}

/// The single simulated ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Spin angle (radians), cosmetic
    pub rotation: f32,
    pub state: BallState,
    /// Frames spent in the current flight
    pub flight_frames: u32,
}

impl Ball {
    pub fn new(rest: Vec2, radius: f32) -> Self {
        Self {
            pos: rest,
            vel: Vec2::ZERO,
            radius,
            rotation: 0.0,
            state: BallState::Resting,
            flight_frames: 0,
        }
    }

    #[inline]
    pub fn is_flying(&self) -> bool {
        self.state == BallState::Flying
    }

    /// Start a flight with the given velocity. No-op while already flying.
    pub fn launch(&mut self, vel: Vec2) -> bool {
        if self.is_flying() {
            return false;
        }
        self.vel = vel;
        self.state = BallState::Flying;
        self.flight_frames = 0;
        true
    }

    /// Put the ball back on the resting spot
    pub fn reset(&mut self, rest: Vec2) {
        self.pos = rest;
        self.vel = Vec2::ZERO;
        self.rotation = 0.0;
        self.state = BallState::Resting;
        self.flight_frames = 0;
    }
}

/// Why a flight ended without a make
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissReason {
    /// Fell out through the bottom of the playfield
    Bottom,
    /// Left through the left edge
    Left,
    /// Left through the right edge
    Right,
    /// Flight exceeded the frame cap
    Timeout,
}

/// Result of one flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShotOutcome {
    Make,
    Miss(MissReason),
}

/// Events produced during a tick, drained by the caller
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A gesture was accepted and the ball left the resting spot
    Launched { velocity: Vec2 },
    /// The ball bounced off the backboard
    BackboardHit { speed: f32 },
    /// The ball went through the rim
    Make { points: u32, combo: u32 },
    /// The flight ended without a make
    Miss { reason: MissReason },
}

/// Complete simulator state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub tuning: ShotTuning,
    pub court: Court,
    pub ball: Ball,
    pub board: Scoreboard,
    /// Frame counter
    pub time_ticks: u64,
    /// Events from the most recent ticks (not part of the snapshot)
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a session for a `width` x `height` viewport
    pub fn new(width: f32, height: f32, tuning: ShotTuning) -> Self {
        let court = Court::from_viewport(width, height, &tuning);
        Self {
            ball: Ball::new(court.rest, court.ball_radius),
            court,
            tuning,
            board: Scoreboard::new(),
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    /// Rebuild geometry for a new viewport.
    ///
    /// A resting ball snaps to the new resting spot; a ball in flight keeps
    /// its position and velocity.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.court = Court::from_viewport(width, height, &self.tuning);
        if !self.ball.is_flying() {
            self.ball.radius = self.court.ball_radius;
            self.ball.reset(self.court.rest);
        }
    }

    /// Apply a finished flight: scoring, event, reset to rest
    pub fn resolve(&mut self, outcome: ShotOutcome) {
        match outcome {
            ShotOutcome::Make => {
                let points = self.tuning.points_per_make;
                let combo = self.board.record_make(points);
                self.events.push(GameEvent::Make { points, combo });
            }
            ShotOutcome::Miss(reason) => {
                self.board.record_miss();
                self.events.push(GameEvent::Miss { reason });
            }
        }
        // Pick up any radius change from a resize during the flight
        self.ball.radius = self.court.ball_radius;
        self.ball.reset(self.court.rest);
    }

    /// Take all queued events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Clear score and put the ball back to rest, keeping geometry
    pub fn reset_score(&mut self) {
        self.board = Scoreboard::new();
        self.ball.reset(self.court.rest);
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_launch_ignored_while_flying() {
        let mut ball = Ball::new(Vec2::new(10.0, 10.0), 5.0);
        assert!(ball.launch(Vec2::new(1.0, -5.0)));
        assert!(!ball.launch(Vec2::new(9.0, -9.0)));
        assert_eq!(ball.vel, Vec2::new(1.0, -5.0));
    }

    #[test]
    fn test_resolve_resets_to_rest() {
        let mut state = GameState::new(400.0, 800.0, ShotTuning::default());
        state.ball.launch(Vec2::new(0.0, -10.0));
        state.ball.pos = Vec2::new(123.0, 45.0);
        state.ball.rotation = 2.0;

        state.resolve(ShotOutcome::Make);
        assert!(!state.ball.is_flying());
        assert_eq!(state.ball.pos, state.court.rest);
        assert_eq!(state.ball.vel, Vec2::ZERO);
        assert_eq!(state.ball.rotation, 0.0);
        assert_eq!(state.board.score, 2);
        assert_eq!(state.drain_events(), vec![GameEvent::Make { points: 2, combo: 1 }]);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_resize_snaps_resting_ball_only() {
        let mut state = GameState::new(400.0, 800.0, ShotTuning::default());
        state.resize(600.0, 900.0);
        assert_eq!(state.ball.pos, state.court.rest);
        assert_eq!(state.ball.radius, state.court.ball_radius);

        state.ball.launch(Vec2::new(0.0, -10.0));
        let pos = state.ball.pos;
        state.resize(300.0, 600.0);
        assert!(state.ball.is_flying());
        assert_eq!(state.ball.pos, pos);
        assert_eq!(state.ball.vel, Vec2::new(0.0, -10.0));
    }
}
