//! Scene generation for 2D primitives

use glam::Vec2;

use super::{Color, DrawCmd, colors};
use crate::sim::{Ball, Court, GameState};

/// What to draw besides the court and ball
#[derive(Debug, Clone, Default)]
pub struct SceneOptions {
    /// Rotate ball seams with the simulated spin
    pub spin: bool,
    /// Launch velocity of the gesture being aimed, for the arc preview
    pub aim: Option<Vec2>,
    /// Preview length in frames
    pub hint_frames: usize,
    pub hud: Option<Hud>,
}

/// Heads-up display values
#[derive(Debug, Clone, PartialEq)]
pub struct Hud {
    pub score: u32,
    pub seconds_left: u32,
    pub combo: u32,
    /// Transient notice and its tint
    pub banner: Option<(String, Color)>,
}

/// Interpolate color based on launch speed (soft=blue, medium=green, hard=red)
fn power_color(speed: f32, min: f32, max: f32, alpha: f32) -> Color {
    let t = ((speed - min) / (max - min).max(f32::EPSILON)).clamp(0.0, 1.0);

    let (r, g, b) = if t < 0.5 {
        // Blue to green
        let u = t / 0.5;
        (0.2, 0.5 + 0.3 * u, 1.0 - 0.6 * u)
    } else {
        // Green to red
        let u = (t - 0.5) / 0.5;
        (0.2 + 0.8 * u, 0.8 - 0.5 * u, 0.4 - 0.2 * u)
    };

    [r, g, b, alpha]
}

/// Predicted centers for the next `frames` frames of a launch.
///
/// Same integration order as the simulator, ignoring collisions.
pub fn trajectory_hint(start: Vec2, vel: Vec2, gravity: f32, frames: usize) -> Vec<Vec2> {
    let mut points = Vec::with_capacity(frames);
    let (mut pos, mut vel) = (start, vel);
    for _ in 0..frames {
        pos += vel;
        vel.y += gravity;
        points.push(pos);
    }
    points
}

/// Ball body plus two seams crossing at the center
pub fn ball(ball: &Ball, spin: bool) -> Vec<DrawCmd> {
    let angle = if spin { ball.rotation } else { 0.0 };
    let dir = Vec2::from_angle(angle);
    let perp = dir.perp();
    let r = ball.radius;
    let seam = (r * 0.08).max(1.0);

    vec![
        DrawCmd::Circle {
            center: ball.pos,
            radius: r,
            color: colors::BALL,
        },
        DrawCmd::Line {
            from: ball.pos - dir * r,
            to: ball.pos + dir * r,
            width: seam,
            color: colors::BALL_SEAM,
        },
        DrawCmd::Line {
            from: ball.pos - perp * r,
            to: ball.pos + perp * r,
            width: seam,
            color: colors::BALL_SEAM,
        },
    ]
}

/// Backboard with its target square
pub fn backboard(court: &Court) -> Vec<DrawCmd> {
    let board = court.backboard;
    let frame = (board.height() * 0.05).max(1.0);
    let square_half = Vec2::new(board.width() * 0.15, board.height() * 0.2);
    let square_center = Vec2::new(board.center().x, board.max.y - square_half.y - frame * 2.0);
    let corners = [
        square_center + Vec2::new(-square_half.x, -square_half.y),
        square_center + Vec2::new(square_half.x, -square_half.y),
        square_center + Vec2::new(square_half.x, square_half.y),
        square_center + Vec2::new(-square_half.x, square_half.y),
    ];

    let mut cmds = vec![DrawCmd::Rect {
        min: board.min,
        max: board.max,
        color: colors::BACKBOARD,
    }];
    for i in 0..4 {
        cmds.push(DrawCmd::Line {
            from: corners[i],
            to: corners[(i + 1) % 4],
            width: frame,
            color: colors::BACKBOARD_FRAME,
        });
    }
    cmds
}

/// Rim bar and a tapering net hanging below it
pub fn hoop(court: &Court) -> Vec<DrawCmd> {
    let rim = &court.rim;
    let (left, right) = rim.edges();
    let depth = rim.inner_width * 0.6;
    let strands = 6;

    let mut cmds = Vec::with_capacity(strands + 2);
    for i in 0..=strands {
        let t = i as f32 / strands as f32;
        let top = Vec2::new(left + (right - left) * t, rim.y);
        let bottom = Vec2::new(rim.center_x + (top.x - rim.center_x) * 0.6, rim.y + depth);
        cmds.push(DrawCmd::Line {
            from: top,
            to: bottom,
            width: 1.5,
            color: colors::NET,
        });
    }
    cmds.push(DrawCmd::Line {
        from: Vec2::new(left, rim.y),
        to: Vec2::new(right, rim.y),
        width: rim.band_height.max(2.0) * 0.5,
        color: colors::RIM,
    });
    cmds
}

/// Score, clock, combo and notice banner
pub fn hud(hud: &Hud, size: Vec2) -> Vec<DrawCmd> {
    let text = (size.y * 0.035).max(12.0);
    let margin = text;
    let mut cmds = vec![
        DrawCmd::Text {
            pos: Vec2::new(margin * 2.0, margin * 1.5),
            size: text,
            text: format!("{}", hud.score),
            color: colors::HUD_TEXT,
        },
        DrawCmd::Text {
            pos: Vec2::new(size.x - margin * 2.0, margin * 1.5),
            size: text,
            text: format!("0:{:02}", hud.seconds_left),
            color: colors::HUD_TEXT,
        },
    ];
    if hud.combo > 1 {
        cmds.push(DrawCmd::Text {
            pos: Vec2::new(size.x * 0.5, margin * 1.5),
            size: text * 0.8,
            text: format!("x{}", hud.combo),
            color: colors::SUCCESS,
        });
    }
    if let Some((banner, color)) = &hud.banner {
        cmds.push(DrawCmd::Text {
            pos: Vec2::new(size.x * 0.5, size.y * 0.55),
            size: text * 1.4,
            text: banner.clone(),
            color: *color,
        });
    }
    cmds
}

/// Full frame, back to front
pub fn build_scene(state: &GameState, opts: &SceneOptions) -> Vec<DrawCmd> {
    let court = &state.court;
    let floor_top = court.rest.y + court.ball_radius;

    let mut cmds = vec![
        DrawCmd::Rect {
            min: Vec2::ZERO,
            max: court.size,
            color: colors::BACKGROUND,
        },
        DrawCmd::Rect {
            min: Vec2::new(0.0, floor_top),
            max: court.size,
            color: colors::FLOOR,
        },
    ];
    cmds.extend(backboard(court));

    if let Some(aim) = opts.aim.filter(|_| !state.ball.is_flying()) {
        let tuning = &state.tuning;
        let points = trajectory_hint(court.rest, aim, tuning.gravity, opts.hint_frames);
        let speed = aim.length();
        let count = points.len().max(1) as f32;
        for (i, p) in points.into_iter().enumerate().step_by(3) {
            let alpha = (1.0 - i as f32 / count) * 0.8;
            cmds.push(DrawCmd::Circle {
                center: p,
                radius: court.ball_radius * 0.15,
                color: power_color(speed, tuning.min_power, tuning.max_power, alpha),
            });
        }
    }

    cmds.extend(ball(&state.ball, opts.spin));
    cmds.extend(hoop(court));

    if let Some(h) = &opts.hud {
        cmds.extend(hud(h, court.size));
    }
    cmds
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{TickInput, tick};
    use crate::tuning::ShotTuning;

    fn state() -> GameState {
        GameState::new(400.0, 800.0, ShotTuning::default())
    }

    #[test]
    fn test_hint_matches_simulated_flight() {
        let mut s = state();
        let vel = Vec2::new(1.5, -14.0);
        let hint = trajectory_hint(s.court.rest, vel, s.tuning.gravity, 10);

        s.ball.launch(vel);
        for p in &hint {
            tick(&mut s, &TickInput::default());
            assert!((s.ball.pos - *p).length() < 1e-3);
        }
    }

    #[test]
    fn test_ball_seams_follow_spin_only_when_enabled() {
        let mut b = Ball::new(Vec2::new(50.0, 50.0), 10.0);
        b.rotation = std::f32::consts::FRAC_PI_2;

        let still = ball(&b, false);
        let DrawCmd::Line { from, to, .. } = &still[1] else {
            panic!("expected seam line");
        };
        assert!((from.y - to.y).abs() < 1e-4);

        let spun = ball(&b, true);
        let DrawCmd::Line { from, to, .. } = &spun[1] else {
            panic!("expected seam line");
        };
        assert!((from.x - to.x).abs() < 1e-4);
    }

    #[test]
    fn test_scene_places_ball_and_hud() {
        let s = state();
        let opts = SceneOptions {
            hud: Some(Hud {
                score: 12,
                seconds_left: 7,
                combo: 3,
                banner: Some(("On fire!".into(), colors::SUCCESS)),
            }),
            ..Default::default()
        };
        let cmds = build_scene(&s, &opts);

        assert!(cmds.contains(&DrawCmd::Circle {
            center: s.court.rest,
            radius: s.court.ball_radius,
            color: colors::BALL,
        }));
        let texts: Vec<_> = cmds
            .iter()
            .filter_map(|c| match c {
                DrawCmd::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(texts, vec!["12", "0:07", "x3", "On fire!"]);
    }

    #[test]
    fn test_aim_preview_hidden_in_flight() {
        let mut s = state();
        let opts = SceneOptions {
            aim: Some(Vec2::new(0.0, -15.0)),
            hint_frames: 30,
            ..Default::default()
        };
        let with_hint = build_scene(&s, &opts).len();
        s.ball.launch(Vec2::new(0.0, -15.0));
        let in_flight = build_scene(&s, &opts).len();
        assert_eq!(with_hint - in_flight, 10);
    }

    #[test]
    fn test_power_color_ends() {
        assert_eq!(power_color(0.0, 8.0, 26.0, 1.0), [0.2, 0.5, 1.0, 1.0]);
        let hot = power_color(26.0, 8.0, 26.0, 0.5);
        assert!((hot[0] - 1.0).abs() < 1e-6 && hot[3] == 0.5);
    }
}
