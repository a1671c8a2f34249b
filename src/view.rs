//! Presentation snapshot
//!
//! A read-only picture of a race: what to draw, where, and which controls are
//! usable. Nothing here feeds back into the simulation.

use serde::Serialize;

use crate::consts::{ARENA_MAX_X, BALL_TOLERANCE, MIN_PARTICIPANTS, RUNNING_OUT_SECS};
use crate::sim::{RaceState, SessionPhase};

/// Ball colours, assigned by registry index
pub const PALETTE: [&str; 6] = [
    "#10b981", // emerald
    "#3b82f6", // blue
    "#8b5cf6", // violet
    "#ec4899", // pink
    "#f59e0b", // amber
    "#ef4444", // red
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObstacleView {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
    /// Degrees
    pub angle: f32,
}

/// A ball, centred on (x, y)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BallView {
    pub name: String,
    pub color: &'static str,
    pub x: f32,
    pub y: f32,
    /// Degrees
    pub rotation: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimerView {
    pub seconds_left: u32,
    pub running_out: bool,
}

/// Which controls are enabled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Controls {
    pub can_add: bool,
    pub can_start: bool,
    pub can_reset: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub phase: SessionPhase,
    pub game_height: f32,
    pub obstacles: Vec<ObstacleView>,
    pub balls: Vec<BallView>,
    /// Only shown while running
    pub timer: Option<TimerView>,
    pub winner: Option<String>,
    pub controls: Controls,
}

impl Scene {
    pub fn capture(state: &RaceState) -> Self {
        let running = state.phase == SessionPhase::Running;
        let entered = state.registry.len();

        let obstacles = state
            .obstacles
            .iter()
            .map(|o| ObstacleView {
                left: o.pos.x,
                top: o.pos.y,
                width: o.width,
                height: o.height,
                angle: o.angle,
            })
            .collect();

        let balls = state
            .participants
            .iter()
            .enumerate()
            .map(|(i, p)| BallView {
                name: p.name.clone(),
                color: PALETTE[i % PALETTE.len()],
                x: p.pos.x,
                y: p.pos.y,
                rotation: p.rotation,
            })
            .collect();

        let timer = running.then_some(TimerView {
            seconds_left: state.time_left,
            running_out: state.time_left <= RUNNING_OUT_SECS,
        });

        Self {
            phase: state.phase,
            game_height: state.game_height,
            obstacles,
            balls,
            timer,
            winner: state.winner.clone(),
            controls: Controls {
                can_add: !running,
                can_start: !running && entered >= MIN_PARTICIPANTS,
                can_reset: !running && entered > 0,
            },
        }
    }
}

/// Draw the scene as a `cols` x `rows` character board
///
/// Obstacles are `=` (platforms) or `|` (posts), balls are the first letter
/// of their name. A status line follows the board.
pub fn render_text(scene: &Scene, cols: usize, rows: usize) -> String {
    let cols = cols.max(2);
    let rows = rows.max(2);
    let width = ARENA_MAX_X + BALL_TOLERANCE;
    let to_col = |x: f32| ((x / width) * (cols - 1) as f32).round().clamp(0.0, (cols - 1) as f32) as usize;
    let to_row = |y: f32| {
        ((y / scene.game_height) * (rows - 1) as f32)
            .round()
            .clamp(0.0, (rows - 1) as f32) as usize
    };

    let mut grid = vec![vec![' '; cols]; rows];

    for o in &scene.obstacles {
        if o.width >= o.height {
            let row = to_row(o.top);
            for col in to_col(o.left)..=to_col(o.left + o.width) {
                grid[row][col] = '=';
            }
        } else {
            let col = to_col(o.left);
            for row in to_row(o.top)..=to_row(o.top + o.height) {
                grid[row][col] = '|';
            }
        }
    }

    for ball in &scene.balls {
        let glyph = ball.name.chars().next().unwrap_or('o');
        grid[to_row(ball.y)][to_col(ball.x)] = glyph;
    }

    let mut out = String::with_capacity((cols + 3) * (rows + 3));
    let border: String = std::iter::repeat_n('-', cols).collect();
    out.push('+');
    out.push_str(&border);
    out.push_str("+\n");
    for line in grid {
        out.push('|');
        out.extend(line);
        out.push_str("|\n");
    }
    out.push('+');
    out.push_str(&border);
    out.push_str("+\n");

    match (&scene.winner, scene.timer) {
        (Some(winner), _) => out.push_str(&format!("Winner! {}\n", winner)),
        (None, Some(timer)) => {
            let hurry = if timer.running_out { " (hurry!)" } else { "" };
            out.push_str(&format!("Time Left: {}s{}\n", timer.seconds_left, hurry));
        }
        (None, None) if scene.phase == SessionPhase::Finished => out.push_str("Time's up!\n"),
        (None, None) => {}
    }
    out
}
