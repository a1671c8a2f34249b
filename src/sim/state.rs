//! Race state and core simulation types
//!
//! Everything a race needs between frames lives here.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::layout::generate_obstacles;
use crate::centered;
use crate::consts::*;
use crate::registry::Registry;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Entering names, waiting for start
    #[default]
    Idle,
    /// Balls are falling
    Running,
    /// Winner found or time ran out
    Finished,
}

/// A participant's ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    pub name: String,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Degrees
    pub rotation: f32,
    /// Degrees per frame
    pub rotation_vel: f32,
    /// Seconds after session start before physics acts on this ball
    pub start_delay: f32,
    /// Session time (seconds) of the last physics step applied
    pub last_update: f32,
}

impl Participant {
    /// Spawn the `index`-th of `count` participants along the top edge
    pub fn spawn<R: rand::Rng + ?Sized>(name: &str, index: usize, count: usize, rng: &mut R) -> Self {
        let slot = SPAWN_SPAN / (count as f32 + 1.0);
        let x = (index as f32 + 1.0) * slot + SPAWN_OFFSET;
        Self {
            name: name.to_string(),
            pos: Vec2::new(x, 0.0),
            vel: Vec2::new(centered(rng, SPAWN_VX_RANGE), 0.0),
            rotation: rng.random::<f32>() * 360.0,
            rotation_vel: centered(rng, SPAWN_SPIN_RANGE),
            start_delay: rng.random::<f32>() * MAX_START_DELAY_SECS,
            last_update: 0.0,
        }
    }

    /// Whether the staggered drop has released this ball yet
    #[inline]
    pub fn released(&self, elapsed: f32) -> bool {
        elapsed >= self.start_delay
    }
}

/// A static platform. `pos` is the top-left corner of its unrotated box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Tilt in degrees (visual only; collision uses the unrotated box)
    pub angle: f32,
}

impl Obstacle {
    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.width
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.height
    }
}

/// Complete race state
#[derive(Debug, Clone)]
pub struct RaceState {
    /// Seed the RNG and layout were built from
    pub seed: u64,
    pub rng: Pcg32,
    /// Height of the game area; the floor sits FLOOR_MARGIN above it
    pub game_height: f32,
    /// Countdown budget each session starts with
    pub round_seconds: u32,
    /// Names entered for the next session
    pub registry: Registry,
    /// Static board, built once with the state
    pub obstacles: Vec<Obstacle>,
    /// Balls in registry order (iteration order decides ties)
    pub participants: Vec<Participant>,
    pub phase: SessionPhase,
    pub time_left: u32,
    pub winner: Option<String>,
    /// Physics frames run this session
    pub frames: u64,
}

impl RaceState {
    /// Create a race state with the default board height and round length
    pub fn new(seed: u64) -> Self {
        Self::with_dimensions(seed, DEFAULT_GAME_HEIGHT, ROUND_SECONDS)
    }

    pub fn with_dimensions(seed: u64, game_height: f32, round_seconds: u32) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let obstacles = generate_obstacles(&mut rng, game_height);
        log::info!(
            "Race board built: seed={}, height={}, obstacles={}",
            seed,
            game_height,
            obstacles.len()
        );

        Self {
            seed,
            rng,
            game_height,
            round_seconds,
            registry: Registry::new(),
            obstacles,
            participants: Vec::new(),
            phase: SessionPhase::Idle,
            time_left: round_seconds,
            winner: None,
            frames: 0,
        }
    }

    /// Y coordinate participants land on
    #[inline]
    pub fn floor_y(&self) -> f32 {
        self.game_height - FLOOR_MARGIN
    }

    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    pub fn participant(&self, name: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_idle_with_board() {
        let state = RaceState::new(7);
        assert_eq!(state.phase, SessionPhase::Idle);
        assert_eq!(state.time_left, ROUND_SECONDS);
        assert!(state.winner.is_none());
        assert!(!state.obstacles.is_empty());
        assert_eq!(state.floor_y(), DEFAULT_GAME_HEIGHT - FLOOR_MARGIN);
    }

    #[test]
    fn test_spawn_slots_spread_evenly() {
        let mut rng = Pcg32::seed_from_u64(1);
        let a = Participant::spawn("a", 0, 3, &mut rng);
        let b = Participant::spawn("b", 1, 3, &mut rng);
        let c = Participant::spawn("c", 2, 3, &mut rng);
        assert!((a.pos.x - 225.0).abs() < 1e-3);
        assert!((b.pos.x - 400.0).abs() < 1e-3);
        assert!((c.pos.x - 575.0).abs() < 1e-3);

        for p in [&a, &b, &c] {
            assert_eq!(p.pos.y, 0.0);
            assert_eq!(p.vel.y, 0.0);
            assert!(p.vel.x >= -2.0 && p.vel.x < 2.0);
            assert!(p.rotation >= 0.0 && p.rotation < 360.0);
            assert!(p.rotation_vel >= -5.0 && p.rotation_vel < 5.0);
            assert!(p.start_delay >= 0.0 && p.start_delay < MAX_START_DELAY_SECS);
        }
    }

    #[test]
    fn test_obstacle_edges() {
        let o = Obstacle {
            pos: Vec2::new(100.0, 200.0),
            width: 250.0,
            height: 15.0,
            angle: 0.0,
        };
        assert_eq!(o.left(), 100.0);
        assert_eq!(o.right(), 350.0);
        assert_eq!(o.top(), 200.0);
        assert_eq!(o.bottom(), 215.0);
    }
}
