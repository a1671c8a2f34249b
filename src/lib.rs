//! Race to the Bottom - a drop-the-names party game
//!
//! Core modules:
//! - `registry`: Ordered list of participant names
//! - `sim`: Deterministic simulation (layout, physics, session phases)
//! - `runner`: Frame and countdown scheduling around the simulation
//! - `view`: Read-only presentation snapshot of a race
//! - `server`: HTTP CRUD over the registry
//! - `settings`: Runtime configuration

pub mod registry;
pub mod runner;
pub mod server;
pub mod settings;
pub mod sim;
pub mod view;

pub use registry::{Registry, RegistryError};
pub use runner::{Clock, ManualClock, MonotonicClock, RaceLoop};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation step applied once per frame, regardless of refresh rate
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Nominal frame interval used to schedule the physics task
    pub const FRAME_INTERVAL_SECS: f64 = 1.0 / 60.0;

    /// Gravity (units per second², scaled by SIM_DT into units per frame)
    pub const GRAVITY: f32 = 9.8;
    /// Per-frame velocity retention from air resistance
    pub const AIR_DRAG: f32 = 0.99;

    /// Horizontal bounds participants are kept within
    pub const ARENA_MIN_X: f32 = 0.0;
    pub const ARENA_MAX_X: f32 = 750.0;
    /// Game area height used when no other height is configured
    pub const DEFAULT_GAME_HEIGHT: f32 = 800.0;
    /// Distance above the bottom edge where participants land
    pub const FLOOR_MARGIN: f32 = 50.0;

    /// Approximate visual radius of a participant's ball
    pub const BALL_TOLERANCE: f32 = 25.0;

    /// Restitution factors (fraction of speed kept, sign inverted)
    pub const WALL_RESTITUTION: f32 = 0.8;
    pub const OBSTACLE_TOP_RESTITUTION: f32 = 0.6;
    pub const OBSTACLE_SIDE_RESTITUTION: f32 = 0.8;
    pub const FLOOR_RESTITUTION: f32 = 0.5;

    /// Vertical speed below which a participant on the floor is at rest
    pub const REST_SPEED: f32 = 0.1;

    /// Spin assigned on every obstacle hit: uniform in [-SPIN/2, SPIN/2)
    pub const HIT_SPIN_RANGE: f32 = 20.0;
    /// Horizontal kick on top/bottom hits: uniform in [-KICK/2, KICK/2)
    pub const HIT_KICK_RANGE: f32 = 2.0;

    /// Layout
    pub const NUM_SECTIONS: u32 = 8;
    pub const PLATFORM_HEIGHT: f32 = 15.0;
    pub const POST_WIDTH: f32 = 15.0;
    pub const POST_HEIGHT: f32 = 100.0;
    /// Maximum tilt either side of level/upright (degrees)
    pub const MAX_TILT_DEG: f32 = 15.0;

    /// Spawning
    pub const SPAWN_SPAN: f32 = 700.0;
    pub const SPAWN_OFFSET: f32 = 50.0;
    pub const MAX_START_DELAY_SECS: f32 = 2.0;
    pub const SPAWN_VX_RANGE: f32 = 4.0;
    pub const SPAWN_SPIN_RANGE: f32 = 10.0;

    /// Session
    pub const ROUND_SECONDS: u32 = 30;
    pub const MIN_PARTICIPANTS: usize = 2;
    /// Remaining time at which the timer is shown as running out
    pub const RUNNING_OUT_SECS: u32 = 10;
}

/// Uniform sample centred on zero: `(r - 0.5) * range`, r in [0, 1)
#[inline]
pub fn centered<R: rand::Rng + ?Sized>(rng: &mut R, range: f32) -> f32 {
    (rng.random::<f32>() - 0.5) * range
}
