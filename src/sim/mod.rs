//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (registry order)
//! - No clock, rendering or network dependencies

pub mod collision;
pub mod layout;
pub mod session;
pub mod state;
pub mod tick;

pub use collision::{Contact, obstacle_contact};
pub use layout::generate_obstacles;
pub use session::SessionError;
pub use state::{Obstacle, Participant, RaceState, SessionPhase};
pub use tick::{StepOutcome, step_participant, tick};
