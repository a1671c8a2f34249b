//! Fixed timestep simulation tick
//!
//! One call advances every released participant by one frame. The step is
//! SIM_DT no matter how long the frame actually took.

use rand::Rng;

use super::collision::{Contact, bounce, obstacle_contact};
use super::state::{Obstacle, Participant, RaceState, SessionPhase};
use crate::centered;
use crate::consts::*;

/// Outcome of a single participant step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Moving,
    /// Landed and came to rest on the floor
    AtRest,
}

/// Advance the race by one frame
///
/// `elapsed` is session time in seconds, used to release staggered drops.
/// Does nothing unless the session is running.
pub fn tick(state: &mut RaceState, elapsed: f32) {
    if state.phase != SessionPhase::Running {
        return;
    }

    state.frames += 1;
    let floor_y = state.floor_y();

    // Registry order decides ties: the first ball found at rest wins.
    for participant in state.participants.iter_mut() {
        if !participant.released(elapsed) {
            continue;
        }

        let outcome = step_participant(participant, &state.obstacles, floor_y, &mut state.rng);
        participant.last_update = elapsed;

        if outcome == StepOutcome::AtRest {
            log::info!(
                "{} settled at the bottom after {} frames",
                participant.name,
                state.frames
            );
            state.winner = Some(participant.name.clone());
            state.phase = SessionPhase::Finished;
            return;
        }
    }
}

/// Apply one frame of physics to a participant
pub fn step_participant<R: Rng + ?Sized>(
    p: &mut Participant,
    obstacles: &[Obstacle],
    floor_y: f32,
    rng: &mut R,
) -> StepOutcome {
    apply_gravity(p);

    p.pos += p.vel;
    p.rotation += p.rotation_vel;

    clamp_horizontal(p);

    for obstacle in obstacles {
        if let Some(contact) = obstacle_contact(p.pos, obstacle) {
            match contact {
                Contact::Vertical { snap_y } => {
                    p.pos.y = snap_y;
                    p.vel.y = bounce(p.vel.y, OBSTACLE_TOP_RESTITUTION);
                    p.vel.x += centered(rng, HIT_KICK_RANGE);
                }
                Contact::Horizontal => {
                    p.vel.x = bounce(p.vel.x, OBSTACLE_SIDE_RESTITUTION);
                }
            }
            p.rotation_vel = centered(rng, HIT_SPIN_RANGE);
        }
    }

    if p.pos.y >= floor_y {
        p.pos.y = floor_y;
        if p.vel.y.abs() < REST_SPEED {
            return StepOutcome::AtRest;
        }
        p.vel.y = bounce(p.vel.y, FLOOR_RESTITUTION);
    }

    p.vel *= AIR_DRAG;
    StepOutcome::Moving
}

/// Gravity for one fixed step
#[inline]
pub fn apply_gravity(p: &mut Participant) {
    p.vel.y += GRAVITY * SIM_DT;
}

/// Keep a participant inside the side walls, bouncing off them
pub fn clamp_horizontal(p: &mut Participant) {
    if p.pos.x < ARENA_MIN_X {
        p.pos.x = ARENA_MIN_X;
        p.vel.x = bounce(p.vel.x, WALL_RESTITUTION);
    }
    if p.pos.x > ARENA_MAX_X {
        p.pos.x = ARENA_MAX_X;
        p.vel.x = bounce(p.vel.x, WALL_RESTITUTION);
    }
}
