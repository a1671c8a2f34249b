//! Session phase transitions
//!
//! Idle -> Running -> Finished -> Idle. Rejected transitions leave the state
//! untouched, the way a disabled button would.

use thiserror::Error;

use super::state::{Participant, RaceState, SessionPhase};
use crate::consts::MIN_PARTICIPANTS;
use crate::registry::RegistryError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("at least 2 participants are needed to start, have {0}")]
    NotEnoughParticipants(usize),
    #[error("no obstacles have been generated")]
    NoObstacles,
    #[error("a race is already running")]
    AlreadyRunning,
    #[error("the last race has finished, reset before starting another")]
    NotReset,
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl RaceState {
    /// Register a name for the next race. Entry is closed while running.
    pub fn add_participant(&mut self, name: &str) -> Result<(), SessionError> {
        if self.phase == SessionPhase::Running {
            return Err(SessionError::AlreadyRunning);
        }
        self.registry.add(name)?;
        Ok(())
    }

    /// Spawn every registered name and begin the race
    pub fn start(&mut self) -> Result<(), SessionError> {
        match self.phase {
            SessionPhase::Idle => {}
            SessionPhase::Running => return Err(SessionError::AlreadyRunning),
            SessionPhase::Finished => return Err(SessionError::NotReset),
        }
        if self.registry.len() < MIN_PARTICIPANTS {
            return Err(SessionError::NotEnoughParticipants(self.registry.len()));
        }
        if self.obstacles.is_empty() {
            return Err(SessionError::NoObstacles);
        }

        let count = self.registry.len();
        let participants: Vec<Participant> = self
            .registry
            .list()
            .iter()
            .enumerate()
            .map(|(i, name)| Participant::spawn(name, i, count, &mut self.rng))
            .collect();

        self.participants = participants;
        self.winner = None;
        self.time_left = self.round_seconds;
        self.frames = 0;
        self.phase = SessionPhase::Running;
        log::info!("Race started with {} participants", count);
        Ok(())
    }

    /// One second of the round timer. Running out ends the race without a winner.
    pub fn countdown(&mut self) {
        if self.phase != SessionPhase::Running {
            return;
        }
        if self.time_left <= 1 {
            self.time_left = 0;
            self.phase = SessionPhase::Finished;
            log::info!("Time is up, no participant settled");
        } else {
            self.time_left -= 1;
        }
    }

    /// Clear names, balls and winner, back to Idle
    pub fn reset(&mut self) -> Result<(), SessionError> {
        if self.phase == SessionPhase::Running {
            return Err(SessionError::AlreadyRunning);
        }
        self.registry.clear();
        self.participants.clear();
        self.winner = None;
        self.time_left = self.round_seconds;
        self.frames = 0;
        self.phase = SessionPhase::Idle;
        log::info!("Race reset");
        Ok(())
    }
}
