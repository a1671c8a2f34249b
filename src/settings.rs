//! Runtime settings
//!
//! Loaded from an optional JSON file named by `RACE_SETTINGS`, then overridden
//! by `PORT` and `RACE_SEED` from the environment.

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_GAME_HEIGHT, ROUND_SECONDS};
use crate::sim::RaceState;

/// Environment variable naming a JSON settings file
pub const SETTINGS_ENV: &str = "RACE_SETTINGS";
pub const PORT_ENV: &str = "PORT";
pub const SEED_ENV: &str = "RACE_SEED";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Participant service port
    pub port: u16,
    /// Height of the game area
    pub game_height: f32,
    /// Round length in seconds
    pub round_seconds: u32,
    /// Fixed seed for reproducible boards; random when unset
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            port: 5000,
            game_height: DEFAULT_GAME_HEIGHT,
            round_seconds: ROUND_SECONDS,
            seed: None,
        }
    }
}

impl Settings {
    /// Load from file and environment, falling back to defaults
    pub fn load() -> Self {
        let mut settings = match std::env::var(SETTINGS_ENV) {
            Ok(path) => match std::fs::read_to_string(&path) {
                Ok(json) => match serde_json::from_str(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from {}", path);
                        settings
                    }
                    Err(e) => {
                        log::warn!("Ignoring malformed settings in {}: {}", path, e);
                        Self::default()
                    }
                },
                Err(e) => {
                    log::warn!("Could not read settings file {}: {}", path, e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        };

        settings.apply_overrides(|key| std::env::var(key).ok());
        settings
    }

    /// Apply `PORT` / `RACE_SEED` style overrides from a lookup
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup(PORT_ENV) {
            match port.parse() {
                Ok(port) => self.port = port,
                Err(_) => log::warn!("Ignoring invalid {}={:?}", PORT_ENV, port),
            }
        }
        if let Some(seed) = lookup(SEED_ENV) {
            match seed.parse() {
                Ok(seed) => self.seed = Some(seed),
                Err(_) => log::warn!("Ignoring invalid {}={:?}", SEED_ENV, seed),
            }
        }
    }

    /// Seed to build a board from: the configured one, or fresh entropy
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }

    /// Build a fresh race state from these settings
    pub fn race_state(&self) -> RaceState {
        RaceState::with_dimensions(self.resolve_seed(), self.game_height, self.round_seconds)
    }
}
