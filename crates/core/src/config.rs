//! World configuration loaded from TOML.
//! Every field has a default, so an empty file yields the stock world.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::mapgen::RepairPolicy;
use crate::movement::{MovementConstants, MovementEnvelope};

pub const DEFAULT_MAIN_PATH_LENGTH: usize = 8;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("movement constant `{name}` must be positive and finite, got {value}")]
    NonPositiveConstant { name: &'static str, value: f32 },
    #[error("main path needs at least one room")]
    EmptyMainPath,
    #[error("failed to read config file: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub seed: u64,
    pub main_path_length: usize,
    pub difficulty_start: f32,
    pub difficulty_step: f32,
    pub movement: MovementConstants,
    pub repair: RepairPolicy,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            main_path_length: DEFAULT_MAIN_PATH_LENGTH,
            difficulty_start: 1.0,
            difficulty_step: 0.5,
            movement: MovementConstants::default(),
            repair: RepairPolicy::default(),
        }
    }
}

impl WorldConfig {
    pub fn with_seed(seed: u64) -> Self {
        Self { seed, ..Self::default() }
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.movement.validate()?;
        if self.main_path_length == 0 {
            return Err(ConfigError::EmptyMainPath);
        }
        Ok(())
    }

    pub fn envelope(&self) -> Result<MovementEnvelope, ConfigError> {
        MovementEnvelope::try_new(&self.movement)
    }
}
