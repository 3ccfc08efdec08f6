//! Runner configuration: an optional JSON file, overridden by CLI flags.

use galaxion_core::constants::{DEFAULT_LIVES, TICK_MS};
use galaxion_core::wave::{default_campaign, parse_campaign, WaveDescriptor, WaveError};
use galaxion_sim::SimConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("bad wave file {path}: {source}")]
    Wave { path: PathBuf, source: WaveError },
    #[error("tick length must be a positive number of milliseconds, got {0}")]
    TickLength(f32),
}

/// Settings for one headless run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub seed: u64,
    pub lives: u32,
    /// Simulated milliseconds per tick.
    pub tick_ms: f32,
    /// Print a status line every this many ticks (0 disables).
    pub report_every: u64,
    /// Stop after this many ticks; runs until game over when unset.
    pub max_ticks: Option<u64>,
    /// Sleep out each tick instead of running flat out.
    pub realtime: bool,
    /// Wave file in the level format; the built-in campaign when unset.
    pub waves: Option<PathBuf>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            lives: DEFAULT_LIVES,
            tick_ms: TICK_MS,
            report_every: 60,
            max_ticks: None,
            realtime: false,
            waves: None,
        }
    }
}

impl RunConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let json = read(path)?;
        Self::from_json(&json).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Resolve the wave file and build the simulation config.
    pub fn sim_config(&self) -> Result<SimConfig, ConfigError> {
        if !self.tick_ms.is_finite() || self.tick_ms <= 0.0 {
            return Err(ConfigError::TickLength(self.tick_ms));
        }
        let waves = match &self.waves {
            Some(path) => load_waves(path)?,
            None => default_campaign(),
        };
        Ok(SimConfig {
            seed: self.seed,
            lives: self.lives,
            waves,
        })
    }
}

pub fn load_waves(path: &Path) -> Result<Vec<WaveDescriptor>, ConfigError> {
    let json = read(path)?;
    parse_campaign(&json).map_err(|source| ConfigError::Wave {
        path: path.to_path_buf(),
        source,
    })
}

fn read(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}
