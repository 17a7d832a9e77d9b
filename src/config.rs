//! Run configuration
//!
//! Only the shape of a run is configurable: which flow model, grid sizing,
//! cadence, seed and rendering mode. Physical constants stay in
//! `crate::constants`.

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::constants::{frame, injection};
use crate::error::{SimError, SimResult};

/// Flow model selected for a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum FlowModelKind {
    /// Mass-conserving cellular automaton with a drain row
    #[default]
    ConservativeAdvection,
    /// Per-cell velocity with gravity and bounces
    VelocityField,
    /// Fixed population of particles with compression
    Particles,
}

/// Fixed grid bounds; the map is cropped or padded to fit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct FixedSize {
    pub width: usize,
    pub height: usize,
}

impl FixedSize {
    /// The classic 80x24 terminal
    pub fn classic() -> Self {
        Self {
            width: frame::CLASSIC_WIDTH,
            height: frame::CLASSIC_HEIGHT,
        }
    }
}

/// Simulation configuration, usually read from a TOML file
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub flow_model: FlowModelKind,
    /// Sleep after every frame; defaults per flow model when unset
    pub frame_interval_ms: Option<u64>,
    /// Inject water every N frames
    pub injection_interval: u64,
    /// RNG seed for the inlet; entropy when unset
    pub seed: Option<u64>,
    /// Render velocity arrows instead of the intensity ramp
    pub debug_render: bool,
    /// Size the grid to fixed bounds instead of the map content
    pub fixed_size: Option<FixedSize>,
    /// Reproduce water doubling on velocity-field bounces
    pub legacy_bounce_doubling: bool,
    /// Stop after this many frames; run until interrupted when unset
    pub max_frames: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            flow_model: FlowModelKind::default(),
            frame_interval_ms: None,
            injection_interval: injection::INTERVAL,
            seed: None,
            debug_render: false,
            fixed_size: None,
            legacy_bounce_doubling: false,
            max_frames: None,
        }
    }
}

impl SimConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    /// Load and validate a TOML config file
    pub fn load(path: impl AsRef<Path>) -> SimResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| SimError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_toml_str(&raw).map_err(|e| SimError::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        config.validate().map_err(|message| SimError::ConfigParse {
            path: path.to_path_buf(),
            message,
        })?;

        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.injection_interval == 0 {
            return Err("injection_interval must be at least 1".to_string());
        }
        if let Some(size) = self.fixed_size {
            if size.width == 0 || size.height == 0 {
                return Err(format!("fixed_size {}x{} is empty", size.width, size.height));
            }
        }
        Ok(())
    }

    pub fn frame_interval(&self) -> Duration {
        let millis = self.frame_interval_ms.unwrap_or(match self.flow_model {
            FlowModelKind::Particles => frame::PARTICLE_INTERVAL_MS,
            _ => frame::CELL_INTERVAL_MS,
        });
        Duration::from_millis(millis)
    }

    pub fn fixed_dimensions(&self) -> Option<(usize, usize)> {
        self.fixed_size.map(|size| (size.width, size.height))
    }
}
