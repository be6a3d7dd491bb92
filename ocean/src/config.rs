//! Ron configuration for a sailing session.
//!
//! Every field falls back to its default, so a config file only needs to
//! name what it changes:
//!
//! ```ron
//! (
//!     preset: Storm,
//!     wind: (0.0, 2.0, 0.0),
//!     boat: (sail_power: 12.0),
//! )
//! ```

use std::fs;
use std::path::Path;

use bevy::math::Vec3;
use bevy::prelude::Resource;
use ron::ser::PrettyConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::boat::BoatParams;
use crate::buoy::BuoyParams;
use crate::physics::FloatParams;
use crate::waves::{WaveFormConfig, WaveManager, WavePreset};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Parse(#[from] ron::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Resource)]
#[serde(default)]
pub struct OceanConfig {
    /// Base sea state
    pub preset: WavePreset,
    /// Extra wave forms added on top of the preset
    pub waves: Vec<WaveFormConfig>,
    pub wind: Vec3,
    pub boat: BoatParams,
    pub boat_float: FloatParams,
    pub buoy: BuoyParams,
}

impl Default for OceanConfig {
    fn default() -> Self {
        Self {
            preset: WavePreset::default(),
            waves: Vec::new(),
            wind: Vec3::X,
            boat: BoatParams::default(),
            boat_float: FloatParams::boat(),
            buoy: BuoyParams::default(),
        }
    }
}

impl OceanConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let config = Self::from_ron_str(&contents)?;
        log::debug!("Loaded ocean config from {}", path.display());
        Ok(config)
    }

    pub fn from_ron_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(ron::de::from_str(contents)?)
    }

    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        let pretty_config = PrettyConfig::new()
            .with_depth_limit(3)
            .with_separate_tuple_members(false)
            .with_enumerate_arrays(true);
        Ok(ron::ser::to_string_pretty(self, pretty_config)?)
    }

    /// Preset forms first, then the extra `waves` in file order.
    pub fn build_wave_manager(&self) -> WaveManager {
        let mut manager = self.preset.to_manager();
        for wave in &self.waves {
            manager.add_boxed(wave.build());
        }
        manager
    }
}
