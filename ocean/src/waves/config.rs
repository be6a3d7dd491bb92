//! Serializable wave setups and presets.

use bevy::math::Vec2;
use serde::{Deserialize, Serialize};

use super::form::WaveForm;
use super::gerstner::{GerstnerParams, GerstnerWaveForm};
use super::manager::WaveManager;

/// Description of one wave form, as it appears in config files.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum WaveFormConfig {
    Gerstner(GerstnerParams),
}

impl WaveFormConfig {
    pub fn build(&self) -> Box<dyn WaveForm> {
        match self {
            WaveFormConfig::Gerstner(params) => Box::new(GerstnerWaveForm::new(*params)),
        }
    }
}

/// Preset sea states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum WavePreset {
    /// Flat water
    Still,
    /// A single long, low swell
    Calm,
    /// Default sailing conditions
    #[default]
    Ocean,
    /// Tall, steep, fast waves
    Storm,
}

impl WavePreset {
    pub fn wave_forms(self) -> Vec<WaveFormConfig> {
        let gerstner = WaveFormConfig::Gerstner;

        match self {
            WavePreset::Still => Vec::new(),
            WavePreset::Calm => vec![gerstner(
                GerstnerParams::new(1200.0, 0.5, 20.0, 0.8).with_direction(Vec2::new(1.0, 0.2)),
            )],
            WavePreset::Ocean => vec![
                gerstner(GerstnerParams::default()),
                gerstner(
                    GerstnerParams::new(420.0, 0.8, 25.0, 1.3)
                        .with_direction(Vec2::new(1.0, 0.0))
                        .with_rotation(35.0),
                ),
                gerstner(
                    GerstnerParams::new(230.0, 0.6, 10.0, 1.9)
                        .with_direction(Vec2::new(0.5, -1.0))
                        .with_phase(1.3),
                ),
            ],
            WavePreset::Storm => vec![
                gerstner(
                    GerstnerParams::new(1500.0, 1.0, 160.0, 1.2).with_direction(Vec2::new(1.0, 0.2)),
                ),
                gerstner(
                    GerstnerParams::new(800.0, 0.9, 80.0, 1.6).with_direction(Vec2::new(-0.5, 1.0)),
                ),
                gerstner(
                    GerstnerParams::new(450.0, 0.8, 35.0, 2.2)
                        .with_direction(Vec2::new(0.7, -0.7))
                        .with_phase(0.4),
                ),
                gerstner(
                    GerstnerParams::new(200.0, 0.6, 12.0, 3.0)
                        .with_direction(Vec2::new(-1.0, -0.3))
                        .with_phase(2.1),
                ),
            ],
        }
    }

    pub fn to_manager(self) -> WaveManager {
        WaveManager::from_forms(self.wave_forms().iter().map(WaveFormConfig::build))
    }
}
