//! Ocean and sailing simulation.
//!
//! A composable Gerstner wave field ([`waves`]), a buoyancy and drag
//! integrator for bodies riding it ([`physics`]), and the boats and buoys
//! built on top ([`boat`], [`buoy`]). The core is plain structs with
//! explicit `tick` functions; [`OceanPlugin`] schedules them in a bevy app.
//!
//! World space is Z up with +X forward at zero yaw. Angles are degrees.

pub mod boat;
pub mod buoy;
pub mod config;
pub mod constants;
pub mod physics;
pub mod plugin;
pub mod sets;
pub mod waves;

pub use boat::{Boat, BoatControls, BoatParams, DriveReport};
pub use buoy::{Buoy, BuoyParams};
pub use config::{ConfigError, OceanConfig};
pub use constants::*;
pub use physics::{FloatBody, FloatParams, Pose, Rotator};
pub use plugin::{OceanPlugin, Wind};
pub use sets::SimulationSet;
pub use waves::{
    GerstnerParams, GerstnerWaveForm, WaveField, WaveForm, WaveFormConfig, WaveFormId,
    WaveManager, WavePreset, WaveSample,
};
