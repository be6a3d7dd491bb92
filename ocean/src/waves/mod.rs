//! Composable ocean wave field.
//!
//! ```text
//!   GerstnerWaveForm ─┐
//!   GerstnerWaveForm ─┼─> WaveManager::sample(pos, t) -> WaveSample
//!   <your WaveForm>  ─┘      (Σ displacement, corrected Σ normal)
//! ```
//!
//! Every consumer (float physics, mesh builders, camera clamping) reads the
//! combined field through [`WaveField`]; individual wave forms are never
//! queried directly outside this module.

pub mod config;
pub mod form;
pub mod gerstner;
pub mod manager;

pub use config::{WaveFormConfig, WavePreset};
pub use form::{WaveField, WaveForm, WaveSample};
pub use gerstner::{GerstnerParams, GerstnerWaveForm};
pub use manager::{WaveFormId, WaveManager};
