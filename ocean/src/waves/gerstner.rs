//! Gerstner (trochoidal) wave form.
//!
//! Gerstner waves move surface points in circles, which gives the sharp
//! crests and wide troughs of open water. Each form here contributes a
//! displacement plus a raw gradient term; [`WaveManager`](super::WaveManager)
//! sums the contributions and corrects the normal.

use bevy::math::{Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use super::form::{WaveForm, WaveSample};

/// Tunable parameters of a single Gerstner wave.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GerstnerParams {
    /// Crest-to-crest distance in world units
    pub wave_length: f32,
    /// Horizontal pinch of the crest (0 = plain sine wave)
    pub steepness: f32,
    /// Crest height in world units
    pub amplitude: f32,
    /// Phase advance per second
    pub speed: f32,
    /// Constant phase offset
    pub phase: f32,
    /// Travel direction, need not be unit length
    pub direction: Vec2,
    /// Extra rotation of `direction` about the up axis, in degrees
    pub rotation_angle: f32,
}

impl Default for GerstnerParams {
    fn default() -> Self {
        Self {
            wave_length: 750.0,
            steepness: 1.0,
            amplitude: 60.0,
            speed: 1.0,
            phase: 0.0,
            direction: Vec2::new(2.0, 0.0),
            rotation_angle: 0.0,
        }
    }
}

impl GerstnerParams {
    pub fn new(wave_length: f32, steepness: f32, amplitude: f32, speed: f32) -> Self {
        Self {
            wave_length,
            steepness,
            amplitude,
            speed,
            ..Default::default()
        }
    }

    pub fn with_direction(mut self, direction: Vec2) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_rotation(mut self, degrees: f32) -> Self {
        self.rotation_angle = degrees;
        self
    }

    pub fn with_phase(mut self, phase: f32) -> Self {
        self.phase = phase;
        self
    }

    /// Angular wave number `2π / wave_length`, zero for a degenerate length.
    pub fn angular_wave_number(&self) -> f32 {
        if self.wave_length > 0.0 {
            TAU / self.wave_length
        } else {
            0.0
        }
    }

    /// `direction` rotated by `rotation_angle` and normalized. A zero
    /// direction stays zero.
    pub fn effective_direction(&self) -> Vec2 {
        let rotated = Quat::from_rotation_z(self.rotation_angle.to_radians())
            * Vec3::new(self.direction.x, self.direction.y, 0.0);
        rotated.truncate().normalize_or_zero()
    }
}

#[derive(Debug, Clone)]
pub struct GerstnerWaveForm {
    params: GerstnerParams,
    /// Cached `angular_wave_number`
    k: f32,
    /// Cached `effective_direction`
    direction: Vec2,
}

impl GerstnerWaveForm {
    pub fn new(params: GerstnerParams) -> Self {
        Self {
            k: params.angular_wave_number(),
            direction: params.effective_direction(),
            params,
        }
    }

    pub fn params(&self) -> &GerstnerParams {
        &self.params
    }

    /// Replace the parameters and refresh the cached derived values.
    pub fn set_params(&mut self, params: GerstnerParams) {
        *self = Self::new(params);
    }

    #[inline]
    pub fn angular_wave_number(&self) -> f32 {
        self.k
    }

    #[inline]
    pub fn effective_direction(&self) -> Vec2 {
        self.direction
    }
}

impl Default for GerstnerWaveForm {
    fn default() -> Self {
        Self::new(GerstnerParams::default())
    }
}

impl WaveForm for GerstnerWaveForm {
    fn sample(&self, position: Vec2, time: f32) -> WaveSample {
        let GerstnerParams {
            steepness,
            amplitude,
            speed,
            phase,
            ..
        } = self.params;
        let k = self.k;
        let d = self.direction;

        let wave_phase = k * d.dot(position) + (time * speed + phase);
        let (s, c) = wave_phase.sin_cos();

        let displacement = Vec3::new(
            steepness * amplitude * d.x * c,
            steepness * amplitude * d.y * c,
            amplitude * s,
        );
        let normal = Vec3::new(
            k * amplitude * d.x * c,
            k * amplitude * d.y * c,
            k * steepness * amplitude * s,
        );

        WaveSample {
            displacement,
            normal,
        }
    }
}
