use bevy::math::{Vec2, Vec3};
use std::fmt;

/// Displacement and normal contribution of the water surface at one point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WaveSample {
    /// Offset of the surface from its rest position (x, y horizontal, z up)
    pub displacement: Vec3,
    /// Normal-like vector. For a single wave form this is the raw gradient
    /// contribution; after composition it is the corrected surface normal.
    /// Not unit length in either case.
    pub normal: Vec3,
}

impl WaveSample {
    /// Flat water: no displacement and a straight-up normal.
    pub const CALM: Self = Self {
        displacement: Vec3::ZERO,
        normal: Vec3::Z,
    };

    /// Zero contribution, the identity for summing wave forms.
    pub const ZERO: Self = Self {
        displacement: Vec3::ZERO,
        normal: Vec3::ZERO,
    };

    /// Unit surface normal, falling back to straight up when degenerate.
    pub fn unit_normal(&self) -> Vec3 {
        self.normal.normalize_or(Vec3::Z)
    }
}

/// One periodic contributor to the ocean surface.
///
/// Implementations must be pure functions of their parameters plus the
/// queried position and time, and must never panic or return NaN for finite
/// inputs.
pub trait WaveForm: fmt::Debug + Send + Sync {
    fn sample(&self, position: Vec2, time: f32) -> WaveSample;
}

/// Anything that can be queried for the combined water surface.
pub trait WaveField {
    fn sample(&self, position: Vec2, time: f32) -> WaveSample;

    /// Height of the surface above `sea_level` at `position`.
    fn surface_height(&self, position: Vec2, time: f32, sea_level: f32) -> f32 {
        sea_level + self.sample(position, time).displacement.z
    }
}

impl<W: WaveField + ?Sized> WaveField for &W {
    fn sample(&self, position: Vec2, time: f32) -> WaveSample {
        (**self).sample(position, time)
    }
}

/// A missing wave field degrades to flat water.
impl<W: WaveField> WaveField for Option<W> {
    fn sample(&self, position: Vec2, time: f32) -> WaveSample {
        match self {
            Some(field) => field.sample(position, time),
            None => WaveSample::CALM,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_is_calm() {
        let field: Option<&crate::waves::WaveManager> = None;
        assert_eq!(field.sample(Vec2::new(3.0, 4.0), 1.0), WaveSample::CALM);
        assert_eq!(field.surface_height(Vec2::ZERO, 0.0, 12.0), 12.0);
    }

    #[test]
    fn test_unit_normal_falls_back_to_up() {
        assert_eq!(WaveSample::ZERO.unit_normal(), Vec3::Z);
    }
}
