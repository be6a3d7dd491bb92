//! Yaw/pitch/roll orientation in degrees.
//!
//! Floating bodies keep their orientation as Euler angles rather than a
//! quaternion because the wave correction works per axis: pitch and roll are
//! pulled toward the water surface while yaw is left to the rudder.
//!
//! Convention (Z up, X forward at identity):
//! - `yaw` rotates about +Z, turning X toward Y
//! - `pitch` is positive nose up
//! - `roll` is positive right side down
//!
//! The local right axis at identity is `-Y`.

use bevy::math::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, MulAssign, Sub};

/// Below this length a projected axis is treated as degenerate.
const AXIS_EPSILON: f32 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rotator {
    pub yaw: f32,
    pub pitch: f32,
    pub roll: f32,
}

impl Rotator {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(yaw: f32, pitch: f32, roll: f32) -> Self {
        Self { yaw, pitch, roll }
    }

    /// A pure heading change, used for sail and lens offsets.
    pub const fn from_yaw(yaw: f32) -> Self {
        Self::new(yaw, 0.0, 0.0)
    }

    pub fn to_quat(self) -> Quat {
        Quat::from_rotation_z(self.yaw.to_radians())
            * Quat::from_rotation_y(-self.pitch.to_radians())
            * Quat::from_rotation_x(self.roll.to_radians())
    }

    #[inline]
    pub fn forward(self) -> Vec3 {
        self.to_quat() * Vec3::X
    }

    #[inline]
    pub fn right(self) -> Vec3 {
        self.to_quat() * Vec3::NEG_Y
    }

    #[inline]
    pub fn up(self) -> Vec3 {
        self.to_quat() * Vec3::Z
    }

    /// Build the orientation whose forward and right axes best match the
    /// given vectors. Forward is kept exactly (after normalizing), right is
    /// re-orthogonalized against it.
    ///
    /// Returns `None` when either axis is too short or both are parallel.
    pub fn from_forward_right(forward: Vec3, right: Vec3) -> Option<Self> {
        let forward = forward.normalize_or_zero();
        let up = right.cross(forward).normalize_or_zero();
        if forward.length_squared() < AXIS_EPSILON || up.length_squared() < AXIS_EPSILON {
            return None;
        }
        let left = up.cross(forward);

        let yaw = forward.y.atan2(forward.x);
        let pitch = forward.z.clamp(-1.0, 1.0).asin();
        let roll = left.z.atan2(up.z);

        Some(Self::new(
            yaw.to_degrees(),
            pitch.to_degrees(),
            roll.to_degrees(),
        ))
    }

    /// Wrap a single angle into `(-180, 180]`.
    pub fn normalize_axis(angle: f32) -> f32 {
        let wrapped = angle.rem_euclid(360.0);
        if wrapped > 180.0 {
            wrapped - 360.0
        } else {
            wrapped
        }
    }

    /// Every axis wrapped into `(-180, 180]`.
    pub fn normalized(self) -> Self {
        Self::new(
            Self::normalize_axis(self.yaw),
            Self::normalize_axis(self.pitch),
            Self::normalize_axis(self.roll),
        )
    }

    /// Sum of absolute axis values.
    #[inline]
    pub fn manhattan_size(self) -> f32 {
        self.yaw.abs() + self.pitch.abs() + self.roll.abs()
    }

    /// Uniformly scale down so that `manhattan_size` does not exceed `max`.
    pub fn clamp_size(self, max: f32) -> Self {
        let size = self.manhattan_size();
        if size > max {
            self * (max / size)
        } else {
            self
        }
    }

    pub fn is_finite(self) -> bool {
        self.yaw.is_finite() && self.pitch.is_finite() && self.roll.is_finite()
    }
}

impl Add for Rotator {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.yaw + rhs.yaw, self.pitch + rhs.pitch, self.roll + rhs.roll)
    }
}

impl AddAssign for Rotator {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Rotator {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.yaw - rhs.yaw, self.pitch - rhs.pitch, self.roll - rhs.roll)
    }
}

impl Mul<f32> for Rotator {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.yaw * rhs, self.pitch * rhs, self.roll * rhs)
    }
}

impl MulAssign<f32> for Rotator {
    fn mul_assign(&mut self, rhs: f32) {
        *self = *self * rhs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_vec_near(a: Vec3, b: Vec3) {
        assert!((a - b).length() < 1e-4, "{a:?} != {b:?}");
    }

    #[test]
    fn test_identity_axes() {
        let rot = Rotator::ZERO;
        assert_vec_near(rot.forward(), Vec3::X);
        assert_vec_near(rot.right(), Vec3::NEG_Y);
        assert_vec_near(rot.up(), Vec3::Z);
    }

    #[test]
    fn test_yaw_turns_forward_toward_y() {
        assert_vec_near(Rotator::from_yaw(90.0).forward(), Vec3::Y);
    }

    #[test]
    fn test_positive_pitch_is_nose_up() {
        assert!(Rotator::new(0.0, 30.0, 0.0).forward().z > 0.4);
    }

    #[test]
    fn test_positive_roll_drops_right_side() {
        assert!(Rotator::new(0.0, 0.0, 20.0).right().z < -0.3);
    }

    #[test]
    fn test_axes_recover_rotator() {
        let rot = Rotator::new(35.0, -12.0, 8.0);
        let recovered = Rotator::from_forward_right(rot.forward(), rot.right()).unwrap();
        assert!((recovered.yaw - rot.yaw).abs() < 1e-2);
        assert!((recovered.pitch - rot.pitch).abs() < 1e-2);
        assert!((recovered.roll - rot.roll).abs() < 1e-2);
    }

    #[test]
    fn test_parallel_axes_are_rejected() {
        assert!(Rotator::from_forward_right(Vec3::X, Vec3::X).is_none());
        assert!(Rotator::from_forward_right(Vec3::ZERO, Vec3::NEG_Y).is_none());
    }

    #[test]
    fn test_normalize_axis_wraps() {
        assert_eq!(Rotator::normalize_axis(190.0), -170.0);
        assert_eq!(Rotator::normalize_axis(-190.0), 170.0);
        assert_eq!(Rotator::normalize_axis(180.0), 180.0);
        assert_eq!(Rotator::normalize_axis(-45.0), -45.0);
    }

    #[test]
    fn test_clamp_size_scales_uniformly() {
        let clamped = Rotator::new(0.0, 3.0, -1.0).clamp_size(1.0);
        assert!((clamped.manhattan_size() - 1.0).abs() < 1e-6);
        assert!((clamped.pitch - 0.75).abs() < 1e-6);
        assert!((clamped.roll + 0.25).abs() < 1e-6);

        let small = Rotator::new(0.1, 0.2, 0.3);
        assert_eq!(small.clamp_size(1.0), small);
    }
}
