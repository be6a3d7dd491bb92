//! Buoyancy and drag integration for bodies floating on the wave field.
//!
//! A [`FloatBody`] is either waterborne (buoyancy, drag and wave-following
//! torque apply) or airborne (gravity only, free spin). The regime is
//! re-evaluated every tick by comparing the body's predicted height with the
//! water surface under it.

pub mod rotator;

use bevy::math::{Vec2, Vec3};
use bevy::prelude::Component;
use serde::{Deserialize, Serialize};

use crate::constants::{DRAG_SMOOTHING, MAX_WAVE_CORRECTION};
use crate::waves::WaveField;
pub use rotator::Rotator;

/// World position and orientation of a simulated body.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, Component)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Rotator,
}

impl Pose {
    pub fn new(position: Vec3, rotation: Rotator) -> Self {
        Self { position, rotation }
    }

    pub fn from_position(position: Vec3) -> Self {
        Self::new(position, Rotator::ZERO)
    }

    #[inline]
    pub fn forward(&self) -> Vec3 {
        self.rotation.forward()
    }

    #[inline]
    pub fn planar(&self) -> Vec2 {
        self.position.truncate()
    }

    /// Transform a point from body space into world space.
    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.position + self.rotation.to_quat() * local
    }
}

/// Tuning of the float integrator.
///
/// Drag-like values are *retention per second*: the fraction of the
/// quantity left after one second, applied as `value^delta` each tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloatParams {
    /// Horizontal velocity retention per second
    pub drag: f32,
    /// Exponent applied to the heading/velocity alignment term; higher
    /// values make sideways motion lose speed much faster than forward motion
    pub side_drag: f32,
    /// Downward acceleration while above the surface
    pub gravity: f32,
    /// Upward acceleration per unit of submersion depth
    pub buoyancy: f32,
    /// Vertical velocity retention per second while waterborne
    pub buoyancy_drag: f32,
    /// Angular acceleration toward the wave surface per degree of error
    pub angular_buoyancy: f32,
    /// Angular velocity retention per second while waterborne
    pub angular_resist: f32,
    /// Downhill acceleration along the tilt of the hull
    pub slide: f32,
}

impl Default for FloatParams {
    fn default() -> Self {
        Self {
            drag: 0.4,
            side_drag: 0.0,
            gravity: 981.0,
            buoyancy: 20.0,
            buoyancy_drag: 0.05,
            angular_buoyancy: 250.0,
            angular_resist: 0.05,
            slide: 120.0,
        }
    }
}

impl FloatParams {
    /// Hull tuning: gliding forward is cheap, sliding sideways is not.
    pub fn boat() -> Self {
        Self {
            side_drag: 0.8,
            ..Default::default()
        }
    }
}

/// Per-body buoyancy state.
#[derive(Debug, Clone, Component)]
pub struct FloatBody {
    pub params: FloatParams,
    /// Running horizontal position used for advection. While airborne the
    /// rendered position follows it rather than the other way round.
    planar_position: Vec2,
    /// Height of the undisturbed water surface
    sea_level: f32,
    velocity: Vec3,
    angular_velocity: Rotator,
    airborne: bool,
    current_drag: f32,
}

impl FloatBody {
    /// Spawn a body at `position`. The spawn height becomes the rest water
    /// level; use [`FloatBody::with_sea_level`] to place it elsewhere.
    pub fn new(position: Vec3, params: FloatParams) -> Self {
        Self {
            params,
            planar_position: position.truncate(),
            sea_level: position.z,
            velocity: Vec3::ZERO,
            angular_velocity: Rotator::ZERO,
            airborne: false,
            current_drag: 0.0,
        }
    }

    pub fn with_sea_level(mut self, sea_level: f32) -> Self {
        self.sea_level = sea_level;
        self
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    pub fn yaw_velocity(&self) -> f32 {
        self.angular_velocity.yaw
    }

    /// External yaw channel. Waves never drive yaw; rudders do.
    pub fn set_yaw_velocity(&mut self, yaw_velocity: f32) {
        self.angular_velocity.yaw = yaw_velocity;
    }

    pub fn angular_velocity(&self) -> Rotator {
        self.angular_velocity
    }

    /// Moving average of the speed lost to drag, for spray effects.
    pub fn current_drag(&self) -> f32 {
        self.current_drag
    }

    pub fn is_airborne(&self) -> bool {
        self.airborne
    }

    pub fn planar_position(&self) -> Vec2 {
        self.planar_position
    }

    pub fn sea_level(&self) -> f32 {
        self.sea_level
    }

    /// Advance the body by `delta` seconds and return its new pose.
    ///
    /// `pose` is the body's current world pose; `game_time` is the wave
    /// clock. A non-positive `delta` leaves everything untouched.
    pub fn tick(
        &mut self,
        delta: f32,
        pose: &Pose,
        field: &impl WaveField,
        game_time: f32,
    ) -> Pose {
        if delta <= 0.0 {
            return *pose;
        }

        let forward = pose.forward();

        if !self.airborne {
            self.apply_water_drag(delta, pose, forward);
        }

        self.planar_position += self.velocity.truncate() * delta;

        let sample = field.sample(pose.planar(), game_time);
        let displacement = sample.displacement;

        let mut next = Vec3::new(
            self.planar_position.x + displacement.x,
            self.planar_position.y + displacement.y,
            pose.position.z,
        );
        let ideal_height = self.sea_level + displacement.z;

        if next.z > ideal_height {
            self.velocity.z -= self.params.gravity * delta;
            let was_airborne = self.airborne;
            self.airborne = next.z + self.velocity.z * delta > ideal_height;
            if self.airborne && !was_airborne {
                log::trace!("Float body left the water at {:?}", next);
            }
        } else {
            self.airborne = false;
            let depth = ideal_height - next.z;
            self.velocity.z += self.params.buoyancy * delta * depth;
            self.velocity.z *= self.params.buoyancy_drag.powf(delta);
        }

        next.z += self.velocity.z * delta;

        let rotation = if self.airborne {
            pose.rotation + self.angular_velocity * delta
        } else {
            self.follow_surface(delta, pose.rotation, sample.unit_normal())
        };

        Pose::new(next, rotation.normalized())
    }

    fn apply_water_drag(&mut self, delta: f32, pose: &Pose, forward: Vec3) {
        let direction = self.velocity.normalize_or_zero();

        // 1 when moving along the heading (or at rest), 0 when moving
        // exactly sideways
        let alignment = ((1.0 - direction.length()) - forward.dot(direction)).abs();
        let drag = self.params.drag * alignment.powf(self.params.side_drag);

        let downhill = horizontal(pose.rotation.up());
        self.velocity += downhill * self.params.slide * delta;

        let retention = drag.powf(delta);
        self.velocity.x *= retention;
        self.velocity.y *= retention;

        let lost = (self.velocity - self.velocity * drag).length();
        self.current_drag += DRAG_SMOOTHING * (lost - self.current_drag);
    }

    /// Pull pitch and roll toward the orientation that lies flat on the
    /// surface, then integrate the angular velocity.
    fn follow_surface(&mut self, delta: f32, rotation: Rotator, normal: Vec3) -> Rotator {
        let forward = project_on_plane(rotation.forward(), normal);
        let right = project_on_plane(rotation.right(), normal);

        if let Some(ideal) = Rotator::from_forward_right(forward, right) {
            let correction = (ideal - rotation).normalized().clamp_size(MAX_WAVE_CORRECTION);
            let gain = delta * self.params.angular_buoyancy;
            self.angular_velocity.pitch += correction.pitch * gain;
            self.angular_velocity.roll += correction.roll * gain;
        }

        self.angular_velocity *= self.params.angular_resist.powf(delta);

        rotation + self.angular_velocity * delta
    }
}

/// Component of `v` in the horizontal plane.
#[inline]
fn horizontal(v: Vec3) -> Vec3 {
    Vec3::new(v.x, v.y, 0.0)
}

/// Remove the component of `v` along the unit vector `normal`.
#[inline]
fn project_on_plane(v: Vec3, normal: Vec3) -> Vec3 {
    v - normal * v.dot(normal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::waves::{GerstnerParams, GerstnerWaveForm, WaveManager, WavePreset};

    const DT: f32 = 1.0 / 60.0;

    fn calm() -> WaveManager {
        WaveManager::new()
    }

    #[test]
    fn test_zero_delta_is_a_no_op() {
        let waves = WavePreset::Ocean.to_manager();
        let pose = Pose::new(Vec3::new(30.0, -20.0, 50.0), Rotator::new(10.0, 4.0, -3.0));
        let mut body = FloatBody::new(pose.position, FloatParams::boat()).with_sea_level(0.0);
        body.set_velocity(Vec3::new(120.0, 35.0, -8.0));
        body.set_yaw_velocity(12.0);
        let before = body.clone();

        let after = body.tick(0.0, &pose, &waves, 3.25);

        assert_eq!(after, pose);
        assert_eq!(body.velocity(), before.velocity());
        assert_eq!(body.planar_position(), before.planar_position());
        assert_eq!(body.angular_velocity(), before.angular_velocity());
        assert_eq!(body.current_drag(), before.current_drag());
        assert_eq!(body.is_airborne(), before.is_airborne());
    }

    #[test]
    fn test_body_far_above_water_is_airborne() {
        let pose = Pose::from_position(Vec3::new(0.0, 0.0, 1000.0));
        let mut body = FloatBody::new(pose.position, FloatParams::default()).with_sea_level(0.0);

        let next = body.tick(DT, &pose, &calm(), 0.0);

        assert!(body.is_airborne());
        assert!(body.velocity().z < 0.0);
        assert!(next.position.z < pose.position.z);
    }

    #[test]
    fn test_body_at_surface_is_waterborne() {
        let pose = Pose::from_position(Vec3::new(0.0, 0.0, 0.0));
        let mut body = FloatBody::new(pose.position, FloatParams::default());

        let next = body.tick(DT, &pose, &calm(), 0.0);

        assert!(!body.is_airborne());
        assert_eq!(body.velocity().z, 0.0);
        assert_eq!(next.position.z, 0.0);
    }

    #[test]
    fn test_submerged_body_is_pushed_up() {
        let pose = Pose::from_position(Vec3::new(0.0, 0.0, -40.0));
        let mut body = FloatBody::new(pose.position, FloatParams::default()).with_sea_level(0.0);

        let next = body.tick(DT, &pose, &calm(), 0.0);

        assert!(!body.is_airborne());
        assert!(body.velocity().z > 0.0);
        assert!(next.position.z > pose.position.z);
    }

    #[test]
    fn test_body_just_above_water_lands_when_gravity_brings_it_down() {
        // 0.01 above the surface: one tick of gravity takes it below
        let pose = Pose::from_position(Vec3::new(0.0, 0.0, 0.01));
        let mut body = FloatBody::new(pose.position, FloatParams::default()).with_sea_level(0.0);

        body.tick(DT, &pose, &calm(), 0.0);

        assert!(!body.is_airborne());
        assert!(body.velocity().z < 0.0);
    }

    #[test]
    fn test_body_follows_wave_height() {
        let mut waves = WaveManager::new();
        waves.add_wave_form(GerstnerWaveForm::new(GerstnerParams::new(1000.0, 0.0, 50.0, 1.0)));
        // At t = π/2 the crest (height 50) sits over the origin
        let time = std::f32::consts::FRAC_PI_2;

        let mut pose = Pose::from_position(Vec3::ZERO);
        let mut body = FloatBody::new(pose.position, FloatParams::default());
        for _ in 0..600 {
            pose = body.tick(DT, &pose, &waves, time);
        }

        assert!((pose.position.z - 50.0).abs() < 1.0, "{:?}", pose.position);
    }

    #[test]
    fn test_zero_velocity_stays_finite() {
        let pose = Pose::from_position(Vec3::ZERO);
        let mut body = FloatBody::new(pose.position, FloatParams::boat());

        let next = body.tick(DT, &pose, &calm(), 0.0);

        assert!(body.velocity().is_finite());
        assert!(next.position.is_finite());
        assert!(next.rotation.is_finite());
        assert_eq!(body.current_drag(), 0.0);
    }

    #[test]
    fn test_forward_motion_keeps_more_speed_than_sideways() {
        let pose = Pose::from_position(Vec3::ZERO);

        let mut forward = FloatBody::new(pose.position, FloatParams::boat());
        forward.set_velocity(Vec3::new(100.0, 0.0, 0.0));
        let mut sideways = FloatBody::new(pose.position, FloatParams::boat());
        sideways.set_velocity(Vec3::new(0.0, 100.0, 0.0));

        forward.tick(DT, &pose, &calm(), 0.0);
        sideways.tick(DT, &pose, &calm(), 0.0);

        assert!(forward.velocity().length() > sideways.velocity().length());
        assert!(forward.current_drag() > 0.0);
    }

    #[test]
    fn test_drag_average_tracks_lost_speed() {
        let pose = Pose::from_position(Vec3::ZERO);
        let mut body = FloatBody::new(pose.position, FloatParams::default());
        body.set_velocity(Vec3::new(100.0, 0.0, 0.0));

        body.tick(DT, &pose, &calm(), 0.0);

        // retained speed after one tick, then 5 % of the 60 % lost to drag
        let speed = 100.0 * 0.4f32.powf(DT);
        assert!((body.velocity().x - speed).abs() < 1e-3);
        let expected = DRAG_SMOOTHING * (speed - 0.4 * speed);
        assert!((body.current_drag() - expected).abs() < 1e-4, "{}", body.current_drag());

        // the average keeps closing the gap on later ticks
        let first = body.current_drag();
        body.tick(DT, &pose, &calm(), 0.0);
        assert!(body.current_drag() > first);
    }

    #[test]
    fn test_transform_point_applies_rotation_then_offset() {
        let pose = Pose::new(Vec3::new(10.0, 20.0, 5.0), Rotator::from_yaw(90.0));

        let bow = pose.transform_point(Vec3::new(100.0, 0.0, 0.0));

        assert!((bow - Vec3::new(10.0, 120.0, 5.0)).length() < 1e-3, "{bow}");
        assert_eq!(pose.transform_point(Vec3::ZERO), pose.position);
    }

    #[test]
    fn test_drag_decay_is_framerate_independent() {
        let pose = Pose::from_position(Vec3::ZERO);
        let params = FloatParams::default();

        let mut coarse = FloatBody::new(pose.position, params);
        coarse.set_velocity(Vec3::new(100.0, 0.0, 0.0));
        let mut coarse_pose = pose;
        for _ in 0..30 {
            coarse_pose = coarse.tick(1.0 / 30.0, &coarse_pose, &calm(), 0.0);
        }

        let mut fine = FloatBody::new(pose.position, params);
        fine.set_velocity(Vec3::new(100.0, 0.0, 0.0));
        let mut fine_pose = pose;
        for _ in 0..120 {
            fine_pose = fine.tick(1.0 / 120.0, &fine_pose, &calm(), 0.0);
        }

        // One second at drag 0.4 leaves 40 % of the speed either way
        assert!((coarse.velocity().x - 40.0).abs() < 0.01);
        assert!((fine.velocity().x - 40.0).abs() < 0.01);
    }

    #[test]
    fn test_tilted_hull_levels_out_on_calm_water() {
        let mut pose = Pose::new(Vec3::ZERO, Rotator::new(30.0, 10.0, -8.0));
        let mut body = FloatBody::new(pose.position, FloatParams::default());

        for _ in 0..(60 * 6) {
            pose = body.tick(DT, &pose, &calm(), 0.0);
        }

        assert!(pose.rotation.pitch.abs() < 0.5, "{:?}", pose.rotation);
        assert!(pose.rotation.roll.abs() < 0.5, "{:?}", pose.rotation);
        // waves never turn the hull
        assert!((pose.rotation.yaw - 30.0).abs() < 1e-3, "{:?}", pose.rotation);
    }

    #[test]
    fn test_tilted_hull_slides_downhill() {
        // nose down: the up axis leans forward, so the hull slides forward
        let pose = Pose::new(Vec3::ZERO, Rotator::new(0.0, -10.0, 0.0));
        let mut body = FloatBody::new(pose.position, FloatParams::boat());

        body.tick(DT, &pose, &calm(), 0.0);

        assert!(body.velocity().x > 0.0);
    }

    #[test]
    fn test_airborne_body_spins_freely() {
        let pose = Pose::from_position(Vec3::new(0.0, 0.0, 500.0));
        let mut body = FloatBody::new(pose.position, FloatParams::default()).with_sea_level(0.0);
        body.set_yaw_velocity(90.0);

        let next = body.tick(0.5, &pose, &calm(), 0.0);

        assert!(body.is_airborne());
        assert!((next.rotation.yaw - 45.0).abs() < 1e-4);
        assert_eq!(body.yaw_velocity(), 90.0);
    }

    #[test]
    fn test_missing_field_behaves_like_flat_water() {
        let pose = Pose::from_position(Vec3::new(0.0, 0.0, -10.0));
        let mut with_none = FloatBody::new(pose.position, FloatParams::default()).with_sea_level(0.0);
        let mut with_calm = with_none.clone();

        let a = with_none.tick(DT, &pose, &None::<&WaveManager>, 0.0);
        let b = with_calm.tick(DT, &pose, &calm(), 0.0);

        assert_eq!(a, b);
    }
}
