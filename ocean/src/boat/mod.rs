//! Player boat: sails, oars and rudder on top of a [`FloatBody`].
//!
//! Each tick runs in a fixed order:
//! 1. [`Boat::update_controls`] smooths rudder, sail, lens and hoists
//! 2. [`Boat::drive`] turns wind and oars into forward power and a yaw command
//! 3. [`Boat::float`] integrates the hull against the wave field
//!
//! [`Boat::tick`] runs all three.

pub mod controls;
pub mod propulsion;

use bevy::math::Vec3;
use bevy::prelude::Component;
use serde::{Deserialize, Serialize};

use crate::physics::{FloatBody, FloatParams, Pose, Rotator};
use crate::waves::WaveField;
pub use controls::BoatControls;
use propulsion::{
    blend_oar_power, commanded_yaw_rate, interp_constant_to, sail_drive, sail_power_falloff,
};

/// Boat tuning. Angles in degrees, resist values are the fraction of the
/// gap to the target left after one second.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoatParams {
    pub rudder_resist: f32,
    /// Yaw rate per unit of rudder per unit of forward speed
    pub steering_speed: f32,
    /// Largest change of yaw rate per second
    pub turn_rate: f32,

    pub sail_resist: f32,
    pub sail_max_rotation: f32,
    pub sail_power: f32,
    pub sail_back_power: f32,

    /// Fixed jib deflection relative to the hull
    pub jib_sail_position: f32,
    pub jib_sail_power: f32,
    pub jib_sail_back_power: f32,

    pub oar_power_max: f32,
    pub oar_resist: f32,

    pub lens_resist: f32,
    pub lens_yaw_max: f32,
    pub lens_pitch_min: f32,
    pub lens_pitch_max: f32,
}

impl Default for BoatParams {
    fn default() -> Self {
        Self {
            rudder_resist: 0.5,
            steering_speed: 0.1,
            turn_rate: 180.0,
            sail_resist: 0.25,
            sail_max_rotation: 90.0,
            sail_power: 9.0,
            sail_back_power: 3.0,
            jib_sail_position: -40.0,
            jib_sail_power: 3.5,
            jib_sail_back_power: 0.5,
            oar_power_max: 50.0,
            oar_resist: 0.65,
            lens_resist: 0.3,
            lens_yaw_max: 90.0,
            lens_pitch_min: -20.0,
            lens_pitch_max: 80.0,
        }
    }
}

/// What the drive model produced on the last tick, for animation rigs.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DriveReport {
    pub main_wind_power: f32,
    pub jib_wind_power: f32,
    /// Wind heading relative to the hull, in `(-180, 180]`
    pub relative_wind_yaw: f32,
    /// Forward power after the response curve and oars
    pub power: f32,
}

#[derive(Debug, Clone, Component)]
pub struct Boat {
    pub params: BoatParams,
    controls: BoatControls,
    float: FloatBody,
    last_drive: DriveReport,
}

impl Boat {
    pub fn new(position: Vec3, params: BoatParams, float_params: FloatParams) -> Self {
        Self::with_float(params, FloatBody::new(position, float_params))
    }

    pub fn with_float(params: BoatParams, float: FloatBody) -> Self {
        Self {
            params,
            controls: BoatControls::default(),
            float,
            last_drive: DriveReport::default(),
        }
    }

    pub fn controls(&self) -> &BoatControls {
        &self.controls
    }

    pub fn float_body(&self) -> &FloatBody {
        &self.float
    }

    pub fn float_body_mut(&mut self) -> &mut FloatBody {
        &mut self.float
    }

    pub fn last_drive(&self) -> DriveReport {
        self.last_drive
    }

    // Inputs. Out-of-range values are clamped, never rejected. Limits taken
    // from config are read as magnitudes or sorted, so any tuning is usable.

    /// Rudder input in `[-1, 1]`.
    pub fn steer_rudder(&mut self, value: f32) {
        self.controls.rudder_target = value.clamp(-1.0, 1.0);
    }

    /// Main sail angle in degrees, limited to `±sail_max_rotation`.
    pub fn steer_sail(&mut self, angle: f32) {
        let max = self.params.sail_max_rotation.abs();
        self.controls.sail_target = angle.max(-max).min(max);
    }

    pub fn steer_lens(&mut self, yaw: f32, pitch: f32) {
        let max = self.params.lens_yaw_max.abs();
        self.controls.lens_yaw_target = yaw.max(-max).min(max);

        let (low, high) = (self.params.lens_pitch_min, self.params.lens_pitch_max);
        self.controls.lens_pitch_target = pitch.max(low.min(high)).min(low.max(high));
    }

    /// Oar input in `[-1, 1]`. Ignored while the oars are stowed, except for
    /// zero which always resets.
    pub fn power_oars(&mut self, value: f32) {
        if self.controls.oars_out || value == 0.0 {
            self.controls.oar_power = value.clamp(-1.0, 1.0) * self.params.oar_power_max;
        }
    }

    /// Deploy or stow the oars. Oars always come out idle.
    pub fn set_oars_out(&mut self, out: bool) {
        self.controls.oars_out = out;
        self.power_oars(0.0);
    }

    pub fn set_sail_up(&mut self, up: bool) {
        self.controls.sail_going_up = up;
    }

    pub fn set_jib_sail_up(&mut self, up: bool) {
        self.controls.jib_going_up = up;
    }

    // Part readouts for rigs and touch zones.

    pub fn sail_world_rotation(&self, pose: &Pose) -> Rotator {
        pose.rotation + Rotator::from_yaw(self.controls.sail_position)
    }

    pub fn jib_world_rotation(&self, pose: &Pose) -> Rotator {
        pose.rotation + Rotator::from_yaw(self.params.jib_sail_position)
    }

    pub fn lens_yaw_world_rotation(&self, pose: &Pose) -> Rotator {
        pose.rotation + Rotator::from_yaw(self.controls.lens_yaw)
    }

    /// Forward component of the hull velocity.
    pub fn forward_speed(&self, pose: &Pose) -> f32 {
        self.float.velocity().dot(pose.forward())
    }

    pub fn update_controls(&mut self, delta: f32) {
        self.controls.update(&self.params, delta);
    }

    /// Apply sail and oar power to the hull and steer its yaw rate toward
    /// the rudder command.
    pub fn drive(&mut self, delta: f32, pose: &Pose, wind: Vec3) -> DriveReport {
        let params = &self.params;
        let controls = &self.controls;

        let main = sail_drive(
            pose.rotation,
            controls.sail_position,
            controls.sail_raised,
            wind,
            params.sail_power,
            params.sail_back_power,
        );
        let jib = sail_drive(
            pose.rotation,
            params.jib_sail_position,
            controls.jib_raised,
            wind,
            params.jib_sail_power,
            params.jib_sail_back_power,
        );

        let mut power = sail_power_falloff(main.drive) + sail_power_falloff(jib.drive);
        if controls.oars_out {
            power = blend_oar_power(power, controls.oar_power, params.oar_resist);
        }

        let forward = pose.forward();
        self.float
            .set_velocity(self.float.velocity() + forward * power * delta);

        let target = commanded_yaw_rate(
            controls.rudder_position,
            params.steering_speed,
            self.float.velocity().dot(forward),
        );
        let yaw_velocity =
            interp_constant_to(self.float.yaw_velocity(), target, delta, params.turn_rate);
        self.float.set_yaw_velocity(yaw_velocity);

        let wind_heading = wind.y.atan2(wind.x).to_degrees();
        self.last_drive = DriveReport {
            main_wind_power: main.wind_power,
            jib_wind_power: jib.wind_power,
            relative_wind_yaw: Rotator::normalize_axis(wind_heading - pose.rotation.yaw),
            power,
        };
        log::trace!(
            "Main sail power = {}, jib power = {}, total power = {}",
            main.wind_power,
            jib.wind_power,
            power
        );

        self.last_drive
    }

    pub fn float(
        &mut self,
        delta: f32,
        pose: &Pose,
        field: &impl WaveField,
        game_time: f32,
    ) -> Pose {
        self.float.tick(delta, pose, field, game_time)
    }

    /// Full boat update: controls, drive, then float.
    pub fn tick(
        &mut self,
        delta: f32,
        pose: &Pose,
        field: &impl WaveField,
        wind: Vec3,
        game_time: f32,
    ) -> Pose {
        if delta <= 0.0 {
            return *pose;
        }
        self.update_controls(delta);
        self.drive(delta, pose, wind);
        self.float(delta, pose, field, game_time)
    }
}
