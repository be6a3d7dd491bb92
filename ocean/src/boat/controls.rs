//! Control targets set by the input layer and the smoothed part positions
//! that follow them.

use super::propulsion::smooth_toward;
use super::BoatParams;

#[derive(Debug, Clone, PartialEq)]
pub struct BoatControls {
    pub(crate) rudder_target: f32,
    pub(crate) rudder_position: f32,
    pub(crate) sail_target: f32,
    pub(crate) sail_position: f32,
    pub(crate) sail_raised: f32,
    pub(crate) sail_going_up: bool,
    pub(crate) jib_raised: f32,
    pub(crate) jib_going_up: bool,
    pub(crate) oars_out: bool,
    pub(crate) oar_power: f32,
    pub(crate) lens_yaw_target: f32,
    pub(crate) lens_pitch_target: f32,
    pub(crate) lens_yaw: f32,
    pub(crate) lens_pitch: f32,
}

impl Default for BoatControls {
    /// Rudder and sail centred, both sails hoisted, oars stowed.
    fn default() -> Self {
        Self {
            rudder_target: 0.0,
            rudder_position: 0.0,
            sail_target: 0.0,
            sail_position: 0.0,
            sail_raised: 1.0,
            sail_going_up: true,
            jib_raised: 1.0,
            jib_going_up: true,
            oars_out: false,
            oar_power: 0.0,
            lens_yaw_target: 0.0,
            lens_pitch_target: 0.0,
            lens_yaw: 0.0,
            lens_pitch: 0.0,
        }
    }
}

impl BoatControls {
    /// Move every smoothed value toward its target.
    pub fn update(&mut self, params: &BoatParams, delta: f32) {
        self.rudder_position = smooth_toward(
            self.rudder_position,
            self.rudder_target,
            params.rudder_resist,
            delta,
        );
        self.sail_position =
            smooth_toward(self.sail_position, self.sail_target, params.sail_resist, delta);
        self.lens_yaw = smooth_toward(self.lens_yaw, self.lens_yaw_target, params.lens_resist, delta);
        self.lens_pitch = smooth_toward(
            self.lens_pitch,
            self.lens_pitch_target,
            params.lens_resist,
            delta,
        );

        self.sail_raised = hoist(self.sail_raised, self.sail_going_up, delta);
        self.jib_raised = hoist(self.jib_raised, self.jib_going_up, delta);
    }

    pub fn rudder_target(&self) -> f32 {
        self.rudder_target
    }

    pub fn rudder_position(&self) -> f32 {
        self.rudder_position
    }

    pub fn sail_target(&self) -> f32 {
        self.sail_target
    }

    pub fn sail_position(&self) -> f32 {
        self.sail_position
    }

    pub fn sail_raised(&self) -> f32 {
        self.sail_raised
    }

    pub fn sail_going_up(&self) -> bool {
        self.sail_going_up
    }

    pub fn jib_raised(&self) -> f32 {
        self.jib_raised
    }

    pub fn jib_going_up(&self) -> bool {
        self.jib_going_up
    }

    pub fn oars_out(&self) -> bool {
        self.oars_out
    }

    pub fn oar_power(&self) -> f32 {
        self.oar_power
    }

    /// Smoothed lens aim as (yaw, pitch).
    pub fn lens(&self) -> (f32, f32) {
        (self.lens_yaw, self.lens_pitch)
    }

    pub fn lens_target(&self) -> (f32, f32) {
        (self.lens_yaw_target, self.lens_pitch_target)
    }
}

/// Raise or lower a sail at one full height per second.
fn hoist(raised: f32, going_up: bool, delta: f32) -> f32 {
    if going_up {
        (raised + delta).min(1.0)
    } else {
        (raised - delta).max(0.0)
    }
}
