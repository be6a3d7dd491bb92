//! Drive model: wind on the sails and oars in the water turned into a scalar
//! forward power.

use bevy::math::Vec3;

use crate::constants::{INTERP_SNAP_EPSILON, POWER_FALLOFF_GAIN};
use crate::physics::Rotator;

/// Response curve for raw sail/oar force.
///
/// `10x / sqrt|x|`, so light winds give relatively more power than strong
/// ones and a boat at rest can get going.
pub fn sail_power_falloff(value: f32) -> f32 {
    if value != 0.0 {
        (value * POWER_FALLOFF_GAIN) / value.abs().sqrt()
    } else {
        0.0
    }
}

/// Wind caught by one sail and the raw drive it transfers to the hull.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SailDrive {
    /// `wind · facing`, scaled by how far the sail is raised
    pub wind_power: f32,
    /// Force along the hull's forward axis before the response curve
    pub drive: f32,
}

/// Evaluate one sail.
///
/// `deflection` is the sail's yaw relative to the hull, `raised` the hoisted
/// fraction. `power` applies when the wind fills the sail from behind,
/// `back_power` when it pushes on the front.
pub fn sail_drive(
    hull: Rotator,
    deflection: f32,
    raised: f32,
    wind: Vec3,
    power: f32,
    back_power: f32,
) -> SailDrive {
    let facing = (hull + Rotator::from_yaw(deflection)).forward();
    let wind_power = wind.dot(facing) * raised;
    let coefficient = if wind_power > 0.0 { power } else { back_power };
    let drive = (facing * (coefficient * wind_power)).dot(hull.forward());

    SailDrive { wind_power, drive }
}

/// Combine sail power with the oars.
///
/// Oars add their power up to their own commanded magnitude when the sails
/// are not already doing better in that direction. With oars out the result
/// is always pulled toward the oar power by `oar_resist`, so oars held
/// against a strong sail act as a brake.
pub fn blend_oar_power(sail_power: f32, oar_power: f32, oar_resist: f32) -> f32 {
    let mut power = sail_power;

    let oars_help = (oar_power > 0.0 && power < oar_power) || (oar_power < 0.0 && power > oar_power);
    if oars_help {
        power += oar_power;
        if (oar_power > 0.0 && power > oar_power) || (oar_power < 0.0 && power < oar_power) {
            power = oar_power;
        }
    }

    oar_power + oar_resist * (power - oar_power)
}

/// Yaw rate the rudder asks for. Authority scales with forward speed, so a
/// boat at rest does not turn.
#[inline]
pub fn commanded_yaw_rate(rudder: f32, steering_speed: f32, forward_speed: f32) -> f32 {
    rudder * steering_speed * forward_speed
}

/// Move `current` toward `target` by at most `rate * delta`.
pub fn interp_constant_to(current: f32, target: f32, delta: f32, rate: f32) -> f32 {
    let distance = target - current;
    if distance * distance < INTERP_SNAP_EPSILON {
        return target;
    }
    let step = (rate * delta).abs();
    current + distance.max(-step).min(step)
}

/// Framerate-independent exponential approach: the fraction of the gap left
/// after one second is `resist`.
#[inline]
pub fn smooth_toward(current: f32, target: f32, resist: f32, delta: f32) -> f32 {
    let alpha = resist.powf(delta);
    target + (current - target) * alpha
}
