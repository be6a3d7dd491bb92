//! Navigation buoy: a passive float carrying a wind vane and a compass.

use bevy::math::{Vec2, Vec3};
use bevy::prelude::Component;
use serde::{Deserialize, Serialize};

use crate::boat::propulsion::smooth_toward;
use crate::physics::{FloatBody, FloatParams, Pose, Rotator};
use crate::waves::WaveField;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuoyParams {
    pub float: FloatParams,
    /// Fraction of the vane and compass error left after one second
    pub vane_resist: f32,
}

impl Default for BuoyParams {
    fn default() -> Self {
        Self {
            float: FloatParams::default(),
            vane_resist: 0.4,
        }
    }
}

#[derive(Debug, Clone, Component)]
pub struct Buoy {
    pub params: BuoyParams,
    float: FloatBody,
    /// Vane yaw relative to the buoy body
    vane_yaw: f32,
    /// Compass card yaw relative to the buoy body; 0 on the card points +X
    compass_yaw: f32,
}

impl Buoy {
    pub fn new(position: Vec3, params: BuoyParams) -> Self {
        Self::with_float(params, FloatBody::new(position, params.float))
    }

    pub fn with_float(params: BuoyParams, float: FloatBody) -> Self {
        Self {
            params,
            float,
            vane_yaw: 0.0,
            compass_yaw: 0.0,
        }
    }

    pub fn float_body(&self) -> &FloatBody {
        &self.float
    }

    pub fn float_body_mut(&mut self) -> &mut FloatBody {
        &mut self.float
    }

    pub fn vane_yaw(&self) -> f32 {
        self.vane_yaw
    }

    pub fn compass_yaw(&self) -> f32 {
        self.compass_yaw
    }

    pub fn vane_world_rotation(&self, pose: &Pose) -> Rotator {
        pose.rotation + Rotator::from_yaw(self.vane_yaw)
    }

    /// Float the buoy and swing the vane and compass toward wind and north.
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

        let next = self.float.tick(delta, pose, field, game_time);

        let yaw = next.rotation.yaw;
        let resist = self.params.vane_resist;
        if wind.truncate() != Vec2::ZERO {
            let wind_yaw = wind.y.atan2(wind.x).to_degrees();
            self.vane_yaw = swing(self.vane_yaw, wind_yaw - yaw, resist, delta);
        }
        self.compass_yaw = swing(self.compass_yaw, -yaw, resist, delta);

        next
    }
}

/// Smooth an angle toward `target` along the shorter way round.
fn swing(current: f32, target: f32, resist: f32, delta: f32) -> f32 {
    let target = Rotator::normalize_axis(target);
    let unwrapped = target + Rotator::normalize_axis(current - target);
    Rotator::normalize_axis(smooth_toward(unwrapped, target, resist, delta))
}
