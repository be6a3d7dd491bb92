//! Bevy plugin that steps boats and buoys against the shared wave field.

use bevy::prelude::*;

use crate::boat::Boat;
use crate::buoy::Buoy;
use crate::config::OceanConfig;
use crate::physics::Pose;
use crate::sets::SimulationSet;
use crate::waves::WaveManager;

/// World wind vector. Its heading drives sails and vanes, its length scales
/// sail power.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Default)]
pub struct Wind(pub Vec3);

/// Plugin that adds the ocean simulation to an app.
///
/// This plugin:
/// - Builds the [`WaveManager`] and [`Wind`] resources from its config
/// - Smooths boat controls, applies propulsion and floats every [`Boat`]
/// - Floats every [`Buoy`] and swings its vane
///
/// Everything runs in `FixedUpdate`, ordered by [`SimulationSet`].
#[derive(Default)]
pub struct OceanPlugin {
    pub config: OceanConfig,
}

impl OceanPlugin {
    pub fn new(config: OceanConfig) -> Self {
        Self { config }
    }
}

impl Plugin for OceanPlugin {
    fn build(&self, app: &mut App) {
        let waves = self.config.build_wave_manager();
        log::debug!("Ocean plugin starting with {} wave forms", waves.len());

        app.insert_resource(waves)
            .insert_resource(Wind(self.config.wind))
            .insert_resource(self.config.clone())
            .configure_sets(
                FixedUpdate,
                (
                    SimulationSet::Controls,
                    SimulationSet::Propulsion,
                    SimulationSet::Float,
                )
                    .chain(),
            )
            .add_systems(
                FixedUpdate,
                (
                    update_boat_controls.in_set(SimulationSet::Controls),
                    drive_boats.in_set(SimulationSet::Propulsion),
                    (float_boats, float_buoys).in_set(SimulationSet::Float),
                ),
            );
    }
}

fn update_boat_controls(time: Res<Time<Fixed>>, mut boats: Query<&mut Boat>) {
    let delta = time.delta_secs();
    if delta <= 0.0 {
        return;
    }
    for mut boat in &mut boats {
        boat.update_controls(delta);
    }
}

fn drive_boats(time: Res<Time<Fixed>>, wind: Res<Wind>, mut boats: Query<(&Pose, &mut Boat)>) {
    let delta = time.delta_secs();
    if delta <= 0.0 {
        return;
    }
    for (pose, mut boat) in &mut boats {
        boat.drive(delta, pose, wind.0);
    }
}

fn float_boats(
    time: Res<Time<Fixed>>,
    waves: Res<WaveManager>,
    mut boats: Query<(&mut Pose, &mut Boat)>,
) {
    let delta = time.delta_secs();
    let game_time = time.elapsed_secs();
    for (mut pose, mut boat) in &mut boats {
        *pose = boat.float(delta, &pose, &*waves, game_time);
    }
}

fn float_buoys(
    time: Res<Time<Fixed>>,
    waves: Res<WaveManager>,
    wind: Res<Wind>,
    mut buoys: Query<(&mut Pose, &mut Buoy)>,
) {
    let delta = time.delta_secs();
    let game_time = time.elapsed_secs();
    for (mut pose, mut buoy) in &mut buoys {
        *pose = buoy.tick(delta, &pose, &*waves, wind.0, game_time);
    }
}
