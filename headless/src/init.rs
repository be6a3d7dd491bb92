use std::time::Duration;

use bevy::app::ScheduleRunnerPlugin;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use ocean::{Boat, Buoy, OceanConfig, OceanPlugin, Pose};

/// Where the buoy is moored relative to the boat's spawn point.
const BUOY_OFFSET: Vec3 = Vec3::new(1500.0, 400.0, 0.0);

/// What to simulate and for how long.
#[derive(Resource, Debug, Clone)]
pub struct RunSettings {
    pub ticks: u32,
    pub tick_rate: u32,
    pub rudder: f32,
    pub sail: f32,
    pub oars: Option<f32>,
    pub report_every: u32,
}

/// Fixed ticks simulated so far.
#[derive(Resource, Debug, Default)]
pub struct TickCount(pub u32);

pub fn init(config: OceanConfig, settings: RunSettings) {
    let mut app = App::new();
    app.add_plugins(
        MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::ZERO)),
    );
    app.add_plugins(bevy::log::LogPlugin::default());

    info!(
        "Simulating {} ticks at {} Hz with {:?} waves",
        settings.ticks, settings.tick_rate, config.preset
    );

    setup(&mut app, config, settings);

    app.run();
}

/// Everything but the runner and logging, so tests can step the app by hand.
fn setup(app: &mut App, config: OceanConfig, settings: RunSettings) {
    // Time advances by exactly one tick per frame, however fast the host is
    let step = Duration::from_secs_f64(1.0 / settings.tick_rate as f64);
    app.insert_resource(Time::<Fixed>::from_duration(step));
    app.insert_resource(TimeUpdateStrategy::ManualDuration(step));

    app.add_plugins(OceanPlugin::new(config));
    app.insert_resource(settings);
    app.init_resource::<TickCount>();

    app.add_systems(Startup, spawn_bodies);
    app.add_systems(FixedPostUpdate, (report_poses, stop_after_run).chain());
}

fn spawn_bodies(mut commands: Commands, config: Res<OceanConfig>, settings: Res<RunSettings>) {
    let boat_pose = Pose::from_position(Vec3::ZERO);
    let mut boat = Boat::new(boat_pose.position, config.boat, config.boat_float);
    boat.steer_rudder(settings.rudder);
    boat.steer_sail(settings.sail);
    if let Some(oars) = settings.oars {
        boat.set_oars_out(true);
        boat.power_oars(oars);
    }
    commands.spawn((boat_pose, boat));

    let buoy_pose = Pose::from_position(BUOY_OFFSET);
    commands.spawn((buoy_pose, Buoy::new(buoy_pose.position, config.buoy)));

    debug!("Spawned boat at {} and buoy at {}", boat_pose.position, buoy_pose.position);
}

fn report_poses(
    mut ticks: ResMut<TickCount>,
    settings: Res<RunSettings>,
    time: Res<Time<Fixed>>,
    boats: Query<(&Pose, &Boat)>,
    buoys: Query<(&Pose, &Buoy)>,
) {
    ticks.0 += 1;
    if ticks.0 % settings.report_every != 0 && ticks.0 < settings.ticks {
        return;
    }

    let elapsed = time.elapsed_secs();
    for (pose, boat) in &boats {
        let drive = boat.last_drive();
        info!(
            "[{:>7.2}s] boat at ({:.1}, {:.1}, {:.1}) yaw {:.1} pitch {:.1} roll {:.1}, speed {:.1}, power {:.1}, wind {:.0} off the bow",
            elapsed,
            pose.position.x,
            pose.position.y,
            pose.position.z,
            pose.rotation.yaw,
            pose.rotation.pitch,
            pose.rotation.roll,
            boat.forward_speed(pose),
            drive.power,
            drive.relative_wind_yaw,
        );
    }
    for (pose, buoy) in &buoys {
        info!(
            "[{:>7.2}s] buoy at height {:.1}, vane {:.0}, compass {:.0}",
            elapsed,
            pose.position.z,
            buoy.vane_yaw(),
            buoy.compass_yaw(),
        );
    }
}

fn stop_after_run(
    ticks: Res<TickCount>,
    settings: Res<RunSettings>,
    mut exit: EventWriter<AppExit>,
) {
    if ticks.0 >= settings.ticks {
        info!("Finished after {} ticks", ticks.0);
        exit.write(AppExit::Success);
    }
}
