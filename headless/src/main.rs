use std::path::PathBuf;

use clap::Parser;
use ocean::{OceanConfig, TICKS_PER_SECOND};

use crate::init::RunSettings;

mod init;

/// Sail a boat past a buoy without a window and log where they end up.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Ron file with sea state, wind and tuning
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Simulated seconds to run
    #[arg(short, long, default_value_t = 10.0)]
    seconds: f32,

    /// Fixed simulation rate in Hz
    #[arg(short, long, default_value_t = TICKS_PER_SECOND)]
    tick_rate: u32,

    /// Rudder input, -1 to 1
    #[arg(short, long, default_value_t = 0.0, allow_hyphen_values = true)]
    rudder: f32,

    /// Main sail angle in degrees relative to the hull
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    sail: f32,

    /// Deploy the oars and pull with this power, -1 to 1
    #[arg(short, long, allow_hyphen_values = true)]
    oars: Option<f32>,

    /// Ticks between pose reports
    #[arg(long, default_value_t = TICKS_PER_SECOND)]
    report_every: u32,

    /// Print the default config as ron and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() {
    let args = Args::parse();

    if args.print_default_config {
        match OceanConfig::default().to_ron_string() {
            Ok(text) => println!("{text}"),
            Err(err) => {
                eprintln!("Error: {err}");
                std::process::exit(1);
            }
        }
        return;
    }

    if !(args.seconds.is_finite() && args.seconds > 0.0) {
        eprintln!("Error: seconds must be a positive number.");
        eprintln!("Got: {}", args.seconds);
        std::process::exit(1);
    }

    if args.tick_rate < 1 || args.tick_rate > 1000 {
        eprintln!("Error: tick_rate must be between 1 and 1000 (inclusive).");
        eprintln!("Got: {}", args.tick_rate);
        std::process::exit(1);
    }

    if args.report_every < 1 {
        eprintln!("Error: report_every must be at least 1.");
        std::process::exit(1);
    }

    let config = match &args.config {
        Some(path) => match OceanConfig::load(path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("Error loading {}: {err}", path.display());
                std::process::exit(1);
            }
        },
        None => OceanConfig::default(),
    };

    let ticks = (args.seconds * args.tick_rate as f32).round().max(1.0) as u32;

    init::init(
        config,
        RunSettings {
            ticks,
            tick_rate: args.tick_rate,
            rudder: args.rudder,
            sail: args.sail,
            oars: args.oars,
            report_every: args.report_every,
        },
    );
}
