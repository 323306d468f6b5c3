//! Loads a vehicle description, then steps the rover dynamics forward under a constant thruster command and logs the
//! trajectory. Stands in for the flight software's integrator when exercising the dynamics on a desktop.
//!
//! ```bash
//! rover-sim --thrust 10,10,0,0,0 --steps 2000 --dt 0.005
//! rover-sim --config vehicle.json --log-level debug
//! ```
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use rover_physics::{Rover, VehicleConfig, REFERENCE_THRUSTER_COUNT};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

mod sim;

/// Underwater rover 6DOF dynamics simulator
#[derive(Parser, Debug)]
#[command(name = "rover-sim")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Vehicle description (JSON). Uses the built-in reference rover when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Integration time step [s]
    #[arg(long, default_value_t = 0.01)]
    dt: f64,

    /// Number of steps to run
    #[arg(short, long, default_value_t = 1000)]
    steps: usize,

    /// Thruster commands [N], comma separated, one per thruster
    #[arg(short, long, value_delimiter = ',', allow_hyphen_values = true, default_values_t = [0.0; REFERENCE_THRUSTER_COUNT])]
    thrust: Vec<f64>,

    /// Re-orthonormalise the attitude every this many steps
    #[arg(long, default_value_t = 10)]
    renormalise_every: usize,

    /// Log the state every this many steps
    #[arg(long, default_value_t = 100)]
    print_every: usize,

    /// Write the reference vehicle description as JSON to stdout and exit
    #[arg(long)]
    dump_reference: bool,

    /// Logging verbosity level
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    if cli.dump_reference {
        println!("{}", VehicleConfig::reference().to_json_string()?);
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => VehicleConfig::load(path)
            .with_context(|| format!("loading vehicle config {}", path.display()))?,
        None => VehicleConfig::reference(),
    };
    let mut rover: Rover = config.build()?;

    let Ok(thrusts) = <[f64; REFERENCE_THRUSTER_COUNT]>::try_from(cli.thrust.as_slice()) else {
        bail!(
            "expected {REFERENCE_THRUSTER_COUNT} thruster commands, got {}",
            cli.thrust.len()
        );
    };

    info!("rover-sim v{}", env!("CARGO_PKG_VERSION"));
    info!(?thrusts, dt = cli.dt, steps = cli.steps, "starting simulation");

    let settings = sim::Settings {
        dt: cli.dt,
        steps: cli.steps,
        renormalise_every: cli.renormalise_every,
        print_every: cli.print_every,
    };
    sim::simulate(&mut rover, &thrusts, &settings)?;
    Ok(())
}
