use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::Parser;
use lander_simulation::constants::DEFAULT_MAX_SIMULATION_TIME;
use lander_simulation::control::scenarios;
use lander_simulation::telemetry_system::snapshot;
use lander_simulation::telemetry_system::telemetry::DEFAULT_SAMPLE_EVERY;
use lander_simulation::*;

#[derive(Parser, Debug)]
#[command(name = "mars-lander")]
#[command(about = "Mars lander descent simulator with autopilot")]
#[command(version)]
struct Args {
    /// Scenario index (0-9)
    #[arg(short, long, default_value_t = 1)]
    scenario: usize,

    /// List the scenarios and exit
    #[arg(long)]
    list: bool,

    /// Stop after this many simulated seconds
    #[arg(long, default_value_t = DEFAULT_MAX_SIMULATION_TIME)]
    max_time: f64,

    /// Force the autopilot on regardless of the scenario
    #[arg(long)]
    autopilot: bool,

    /// JSON file overriding physical constants
    #[arg(long)]
    constants: Option<PathBuf>,

    /// Resume from a saved state instead of a scenario
    #[arg(long)]
    load_state: Option<PathBuf>,

    /// Save the final state as JSON
    #[arg(long)]
    save_state: Option<PathBuf>,

    /// Write sampled telemetry as CSV
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Keep one telemetry sample every N ticks
    #[arg(long, default_value_t = DEFAULT_SAMPLE_EVERY)]
    sample_every: usize,
}

fn list_scenarios() {
    for (index, scenario) in SCENARIOS.iter().enumerate() {
        if scenario.is_reserved() {
            println!("{index}: (reserved)");
        } else {
            println!("{index}: {} - {}", scenario.name, scenario.description);
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if args.list {
        list_scenarios();
        return Ok(());
    }

    let constants = match &args.constants {
        Some(path) => snapshot::load_constants(path)?,
        None => PhysicalConstants::default(),
    };

    let mut state = match &args.load_state {
        Some(path) => snapshot::load_state(path)?,
        None => {
            let scenario = scenarios::scenario(args.scenario)?;
            log::info!("Scenario {}: {}", args.scenario, scenario.description);
            load_scenario(args.scenario)?
        }
    };
    if args.autopilot {
        state.autopilot_enabled = true;
    }

    let environment = MarsEnvironment::new(constants.clone());
    let mut simulation = Simulation::new(state, constants, environment)?
        .with_telemetry(Telemetry::new(args.sample_every));

    match simulation.run(args.max_time) {
        Ok(_) => simulation.telemetry.display_data(),
        Err(e) => {
            log::error!("Error during simulation step: {}", e);
            simulation.telemetry.display_data();
            return Err(e.into());
        }
    }

    if let Some(path) = &args.csv {
        let mut writer = BufWriter::new(File::create(path)?);
        simulation.telemetry.write_csv(&mut writer)?;
        log::info!("Telemetry written to {}", path.display());
    }

    if let Some(path) = &args.save_state {
        snapshot::save_state(&simulation.state, path)?;
        log::info!("Final state saved to {}", path.display());
    }

    Ok(())
}
