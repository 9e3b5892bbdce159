//=========================================================================
// Autobus binary
//=========================================================================
//
// Parses the command line, initialises logging, loads the config and
// hands over to the engine. Any start-up failure exits with -1.
//
//=========================================================================

use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::{error, info};

use autobus::{AppError, Config, EngineBuilder};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "autobus")]
#[command(about = "A bus looping an elliptical route of stations")]
struct Args {
    /// Configuration file; defaults are used when it does not exist
    #[arg(long, default_value = autobus::config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Random seed for the path wiggle and inspection penalties
    #[arg(long)]
    seed: Option<u64>,

    /// Simulate this many seconds without a window, then exit
    #[arg(long)]
    headless_seconds: Option<f32>,
}

fn run(args: Args) -> Result<(), AppError> {
    let mut config = Config::load_or_default(&args.config)?;
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    let engine = EngineBuilder::new(config).build();
    match args.headless_seconds {
        Some(seconds) => {
            let summary = engine.run_headless(seconds)?;
            info!(
                "Simulated {} frames: {} departures, {} arrivals, at station {} with {} on board",
                summary.frames, summary.departures, summary.arrivals, summary.station, summary.passengers
            );
            Ok(())
        }
        None => engine.run(),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(e) = run(args) {
        error!("{}", e);
        eprintln!("autobus: {}", e);
        process::exit(-1);
    }
}
