use clap::Parser;
use log::{debug, error, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use schedsim::config::{Config, CONFIG_FILE};
use schedsim::error::Error;
use schedsim::report::Report;
use schedsim::simulator::{Policy, Scheduler, SimulationState};
use schedsim::{logger, parser, traffic};

/// Simulate CPU scheduling over a generated workload.
#[derive(Debug, Parser)]
#[command(name = "schedsim", version)]
struct Cli {
    /// Scheduling algorithm: FCFS, RR or SJF
    algorithm: Scheduler,
    /// Number of processes to generate
    process_count: u32,
    /// Round robin time slice
    #[arg(long)]
    quantum: Option<u32>,
    /// Seed for the traffic generator
    #[arg(long)]
    seed: Option<u64>,
    /// Workload file to write and read back
    #[arg(long)]
    traffic: Option<PathBuf>,
    /// Print a status line every tick
    #[arg(long)]
    status: bool,
    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Read the config file, if no file is found use the default config
    let (config, config_error) = match Config::load(Path::new(CONFIG_FILE)) {
        Ok(config) => (config, None),
        Err(error) => (Config::default(), Some(error)),
    };

    if let Err(error) = logger::init(config.log_level) {
        eprintln!("Could not install logger: {}", error);
    }
    if let Some(error) = config_error {
        warn!("Ignoring {}: {}", CONFIG_FILE, error);
    }

    match run(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!("{}", error);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, config: Config) -> Result<(), Error> {
    let quantum = cli.quantum.unwrap_or(config.quantum);
    let policy = Policy::new(cli.algorithm, quantum)?;
    let traffic_file = cli.traffic.unwrap_or(config.traffic_file);
    let show_status = cli.status || config.show_status;

    let mut rng = match cli.seed.or(config.seed) {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    // Generate sample traffic for the scheduler
    let descriptors = traffic::generate(cli.process_count, &mut rng);
    tokio::fs::write(&traffic_file, parser::to_text(&descriptors)).await?;
    debug!(
        "Wrote {} processes to {}",
        descriptors.len(),
        traffic_file.display()
    );

    // Read traffic and load processes
    let contents = tokio::fs::read(&traffic_file).await?;
    let workload = parser::read_file(&contents)?;
    info!("Loaded {} processes", workload.len());

    let state = SimulationState::new(&workload, policy);
    let statistics = if show_status {
        state.run_with(|status| println!("{}", status))
    } else {
        state.run()
    };

    let report = Report::new(statistics);
    if cli.json {
        let json = report
            .to_json()
            .map_err(|error| Error::Report(error.to_string()))?;
        println!("{}", json);
    } else {
        println!("{}", report);
    }

    Ok(())
}
