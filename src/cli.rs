//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use crate::adapters::csv_adapter::CsvHistoryAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::config_validation::{validate_simulation_config, validate_web_config};
use crate::domain::error::SimError;
use crate::domain::market::Market;
use crate::domain::player::DEFAULT_INITIAL_CASH;
use crate::domain::scheduler::{DEFAULT_INTERVAL, MIN_INTERVAL};
use crate::domain::simulation::{DEFAULT_LISTEN, SimulationConfig};
use crate::domain::universe::{default_universe, parse_listings};
use crate::ports::config_port::ConfigPort;
use crate::ports::history_port::HistoryPort;

#[derive(Parser, Debug)]
#[command(name = "stocksim", about = "Toy stock market simulator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the web server
    Serve {
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Address to listen on, overrides [web] listen
        #[arg(long)]
        listen: Option<SocketAddr>,
        /// Seconds between price updates, overrides [simulation] interval_secs
        #[arg(long)]
        interval: Option<f64>,
        /// Start the price timer immediately
        #[arg(long)]
        autostart: bool,
    },
    /// Run update cycles offline and write the price history as CSV
    Simulate {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long, default_value_t = 10)]
        cycles: u64,
        #[arg(long)]
        seed: Option<u64>,
        /// Output file; standard output when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Serve {
            config,
            listen,
            interval,
            autostart,
        } => run_serve(config.as_ref(), listen, interval, autostart),
        Command::Simulate {
            config,
            cycles,
            seed,
            output,
        } => run_simulate(config.as_ref(), cycles, seed, output.as_ref()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            (&e).into()
        }
    }
}

/// Install the global tracing subscriber. `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("stocksim=info,tower_http=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

pub fn load_config(path: Option<&PathBuf>) -> Result<FileConfigAdapter, SimError> {
    match path {
        Some(path) => {
            tracing::info!("loading config from {}", path.display());
            FileConfigAdapter::from_file(path)
        }
        None => Ok(FileConfigAdapter::empty()),
    }
}

pub fn build_simulation_config(adapter: &dyn ConfigPort) -> Result<SimulationConfig, SimError> {
    validate_simulation_config(adapter)?;
    validate_web_config(adapter)?;

    let interval = interval_from_secs(
        adapter.get_double("simulation", "interval_secs", DEFAULT_INTERVAL.as_secs_f64()),
        "simulation",
        "interval_secs",
    )?;

    let listings = match adapter.get_string("simulation", "stocks") {
        Some(raw) => parse_listings(&raw)?,
        None => default_universe(),
    };

    let listen = adapter
        .get_string("web", "listen")
        .unwrap_or_else(|| DEFAULT_LISTEN.to_string())
        .trim()
        .parse()
        .map_err(|e: std::net::AddrParseError| SimError::ConfigInvalid {
            section: "web".into(),
            key: "listen".into(),
            reason: e.to_string(),
        })?;

    Ok(SimulationConfig {
        interval,
        initial_cash: adapter.get_double("simulation", "initial_cash", DEFAULT_INITIAL_CASH),
        listings,
        listen,
    })
}

fn apply_interval_override(
    config: &mut SimulationConfig,
    interval: Option<f64>,
) -> Result<(), SimError> {
    if let Some(secs) = interval {
        config.interval = interval_from_secs(secs, "cli", "interval")?;
    }
    Ok(())
}

/// Convert seconds to a timer period, rejecting anything shorter than
/// [`MIN_INTERVAL`] or too large to represent.
fn interval_from_secs(secs: f64, section: &str, key: &str) -> Result<Duration, SimError> {
    Duration::try_from_secs_f64(secs)
        .ok()
        .filter(|d| *d >= MIN_INTERVAL)
        .ok_or_else(|| SimError::ConfigInvalid {
            section: section.into(),
            key: key.into(),
            reason: format!("{secs} is not a usable interval, the minimum is 0.001 seconds"),
        })
}

/// Build a market from `config` and run `cycles` update cycles on it.
///
/// With a seed the run is reproducible.
pub fn run_simulation(config: &SimulationConfig, cycles: u64, seed: Option<u64>) -> Market {
    let mut market = Market::new(&config.listings);
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    for _ in 0..cycles {
        market.update_market_with(&mut rng);
    }
    market
}

fn run_simulate(
    config_path: Option<&PathBuf>,
    cycles: u64,
    seed: Option<u64>,
    output: Option<&PathBuf>,
) -> Result<(), SimError> {
    let adapter = load_config(config_path)?;
    let config = build_simulation_config(&adapter)?;

    tracing::info!(cycles, ?seed, stocks = config.listings.len(), "running offline simulation");
    let market = run_simulation(&config, cycles, seed);

    CsvHistoryAdapter::new().write(&market, output.map(PathBuf::as_path))?;
    if let Some(path) = output {
        tracing::info!("history written to {}", path.display());
    }
    Ok(())
}

fn run_serve(
    config_path: Option<&PathBuf>,
    listen: Option<SocketAddr>,
    interval: Option<f64>,
    autostart: bool,
) -> Result<(), SimError> {
    let adapter = load_config(config_path)?;
    let mut config = build_simulation_config(&adapter)?;
    apply_interval_override(&mut config, interval)?;
    if let Some(addr) = listen {
        config.listen = addr;
    }
    let autostart = autostart || adapter.get_bool("simulation", "autostart", false);

    serve_simulation(config, autostart)
}

#[cfg(feature = "web")]
fn serve_simulation(config: SimulationConfig, autostart: bool) -> Result<(), SimError> {
    use crate::adapters::web::{AppState, serve};
    use crate::domain::simulation::Simulation;

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let state = AppState::new(Simulation::new(&config));
        tracing::info!(
            stocks = config.listings.len(),
            interval_secs = config.interval.as_secs_f64(),
            initial_cash = config.initial_cash,
            "simulation ready"
        );
        if autostart {
            state.simulation.start();
        }
        serve(state, config.listen).await
    })
}

#[cfg(not(feature = "web"))]
fn serve_simulation(config: SimulationConfig, autostart: bool) -> Result<(), SimError> {
    let _ = (config, autostart);
    Err(SimError::Server {
        reason: "web feature is required for serve".into(),
    })
}
