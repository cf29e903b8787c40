use std::path::{Path, PathBuf};

use chrono::Utc;
use clap::{Parser, Subcommand};
use sv_app::{AppError, AppResult, HistoryDump, RelayDump, config_service, switch_history_from};
use sv_config::{BrokerStructure, StandConfig};
use sv_core::{Timestamp, parse_timestamp};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sv-cli")]
#[command(about = "standview CLI - test stand control history and broker layout", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a stand configuration file
    Validate {
        /// Path to the stand YAML file
        config_path: PathBuf,
    },
    /// Print the broker entity/attribute structure
    Structure {
        /// Path to the stand YAML file
        config_path: PathBuf,
        /// Only print this system
        #[arg(long)]
        system: Option<String>,
    },
    /// Reconstruct control periods from a relay dump
    Periods {
        /// Path to the relay dump JSON file
        relay_path: PathBuf,
        /// End of the last period (RFC 3339); defaults to now
        #[arg(long)]
        window_end: Option<String>,
        /// Stand config, used for the step and system names
        #[arg(long)]
        config: Option<PathBuf>,
        /// Gap between adjacent periods in seconds (overrides the config)
        #[arg(long)]
        step_s: Option<f64>,
    },
    /// Fetch and clean a system's history from a history dump
    History {
        /// Path to the stand YAML file
        config_path: PathBuf,
        /// System name, e.g. plc
        system: String,
        /// Path to the history dump JSON file
        dump_path: PathBuf,
        /// Start of the window (RFC 3339 or YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
    },
}

fn main() -> AppResult<()> {
    // Initialize tracing; stdout carries the JSON output
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { config_path } => cmd_validate(&config_path),
        Commands::Structure {
            config_path,
            system,
        } => cmd_structure(&config_path, system.as_deref()),
        Commands::Periods {
            relay_path,
            window_end,
            config,
            step_s,
        } => cmd_periods(&relay_path, window_end.as_deref(), config.as_deref(), step_s),
        Commands::History {
            config_path,
            system,
            dump_path,
            from,
        } => cmd_history(&config_path, &system, &dump_path, from.as_deref()),
    }
}

fn cmd_validate(config_path: &Path) -> AppResult<()> {
    println!("Validating stand config: {}", config_path.display());
    let config = config_service::load_config(config_path)?;
    config_service::validate_config(&config)?;
    println!("✓ Config is valid");
    for name in config.system_names() {
        let count = config.system(name).map(|s| s.parameters.len()).unwrap_or(0);
        println!("  {name}: {count} parameters");
    }
    Ok(())
}

fn cmd_structure(config_path: &Path, system: Option<&str>) -> AppResult<()> {
    let config = config_service::load_config(config_path)?;
    let structure = BrokerStructure::construct(&config);
    let json = match system {
        Some(name) => {
            let entities = structure
                .entities(name)
                .ok_or_else(|| AppError::SystemNotFound(name.to_string()))?;
            serde_json::to_string_pretty(entities)
        }
        None => serde_json::to_string_pretty(&structure),
    }
    .map_err(|e| AppError::InvalidInput(e.to_string()))?;
    println!("{json}");
    Ok(())
}

fn cmd_periods(
    relay_path: &Path,
    window_end: Option<&str>,
    config_path: Option<&Path>,
    step_s: Option<f64>,
) -> AppResult<()> {
    let dump = RelayDump::load(relay_path)?;
    let window_end = parse_or_now(window_end)?;

    let mut config = match config_path {
        Some(path) => config_service::load_config(path)?,
        None => sv_config::reference()?,
    };
    if let Some(step_s) = step_s {
        config.display.step_s = step_s;
    }

    let history = switch_history_from(&config, &dump.relay_a, &dump.relay_b, window_end)?;
    tracing::info!(periods = history.periods.interval_count(), "reconstructed control periods");

    let json = if config_path.is_some() {
        serde_json::to_string_pretty(&history.by_system())
    } else {
        serde_json::to_string_pretty(&history.periods)
    }
    .map_err(|e| AppError::InvalidInput(e.to_string()))?;
    println!("{json}");
    Ok(())
}

fn cmd_history(config_path: &Path, system: &str, dump_path: &Path, from: Option<&str>) -> AppResult<()> {
    let config: StandConfig = config_service::load_config(config_path)?;
    let dump = HistoryDump::load(dump_path)?;
    let from = match from {
        Some(s) => parse_timestamp(s)?,
        None => Timestamp::MIN_UTC,
    };

    let histories = sv_app::fetch_history(&dump, &config, system, from)?;
    let json =
        serde_json::to_string_pretty(&histories).map_err(|e| AppError::InvalidInput(e.to_string()))?;
    println!("{json}");
    Ok(())
}

fn parse_or_now(input: Option<&str>) -> AppResult<Timestamp> {
    match input {
        Some(s) => Ok(parse_timestamp(s)?),
        None => Ok(Utc::now()),
    }
}
