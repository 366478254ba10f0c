use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use colored::*;
use std::fs;
use std::path::PathBuf;

use planrs::logging::{init_logging, LogConfig, LogLevel};
use planrs::{derive_seed, parse_history, render_plan, simulate, FitnessTracker};
use planrs::{SimulationConfig, Tunables};

/// planrs - Run Training Plan Projection CLI
///
/// Projects future training weeks (duration, intensity, pace, distance)
/// from a TRIMP-style load model, optionally seeded from historical runs.
#[derive(Parser)]
#[command(name = "planrs")]
#[command(version = "0.1.0")]
#[command(about = "Run training plan projection", long_about = None)]
struct Cli {
    /// Increase verbosity of output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Project a week-by-week training plan
    Simulate {
        /// Simulation config file (JSON); defaults to ~/.planrs/config.json
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Tunables file (JSON); defaults apply when omitted
        #[arg(short, long)]
        tunables: Option<PathBuf>,

        /// Historical run log (CSV) used to seed and backfill the plan
        #[arg(long)]
        history: Option<PathBuf>,

        /// Output file for the JSON report (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Derive seed state from a historical run log
    Seed {
        /// Historical run log (CSV)
        #[arg(long)]
        history: PathBuf,

        /// Tunables file (JSON); defaults apply when omitted
        #[arg(short, long)]
        tunables: Option<PathBuf>,
    },
}

fn load_tunables(path: Option<PathBuf>) -> Result<Tunables> {
    match path {
        Some(path) => Tunables::load_or_default(&path)
            .with_context(|| format!("Failed to load tunables from {}", path.display())),
        None => Ok(Tunables::default()),
    }
}

fn read_history(path: &PathBuf, tunables: &Tunables) -> Result<Vec<planrs::HistoricalRun>> {
    let csv_data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read history file {}", path.display()))?;
    parse_history(csv_data.as_bytes(), tunables)
        .with_context(|| format!("Failed to parse history file {}", path.display()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LogLevel::Warn,
        1 => LogLevel::Info,
        2 => LogLevel::Debug,
        _ => LogLevel::Trace,
    };
    init_logging(&LogConfig {
        level,
        ..LogConfig::default()
    })?;

    match cli.command {
        Commands::Simulate {
            config,
            tunables,
            history,
            output,
        } => {
            let tunables = load_tunables(tunables)?;

            let config_path = config.unwrap_or_else(SimulationConfig::default_config_path);
            let mut config = SimulationConfig::load_or_default(&config_path)
                .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

            let history = match history {
                Some(path) => Some(read_history(&path, &tunables)?),
                None => None,
            };

            if let Some(history) = &history {
                let tracker = FitnessTracker::new();
                let seed = derive_seed(history, &tracker);
                seed.apply_to(&mut config);
                eprintln!(
                    "{}",
                    format!("Seeded simulation from {} historical runs", history.len()).dimmed()
                );
            }

            let today = Local::now().date_naive();
            let plan = simulate(&config, &tunables, history.as_deref(), today)?;
            let report = render_plan(&plan)?;
            let json = serde_json::to_string_pretty(&report)?;

            match output {
                Some(path) => {
                    fs::write(&path, json)
                        .with_context(|| format!("Failed to write report to {}", path.display()))?;
                    eprintln!(
                        "{}",
                        format!("✓ {} weeks written to {}", report.weeks.len(), path.display())
                            .green()
                    );
                }
                None => println!("{json}"),
            }
        }

        Commands::Seed { history, tunables } => {
            let tunables = load_tunables(tunables)?;
            let history = read_history(&history, &tunables)?;

            let tracker = FitnessTracker::new();
            let seed = derive_seed(&history, &tracker);
            println!("{}", serde_json::to_string_pretty(&seed)?);
            eprintln!(
                "{}",
                format!("✓ Seed derived from {} runs", history.len()).green()
            );
        }
    }

    Ok(())
}
