//! Fraud Tracker CLI - headless runner for the synthetic fraud stream
//!
//! # Commands
//!
//! - `fraud-tracker stream` - Run the timer-driven stream and print a live ticker
//! - `fraud-tracker snapshot` - Print the dashboard view after a number of ticks
//! - `fraud-tracker regions [QUERY]` - Search the region table
//!
//! Configuration is read from `fraud_tracker.toml` when present, then
//! overridden by `FRAUD_*` environment variables and command-line flags.

use anyhow::Context;
use clap::{Parser, Subcommand};
use fraud_stream::config::DEFAULT_CONFIG_PATH;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;

pub use error::{CliError, Result};

use commands::snapshot::OutputFormat;
use config::CliOverrides;

/// Synthetic fraud event stream CLI
#[derive(Parser)]
#[command(name = "fraud-tracker")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the event stream and print each event as it arrives
    Stream {
        /// Tick interval in milliseconds
        #[arg(short, long)]
        interval_ms: Option<u64>,

        /// Stop after this many seconds (runs until Ctrl-C when omitted)
        #[arg(short, long)]
        duration_secs: Option<u64>,

        /// Seed for a reproducible stream
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Print leaderboard and latest events after a number of ticks
    Snapshot {
        /// Synchronous ticks to run after prepopulation
        #[arg(short, long, default_value = "0")]
        ticks: usize,

        /// Regions on the leaderboard
        #[arg(long)]
        top: Option<usize>,

        /// Latest events to show
        #[arg(long)]
        latest: Option<usize>,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,

        /// Seed for a reproducible stream
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Search regions by name
    Regions {
        /// Case-insensitive substring; lists every region when omitted
        query: Option<String>,
    },
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let overrides = match &cli.command {
        Commands::Stream {
            interval_ms, seed, ..
        } => CliOverrides {
            interval_ms: *interval_ms,
            seed: *seed,
        },
        Commands::Snapshot { seed, .. } => CliOverrides {
            interval_ms: None,
            seed: *seed,
        },
        Commands::Regions { .. } => CliOverrides::default(),
    };
    let mut config = config::resolve(&cli.config, &overrides)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;

    let log_level = if cli.verbose { "debug" } else { config.log_level.as_str() };
    init_tracing(log_level);

    if cli.verbose {
        info!("Verbose mode enabled");
    }
    debug!(?config, "Configuration resolved");

    match cli.command {
        Commands::Stream { duration_secs, .. } => {
            commands::stream::run(&config, duration_secs.map(Duration::from_secs)).await?;
        }
        Commands::Snapshot {
            ticks,
            top,
            latest,
            format,
            ..
        } => {
            let format: OutputFormat = format.parse()?;
            if let Some(top) = top {
                config.top_regions = top;
            }
            if let Some(latest) = latest {
                config.latest_events = latest;
            }
            commands::snapshot::run(&config, ticks, format, &mut std::io::stdout().lock())?;
        }
        Commands::Regions { query } => {
            commands::regions::run(query.as_deref(), &mut std::io::stdout().lock())?;
        }
    }

    Ok(())
}
