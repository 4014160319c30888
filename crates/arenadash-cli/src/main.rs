//! ArenaDash CLI - Round progress for the trading arena
//!
//! # Quick Start
//!
//! ```bash
//! # Inspect a single snapshot (inline JSON or file path)
//! arenadash progress '{"id":"r-1","currentBlock":1500,"totalBlocks":3000,"phase":"trading"}'
//!
//! # Show the configured phase windows
//! arenadash schedule
//!
//! # Follow newline-delimited snapshots from stdin
//! tail -f rounds.ndjson | arenadash watch
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod display;

use arenadash_rounds::RoundPhaseTracker;
use commands::{round, watch};
use config::{AppConfig, LoggingConfig};

/// ArenaDash CLI - Round and phase progress for arena competitions
#[derive(Parser)]
#[command(name = "arenadash")]
#[command(author = "ArenaDash Contributors")]
#[command(version)]
#[command(about = "Round and phase progress for trading arena competitions", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file (toml, json or yaml)
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show progress and phase status for a round snapshot
    Progress {
        /// Snapshot JSON (file path or inline)
        snapshot: String,

        /// Print the round view as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the phase windows
    Schedule {
        /// Scale the configured windows to a round of this many blocks
        #[arg(long)]
        total_blocks: Option<u64>,
    },

    /// Follow newline-delimited snapshots
    Watch {
        /// Read from a file instead of stdin
        #[arg(short, long)]
        input: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let app_config = AppConfig::load(cli.config.as_deref())?;
    init_logging(&app_config.logging);

    let schedule = app_config
        .schedule
        .build()
        .context("invalid phase schedule")?;
    debug!(total_blocks = schedule.total_blocks(), "Loaded phase schedule");

    let tracker = RoundPhaseTracker::new(schedule);

    match cli.command {
        Commands::Progress { snapshot, json } => {
            round::show_progress(&tracker, &snapshot, json)?;
        }
        Commands::Schedule { total_blocks } => match total_blocks {
            Some(total) => {
                let schedule = tracker
                    .schedule()
                    .scaled_to(total)
                    .context("round too short to schedule every phase")?;
                round::show_schedule(&schedule)?;
            }
            None => round::show_schedule(tracker.schedule())?,
        },
        Commands::Watch { input } => {
            let summary = watch::run_watch(tracker, input.as_deref())?;
            if summary.accepted == 0 && summary.rejected > 0 {
                anyhow::bail!("no valid snapshots received");
            }
        }
    }

    Ok(())
}

/// Initialize tracing/logging on stderr
fn init_logging(config: &LoggingConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    let subscriber = tracing_subscriber::registry().with(env_filter);

    match config.format.as_str() {
        "json" => {
            subscriber
                .with(fmt::layer().json().with_target(true).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            subscriber
                .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
                .init();
        }
    }
}
