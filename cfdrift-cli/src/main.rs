// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! cfdrift - Cloud Foundry application-count drift checker.
//!
//! # Examples
//!
//! ```bash
//! # Reconcile the configured foundation
//! cfdrift
//!
//! # Reconcile another foundation
//! cfdrift --foundation dev-west
//!
//! # JSON output
//! cfdrift --format json --pretty
//! ```

mod output;
mod reconcile;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cfdrift_core::AppConfig;
use cfdrift_fetch::CloudControllerFetcher;
use cfdrift_store::StatsDb;

// ============================================================================
// CLI Definition
// ============================================================================

/// cfdrift CLI - application-count drift detection.
#[derive(Parser)]
#[command(name = "cfdrift")]
#[command(about = "Reconciles Cloud Controller app counts against the statistics database")]
#[command(long_about = r"
cfdrift fetches the live application count from a foundation's Cloud
Controller and the persisted count from the statistics database, and
reports both so drift between them is visible.

Required environment: OAUTH_CLIENT_ID, OAUTH_CLIENT_SECRET, FOUNDATION,
CC_URL (with a {foundation} placeholder), STATS_DB.
")]
#[command(version)]
pub struct Cli {
    /// Foundation to reconcile (defaults to the FOUNDATION environment variable).
    #[arg(long, short = 'F')]
    pub foundation: Option<String>,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text")]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long)]
    pub pretty: bool,

    /// Verbose output (show debug info).
    #[arg(long, short)]
    pub verbose: bool,

    /// Quiet mode (suppress diagnostics).
    #[arg(long, short)]
    pub quiet: bool,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable result line.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return; // No diagnostics in quiet mode
    }

    let filter = if verbose {
        EnvFilter::new(
            "info,cfdrift_core=debug,cfdrift_fetch=debug,cfdrift_store=debug,cfdrift_cli=debug",
        )
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    if let Err(err) = run(&cli) {
        if !cli.quiet {
            eprintln!("Error: {err:#}");
        }
        std::process::exit(1);
    }
}

/// One reconciliation run: configuration, both counts, one report.
fn run(cli: &Cli) -> Result<()> {
    let config = AppConfig::from_env()?;
    let foundation = cli.foundation.as_deref().unwrap_or(&config.foundation);

    let mut fetcher = CloudControllerFetcher::new(&config)?;
    let mut store = StatsDb::open(&config.stats_db_path)?;

    let report = reconcile::get_counts(foundation, &mut fetcher, &mut store)?;

    let rendered = match cli.format {
        OutputFormat::Text => output::text(&report),
        OutputFormat::Json => output::json(&report, cli.pretty)?,
    };
    println!("{rendered}");

    Ok(())
}
