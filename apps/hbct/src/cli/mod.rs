//! # Tracker CLI Module
//!
//! This module implements the CLI interface for the tracker.
//!
//! ## Available Commands
//!
//! - `run` - Interactive questionnaire (default)
//! - `results` - One-shot Results page from flags
//! - `pages` - List the questionnaire pages
//! - `serve` - Start the HTTP server

mod commands;
mod interactive;

use crate::config::Config;
use clap::{Parser, Subcommand};
use hbct_core::HbctError;
use std::path::PathBuf;

pub use commands::*;
pub use interactive::Questionnaire;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Health Behavior Change Tracker
///
/// Measures self-efficacy, stage of change and physical activity, then
/// gives personalized recommendations. Answers live for one session only.
#[derive(Parser, Debug)]
#[command(name = "hbct")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to a TOML config file
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Walk through the questionnaire interactively
    Run,

    /// Show the Results page for answers given as flags
    Results {
        /// Self-efficacy score (1-10)
        #[arg(long, allow_hyphen_values = true)]
        confidence: Option<i64>,

        /// Stage of change (label or option number 1-5)
        #[arg(short, long)]
        stage: Option<String>,

        /// Exercise days per week (0-7)
        #[arg(short, long, requires = "duration", allow_hyphen_values = true)]
        frequency: Option<i64>,

        /// Minutes per exercise session (0-120)
        #[arg(short, long, requires = "frequency", allow_hyphen_values = true)]
        duration: Option<i64>,
    },

    /// List the questionnaire pages
    Pages,

    /// Start HTTP server
    Serve {
        /// Host to bind to (overrides config)
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to bind to (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli, config: Config) -> Result<(), HbctError> {
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Results {
            confidence,
            stage,
            frequency,
            duration,
        }) => cmd_results(json_mode, confidence, stage.as_deref(), frequency, duration),
        Some(Commands::Pages) => cmd_pages(json_mode),
        Some(Commands::Serve { host, port }) => cmd_serve(config, host, port).await,
        Some(Commands::Run) | None => cmd_run(),
    }
}
