//! # hbct - Health Behavior Change Tracker
//!
//! The main binary for the tracker.
//!
//! This application provides:
//! - Interactive questionnaire on the terminal
//! - One-shot Results page from command-line answers
//! - HTTP REST API server (axum-based)
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                       apps/hbct (THE BINARY)                    │
//! │                                                                 │
//! │  ┌───────────────┐   ┌─────────────┐   ┌──────────────────┐   │
//! │  │ Questionnaire │   │   HTTP API  │   │   Config/Logs    │   │
//! │  │ (clap, stdin) │   │   (axum)    │   │ (toml, tracing)  │   │
//! │  └───────┬───────┘   └──────┬──────┘   └──────────────────┘   │
//! │          │                  │                                   │
//! │          └────────┬─────────┘                                   │
//! │                   ▼                                             │
//! │           ┌───────────────┐                                     │
//! │           │   hbct-core   │                                     │
//! │           │  (THE LOGIC)  │                                     │
//! │           └───────────────┘                                     │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Interactive questionnaire
//! hbct
//!
//! # One-shot results
//! hbct results --confidence 3 --stage contemplation --frequency 2 --duration 20
//!
//! # Start the HTTP server
//! hbct serve --host 0.0.0.0 --port 8080
//! ```

use clap::Parser;
use hbct::{
    cli,
    config::{Config, LogFormat},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    init_tracing(&config, cli.verbose);

    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    if let Err(e) = cli::execute(cli, config).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Install the tracing subscriber. Logs go to stderr so the questionnaire
/// owns stdout.
fn init_tracing(config: &Config, verbose: bool) {
    let fallback = if verbose {
        "hbct=debug,hbct_core=debug,tower_http=debug".to_string()
    } else {
        config.log.filter.clone()
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| fallback.into());

    match config.log.format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}

/// Print the startup banner.
fn print_banner() {
    println!(
        r#"
  ╦ ╦╔╗ ╔═╗╔╦╗
  ╠═╣╠╩╗║   ║
  ╩ ╩╚═╝╚═╝ ╩

  Health Behavior Change Tracker v{}

  Self-Efficacy • Stages of Change • Exercise Vital Sign
"#,
        env!("CARGO_PKG_VERSION")
    );
}
