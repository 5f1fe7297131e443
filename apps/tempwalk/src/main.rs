//! # tempwalk - temporal random walk sampler
//!
//! The main binary for tempwalk.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │            apps/tempwalk (THE BINARY)         │
//! │                                               │
//! │  ┌─────────┐   ┌──────────┐   ┌───────────┐   │
//! │  │   CLI   │   │  Config  │   │  Dataset  │   │
//! │  │ (clap)  │   │  (toml)  │   │  loading  │   │
//! │  └────┬────┘   └────┬─────┘   └─────┬─────┘   │
//! │       └─────────────┼───────────────┘         │
//! │                     ▼                         │
//! │             ┌───────────────┐                 │
//! │             │ tempwalk-core │                 │
//! │             │ (THE ENGINE)  │                 │
//! │             └───────────────┘                 │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! tempwalk stats -d quads.txt --add-inverse
//! tempwalk sample -d quads.txt --add-inverse -r 0 -l 3 -n 20 --seed 42
//! tempwalk acyclic -d quads.txt -i pairs.txt -r 0 --distribution unif
//! ```

use clap::Parser;
use tempwalk::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    // Parse CLI arguments
    let cli = cli::Cli::parse();

    // TEMPWALK_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("TEMPWALK_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let default_filter = if cli.verbose {
        "tempwalk=debug,tempwalk_core=debug"
    } else {
        "tempwalk=info,tempwalk_core=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    // Logs go to stderr so walk output on stdout stays parseable.
    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    // Execute command
    if let Err(e) = cli::execute(cli) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}
