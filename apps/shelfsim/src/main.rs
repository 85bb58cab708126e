//! # Shelfsim - Grocery Week Simulator
//!
//! The main binary for the Shelfsim store simulation.
//!
//! This application provides:
//! - CLI interface for simulations and inventory inspection
//! - Interactive inventory shell
//! - HTTP REST API server (axum-based)
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     apps/shelfsim (THE BINARY)                  │
//! │                                                                 │
//! │  ┌─────────────┐    ┌─────────────┐    ┌──────────────────┐     │
//! │  │   CLI       │    │   HTTP API  │    │  Worker bridge   │     │
//! │  │  (clap)     │    │   (axum)    │    │ (mpsc + oneshot) │     │
//! │  └──────┬──────┘    └──────┬──────┘    └────────┬─────────┘     │
//! │         │                  │                    │               │
//! │         └──────────────────┼────────────────────┘               │
//! │                            ▼                                    │
//! │                    ┌───────────────┐                            │
//! │                    │ shelfsim-core │                            │
//! │                    │ (THE LOGIC)   │                            │
//! │                    └───────────────┘                            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Run the week, answering pricing proposals interactively
//! shelfsim simulate --events
//!
//! # Unattended run with a fixed seed
//! shelfsim simulate --auto-approve yes --seed 42
//!
//! # Inspect and serve
//! shelfsim inventory --low-stock
//! shelfsim serve --port 8080
//! ```

use clap::Parser;
use shelfsim::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = cli::Cli::parse();

    // Initialize tracing - SHELFSIM_LOG_FORMAT=json enables machine-parseable output.
    // Logs go to stderr so reports on stdout stay clean.
    let log_format = std::env::var("SHELFSIM_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let default_filter = if cli.verbose {
        "shelfsim=debug,shelfsim_core=debug,tower_http=debug"
    } else {
        "shelfsim=info,shelfsim_core=info,tower_http=debug"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

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

    // Display startup banner
    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    // Execute command
    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the Shelfsim startup banner.
fn print_banner() {
    println!(
        r#"
  ███████╗██╗  ██╗███████╗██╗     ███████╗███████╗██╗███╗   ███╗
  ██╔════╝██║  ██║██╔════╝██║     ██╔════╝██╔════╝██║████╗ ████║
  ███████╗███████║█████╗  ██║     █████╗  ███████╗██║██╔████╔██║
  ╚════██║██╔══██║██╔══╝  ██║     ██╔══╝  ╚════██║██║██║╚██╔╝██║
  ███████║██║  ██║███████╗███████╗██║     ███████║██║██║ ╚═╝ ██║
  ╚══════╝╚═╝  ╚═╝╚══════╝╚══════╝╚═╝     ╚══════╝╚═╝╚═╝     ╚═╝

  Grocery Week Simulator v{}

  Seeded • Stocked • Reported
"#,
        env!("CARGO_PKG_VERSION")
    );
}
