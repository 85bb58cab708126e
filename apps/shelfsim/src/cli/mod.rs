//! # Shelfsim CLI Module
//!
//! This module implements the CLI interface for Shelfsim.
//!
//! ## Available Commands
//!
//! - `simulate` - Run the seven-day week and print the report
//! - `inventory` - Show the seeded catalog
//! - `stats` - Show bucket statistics of the catalog stores
//! - `shell` - Interactive inventory menu
//! - `config` - Dump or check a configuration file
//! - `serve` - Start the HTTP server

mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use shelfsim_core::ShelfError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Shelfsim - grocery store week simulator
///
/// Seeds a catalog, sends a week of synthetic shoppers through it and
/// reports what sold, what ran out and what the pricing decisions earned.
#[derive(Parser, Debug)]
#[command(name = "shelfsim")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// TOML configuration file (defaults to the built-in store)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Seed for ids and shopper behaviour (random when omitted)
    #[arg(short, long, global = true)]
    pub seed: Option<u64>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Fixed answer for every approval prompt.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoAnswer {
    Yes,
    No,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the seven-day simulation
    Simulate {
        /// Answer every pricing proposal without prompting
        #[arg(long, value_enum)]
        auto_approve: Option<AutoAnswer>,

        /// Approve clearance sales without prompting
        #[arg(long)]
        approve_clearance: bool,

        /// Approve price surges without prompting
        #[arg(long)]
        approve_surge: bool,

        /// Pause after each customer, in milliseconds
        #[arg(long, default_value = "0")]
        pace_ms: u64,

        /// Decline a proposal left unanswered this long
        #[arg(long)]
        approval_timeout_secs: Option<u64>,

        /// Print every customer and purchase
        #[arg(short, long)]
        events: bool,
    },

    /// Show the seeded catalog
    Inventory {
        /// Only this category
        #[arg(long)]
        category: Option<String>,

        /// Only names containing this text (case-insensitive)
        #[arg(long)]
        search: Option<String>,

        /// Only products at or below the low-stock threshold
        #[arg(long)]
        low_stock: bool,
    },

    /// Show bucket statistics of the catalog stores
    Stats,

    /// Interactive inventory menu
    Shell {
        /// Decline a proposal left unanswered this long
        #[arg(long)]
        approval_timeout_secs: Option<u64>,

        /// Print every customer and purchase during simulations
        #[arg(short, long)]
        events: bool,
    },

    /// Dump or check configuration
    Config {
        /// Print the effective configuration as TOML
        #[arg(long)]
        dump: bool,

        /// Validate a configuration file and exit
        #[arg(long)]
        check: Option<PathBuf>,
    },

    /// Start HTTP server
    Serve {
        /// Host to bind to
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), ShelfError> {
    let json_mode = cli.json_mode;
    let config = crate::config_file::load_config(cli.config.as_deref())?;
    let seed = cli.seed.unwrap_or_else(rand::random);

    match cli.command {
        Some(Commands::Simulate {
            auto_approve,
            approve_clearance,
            approve_surge,
            pace_ms,
            approval_timeout_secs,
            events,
        }) => {
            let options = SimulateOptions {
                approval: approval_mode(auto_approve, approve_clearance, approve_surge),
                pace_ms,
                approval_timeout_secs,
                events,
            };
            cmd_simulate(config, seed, json_mode, options).await
        }
        Some(Commands::Inventory {
            category,
            search,
            low_stock,
        }) => cmd_inventory(
            &config,
            seed,
            json_mode,
            category.as_deref(),
            search.as_deref(),
            low_stock,
        ),
        Some(Commands::Stats) => cmd_stats(&config, seed, json_mode),
        Some(Commands::Shell {
            approval_timeout_secs,
            events,
        }) => cmd_shell(config, seed, approval_timeout_secs, events).await,
        Some(Commands::Config { dump, check }) => cmd_config(&config, dump, check.as_deref()),
        Some(Commands::Serve { host, port }) => cmd_serve(config, seed, &host, port).await,
        None => {
            // No subcommand - run the week with prompts
            let options = SimulateOptions {
                approval: ApprovalMode::Prompt,
                pace_ms: 0,
                approval_timeout_secs: None,
                events: false,
            };
            cmd_simulate(config, seed, json_mode, options).await
        }
    }
}

/// Resolve the approval flags. `--auto-approve` wins; either per-kind flag
/// turns prompting off, leaving the other kind declined.
#[must_use]
pub fn approval_mode(
    auto_approve: Option<AutoAnswer>,
    approve_clearance: bool,
    approve_surge: bool,
) -> ApprovalMode {
    match auto_approve {
        Some(answer) => {
            let yes = answer == AutoAnswer::Yes;
            ApprovalMode::Fixed(shelfsim_core::ApprovalPolicy {
                clearance: yes,
                surge: yes,
            })
        }
        None if approve_clearance || approve_surge => {
            ApprovalMode::Fixed(shelfsim_core::ApprovalPolicy {
                clearance: approve_clearance,
                surge: approve_surge,
            })
        }
        None => ApprovalMode::Prompt,
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use shelfsim_core::ApprovalPolicy;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn approval_flags_resolve() {
        assert_eq!(approval_mode(None, false, false), ApprovalMode::Prompt);
        assert_eq!(
            approval_mode(Some(AutoAnswer::Yes), false, false),
            ApprovalMode::Fixed(ApprovalPolicy {
                clearance: true,
                surge: true
            })
        );
        assert_eq!(
            approval_mode(Some(AutoAnswer::No), true, true),
            ApprovalMode::Fixed(ApprovalPolicy::default())
        );
        assert_eq!(
            approval_mode(None, false, true),
            ApprovalMode::Fixed(ApprovalPolicy {
                clearance: false,
                surge: true
            })
        );
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from([
            "shelfsim",
            "simulate",
            "--auto-approve",
            "yes",
            "--seed",
            "42",
            "--json-mode",
        ]);
        let Ok(cli) = cli else {
            panic!("parse failed");
        };
        assert_eq!(cli.seed, Some(42));
        assert!(cli.json_mode);
        assert!(matches!(
            cli.command,
            Some(Commands::Simulate {
                auto_approve: Some(AutoAnswer::Yes),
                ..
            })
        ));
    }
}
