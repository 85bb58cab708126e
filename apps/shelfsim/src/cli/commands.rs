//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use crate::api;
use crate::config_file::{config_to_toml, load_config};
use crate::prompt::Prompter;
use crate::render::{self, EventPrinter};
use crate::runner::{self, Approver};
use crate::shell::{self, ShellOptions};
use shelfsim_core::{ApprovalPolicy, Catalog, ProductFilter, ShelfError, SimConfig};
use std::path::Path;
use std::time::Duration;

// =============================================================================
// SIMULATE COMMAND
// =============================================================================

/// Where approval answers come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalMode {
    /// Ask on stdin for every proposal.
    Prompt,
    /// Fixed answers from the command line.
    Fixed(ApprovalPolicy),
}

/// Flags of the `simulate` command.
#[derive(Debug, Clone, Copy)]
pub struct SimulateOptions {
    pub approval: ApprovalMode,
    pub pace_ms: u64,
    pub approval_timeout_secs: Option<u64>,
    pub events: bool,
}

/// Run the week on a freshly seeded catalog and print the report.
pub async fn cmd_simulate(
    config: SimConfig,
    seed: u64,
    json_mode: bool,
    options: SimulateOptions,
) -> Result<(), ShelfError> {
    let catalog = Catalog::seeded(&config, seed)?;
    tracing::info!(seed, products = catalog.len(), "Simulation starting");

    let mode = match options.approval {
        // Prompts would interleave with the JSON document.
        ApprovalMode::Prompt if json_mode => {
            tracing::warn!("JSON mode without approval flags: declining every proposal");
            ApprovalMode::Fixed(ApprovalPolicy::default())
        }
        mode => mode,
    };

    let mut prompter = Prompter::new();
    let mut approver = match mode {
        ApprovalMode::Fixed(policy) => Approver::Fixed(policy),
        ApprovalMode::Prompt => Approver::Ask {
            prompter: &mut prompter,
            timeout: options.approval_timeout_secs.map(Duration::from_secs),
        },
    };
    let printer = (!json_mode).then_some(EventPrinter {
        show_purchases: options.events,
        pace: (options.pace_ms > 0).then(|| Duration::from_millis(options.pace_ms)),
    });

    let run = runner::run_in_background(config, catalog, seed);
    let (report, _catalog) = runner::watch(run, printer, &mut approver).await?;

    if json_mode {
        let output = serde_json::json!({
            "seed": seed,
            "report": report,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!();
    println!("{}", render::week_summary(&report));
    println!();
    println!("{}", render::week_details(&report));
    println!();
    println!("Seed: {} (pass --seed {} to replay this week)", seed, seed);
    Ok(())
}

// =============================================================================
// INVENTORY COMMAND
// =============================================================================

/// Show the seeded catalog, optionally filtered.
pub fn cmd_inventory(
    config: &SimConfig,
    seed: u64,
    json_mode: bool,
    category: Option<&str>,
    search: Option<&str>,
    low_stock: bool,
) -> Result<(), ShelfError> {
    let catalog = Catalog::seeded(config, seed)?;
    let filter = ProductFilter {
        category: category.map(str::to_string),
        search: search.map(str::to_string),
        max_quantity: low_stock.then_some(config.inventory.low_stock_threshold),
    };
    let products = catalog.select(&filter);

    if json_mode {
        let output = serde_json::json!({
            "products": products,
            "total_value": catalog.total_value(),
            "total_quantity": catalog.total_quantity(),
            "categories": catalog.categories(),
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!("{}", render::product_table(&products));
    println!();
    println!("Showing {} of {} products", products.len(), catalog.len());
    println!(
        "Total inventory value: {}",
        render::money(catalog.total_value())
    );
    println!("Total units on hand:   {}", catalog.total_quantity());
    Ok(())
}

// =============================================================================
// STATS COMMAND
// =============================================================================

/// Show bucket statistics of the seeded catalog.
pub fn cmd_stats(config: &SimConfig, seed: u64, json_mode: bool) -> Result<(), ShelfError> {
    let catalog = Catalog::seeded(config, seed)?;
    let stats = catalog.collision_stats();

    if json_mode {
        println!(
            "{}",
            serde_json::to_string_pretty(&stats).unwrap_or_default()
        );
        return Ok(());
    }

    println!("{}", render::stats_table(&stats));
    Ok(())
}

// =============================================================================
// SHELL COMMAND
// =============================================================================

/// Open the interactive inventory menu.
pub async fn cmd_shell(
    config: SimConfig,
    seed: u64,
    approval_timeout_secs: Option<u64>,
    events: bool,
) -> Result<(), ShelfError> {
    let catalog = Catalog::seeded(&config, seed)?;
    let options = ShellOptions {
        seed,
        approval_timeout: approval_timeout_secs.map(Duration::from_secs),
        show_purchases: events,
    };
    shell::run_shell(config, catalog, options).await
}

// =============================================================================
// CONFIG COMMAND
// =============================================================================

/// Check a file, dump the effective configuration, or both. With neither
/// flag the configuration is dumped.
pub fn cmd_config(config: &SimConfig, dump: bool, check: Option<&Path>) -> Result<(), ShelfError> {
    if let Some(path) = check {
        let checked = load_config(Some(path))?;
        println!(
            "{}: OK ({} days, {} time blocks, {} profiles, {} seed products)",
            path.display(),
            checked.week.days.len(),
            checked.time_blocks.len(),
            checked.profiles.len(),
            checked.seed_products.len()
        );
        if !dump {
            return Ok(());
        }
    }

    print!("{}", config_to_toml(config)?);
    Ok(())
}

// =============================================================================
// SERVE COMMAND
// =============================================================================

/// Start the HTTP server over a freshly seeded catalog.
pub async fn cmd_serve(
    config: SimConfig,
    seed: u64,
    host: &str,
    port: u16,
) -> Result<(), ShelfError> {
    let catalog = Catalog::seeded(&config, seed)?;

    println!("Shelfsim HTTP Server Starting...");
    println!();
    println!("Configuration:");
    println!("  Host:     {}", host);
    println!("  Port:     {}", port);
    println!("  Seed:     {}", seed);
    println!("  Products: {}", catalog.len());
    println!();
    println!("Endpoints:");
    println!("  GET  /health            - Health check");
    println!("  GET  /catalog           - List products (?category=, ?search=)");
    println!("  GET  /catalog/low-stock - Products at or below the threshold");
    println!("  GET  /catalog/value     - Total inventory value");
    println!("  GET  /stats             - Store bucket statistics");
    println!("  GET  /report            - Last simulated week");
    println!("  POST /simulate          - Run a week on the served catalog");
    println!("  POST /restock-low       - Restock low products to target");
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    let addr = format!("{}:{}", host, port);
    api::run_server(&addr, config, catalog).await
}
