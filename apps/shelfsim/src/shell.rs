//! # Inventory Shell
//!
//! Interactive menu over one in-memory catalog. Catalog errors are printed
//! and the menu continues; end of input leaves the shell.

use crate::prompt::Prompter;
use crate::render::{self, EventPrinter};
use crate::runner::{self, Approver};
use shelfsim_core::{Catalog, ProductId, ShelfError, SimConfig, WeekReport};
use std::str::FromStr;
use std::time::Duration;

// =============================================================================
// COMMANDS
// =============================================================================

/// A menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellCommand {
    View,
    Add,
    Purchase,
    Restock,
    Price,
    Remove,
    Search,
    Category,
    Low,
    Value,
    Stats,
    Simulate,
    Report,
    RestockLow,
    Help,
    Quit,
}

const MENU: &[(ShellCommand, &str, &str)] = &[
    (ShellCommand::View, "view", "List every product"),
    (ShellCommand::Add, "add", "Add a product"),
    (ShellCommand::Purchase, "purchase", "Sell units of a product"),
    (ShellCommand::Restock, "restock", "Add units to a product"),
    (ShellCommand::Price, "price", "Change a product's price"),
    (ShellCommand::Remove, "remove", "Remove a product"),
    (ShellCommand::Search, "search", "Find products by name"),
    (ShellCommand::Category, "category", "List one category"),
    (ShellCommand::Low, "low", "Show low-stock products"),
    (ShellCommand::Value, "value", "Total inventory value"),
    (ShellCommand::Stats, "stats", "Store bucket statistics"),
    (ShellCommand::Simulate, "simulate", "Run a week on this catalog"),
    (ShellCommand::Report, "report", "Show the last week's report"),
    (ShellCommand::RestockLow, "restock-low", "Restock low products to target"),
    (ShellCommand::Help, "help", "Show this menu"),
    (ShellCommand::Quit, "quit", "Leave the shell"),
];

impl FromStr for ShellCommand {
    type Err = String;

    /// Accepts a menu word or its 1-based number.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        if let Ok(n) = s.parse::<usize>() {
            return n
                .checked_sub(1)
                .and_then(|i| MENU.get(i))
                .map(|(cmd, _, _)| *cmd)
                .ok_or_else(|| format!("No menu entry {}", n));
        }
        match s.as_str() {
            "exit" | "q" => return Ok(ShellCommand::Quit),
            "?" => return Ok(ShellCommand::Help),
            _ => {}
        }
        MENU.iter()
            .find(|(_, word, _)| *word == s)
            .map(|(cmd, _, _)| *cmd)
            .ok_or_else(|| format!("Unknown command '{}'", s))
    }
}

fn menu_text() -> String {
    MENU.iter()
        .enumerate()
        .map(|(i, (_, word, help))| format!("{:>3}. {:<12} {}", i + 1, word, help))
        .collect::<Vec<_>>()
        .join("\n")
}

// =============================================================================
// SHELL
// =============================================================================

/// Options carried over from the command line.
#[derive(Debug, Clone, Copy)]
pub struct ShellOptions {
    pub seed: u64,
    pub approval_timeout: Option<Duration>,
    pub show_purchases: bool,
}

enum Flow {
    Continue,
    Quit,
}

struct Shell {
    config: SimConfig,
    catalog: Catalog,
    report: Option<WeekReport>,
    prompter: Prompter,
    options: ShellOptions,
    runs: u64,
}

/// Run the menu until `quit` or end of input.
pub async fn run_shell(
    config: SimConfig,
    catalog: Catalog,
    options: ShellOptions,
) -> Result<(), ShelfError> {
    let mut shell = Shell {
        config,
        catalog,
        report: None,
        prompter: Prompter::new(),
        options,
        runs: 0,
    };
    println!("{}", menu_text());

    loop {
        let Some(line) = shell.prompter.ask("\nshelfsim> ").await? else {
            break;
        };
        if line.is_empty() {
            continue;
        }
        let command = match line.parse::<ShellCommand>() {
            Ok(command) => command,
            Err(e) => {
                println!("{} (type 'help' for the menu)", e);
                continue;
            }
        };
        match shell.dispatch(command).await {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(e @ ShelfError::Io(_)) => return Err(e),
            Err(e) => println!("Error: {}", e),
        }
    }
    tracing::info!(products = shell.catalog.len(), "Shell closed");
    Ok(())
}

impl Shell {
    async fn dispatch(&mut self, command: ShellCommand) -> Result<Flow, ShelfError> {
        match command {
            ShellCommand::View => {
                let mut products: Vec<_> = self.catalog.products().collect();
                products.sort_by(|a, b| a.category.cmp(&b.category).then(a.name.cmp(&b.name)));
                println!("{}", render::product_table(&products));
            }
            ShellCommand::Add => return self.add().await,
            ShellCommand::Purchase => {
                let Some(id) = self.product_id().await? else {
                    return Ok(Flow::Quit);
                };
                let Some(amount) = self.number::<i64>("Units to sell: ").await? else {
                    return Ok(Flow::Quit);
                };
                let receipt = self.catalog.purchase(&id, amount)?;
                println!(
                    "Sold {} x {} for {}, {} left",
                    receipt.quantity,
                    receipt.name,
                    render::money(receipt.line_total()),
                    receipt.remaining
                );
                if receipt.low_stock {
                    println!("LOW STOCK: {}", receipt.name);
                }
            }
            ShellCommand::Restock => {
                let Some(id) = self.product_id().await? else {
                    return Ok(Flow::Quit);
                };
                let Some(amount) = self.number::<i64>("Units to add: ").await? else {
                    return Ok(Flow::Quit);
                };
                let quantity = self.catalog.restock(&id, amount)?;
                println!("Now {} units on hand", quantity);
            }
            ShellCommand::Price => {
                let Some(id) = self.product_id().await? else {
                    return Ok(Flow::Quit);
                };
                let Some(price) = self.number::<f64>("New price: ").await? else {
                    return Ok(Flow::Quit);
                };
                let old = self.catalog.update_price(&id, price)?;
                println!(
                    "Price changed from {} to {}",
                    render::money(old),
                    render::money(price)
                );
            }
            ShellCommand::Remove => {
                let Some(id) = self.product_id().await? else {
                    return Ok(Flow::Quit);
                };
                let removed = self.catalog.remove_product(&id)?;
                println!("Removed {}", removed.name);
            }
            ShellCommand::Search => {
                let Some(needle) = self.prompter.ask("Name contains: ").await? else {
                    return Ok(Flow::Quit);
                };
                let found = self.catalog.search_by_name(&needle, true);
                println!("{}", render::product_table(&found));
            }
            ShellCommand::Category => {
                println!("Categories: {}", self.catalog.categories().join(", "));
                let Some(category) = self.prompter.ask("Category: ").await? else {
                    return Ok(Flow::Quit);
                };
                let products = self.catalog.products_by_category(&category);
                println!("{}", render::product_table(&products));
            }
            ShellCommand::Low => {
                let low = self
                    .catalog
                    .low_stock(self.config.inventory.low_stock_threshold);
                println!("{}", render::product_table(&low));
            }
            ShellCommand::Value => {
                println!(
                    "Inventory value: {} ({} units)",
                    render::money(self.catalog.total_value()),
                    self.catalog.total_quantity()
                );
            }
            ShellCommand::Stats => {
                println!("{}", render::stats_table(&self.catalog.collision_stats()));
            }
            ShellCommand::Simulate => self.simulate().await?,
            ShellCommand::Report => match &self.report {
                Some(report) => {
                    println!("{}", render::week_summary(report));
                    println!("\n{}", render::week_details(report));
                }
                None => println!("No week has been simulated yet."),
            },
            ShellCommand::RestockLow => {
                let inv = &self.config.inventory;
                let lines = self
                    .catalog
                    .restock_low_to_target(inv.low_stock_threshold, inv.restock_target);
                if lines.is_empty() {
                    println!("Nothing to restock.");
                }
                for line in lines {
                    println!("  {:<24} +{} -> {}", line.name, line.added, line.quantity);
                }
            }
            ShellCommand::Help => println!("{}", menu_text()),
            ShellCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    async fn add(&mut self) -> Result<Flow, ShelfError> {
        let Some(name) = self.prompter.ask("Name: ").await? else {
            return Ok(Flow::Quit);
        };
        let Some(price) = self.number::<f64>("Price: ").await? else {
            return Ok(Flow::Quit);
        };
        let Some(quantity) = self.number::<i64>("Quantity: ").await? else {
            return Ok(Flow::Quit);
        };
        let Some(category) = self.prompter.ask("Category: ").await? else {
            return Ok(Flow::Quit);
        };
        let id = self.catalog.add_product(&name, price, quantity, &category)?;
        println!("Added {} as {}", name, id);
        Ok(Flow::Continue)
    }

    async fn simulate(&mut self) -> Result<(), ShelfError> {
        let seed = self.options.seed.wrapping_add(self.runs);
        self.runs += 1;

        let run = runner::run_in_background(self.config.clone(), self.catalog.clone(), seed);
        let printer = EventPrinter {
            show_purchases: self.options.show_purchases,
            pace: None,
        };
        let mut approver = Approver::Ask {
            prompter: &mut self.prompter,
            timeout: self.options.approval_timeout,
        };
        let (report, catalog) = runner::watch(run, Some(printer), &mut approver).await?;

        println!("\n{}", render::week_summary(&report));
        self.catalog = catalog;
        self.report = Some(report);
        Ok(())
    }

    async fn product_id(&mut self) -> Result<Option<ProductId>, ShelfError> {
        let answer = self.prompter.ask("Product id: ").await?;
        Ok(answer.map(|s| ProductId::new(s.to_ascii_uppercase())))
    }

    /// Ask until the answer parses as `T`. `None` on end of input.
    async fn number<T: FromStr>(&mut self, question: &str) -> Result<Option<T>, ShelfError> {
        loop {
            let Some(answer) = self.prompter.ask(question).await? else {
                return Ok(None);
            };
            match answer.parse::<T>() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => println!("'{}' is not a number", answer),
            }
        }
    }
}
