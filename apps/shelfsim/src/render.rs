//! # Text Rendering
//!
//! Everything the user reads on stdout: event lines, proposal tables,
//! inventory listings and the end-of-week report. Functions build `String`s
//! so the output can be tested; callers decide where it goes.

use shelfsim_core::{
    CatalogStats, CollisionStats, EventRecord, PriceProposal, Product, ProposalKind, SimEvent,
    WeekReport,
};
use std::time::Duration;

/// Width of the revenue share bars.
const BAR_WIDTH: usize = 30;

// =============================================================================
// FORMATTING HELPERS
// =============================================================================

/// Dollar amount with thousands separators, e.g. `$1,234.50`.
#[must_use]
pub fn money(amount: f64) -> String {
    let cents = (amount * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    let dollars = (cents / 100).to_string();

    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (i, ch) in dollars.chars().enumerate() {
        if i > 0 && (dollars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{}${}.{:02}", sign, grouped, cents % 100)
}

/// Horizontal bar proportional to `percent` of `BAR_WIDTH`.
#[must_use]
pub fn share_bar(percent: f64) -> String {
    let filled = ((percent / 100.0) * BAR_WIDTH as f64).round();
    let filled = (filled.max(0.0) as usize).min(BAR_WIDTH);
    "█".repeat(filled)
}

fn heading(title: &str) -> [String; 2] {
    [title.to_string(), "=".repeat(title.chars().count())]
}

// =============================================================================
// EVENTS
// =============================================================================

/// One line for `record`, or `None` when the event is not shown.
///
/// Per-customer and per-purchase lines only appear with `show_purchases`.
#[must_use]
pub fn event_line(record: &EventRecord, show_purchases: bool) -> Option<String> {
    match &record.event {
        SimEvent::DayStarted {
            day,
            traffic,
            delivery,
            clearance,
            surge_rate,
        } => {
            let mut line = format!("\n=== {} (traffic x{:.2}) ===", day, traffic);
            if *delivery {
                line.push_str(" [delivery]");
            }
            if *clearance {
                line.push_str(" [clearance]");
            }
            if let Some(rate) = surge_rate {
                line.push_str(&format!(" [surge +{:.0}%]", rate * 100.0));
            }
            Some(line)
        }
        SimEvent::DeliveryCompleted {
            lines, total_units, ..
        } => Some(format!(
            "Delivery truck arrived: {} units across {} products",
            total_units,
            lines.len()
        )),
        SimEvent::ProposalResolved { proposal, approved } => {
            let verdict = if *approved { "approved" } else { "declined" };
            let what = match proposal.kind {
                ProposalKind::Clearance { .. } => "Clearance sale",
                ProposalKind::Surge { .. } => "Price surge",
            };
            Some(format!(
                "{} on {}: {} ({} items)",
                what,
                proposal.day,
                verdict,
                proposal.items.len()
            ))
        }
        SimEvent::SurgeReverted { day, restored } => Some(format!(
            "Surge prices reverted after {} ({} products)",
            day, restored
        )),
        SimEvent::BlockStarted {
            block,
            customers,
            max_cart,
        } => Some(format!(
            "-- {}: {} customers, carts up to {} items --",
            block, customers, max_cart
        )),
        SimEvent::CustomerServed {
            number,
            shopper,
            cart_size,
        } => show_purchases.then(|| format!("#{} {} : {} items", number, shopper, cart_size)),
        SimEvent::PurchaseSucceeded { receipt } => show_purchases.then(|| {
            format!(
                "    bought {} x {} @ {} = {}",
                receipt.quantity,
                receipt.name,
                money(receipt.unit_price),
                money(receipt.line_total())
            )
        }),
        SimEvent::PurchaseFailed {
            name,
            customer,
            requested,
            available,
            unit_price,
            ..
        } => show_purchases.then(|| {
            format!(
                "    OUT OF STOCK: {} wanted {} x {} @ {}, only {} left",
                customer,
                requested,
                name,
                money(*unit_price),
                available
            )
        }),
        SimEvent::LowStock {
            name, remaining, ..
        } => Some(format!("    LOW STOCK: {} ({} left)", name, remaining)),
        SimEvent::ShelvesEmpty { block } => {
            Some(format!("    Shelves are empty, closing {} early", block))
        }
        SimEvent::BlockClosed { block, revenue } => {
            Some(format!("-- {} closed: {} --", block, money(*revenue)))
        }
        SimEvent::OvernightRestock { lines } => (!lines.is_empty()).then(|| {
            let units: u32 = lines.iter().map(|l| l.added).sum();
            format!(
                "Overnight restock: {} products, {} units",
                lines.len(),
                units
            )
        }),
        SimEvent::DayClosed { report } => Some(format!(
            "{} closed: {} revenue, {} customers, {} items sold, {} failed purchases",
            report.day,
            money(report.revenue),
            report.customers,
            report.items_sold,
            report.failed_purchases
        )),
        SimEvent::WeekComplete { .. } => None,
    }
}

/// Prints event lines, optionally pausing after each customer.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventPrinter {
    pub show_purchases: bool,
    pub pace: Option<Duration>,
}

impl EventPrinter {
    pub async fn print(&self, record: &EventRecord) {
        if let Some(line) = event_line(record, self.show_purchases) {
            println!("{}", line);
        }
        if let (Some(pace), SimEvent::CustomerServed { .. }) = (self.pace, &record.event) {
            tokio::time::sleep(pace).await;
        }
    }
}

// =============================================================================
// PROPOSALS
// =============================================================================

/// Table of the price changes in `proposal`.
#[must_use]
pub fn proposal_table(proposal: &PriceProposal) -> String {
    let title = match proposal.kind {
        ProposalKind::Clearance { discount } => format!(
            "CLEARANCE SALE on {}: {:.0}% off overstocked items",
            proposal.day,
            discount * 100.0
        ),
        ProposalKind::Surge { rate } => format!(
            "PRICE SURGE on {}: +{:.0}% until close",
            proposal.day,
            rate * 100.0
        ),
    };

    let mut lines = heading(&title).to_vec();
    lines.push(format!(
        "{:<24} {:>6} {:>12} {:>12}",
        "Product", "Qty", "Now", "Proposed"
    ));
    for item in &proposal.items {
        lines.push(format!(
            "{:<24} {:>6} {:>12} {:>12}",
            item.name,
            item.quantity,
            money(item.old_price),
            money(item.new_price)
        ));
    }
    lines.join("\n")
}

// =============================================================================
// INVENTORY
// =============================================================================

/// Product listing with a header row.
#[must_use]
pub fn product_table(products: &[&Product]) -> String {
    if products.is_empty() {
        return "No products.".to_string();
    }
    let mut lines = vec![
        format!(
            "{:<10} | {:<20} | {:<9} | {:<10} | {}",
            "ID", "Name", "Price", "Stock", "Category"
        ),
        "-".repeat(72),
    ];
    lines.extend(products.iter().map(|p| p.to_string()));
    lines.join("\n")
}

/// Bucket statistics of both catalog stores.
#[must_use]
pub fn stats_table(stats: &CatalogStats) -> String {
    let mut lines = heading("Store Statistics").to_vec();
    lines.extend(stats_block("Products by id", &stats.products));
    lines.push(String::new());
    lines.extend(stats_block("Category index", &stats.categories));
    lines.join("\n")
}

fn stats_block(title: &str, s: &CollisionStats) -> Vec<String> {
    vec![
        format!("{}:", title),
        format!("  Buckets:            {}", s.total_buckets),
        format!("  Used / empty:       {} / {}", s.used_buckets, s.empty_buckets),
        format!("  Load factor:        {:.3}", s.load_factor),
        format!("  Longest chain:      {}", s.max_chain_length),
        format!("  Average chain:      {:.2}", s.avg_chain_length),
        format!("  Colliding buckets:  {}", s.buckets_with_collisions),
    ]
}

// =============================================================================
// WEEK REPORT
// =============================================================================

/// Headline numbers of a finished week.
#[must_use]
pub fn week_summary(report: &WeekReport) -> String {
    let mut lines = heading("WEEKLY SUMMARY").to_vec();
    lines.push(format!("Total revenue:      {}", money(report.total_revenue)));
    lines.push(format!("Customers served:   {}", report.total_customers));
    lines.push(format!("Items sold:         {}", report.total_items));
    lines.push(format!("Failed purchases:   {}", report.failed_purchases));
    lines.push(format!("Average spend:      {}", money(report.average_spend())));
    lines.push(format!(
        "Inventory value:    {} -> {}",
        money(report.value_before),
        money(report.value_after)
    ));
    lines.push(format!("Units delivered:    {}", report.total_delivered()));
    lines.join("\n")
}

/// The full breakdown printed after the summary.
#[must_use]
pub fn week_details(report: &WeekReport) -> String {
    let mut lines = heading("DETAILED REPORT").to_vec();

    lines.push(String::new());
    lines.push("Revenue by day:".to_string());
    for day in &report.days {
        let share = report.revenue_share(day.revenue);
        lines.push(format!(
            "  {:<10} {:>12} {:>5.1}% {}",
            day.day,
            money(day.revenue),
            share,
            share_bar(share)
        ));
    }

    lines.push(String::new());
    lines.push("Revenue by time block:".to_string());
    for (label, revenue) in &report.block_revenue {
        let share = report.revenue_share(*revenue);
        lines.push(format!(
            "  {:<10} {:>12} {:>5.1}% {}",
            label,
            money(*revenue),
            share,
            share_bar(share)
        ));
    }

    lines.push(String::new());
    lines.push("Deliveries:".to_string());
    if report.deliveries.is_empty() {
        lines.push("  none".to_string());
    }
    for delivery in &report.deliveries {
        lines.push(format!("  {:<10} {} units", delivery.day, delivery.units));
    }

    lines.push(String::new());
    lines.push("Clearance sales:".to_string());
    if report.clearance.is_empty() {
        lines.push("  none".to_string());
    }
    for item in &report.clearance {
        lines.push(format!(
            "  {:<24} {} -> {}",
            item.name,
            money(item.old_price),
            money(item.new_price)
        ));
    }

    lines.push(String::new());
    lines.push("Price surges:".to_string());
    if report.surges.is_empty() {
        lines.push("  none".to_string());
    }
    for surge in &report.surges {
        lines.push(format!(
            "  {:<10} +{:.0}% on {} items, {}",
            surge.day,
            surge.rate * 100.0,
            surge.items,
            if surge.approved { "approved" } else { "declined" }
        ));
    }

    lines.push(String::new());
    lines.push("Top sellers:".to_string());
    for (rank, (name, units)) in report.top_sellers(5).into_iter().enumerate() {
        lines.push(format!("  {}. {:<24} {} units", rank + 1, name, units));
    }
    lines.push("Slowest sellers:".to_string());
    for (name, units) in report.bottom_sellers(3) {
        lines.push(format!("     {:<24} {} units", name, units));
    }

    lines.push(String::new());
    lines.push("Shopper profiles:".to_string());
    for (profile, count) in &report.profile_counts {
        let share = if report.total_customers == 0 {
            0.0
        } else {
            *count as f64 / report.total_customers as f64 * 100.0
        };
        lines.push(format!("  {:<18} {:>5} ({:.1}%)", profile, count, share));
    }

    lines.push(String::new());
    if report.low_stock_hits.is_empty() {
        lines.push("No product ran low during the week.".to_string());
    } else {
        lines.push(format!(
            "Ran low during the week: {}",
            report
                .low_stock_hits
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        ));
    }
    if report.end_low_stock.is_empty() {
        lines.push("Nothing is low at week end.".to_string());
    } else {
        lines.push("Low at week end:".to_string());
        for line in &report.end_low_stock {
            lines.push(format!("  {:<24} {} left", line.name, line.quantity));
        }
    }

    lines.join("\n")
}
