//! # Reports
//!
//! Aggregates produced by a simulated week. `DayReport` is closed at the end
//! of every day; `WeekReport` is handed out at `WeekComplete`.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::events::PriceChange;

/// Totals for one simulated day.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DayReport {
    pub index: usize,
    pub day: String,
    pub traffic: f64,
    pub revenue: f64,
    pub customers: u64,
    pub items_sold: u64,
    pub failed_purchases: u64,
    /// Units distributed by the morning delivery.
    pub delivered: u32,
    /// Units added by the overnight restock.
    pub restocked: u32,
    /// Revenue per time block, in block order.
    pub block_revenue: Vec<f64>,
    /// Products at or below the low-stock threshold at close, before restock.
    pub low_at_close: usize,
}

/// One delivery truck arrival.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryRecord {
    pub day: String,
    pub units: u32,
}

/// Outcome of one surge proposal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurgeRecord {
    pub day: String,
    pub rate: f64,
    pub items: usize,
    pub approved: bool,
}

/// A product left at or below the low-stock threshold after the week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LowStockLine {
    pub name: String,
    pub quantity: u32,
}

/// Everything measured over a simulated week.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WeekReport {
    pub total_revenue: f64,
    pub total_items: u64,
    pub total_customers: u64,
    pub failed_purchases: u64,
    pub value_before: f64,
    pub value_after: f64,
    pub days: Vec<DayReport>,
    /// Weekly revenue per time block label, in block order.
    pub block_revenue: Vec<(String, f64)>,
    /// Product name -> units sold.
    pub product_sales: BTreeMap<String, u64>,
    /// Names of products that hit low stock at any point.
    pub low_stock_hits: BTreeSet<String>,
    /// Profile name -> customers served.
    pub profile_counts: BTreeMap<String, u64>,
    pub deliveries: Vec<DeliveryRecord>,
    /// Clearance price changes that were approved and applied.
    pub clearance: Vec<PriceChange>,
    pub surges: Vec<SurgeRecord>,
    pub end_low_stock: Vec<LowStockLine>,
}

impl WeekReport {
    /// Products ranked by units sold, best first. Ties break by name.
    #[must_use]
    pub fn ranked_sellers(&self) -> Vec<(&str, u64)> {
        let mut ranked: Vec<(&str, u64)> = self
            .product_sales
            .iter()
            .map(|(name, units)| (name.as_str(), *units))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked
    }

    /// The `n` best-selling products.
    #[must_use]
    pub fn top_sellers(&self, n: usize) -> Vec<(&str, u64)> {
        let mut ranked = self.ranked_sellers();
        ranked.truncate(n);
        ranked
    }

    /// The `n` worst-selling products that sold at least once, in ranked order.
    #[must_use]
    pub fn bottom_sellers(&self, n: usize) -> Vec<(&str, u64)> {
        let ranked = self.ranked_sellers();
        let start = ranked.len().saturating_sub(n);
        ranked[start..].to_vec()
    }

    /// Revenue per customer; zero when nobody shopped.
    #[must_use]
    pub fn average_spend(&self) -> f64 {
        if self.total_customers == 0 {
            0.0
        } else {
            self.total_revenue / self.total_customers as f64
        }
    }

    /// `amount` as a percentage of the week's revenue.
    #[must_use]
    pub fn revenue_share(&self, amount: f64) -> f64 {
        if self.total_revenue > 0.0 {
            amount / self.total_revenue * 100.0
        } else {
            0.0
        }
    }

    /// Total units delivered over the week.
    #[must_use]
    pub fn total_delivered(&self) -> u32 {
        self.deliveries.iter().map(|d| d.units).sum()
    }
}
