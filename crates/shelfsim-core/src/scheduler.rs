//! # Scheduler
//!
//! Drives the simulated week as a state machine:
//!
//! | Phase | Runs | Next |
//! |-------|------|------|
//! | `DayStart` | every day | `Delivery`, `PricingEvent` or `TimeBlock(0)` |
//! | `Delivery` | delivery days | `PricingEvent` or `TimeBlock(0)` |
//! | `PricingEvent` | clearance and surge days | `TimeBlock(0)` |
//! | `TimeBlock(i)` | every block | `TimeBlock(i + 1)` or `OvernightRestock` |
//! | `OvernightRestock` | every day | `DayEnd` |
//! | `DayEnd` | every day | next `DayStart` or `WeekComplete` |
//!
//! The scheduler owns the `Catalog` for the duration of the run and is the
//! only writer. Every draw comes from its seeded `StdRng`, so a seed and a
//! configuration fully determine the week.
//!
//! Stock-outs are business outcomes, not errors: a purchase failing with
//! `InsufficientStock` is counted and reported. Any other catalog error
//! aborts the run.

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::catalog::{Catalog, RestockLine};
use crate::config::SimConfig;
use crate::demand::DemandModel;
use crate::events::{
    ApprovalGate, EventRecord, EventSink, PriceChange, PriceProposal, ProposalKind, SimEvent,
};
use crate::report::{DayReport, DeliveryRecord, LowStockLine, SurgeRecord, WeekReport};
use crate::shopper::Shopper;
use crate::types::{ProductId, ShelfError, round_cents};

// =============================================================================
// PHASES
// =============================================================================

/// Position of the scheduler inside the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    DayStart,
    Delivery,
    PricingEvent,
    TimeBlock(usize),
    OvernightRestock,
    DayEnd,
    WeekComplete,
}

impl Phase {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Phase::DayStart => "Day Start",
            Phase::Delivery => "Delivery",
            Phase::PricingEvent => "Pricing Event",
            Phase::TimeBlock(_) => "Time Block",
            Phase::OvernightRestock => "Overnight Restock",
            Phase::DayEnd => "Day End",
            Phase::WeekComplete => "Week Complete",
        }
    }

    /// Check if the week is over.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::WeekComplete)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::TimeBlock(i) => write!(f, "{} {}", self.name(), i + 1),
            _ => f.write_str(self.name()),
        }
    }
}

// =============================================================================
// DAY PLAN
// =============================================================================

/// Effective customer count and cart cap of one block on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockPlan {
    pub label: String,
    pub customers: u32,
    pub max_cart: u32,
}

/// What happens on one day. Derived from the configuration each morning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    pub index: usize,
    pub day: String,
    pub traffic: f64,
    pub delivery: bool,
    pub clearance: bool,
    pub surge_rate: Option<f64>,
    pub blocks: Vec<BlockPlan>,
}

impl DayPlan {
    /// Plan day `index` of the configured week.
    #[must_use]
    pub fn for_day(config: &SimConfig, index: usize) -> Option<Self> {
        let day = config.week.days.get(index)?;
        let overrides = config.overrides_for(&day.name);

        let blocks = config
            .time_blocks
            .iter()
            .enumerate()
            .map(|(i, block)| match overrides.and_then(|o| o.get(i)) {
                Some(o) => BlockPlan {
                    label: block.label.clone(),
                    customers: o.customers,
                    max_cart: o.max_cart,
                },
                None => BlockPlan {
                    label: block.label.clone(),
                    customers: scaled_customers(block.customers, day.traffic),
                    max_cart: block.max_cart,
                },
            })
            .collect();

        Some(Self {
            index,
            day: day.name.clone(),
            traffic: day.traffic,
            delivery: config.is_delivery_day(&day.name),
            clearance: config.is_clearance_day(&day.name),
            surge_rate: config.surge_rate(&day.name),
            blocks,
        })
    }

    fn has_pricing_event(&self) -> bool {
        self.clearance || self.surge_rate.is_some()
    }
}

/// Nominal customers scaled by traffic, rounded down, at least one.
#[must_use]
pub fn scaled_customers(nominal: u32, traffic: f64) -> u32 {
    ((f64::from(nominal) * traffic).floor() as u32).max(1)
}

// =============================================================================
// STOCK ALGORITHMS
// =============================================================================

/// Split `units` across `slots` recipients: even shares, with the remainder
/// going one unit each to the first recipients.
#[must_use]
pub fn split_delivery(units: u32, slots: usize) -> Vec<u32> {
    let Ok(n) = u32::try_from(slots) else {
        return Vec::new();
    };
    if n == 0 {
        return Vec::new();
    }
    let per = units / n;
    let remainder = units % n;
    (0..n).map(|i| per + u32::from(i < remainder)).collect()
}

/// Distribute every warehouse allotment over the products that need it.
///
/// A product is eligible when it is at or below `ceiling` units. Categories
/// with no eligible product get nothing that day.
pub fn deliver(
    catalog: &mut Catalog,
    config: &SimConfig,
) -> Result<Vec<RestockLine>, ShelfError> {
    let ceiling = config.inventory.delivery_ceiling;
    let mut lines = Vec::new();

    for allotment in &config.warehouse {
        let eligible: Vec<ProductId> = catalog
            .products_by_category(&allotment.category)
            .into_iter()
            .filter(|p| p.quantity <= ceiling)
            .map(|p| p.id.clone())
            .collect();
        if eligible.is_empty() {
            continue;
        }

        let shares = split_delivery(allotment.units, eligible.len());
        for (id, amount) in eligible.into_iter().zip(shares) {
            if amount == 0 {
                continue;
            }
            let quantity = catalog.restock(&id, i64::from(amount))?;
            let name = catalog.product(&id)?.name.clone();
            lines.push(RestockLine {
                id,
                name,
                added: amount,
                quantity,
            });
        }
    }
    Ok(lines)
}

/// Overstocked products discounted for clearance, most overstocked first.
#[must_use]
pub fn clearance_candidates(catalog: &Catalog, config: &SimConfig) -> Vec<PriceChange> {
    let inv = &config.inventory;
    let mut candidates: Vec<PriceChange> = catalog
        .products()
        .filter(|p| p.quantity >= inv.high_stock_threshold)
        .map(|p| PriceChange {
            id: p.id.clone(),
            name: p.name.clone(),
            quantity: p.quantity,
            old_price: p.price,
            new_price: round_cents(p.price * (1.0 - inv.clearance_discount)),
        })
        .collect();
    candidates.sort_by(|a, b| b.quantity.cmp(&a.quantity));
    candidates.truncate(inv.clearance_limit);
    candidates
}

/// Surged prices for every product in the volatile category.
#[must_use]
pub fn surge_candidates(catalog: &Catalog, category: &str, rate: f64) -> Vec<PriceChange> {
    catalog
        .products_by_category(category)
        .into_iter()
        .map(|p| PriceChange {
            id: p.id.clone(),
            name: p.name.clone(),
            quantity: p.quantity,
            old_price: p.price,
            new_price: round_cents(p.price * (1.0 + rate)),
        })
        .collect()
}

// =============================================================================
// SCHEDULER
// =============================================================================

/// Numbers events in emission order.
#[derive(Debug, Default)]
struct Emitter {
    seq: u64,
}

impl Emitter {
    fn emit(&mut self, sink: &mut dyn EventSink, day: usize, event: SimEvent) {
        sink.emit(EventRecord {
            seq: self.seq,
            day,
            event,
        });
        self.seq += 1;
    }
}

/// The week-long simulation.
#[derive(Debug)]
pub struct Scheduler {
    config: SimConfig,
    catalog: Catalog,
    rng: StdRng,
    phase: Phase,
    day_index: usize,
    plan: Option<DayPlan>,
    today: DayReport,
    week: WeekReport,
    /// Pre-surge prices, restored at `DayEnd`.
    surge_snapshot: Vec<(ProductId, f64)>,
    customer_number: u64,
    emitter: Emitter,
}

impl Scheduler {
    /// Prepare a run over `catalog`. The configuration is validated here.
    pub fn new(config: SimConfig, catalog: Catalog, seed: u64) -> Result<Self, ShelfError> {
        config.validate()?;
        let week = WeekReport {
            value_before: catalog.total_value(),
            block_revenue: config
                .time_blocks
                .iter()
                .map(|b| (b.label.clone(), 0.0))
                .collect(),
            ..WeekReport::default()
        };
        Ok(Self {
            config,
            catalog,
            rng: StdRng::seed_from_u64(seed),
            phase: Phase::DayStart,
            day_index: 0,
            plan: None,
            today: DayReport::default(),
            week,
            surge_snapshot: Vec::new(),
            customer_number: 0,
            emitter: Emitter::default(),
        })
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Zero-based index of the current day.
    #[must_use]
    pub fn day_index(&self) -> usize {
        self.day_index
    }

    /// Plan of the day in progress.
    #[must_use]
    pub fn plan(&self) -> Option<&DayPlan> {
        self.plan.as_ref()
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Aggregates so far; complete once the phase is `WeekComplete`.
    #[must_use]
    pub fn report(&self) -> &WeekReport {
        &self.week
    }

    /// Give the catalog back, with all changes the run made to it.
    #[must_use]
    pub fn into_catalog(self) -> Catalog {
        self.catalog
    }

    /// Run every remaining phase and return the week's report.
    pub fn run_week(
        &mut self,
        sink: &mut dyn EventSink,
        gate: &mut dyn ApprovalGate,
    ) -> Result<WeekReport, ShelfError> {
        while !self.step(sink, gate)?.is_terminal() {}
        Ok(self.week.clone())
    }

    /// Execute the current phase and advance. Returns the new phase.
    ///
    /// Stepping a completed week is a no-op.
    pub fn step(
        &mut self,
        sink: &mut dyn EventSink,
        gate: &mut dyn ApprovalGate,
    ) -> Result<Phase, ShelfError> {
        self.phase = match self.phase {
            Phase::DayStart => self.start_day(sink),
            Phase::Delivery => self.run_delivery(sink)?,
            Phase::PricingEvent => self.run_pricing(sink, gate)?,
            Phase::TimeBlock(i) => self.run_block(sink, i)?,
            Phase::OvernightRestock => self.run_overnight(sink),
            Phase::DayEnd => self.end_day(sink)?,
            Phase::WeekComplete => Phase::WeekComplete,
        };
        Ok(self.phase)
    }

    // -------------------------------------------------------------------------
    // Phases
    // -------------------------------------------------------------------------

    fn start_day(&mut self, sink: &mut dyn EventSink) -> Phase {
        let Some(plan) = DayPlan::for_day(&self.config, self.day_index) else {
            return self.complete_week(sink);
        };

        tracing::info!(
            target: "shelfsim_core::scheduler",
            day = %plan.day,
            traffic = plan.traffic,
            delivery = plan.delivery,
            clearance = plan.clearance,
            surge = ?plan.surge_rate,
            "Day started"
        );
        self.today = DayReport {
            index: plan.index,
            day: plan.day.clone(),
            traffic: plan.traffic,
            block_revenue: vec![0.0; plan.blocks.len()],
            ..DayReport::default()
        };
        self.emitter.emit(
            sink,
            self.day_index,
            SimEvent::DayStarted {
                day: plan.day.clone(),
                traffic: plan.traffic,
                delivery: plan.delivery,
                clearance: plan.clearance,
                surge_rate: plan.surge_rate,
            },
        );

        let next = if plan.delivery {
            Phase::Delivery
        } else {
            after_delivery(&plan)
        };
        self.plan = Some(plan);
        next
    }

    fn run_delivery(&mut self, sink: &mut dyn EventSink) -> Result<Phase, ShelfError> {
        let lines = deliver(&mut self.catalog, &self.config)?;
        let total_units: u32 = lines.iter().map(|l| l.added).sum();

        tracing::info!(
            target: "shelfsim_core::scheduler",
            day = %self.today.day,
            products = lines.len(),
            units = total_units,
            "Delivery complete"
        );
        self.today.delivered = total_units;
        self.week.deliveries.push(DeliveryRecord {
            day: self.today.day.clone(),
            units: total_units,
        });
        self.emitter.emit(
            sink,
            self.day_index,
            SimEvent::DeliveryCompleted {
                day: self.today.day.clone(),
                lines,
                total_units,
            },
        );

        Ok(self.plan.as_ref().map_or(Phase::OvernightRestock, after_delivery))
    }

    fn run_pricing(
        &mut self,
        sink: &mut dyn EventSink,
        gate: &mut dyn ApprovalGate,
    ) -> Result<Phase, ShelfError> {
        let Some(plan) = self.plan.clone() else {
            return Ok(Phase::OvernightRestock);
        };

        if plan.clearance {
            let items = clearance_candidates(&self.catalog, &self.config);
            if items.is_empty() {
                tracing::info!(target: "shelfsim_core::scheduler", day = %plan.day, "No overstocked items");
            } else {
                let proposal = PriceProposal {
                    day: plan.day.clone(),
                    kind: ProposalKind::Clearance {
                        discount: self.config.inventory.clearance_discount,
                    },
                    items,
                };
                let approved = gate.request_approval(&proposal);
                if approved {
                    for item in &proposal.items {
                        self.catalog.update_price(&item.id, item.new_price)?;
                    }
                    self.week.clearance.extend(proposal.items.iter().cloned());
                }
                tracing::info!(
                    target: "shelfsim_core::scheduler",
                    day = %plan.day,
                    items = proposal.items.len(),
                    approved,
                    "Clearance proposal resolved"
                );
                self.emitter.emit(
                    sink,
                    self.day_index,
                    SimEvent::ProposalResolved { proposal, approved },
                );
            }
        }

        if let Some(rate) = plan.surge_rate {
            let category = &self.config.inventory.volatile_category;
            let items = surge_candidates(&self.catalog, category, rate);
            if !items.is_empty() {
                self.surge_snapshot = items
                    .iter()
                    .map(|item| (item.id.clone(), item.old_price))
                    .collect();
                let proposal = PriceProposal {
                    day: plan.day.clone(),
                    kind: ProposalKind::Surge { rate },
                    items,
                };
                let approved = gate.request_approval(&proposal);
                if approved {
                    for item in &proposal.items {
                        self.catalog.update_price(&item.id, item.new_price)?;
                    }
                }
                tracing::info!(
                    target: "shelfsim_core::scheduler",
                    day = %plan.day,
                    rate,
                    items = proposal.items.len(),
                    approved,
                    "Surge proposal resolved"
                );
                self.week.surges.push(SurgeRecord {
                    day: plan.day.clone(),
                    rate,
                    items: proposal.items.len(),
                    approved,
                });
                self.emitter.emit(
                    sink,
                    self.day_index,
                    SimEvent::ProposalResolved { proposal, approved },
                );
            }
        }

        Ok(first_block(&plan))
    }

    fn run_block(&mut self, sink: &mut dyn EventSink, index: usize) -> Result<Phase, ShelfError> {
        let Some(block) = self.plan.as_ref().and_then(|p| p.blocks.get(index)).cloned() else {
            return Ok(Phase::OvernightRestock);
        };
        let day_index = self.day_index;

        tracing::info!(
            target: "shelfsim_core::scheduler",
            day = %self.today.day,
            block = %block.label,
            customers = block.customers,
            "Block started"
        );
        self.emitter.emit(
            sink,
            day_index,
            SimEvent::BlockStarted {
                block: block.label.clone(),
                customers: block.customers,
                max_cart: block.max_cart,
            },
        );

        let Self {
            config,
            catalog,
            rng,
            today,
            week,
            customer_number,
            emitter,
            ..
        } = self;
        let config = &*config;
        let demand = DemandModel::new(config);
        let mut block_revenue = 0.0;

        for _ in 0..block.customers {
            let (shopper, cart) = {
                let shelf = catalog.in_stock();
                if shelf.is_empty() {
                    tracing::warn!(
                        target: "shelfsim_core::scheduler",
                        block = %block.label,
                        "No products left in stock"
                    );
                    emitter.emit(
                        sink,
                        day_index,
                        SimEvent::ShelvesEmpty {
                            block: block.label.clone(),
                        },
                    );
                    break;
                }
                let profile = demand
                    .select_profile(rng, index)
                    .ok_or_else(|| ShelfError::InvalidConfig("no shopper profiles".to_string()))?;
                let shopper = Shopper::generate(rng, config, profile);
                let cart: Vec<ProductId> = demand
                    .build_cart(rng, &shelf, profile, block.max_cart)
                    .into_iter()
                    .map(|p| p.id.clone())
                    .collect();
                (shopper, cart)
            };

            *customer_number += 1;
            today.customers += 1;
            *week.profile_counts.entry(shopper.profile.clone()).or_insert(0) += 1;
            tracing::debug!(
                target: "shelfsim_core::scheduler",
                customer = *customer_number,
                shopper = %shopper,
                cart = cart.len(),
                "Customer served"
            );
            let customer = shopper.full_name();
            emitter.emit(
                sink,
                day_index,
                SimEvent::CustomerServed {
                    number: *customer_number,
                    shopper,
                    cart_size: cart.len(),
                },
            );

            for id in cart {
                let wanted = demand.purchase_quantity(rng);
                match catalog.purchase(&id, i64::from(wanted)) {
                    Ok(receipt) => {
                        let amount = receipt.line_total();
                        block_revenue += amount;
                        today.revenue += amount;
                        today.items_sold += u64::from(receipt.quantity);
                        *week.product_sales.entry(receipt.name.clone()).or_insert(0) +=
                            u64::from(receipt.quantity);
                        let low = receipt.low_stock.then(|| SimEvent::LowStock {
                            id: receipt.id.clone(),
                            name: receipt.name.clone(),
                            remaining: receipt.remaining,
                        });
                        if receipt.low_stock {
                            week.low_stock_hits.insert(receipt.name.clone());
                        }
                        emitter.emit(sink, day_index, SimEvent::PurchaseSucceeded { receipt });
                        if let Some(event) = low {
                            emitter.emit(sink, day_index, event);
                        }
                    }
                    Err(ShelfError::InsufficientStock {
                        id,
                        requested,
                        available,
                    }) => {
                        let product = catalog.product(&id)?;
                        let name = product.name.clone();
                        let unit_price = product.price;
                        tracing::warn!(
                            target: "shelfsim_core::scheduler",
                            customer = %customer,
                            product = %name,
                            requested,
                            available,
                            "Stock-out"
                        );
                        today.failed_purchases += 1;
                        emitter.emit(
                            sink,
                            day_index,
                            SimEvent::PurchaseFailed {
                                id,
                                name,
                                customer: customer.clone(),
                                requested,
                                available,
                                unit_price,
                            },
                        );
                    }
                    Err(e) => return Err(e),
                }
            }
        }

        if let Some(slot) = today.block_revenue.get_mut(index) {
            *slot += block_revenue;
        }
        if let Some(slot) = week.block_revenue.get_mut(index) {
            slot.1 += block_revenue;
        }
        emitter.emit(
            sink,
            day_index,
            SimEvent::BlockClosed {
                block: block.label.clone(),
                revenue: block_revenue,
            },
        );
        let next = index + 1;
        Ok(if next < self.plan.as_ref().map_or(0, |p| p.blocks.len()) {
            Phase::TimeBlock(next)
        } else {
            Phase::OvernightRestock
        })
    }

    fn run_overnight(&mut self, sink: &mut dyn EventSink) -> Phase {
        let inv = &self.config.inventory;
        self.today.low_at_close = self.catalog.low_stock(inv.low_stock_threshold).len();
        let lines = self
            .catalog
            .restock_low_to_target(inv.low_stock_threshold, inv.restock_target);
        self.today.restocked = lines.iter().map(|l| l.added).sum();

        tracing::info!(
            target: "shelfsim_core::scheduler",
            day = %self.today.day,
            products = lines.len(),
            units = self.today.restocked,
            "Overnight restock"
        );
        self.emitter
            .emit(sink, self.day_index, SimEvent::OvernightRestock { lines });
        Phase::DayEnd
    }

    fn end_day(&mut self, sink: &mut dyn EventSink) -> Result<Phase, ShelfError> {
        if let Some(plan) = &self.plan
            && plan.surge_rate.is_some()
            && !self.surge_snapshot.is_empty()
        {
            let snapshot = std::mem::take(&mut self.surge_snapshot);
            let mut restored = 0;
            for (id, price) in snapshot {
                // A product removed mid-day has nothing to restore.
                if self.catalog.get(&id).is_some() {
                    self.catalog.update_price(&id, price)?;
                    restored += 1;
                }
            }
            tracing::info!(
                target: "shelfsim_core::scheduler",
                day = %plan.day,
                restored,
                "Surge prices restored"
            );
            self.emitter.emit(
                sink,
                self.day_index,
                SimEvent::SurgeReverted {
                    day: plan.day.clone(),
                    restored,
                },
            );
        }

        let report = std::mem::take(&mut self.today);
        self.week.total_revenue += report.revenue;
        self.week.total_items += report.items_sold;
        self.week.total_customers += report.customers;
        self.week.failed_purchases += report.failed_purchases;

        tracing::info!(
            target: "shelfsim_core::scheduler",
            day = %report.day,
            revenue = report.revenue,
            customers = report.customers,
            items = report.items_sold,
            "Day closed"
        );
        self.emitter.emit(
            sink,
            self.day_index,
            SimEvent::DayClosed {
                report: report.clone(),
            },
        );
        self.week.days.push(report);
        self.plan = None;
        self.day_index += 1;

        Ok(if self.day_index < self.config.week.days.len() {
            Phase::DayStart
        } else {
            self.complete_week(sink)
        })
    }

    fn complete_week(&mut self, sink: &mut dyn EventSink) -> Phase {
        let threshold = self.config.inventory.low_stock_threshold;
        self.week.value_after = self.catalog.total_value();
        self.week.end_low_stock = self
            .catalog
            .low_stock(threshold)
            .into_iter()
            .map(|p| LowStockLine {
                name: p.name.clone(),
                quantity: p.quantity,
            })
            .collect();

        tracing::info!(
            target: "shelfsim_core::scheduler",
            revenue = self.week.total_revenue,
            customers = self.week.total_customers,
            items = self.week.total_items,
            failed = self.week.failed_purchases,
            "Week complete"
        );
        let day = self.day_index.saturating_sub(1);
        self.emitter.emit(
            sink,
            day,
            SimEvent::WeekComplete {
                report: Box::new(self.week.clone()),
            },
        );
        Phase::WeekComplete
    }
}

fn after_delivery(plan: &DayPlan) -> Phase {
    if plan.has_pricing_event() {
        Phase::PricingEvent
    } else {
        first_block(plan)
    }
}

fn first_block(plan: &DayPlan) -> Phase {
    if plan.blocks.is_empty() {
        Phase::OvernightRestock
    } else {
        Phase::TimeBlock(0)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::catalog::CatalogOptions;
    use crate::config::BlockOverride;
    use crate::events::{ApprovalPolicy, AutoApprove, NullSink};

    fn empty_catalog() -> Catalog {
        Catalog::with_options(CatalogOptions {
            id_seed: 1,
            ..CatalogOptions::default()
        })
    }

    #[test]
    fn split_delivery_conserves_units() {
        assert_eq!(split_delivery(50, 3), vec![17, 17, 16]);
        assert_eq!(split_delivery(2, 4), vec![1, 1, 0, 0]);
        assert!(split_delivery(10, 0).is_empty());
    }

    #[test]
    fn traffic_scaling_rounds_down_with_floor_of_one() {
        assert_eq!(scaled_customers(8, 0.8), 6);
        assert_eq!(scaled_customers(12, 1.4), 16);
        assert_eq!(scaled_customers(1, 0.5), 1);
    }

    #[test]
    fn day_plan_uses_overrides_verbatim() {
        let mut config = SimConfig::default();
        config.week.overrides.insert(
            "Saturday".to_string(),
            vec![BlockOverride { customers: 2, max_cart: 9 }; 4],
        );
        let saturday = DayPlan::for_day(&config, 5).unwrap();
        assert!(saturday.blocks.iter().all(|b| b.customers == 2 && b.max_cart == 9));
        assert_eq!(saturday.surge_rate, Some(0.25));

        let friday = DayPlan::for_day(&config, 4).unwrap();
        assert!(friday.delivery && friday.clearance);
        assert_eq!(friday.blocks[2].customers, 13);
        assert!(DayPlan::for_day(&config, 7).is_none());
    }

    #[test]
    fn delivery_skips_categories_without_eligible_products() {
        let config = SimConfig::default();
        let mut catalog = empty_catalog();
        let full = catalog.add_product("Milk", 4.0, 100, "Dairy").unwrap();
        let a = catalog.add_product("Chips", 4.0, 5, "Snacks").unwrap();
        let b = catalog.add_product("Trail Mix", 6.0, 25, "Snacks").unwrap();

        let lines = deliver(&mut catalog, &config).unwrap();
        assert_eq!(lines.iter().map(|l| l.added).sum::<u32>(), 40);
        assert_eq!(catalog.get(&full).unwrap().quantity, 100);
        assert_eq!(catalog.get(&a).unwrap().quantity, 25);
        assert_eq!(catalog.get(&b).unwrap().quantity, 45);
    }

    #[test]
    fn clearance_ranks_by_quantity_and_caps_at_limit() {
        let config = SimConfig::default();
        let mut catalog = empty_catalog();
        for (i, qty) in [60, 200, 55, 90, 120, 75, 10].iter().enumerate() {
            catalog
                .add_product(&format!("p{i}"), 3.0, *qty, "Pantry")
                .unwrap();
        }
        let picks = clearance_candidates(&catalog, &config);
        let quantities: Vec<u32> = picks.iter().map(|p| p.quantity).collect();
        assert_eq!(quantities, vec![200, 120, 90, 75, 60]);
        assert!(picks.iter().all(|p| (p.new_price - 1.5).abs() < 1e-9));
    }

    #[test]
    fn phases_follow_the_day_shape() {
        let config = SimConfig::default();
        let catalog = Catalog::seeded(&config, 3).unwrap();
        let mut scheduler = Scheduler::new(config, catalog, 3).unwrap();
        let mut sink = NullSink;
        let mut gate = AutoApprove(false);

        // Monday: no delivery, no pricing event.
        assert_eq!(scheduler.step(&mut sink, &mut gate).unwrap(), Phase::TimeBlock(0));
        for i in 1..4 {
            assert_eq!(scheduler.step(&mut sink, &mut gate).unwrap(), Phase::TimeBlock(i));
        }
        assert_eq!(
            scheduler.step(&mut sink, &mut gate).unwrap(),
            Phase::OvernightRestock
        );
        assert_eq!(scheduler.step(&mut sink, &mut gate).unwrap(), Phase::DayEnd);
        assert_eq!(scheduler.step(&mut sink, &mut gate).unwrap(), Phase::DayStart);

        // Tuesday: delivery, no pricing event.
        assert_eq!(scheduler.step(&mut sink, &mut gate).unwrap(), Phase::Delivery);
        assert_eq!(scheduler.step(&mut sink, &mut gate).unwrap(), Phase::TimeBlock(0));
        assert_eq!(scheduler.day_index(), 1);
    }

    #[test]
    fn week_runs_to_completion_and_stays_there() {
        let config = SimConfig::default();
        let catalog = Catalog::seeded(&config, 5).unwrap();
        let mut scheduler = Scheduler::new(config, catalog, 5).unwrap();
        let mut events = Vec::new();
        let mut gate = ApprovalPolicy {
            clearance: true,
            surge: true,
        };

        let report = scheduler.run_week(&mut events, &mut gate).unwrap();
        assert_eq!(report.days.len(), 7);
        assert_eq!(report.deliveries.len(), 2);
        assert_eq!(report.surges.len(), 2);
        assert_eq!(
            report.total_customers,
            report.profile_counts.values().sum::<u64>()
        );
        assert!(events.windows(2).all(|w| w[0].seq + 1 == w[1].seq));
        assert!(matches!(
            events.last().unwrap().event,
            SimEvent::WeekComplete { .. }
        ));

        let before = events.len();
        assert_eq!(
            scheduler.step(&mut events, &mut gate).unwrap(),
            Phase::WeekComplete
        );
        assert_eq!(events.len(), before);
    }

    #[test]
    fn same_seed_same_week() {
        let run = |seed| {
            let config = SimConfig::default();
            let catalog = Catalog::seeded(&config, seed).unwrap();
            let mut scheduler = Scheduler::new(config, catalog, seed).unwrap();
            scheduler
                .run_week(&mut NullSink, &mut AutoApprove(true))
                .unwrap()
        };
        assert_eq!(run(11), run(11));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = SimConfig::default();
        config.purchase_tiers.clear();
        let err = Scheduler::new(config, empty_catalog(), 0).unwrap_err();
        assert!(err.is_validation());
    }
}
