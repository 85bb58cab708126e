//! # Scenario Tests
//!
//! End-to-end behaviour of the engine, grouped by layer:
//! - S0: Catalog stock rules
//! - S1: Demand model edge cases
//! - S2: Delivery and overnight restock
//! - S3: Approval-gated pricing events
//! - S4: Full week aggregates

use shelfsim_core::{
    ApprovalGate, AutoApprove, Catalog, CatalogOptions, DemandModel, EventRecord, NullSink,
    PriceProposal, ProposalKind, Scheduler, ShelfError, SimConfig, SimEvent,
};

fn empty_catalog() -> Catalog {
    Catalog::with_options(CatalogOptions {
        id_seed: 17,
        ..CatalogOptions::default()
    })
}

/// A one-day week with a single quiet block; keeps scenarios small.
fn one_day(day: &str) -> SimConfig {
    let mut config = SimConfig::default();
    config.week.days.retain(|d| d.name == day);
    let keep = |d: &String| d == day;
    config.week.delivery_days.retain(keep);
    config.week.surge_rates.retain(|d, _| keep(d));
    if config.week.clearance_day.as_deref() != Some(day) {
        config.week.clearance_day = None;
    }
    config
}

/// Records every proposal it sees and answers with a fixed value.
struct Recorder {
    answer: bool,
    seen: Vec<PriceProposal>,
}

impl ApprovalGate for Recorder {
    fn request_approval(&mut self, proposal: &PriceProposal) -> bool {
        self.seen.push(proposal.clone());
        self.answer
    }
}

// =============================================================================
// S0: CATALOG STOCK RULES
// =============================================================================

mod s0_catalog {
    use super::*;

    /// S0.1: Buying the whole shelf empties it; the next unit is a stock-out.
    #[test]
    fn purchase_to_zero_then_stock_out() {
        let mut catalog = empty_catalog();
        let id = catalog
            .add_product("Cheesecake", 10.0, 5, "Desserts")
            .expect("add");

        let receipt = catalog.purchase(&id, 5).expect("purchase");
        assert_eq!(receipt.remaining, 0);

        let err = catalog.purchase(&id, 1).expect_err("stock-out");
        assert!(matches!(
            err,
            ShelfError::InsufficientStock {
                requested: 1,
                available: 0,
                ..
            }
        ));
        assert!(!err.is_validation());
    }

    /// S0.2: Unknown ids fail every id-addressed operation.
    #[test]
    fn unknown_id_not_found() {
        let mut catalog = empty_catalog();
        let id = shelfsim_core::ProductId::new("MM-000000");
        assert!(matches!(catalog.restock(&id, 1), Err(ShelfError::ProductNotFound(_))));
        assert!(matches!(catalog.update_price(&id, 1.0), Err(ShelfError::ProductNotFound(_))));
        assert!(matches!(catalog.remove_product(&id), Err(ShelfError::ProductNotFound(_))));
        assert!(matches!(catalog.recategorize(&id, "X"), Err(ShelfError::ProductNotFound(_))));
    }
}

// =============================================================================
// S1: DEMAND MODEL
// =============================================================================

mod s1_demand {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    /// S1.1: An empty shelf yields an empty cart for every profile.
    #[test]
    fn empty_catalog_builds_empty_cart() {
        let config = SimConfig::default();
        let catalog = empty_catalog();
        let model = DemandModel::new(&config);
        let mut rng = StdRng::seed_from_u64(1);

        for profile in &config.profiles {
            let cart = model.build_cart(&mut rng, &catalog.in_stock(), profile, 6);
            assert!(cart.is_empty());
        }
    }

    /// S1.2: Cart size never exceeds the products on offer.
    #[test]
    fn cart_capped_by_available_products() {
        let config = SimConfig::default();
        let mut catalog = empty_catalog();
        catalog.add_product("Bread", 4.0, 10, "Bakery").expect("add");
        catalog.add_product("Bagels", 4.0, 10, "Bakery").expect("add");
        let model = DemandModel::new(&config);
        let mut rng = StdRng::seed_from_u64(2);

        let office = config.profile("Office Worker").expect("profile");
        for _ in 0..50 {
            let shelf = catalog.in_stock();
            let cart = model.build_cart(&mut rng, &shelf, office, 10);
            assert!(cart.len() <= 2);
        }
    }
}

// =============================================================================
// S2: DELIVERY & RESTOCK
// =============================================================================

mod s2_stock_flow {
    use super::*;
    use shelfsim_core::WarehouseAllotment;
    use shelfsim_core::scheduler::deliver;

    /// S2.1: 50 units over 3 eligible products -> 17, 17, 16.
    #[test]
    fn fifty_units_over_three_products() {
        let mut config = SimConfig::default();
        config.warehouse = vec![WarehouseAllotment {
            category: "Dairy".to_string(),
            units: 50,
        }];
        let mut catalog = empty_catalog();
        let ids: Vec<_> = ["Milk", "Butter", "Yogurt"]
            .iter()
            .map(|n| catalog.add_product(n, 2.0, 0, "Dairy").expect("add"))
            .collect();

        let lines = deliver(&mut catalog, &config).expect("deliver");
        let added: Vec<u32> = lines.iter().map(|l| l.added).collect();
        assert_eq!(added, vec![17, 17, 16]);
        let quantities: Vec<u32> = ids
            .iter()
            .map(|id| catalog.get(id).expect("present").quantity)
            .collect();
        assert_eq!(quantities, vec![17, 17, 16]);
    }

    /// S2.2: Overnight restock lifts every low product to the target.
    #[test]
    fn overnight_restock_reaches_target() {
        let config = one_day("Monday");
        let mut catalog = empty_catalog();
        let low = catalog.add_product("Granola Bars", 4.0, 3, "Snacks").expect("add");
        let mut scheduler = Scheduler::new(config, catalog, 4).expect("scheduler");
        let mut events: Vec<EventRecord> = Vec::new();
        scheduler
            .run_week(&mut events, &mut AutoApprove(false))
            .expect("run");

        let catalog = scheduler.into_catalog();
        let product = catalog.get(&low).expect("present");
        assert!(product.quantity > 10);
        assert!(
            events
                .iter()
                .any(|r| matches!(r.event, SimEvent::OvernightRestock { .. }))
        );
    }
}

// =============================================================================
// S3: PRICING EVENTS
// =============================================================================

mod s3_pricing {
    use super::*;

    fn prices(catalog: &Catalog) -> Vec<(String, f64)> {
        let mut prices: Vec<(String, f64)> = catalog
            .products()
            .map(|p| (p.id.to_string(), p.price))
            .collect();
        prices.sort_by(|a, b| a.0.cmp(&b.0));
        prices
    }

    /// S3.1: A declined clearance changes no price.
    #[test]
    fn declined_clearance_changes_nothing() {
        let config = one_day("Friday");
        let catalog = Catalog::seeded(&config, 21).expect("seed");
        let before = prices(&catalog);

        let mut gate = Recorder {
            answer: false,
            seen: Vec::new(),
        };
        let mut scheduler = Scheduler::new(config, catalog, 21).expect("scheduler");
        let report = scheduler.run_week(&mut NullSink, &mut gate).expect("run");

        assert_eq!(gate.seen.len(), 1);
        assert!(gate.seen[0].is_clearance());
        assert_eq!(gate.seen[0].items.len(), 5);
        assert!(report.clearance.is_empty());
        assert_eq!(prices(&scheduler.into_catalog()), before);
    }

    /// S3.2: An approved clearance halves the candidates' prices and sticks.
    #[test]
    fn approved_clearance_is_permanent() {
        let config = one_day("Friday");
        let catalog = Catalog::seeded(&config, 22).expect("seed");
        let mut gate = Recorder {
            answer: true,
            seen: Vec::new(),
        };
        let mut scheduler = Scheduler::new(config, catalog, 22).expect("scheduler");
        let report = scheduler.run_week(&mut NullSink, &mut gate).expect("run");

        assert_eq!(report.clearance.len(), 5);
        let catalog = scheduler.into_catalog();
        for change in &report.clearance {
            let product = catalog.get(&change.id).expect("present");
            assert!((product.price - change.new_price).abs() < 1e-9);
            assert!((change.new_price - change.old_price * 0.5).abs() < 0.01);
        }
    }

    /// S3.3: An approved surge raises prices for the day, revenue keeps the
    /// surged price, and day end restores the originals.
    #[test]
    fn approved_surge_is_reverted_at_day_end() {
        let config = one_day("Saturday");
        let catalog = Catalog::seeded(&config, 23).expect("seed");
        let before = prices(&catalog);

        let mut gate = Recorder {
            answer: true,
            seen: Vec::new(),
        };
        let mut events: Vec<EventRecord> = Vec::new();
        let mut scheduler = Scheduler::new(config, catalog, 23).expect("scheduler");
        let report = scheduler.run_week(&mut events, &mut gate).expect("run");

        let proposal = &gate.seen[0];
        assert!(matches!(proposal.kind, ProposalKind::Surge { rate } if (rate - 0.25).abs() < 1e-9));
        assert_eq!(proposal.items.len(), 3);
        assert!(report.surges[0].approved);

        // Alcohol sold during the day was charged at the surged price.
        for record in &events {
            if let SimEvent::PurchaseSucceeded { receipt } = &record.event
                && let Some(item) = proposal.items.iter().find(|i| i.id == receipt.id)
            {
                assert!((receipt.unit_price - item.new_price).abs() < 1e-9);
            }
        }
        assert!(
            events
                .iter()
                .any(|r| matches!(r.event, SimEvent::SurgeReverted { restored: 3, .. }))
        );
        assert_eq!(prices(&scheduler.into_catalog()), before);
    }

    /// S3.4: A declined surge still restores (a no-op) and records the decision.
    #[test]
    fn declined_surge_leaves_prices() {
        let config = one_day("Sunday");
        let catalog = Catalog::seeded(&config, 24).expect("seed");
        let before = prices(&catalog);
        let mut scheduler = Scheduler::new(config, catalog, 24).expect("scheduler");
        let report = scheduler
            .run_week(&mut NullSink, &mut AutoApprove(false))
            .expect("run");

        assert_eq!(report.surges.len(), 1);
        assert!(!report.surges[0].approved);
        assert_eq!(prices(&scheduler.into_catalog()), before);
    }
}

// =============================================================================
// S4: FULL WEEK
// =============================================================================

mod s4_week {
    use super::*;

    /// S4.1: Daily figures add up to the weekly totals.
    #[test]
    fn day_totals_sum_to_week() {
        let config = SimConfig::default();
        let catalog = Catalog::seeded(&config, 30).expect("seed");
        let mut scheduler = Scheduler::new(config, catalog, 30).expect("scheduler");
        let report = scheduler
            .run_week(&mut NullSink, &mut AutoApprove(true))
            .expect("run");

        let revenue: f64 = report.days.iter().map(|d| d.revenue).sum();
        let blocks: f64 = report.block_revenue.iter().map(|(_, r)| r).sum();
        assert!((revenue - report.total_revenue).abs() < 1e-6);
        assert!((blocks - report.total_revenue).abs() < 1e-6);
        assert_eq!(
            report.days.iter().map(|d| d.customers).sum::<u64>(),
            report.total_customers
        );
        assert_eq!(
            report.product_sales.values().sum::<u64>(),
            report.total_items
        );
        assert_eq!(report.days.iter().map(|d| d.day.as_str()).collect::<Vec<_>>(), [
            "Monday",
            "Tuesday",
            "Wednesday",
            "Thursday",
            "Friday",
            "Saturday",
            "Sunday"
        ]);
        assert_eq!(report.deliveries.iter().map(|d| d.day.as_str()).collect::<Vec<_>>(), [
            "Tuesday", "Friday"
        ]);
    }

    /// S4.2: A single scarce product runs out all week. Every stock-out is
    /// counted and reported with its shelf price, and every sale flags low
    /// stock.
    #[test]
    fn stock_outs_are_counted_not_fatal() {
        let mut config = SimConfig::default();
        config.week.delivery_days.clear();
        config.inventory.restock_target = 10;
        let mut catalog = empty_catalog();
        catalog
            .add_product("Whole Milk", 3.5, 3, "Dairy")
            .expect("add");

        let mut scheduler = Scheduler::new(config, catalog, 32).expect("scheduler");
        let mut events: Vec<EventRecord> = Vec::new();
        let report = scheduler
            .run_week(&mut events, &mut AutoApprove(false))
            .expect("run");

        let failures: Vec<f64> = events
            .iter()
            .filter_map(|r| match &r.event {
                SimEvent::PurchaseFailed { unit_price, .. } => Some(*unit_price),
                _ => None,
            })
            .collect();
        assert!(!failures.is_empty());
        assert_eq!(report.failed_purchases, failures.len() as u64);
        assert_eq!(
            report.days.iter().map(|d| d.failed_purchases).sum::<u64>(),
            report.failed_purchases
        );
        assert!(failures.iter().all(|p| (p - 3.5).abs() < 1e-9));

        let sales = events
            .iter()
            .filter(|r| matches!(r.event, SimEvent::PurchaseSucceeded { .. }))
            .count();
        let low_events = events
            .iter()
            .filter(|r| matches!(r.event, SimEvent::LowStock { .. }))
            .count();
        assert!(sales > 0);
        assert_eq!(low_events, sales);
        assert!(report.low_stock_hits.contains("Whole Milk"));
        assert!(report.deliveries.is_empty());
    }

    /// S4.3: An empty store serves nobody and still completes the week.
    #[test]
    fn empty_store_completes() {
        let config = SimConfig::default();
        let mut scheduler = Scheduler::new(config, empty_catalog(), 31).expect("scheduler");
        let mut events: Vec<EventRecord> = Vec::new();
        let report = scheduler
            .run_week(&mut events, &mut AutoApprove(true))
            .expect("run");

        assert_eq!(report.total_customers, 0);
        assert!(report.total_revenue.abs() < f64::EPSILON);
        let empties = events
            .iter()
            .filter(|r| matches!(r.event, SimEvent::ShelvesEmpty { .. }))
            .count();
        assert_eq!(empties, 7 * 4);
    }
}
