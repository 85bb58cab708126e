//! # Property-Based Tests
//!
//! Invariants of the associative store, the catalog and the delivery split,
//! checked with proptest over arbitrary operation sequences.

use proptest::collection::vec;
use proptest::prelude::*;
use shelfsim_core::scheduler::split_delivery;
use shelfsim_core::store::next_prime;
use shelfsim_core::{AssociativeStore, Catalog, CatalogOptions, ProductId, ShelfError};
use std::collections::BTreeMap;

/// One mutation applied to a store.
#[derive(Debug, Clone)]
enum StoreOp {
    Set(String, u32),
    Delete(String),
}

fn store_op() -> impl Strategy<Value = StoreOp> {
    prop_oneof![
        ("[a-e]{1,3}", any::<u32>()).prop_map(|(k, v)| StoreOp::Set(k, v)),
        "[a-e]{1,3}".prop_map(StoreOp::Delete),
    ]
}

fn is_prime(n: usize) -> bool {
    n >= 2 && (2..n).take_while(|d| d * d <= n).all(|d| n % d != 0)
}

fn catalog() -> Catalog {
    Catalog::with_options(CatalogOptions {
        catalog_buckets: 7,
        category_buckets: 3,
        low_stock_threshold: 10,
        id_prefix: "MM".to_string(),
        id_seed: 99,
    })
}

// =============================================================================
// STORE
// =============================================================================

proptest! {
    /// `len` always equals the number of entries yielded by iteration, and the
    /// store agrees with a reference map.
    #[test]
    fn count_matches_entries(ops in vec(store_op(), 0..200)) {
        let mut store: AssociativeStore<String, u32> = AssociativeStore::with_buckets(5);
        let mut model = BTreeMap::new();

        for op in ops {
            match op {
                StoreOp::Set(k, v) => {
                    prop_assert_eq!(store.set(k.clone(), v), model.insert(k, v));
                }
                StoreOp::Delete(k) => {
                    prop_assert_eq!(store.delete(&k), model.remove(&k).is_some());
                }
            }
            prop_assert_eq!(store.len(), store.entries().count());
        }

        prop_assert_eq!(store.len(), model.len());
        for (k, v) in &model {
            prop_assert_eq!(store.get(k), Some(v));
        }
    }

    /// Growing past the load factor yields a larger prime bucket count and
    /// keeps every key retrievable.
    #[test]
    fn resize_keeps_keys_and_primes(keys in vec("[a-z]{1,8}", 1..300)) {
        let mut store: AssociativeStore<String, usize> = AssociativeStore::with_buckets(3);
        for (i, key) in keys.iter().enumerate() {
            let before = store.bucket_count();
            store.set(key.clone(), i);
            let after = store.bucket_count();

            prop_assert!(is_prime(after));
            prop_assert!(after >= before);
            prop_assert!(store.load_factor() <= 0.75);
        }

        let mut last = BTreeMap::new();
        for (i, key) in keys.iter().enumerate() {
            last.insert(key.clone(), i);
        }
        for (key, i) in &last {
            prop_assert_eq!(store.get(key), Some(i));
        }
    }

    /// `next_prime(n)` is the smallest prime at or above `n`.
    #[test]
    fn next_prime_is_smallest(n in 0usize..5_000) {
        let p = next_prime(n);
        prop_assert!(is_prime(p));
        prop_assert!(p >= n);
        prop_assert!((n..p).all(|m| !is_prime(m)));
    }
}

// =============================================================================
// CATALOG
// =============================================================================

/// One operation against a single catalog product.
#[derive(Debug, Clone)]
enum CatalogOp {
    Purchase(i64),
    Restock(i64),
    Price(f64),
}

fn catalog_op() -> impl Strategy<Value = CatalogOp> {
    prop_oneof![
        (-5i64..40).prop_map(CatalogOp::Purchase),
        (-5i64..40).prop_map(CatalogOp::Restock),
        (-10.0f64..50.0).prop_map(CatalogOp::Price),
    ]
}

proptest! {
    /// Quantity and price never go negative, whatever the caller asks for.
    #[test]
    fn catalog_never_negative(start in 0i64..60, ops in vec(catalog_op(), 0..100)) {
        let mut catalog = catalog();
        let id = catalog.add_product("Rice", 4.0, start, "Pantry").expect("add");

        for op in ops {
            let before = catalog.get(&id).expect("present").clone();
            let result = match op {
                CatalogOp::Purchase(n) => catalog.purchase(&id, n).map(|_| ()),
                CatalogOp::Restock(n) => catalog.restock(&id, n).map(|_| ()),
                CatalogOp::Price(p) => catalog.update_price(&id, p).map(|_| ()),
            };
            let after = catalog.get(&id).expect("present");

            prop_assert!(after.price >= 0.0);
            if let Err(err) = result {
                // Rejected operations leave the product untouched.
                prop_assert_eq!(&before, after);
                let expected_kind = err.is_validation() || matches!(err, ShelfError::InsufficientStock { .. });
                prop_assert!(expected_kind);
            }
        }
    }

    /// Restocking to a target never touches products already at or above it.
    #[test]
    fn restock_to_target_is_idempotent(quantities in vec(0i64..120, 1..30), target in 10u32..80) {
        let mut catalog = catalog();
        let ids: Vec<ProductId> = quantities
            .iter()
            .enumerate()
            .map(|(i, q)| catalog.add_product(&format!("p{i}"), 1.0, *q, "X").expect("add"))
            .collect();

        catalog.restock_low_to_target(10, target);
        let first: Vec<u32> = ids.iter().map(|id| catalog.get(id).expect("present").quantity).collect();
        let second_lines = catalog.restock_low_to_target(10, target);
        let second: Vec<u32> = ids.iter().map(|id| catalog.get(id).expect("present").quantity).collect();

        prop_assert!(second_lines.is_empty());
        prop_assert_eq!(first, second.clone());
        for (q, start) in second.iter().zip(&quantities) {
            if *start <= 10 {
                prop_assert_eq!(*q, target.max(*start as u32));
            } else {
                prop_assert_eq!(i64::from(*q), *start);
            }
        }
    }

    /// Every catalog id in a category list resolves to a product of that category.
    #[test]
    fn category_index_consistent(
        cats in vec(0usize..4, 1..40),
        moves in vec((0usize..40, 0usize..4), 0..20),
        removals in vec(0usize..40, 0..10),
    ) {
        const NAMES: [&str; 4] = ["Dairy", "Meat", "Snacks", "Bakery"];
        let mut catalog = catalog();
        let ids: Vec<ProductId> = cats
            .iter()
            .enumerate()
            .map(|(i, c)| catalog.add_product(&format!("p{i}"), 1.0, 1, NAMES[*c]).expect("add"))
            .collect();

        for (i, c) in moves {
            if let Some(id) = ids.get(i) {
                let _ = catalog.recategorize(id, NAMES[c]);
            }
        }
        for i in removals {
            if let Some(id) = ids.get(i) {
                let _ = catalog.remove_product(id);
            }
        }

        let mut indexed = 0;
        for name in NAMES {
            for id in catalog.category_ids(name) {
                let product = catalog.get(id).expect("indexed id exists");
                prop_assert_eq!(&product.category, name);
                indexed += 1;
            }
        }
        prop_assert_eq!(indexed, catalog.len());
    }
}

// =============================================================================
// DELIVERY
// =============================================================================

proptest! {
    /// Shares sum to the allotment and differ by at most one, larger first.
    #[test]
    fn delivery_split_conserves_units(units in 0u32..10_000, slots in 1usize..50) {
        let shares = split_delivery(units, slots);
        prop_assert_eq!(shares.len(), slots);
        prop_assert_eq!(shares.iter().sum::<u32>(), units);
        prop_assert!(shares.windows(2).all(|w| w[0] >= w[1] && w[0] - w[1] <= 1));
    }
}
