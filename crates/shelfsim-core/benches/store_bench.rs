//! # Store Benchmarks
//!
//! Performance benchmarks for the associative store and a full simulated week.
//!
//! Run with: `cargo bench -p shelfsim-core`

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use shelfsim_core::{AssociativeStore, AutoApprove, Catalog, NullSink, Scheduler, SimConfig};
use std::hint::black_box;

fn keys(size: usize) -> Vec<String> {
    (0..size).map(|i| format!("MM-{i:06}")).collect()
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_store_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("store_insert");

    for size in [100, 1000, 10000].iter() {
        let keys = keys(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &keys, |b, keys| {
            b.iter(|| {
                let mut store = AssociativeStore::new();
                for (i, key) in keys.iter().enumerate() {
                    store.set(key.clone(), i);
                }
                black_box(store)
            });
        });
    }

    group.finish();
}

fn bench_store_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("store_lookup");

    for size in [100, 1000, 10000].iter() {
        let keys = keys(*size);
        let mut store = AssociativeStore::new();
        for (i, key) in keys.iter().enumerate() {
            store.set(key.clone(), i);
        }
        group.bench_with_input(BenchmarkId::from_parameter(size), &keys, |b, keys| {
            b.iter(|| {
                let mut hits = 0usize;
                for key in keys {
                    if store.get(key).is_some() {
                        hits += 1;
                    }
                }
                black_box(hits)
            });
        });
    }

    group.finish();
}

fn bench_week(c: &mut Criterion) {
    let config = SimConfig::default();

    c.bench_function("simulate_week", |b| {
        b.iter(|| {
            let catalog = Catalog::seeded(&config, 7).expect("seed");
            let mut scheduler = Scheduler::new(config.clone(), catalog, 7).expect("scheduler");
            let report = scheduler
                .run_week(&mut NullSink, &mut AutoApprove(true))
                .expect("run");
            black_box(report)
        });
    });
}

criterion_group!(benches, bench_store_insert, bench_store_lookup, bench_week);
criterion_main!(benches);
