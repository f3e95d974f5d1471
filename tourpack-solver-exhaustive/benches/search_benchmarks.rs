//! Criterion benchmarks for the exhaustive search.
//!
//! Measures search time across catalog sizes (8, 12, 16, 20 tours). The search
//! is exponential, so each step of four tours multiplies the tree by sixteen
//! before pruning; the unconstrained group shows the cost of the full tree.
//!
//! Run benchmarks with:
//! ```bash
//! cargo bench --package tourpack-solver-exhaustive
//! ```

// Criterion macros generate code that triggers missing_docs warnings.
#![allow(missing_docs, reason = "Criterion macros generate undocumented code")]

use std::time::Duration;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use tourpack_core::Limits;
use tourpack_solver_exhaustive::search;

mod bench_support;

use bench_support::{BENCHMARK_SEED, benchmark_limits, generate_catalog};

/// Catalog sizes to benchmark.
const CATALOG_SIZES: &[usize] = &[8, 12, 16, 20];

/// Benchmark searches under limits that prune part of the tree.
fn bench_constrained_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("constrained_search");
    group.sample_size(30);
    group.measurement_time(Duration::from_secs(10));

    for &size in CATALOG_SIZES {
        let tours = generate_catalog(size, BENCHMARK_SEED);
        let limits = benchmark_limits(size);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("tours", size), &size, |b, _| {
            b.iter(|| search(&tours, &limits));
        });
    }

    group.finish();
}

/// Benchmark searches without limits over pairwise-disjoint tours.
fn bench_unconstrained_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("unconstrained_search");
    group.sample_size(10);

    for &size in CATALOG_SIZES.iter().take(3) {
        let tours: Vec<_> = generate_catalog(size, BENCHMARK_SEED)
            .into_iter()
            .map(|tour| {
                let id = tour.id;
                tour.with_attractions([id])
            })
            .collect();
        let limits = Limits::unbounded();

        group.bench_with_input(BenchmarkId::new("tours", size), &size, |b, _| {
            b.iter(|| search(&tours, &limits));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_constrained_search, bench_unconstrained_search);
criterion_main!(benches);
