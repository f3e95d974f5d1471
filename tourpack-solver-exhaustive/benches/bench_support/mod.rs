//! Benchmark support utilities for the exhaustive search.
//!
//! Provides deterministic tour catalogs whose attractions overlap the way
//! regional catalogs do: neighbouring tours tend to share sites.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tourpack_core::{Limit, Limits, Tour};

/// Seed for deterministic random number generation in benchmarks.
pub const BENCHMARK_SEED: u64 = 42;

/// Attractions in the shared pool per generated tour.
const ATTRACTIONS_PER_TOUR: u64 = 2;

/// Largest number of attractions a generated tour covers.
const MAX_TOUR_ATTRACTIONS: usize = 3;

/// Generate `count` tours with ids `1..=count`.
///
/// Costs lie in `[20, 200)`, values in `[1, 10)` and durations in `1..=4`
/// days. Attractions are drawn from a pool proportional to the catalog size so
/// overlaps stay frequent as it grows.
#[must_use]
pub fn generate_catalog(count: usize, seed: u64) -> Vec<Tour> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let pool = (count as u64).saturating_mul(ATTRACTIONS_PER_TOUR).max(1);

    (1..=count as u64)
        .map(|id| {
            let covered = rng.gen_range(1..=MAX_TOUR_ATTRACTIONS);
            let attractions: Vec<u64> = (0..covered).map(|_| rng.gen_range(0..pool)).collect();
            Tour::new(
                id,
                format!("tour {id}"),
                rng.gen_range(1..=4),
                rng.gen_range(20.0..200.0_f64).round(),
                rng.gen_range(1.0..10.0_f64).round(),
            )
            .with_attractions(attractions)
        })
        .collect()
}

/// Limits that admit roughly a third of a catalog of `count` tours.
#[must_use]
pub fn benchmark_limits(count: usize) -> Limits {
    let days = u32::try_from(count).unwrap_or(u32::MAX);
    Limits::new(Limit::AtMost(days), Limit::AtMost(f64::from(days) * 40.0))
}
