//! Proptest strategies and a brute-force oracle for search property tests.
//!
//! Costs and values are whole numbers so sums are exact regardless of the
//! order tours are added in.

use std::collections::HashSet;

use proptest::prelude::*;
use tourpack_core::{AttractionId, Limit, Limits, Tour};

/// Strategy for a tour sequence of `min_count..=max_count` tours with unique
/// ids and attractions drawn from a small pool so overlaps are common.
pub fn tour_set_strategy(min_count: usize, max_count: usize) -> impl Strategy<Value = Vec<Tour>> {
    (min_count..=max_count).prop_flat_map(|count| {
        proptest::collection::vec(tour_strategy(), count).prop_map(|tours| {
            tours
                .into_iter()
                .zip(1_u64..)
                .map(|(tour, id)| Tour { id, ..tour })
                .collect()
        })
    })
}

/// Strategy for a single tour; the id is assigned by [`tour_set_strategy`].
fn tour_strategy() -> impl Strategy<Value = Tour> {
    (
        0_u32..=4,
        0_u32..=200,
        -2_i32..=20,
        proptest::collection::btree_set(0_u64..8, 0..=3),
    )
        .prop_map(|(duration_days, cost, value, attractions)| {
            Tour::new(0, "generated", duration_days, f64::from(cost), f64::from(value))
                .with_attractions(attractions)
        })
}

/// Strategy for limits mixing explicit ceilings with `Unbounded`.
pub fn limits_strategy() -> impl Strategy<Value = Limits> {
    let duration = prop_oneof![
        3 => (0_u32..=10).prop_map(Limit::AtMost),
        1 => Just(Limit::Unbounded),
    ];
    let budget = prop_oneof![
        3 => (0_u32..=500).prop_map(|budget| Limit::AtMost(f64::from(budget))),
        1 => Just(Limit::Unbounded),
    ];
    (duration, budget).prop_map(|(duration, budget)| Limits::new(duration, budget))
}

/// Return whether `tours` together respect `limits` and share no attraction.
pub fn is_feasible<'a>(tours: impl IntoIterator<Item = &'a Tour>, limits: &Limits) -> bool {
    let mut used: HashSet<AttractionId> = HashSet::new();
    let mut duration_days = 0_u64;
    let mut cost = 0.0;
    for tour in tours {
        if !tour.attractions.iter().all(|attraction| used.insert(*attraction)) {
            return false;
        }
        duration_days += u64::from(tour.duration_days);
        cost += tour.cost;
    }
    limits.admits(duration_days, cost)
}

/// Best cultural value over every subset of `tours`, by enumeration.
pub fn brute_force_best_value(tours: &[Tour], limits: &Limits) -> f64 {
    let subsets = 1_u32 << tours.len();
    (0..subsets)
        .map(|mask| {
            tours
                .iter()
                .enumerate()
                .filter(|(position, _)| mask & (1 << position) != 0)
                .map(|(_, tour)| tour)
                .collect::<Vec<_>>()
        })
        .filter(|subset| is_feasible(subset.iter().copied(), limits))
        .map(|subset| subset.iter().map(|tour| tour.cultural_value).sum::<f64>())
        .fold(f64::NEG_INFINITY, f64::max)
}
