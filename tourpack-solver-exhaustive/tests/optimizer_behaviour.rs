//! Behavioural tests for `ExhaustiveOptimizer` using rstest-bdd.

use std::cell::RefCell;
use std::sync::Arc;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tourpack_core::test_support::{FailingCatalog, MemoryCatalog, tour};
use tourpack_core::{
    CatalogError, CatalogProvider, Limit, Limits, OptimizeError, OptimizeRequest,
    OptimizeResponse, PackageOptimizer, Region, TourCatalog, TourId,
};
use tourpack_solver_exhaustive::ExhaustiveOptimizer;

#[derive(Debug, Clone)]
enum CatalogChoice {
    Memory(MemoryCatalog),
    Unavailable,
}

impl Default for CatalogChoice {
    fn default() -> Self {
        Self::Memory(MemoryCatalog::default())
    }
}

impl CatalogProvider for CatalogChoice {
    fn list_regions(&self) -> Result<Vec<Region>, CatalogError> {
        match self {
            Self::Memory(catalog) => catalog.list_regions(),
            Self::Unavailable => FailingCatalog.list_regions(),
        }
    }

    fn get_tours(&self, region_id: &str) -> Result<Arc<TourCatalog>, CatalogError> {
        match self {
            Self::Memory(catalog) => catalog.get_tours(region_id),
            Self::Unavailable => FailingCatalog.get_tours(region_id),
        }
    }
}

#[derive(Debug, Default)]
struct OptimizerWorld {
    catalog: RefCell<CatalogChoice>,
    limits: RefCell<Limits>,
    outcome: RefCell<Option<Result<OptimizeResponse, OptimizeError>>>,
}

impl OptimizerWorld {
    #[expect(
        clippy::expect_used,
        reason = "behaviour tests use expect for readable failures"
    )]
    fn response(&self) -> OptimizeResponse {
        let outcome = self.outcome.borrow();
        match outcome
            .as_ref()
            .expect("outcome should be recorded before assertions")
        {
            Ok(response) => response.clone(),
            Err(err) => panic!("expected optimization success, got {err}"),
        }
    }
}

#[fixture]
fn world() -> OptimizerWorld {
    OptimizerWorld::default()
}

#[given("a region ABR with castle and abbey tours")]
fn given_castle_region(world: &OptimizerWorld) {
    let catalog = MemoryCatalog::default().with_region(
        "ABR",
        "Abruzzo",
        vec![
            tour(1, 2, 100.0, 5.0, &[10]),
            tour(2, 3, 150.0, 8.0, &[20]),
            tour(3, 1, 50.0, 3.0, &[10]),
        ],
    );
    world.catalog.replace(CatalogChoice::Memory(catalog));
}

#[given("an unavailable catalog")]
fn given_unavailable_catalog(world: &OptimizerWorld) {
    world.catalog.replace(CatalogChoice::Unavailable);
}

#[given("a duration limit of {days} days")]
fn given_duration_limit(world: &OptimizerWorld, days: u32) {
    world.limits.borrow_mut().max_duration_days = Limit::AtMost(days);
}

#[given("a budget of {budget}")]
fn given_budget(world: &OptimizerWorld, budget: f64) {
    world.limits.borrow_mut().max_budget = Limit::AtMost(budget);
}

#[given("no limits")]
fn given_no_limits(world: &OptimizerWorld) {
    world.limits.replace(Limits::unbounded());
}

#[when("the optimizer runs for region {region}")]
fn when_optimizer_runs(world: &OptimizerWorld, region: String) {
    let optimizer = ExhaustiveOptimizer::new(world.catalog.borrow().clone());
    let request = OptimizeRequest::new(region, *world.limits.borrow());
    let outcome = optimizer.find_optimal_package(&request);
    world.outcome.replace(Some(outcome));
}

#[then("the package contains tours {ids}")]
fn then_package_contains(world: &OptimizerWorld, ids: String) {
    let expected: Vec<TourId> = ids
        .split(',')
        .filter_map(|id| id.trim().parse().ok())
        .collect();
    assert_eq!(world.response().package.tour_ids(), expected);
}

#[then("the package costs {cost}")]
#[expect(clippy::float_cmp, reason = "package totals are exact sums")]
fn then_package_costs(world: &OptimizerWorld, cost: f64) {
    assert_eq!(world.response().package.total_cost, cost);
}

#[then("the package is worth {value}")]
#[expect(clippy::float_cmp, reason = "package totals are exact sums")]
fn then_package_worth(world: &OptimizerWorld, value: f64) {
    assert_eq!(world.response().package.total_value, value);
}

#[then("the package is empty")]
#[expect(clippy::float_cmp, reason = "the empty package is worth exactly zero")]
fn then_package_empty(world: &OptimizerWorld) {
    let response = world.response();
    assert!(response.package.is_empty());
    assert_eq!(response.package.total_cost, 0.0);
    assert_eq!(response.package.total_value, 0.0);
}

#[then("the optimizer reports a catalog failure for {region}")]
fn then_catalog_failure(world: &OptimizerWorld, region: String) {
    let outcome = world.outcome.borrow();
    assert!(matches!(
        outcome.as_ref(),
        Some(Err(OptimizeError::Catalog { region_id, .. })) if *region_id == region
    ));
}

#[scenario(path = "tests/features/optimizer.feature", index = 0)]
fn disjoint_tours_fill_the_duration(world: OptimizerWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/optimizer.feature", index = 1)]
fn tight_budget(world: OptimizerWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/optimizer.feature", index = 2)]
fn unbounded_limits(world: OptimizerWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/optimizer.feature", index = 3)]
fn nothing_fits(world: OptimizerWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/optimizer.feature", index = 4)]
fn unknown_region(world: OptimizerWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/optimizer.feature", index = 5)]
fn unavailable_catalog(world: OptimizerWorld) {
    let _ = world;
}
