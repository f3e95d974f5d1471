//! `ExhaustiveOptimizer`: the catalog-backed [`PackageOptimizer`].

use std::time::{Duration, Instant};

use log::{debug, info};
use tourpack_core::{
    CatalogProvider, Diagnostics, OptimizeError, OptimizeRequest, OptimizeResponse,
    PackageOptimizer,
};

use crate::search::search_within;

/// Configuration for [`ExhaustiveOptimizer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExhaustiveOptimizerConfig {
    /// Abort the search with [`OptimizeError::DeadlineExceeded`] once this
    /// much time has elapsed. `None` runs every search to completion.
    pub time_limit: Option<Duration>,
}

/// Optimizer that searches every include/exclude decision over a region's
/// tours.
///
/// The optimizer owns no search state: each request builds its own, so one
/// instance can serve concurrent requests. Wrap the provider in
/// [`CachedCatalog`](tourpack_core::CachedCatalog) to avoid refetching a
/// region's tours on every request.
///
/// # Examples
/// ```
/// use tourpack_core::test_support::{MemoryCatalog, tour};
/// use tourpack_core::{Limit, Limits, OptimizeRequest, PackageOptimizer};
/// use tourpack_solver_exhaustive::ExhaustiveOptimizer;
///
/// let catalog = MemoryCatalog::with_tours(
///     "ABR",
///     vec![tour(1, 2, 100.0, 5.0, &[1]), tour(2, 3, 150.0, 8.0, &[2])],
/// );
/// let optimizer = ExhaustiveOptimizer::new(catalog);
/// let request = OptimizeRequest::new("ABR", Limits::new(Limit::AtMost(3), Limit::Unbounded));
/// let response = optimizer.find_optimal_package(&request)?;
/// assert_eq!(response.package.tour_ids(), vec![2]);
/// # Ok::<(), tourpack_core::OptimizeError>(())
/// ```
#[derive(Debug)]
pub struct ExhaustiveOptimizer<P>
where
    P: CatalogProvider,
{
    catalog: P,
    config: ExhaustiveOptimizerConfig,
}

impl<P> ExhaustiveOptimizer<P>
where
    P: CatalogProvider,
{
    /// Construct an optimizer using default configuration.
    pub fn new(catalog: P) -> Self {
        Self::with_config(catalog, ExhaustiveOptimizerConfig::default())
    }

    /// Construct an optimizer with explicit configuration.
    pub const fn with_config(catalog: P, config: ExhaustiveOptimizerConfig) -> Self {
        Self { catalog, config }
    }

    /// Borrow the catalog provider.
    pub const fn catalog(&self) -> &P {
        &self.catalog
    }

    /// Return the active configuration.
    pub const fn config(&self) -> &ExhaustiveOptimizerConfig {
        &self.config
    }
}

impl<P> PackageOptimizer for ExhaustiveOptimizer<P>
where
    P: CatalogProvider,
{
    fn find_optimal_package(
        &self,
        request: &OptimizeRequest,
    ) -> Result<OptimizeResponse, OptimizeError> {
        request.validate()?;
        let started_at = Instant::now();

        let tours = self
            .catalog
            .get_tours(&request.region_id)
            .map_err(|source| OptimizeError::Catalog {
                region_id: request.region_id.clone(),
                source,
            })?;
        debug!(
            "loaded {} tours for region {}",
            tours.len(),
            request.region_id
        );

        let outcome = search_within(tours.tours(), &request.limits, self.config.time_limit)?;
        let diagnostics = Diagnostics {
            solve_time: started_at.elapsed(),
            tours_considered: tours.len() as u64,
            nodes_visited: outcome.stats.nodes_visited,
        };
        info!(
            "region {}: selected {} of {} tours, value {} at cost {} in {:?}",
            request.region_id,
            outcome.package.tours.len(),
            tours.len(),
            outcome.package.total_value,
            outcome.package.total_cost,
            diagnostics.solve_time
        );

        Ok(OptimizeResponse {
            package: outcome.package,
            diagnostics,
        })
    }
}
