//! Optimizer boundary: requests, responses and errors.

use std::time::Duration;

use thiserror::Error;

use crate::{CatalogError, CatalogValidationError, Limits, Package};

/// Parameters for an optimization request.
///
/// # Examples
/// ```rust
/// use tourpack_core::{Limit, Limits, OptimizeRequest};
///
/// let request = OptimizeRequest::new("ABR", Limits::new(Limit::AtMost(5), Limit::AtMost(300.0)));
/// assert!(request.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptimizeRequest {
    /// Region whose catalog is searched.
    pub region_id: String,
    /// Duration and budget limits for the package.
    #[cfg_attr(feature = "serde", serde(default))]
    pub limits: Limits,
}

impl OptimizeRequest {
    /// Construct a request.
    pub fn new(region_id: impl Into<String>, limits: Limits) -> Self {
        Self {
            region_id: region_id.into(),
            limits,
        }
    }

    /// Validate the request.
    pub fn validate(&self) -> Result<(), OptimizeRequestValidationError> {
        if self.region_id.trim().is_empty() {
            return Err(OptimizeRequestValidationError::EmptyRegion);
        }
        self.limits.validate()
    }
}

/// Reasons an [`OptimizeRequest`] is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum OptimizeRequestValidationError {
    /// No region identifier was supplied.
    #[error("region identifier must not be empty")]
    EmptyRegion,
    /// The budget limit was below zero.
    #[error("budget limit must not be negative, got {budget}")]
    NegativeBudget {
        /// Budget as supplied.
        budget: f64,
    },
    /// The budget limit was NaN.
    #[error("budget limit must be a number")]
    NonFiniteBudget,
}

/// Search statistics reported with a response.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostics {
    /// Wall-clock time spent optimizing, catalog retrieval included.
    pub solve_time: Duration,
    /// Number of tours in the searched sequence.
    pub tours_considered: u64,
    /// Number of decision nodes the search visited.
    pub nodes_visited: u64,
}

/// Response from a successful optimization.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptimizeResponse {
    /// The optimal package, possibly empty.
    pub package: Package,
    /// How the search went.
    pub diagnostics: Diagnostics,
}

/// Errors returned by [`PackageOptimizer::find_optimal_package`].
///
/// Finding no feasible tour is not an error: the empty package is returned.
#[derive(Debug, Error)]
pub enum OptimizeError {
    /// Request parameters were invalid.
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] OptimizeRequestValidationError),
    /// The tour sequence broke a precondition of the search.
    #[error("invalid tour sequence: {0}")]
    InvalidCatalog(#[from] CatalogValidationError),
    /// The catalog provider failed to supply the region's tours.
    #[error("failed to load tours for region {region_id}: {source}")]
    Catalog {
        /// Region that was requested.
        region_id: String,
        /// Provider failure.
        #[source]
        source: CatalogError,
    },
    /// The configured time limit elapsed before the search completed.
    #[error("search exceeded its time limit of {limit:?} after {nodes_visited} nodes")]
    DeadlineExceeded {
        /// Configured limit.
        limit: Duration,
        /// Nodes visited before aborting.
        nodes_visited: u64,
    },
}

/// Select the best package for a region.
///
/// Implementations return [`OptimizeError::InvalidRequest`] for invalid
/// parameters rather than panicking, and must be `Send + Sync` so a single
/// optimizer can serve concurrent requests.
pub trait PackageOptimizer: Send + Sync {
    /// Find the package with the greatest cultural value within the limits.
    fn find_optimal_package(
        &self,
        request: &OptimizeRequest,
    ) -> Result<OptimizeResponse, OptimizeError>;
}
