//! Facade crate for the tourpack package optimizer.
//!
//! This crate re-exports the core domain types and exposes the SQLite catalog
//! and the exhaustive optimizer behind feature flags.

#![forbid(unsafe_code)]

pub use tourpack_core::{
    AttractionId, CachedCatalog, CatalogError, CatalogProvider, CatalogValidationError,
    Diagnostics, Limit, Limits, OptimizeError, OptimizeRequest, OptimizeRequestValidationError,
    OptimizeResponse, Package, PackageOptimizer, Region, Tour, TourCatalog, TourId,
    TourValidationError,
};

#[cfg(feature = "store-sqlite")]
pub use tourpack_core::{SqliteCatalog, SqliteCatalogError};

#[cfg(feature = "solver-exhaustive")]
pub use tourpack_solver_exhaustive::{
    ExhaustiveOptimizer, ExhaustiveOptimizerConfig, SearchOutcome, SearchStats, optimize, search,
};
