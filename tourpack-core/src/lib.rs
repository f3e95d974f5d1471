//! Core domain types for tourpack.
//!
//! The crate models a region's tour catalog, the limits a visitor imposes on a
//! package, and the package an optimizer hands back. It also defines the two
//! engine boundaries: [`CatalogProvider`] for tour retrieval and
//! [`PackageOptimizer`] for package selection.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod catalog;
mod limits;
mod optimizer;
mod package;
mod region;
mod tour;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use catalog::{CachedCatalog, CatalogError, CatalogProvider, CatalogValidationError, TourCatalog};
#[cfg(feature = "store-sqlite")]
pub use catalog::{SqliteCatalog, SqliteCatalogError};
pub use limits::{Limit, Limits};
pub use optimizer::{
    Diagnostics, OptimizeError, OptimizeRequest, OptimizeRequestValidationError, OptimizeResponse,
    PackageOptimizer,
};
pub use package::Package;
pub use region::Region;
pub use tour::{Attraction, AttractionId, Tour, TourId, TourValidationError};
