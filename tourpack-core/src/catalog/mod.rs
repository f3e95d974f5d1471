//! Data access for regions and their tour catalogs.
//!
//! The [`CatalogProvider`] trait is the read-only boundary the optimizer
//! consumes. A provider hands out each region's tours as a [`TourCatalog`]: an
//! ordered, id-addressable and immutable collection that can be shared across
//! concurrent searches.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use crate::{Region, Tour, TourId, TourValidationError};

mod cache;
#[cfg(feature = "store-sqlite")]
pub(crate) mod sqlite;

pub use cache::CachedCatalog;
#[cfg(feature = "store-sqlite")]
pub use sqlite::{SqliteCatalog, SqliteCatalogError};

/// Read-only access to regions and their tours.
///
/// The order of a catalog's tours is decided by the provider and is the order
/// the optimizer searches in, so providers should return a stable order
/// (for example sorted by id) to keep tie-breaking reproducible. Unknown
/// regions yield an empty catalog.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use tourpack_core::{CatalogError, CatalogProvider, Region, Tour, TourCatalog};
///
/// struct SingleRegion {
///     catalog: Arc<TourCatalog>,
/// }
///
/// impl CatalogProvider for SingleRegion {
///     fn list_regions(&self) -> Result<Vec<Region>, CatalogError> {
///         Ok(vec![Region::new("ABR", "Abruzzo")])
///     }
///
///     fn get_tours(&self, region_id: &str) -> Result<Arc<TourCatalog>, CatalogError> {
///         if region_id == "ABR" {
///             Ok(Arc::clone(&self.catalog))
///         } else {
///             Ok(Arc::new(TourCatalog::empty()))
///         }
///     }
/// }
///
/// let catalog = TourCatalog::new(vec![Tour::new(1, "Gran Sasso", 2, 90.0, 4.0)])?;
/// let provider = SingleRegion { catalog: Arc::new(catalog) };
/// assert_eq!(provider.get_tours("ABR")?.len(), 1);
/// assert!(provider.get_tours("LAZ")?.is_empty());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait CatalogProvider: Send + Sync {
    /// Return every region, in display order.
    fn list_regions(&self) -> Result<Vec<Region>, CatalogError>;

    /// Return the tours of `region_id` in search order.
    fn get_tours(&self, region_id: &str) -> Result<Arc<TourCatalog>, CatalogError>;
}

impl<P: CatalogProvider + ?Sized> CatalogProvider for Box<P> {
    fn list_regions(&self) -> Result<Vec<Region>, CatalogError> {
        (**self).list_regions()
    }

    fn get_tours(&self, region_id: &str) -> Result<Arc<TourCatalog>, CatalogError> {
        (**self).get_tours(region_id)
    }
}

/// Errors raised by a [`CatalogProvider`].
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The backing store failed while performing `operation`.
    #[error("failed to query {operation}: {source}")]
    Query {
        /// Description of the failed operation.
        operation: &'static str,
        /// Backend error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// The backing store returned tours that break catalog invariants.
    #[error("catalog for region {region_id} is invalid: {source}")]
    InvalidCatalog {
        /// Region whose catalog failed validation.
        region_id: String,
        /// Validation failure.
        #[source]
        source: CatalogValidationError,
    },
}

/// Reasons a tour sequence is unusable for optimization.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CatalogValidationError {
    /// Two tours shared an identifier.
    #[error("tour id {id} appears more than once")]
    DuplicateTourId {
        /// Repeated identifier.
        id: TourId,
    },
    /// A tour had invalid attributes.
    #[error(transparent)]
    InvalidTour(#[from] TourValidationError),
}

/// Check that `tours` have unique ids and valid attributes.
///
/// # Examples
/// ```
/// use tourpack_core::{Tour, catalog::validate_tours};
///
/// let tours = [Tour::new(1, "a", 1, 1.0, 1.0), Tour::new(1, "b", 1, 1.0, 1.0)];
/// assert!(validate_tours(&tours).is_err());
/// ```
pub fn validate_tours(tours: &[Tour]) -> Result<(), CatalogValidationError> {
    let mut seen = std::collections::HashSet::with_capacity(tours.len());
    for tour in tours {
        tour.validate()?;
        if !seen.insert(tour.id) {
            return Err(CatalogValidationError::DuplicateTourId { id: tour.id });
        }
    }
    Ok(())
}

/// The tours of one region in a fixed order, addressable by id.
///
/// # Examples
/// ```
/// use tourpack_core::{Tour, TourCatalog};
///
/// let catalog = TourCatalog::new(vec![
///     Tour::new(7, "Coast", 1, 40.0, 2.0),
///     Tour::new(3, "Hills", 2, 80.0, 5.0),
/// ])?;
/// assert_eq!(catalog.get(3).map(|tour| tour.name.as_str()), Some("Hills"));
/// let ids: Vec<_> = catalog.iter().map(|tour| tour.id).collect();
/// assert_eq!(ids, vec![7, 3]);
/// # Ok::<(), tourpack_core::CatalogValidationError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TourCatalog {
    tours: Vec<Tour>,
    positions: HashMap<TourId, usize>,
}

impl TourCatalog {
    /// Build a catalog, rejecting duplicate ids and invalid tours.
    pub fn new(tours: Vec<Tour>) -> Result<Self, CatalogValidationError> {
        validate_tours(&tours)?;
        let positions = tours
            .iter()
            .enumerate()
            .map(|(position, tour)| (tour.id, position))
            .collect();
        Ok(Self { tours, positions })
    }

    /// A catalog without tours.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Look up a tour by id.
    pub fn get(&self, id: TourId) -> Option<&Tour> {
        self.positions
            .get(&id)
            .and_then(|position| self.tours.get(*position))
    }

    /// Tours in search order.
    pub fn tours(&self) -> &[Tour] {
        &self.tours
    }

    /// Iterate over tours in search order.
    pub fn iter(&self) -> std::slice::Iter<'_, Tour> {
        self.tours.iter()
    }

    /// Number of tours.
    pub fn len(&self) -> usize {
        self.tours.len()
    }

    /// Return whether the catalog has no tours.
    pub fn is_empty(&self) -> bool {
        self.tours.is_empty()
    }
}

impl<'a> IntoIterator for &'a TourCatalog {
    type Item = &'a Tour;
    type IntoIter = std::slice::Iter<'a, Tour>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
