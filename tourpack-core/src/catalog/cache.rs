//! Per-region memoization of catalog lookups.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::{debug, warn};

use super::{CatalogError, CatalogProvider, TourCatalog};
use crate::Region;

/// Memoize [`CatalogProvider::get_tours`] per region.
///
/// The first lookup of a region goes to the wrapped provider; later lookups
/// return the same shared catalog. Failed lookups are not cached. Region
/// listings always go to the wrapped provider.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use tourpack_core::{CachedCatalog, CatalogError, CatalogProvider, Region, TourCatalog};
///
/// struct Fresh;
///
/// impl CatalogProvider for Fresh {
///     fn list_regions(&self) -> Result<Vec<Region>, CatalogError> {
///         Ok(Vec::new())
///     }
///
///     fn get_tours(&self, _region_id: &str) -> Result<Arc<TourCatalog>, CatalogError> {
///         Ok(Arc::new(TourCatalog::empty()))
///     }
/// }
///
/// let cached = CachedCatalog::new(Fresh);
///
/// let first = cached.get_tours("ABR")?;
/// let second = cached.get_tours("ABR")?;
/// assert!(Arc::ptr_eq(&first, &second));
/// # Ok::<(), tourpack_core::CatalogError>(())
/// ```
pub struct CachedCatalog<P> {
    inner: P,
    catalogs: Mutex<HashMap<String, Arc<TourCatalog>>>,
}

impl<P> fmt::Debug for CachedCatalog<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachedCatalog")
            .field("cached_regions", &self.cached_regions())
            .finish_non_exhaustive()
    }
}

impl<P> CachedCatalog<P> {
    /// Wrap `inner` with an empty cache.
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            catalogs: Mutex::new(HashMap::new()),
        }
    }

    /// Borrow the wrapped provider.
    pub const fn inner(&self) -> &P {
        &self.inner
    }

    /// Number of regions currently cached.
    pub fn cached_regions(&self) -> usize {
        self.lock().len()
    }

    /// Forget the cached catalog of `region_id`, if any.
    ///
    /// Returns whether an entry was removed.
    pub fn invalidate(&self, region_id: &str) -> bool {
        self.lock().remove(region_id).is_some()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Arc<TourCatalog>>> {
        self.catalogs.lock().unwrap_or_else(|poisoned| {
            warn!("catalog cache lock was poisoned; continuing with cached state");
            PoisonError::into_inner(poisoned)
        })
    }
}

impl<P: CatalogProvider> CatalogProvider for CachedCatalog<P> {
    fn list_regions(&self) -> Result<Vec<Region>, CatalogError> {
        self.inner.list_regions()
    }

    fn get_tours(&self, region_id: &str) -> Result<Arc<TourCatalog>, CatalogError> {
        if let Some(catalog) = self.lock().get(region_id) {
            debug!("catalog cache hit for region {region_id}");
            return Ok(Arc::clone(catalog));
        }

        // The lock is released while the provider runs so slow lookups for one
        // region do not block others. Concurrent misses for the same region
        // keep whichever catalog lands first.
        debug!("catalog cache miss for region {region_id}");
        let fetched = self.inner.get_tours(region_id)?;
        let mut catalogs = self.lock();
        let entry = catalogs
            .entry(region_id.to_owned())
            .or_insert_with(|| fetched);
        Ok(Arc::clone(entry))
    }
}
