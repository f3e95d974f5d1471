//! Test-only, in-memory `CatalogProvider` and fixtures used by unit and
//! behaviour tests.

use std::collections::HashMap;
use std::sync::Arc;

use crate::{AttractionId, CatalogError, CatalogProvider, Region, Tour, TourCatalog, TourId};

/// Construct a tour named after its id.
pub fn tour(
    id: TourId,
    duration_days: u32,
    cost: f64,
    cultural_value: f64,
    attractions: &[AttractionId],
) -> Tour {
    Tour::new(id, format!("tour {id}"), duration_days, cost, cultural_value)
        .with_attractions(attractions.iter().copied())
}

/// In-memory `CatalogProvider` used in tests.
///
/// Regions are listed in insertion order. Catalogs are validated on insertion
/// and unknown regions yield an empty catalog, matching the SQLite catalog.
#[derive(Default, Debug, Clone)]
pub struct MemoryCatalog {
    regions: Vec<Region>,
    catalogs: HashMap<String, Arc<TourCatalog>>,
}

impl MemoryCatalog {
    /// Add a region with its tours, consuming `self` for chaining.
    ///
    /// # Panics
    /// Panics when `tours` contains duplicate ids or invalid tours.
    #[must_use]
    pub fn with_region(mut self, id: &str, name: &str, tours: Vec<Tour>) -> Self {
        let catalog = TourCatalog::new(tours).expect("test catalog should be valid");
        self.regions.push(Region::new(id, name));
        self.catalogs.insert(id.to_owned(), Arc::new(catalog));
        self
    }

    /// Create a store with a single region.
    pub fn with_tours(region_id: &str, tours: Vec<Tour>) -> Self {
        Self::default().with_region(region_id, region_id, tours)
    }
}

impl CatalogProvider for MemoryCatalog {
    fn list_regions(&self) -> Result<Vec<Region>, CatalogError> {
        Ok(self.regions.clone())
    }

    fn get_tours(&self, region_id: &str) -> Result<Arc<TourCatalog>, CatalogError> {
        Ok(self
            .catalogs
            .get(region_id)
            .cloned()
            .unwrap_or_else(|| Arc::new(TourCatalog::empty())))
    }
}

/// Provider whose every lookup fails, for exercising error paths.
#[derive(Default, Debug, Copy, Clone)]
pub struct FailingCatalog;

impl CatalogProvider for FailingCatalog {
    fn list_regions(&self) -> Result<Vec<Region>, CatalogError> {
        Err(unavailable("regions"))
    }

    fn get_tours(&self, _region_id: &str) -> Result<Arc<TourCatalog>, CatalogError> {
        Err(unavailable("tours by region"))
    }
}

fn unavailable(operation: &'static str) -> CatalogError {
    CatalogError::Query {
        operation,
        source: "catalog backend unavailable".into(),
    }
}

/// Write a catalog database readable by [`SqliteCatalog`](crate::SqliteCatalog).
///
/// Each tour is stored under the paired region id. Tour cultural values are
/// not persisted: the catalog derives them from the linked attractions.
#[cfg(feature = "store-sqlite")]
pub fn write_catalog_database(
    path: &std::path::Path,
    regions: &[Region],
    attractions: &[crate::Attraction],
    tours: &[(&str, Tour)],
) -> rusqlite::Result<()> {
    let mut connection = rusqlite::Connection::open(path)?;
    connection.execute_batch(crate::catalog::sqlite::SCHEMA_SQL)?;
    let tx = connection.transaction()?;
    for region in regions {
        tx.execute(
            "INSERT INTO regions (id, name) VALUES (?1, ?2)",
            rusqlite::params![region.id, region.name],
        )?;
    }
    for attraction in attractions {
        tx.execute(
            "INSERT INTO attractions (id, name, cultural_value) VALUES (?1, ?2, ?3)",
            rusqlite::params![attraction.id, attraction.name, attraction.cultural_value],
        )?;
    }
    for (region_id, tour) in tours {
        tx.execute(
            "INSERT INTO tours (id, region_id, name, duration_days, cost)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![tour.id, region_id, tour.name, tour.duration_days, tour.cost],
        )?;
        for attraction_id in &tour.attractions {
            tx.execute(
                "INSERT INTO tour_attractions (tour_id, attraction_id) VALUES (?1, ?2)",
                rusqlite::params![tour.id, attraction_id],
            )?;
        }
    }
    tx.commit()
}
