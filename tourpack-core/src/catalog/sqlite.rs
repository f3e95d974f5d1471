//! SQLite-backed catalog of regions, tours and attractions.

use std::{
    fmt,
    path::{Path, PathBuf},
    sync::Arc,
};

use log::debug;
use rusqlite::{Connection, OpenFlags, OptionalExtension, params};
use thiserror::Error;

use super::{CatalogError, CatalogProvider, TourCatalog};
use crate::{AttractionId, Region, Tour, TourId};

/// Tables the catalog reads. `open` refuses databases missing any of them.
pub(crate) const REQUIRED_TABLES: [&str; 4] =
    ["regions", "tours", "attractions", "tour_attractions"];

/// Schema understood by [`SqliteCatalog`].
pub(crate) const SCHEMA_SQL: &str = "
    CREATE TABLE IF NOT EXISTS regions (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL
    );
    CREATE TABLE IF NOT EXISTS tours (
        id INTEGER PRIMARY KEY,
        region_id TEXT NOT NULL REFERENCES regions(id),
        name TEXT NOT NULL,
        duration_days INTEGER NOT NULL,
        cost REAL NOT NULL
    );
    CREATE TABLE IF NOT EXISTS attractions (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        cultural_value REAL NOT NULL
    );
    CREATE TABLE IF NOT EXISTS tour_attractions (
        tour_id INTEGER NOT NULL REFERENCES tours(id),
        attraction_id INTEGER NOT NULL REFERENCES attractions(id),
        PRIMARY KEY (tour_id, attraction_id)
    );
";

const REGIONS_SQL: &str = "SELECT id, name FROM regions ORDER BY name, id";

// One row per (tour, attraction) pair; tours without attractions still
// produce a single row with NULL attraction columns.
const TOURS_SQL: &str = "SELECT
        t.id,
        t.name,
        t.duration_days,
        t.cost,
        ta.attraction_id,
        a.cultural_value
     FROM tours AS t
     LEFT JOIN tour_attractions AS ta ON ta.tour_id = t.id
     LEFT JOIN attractions AS a ON a.id = ta.attraction_id
     WHERE t.region_id = ?1
     ORDER BY t.id, ta.attraction_id";

/// Error raised when reading the catalog database.
#[derive(Debug, Error)]
pub enum SqliteCatalogError {
    /// Opening the SQLite database failed.
    #[error("failed to open SQLite database at {path}: {source}")]
    OpenDatabase {
        /// Location of the SQLite database on disk.
        path: PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// A table the catalog depends on is absent.
    #[error("catalog database at {path} has no `{table}` table")]
    MissingTable {
        /// Location of the SQLite database on disk.
        path: PathBuf,
        /// Name of the missing table.
        table: &'static str,
    },
    /// A tour links to an attraction that does not exist.
    #[error("tour {tour_id} references missing attraction {attraction_id}")]
    DanglingAttraction {
        /// Tour holding the link.
        tour_id: TourId,
        /// Attraction that could not be found.
        attraction_id: AttractionId,
    },
    /// Generic SQLite error when reading rows.
    #[error(transparent)]
    Database(#[from] rusqlite::Error),
}

/// Read-only catalog backed by a SQLite database.
///
/// A fresh read-only connection is opened for every lookup, so the catalog is
/// `Send + Sync` and may be wrapped in a
/// [`CachedCatalog`](crate::CachedCatalog) to avoid repeated reads.
pub struct SqliteCatalog {
    path: PathBuf,
}

impl fmt::Debug for SqliteCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteCatalog")
            .field("path", &self.path)
            .finish()
    }
}

impl SqliteCatalog {
    /// Open the catalog stored at `database_path`, checking its schema.
    pub fn open<P>(database_path: P) -> Result<Self, SqliteCatalogError>
    where
        P: AsRef<Path>,
    {
        let catalog = Self {
            path: database_path.as_ref().to_path_buf(),
        };
        let connection = catalog.connect()?;
        for table in REQUIRED_TABLES {
            if !table_exists(&connection, table)? {
                return Err(SqliteCatalogError::MissingTable {
                    path: catalog.path.clone(),
                    table,
                });
            }
        }
        Ok(catalog)
    }

    /// Location of the backing database.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every region ordered by display name.
    pub fn read_regions(&self) -> Result<Vec<Region>, SqliteCatalogError> {
        let connection = self.connect()?;
        let mut statement = connection.prepare(REGIONS_SQL)?;
        let regions = statement
            .query_map([], |row| Ok(Region::new(row.get::<_, String>(0)?, row.get::<_, String>(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(regions)
    }

    /// Read the tours of `region_id` ordered by id.
    ///
    /// Each tour's cultural value is the sum of its attractions' values.
    pub fn read_tours(&self, region_id: &str) -> Result<Vec<Tour>, SqliteCatalogError> {
        let connection = self.connect()?;
        let mut statement = connection.prepare(TOURS_SQL)?;
        let mut rows = statement.query(params![region_id])?;
        let mut tours: Vec<Tour> = Vec::new();

        while let Some(row) = rows.next()? {
            let id: TourId = row.get(0)?;
            let attraction: Option<AttractionId> = row.get(4)?;
            let attraction_value: Option<f64> = row.get(5)?;

            let is_new_tour = tours.last().is_none_or(|last| last.id != id);
            if is_new_tour {
                tours.push(Tour::new(id, row.get::<_, String>(1)?, row.get(2)?, row.get(3)?, 0.0));
            }

            let Some(attraction_id) = attraction else {
                continue;
            };
            let value = attraction_value.ok_or(SqliteCatalogError::DanglingAttraction {
                tour_id: id,
                attraction_id,
            })?;
            if let Some(tour) = tours.last_mut() {
                tour.attractions.insert(attraction_id);
                tour.cultural_value += value;
            }
        }

        debug!(
            "read {} tours for region {region_id} from {}",
            tours.len(),
            self.path.display()
        );
        Ok(tours)
    }

    fn connect(&self) -> Result<Connection, SqliteCatalogError> {
        Connection::open_with_flags(&self.path, OpenFlags::SQLITE_OPEN_READ_ONLY).map_err(
            |source| SqliteCatalogError::OpenDatabase {
                path: self.path.clone(),
                source,
            },
        )
    }
}

impl CatalogProvider for SqliteCatalog {
    fn list_regions(&self) -> Result<Vec<Region>, CatalogError> {
        self.read_regions().map_err(|source| CatalogError::Query {
            operation: "regions",
            source: Box::new(source),
        })
    }

    fn get_tours(&self, region_id: &str) -> Result<Arc<TourCatalog>, CatalogError> {
        let tours = self
            .read_tours(region_id)
            .map_err(|source| CatalogError::Query {
                operation: "tours by region",
                source: Box::new(source),
            })?;
        let catalog = TourCatalog::new(tours).map_err(|source| CatalogError::InvalidCatalog {
            region_id: region_id.to_owned(),
            source,
        })?;
        Ok(Arc::new(catalog))
    }
}

fn table_exists(connection: &Connection, table: &str) -> Result<bool, SqliteCatalogError> {
    let found = connection
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1",
            params![table],
            |_| Ok(()),
        )
        .optional()?;
    Ok(found.is_some())
}
