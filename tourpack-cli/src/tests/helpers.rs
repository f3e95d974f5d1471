//! Test helpers for catalog fixtures and temporary workspaces.

use super::*;
use tempfile::TempDir;
use tourpack_core::test_support::{FailingCatalog, MemoryCatalog, tour};

/// Temporary directory addressed with UTF-8 paths.
#[derive(Debug)]
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }

    /// Create a placeholder file and return its path.
    pub(super) fn touch(&self, name: &str) -> Utf8PathBuf {
        let path = self.path(name);
        write_utf8(&path, b"catalog");
        path
    }
}

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path.as_std_path(), contents).expect("write file");
}

/// Abruzzo has three tours, two of which share attraction 10.
pub(super) fn castle_catalog() -> MemoryCatalog {
    MemoryCatalog::default()
        .with_region(
            "ABR",
            "Abruzzo",
            vec![
                tour(1, 2, 100.0, 5.0, &[10]),
                tour(2, 3, 150.0, 8.0, &[20]),
                tour(3, 1, 50.0, 3.0, &[10]),
            ],
        )
        .with_region("LAZ", "Lazio", vec![tour(7, 1, 30.0, 2.0, &[70])])
}

/// Serves a fixed in-memory catalog regardless of the configured path.
#[derive(Debug, Clone)]
pub(super) struct MemoryCatalogBuilder {
    pub(super) catalog: MemoryCatalog,
}

impl Default for MemoryCatalogBuilder {
    fn default() -> Self {
        Self {
            catalog: castle_catalog(),
        }
    }
}

impl CatalogBuilder for MemoryCatalogBuilder {
    fn build(&self, _catalog_db: &Utf8Path) -> Result<Box<dyn CatalogProvider>, CliError> {
        Ok(Box::new(self.catalog.clone()))
    }
}

/// Serves a catalog whose every lookup fails.
#[derive(Debug, Clone, Copy)]
pub(super) struct FailingCatalogBuilder;

impl CatalogBuilder for FailingCatalogBuilder {
    fn build(&self, _catalog_db: &Utf8Path) -> Result<Box<dyn CatalogProvider>, CliError> {
        Ok(Box::new(FailingCatalog))
    }
}

/// Write a SQLite catalog where tour values come from their attractions.
///
/// Tour 1 covers attraction 10 (5), tour 2 covers 20 (8) and tour 3 covers
/// 10 and 30 (5 + 3).
#[cfg(feature = "store-sqlite")]
pub(super) fn write_sqlite_catalog(path: &Utf8Path) {
    use tourpack_core::test_support::write_catalog_database;
    use tourpack_core::{Attraction, Region};

    let regions = [Region::new("ABR", "Abruzzo"), Region::new("LAZ", "Lazio")];
    let attractions = [
        Attraction::new(10, "Rocca Calascio", 5.0),
        Attraction::new(20, "San Clemente a Casauria", 8.0),
        Attraction::new(30, "Santo Stefano di Sessanio", 3.0),
    ];
    let tours = [
        ("ABR", tour(1, 2, 100.0, 0.0, &[10])),
        ("ABR", tour(2, 3, 150.0, 0.0, &[20])),
        ("ABR", tour(3, 1, 50.0, 0.0, &[10, 30])),
    ];
    write_catalog_database(path.as_std_path(), &regions, &attractions, &tours)
        .expect("write catalog database");
}
