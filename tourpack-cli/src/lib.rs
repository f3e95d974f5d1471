//! Command-line interface for tourpack.
//!
//! `tourpack regions` lists the regions of a catalog database and
//! `tourpack optimize` selects the most valuable package of tours for one of
//! them. Options can come from CLI flags, configuration files, or `TOURPACK_*`
//! environment variables; results are written to stdout as JSON.
#![forbid(unsafe_code)]

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use tourpack_core::CatalogProvider;

mod error;
mod fs;
mod optimize;
mod regions;

pub use error::CliError;

use optimize::OptimizeArgs;
use regions::RegionsArgs;

const ARG_CATALOG_DB: &str = "catalog-db";
const ARG_REGION: &str = "region";
const ARG_MAX_DURATION: &str = "max-duration";
const ARG_MAX_BUDGET: &str = "max-budget";
const ARG_TIME_LIMIT_MS: &str = "time-limit-ms";
const ENV_REGION: &str = "TOURPACK_CMDS_OPTIMIZE_REGION";
const DEFAULT_CATALOG_DB: &str = "catalog.db";

/// Run the tourpack CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Regions(args) => regions::run_regions(args),
        Command::Optimize(args) => optimize::run_optimize(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "tourpack",
    about = "Select the most culturally valuable package of regional tours",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the regions available in a catalog.
    Regions(RegionsArgs),
    /// Find the optimal tour package for a region.
    Optimize(OptimizeArgs),
}

/// Resolve the catalog path, falling back to `catalog.db` in the working
/// directory.
fn catalog_path(catalog_db: Option<Utf8PathBuf>) -> Utf8PathBuf {
    catalog_db.unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_CATALOG_DB))
}

/// Opens the catalog a command reads from.
pub(crate) trait CatalogBuilder {
    fn build(&self, catalog_db: &Utf8Path) -> Result<Box<dyn CatalogProvider>, CliError>;
}

/// Opens the SQLite catalog database when the `store-sqlite` feature is on.
pub(crate) struct DefaultCatalogBuilder;

impl CatalogBuilder for DefaultCatalogBuilder {
    #[cfg(feature = "store-sqlite")]
    fn build(&self, catalog_db: &Utf8Path) -> Result<Box<dyn CatalogProvider>, CliError> {
        let catalog = tourpack_core::SqliteCatalog::open(catalog_db.as_std_path())?;
        Ok(Box::new(catalog))
    }

    #[cfg(not(feature = "store-sqlite"))]
    fn build(&self, _catalog_db: &Utf8Path) -> Result<Box<dyn CatalogProvider>, CliError> {
        Err(CliError::MissingFeature {
            feature: "store-sqlite",
            action: "reading a catalog database",
        })
    }
}

/// Write `value` as pretty-printed JSON followed by a newline.
fn write_json<T: serde::Serialize>(
    writer: &mut dyn std::io::Write,
    value: &T,
) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerializeOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
mod tests;
