//! `regions` command: list the regions of a catalog.

use camino::Utf8PathBuf;
use clap::Parser;
use log::debug;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use std::io::Write;
use tourpack_core::Region;

use crate::fs::require_file;
use crate::{
    ARG_CATALOG_DB, CatalogBuilder, CliError, DefaultCatalogBuilder, catalog_path, write_json,
};

/// CLI arguments for the `regions` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(name = "regions", about = "List the regions of a catalog")]
#[ortho_config(prefix = "TOURPACK")]
pub(crate) struct RegionsArgs {
    /// Path to the SQLite catalog database (defaults to `catalog.db`).
    #[arg(long = ARG_CATALOG_DB, value_name = "path")]
    #[serde(default)]
    pub(crate) catalog_db: Option<Utf8PathBuf>,
}

impl RegionsArgs {
    pub(crate) fn into_config(self) -> Result<RegionsConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        Ok(RegionsConfig::from(merged))
    }
}

/// Resolved `regions` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RegionsConfig {
    pub(crate) catalog_db: Utf8PathBuf,
}

impl From<RegionsArgs> for RegionsConfig {
    fn from(args: RegionsArgs) -> Self {
        Self {
            catalog_db: catalog_path(args.catalog_db),
        }
    }
}

pub(crate) fn run_regions(args: RegionsArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_regions_with(args, &DefaultCatalogBuilder, &mut stdout)
}

pub(crate) fn run_regions_with(
    args: RegionsArgs,
    builder: &dyn CatalogBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let regions = list_regions(&config, builder)?;
    write_json(writer, &regions)
}

pub(crate) fn list_regions(
    config: &RegionsConfig,
    builder: &dyn CatalogBuilder,
) -> Result<Vec<Region>, CliError> {
    require_file(&config.catalog_db, ARG_CATALOG_DB)?;
    let catalog = builder.build(&config.catalog_db)?;
    let regions = catalog.list_regions().map_err(CliError::ListRegions)?;
    debug!("catalog {} lists {} regions", config.catalog_db, regions.len());
    Ok(regions)
}
