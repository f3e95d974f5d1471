//! `optimize` command: find the best package of tours for a region.

use std::io::Write;
use std::time::Duration;

use camino::Utf8PathBuf;
use clap::Parser;
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use tourpack_core::{Limit, Limits, OptimizeRequest, OptimizeResponse, PackageOptimizer};
use tourpack_solver_exhaustive::{ExhaustiveOptimizer, ExhaustiveOptimizerConfig};

use crate::fs::require_file;
use crate::{
    ARG_CATALOG_DB, ARG_MAX_BUDGET, ARG_MAX_DURATION, ARG_REGION, ARG_TIME_LIMIT_MS,
    CatalogBuilder, CliError, DefaultCatalogBuilder, ENV_REGION, catalog_path, write_json,
};

/// CLI arguments for the `optimize` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "optimize",
    long_about = "Search every combination of a region's tours for the package \
                 with the greatest cultural value that fits the duration and \
                 budget limits without visiting an attraction twice. Omitted \
                 limits are unbounded. The search is exponential in the \
                 number of tours; --time-limit-ms aborts long searches.",
    about = "Find the optimal tour package for a region"
)]
#[ortho_config(prefix = "TOURPACK")]
pub(crate) struct OptimizeArgs {
    /// Identifier of the region to search.
    #[arg(long = ARG_REGION, value_name = "id")]
    #[serde(default)]
    pub(crate) region: Option<String>,
    /// Maximum total duration of the package in days.
    #[arg(long = ARG_MAX_DURATION, value_name = "days")]
    #[serde(default)]
    pub(crate) max_duration: Option<u32>,
    /// Maximum total cost of the package.
    #[arg(long = ARG_MAX_BUDGET, value_name = "amount", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) max_budget: Option<f64>,
    /// Path to the SQLite catalog database (defaults to `catalog.db`).
    #[arg(long = ARG_CATALOG_DB, value_name = "path")]
    #[serde(default)]
    pub(crate) catalog_db: Option<Utf8PathBuf>,
    /// Abort the search after this many milliseconds.
    #[arg(long = ARG_TIME_LIMIT_MS, value_name = "ms")]
    #[serde(default)]
    pub(crate) time_limit_ms: Option<u64>,
}

impl OptimizeArgs {
    pub(crate) fn into_config(self) -> Result<OptimizeConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        OptimizeConfig::try_from(merged)
    }
}

/// Resolved `optimize` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct OptimizeConfig {
    pub(crate) region: String,
    /// Omitted limits are already mapped to [`Limit::Unbounded`].
    pub(crate) limits: Limits,
    pub(crate) catalog_db: Utf8PathBuf,
    pub(crate) time_limit: Option<Duration>,
}

impl OptimizeConfig {
    pub(crate) fn request(&self) -> OptimizeRequest {
        OptimizeRequest::new(self.region.clone(), self.limits)
    }
}

impl TryFrom<OptimizeArgs> for OptimizeConfig {
    type Error = CliError;

    fn try_from(args: OptimizeArgs) -> Result<Self, Self::Error> {
        let region = args
            .region
            .filter(|region| !region.trim().is_empty())
            .ok_or(CliError::MissingArgument {
                field: ARG_REGION,
                env: ENV_REGION,
            })?;
        let limits = Limits::new(
            Limit::from(args.max_duration),
            Limit::from(args.max_budget),
        );
        Ok(Self {
            region,
            limits,
            catalog_db: catalog_path(args.catalog_db),
            time_limit: args.time_limit_ms.map(Duration::from_millis),
        })
    }
}

pub(crate) fn run_optimize(args: OptimizeArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_optimize_with(args, &DefaultCatalogBuilder, &mut stdout)
}

pub(crate) fn run_optimize_with(
    args: OptimizeArgs,
    builder: &dyn CatalogBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let response = execute_optimize(&config, builder)?;
    write_json(writer, &response)
}

pub(crate) fn execute_optimize(
    config: &OptimizeConfig,
    builder: &dyn CatalogBuilder,
) -> Result<OptimizeResponse, CliError> {
    require_file(&config.catalog_db, ARG_CATALOG_DB)?;
    let catalog = builder.build(&config.catalog_db)?;
    let optimizer = ExhaustiveOptimizer::with_config(
        catalog,
        ExhaustiveOptimizerConfig {
            time_limit: config.time_limit,
        },
    );
    info!(
        "optimizing region {} from {} with {:?}",
        config.region, config.catalog_db, config.limits
    );
    optimizer
        .find_optimal_package(&config.request())
        .map_err(|source| CliError::Optimize { source })
}
