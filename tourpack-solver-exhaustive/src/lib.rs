//! Exhaustive package optimizer for tourpack.
//!
//! This crate provides [`ExhaustiveOptimizer`], the default implementation of
//! the [`PackageOptimizer`](tourpack_core::PackageOptimizer) trait. It resolves
//! a region's tours through a [`CatalogProvider`](tourpack_core::CatalogProvider)
//! and explores every include/exclude decision over the catalog order, keeping
//! the package with the greatest cultural value that fits the duration and
//! budget limits and never covers an attraction twice.
//!
//! The search itself is exposed as [`optimize`] and [`search`] for callers that
//! already hold a tour sequence. Running time grows as `2^n` in the number of
//! tours; [`ExhaustiveOptimizerConfig::time_limit`] bounds it for callers that
//! cannot wait.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod search;
mod solver;

pub use search::{SearchOutcome, SearchStats, optimize, search};
pub use solver::{ExhaustiveOptimizer, ExhaustiveOptimizerConfig};
