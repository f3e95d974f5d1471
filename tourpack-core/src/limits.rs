//! Duration and budget limits applied to a package.
//!
//! A limit is either an explicit ceiling or the distinct [`Limit::Unbounded`]
//! sentinel. The optimizer applies limits literally and never treats a missing
//! value as "no limit"; callers that collect optional input map it to
//! `Unbounded` themselves.

use crate::optimizer::OptimizeRequestValidationError;

/// An inclusive upper bound, or no bound at all.
///
/// # Examples
/// ```
/// use tourpack_core::Limit;
///
/// assert!(Limit::AtMost(5_u64).admits(5));
/// assert!(!Limit::AtMost(5_u64).admits(6));
/// assert!(Limit::<u64>::Unbounded.admits(u64::MAX));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Limit<T> {
    /// Totals must not exceed the wrapped value.
    AtMost(T),
    /// Totals are not constrained.
    #[default]
    Unbounded,
}

impl<T: PartialOrd> Limit<T> {
    /// Return whether `total` satisfies this limit.
    pub fn admits(&self, total: T) -> bool {
        match self {
            Self::AtMost(max) => total <= *max,
            Self::Unbounded => true,
        }
    }
}

impl<T> From<Option<T>> for Limit<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Unbounded, Self::AtMost)
    }
}

/// The pair of limits a package must respect.
///
/// # Examples
/// ```
/// use tourpack_core::{Limit, Limits};
///
/// let limits = Limits::new(Limit::AtMost(5), Limit::AtMost(300.0));
/// assert!(limits.admits(5, 300.0));
/// assert!(!limits.admits(6, 10.0));
/// assert!(Limits::unbounded().admits(u64::MAX, f64::MAX));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Limits {
    /// Maximum total duration in days.
    pub max_duration_days: Limit<u32>,
    /// Maximum total cost.
    pub max_budget: Limit<f64>,
}

impl Limits {
    /// Construct limits from both dimensions.
    pub const fn new(max_duration_days: Limit<u32>, max_budget: Limit<f64>) -> Self {
        Self {
            max_duration_days,
            max_budget,
        }
    }

    /// Limits that admit every package.
    pub const fn unbounded() -> Self {
        Self::new(Limit::Unbounded, Limit::Unbounded)
    }

    /// Return whether a package with the given totals fits.
    ///
    /// Durations are summed as `u64` so long catalogs cannot overflow the
    /// per-tour `u32`.
    pub fn admits(&self, total_duration_days: u64, total_cost: f64) -> bool {
        let duration_fits = match self.max_duration_days {
            Limit::AtMost(max) => total_duration_days <= u64::from(max),
            Limit::Unbounded => true,
        };
        duration_fits && self.max_budget.admits(total_cost)
    }

    /// Reject budgets that are negative or NaN.
    ///
    /// An infinite budget is accepted and behaves like [`Limit::Unbounded`].
    pub fn validate(&self) -> Result<(), OptimizeRequestValidationError> {
        if let Limit::AtMost(budget) = self.max_budget {
            if budget.is_nan() {
                return Err(OptimizeRequestValidationError::NonFiniteBudget);
            }
            if budget < 0.0 {
                return Err(OptimizeRequestValidationError::NegativeBudget { budget });
            }
        }
        Ok(())
    }
}
