//! Packages: the selected subset of a catalog.

use crate::Tour;

/// A selection of tours with its aggregate cost, cultural value and length.
///
/// Tours keep the order in which the optimizer selected them, which is their
/// order in the catalog.
///
/// # Examples
/// ```
/// use tourpack_core::{Package, Tour};
///
/// let package = Package::from_tours(
///     vec![Tour::new(1, "a", 2, 100.0, 5.0), Tour::new(2, "b", 3, 150.0, 8.0)],
///     13.0,
/// );
/// assert_eq!(package.total_cost, 250.0);
/// assert_eq!(package.total_duration_days, 5);
/// assert_eq!(package.tour_ids(), vec![1, 2]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Package {
    /// Selected tours in selection order.
    pub tours: Vec<Tour>,
    /// Sum of the selected tours' costs.
    pub total_cost: f64,
    /// Sum of the selected tours' cultural values.
    pub total_value: f64,
    /// Sum of the selected tours' durations.
    pub total_duration_days: u64,
}

impl Package {
    /// The empty package: no tours, zero cost, zero value.
    ///
    /// This is a valid result whenever no tour fits the limits.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a package from selected tours and the value the search recorded.
    ///
    /// Cost and duration are summed in tour order; the value is taken as given
    /// so it matches the optimizer's running total exactly.
    #[expect(
        clippy::float_arithmetic,
        reason = "package cost is a floating-point sum"
    )]
    pub fn from_tours(tours: Vec<Tour>, total_value: f64) -> Self {
        // Folded from +0.0: an empty `f64` sum is -0.0.
        let total_cost = tours.iter().fold(0.0, |total, tour| total + tour.cost);
        let total_duration_days = tours.iter().map(|tour| u64::from(tour.duration_days)).sum();
        Self {
            tours,
            total_cost,
            total_value,
            total_duration_days,
        }
    }

    /// Return whether the package selects no tours.
    pub fn is_empty(&self) -> bool {
        self.tours.is_empty()
    }

    /// Identifiers of the selected tours in order.
    pub fn tour_ids(&self) -> Vec<crate::TourId> {
        self.tours.iter().map(|tour| tour.id).collect()
    }
}
