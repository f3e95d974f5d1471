//! Tours and the attractions they cover.

use std::collections::BTreeSet;

use thiserror::Error;

/// Identifier of a tour, unique within a region's catalog.
pub type TourId = u64;

/// Identifier of an attraction.
pub type AttractionId = u64;

/// A purchasable tour covering zero or more attractions.
///
/// Tours are immutable once loaded. Attraction sets of different tours in the
/// same region may overlap; a package may not contain two tours that share an
/// attraction.
///
/// # Examples
/// ```
/// use tourpack_core::Tour;
///
/// let tour = Tour::new(1, "Abbeys of the valley", 2, 120.0, 7.5)
///     .with_attractions([10, 11]);
///
/// assert_eq!(tour.id, 1);
/// assert!(tour.attractions.contains(&10));
/// assert!(tour.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tour {
    /// Unique identifier within the region.
    pub id: TourId,
    /// Display name.
    pub name: String,
    /// Length of the tour in days.
    pub duration_days: u32,
    /// Price of the tour.
    pub cost: f64,
    /// Cultural value contributed to a package.
    pub cultural_value: f64,
    /// Attractions visited by the tour.
    #[cfg_attr(feature = "serde", serde(default))]
    pub attractions: BTreeSet<AttractionId>,
}

/// Errors returned by [`Tour::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum TourValidationError {
    /// The cost was below zero.
    #[error("tour {id} has negative cost {cost}")]
    NegativeCost {
        /// Offending tour.
        id: TourId,
        /// Cost as loaded.
        cost: f64,
    },
    /// The cost was NaN or infinite.
    #[error("tour {id} has non-finite cost")]
    NonFiniteCost {
        /// Offending tour.
        id: TourId,
    },
    /// The cultural value was NaN or infinite.
    #[error("tour {id} has non-finite cultural value")]
    NonFiniteValue {
        /// Offending tour.
        id: TourId,
    },
}

impl Tour {
    /// Construct a tour without attractions.
    pub fn new(
        id: TourId,
        name: impl Into<String>,
        duration_days: u32,
        cost: f64,
        cultural_value: f64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            duration_days,
            cost,
            cultural_value,
            attractions: BTreeSet::new(),
        }
    }

    /// Replace the attraction set while consuming `self`, enabling chaining.
    #[must_use]
    pub fn with_attractions<I>(mut self, attractions: I) -> Self
    where
        I: IntoIterator<Item = AttractionId>,
    {
        self.attractions = attractions.into_iter().collect();
        self
    }

    /// Check the numeric attributes the optimizer relies on.
    ///
    /// Durations are unsigned, so only cost and cultural value need checking.
    /// Negative cultural values are accepted.
    pub fn validate(&self) -> Result<(), TourValidationError> {
        if !self.cost.is_finite() {
            return Err(TourValidationError::NonFiniteCost { id: self.id });
        }
        if self.cost < 0.0 {
            return Err(TourValidationError::NegativeCost {
                id: self.id,
                cost: self.cost,
            });
        }
        if !self.cultural_value.is_finite() {
            return Err(TourValidationError::NonFiniteValue { id: self.id });
        }
        Ok(())
    }
}

/// A point of interest that contributes cultural value to the tours covering it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attraction {
    /// Unique identifier.
    pub id: AttractionId,
    /// Display name.
    pub name: String,
    /// Cultural value of visiting this attraction.
    pub cultural_value: f64,
}

impl Attraction {
    /// Construct an attraction.
    pub fn new(id: AttractionId, name: impl Into<String>, cultural_value: f64) -> Self {
        Self {
            id,
            name: name.into(),
            cultural_value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, 0.0)]
    #[case(250.5, 12.0)]
    #[case(10.0, -3.0)]
    fn accepts_finite_non_negative_cost(#[case] cost: f64, #[case] value: f64) {
        let tour = Tour::new(1, "tour", 3, cost, value);
        assert!(tour.validate().is_ok());
    }

    #[rstest]
    fn rejects_negative_cost() {
        let tour = Tour::new(4, "tour", 1, -0.5, 1.0);
        assert!(matches!(
            tour.validate(),
            Err(TourValidationError::NegativeCost { id: 4, .. })
        ));
    }

    #[rstest]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    fn rejects_non_finite_cost(#[case] cost: f64) {
        let tour = Tour::new(2, "tour", 1, cost, 1.0);
        assert_eq!(
            tour.validate(),
            Err(TourValidationError::NonFiniteCost { id: 2 })
        );
    }

    #[rstest]
    fn rejects_non_finite_value() {
        let tour = Tour::new(3, "tour", 1, 1.0, f64::NAN);
        assert_eq!(
            tour.validate(),
            Err(TourValidationError::NonFiniteValue { id: 3 })
        );
    }

    #[rstest]
    fn attractions_are_deduplicated() {
        let tour = Tour::new(1, "tour", 1, 1.0, 1.0).with_attractions([5, 5, 6]);
        assert_eq!(tour.attractions.len(), 2);
    }
}
