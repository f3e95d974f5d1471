//! Regions grouping tour catalogs.

/// A region whose identifier keys a tour catalog.
///
/// # Examples
/// ```
/// use tourpack_core::Region;
///
/// let region = Region::new("ABR", "Abruzzo");
/// assert_eq!(region.id, "ABR");
/// assert_eq!(region.name, "Abruzzo");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Region {
    /// Stable identifier used to select a catalog.
    pub id: String,
    /// Human-readable name.
    pub name: String,
}

impl Region {
    /// Construct a region.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}
