//! Geocoding result types.

use serde::{Deserialize, Serialize};

/// Granularity of the location a geocoder resolved an address to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocationType {
    Country,
    AdministrativeArea,
    Municipality,
    Street,
    Building,
    Approximate,
}

impl LocationType {
    /// Whether the location is precise enough to confirm a street address.
    pub fn is_street_level(self) -> bool {
        match self {
            Self::Street | Self::Building => true,
            Self::Country | Self::AdministrativeArea | Self::Municipality | Self::Approximate => {
                false
            }
        }
    }
}

/// What a geocoder found for an address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeocodingOutcome {
    /// Granularity of the best match
    pub location_type: LocationType,

    /// Geocoder matched the municipality exactly
    pub municipality_exact_match: bool,

    /// Geocoder matched the street exactly; `None` when no street was queried
    pub street_exact_match: Option<bool>,
}

impl GeocodingOutcome {
    /// Create an outcome with no street information.
    pub fn new(location_type: LocationType, municipality_exact_match: bool) -> Self {
        Self {
            location_type,
            municipality_exact_match,
            street_exact_match: None,
        }
    }

    /// Attach the street match flag.
    pub fn with_street_match(mut self, exact: bool) -> Self {
        self.street_exact_match = Some(exact);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_street_level_types() {
        assert!(LocationType::Street.is_street_level());
        assert!(LocationType::Building.is_street_level());
        assert!(!LocationType::Municipality.is_street_level());
        assert!(!LocationType::Approximate.is_street_level());
    }
}
