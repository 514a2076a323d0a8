//! Geographic coordinates and reverse-geocoding results.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// WGS84 coordinate pair.
///
/// ## Invariants
/// - Both components are finite.
/// - `lat` lies in `[-90, 90]` and `lon` in `[-180, 180]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLocation", into = "RawLocation")]
pub struct Location {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawLocation {
    lat: f64,
    lon: f64,
}

impl From<Location> for RawLocation {
    fn from(value: Location) -> Self {
        Self {
            lat: value.lat,
            lon: value.lon,
        }
    }
}

impl TryFrom<RawLocation> for Location {
    type Error = LocationValidationError;

    fn try_from(value: RawLocation) -> Result<Self, Self::Error> {
        Self::new(value.lat, value.lon)
    }
}

/// Validation errors returned when constructing [`Location`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationValidationError {
    /// A coordinate is NaN or infinite.
    #[error("coordinates must be finite")]
    NotFinite,
    /// Latitude is outside `[-90, 90]`.
    #[error("latitude must be within [-90, 90]")]
    LatitudeOutOfRange,
    /// Longitude is outside `[-180, 180]`.
    #[error("longitude must be within [-180, 180]")]
    LongitudeOutOfRange,
}

impl Location {
    /// Validate and build a coordinate pair.
    ///
    /// # Examples
    /// ```
    /// use companion::domain::Location;
    ///
    /// let athens = Location::new(37.98, 23.72).expect("valid coordinates");
    /// assert_eq!(athens.lat(), 37.98);
    /// assert!(Location::new(91.0, 0.0).is_err());
    /// ```
    pub fn new(lat: f64, lon: f64) -> Result<Self, LocationValidationError> {
        if !lat.is_finite() || !lon.is_finite() {
            return Err(LocationValidationError::NotFinite);
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(LocationValidationError::LatitudeOutOfRange);
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(LocationValidationError::LongitudeOutOfRange);
        }
        Ok(Self { lat, lon })
    }

    pub const fn lat(&self) -> f64 {
        self.lat
    }

    pub const fn lon(&self) -> f64 {
        self.lon
    }
}

/// Result of reverse geocoding a [`Location`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeocodedAddress {
    /// Formatted street address.
    pub address: String,
    /// ISO 3166-1 alpha-2 country code.
    pub country_code: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(f64::NAN, 0.0, LocationValidationError::NotFinite)]
    #[case(0.0, f64::INFINITY, LocationValidationError::NotFinite)]
    #[case(-90.5, 0.0, LocationValidationError::LatitudeOutOfRange)]
    #[case(0.0, 180.5, LocationValidationError::LongitudeOutOfRange)]
    fn rejects_invalid_coordinates(
        #[case] lat: f64,
        #[case] lon: f64,
        #[case] expected: LocationValidationError,
    ) {
        let err = Location::new(lat, lon).expect_err("coordinates rejected");
        assert_eq!(err, expected);
    }

    #[test]
    fn deserialisation_applies_validation() {
        let err = serde_json::from_str::<Location>(r#"{"lat":120.0,"lon":0.0}"#);
        assert!(err.is_err(), "out-of-range latitude must not deserialise");

        let location: Location =
            serde_json::from_str(r#"{"lat":51.5,"lon":-0.12}"#).expect("valid JSON location");
        assert_eq!(location.lon(), -0.12);
    }

    #[test]
    fn accepts_boundary_coordinates() {
        let location = Location::new(-90.0, 180.0).expect("boundaries are inclusive");
        assert_eq!(location.lat(), -90.0);
        assert_eq!(location.lon(), 180.0);
    }
}
