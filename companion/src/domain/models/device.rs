//! Weather station records and claim requests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{HourlyWeather, Location};

/// Opaque device identifier shared across every medium.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DeviceId(String);

/// Validation errors returned when constructing [`DeviceId`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeviceIdValidationError {
    /// Identifier is empty after trimming whitespace.
    #[error("device id must not be empty")]
    Empty,
    /// Identifier carries leading or trailing whitespace.
    #[error("device id must not contain surrounding whitespace")]
    ContainsWhitespace,
}

impl DeviceId {
    /// Construct an identifier after checking it is non-empty and trimmed.
    pub fn new(value: impl Into<String>) -> Result<Self, DeviceIdValidationError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(DeviceIdValidationError::Empty);
        }
        if raw.trim() != raw {
            return Err(DeviceIdValidationError::ContainsWhitespace);
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for DeviceId {
    type Error = DeviceIdValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DeviceId> for String {
    fn from(value: DeviceId) -> Self {
        value.0
    }
}

impl std::fmt::Display for DeviceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for DeviceId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// How the signed-in user relates to a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceRelation {
    Owned,
    Followed,
    #[default]
    Unfollowed,
}

/// A weather station as seen by the signed-in user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub id: DeviceId,
    /// Generated public name.
    pub name: String,
    /// Owner-chosen name, when set.
    pub friendly_name: Option<String>,
    /// Serial label printed on the hardware.
    pub label: Option<String>,
    pub address: Option<String>,
    pub location: Option<Location>,
    pub relation: DeviceRelation,
    pub last_active_at: Option<DateTime<Utc>>,
    pub current_weather: Option<HourlyWeather>,
}

impl Device {
    /// Name to show for this device: the friendly name when set.
    pub fn display_name(&self) -> &str {
        self.friendly_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(self.name.as_str())
    }
}

/// Parameters of one claim call.
#[derive(Clone, PartialEq, Serialize)]
pub struct ClaimRequest {
    pub serial_number: String,
    pub location: Location,
    /// Optional claim secret printed alongside the serial number.
    pub secret: Option<String>,
}

impl std::fmt::Debug for ClaimRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClaimRequest")
            .field("serial_number", &self.serial_number)
            .field("location", &self.location)
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn device_id_rejects_blank(#[case] value: &str) {
        let err = DeviceId::new(value).expect_err("blank ids rejected");
        assert_eq!(err, DeviceIdValidationError::Empty);
    }

    #[rstest]
    #[case(" leading")]
    #[case("trailing ")]
    fn device_id_rejects_whitespace_padding(#[case] value: &str) {
        let err = DeviceId::new(value).expect_err("padded ids rejected");
        assert_eq!(err, DeviceIdValidationError::ContainsWhitespace);
    }

    #[test]
    fn display_name_prefers_friendly_name() {
        let mut device = Device {
            id: DeviceId::new("d-1").expect("valid id"),
            name: "Crispy Ruby Wind".to_owned(),
            friendly_name: Some("Balcony".to_owned()),
            label: None,
            address: None,
            location: None,
            relation: DeviceRelation::Owned,
            last_active_at: None,
            current_weather: None,
        };
        assert_eq!(device.display_name(), "Balcony");

        device.friendly_name = Some("  ".to_owned());
        assert_eq!(device.display_name(), "Crispy Ruby Wind");
    }
}
