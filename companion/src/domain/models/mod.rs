//! Immutable value records exchanged between data sources and repositories.
//!
//! Records are built from a decoded network payload, a database row or a
//! cached JSON value and are replaced wholesale on refetch.

mod auth;
mod device;
mod location;
mod rewards;
mod search;
mod weather;
mod widget;

pub use auth::{AuthToken, Credentials};
pub use device::{ClaimRequest, Device, DeviceId, DeviceIdValidationError, DeviceRelation};
pub use location::{GeocodedAddress, Location, LocationValidationError};
pub use rewards::{DeviceRewards, RewardEntry, Rewards};
pub use search::{RecentSearch, SearchSelection, SearchSuggestion, StationDescriptor};
pub use weather::{DailyForecast, Forecast, HourlyWeather, WeatherHistory};
pub use widget::WidgetSettings;
