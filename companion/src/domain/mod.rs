//! Domain types, ports and the policies built on them.
//!
//! Purpose: define the value records exchanged with every storage medium,
//! the one-trait-per-concept data-source ports, and the medium-independent
//! policies (claim retry, recent-search capping, fallback repositories).
//!
//! Public surface:
//! - [`Outcome`] / [`Failure`]: return contract of every fallible operation.
//! - Models such as [`Device`], [`WeatherHistory`], [`RecentSearch`].
//! - [`ClaimController`] and [`RecencyStore`].
//! - [`repositories`]: per-concept orchestration over several media.

pub mod claim;
pub mod failure;
pub mod models;
pub mod ports;
pub mod recents;
pub mod repositories;
pub mod write_behind;

pub use self::claim::{
    CLAIM_MAX_RETRIES, CLAIM_RETRY_DELAY, ClaimController, RetrySleeper, TokioSleeper,
};
pub use self::failure::{ClaimFailure, Failure, FailureKind, Outcome};
pub use self::models::{
    AuthToken, ClaimRequest, Credentials, DailyForecast, Device, DeviceId,
    DeviceIdValidationError, DeviceRelation, DeviceRewards, Forecast, GeocodedAddress,
    HourlyWeather, Location, LocationValidationError, RecentSearch, RewardEntry, Rewards,
    SearchSelection, SearchSuggestion, StationDescriptor, WeatherHistory, WidgetSettings,
};
pub use self::recents::{RECENTS_MAX_ENTRIES, RecencyStore};
pub use self::write_behind::WriteBehind;
