//! Network adapters over the companion REST API.
//!
//! One [`ApiClient`] is shared by every network source. Operations the
//! network cannot serve (cache writes, recent searches) abort.

mod auth_source;
mod client;
mod device_source;
mod dto;
mod follow_source;
mod query_gate;
mod rewards_source;
mod search_source;
mod weather_source;

pub use auth_source::NetworkAuthDataSource;
pub use client::{ApiClient, ApiClientError};
pub use device_source::NetworkDeviceDataSource;
pub use follow_source::NetworkFollowDataSource;
pub use query_gate::{QueryGate, QueryTicket};
pub use rewards_source::NetworkRewardsDataSource;
pub use search_source::NetworkSearchDataSource;
pub use weather_source::{NetworkForecastDataSource, NetworkWeatherHistoryDataSource};
