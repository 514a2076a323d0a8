//! Domain ports: one data-source trait per concept, plus the infrastructure
//! ports the medium adapters are built on.

mod macros;
pub(crate) use macros::define_port_error;

mod auth_data_source;
mod device_data_source;
mod follow_data_source;
mod forecast_data_source;
mod key_value_store;
mod medium;
mod recent_searches_dao;
mod rewards_data_source;
mod search_data_source;
mod weather_history_data_source;
mod widget_data_source;

#[cfg(test)]
pub use auth_data_source::{MockAccessTokenProvider, MockAuthDataSource};
pub use auth_data_source::{AccessTokenProvider, AnonymousAccess, AuthDataSource};
#[cfg(test)]
pub use device_data_source::MockDeviceDataSource;
pub use device_data_source::DeviceDataSource;
#[cfg(test)]
pub use follow_data_source::MockFollowDataSource;
pub use follow_data_source::FollowDataSource;
#[cfg(test)]
pub use forecast_data_source::MockForecastDataSource;
pub use forecast_data_source::ForecastDataSource;
#[cfg(test)]
pub use key_value_store::MockKeyValueStore;
pub use key_value_store::{CacheKey, CacheKeyValidationError, KeyValueStore, KeyValueStoreError};
pub use medium::{Medium, unsupported_on};
#[cfg(test)]
pub use recent_searches_dao::MockRecentSearchesDao;
pub use recent_searches_dao::{
    RecencyBoundary, RecentSearchesDao, RecentSearchesDaoError, StoredRecentSearch,
};
#[cfg(test)]
pub use rewards_data_source::MockRewardsDataSource;
pub use rewards_data_source::RewardsDataSource;
#[cfg(test)]
pub use search_data_source::MockSearchDataSource;
pub use search_data_source::SearchDataSource;
#[cfg(test)]
pub use weather_history_data_source::MockWeatherHistoryDataSource;
pub use weather_history_data_source::WeatherHistoryDataSource;
#[cfg(test)]
pub use widget_data_source::MockWidgetDataSource;
pub use widget_data_source::WidgetDataSource;
