//! Key-value cache adapters.
//!
//! Two [`KeyValueStore`](crate::domain::ports::KeyValueStore) backends
//! (Redis through a `bb8` pool, and an in-process map) carry JSON entries
//! under namespaced keys, `companion:v1:<concept>:<id>`. The per-concept
//! cache sources sit on top of them through [`JsonCache`].

mod auth;
mod devices;
mod forecast;
mod json_cache;
mod memory_store;
mod redis_store;
mod wallet;
mod widgets;

pub use auth::CacheAuthDataSource;
pub use devices::{CacheDeviceDataSource, CacheFollowDataSource};
pub use forecast::{CacheForecastDataSource, DEFAULT_FORECAST_TTL};
pub use json_cache::JsonCache;
pub use memory_store::InMemoryKeyValueStore;
pub use redis_store::{DEFAULT_TTL_JITTER_PERCENT, RedisKeyValueStore};
pub use wallet::CacheRewardsDataSource;
pub use widgets::CacheWidgetDataSource;
