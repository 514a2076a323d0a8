//! SQLite persistence adapters using Diesel ORM.
//!
//! The on-device database holds completed days of weather history and the
//! recent-search table. Connections come from a `bb8` pool of
//! `diesel-async` wrapped SQLite connections; migrations are embedded and
//! applied when the pool is built.
//!
//! Row structs (`models.rs`) and table definitions (`schema.rs`) stay
//! private to this module. Adapters translate rows into domain types and
//! Diesel errors into [`Failure::Storage`](crate::domain::Failure::Storage)
//! or [`RecentSearchesDaoError`](crate::domain::ports::RecentSearchesDaoError).
//!
//! # Example
//!
//! ```ignore
//! use companion::outbound::persistence::{DbPool, DieselRecentSearchesDao, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("companion.sqlite3")).await?;
//! let dao = DieselRecentSearchesDao::new(pool);
//! ```

mod database_search_source;
mod diesel_error_mapping;
mod diesel_recent_searches_dao;
mod diesel_weather_history_source;
mod models;
mod pool;
mod schema;

pub use database_search_source::DatabaseSearchDataSource;
pub use diesel_recent_searches_dao::DieselRecentSearchesDao;
pub use diesel_weather_history_source::DieselWeatherHistoryDataSource;
pub use pool::{DbPool, PoolConfig, PoolError};
