//! Per-concept repositories composing data sources across media.
//!
//! Repositories only fall back to another medium on a local-storage miss;
//! every other failure reaches the caller unchanged.

mod auth;
mod device;
mod fallback;
mod follow;
mod forecast;
mod rewards;
mod search;
mod weather_history;

pub use auth::AuthRepository;
pub use device::DeviceRepository;
pub use fallback::{AccessPolicy, Fetched, Origin, read_through};
pub use follow::FollowRepository;
pub use forecast::ForecastRepository;
pub use rewards::RewardsRepository;
pub use search::SearchRepository;
pub use weather_history::WeatherHistoryRepository;
