//! Port for per-day observed weather history.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{DeviceId, Outcome, WeatherHistory};

/// Weather history data source bound to the network or the database.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WeatherHistoryDataSource: Send + Sync {
    /// History of `device_id` for `date`.
    ///
    /// The database source reports absence as
    /// [`Failure::DatabaseMiss`](crate::domain::Failure::DatabaseMiss).
    async fn get_weather_history(
        &self,
        device_id: &DeviceId,
        date: NaiveDate,
    ) -> Outcome<WeatherHistory>;

    /// Persist one day of history. Database only; best-effort.
    async fn set_weather_history(&self, history: &WeatherHistory);

    /// Drop all persisted history. Database only; best-effort.
    async fn clear(&self);
}
