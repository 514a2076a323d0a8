//! Observed daily history: database first, network on a miss.

use std::sync::Arc;

use chrono::NaiveDate;
use mockable::Clock;

use super::fallback::{AccessPolicy, read_through};
use crate::domain::ports::WeatherHistoryDataSource;
use crate::domain::{DeviceId, Outcome, WeatherHistory, WriteBehind};

/// History orchestration over the network and database sources.
pub struct WeatherHistoryRepository {
    network: Arc<dyn WeatherHistoryDataSource>,
    database: Arc<dyn WeatherHistoryDataSource>,
    clock: Arc<dyn Clock>,
    write_behind: WriteBehind,
}

impl WeatherHistoryRepository {
    pub fn new(
        network: Arc<dyn WeatherHistoryDataSource>,
        database: Arc<dyn WeatherHistoryDataSource>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            network,
            database,
            clock,
            write_behind: WriteBehind,
        }
    }

    /// History of `device_id` on `date`.
    ///
    /// A completed day fetched from the network is persisted in the
    /// background; the current day is still filling up and is never stored.
    pub async fn history(
        &self,
        device_id: &DeviceId,
        date: NaiveDate,
        policy: AccessPolicy,
    ) -> Outcome<WeatherHistory> {
        let fetched = read_through(
            policy,
            "weather_history",
            || self.database.get_weather_history(device_id, date),
            || self.network.get_weather_history(device_id, date),
        )
        .await?;

        if fetched.is_remote() && self.is_complete_day(date) {
            let database = Arc::clone(&self.database);
            let history = fetched.value.clone();
            self.write_behind.spawn("weather_history", async move {
                database.set_weather_history(&history).await;
            });
        }
        Ok(fetched.value)
    }

    /// Drop every persisted day.
    pub async fn clear(&self) {
        self.database.clear().await;
    }

    fn is_complete_day(&self, date: NaiveDate) -> bool {
        date < self.clock.utc().date_naive()
    }
}
