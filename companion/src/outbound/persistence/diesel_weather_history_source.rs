//! SQLite-backed weather history, one JSON payload per device and day.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use mockable::Clock;
use tracing::{debug, warn};

use crate::domain::ports::WeatherHistoryDataSource;
use crate::domain::{DeviceId, Failure, HourlyWeather, Outcome, WeatherHistory};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::NewWeatherHistoryRow;
use super::pool::{DbPool, PoolError};
use super::schema::weather_history;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Database-bound [`WeatherHistoryDataSource`].
///
/// Rows are upserted by `(device_id, date)`, so persisting a day twice keeps
/// the latest payload.
#[derive(Clone)]
pub struct DieselWeatherHistoryDataSource {
    pool: DbPool,
    clock: Arc<dyn Clock>,
}

impl DieselWeatherHistoryDataSource {
    pub fn new(pool: DbPool, clock: Arc<dyn Clock>) -> Self {
        Self { pool, clock }
    }

    async fn store(&self, history: &WeatherHistory) -> Outcome<()> {
        let payload = serde_json::to_string(&history.hourly)
            .map_err(|err| Failure::decode(err.to_string()))?;
        let row = NewWeatherHistoryRow {
            device_id: history.device_id.as_str().to_owned(),
            date: history.date.format(DATE_FORMAT).to_string(),
            payload,
            updated_at_ms: self.clock.utc().timestamp_millis(),
        };

        let mut conn = self.pool.get().await.map_err(storage_pool_error)?;
        diesel::replace_into(weather_history::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(storage_diesel_error)
    }

    async fn delete_all(&self) -> Outcome<usize> {
        let mut conn = self.pool.get().await.map_err(storage_pool_error)?;
        diesel::delete(weather_history::table)
            .execute(&mut conn)
            .await
            .map_err(storage_diesel_error)
    }
}

fn storage_pool_error(error: PoolError) -> Failure {
    map_pool_error(error, Failure::storage)
}

fn storage_diesel_error(error: diesel::result::Error) -> Failure {
    map_diesel_error(error, Failure::storage, Failure::storage)
}

#[async_trait]
impl WeatherHistoryDataSource for DieselWeatherHistoryDataSource {
    async fn get_weather_history(
        &self,
        device_id: &DeviceId,
        date: NaiveDate,
    ) -> Outcome<WeatherHistory> {
        let mut conn = self.pool.get().await.map_err(storage_pool_error)?;
        let payload: Option<String> = weather_history::table
            .filter(weather_history::device_id.eq(device_id.as_str().to_owned()))
            .filter(weather_history::date.eq(date.format(DATE_FORMAT).to_string()))
            .select(weather_history::payload)
            .first(&mut conn)
            .await
            .optional()
            .map_err(storage_diesel_error)?;

        let Some(payload) = payload else {
            return Err(Failure::database_miss(format!(
                "no weather history for {device_id} on {date}"
            )));
        };
        let hourly: Vec<HourlyWeather> =
            serde_json::from_str(&payload).map_err(|err| Failure::decode(err.to_string()))?;

        Ok(WeatherHistory {
            device_id: device_id.clone(),
            date,
            hourly,
        })
    }

    async fn set_weather_history(&self, history: &WeatherHistory) {
        match self.store(history).await {
            Ok(()) => debug!(
                device_id = %history.device_id,
                date = %history.date,
                "weather history persisted"
            ),
            Err(error) => warn!(
                device_id = %history.device_id,
                date = %history.date,
                %error,
                "failed to persist weather history"
            ),
        }
    }

    async fn clear(&self) {
        match self.delete_all().await {
            Ok(deleted) => debug!(deleted, "weather history cleared"),
            Err(error) => warn!(%error, "failed to clear weather history"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FailureKind;
    use rstest::rstest;

    #[rstest]
    fn checkout_failures_become_storage_failures() {
        let failure = storage_pool_error(PoolError::checkout("timed out"));
        assert_eq!(failure, Failure::storage("timed out"));
    }

    #[rstest]
    fn query_errors_become_storage_failures() {
        let failure = storage_diesel_error(diesel::result::Error::NotFound);
        assert_eq!(failure.kind(), FailureKind::Storage);
        assert_eq!(failure.message(), Some("record not found"));
    }
}
