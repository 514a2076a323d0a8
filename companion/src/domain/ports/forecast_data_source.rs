//! Port for device forecasts.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{DeviceId, Forecast, Outcome};

/// Forecast data source bound to the network or the key-value cache.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ForecastDataSource: Send + Sync {
    /// Forecast for `device_id` between `from` and `to`, inclusive.
    ///
    /// The cache source reports a missing or partial entry as
    /// [`Failure::CacheMiss`](crate::domain::Failure::CacheMiss).
    async fn get_forecast(
        &self,
        device_id: &DeviceId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Outcome<Forecast>;

    /// Cache a forecast. Cache only; best-effort.
    async fn set_forecast(&self, forecast: &Forecast);

    /// Drop all cached forecasts. Cache only; best-effort.
    async fn clear(&self);
}
