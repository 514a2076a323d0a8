//! Forecasts: cached first, network on a miss, cached after a fetch.

use std::sync::Arc;

use chrono::NaiveDate;

use super::fallback::{AccessPolicy, read_through};
use crate::domain::ports::ForecastDataSource;
use crate::domain::{DeviceId, Failure, Forecast, Outcome};

pub struct ForecastRepository {
    network: Arc<dyn ForecastDataSource>,
    cache: Arc<dyn ForecastDataSource>,
}

impl ForecastRepository {
    pub fn new(network: Arc<dyn ForecastDataSource>, cache: Arc<dyn ForecastDataSource>) -> Self {
        Self { network, cache }
    }

    /// Forecast of `device_id` for `from..=to`.
    pub async fn forecast(
        &self,
        device_id: &DeviceId,
        from: NaiveDate,
        to: NaiveDate,
        policy: AccessPolicy,
    ) -> Outcome<Forecast> {
        if from > to {
            return Err(Failure::validation(format!(
                "forecast range starts after it ends: {from} > {to}"
            )));
        }

        let fetched = read_through(
            policy,
            "forecast",
            || self.cache.get_forecast(device_id, from, to),
            || self.network.get_forecast(device_id, from, to),
        )
        .await?;

        if fetched.is_remote() {
            self.cache.set_forecast(&fetched.value).await;
        }
        Ok(fetched.value)
    }

    pub async fn clear(&self) {
        self.cache.clear().await;
    }
}
