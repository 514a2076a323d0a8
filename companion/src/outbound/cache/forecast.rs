//! Cached forecasts, one entry per device with a TTL.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::debug;

use super::json_cache::JsonCache;
use crate::domain::ports::{CacheKey, ForecastDataSource};
use crate::domain::{DeviceId, Failure, Forecast, Outcome};

const CONCEPT: &str = "forecast";

/// Default lifetime of a cached forecast.
pub const DEFAULT_FORECAST_TTL: Duration = Duration::from_secs(3600);

pub struct CacheForecastDataSource {
    cache: JsonCache,
    ttl: Duration,
}

impl CacheForecastDataSource {
    pub fn new(cache: JsonCache, ttl: Duration) -> Self {
        Self { cache, ttl }
    }
}

#[async_trait]
impl ForecastDataSource for CacheForecastDataSource {
    /// Cached days within `from..=to`; an entry missing any requested day
    /// counts as a miss.
    async fn get_forecast(
        &self,
        device_id: &DeviceId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Outcome<Forecast> {
        let forecast: Forecast = self.cache.read(CONCEPT, device_id.as_str()).await?;
        if !forecast.covers(from, to) {
            debug!(device_id = %device_id, %from, %to, "cached forecast does not cover range");
            return Err(Failure::cache_miss(
                CacheKey::concept_prefix(CONCEPT) + device_id.as_str(),
            ));
        }
        Ok(forecast.between(from, to))
    }

    async fn set_forecast(&self, forecast: &Forecast) {
        self.cache
            .write(CONCEPT, forecast.device_id.as_str(), forecast, Some(self.ttl))
            .await;
    }

    async fn clear(&self) {
        self.cache.remove_concept(CONCEPT).await;
    }
}
