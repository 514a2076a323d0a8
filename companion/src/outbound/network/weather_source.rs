//! History and forecast endpoints.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;

use super::client::ApiClient;
use super::dto::{DailyForecastDto, HistoryDayDto};
use crate::domain::ports::{
    ForecastDataSource, Medium, WeatherHistoryDataSource, unsupported_on,
};
use crate::domain::{DailyForecast, DeviceId, Forecast, Outcome, WeatherHistory};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Network source for observed history.
pub struct NetworkWeatherHistoryDataSource {
    client: Arc<ApiClient>,
}

impl NetworkWeatherHistoryDataSource {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl WeatherHistoryDataSource for NetworkWeatherHistoryDataSource {
    async fn get_weather_history(
        &self,
        device_id: &DeviceId,
        date: NaiveDate,
    ) -> Outcome<WeatherHistory> {
        let path = ["api", "v1", "me", "devices", device_id.as_str(), "history"];
        let query = [("date", date.format(DATE_FORMAT).to_string())];
        let day: HistoryDayDto = self.client.get_json(&path, &query).await?;
        Ok(day.into_domain(device_id))
    }

    async fn set_weather_history(&self, _history: &WeatherHistory) {
        unsupported_on(Medium::Network, "set_weather_history")
    }

    async fn clear(&self) {
        unsupported_on(Medium::Network, "clear")
    }
}

/// Network source for forecasts.
pub struct NetworkForecastDataSource {
    client: Arc<ApiClient>,
}

impl NetworkForecastDataSource {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ForecastDataSource for NetworkForecastDataSource {
    async fn get_forecast(
        &self,
        device_id: &DeviceId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Outcome<Forecast> {
        let path = ["api", "v1", "me", "devices", device_id.as_str(), "forecast"];
        let query = [
            ("fromDate", from.format(DATE_FORMAT).to_string()),
            ("toDate", to.format(DATE_FORMAT).to_string()),
        ];
        let days: Vec<DailyForecastDto> = self.client.get_json(&path, &query).await?;
        Ok(Forecast {
            device_id: device_id.clone(),
            days: days.into_iter().map(DailyForecast::from).collect(),
        })
    }

    async fn set_forecast(&self, _forecast: &Forecast) {
        unsupported_on(Medium::Network, "set_forecast")
    }

    async fn clear(&self) {
        unsupported_on(Medium::Network, "clear")
    }
}
