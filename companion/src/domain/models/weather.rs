//! Observed and forecast weather records.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::DeviceId;

/// One hourly observation or forecast point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyWeather {
    pub timestamp: DateTime<Utc>,
    pub temperature: Option<f64>,
    pub feels_like: Option<f64>,
    pub humidity: Option<f64>,
    pub precipitation: Option<f64>,
    pub wind_speed: Option<f64>,
    pub wind_direction: Option<f64>,
    pub pressure: Option<f64>,
    pub uv_index: Option<f64>,
    pub icon: Option<String>,
}

/// Hourly history of one device for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherHistory {
    pub device_id: DeviceId,
    pub date: NaiveDate,
    pub hourly: Vec<HourlyWeather>,
}

/// Forecast summary for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub date: NaiveDate,
    pub temperature_max: Option<f64>,
    pub temperature_min: Option<f64>,
    pub precipitation_probability: Option<f64>,
    pub hourly: Vec<HourlyWeather>,
}

/// Multi-day forecast for one device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub device_id: DeviceId,
    pub days: Vec<DailyForecast>,
}

impl Forecast {
    /// Whether the forecast has a day entry for every date in `from..=to`.
    pub fn covers(&self, from: NaiveDate, to: NaiveDate) -> bool {
        from.iter_days()
            .take_while(|day| *day <= to)
            .all(|day| self.days.iter().any(|entry| entry.date == day))
    }

    /// Copy restricted to the days inside `from..=to`.
    #[must_use]
    pub fn between(&self, from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            device_id: self.device_id.clone(),
            days: self
                .days
                .iter()
                .filter(|day| day.date >= from && day.date <= to)
                .cloned()
                .collect(),
        }
    }
}
