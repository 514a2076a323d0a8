//! Wire payloads of the companion REST API.
//!
//! Responses decode into these DTOs first and are mapped into domain records
//! in one pass; mapping fails with a decode failure when a payload violates a
//! domain invariant (bad coordinates, blank ids).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    AuthToken, ClaimRequest, DailyForecast, Device, DeviceId, DeviceRelation, Failure,
    GeocodedAddress, HourlyWeather, Location, Outcome, RewardEntry, Rewards, SearchSuggestion,
    StationDescriptor, WeatherHistory,
};

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ApiErrorDto {
    pub(crate) code: Option<String>,
    pub(crate) message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AuthTokenDto {
    token: String,
    refresh_token: String,
}

impl From<AuthTokenDto> for AuthToken {
    fn from(value: AuthTokenDto) -> Self {
        Self {
            access_token: value.token,
            refresh_token: value.refresh_token,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RefreshBody<'a> {
    pub(crate) refresh_token: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LogoutBody<'a> {
    pub(crate) access_token: &'a str,
    pub(crate) refresh_token: &'a str,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub(crate) struct LocationDto {
    lat: f64,
    lon: f64,
}

impl LocationDto {
    fn into_domain(self) -> Outcome<Location> {
        Location::new(self.lat, self.lon)
            .map_err(|error| Failure::decode(format!("invalid location in payload: {error}")))
    }
}

impl From<&Location> for LocationDto {
    fn from(value: &Location) -> Self {
        Self {
            lat: value.lat(),
            lon: value.lon(),
        }
    }
}

fn device_id(raw: String) -> Outcome<DeviceId> {
    DeviceId::new(raw).map_err(|error| Failure::decode(format!("invalid device id: {error}")))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct HourlyWeatherDto {
    timestamp: DateTime<Utc>,
    temperature: Option<f64>,
    feels_like: Option<f64>,
    humidity: Option<f64>,
    precipitation: Option<f64>,
    wind_speed: Option<f64>,
    wind_direction: Option<f64>,
    pressure: Option<f64>,
    uv_index: Option<f64>,
    icon: Option<String>,
}

impl From<HourlyWeatherDto> for HourlyWeather {
    fn from(value: HourlyWeatherDto) -> Self {
        Self {
            timestamp: value.timestamp,
            temperature: value.temperature,
            feels_like: value.feels_like,
            humidity: value.humidity,
            precipitation: value.precipitation,
            wind_speed: value.wind_speed,
            wind_direction: value.wind_direction,
            pressure: value.pressure,
            uv_index: value.uv_index,
            icon: value.icon,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DeviceDto {
    id: String,
    name: String,
    friendly_name: Option<String>,
    label: Option<String>,
    address: Option<String>,
    location: Option<LocationDto>,
    #[serde(default)]
    relation: DeviceRelation,
    last_active_at: Option<DateTime<Utc>>,
    current_weather: Option<HourlyWeatherDto>,
}

impl DeviceDto {
    pub(crate) fn into_domain(self) -> Outcome<Device> {
        Ok(Device {
            id: device_id(self.id)?,
            name: self.name,
            friendly_name: self.friendly_name,
            label: self.label,
            address: self.address,
            location: self.location.map(LocationDto::into_domain).transpose()?,
            relation: self.relation,
            last_active_at: self.last_active_at,
            current_weather: self.current_weather.map(HourlyWeather::from),
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ClaimBody<'a> {
    serial_number: &'a str,
    location: LocationDto,
    #[serde(skip_serializing_if = "Option::is_none")]
    secret: Option<&'a str>,
}

impl<'a> From<&'a ClaimRequest> for ClaimBody<'a> {
    fn from(value: &'a ClaimRequest) -> Self {
        Self {
            serial_number: value.serial_number.as_str(),
            location: LocationDto::from(&value.location),
            secret: value.secret.as_deref(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FriendlyNameBody<'a> {
    pub(crate) friendly_name: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DisclaimBody<'a> {
    pub(crate) serial_number: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct HistoryDayDto {
    date: NaiveDate,
    #[serde(default)]
    hourly: Vec<HourlyWeatherDto>,
}

impl HistoryDayDto {
    pub(crate) fn into_domain(self, device_id: &DeviceId) -> WeatherHistory {
        WeatherHistory {
            device_id: device_id.clone(),
            date: self.date,
            hourly: self.hourly.into_iter().map(HourlyWeather::from).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DailyForecastDto {
    date: NaiveDate,
    temperature_max: Option<f64>,
    temperature_min: Option<f64>,
    precipitation_probability: Option<f64>,
    #[serde(default)]
    hourly: Vec<HourlyWeatherDto>,
}

impl From<DailyForecastDto> for DailyForecast {
    fn from(value: DailyForecastDto) -> Self {
        Self {
            date: value.date,
            temperature_max: value.temperature_max,
            temperature_min: value.temperature_min,
            precipitation_probability: value.precipitation_probability,
            hourly: value.hourly.into_iter().map(HourlyWeather::from).collect(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SearchResultsDto {
    #[serde(default)]
    devices: Vec<SearchDeviceDto>,
    #[serde(default)]
    addresses: Vec<SearchAddressDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchDeviceDto {
    id: String,
    name: String,
    cell_index: Option<String>,
    address: Option<String>,
    center: Option<LocationDto>,
}

#[derive(Debug, Deserialize)]
struct SearchAddressDto {
    id: String,
    name: String,
    place: Option<String>,
    center: Option<LocationDto>,
}

impl SearchResultsDto {
    /// Stations first, then places, each in server order.
    pub(crate) fn into_domain(self) -> Outcome<Vec<SearchSuggestion>> {
        let stations = self.devices.into_iter().map(|device| {
            Ok(SearchSuggestion {
                station: Some(StationDescriptor {
                    id: device.id.clone(),
                    name: device.name.clone(),
                    cell_index: device.cell_index,
                }),
                id: device.id,
                name: device.name,
                address: device.address,
                center: device.center.map(LocationDto::into_domain).transpose()?,
            })
        });
        let places = self.addresses.into_iter().map(|address| {
            Ok(SearchSuggestion {
                id: address.id,
                name: address.name,
                address: address.place,
                center: address.center.map(LocationDto::into_domain).transpose()?,
                station: None,
            })
        });
        stations.chain(places).collect()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GeocodeDto {
    address: Option<String>,
    country_code: Option<String>,
}

impl GeocodeDto {
    pub(crate) fn into_domain(self) -> Outcome<GeocodedAddress> {
        let country_code = self
            .country_code
            .filter(|code| !code.trim().is_empty())
            .ok_or(Failure::CountryNotFound)?;
        let address = self
            .address
            .filter(|address| !address.trim().is_empty())
            .ok_or_else(|| Failure::geocoding("no address for location"))?;
        Ok(GeocodedAddress {
            address,
            country_code,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RewardEntryDto {
    timestamp: DateTime<Utc>,
    amount: f64,
    reward_score: Option<u8>,
}

impl From<RewardEntryDto> for RewardEntry {
    fn from(value: RewardEntryDto) -> Self {
        Self {
            timestamp: value.timestamp,
            amount: value.amount,
            reward_score: value.reward_score,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RewardsDto {
    #[serde(default)]
    total_rewards: f64,
    latest: Option<RewardEntryDto>,
    #[serde(default)]
    timeline: Vec<RewardEntryDto>,
}

impl From<RewardsDto> for Rewards {
    fn from(value: RewardsDto) -> Self {
        Self {
            total_rewards: value.total_rewards,
            latest: value.latest.map(RewardEntry::from),
            timeline: value.timeline.into_iter().map(RewardEntry::from).collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct WalletDto {
    pub(crate) address: String,
}

pub(crate) fn device_ids(raw: Vec<String>) -> Outcome<Vec<DeviceId>> {
    raw.into_iter().map(device_id).collect()
}
