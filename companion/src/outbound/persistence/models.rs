//! Internal Diesel row structs.
//!
//! These never leave the persistence layer; adapters convert them into
//! domain types before returning.

use diesel::prelude::*;

use super::schema::{recent_searches, weather_history};

/// Insertable (and replaceable) `weather_history` row.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = weather_history)]
pub(crate) struct NewWeatherHistoryRow {
    pub device_id: String,
    pub date: String,
    pub payload: String,
    pub updated_at_ms: i64,
}

/// Row read from `recent_searches`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = recent_searches)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct RecentSearchRow {
    pub id: i64,
    pub name: String,
    pub center_lat: f64,
    pub center_lon: f64,
    pub address: Option<String>,
    pub station_id: Option<String>,
    pub station_name: Option<String>,
    pub station_cell_index: Option<String>,
    pub updated_at_ms: i64,
}

/// Insertable `recent_searches` row; SQLite assigns the id.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = recent_searches)]
pub(crate) struct NewRecentSearchRow {
    pub name: String,
    pub center_lat: f64,
    pub center_lon: f64,
    pub address: Option<String>,
    pub station_id: Option<String>,
    pub station_name: Option<String>,
    pub station_cell_index: Option<String>,
    pub updated_at_ms: i64,
}
