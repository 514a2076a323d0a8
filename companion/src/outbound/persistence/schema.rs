//! Diesel table definitions for the on-device SQLite schema.
//!
//! These must match `migrations/` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// One day of observed history per device, stored as a JSON payload.
    weather_history (device_id, date) {
        device_id -> Text,
        /// Calendar day, `YYYY-MM-DD`.
        date -> Text,
        /// JSON array of hourly observations.
        payload -> Text,
        updated_at_ms -> BigInt,
    }
}

diesel::table! {
    /// Bounded history of search selections.
    ///
    /// `id` is the SQLite rowid and grows with every insertion; it breaks
    /// ties between rows sharing `updated_at_ms`.
    recent_searches (id) {
        id -> BigInt,
        name -> Text,
        center_lat -> Double,
        center_lon -> Double,
        address -> Nullable<Text>,
        station_id -> Nullable<Text>,
        station_name -> Nullable<Text>,
        station_cell_index -> Nullable<Text>,
        updated_at_ms -> BigInt,
    }
}

diesel::allow_tables_to_appear_in_same_query!(weather_history, recent_searches);
