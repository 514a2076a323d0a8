//! Data-access core of a weather-station companion app.
//!
//! The [`domain`] holds the models, the failure taxonomy, one data-source
//! port per concept and the repositories that orchestrate them. Adapters
//! under [`outbound`] bind those ports to the REST API, a key-value cache,
//! process memory and an on-device SQLite database.

pub mod domain;
pub mod outbound;
pub mod settings;
pub mod telemetry;

pub use settings::{CompanionSettings, SettingsError};

#[cfg(test)]
mod test_support;
