//! Runtime configuration loaded through OrthoConfig.
//!
//! Values come from `COMPANION_*` environment variables or a config file;
//! unset values fall back to defaults in the accessors.

use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::domain::RECENTS_MAX_ENTRIES;

const DEFAULT_API_BASE_URL: &str = "https://api.weatherxm.com/";
const DEFAULT_DATABASE_PATH: &str = "companion.sqlite3";
const DEFAULT_FORECAST_TTL_SECS: u64 = 3600;
const DEFAULT_POOL_MAX_SIZE: u32 = 4;

/// Errors raised when a configured value is unusable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    /// `api_base_url` does not parse as an absolute URL.
    #[error("invalid api_base_url `{value}`: {message}")]
    InvalidBaseUrl { value: String, message: String },
    /// `recents_max_entries` must keep at least one entry.
    #[error("recents_max_entries must be at least 1")]
    EmptyRecents,
}

/// Configuration of the companion data-access core.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "COMPANION")]
pub struct CompanionSettings {
    /// Root of the REST API.
    pub api_base_url: Option<String>,
    /// SQLite file holding history and recent searches.
    pub database_path: Option<PathBuf>,
    /// Redis URL for the key-value cache; unset selects the in-process store.
    pub redis_url: Option<String>,
    /// Per-request network timeout in seconds.
    #[ortho_config(default = 30)]
    pub request_timeout_secs: u64,
    /// Lifetime of cached forecasts in seconds.
    pub forecast_ttl_secs: Option<u64>,
    /// Number of recent searches kept.
    pub recents_max_entries: Option<usize>,
    /// Maximum pooled connections per backing store.
    pub pool_max_size: Option<u32>,
}

impl CompanionSettings {
    /// Parsed API base URL; endpoint paths are appended below it.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidBaseUrl`] when the value does not
    /// parse.
    pub fn api_base_url(&self) -> Result<Url, SettingsError> {
        let raw = self.api_base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL);
        Url::parse(raw).map_err(|err| SettingsError::InvalidBaseUrl {
            value: raw.to_owned(),
            message: err.to_string(),
        })
    }

    pub fn database_path(&self) -> PathBuf {
        self.database_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_PATH))
    }

    pub fn redis_url(&self) -> Option<&str> {
        self.redis_url.as_deref().filter(|url| !url.trim().is_empty())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn forecast_ttl(&self) -> Duration {
        Duration::from_secs(self.forecast_ttl_secs.unwrap_or(DEFAULT_FORECAST_TTL_SECS))
    }

    /// Recent-search cap.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::EmptyRecents`] for an explicit zero.
    pub fn recents_max_entries(&self) -> Result<usize, SettingsError> {
        match self.recents_max_entries {
            Some(0) => Err(SettingsError::EmptyRecents),
            Some(entries) => Ok(entries),
            None => Ok(RECENTS_MAX_ENTRIES),
        }
    }

    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE).max(1)
    }
}
