//! Port for the key-value medium behind cache data sources, and the key type
//! shared by its adapters.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use super::define_port_error;

const NAMESPACE: &str = "companion:v1";

/// Namespaced cache key, `companion:v1:<concept>:<id>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

/// Validation errors returned when constructing [`CacheKey`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheKeyValidationError {
    /// A key segment is empty after trimming whitespace.
    #[error("cache key segments must not be empty")]
    Empty,
    /// A key segment contains whitespace.
    #[error("cache key segments must not contain whitespace")]
    ContainsWhitespace,
}

impl CacheKey {
    /// Build the key for `id` within `concept`.
    ///
    /// # Examples
    /// ```
    /// use companion::domain::ports::CacheKey;
    ///
    /// let key = CacheKey::scoped("forecast", "d-1").expect("valid key");
    /// assert_eq!(key.as_str(), "companion:v1:forecast:d-1");
    /// ```
    pub fn scoped(concept: &str, id: &str) -> Result<Self, CacheKeyValidationError> {
        validate_segment(concept)?;
        validate_segment(id)?;
        Ok(Self(format!("{NAMESPACE}:{concept}:{id}")))
    }

    /// Prefix shared by every key of `concept`, for bulk removal.
    pub fn concept_prefix(concept: &str) -> String {
        format!("{NAMESPACE}:{concept}:")
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

fn validate_segment(segment: &str) -> Result<(), CacheKeyValidationError> {
    if segment.trim().is_empty() {
        return Err(CacheKeyValidationError::Empty);
    }
    if segment.chars().any(char::is_whitespace) {
        return Err(CacheKeyValidationError::ContainsWhitespace);
    }
    Ok(())
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

define_port_error! {
    /// Errors surfaced by key-value store adapters.
    pub enum KeyValueStoreError {
        /// The store could not be reached.
        Connection { message: String } => "key-value store connection failed: {message}",
        /// The store rejected or failed a command.
        Backend { message: String } => "key-value store command failed: {message}",
    }
}

/// Raw string key-value medium.
///
/// Absence is `Ok(None)`; adapters never report a miss as an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    async fn get(&self, key: &CacheKey) -> Result<Option<String>, KeyValueStoreError>;

    /// Store `value` under `key`, expiring after `ttl` when given.
    async fn put(
        &self,
        key: &CacheKey,
        value: &str,
        ttl: Option<Duration>,
    ) -> Result<(), KeyValueStoreError>;

    /// Remove `key`; removing an absent key succeeds.
    async fn remove(&self, key: &CacheKey) -> Result<(), KeyValueStoreError>;

    /// Remove every key starting with `prefix` and return how many went.
    async fn remove_prefix(&self, prefix: &str) -> Result<usize, KeyValueStoreError>;
}
