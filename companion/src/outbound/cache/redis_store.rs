//! Redis-backed key-value store.
//!
//! Connections come from a `bb8` pool. Values are stored as plain strings;
//! TTLs get a random extension so entries written together do not all
//! expire in the same instant.

use std::time::Duration;

use async_trait::async_trait;
use bb8_redis::RedisConnectionManager;
use bb8_redis::bb8::{Pool, PooledConnection};
use bb8_redis::redis::{self, RedisError};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::domain::ports::{CacheKey, KeyValueStore, KeyValueStoreError};

/// Upper bound of the random TTL extension, in percent of the TTL.
pub const DEFAULT_TTL_JITTER_PERCENT: u32 = 10;

pub struct RedisKeyValueStore {
    pool: Pool<RedisConnectionManager>,
    ttl_jitter_percent: u32,
}

impl RedisKeyValueStore {
    /// Connect a pool of at most `max_size` connections to `url`.
    ///
    /// # Errors
    ///
    /// Returns [`KeyValueStoreError::Connection`] when the URL is invalid or
    /// the initial connection fails.
    pub async fn connect(url: &str, max_size: u32) -> Result<Self, KeyValueStoreError> {
        let manager = RedisConnectionManager::new(url).map_err(map_connection_error)?;
        let pool = Pool::builder()
            .max_size(max_size.max(1))
            .build(manager)
            .await
            .map_err(map_connection_error)?;
        Ok(Self {
            pool,
            ttl_jitter_percent: DEFAULT_TTL_JITTER_PERCENT,
        })
    }

    async fn connection(
        &self,
    ) -> Result<PooledConnection<'_, RedisConnectionManager>, KeyValueStoreError> {
        self.pool
            .get()
            .await
            .map_err(|error| KeyValueStoreError::connection(error.to_string()))
    }
}

fn map_connection_error(error: RedisError) -> KeyValueStoreError {
    KeyValueStoreError::connection(error.to_string())
}

fn map_command_error(error: RedisError) -> KeyValueStoreError {
    debug!(%error, "redis command failed");
    KeyValueStoreError::backend(error.to_string())
}

/// `ttl` extended by a random share of at most `percent`.
fn jittered(ttl: Duration, percent: u32, rng: &mut impl Rng) -> Duration {
    let max_extra = ttl * percent.min(100) / 100;
    let max_extra_ms = u64::try_from(max_extra.as_millis()).unwrap_or(u64::MAX);
    if max_extra_ms == 0 {
        return ttl;
    }
    ttl + Duration::from_millis(rng.gen_range(0..=max_extra_ms))
}

/// Escape glob metacharacters so `prefix` matches literally in `KEYS`.
fn literal_glob_prefix(prefix: &str) -> String {
    let mut pattern = String::with_capacity(prefix.len() + 1);
    for ch in prefix.chars() {
        if matches!(ch, '*' | '?' | '[' | ']' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('*');
    pattern
}

#[async_trait]
impl KeyValueStore for RedisKeyValueStore {
    async fn get(&self, key: &CacheKey) -> Result<Option<String>, KeyValueStoreError> {
        let mut conn = self.connection().await?;
        let value: Option<String> = redis::cmd("GET")
            .arg(key.as_str())
            .query_async(&mut *conn)
            .await
            .map_err(map_command_error)?;
        Ok(value)
    }

    async fn put(
        &self,
        key: &CacheKey,
        value: &str,
        ttl: Option<Duration>,
    ) -> Result<(), KeyValueStoreError> {
        let mut command = redis::cmd("SET");
        command.arg(key.as_str()).arg(value);
        if let Some(ttl) = ttl {
            let mut rng = SmallRng::from_entropy();
            let ttl_ms = u64::try_from(jittered(ttl, self.ttl_jitter_percent, &mut rng).as_millis())
                .unwrap_or(u64::MAX)
                .max(1);
            command.arg("PX").arg(ttl_ms);
        }

        let mut conn = self.connection().await?;
        let (): () = command
            .query_async(&mut *conn)
            .await
            .map_err(map_command_error)?;
        Ok(())
    }

    async fn remove(&self, key: &CacheKey) -> Result<(), KeyValueStoreError> {
        let mut conn = self.connection().await?;
        let _removed: i64 = redis::cmd("DEL")
            .arg(key.as_str())
            .query_async(&mut *conn)
            .await
            .map_err(map_command_error)?;
        Ok(())
    }

    async fn remove_prefix(&self, prefix: &str) -> Result<usize, KeyValueStoreError> {
        let mut conn = self.connection().await?;
        let keys: Vec<String> = redis::cmd("KEYS")
            .arg(literal_glob_prefix(prefix))
            .query_async(&mut *conn)
            .await
            .map_err(map_command_error)?;
        if keys.is_empty() {
            return Ok(0);
        }
        let removed: usize = redis::cmd("DEL")
            .arg(&keys)
            .query_async(&mut *conn)
            .await
            .map_err(map_command_error)?;
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn jitter_stays_within_ratio() {
        let mut rng = SmallRng::seed_from_u64(7);
        let ttl = Duration::from_secs(3600);
        for _ in 0..100 {
            let jittered = jittered(ttl, 10, &mut rng);
            assert!(jittered >= ttl);
            assert!(jittered <= ttl + Duration::from_secs(360));
        }
    }

    #[test]
    fn tiny_ttl_is_left_alone() {
        let mut rng = SmallRng::seed_from_u64(7);
        let ttl = Duration::from_millis(5);
        assert_eq!(jittered(ttl, 10, &mut rng), ttl);
    }

    #[rstest]
    #[case("companion:v1:forecast:", "companion:v1:forecast:*")]
    #[case("odd*[key]?", r"odd\*\[key\]\?*")]
    fn prefix_pattern_matches_literally(#[case] prefix: &str, #[case] expected: &str) {
        assert_eq!(literal_glob_prefix(prefix), expected);
    }
}
