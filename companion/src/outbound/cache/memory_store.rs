//! Process-local key-value store with clock-driven expiry.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;

use crate::domain::ports::{CacheKey, KeyValueStore, KeyValueStoreError};

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Option<DateTime<Utc>>,
}

/// In-memory [`KeyValueStore`] used when no Redis URL is configured.
///
/// Expired entries are dropped on read and swept on every write.
pub struct InMemoryKeyValueStore {
    entries: Mutex<HashMap<String, Entry>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryKeyValueStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            clock,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, Entry>>, KeyValueStoreError> {
        self.entries
            .lock()
            .map_err(|_| KeyValueStoreError::backend("in-memory store lock poisoned"))
    }

    fn prune_expired(entries: &mut HashMap<String, Entry>, now: DateTime<Utc>) {
        entries.retain(|_, entry| entry.expires_at.is_none_or(|at| at > now));
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.entries.lock().expect("store mutex").len()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn get(&self, key: &CacheKey) -> Result<Option<String>, KeyValueStoreError> {
        let now = self.clock.utc();
        let mut entries = self.lock()?;
        let expired = entries
            .get(key.as_str())
            .is_some_and(|entry| entry.expires_at.is_some_and(|at| at <= now));
        if expired {
            entries.remove(key.as_str());
            return Ok(None);
        }
        Ok(entries.get(key.as_str()).map(|entry| entry.value.clone()))
    }

    async fn put(
        &self,
        key: &CacheKey,
        value: &str,
        ttl: Option<Duration>,
    ) -> Result<(), KeyValueStoreError> {
        let now = self.clock.utc();
        let expires_at = match ttl {
            Some(ttl) => {
                let delta = TimeDelta::from_std(ttl)
                    .map_err(|error| KeyValueStoreError::backend(format!("invalid ttl: {error}")))?;
                Some(now + delta)
            }
            None => None,
        };
        let mut entries = self.lock()?;
        Self::prune_expired(&mut entries, now);
        entries.insert(
            key.as_str().to_owned(),
            Entry {
                value: value.to_owned(),
                expires_at,
            },
        );
        Ok(())
    }

    async fn remove(&self, key: &CacheKey) -> Result<(), KeyValueStoreError> {
        self.lock()?.remove(key.as_str());
        Ok(())
    }

    async fn remove_prefix(&self, prefix: &str) -> Result<usize, KeyValueStoreError> {
        let now = self.clock.utc();
        let mut entries = self.lock()?;
        Self::prune_expired(&mut entries, now);
        let before = entries.len();
        entries.retain(|key, _| !key.starts_with(prefix));
        Ok(before - entries.len())
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rstest::{fixture, rstest};

    use super::*;
    use crate::test_support::MutableClock;

    #[fixture]
    fn clock() -> Arc<MutableClock> {
        let now = Utc
            .with_ymd_and_hms(2026, 10, 19, 12, 0, 0)
            .single()
            .expect("valid time");
        Arc::new(MutableClock::new(now))
    }

    fn key(concept: &str, id: &str) -> CacheKey {
        CacheKey::scoped(concept, id).expect("valid key")
    }

    #[rstest]
    #[tokio::test]
    async fn entries_expire_when_the_clock_passes_ttl(clock: Arc<MutableClock>) {
        let store = InMemoryKeyValueStore::new(clock.clone());
        store
            .put(&key("forecast", "d-1"), "{}", Some(Duration::from_secs(60)))
            .await
            .expect("put succeeds");

        clock.advance_seconds(59);
        assert!(store.get(&key("forecast", "d-1")).await.expect("get").is_some());

        clock.advance_seconds(1);
        assert!(store.get(&key("forecast", "d-1")).await.expect("get").is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn entries_without_ttl_never_expire(clock: Arc<MutableClock>) {
        let store = InMemoryKeyValueStore::new(clock.clone());
        store
            .put(&key("auth", "token"), "t", None)
            .await
            .expect("put succeeds");

        clock.advance_seconds(10 * 365 * 24 * 3600);
        assert_eq!(
            store.get(&key("auth", "token")).await.expect("get"),
            Some("t".to_owned())
        );
    }

    #[rstest]
    #[tokio::test]
    async fn writes_sweep_expired_entries_that_were_never_read(clock: Arc<MutableClock>) {
        let store = InMemoryKeyValueStore::new(clock.clone());
        store
            .put(&key("forecast", "d-1"), "{}", Some(Duration::from_secs(60)))
            .await
            .expect("put succeeds");
        store
            .put(&key("auth", "token"), "t", None)
            .await
            .expect("put succeeds");

        clock.advance_seconds(61);
        store
            .put(&key("forecast", "d-2"), "{}", Some(Duration::from_secs(60)))
            .await
            .expect("put succeeds");

        assert_eq!(store.len(), 2);
        assert!(store.get(&key("forecast", "d-1")).await.expect("get").is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn remove_prefix_counts_only_live_entries(clock: Arc<MutableClock>) {
        let store = InMemoryKeyValueStore::new(clock.clone());
        store
            .put(&key("forecast", "d-1"), "v", Some(Duration::from_secs(10)))
            .await
            .expect("put");
        store.put(&key("forecast", "d-2"), "v", None).await.expect("put");

        clock.advance_seconds(11);
        let removed = store
            .remove_prefix(&CacheKey::concept_prefix("forecast"))
            .await
            .expect("remove succeeds");
        assert_eq!(removed, 1);
        assert_eq!(store.len(), 0);
    }

    #[rstest]
    #[tokio::test]
    async fn remove_prefix_only_touches_one_concept(clock: Arc<MutableClock>) {
        let store = InMemoryKeyValueStore::new(clock);
        for (concept, id) in [("forecast", "d-1"), ("forecast", "d-2"), ("forecasting", "x")] {
            store.put(&key(concept, id), "v", None).await.expect("put");
        }

        let removed = store
            .remove_prefix(&CacheKey::concept_prefix("forecast"))
            .await
            .expect("remove succeeds");
        assert_eq!(removed, 2);
        assert!(store.get(&key("forecasting", "x")).await.expect("get").is_some());
    }
}
