//! JSON values over a [`KeyValueStore`], with the cache-source failure rules.
//!
//! Entries are addressed by concept and id. Reads map absence to
//! [`Failure::CacheMiss`] and store errors to [`Failure::Storage`]. An entry
//! that no longer decodes is dropped and reported as a miss so the caller
//! refetches it. Writes never fail; store errors are logged.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::domain::ports::{CacheKey, KeyValueStore};
use crate::domain::{Failure, Outcome};

#[derive(Clone)]
pub struct JsonCache {
    store: Arc<dyn KeyValueStore>,
}

fn cache_key(concept: &str, id: &str) -> Outcome<CacheKey> {
    CacheKey::scoped(concept, id)
        .map_err(|error| Failure::validation(format!("invalid cache key {concept}:{id}: {error}")))
}

impl JsonCache {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub(crate) async fn read<T: DeserializeOwned>(&self, concept: &str, id: &str) -> Outcome<T> {
        let key = cache_key(concept, id)?;
        let raw = self
            .store
            .get(&key)
            .await
            .map_err(|error| Failure::storage(error.to_string()))?
            .ok_or_else(|| Failure::cache_miss(key.as_str()))?;

        match serde_json::from_str(&raw) {
            Ok(value) => Ok(value),
            Err(error) => {
                warn!(key = %key, %error, "dropping undecodable cache entry");
                self.remove_key(&key).await;
                Err(Failure::cache_miss(key.as_str()))
            }
        }
    }

    pub(crate) async fn write<T: Serialize + ?Sized>(
        &self,
        concept: &str,
        id: &str,
        value: &T,
        ttl: Option<Duration>,
    ) {
        let key = match cache_key(concept, id) {
            Ok(key) => key,
            Err(failure) => {
                warn!(concept, id, error = %failure, "not caching entry");
                return;
            }
        };
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(error) => {
                warn!(key = %key, %error, "failed to encode cache entry");
                return;
            }
        };
        if let Err(error) = self.store.put(&key, &raw, ttl).await {
            warn!(key = %key, %error, "failed to write cache entry");
        }
    }

    pub(crate) async fn remove(&self, concept: &str, id: &str) {
        match cache_key(concept, id) {
            Ok(key) => self.remove_key(&key).await,
            Err(failure) => warn!(concept, id, error = %failure, "not removing entry"),
        }
    }

    /// Remove every entry of `concept`.
    pub(crate) async fn remove_concept(&self, concept: &str) {
        if let Err(error) = self
            .store
            .remove_prefix(&CacheKey::concept_prefix(concept))
            .await
        {
            warn!(concept, %error, "failed to clear cache entries");
        }
    }

    async fn remove_key(&self, key: &CacheKey) {
        if let Err(error) = self.store.remove(key).await {
            warn!(key = %key, %error, "failed to remove cache entry");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FailureKind;
    use crate::domain::ports::{KeyValueStoreError, MockKeyValueStore};

    #[tokio::test]
    async fn absent_entry_is_a_cache_miss() {
        let mut store = MockKeyValueStore::new();
        store.expect_get().returning(|_| Ok(None));

        let failure = JsonCache::new(Arc::new(store))
            .read::<u32>("sample", "1")
            .await
            .expect_err("nothing stored");
        assert_eq!(failure, Failure::cache_miss("companion:v1:sample:1"));
    }

    #[tokio::test]
    async fn store_error_is_a_storage_failure_not_a_miss() {
        let mut store = MockKeyValueStore::new();
        store
            .expect_get()
            .returning(|_| Err(KeyValueStoreError::connection("refused")));

        let failure = JsonCache::new(Arc::new(store))
            .read::<u32>("sample", "1")
            .await
            .expect_err("store down");
        assert_eq!(failure.kind(), FailureKind::Storage);
        assert!(!failure.is_local_miss());
    }

    #[tokio::test]
    async fn undecodable_entry_is_removed_and_missed() {
        let mut store = MockKeyValueStore::new();
        store
            .expect_get()
            .returning(|_| Ok(Some("not json".to_owned())));
        store.expect_remove().times(1).returning(|_| Ok(()));

        let failure = JsonCache::new(Arc::new(store))
            .read::<u32>("sample", "1")
            .await
            .expect_err("corrupt entry");
        assert_eq!(failure.kind(), FailureKind::CacheMiss);
    }

    #[tokio::test]
    async fn write_errors_are_swallowed() {
        let mut store = MockKeyValueStore::new();
        store
            .expect_put()
            .times(1)
            .returning(|_, _, _| Err(KeyValueStoreError::backend("OOM")));

        JsonCache::new(Arc::new(store))
            .write("sample", "1", &7_u32, None)
            .await;
    }

    #[tokio::test]
    async fn invalid_ids_never_reach_the_store() {
        let mut store = MockKeyValueStore::new();
        store.expect_get().times(0);
        store.expect_put().times(0);
        let cache = JsonCache::new(Arc::new(store));

        cache.write("sample", "has space", &1_u32, None).await;
        let failure = cache
            .read::<u32>("sample", "has space")
            .await
            .expect_err("invalid key");
        assert_eq!(failure.kind(), FailureKind::Validation);
    }
}
