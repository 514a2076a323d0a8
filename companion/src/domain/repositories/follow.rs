//! Followed devices.

use std::sync::Arc;

use tracing::warn;

use super::fallback::{AccessPolicy, read_through};
use crate::domain::ports::FollowDataSource;
use crate::domain::{DeviceId, Outcome};

pub struct FollowRepository {
    network: Arc<dyn FollowDataSource>,
    cache: Arc<dyn FollowDataSource>,
}

impl FollowRepository {
    pub fn new(network: Arc<dyn FollowDataSource>, cache: Arc<dyn FollowDataSource>) -> Self {
        Self { network, cache }
    }

    pub async fn follow(&self, device_id: &DeviceId) -> Outcome<()> {
        self.network.follow(device_id).await?;
        self.refresh_cached_ids().await;
        Ok(())
    }

    pub async fn unfollow(&self, device_id: &DeviceId) -> Outcome<()> {
        self.network.unfollow(device_id).await?;
        self.refresh_cached_ids().await;
        Ok(())
    }

    /// Followed ids, cached first.
    pub async fn followed_device_ids(&self, policy: AccessPolicy) -> Outcome<Vec<DeviceId>> {
        let fetched = read_through(
            policy,
            "followed",
            || self.cache.get_followed_device_ids(),
            || self.network.get_followed_device_ids(),
        )
        .await?;

        if fetched.is_remote() {
            self.cache.set_followed_device_ids(&fetched.value).await;
        }
        Ok(fetched.value)
    }

    /// Re-read followed ids after a mutation. A failed refresh leaves the
    /// stale list in place; the mutation itself already succeeded.
    async fn refresh_cached_ids(&self) {
        match self.network.get_followed_device_ids().await {
            Ok(ids) => self.cache.set_followed_device_ids(&ids).await,
            Err(failure) => warn!(error = %failure, "failed to refresh followed devices"),
        }
    }
}
