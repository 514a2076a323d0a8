//! Port for followed devices.

use async_trait::async_trait;

use crate::domain::{DeviceId, Outcome};

/// Follow data source bound to the network or the key-value cache.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FollowDataSource: Send + Sync {
    /// Follow a device. Network only.
    async fn follow(&self, device_id: &DeviceId) -> Outcome<()>;

    /// Stop following a device. Network only.
    async fn unfollow(&self, device_id: &DeviceId) -> Outcome<()>;

    /// Ids of followed devices.
    async fn get_followed_device_ids(&self) -> Outcome<Vec<DeviceId>>;

    /// Remember followed ids. Cache only; best-effort.
    async fn set_followed_device_ids(&self, ids: &[DeviceId]);
}
