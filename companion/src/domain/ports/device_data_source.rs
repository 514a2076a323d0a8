//! Port for the signed-in user's devices.

use async_trait::async_trait;

use crate::domain::{ClaimRequest, Device, DeviceId, Outcome};

/// Device data source bound to one medium.
///
/// The network source owns every remote operation; the cache source only
/// remembers which device ids belong to the user.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DeviceDataSource: Send + Sync {
    /// Devices owned or followed by the user. Network only.
    async fn get_user_devices(&self) -> Outcome<Vec<Device>>;

    /// One device of the user. Network only.
    async fn get_user_device(&self, device_id: &DeviceId) -> Outcome<Device>;

    /// Register a physical device to the user. Network only.
    ///
    /// Callers go through the claim controller, which retries the transient
    /// "claiming in progress" state.
    async fn claim_device(&self, request: &ClaimRequest) -> Outcome<Device>;

    /// Set the owner-chosen name. Network only.
    async fn set_friendly_name(&self, device_id: &DeviceId, name: &str) -> Outcome<()>;

    /// Remove the owner-chosen name. Network only.
    async fn clear_friendly_name(&self, device_id: &DeviceId) -> Outcome<()>;

    /// Release a claimed device. Network only.
    async fn remove_device(&self, device_id: &DeviceId, serial_number: &str) -> Outcome<()>;

    /// Ids of the user's devices. Cache only.
    async fn get_user_device_ids(&self) -> Outcome<Vec<DeviceId>>;

    /// Remember the ids of the user's devices. Cache only; best-effort.
    async fn set_user_device_ids(&self, ids: &[DeviceId]);
}
