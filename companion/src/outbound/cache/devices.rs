//! Cached id lists: the user's devices and the followed devices.

use async_trait::async_trait;

use super::json_cache::JsonCache;
use crate::domain::ports::{DeviceDataSource, FollowDataSource, Medium, unsupported_on};
use crate::domain::{ClaimRequest, Device, DeviceId, Outcome};

const DEVICES: &str = "devices";
const FOLLOWED: &str = "followed";
const IDS: &str = "ids";

pub struct CacheDeviceDataSource {
    cache: JsonCache,
}

impl CacheDeviceDataSource {
    pub fn new(cache: JsonCache) -> Self {
        Self { cache }
    }
}

#[async_trait]
impl DeviceDataSource for CacheDeviceDataSource {
    async fn get_user_devices(&self) -> Outcome<Vec<Device>> {
        unsupported_on(Medium::Cache, "get_user_devices")
    }

    async fn get_user_device(&self, _device_id: &DeviceId) -> Outcome<Device> {
        unsupported_on(Medium::Cache, "get_user_device")
    }

    async fn claim_device(&self, _request: &ClaimRequest) -> Outcome<Device> {
        unsupported_on(Medium::Cache, "claim_device")
    }

    async fn set_friendly_name(&self, _device_id: &DeviceId, _name: &str) -> Outcome<()> {
        unsupported_on(Medium::Cache, "set_friendly_name")
    }

    async fn clear_friendly_name(&self, _device_id: &DeviceId) -> Outcome<()> {
        unsupported_on(Medium::Cache, "clear_friendly_name")
    }

    async fn remove_device(&self, _device_id: &DeviceId, _serial_number: &str) -> Outcome<()> {
        unsupported_on(Medium::Cache, "remove_device")
    }

    async fn get_user_device_ids(&self) -> Outcome<Vec<DeviceId>> {
        self.cache.read(DEVICES, IDS).await
    }

    async fn set_user_device_ids(&self, ids: &[DeviceId]) {
        self.cache.write(DEVICES, IDS, ids, None).await;
    }
}

pub struct CacheFollowDataSource {
    cache: JsonCache,
}

impl CacheFollowDataSource {
    pub fn new(cache: JsonCache) -> Self {
        Self { cache }
    }
}

#[async_trait]
impl FollowDataSource for CacheFollowDataSource {
    async fn follow(&self, _device_id: &DeviceId) -> Outcome<()> {
        unsupported_on(Medium::Cache, "follow")
    }

    async fn unfollow(&self, _device_id: &DeviceId) -> Outcome<()> {
        unsupported_on(Medium::Cache, "unfollow")
    }

    async fn get_followed_device_ids(&self) -> Outcome<Vec<DeviceId>> {
        self.cache.read(FOLLOWED, IDS).await
    }

    async fn set_followed_device_ids(&self, ids: &[DeviceId]) {
        self.cache.write(FOLLOWED, IDS, ids, None).await;
    }
}
