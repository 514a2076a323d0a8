//! Device endpoints: list, lookup, claim, naming and release.

use std::sync::Arc;

use async_trait::async_trait;

use super::client::{ApiClient, ErrorScope};
use super::dto::{ClaimBody, DeviceDto, DisclaimBody, FriendlyNameBody};
use crate::domain::ports::{DeviceDataSource, Medium, unsupported_on};
use crate::domain::{ClaimRequest, Device, DeviceId, Outcome};

const DEVICES: &[&str] = &["api", "v1", "me", "devices"];
const CLAIM: &[&str] = &["api", "v1", "me", "devices", "claim"];
const DISCLAIM: &[&str] = &["api", "v1", "me", "devices", "disclaim"];

pub struct NetworkDeviceDataSource {
    client: Arc<ApiClient>,
}

impl NetworkDeviceDataSource {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

fn friendly_name_path(device_id: &DeviceId) -> [&str; 6] {
    ["api", "v1", "me", "devices", device_id.as_str(), "friendlyName"]
}

#[async_trait]
impl DeviceDataSource for NetworkDeviceDataSource {
    async fn get_user_devices(&self) -> Outcome<Vec<Device>> {
        let devices: Vec<DeviceDto> = self.client.get_json(DEVICES, &[]).await?;
        devices.into_iter().map(DeviceDto::into_domain).collect()
    }

    async fn get_user_device(&self, device_id: &DeviceId) -> Outcome<Device> {
        let path = ["api", "v1", "me", "devices", device_id.as_str()];
        let device: DeviceDto = self.client.get_json(&path, &[]).await?;
        device.into_domain()
    }

    async fn claim_device(&self, request: &ClaimRequest) -> Outcome<Device> {
        let device: DeviceDto = self
            .client
            .post_json(CLAIM, &ClaimBody::from(request), ErrorScope::Claim)
            .await?;
        device.into_domain()
    }

    async fn set_friendly_name(&self, device_id: &DeviceId, name: &str) -> Outcome<()> {
        let body = FriendlyNameBody {
            friendly_name: name,
        };
        self.client.post(&friendly_name_path(device_id), &body).await
    }

    async fn clear_friendly_name(&self, device_id: &DeviceId) -> Outcome<()> {
        self.client.delete(&friendly_name_path(device_id)).await
    }

    async fn remove_device(&self, _device_id: &DeviceId, serial_number: &str) -> Outcome<()> {
        self.client
            .post(DISCLAIM, &DisclaimBody { serial_number })
            .await
    }

    async fn get_user_device_ids(&self) -> Outcome<Vec<DeviceId>> {
        unsupported_on(Medium::Network, "get_user_device_ids")
    }

    async fn set_user_device_ids(&self, _ids: &[DeviceId]) {
        unsupported_on(Medium::Network, "set_user_device_ids")
    }
}
