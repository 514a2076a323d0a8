//! Follow endpoints.

use std::sync::Arc;

use async_trait::async_trait;

use super::client::ApiClient;
use super::dto::device_ids;
use crate::domain::ports::{FollowDataSource, Medium, unsupported_on};
use crate::domain::{DeviceId, Outcome};

const FOLLOWED: &[&str] = &["api", "v1", "me", "devices", "followed"];

pub struct NetworkFollowDataSource {
    client: Arc<ApiClient>,
}

impl NetworkFollowDataSource {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

fn follow_path(device_id: &DeviceId) -> [&str; 6] {
    ["api", "v1", "me", "devices", device_id.as_str(), "follow"]
}

#[async_trait]
impl FollowDataSource for NetworkFollowDataSource {
    async fn follow(&self, device_id: &DeviceId) -> Outcome<()> {
        self.client
            .post(&follow_path(device_id), &serde_json::json!({}))
            .await
    }

    async fn unfollow(&self, device_id: &DeviceId) -> Outcome<()> {
        self.client.delete(&follow_path(device_id)).await
    }

    async fn get_followed_device_ids(&self) -> Outcome<Vec<DeviceId>> {
        let raw: Vec<String> = self.client.get_json(FOLLOWED, &[]).await?;
        device_ids(raw)
    }

    async fn set_followed_device_ids(&self, _ids: &[DeviceId]) {
        unsupported_on(Medium::Network, "set_followed_device_ids")
    }
}
