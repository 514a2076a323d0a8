//! Rewards and wallet endpoints.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::future::try_join_all;
use tracing::debug;

use super::client::ApiClient;
use super::dto::{RewardsDto, WalletDto};
use crate::domain::ports::RewardsDataSource;
use crate::domain::{DeviceId, DeviceRewards, Failure, Outcome, Rewards};

const WALLET: &[&str] = &["api", "v1", "me", "wallet"];

pub struct NetworkRewardsDataSource {
    client: Arc<ApiClient>,
}

impl NetworkRewardsDataSource {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RewardsDataSource for NetworkRewardsDataSource {
    async fn get_rewards(&self, device_id: &DeviceId) -> Outcome<Rewards> {
        let path = ["api", "v1", "devices", device_id.as_str(), "tokens"];
        let rewards: RewardsDto = self.client.get_json(&path, &[]).await?;
        Ok(rewards.into())
    }

    async fn get_rewards_for_devices(
        &self,
        device_ids: &[DeviceId],
    ) -> Outcome<Vec<DeviceRewards>> {
        debug!(devices = device_ids.len(), "fetching rewards concurrently");
        try_join_all(device_ids.iter().map(|device_id| async move {
            let rewards = self.get_rewards(device_id).await?;
            Ok::<_, Failure>(DeviceRewards {
                device_id: device_id.clone(),
                rewards,
            })
        }))
        .await
    }

    async fn get_wallet_address(&self) -> Outcome<String> {
        let wallet: WalletDto = self.client.get_json(WALLET, &[]).await?;
        Ok(wallet.address)
    }

    async fn set_wallet_address(&self, address: &str) -> Outcome<()> {
        let body = WalletDto {
            address: address.to_owned(),
        };
        self.client.post(WALLET, &body).await
    }
}
