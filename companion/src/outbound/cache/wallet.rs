//! Cached reward wallet address.

use async_trait::async_trait;

use super::json_cache::JsonCache;
use crate::domain::ports::{Medium, RewardsDataSource, unsupported_on};
use crate::domain::{DeviceId, DeviceRewards, Outcome, Rewards};

const CONCEPT: &str = "wallet";
const ADDRESS: &str = "address";

pub struct CacheRewardsDataSource {
    cache: JsonCache,
}

impl CacheRewardsDataSource {
    pub fn new(cache: JsonCache) -> Self {
        Self { cache }
    }
}

#[async_trait]
impl RewardsDataSource for CacheRewardsDataSource {
    async fn get_rewards(&self, _device_id: &DeviceId) -> Outcome<Rewards> {
        unsupported_on(Medium::Cache, "get_rewards")
    }

    async fn get_rewards_for_devices(
        &self,
        _device_ids: &[DeviceId],
    ) -> Outcome<Vec<DeviceRewards>> {
        unsupported_on(Medium::Cache, "get_rewards_for_devices")
    }

    async fn get_wallet_address(&self) -> Outcome<String> {
        self.cache.read(CONCEPT, ADDRESS).await
    }

    /// Best-effort: always `Ok`, store errors are logged.
    async fn set_wallet_address(&self, address: &str) -> Outcome<()> {
        self.cache.write(CONCEPT, ADDRESS, address, None).await;
        Ok(())
    }
}
