//! Token rewards and the wallet they are paid to.

use std::sync::Arc;

use tracing::warn;

use super::fallback::{AccessPolicy, read_through};
use crate::domain::ports::RewardsDataSource;
use crate::domain::{DeviceId, DeviceRewards, Failure, Outcome, Rewards};

pub struct RewardsRepository {
    network: Arc<dyn RewardsDataSource>,
    cache: Arc<dyn RewardsDataSource>,
}

impl RewardsRepository {
    pub fn new(network: Arc<dyn RewardsDataSource>, cache: Arc<dyn RewardsDataSource>) -> Self {
        Self { network, cache }
    }

    pub async fn rewards(&self, device_id: &DeviceId) -> Outcome<Rewards> {
        self.network.get_rewards(device_id).await
    }

    /// Rewards of every device in `device_ids`, in request order.
    pub async fn rewards_for_devices(&self, device_ids: &[DeviceId]) -> Outcome<Vec<DeviceRewards>> {
        if device_ids.is_empty() {
            return Ok(Vec::new());
        }
        self.network.get_rewards_for_devices(device_ids).await
    }

    /// Wallet address, cached first.
    pub async fn wallet_address(&self, policy: AccessPolicy) -> Outcome<String> {
        let fetched = read_through(
            policy,
            "wallet",
            || self.cache.get_wallet_address(),
            || self.network.get_wallet_address(),
        )
        .await?;

        if fetched.is_remote() {
            self.remember_wallet(&fetched.value).await;
        }
        Ok(fetched.value)
    }

    /// Save the wallet remotely, then cache it.
    pub async fn save_wallet_address(&self, address: &str) -> Outcome<()> {
        let address = address.trim();
        if address.is_empty() {
            return Err(Failure::validation("wallet address must not be empty"));
        }
        self.network.set_wallet_address(address).await?;
        self.remember_wallet(address).await;
        Ok(())
    }

    async fn remember_wallet(&self, address: &str) {
        if let Err(failure) = self.cache.set_wallet_address(address).await {
            warn!(error = %failure, "failed to cache wallet address");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FailureKind;
    use crate::domain::ports::MockRewardsDataSource;

    #[tokio::test]
    async fn wallet_miss_reads_network_and_caches() {
        let mut cache = MockRewardsDataSource::new();
        cache
            .expect_get_wallet_address()
            .times(1)
            .returning(|| Err(Failure::cache_miss("companion:v1:wallet:address")));
        cache
            .expect_set_wallet_address()
            .withf(|address| address == "0xabc")
            .times(1)
            .returning(|_| Ok(()));
        let mut network = MockRewardsDataSource::new();
        network
            .expect_get_wallet_address()
            .times(1)
            .returning(|| Ok("0xabc".to_owned()));

        let address = RewardsRepository::new(Arc::new(network), Arc::new(cache))
            .wallet_address(AccessPolicy::PreferLocal)
            .await
            .expect("network answers");
        assert_eq!(address, "0xabc");
    }

    #[tokio::test]
    async fn failed_remote_save_leaves_cache_untouched() {
        let mut network = MockRewardsDataSource::new();
        network
            .expect_set_wallet_address()
            .times(1)
            .returning(|_| Err(Failure::validation("bad checksum")));
        let mut cache = MockRewardsDataSource::new();
        cache.expect_set_wallet_address().times(0);

        let err = RewardsRepository::new(Arc::new(network), Arc::new(cache))
            .save_wallet_address("0xabc")
            .await
            .expect_err("remote rejected");
        assert_eq!(err.kind(), FailureKind::Validation);
    }

    #[tokio::test]
    async fn empty_device_list_skips_network() {
        let mut network = MockRewardsDataSource::new();
        network.expect_get_rewards_for_devices().times(0);

        let rewards = RewardsRepository::new(Arc::new(network), Arc::new(MockRewardsDataSource::new()))
            .rewards_for_devices(&[])
            .await
            .expect("nothing to fetch");
        assert!(rewards.is_empty());
    }
}
