//! Port for token rewards and the reward wallet.

use async_trait::async_trait;

use crate::domain::{DeviceId, DeviceRewards, Outcome, Rewards};

/// Rewards data source bound to the network or the key-value cache.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RewardsDataSource: Send + Sync {
    /// Reward summary of one device. Network only.
    async fn get_rewards(&self, device_id: &DeviceId) -> Outcome<Rewards>;

    /// Reward summaries of several devices, fetched concurrently.
    /// Network only; the first failure fails the batch.
    async fn get_rewards_for_devices(&self, device_ids: &[DeviceId])
    -> Outcome<Vec<DeviceRewards>>;

    /// Wallet address rewards are paid to.
    async fn get_wallet_address(&self) -> Outcome<String>;

    /// Store the wallet address.
    ///
    /// The network source saves it remotely and reports failures; the cache
    /// source writes best-effort and always succeeds.
    async fn set_wallet_address(&self, address: &str) -> Outcome<()>;
}
