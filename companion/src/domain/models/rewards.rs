//! Token reward records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::DeviceId;

/// One daily reward allocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardEntry {
    pub timestamp: DateTime<Utc>,
    pub amount: f64,
    /// Data-quality score behind the allocation, 0–100.
    pub reward_score: Option<u8>,
}

/// Reward summary for one device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rewards {
    pub total_rewards: f64,
    pub latest: Option<RewardEntry>,
    pub timeline: Vec<RewardEntry>,
}

/// Rewards keyed by the device they belong to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceRewards {
    pub device_id: DeviceId,
    pub rewards: Rewards,
}
