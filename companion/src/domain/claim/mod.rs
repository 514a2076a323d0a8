//! Device claim with bounded retries.
//!
//! The backend answers a claim with "claiming in progress" while it is still
//! processing an earlier attempt for the same device. The controller retries
//! that one classification at a fixed cadence and reports everything else
//! verbatim.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::domain::ports::DeviceDataSource;
use crate::domain::{ClaimRequest, Device, Outcome};

/// Retries after the first claim attempt; 31 attempts at most.
pub const CLAIM_MAX_RETRIES: u32 = 30;

/// Fixed pause between claim attempts.
pub const CLAIM_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Async sleeping abstraction so retry timing can be observed in tests.
#[async_trait]
pub trait RetrySleeper: Send + Sync {
    /// Suspend execution for `duration`.
    async fn sleep(&self, duration: Duration);
}

/// Tokio-based sleeper; dropping the claim future cancels the wait.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl RetrySleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// State of one claim call; dropped once the outcome is terminal.
struct ClaimAttempt<'a> {
    request: &'a ClaimRequest,
    retry_count: u32,
}

impl ClaimAttempt<'_> {
    const fn can_retry(&self) -> bool {
        self.retry_count < CLAIM_MAX_RETRIES
    }
}

/// Claims devices through the network device source.
pub struct ClaimController {
    source: Arc<dyn DeviceDataSource>,
    sleeper: Arc<dyn RetrySleeper>,
}

impl ClaimController {
    /// Build a controller sleeping on the Tokio timer.
    pub fn new(source: Arc<dyn DeviceDataSource>) -> Self {
        Self::with_sleeper(source, Arc::new(TokioSleeper))
    }

    /// Build a controller with an injected sleeper.
    pub fn with_sleeper(source: Arc<dyn DeviceDataSource>, sleeper: Arc<dyn RetrySleeper>) -> Self {
        Self { source, sleeper }
    }

    /// Claim a device, retrying while the backend reports the claim as in
    /// progress.
    ///
    /// Performs at most `CLAIM_MAX_RETRIES + 1` attempts separated by
    /// [`CLAIM_RETRY_DELAY`]. Any other failure, or the last in-progress
    /// failure once the ceiling is reached, is returned unchanged.
    ///
    /// ```rust,ignore
    /// let controller = ClaimController::new(network_devices);
    /// let device = controller.claim(&request).await?;
    /// ```
    pub async fn claim(&self, request: &ClaimRequest) -> Outcome<Device> {
        let mut attempt = ClaimAttempt {
            request,
            retry_count: 0,
        };

        loop {
            match self.source.claim_device(attempt.request).await {
                Ok(device) => {
                    info!(
                        serial_number = %attempt.request.serial_number,
                        retries = attempt.retry_count,
                        "device claimed"
                    );
                    return Ok(device);
                }
                Err(failure) if failure.is_claim_in_progress() && attempt.can_retry() => {
                    attempt.retry_count += 1;
                    debug!(
                        serial_number = %attempt.request.serial_number,
                        retry = attempt.retry_count,
                        "claim still in progress, retrying"
                    );
                    self.sleeper.sleep(CLAIM_RETRY_DELAY).await;
                }
                Err(failure) => {
                    warn!(
                        serial_number = %attempt.request.serial_number,
                        retries = attempt.retry_count,
                        error = %failure,
                        "device claim failed"
                    );
                    return Err(failure);
                }
            }
        }
    }
}
