//! The user's devices: remote list and mutations, cached id list, claims.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::fallback::{AccessPolicy, read_through};
use crate::domain::ports::DeviceDataSource;
use crate::domain::{ClaimController, ClaimRequest, Device, DeviceId, Failure, Outcome};

/// Device orchestration over the network and cache sources.
pub struct DeviceRepository {
    network: Arc<dyn DeviceDataSource>,
    cache: Arc<dyn DeviceDataSource>,
    claims: ClaimController,
}

impl DeviceRepository {
    /// Build a repository whose claims sleep on the Tokio timer.
    pub fn new(network: Arc<dyn DeviceDataSource>, cache: Arc<dyn DeviceDataSource>) -> Self {
        let claims = ClaimController::new(Arc::clone(&network));
        Self::with_claims(network, cache, claims)
    }

    pub fn with_claims(
        network: Arc<dyn DeviceDataSource>,
        cache: Arc<dyn DeviceDataSource>,
        claims: ClaimController,
    ) -> Self {
        Self {
            network,
            cache,
            claims,
        }
    }

    /// Fetch the device list and remember its ids.
    pub async fn user_devices(&self) -> Outcome<Vec<Device>> {
        let devices = self.network.get_user_devices().await?;
        let ids: Vec<DeviceId> = devices.iter().map(|device| device.id.clone()).collect();
        self.cache.set_user_device_ids(&ids).await;
        debug!(count = devices.len(), "fetched user devices");
        Ok(devices)
    }

    pub async fn user_device(&self, device_id: &DeviceId) -> Outcome<Device> {
        self.network.get_user_device(device_id).await
    }

    /// Ids of the user's devices, cached first.
    pub async fn user_device_ids(&self, policy: AccessPolicy) -> Outcome<Vec<DeviceId>> {
        let fetched = read_through(
            policy,
            "device_ids",
            || self.cache.get_user_device_ids(),
            || async {
                let devices = self.network.get_user_devices().await?;
                Ok::<_, Failure>(devices.into_iter().map(|device| device.id).collect())
            },
        )
        .await?;

        if fetched.is_remote() {
            self.cache.set_user_device_ids(&fetched.value).await;
        }
        Ok(fetched.value)
    }

    /// Claim a device and add it to the cached id list.
    pub async fn claim(&self, request: &ClaimRequest) -> Outcome<Device> {
        let device = self.claims.claim(request).await?;
        self.update_cached_ids(|ids| {
            if !ids.contains(&device.id) {
                ids.push(device.id.clone());
            }
        })
        .await;
        info!(device_id = %device.id, "device claimed");
        Ok(device)
    }

    /// Set the owner-chosen name; a blank name clears it.
    pub async fn rename(&self, device_id: &DeviceId, friendly_name: &str) -> Outcome<()> {
        let trimmed = friendly_name.trim();
        if trimmed.is_empty() {
            return self.network.clear_friendly_name(device_id).await;
        }
        self.network.set_friendly_name(device_id, trimmed).await
    }

    /// Release a device and drop it from the cached id list.
    pub async fn remove(&self, device_id: &DeviceId, serial_number: &str) -> Outcome<()> {
        if serial_number.trim().is_empty() {
            return Err(Failure::validation("serial number must not be empty"));
        }
        self.network.remove_device(device_id, serial_number).await?;
        self.update_cached_ids(|ids| ids.retain(|id| id != device_id))
            .await;
        Ok(())
    }

    /// Apply `edit` to the cached id list after a remote mutation succeeded.
    ///
    /// A miss starts from an empty list. Any other cache failure leaves the
    /// cache untouched and is only logged.
    async fn update_cached_ids(&self, edit: impl FnOnce(&mut Vec<DeviceId>) + Send) {
        let mut ids = match self.cache.get_user_device_ids().await {
            Ok(ids) => ids,
            Err(failure) if failure.is_local_miss() => Vec::new(),
            Err(failure) => {
                warn!(%failure, "cached device ids unavailable, leaving cache as is");
                return;
            }
        };
        edit(&mut ids);
        self.cache.set_user_device_ids(&ids).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockDeviceDataSource;
    use crate::domain::{DeviceRelation, FailureKind, Location};

    fn id(raw: &str) -> DeviceId {
        DeviceId::new(raw).expect("valid id")
    }

    fn device(raw: &str) -> Device {
        Device {
            id: id(raw),
            name: format!("Station {raw}"),
            friendly_name: None,
            label: None,
            address: None,
            location: None,
            relation: DeviceRelation::Owned,
            last_active_at: None,
            current_weather: None,
        }
    }

    fn repository(network: MockDeviceDataSource, cache: MockDeviceDataSource) -> DeviceRepository {
        DeviceRepository::new(Arc::new(network), Arc::new(cache))
    }

    #[tokio::test]
    async fn cached_ids_are_served_without_network() {
        let mut cache = MockDeviceDataSource::new();
        cache
            .expect_get_user_device_ids()
            .times(1)
            .returning(|| Ok(vec![id("d-1")]));
        let mut network = MockDeviceDataSource::new();
        network.expect_get_user_devices().times(0);

        let ids = repository(network, cache)
            .user_device_ids(AccessPolicy::PreferLocal)
            .await
            .expect("cache hit");
        assert_eq!(ids, vec![id("d-1")]);
    }

    #[tokio::test]
    async fn cache_miss_reads_network_and_writes_ids_back() {
        let mut cache = MockDeviceDataSource::new();
        cache
            .expect_get_user_device_ids()
            .times(1)
            .returning(|| Err(Failure::cache_miss("companion:v1:devices:ids")));
        cache
            .expect_set_user_device_ids()
            .withf(|ids| ids == [id("d-1"), id("d-2")])
            .times(1)
            .return_const(());
        let mut network = MockDeviceDataSource::new();
        network
            .expect_get_user_devices()
            .times(1)
            .returning(|| Ok(vec![device("d-1"), device("d-2")]));

        let ids = repository(network, cache)
            .user_device_ids(AccessPolicy::PreferLocal)
            .await
            .expect("network answers");
        assert_eq!(ids.len(), 2);
    }

    #[tokio::test]
    async fn network_failure_after_miss_propagates() {
        let mut cache = MockDeviceDataSource::new();
        cache
            .expect_get_user_device_ids()
            .returning(|| Err(Failure::cache_miss("companion:v1:devices:ids")));
        cache.expect_set_user_device_ids().times(0);
        let mut network = MockDeviceDataSource::new();
        network
            .expect_get_user_devices()
            .returning(|| Err(Failure::server(502, None, None)));

        let err = repository(network, cache)
            .user_device_ids(AccessPolicy::PreferLocal)
            .await
            .expect_err("network failed");
        assert_eq!(err, Failure::server(502, None, None));
    }

    #[tokio::test]
    async fn claim_appends_device_to_cached_ids() {
        let mut network = MockDeviceDataSource::new();
        network
            .expect_claim_device()
            .times(1)
            .returning(|_| Ok(device("d-9")));
        let mut cache = MockDeviceDataSource::new();
        cache
            .expect_get_user_device_ids()
            .returning(|| Ok(vec![id("d-1")]));
        cache
            .expect_set_user_device_ids()
            .withf(|ids| ids == [id("d-1"), id("d-9")])
            .times(1)
            .return_const(());

        let request = ClaimRequest {
            serial_number: "SN-9".to_owned(),
            location: Location::new(0.0, 0.0).expect("valid location"),
            secret: None,
        };
        let claimed = repository(network, cache)
            .claim(&request)
            .await
            .expect("claim succeeds");
        assert_eq!(claimed.id, id("d-9"));
    }

    #[tokio::test]
    async fn claim_survives_cache_failure_after_remote_success() {
        let mut network = MockDeviceDataSource::new();
        network
            .expect_claim_device()
            .times(1)
            .returning(|_| Ok(device("d-9")));
        let mut cache = MockDeviceDataSource::new();
        cache
            .expect_get_user_device_ids()
            .returning(|| Err(Failure::storage("redis down")));
        cache.expect_set_user_device_ids().never();

        let request = ClaimRequest {
            serial_number: "SN-9".to_owned(),
            location: Location::new(0.0, 0.0).expect("valid location"),
            secret: None,
        };
        let claimed = repository(network, cache)
            .claim(&request)
            .await
            .expect("remote claim is the result");
        assert_eq!(claimed, device("d-9"));
    }

    #[tokio::test]
    async fn blank_friendly_name_clears_it() {
        let mut network = MockDeviceDataSource::new();
        network.expect_set_friendly_name().times(0);
        network
            .expect_clear_friendly_name()
            .times(1)
            .returning(|_| Ok(()));

        repository(network, MockDeviceDataSource::new())
            .rename(&id("d-1"), "   ")
            .await
            .expect("name cleared");
    }

    #[tokio::test]
    async fn remove_drops_id_from_cache() {
        let mut network = MockDeviceDataSource::new();
        network
            .expect_remove_device()
            .withf(|device_id, serial| device_id.as_str() == "d-1" && serial == "SN-1")
            .times(1)
            .returning(|_, _| Ok(()));
        let mut cache = MockDeviceDataSource::new();
        cache
            .expect_get_user_device_ids()
            .returning(|| Ok(vec![id("d-1"), id("d-2")]));
        cache
            .expect_set_user_device_ids()
            .withf(|ids| ids == [id("d-2")])
            .times(1)
            .return_const(());

        repository(network, cache)
            .remove(&id("d-1"), "SN-1")
            .await
            .expect("device removed");
    }

    #[tokio::test]
    async fn remove_survives_cache_failure_after_remote_success() {
        let mut network = MockDeviceDataSource::new();
        network
            .expect_remove_device()
            .times(1)
            .returning(|_, _| Ok(()));
        let mut cache = MockDeviceDataSource::new();
        cache
            .expect_get_user_device_ids()
            .returning(|| Err(Failure::storage("redis down")));
        cache.expect_set_user_device_ids().never();

        repository(network, cache)
            .remove(&id("d-1"), "SN-1")
            .await
            .expect("remote removal is the result");
    }

    #[tokio::test]
    async fn remove_requires_serial_number() {
        let mut network = MockDeviceDataSource::new();
        network.expect_remove_device().times(0);

        let err = repository(network, MockDeviceDataSource::new())
            .remove(&id("d-1"), "")
            .await
            .expect_err("serial required");
        assert_eq!(err.kind(), FailureKind::Validation);
    }
}
