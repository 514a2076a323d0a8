//! Sign-in state: remote auth endpoints plus the cached token pair.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::ports::AuthDataSource;
use crate::domain::{AuthToken, Credentials, Outcome};

/// Auth orchestration over the network and cache sources.
pub struct AuthRepository {
    network: Arc<dyn AuthDataSource>,
    cache: Arc<dyn AuthDataSource>,
}

impl AuthRepository {
    pub fn new(network: Arc<dyn AuthDataSource>, cache: Arc<dyn AuthDataSource>) -> Self {
        Self { network, cache }
    }

    /// Log in and remember the issued token pair.
    pub async fn login(&self, credentials: &Credentials) -> Outcome<AuthToken> {
        let token = self.network.login(credentials).await?;
        self.cache.set_auth_token(&token).await;
        info!(username = %credentials.username, "logged in");
        Ok(token)
    }

    /// Exchange the cached refresh token for a new pair.
    pub async fn refresh(&self) -> Outcome<AuthToken> {
        let current = self.cache.get_auth_token().await?;
        let token = self.network.refresh(&current.refresh_token).await?;
        self.cache.set_auth_token(&token).await;
        Ok(token)
    }

    /// Revoke the session remotely and forget it locally.
    ///
    /// The cached pair is cleared even when the remote call fails; the remote
    /// failure is still returned. Logging out without a stored pair succeeds.
    pub async fn logout(&self) -> Outcome<()> {
        let remote = match self.cache.get_auth_token().await {
            Ok(token) => self.network.logout(&token).await,
            Err(failure) if failure.is_local_miss() => Ok(()),
            Err(failure) => Err(failure),
        };
        self.cache.clear().await;
        if let Err(failure) = &remote {
            warn!(error = %failure, "remote logout failed, local session cleared");
        }
        remote
    }

    /// Cached token pair.
    pub async fn auth_token(&self) -> Outcome<AuthToken> {
        self.cache.get_auth_token().await
    }
}
