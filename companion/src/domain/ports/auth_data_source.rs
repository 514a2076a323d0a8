//! Port for authentication tokens.
//!
//! The network source talks to the auth endpoints; the cache source keeps
//! the issued token pair. Each aborts on the other's operations.

use async_trait::async_trait;

use crate::domain::{AuthToken, Credentials, Outcome};

/// Authentication data source bound to one medium.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthDataSource: Send + Sync {
    /// Exchange credentials for a token pair. Network only.
    async fn login(&self, credentials: &Credentials) -> Outcome<AuthToken>;

    /// Exchange a refresh token for a new pair. Network only.
    async fn refresh(&self, refresh_token: &str) -> Outcome<AuthToken>;

    /// Revoke the token pair remotely. Network only.
    async fn logout(&self, token: &AuthToken) -> Outcome<()>;

    /// Read the stored token pair. Cache only.
    async fn get_auth_token(&self) -> Outcome<AuthToken>;

    /// Store the token pair. Cache only; best-effort.
    async fn set_auth_token(&self, token: &AuthToken);

    /// Drop the stored token pair. Cache only; best-effort.
    async fn clear(&self);
}

/// Supplies the bearer token attached to authenticated API calls.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// Current access token, or `None` when signed out.
    async fn access_token(&self) -> Option<String>;
}

/// Provider for anonymous clients.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnonymousAccess;

#[async_trait]
impl AccessTokenProvider for AnonymousAccess {
    async fn access_token(&self) -> Option<String> {
        None
    }
}
