//! Cached token pair.

use async_trait::async_trait;

use super::json_cache::JsonCache;
use crate::domain::ports::{AccessTokenProvider, AuthDataSource, Medium, unsupported_on};
use crate::domain::{AuthToken, Credentials, Outcome};

const CONCEPT: &str = "auth";
const TOKEN: &str = "token";

/// Cache source holding the signed-in user's tokens.
///
/// Also serves as the bearer-token provider of the API client.
pub struct CacheAuthDataSource {
    cache: JsonCache,
}

impl CacheAuthDataSource {
    pub fn new(cache: JsonCache) -> Self {
        Self { cache }
    }
}

#[async_trait]
impl AuthDataSource for CacheAuthDataSource {
    async fn login(&self, _credentials: &Credentials) -> Outcome<AuthToken> {
        unsupported_on(Medium::Cache, "login")
    }

    async fn refresh(&self, _refresh_token: &str) -> Outcome<AuthToken> {
        unsupported_on(Medium::Cache, "refresh")
    }

    async fn logout(&self, _token: &AuthToken) -> Outcome<()> {
        unsupported_on(Medium::Cache, "logout")
    }

    async fn get_auth_token(&self) -> Outcome<AuthToken> {
        self.cache.read(CONCEPT, TOKEN).await
    }

    async fn set_auth_token(&self, token: &AuthToken) {
        self.cache.write(CONCEPT, TOKEN, token, None).await;
    }

    async fn clear(&self) {
        self.cache.remove_concept(CONCEPT).await;
    }
}

#[async_trait]
impl AccessTokenProvider for CacheAuthDataSource {
    async fn access_token(&self) -> Option<String> {
        self.get_auth_token()
            .await
            .ok()
            .map(|token| token.access_token)
    }
}
