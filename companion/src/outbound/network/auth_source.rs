//! Auth endpoints.

use std::sync::Arc;

use async_trait::async_trait;

use super::client::{ApiClient, ErrorScope};
use super::dto::{AuthTokenDto, LogoutBody, RefreshBody};
use crate::domain::ports::{AuthDataSource, Medium, unsupported_on};
use crate::domain::{AuthToken, Credentials, Outcome};

const LOGIN: &[&str] = &["api", "v1", "auth", "login"];
const REFRESH: &[&str] = &["api", "v1", "auth", "refresh"];
const LOGOUT: &[&str] = &["api", "v1", "auth", "logout"];

pub struct NetworkAuthDataSource {
    client: Arc<ApiClient>,
}

impl NetworkAuthDataSource {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AuthDataSource for NetworkAuthDataSource {
    async fn login(&self, credentials: &Credentials) -> Outcome<AuthToken> {
        self.client
            .post_json::<_, AuthTokenDto>(LOGIN, credentials, ErrorScope::General)
            .await
            .map(AuthToken::from)
    }

    async fn refresh(&self, refresh_token: &str) -> Outcome<AuthToken> {
        self.client
            .post_json::<_, AuthTokenDto>(REFRESH, &RefreshBody { refresh_token }, ErrorScope::General)
            .await
            .map(AuthToken::from)
    }

    async fn logout(&self, token: &AuthToken) -> Outcome<()> {
        let body = LogoutBody {
            access_token: &token.access_token,
            refresh_token: &token.refresh_token,
        };
        self.client.post(LOGOUT, &body).await
    }

    async fn get_auth_token(&self) -> Outcome<AuthToken> {
        unsupported_on(Medium::Network, "get_auth_token")
    }

    async fn set_auth_token(&self, _token: &AuthToken) {
        unsupported_on(Medium::Network, "set_auth_token")
    }

    async fn clear(&self) {
        unsupported_on(Medium::Network, "clear")
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::domain::ports::AnonymousAccess;
    use crate::domain::{Failure, FailureKind};
    use crate::test_support::{StubResponse, StubServer};

    fn source(server: &StubServer) -> NetworkAuthDataSource {
        let client = ApiClient::new(
            server.base_url(),
            Duration::from_secs(5),
            Arc::new(AnonymousAccess),
        )
        .expect("client builds");
        NetworkAuthDataSource::new(Arc::new(client))
    }

    fn credentials() -> Credentials {
        Credentials {
            username: "ada@example.com".to_owned(),
            password: "hunter2".to_owned(),
        }
    }

    #[tokio::test]
    async fn login_posts_credentials_and_decodes_tokens() {
        let server = StubServer::start(vec![(
            "POST",
            "/api/v1/auth/login",
            StubResponse::json(200, r#"{"token":"a-1","refreshToken":"r-1"}"#),
        )])
        .await;

        let token = source(&server)
            .login(&credentials())
            .await
            .expect("login succeeds");
        assert_eq!(token.access_token, "a-1");
        assert_eq!(token.refresh_token, "r-1");

        let requests = server.requests();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].body.contains(r#""username":"ada@example.com""#));
    }

    #[tokio::test]
    async fn rejected_login_surfaces_server_failure() {
        let server = StubServer::start(vec![(
            "POST",
            "/api/v1/auth/login",
            StubResponse::json(401, r#"{"code":"InvalidCredentials","message":"nope"}"#),
        )])
        .await;

        let failure = source(&server)
            .login(&credentials())
            .await
            .expect_err("login rejected");
        assert_eq!(
            failure,
            Failure::server(401, Some("InvalidCredentials".to_owned()), Some("nope".to_owned()))
        );
    }

    #[tokio::test]
    async fn malformed_token_payload_is_a_decode_failure() {
        let server = StubServer::start(vec![(
            "POST",
            "/api/v1/auth/refresh",
            StubResponse::json(200, r#"{"unexpected":true}"#),
        )])
        .await;

        let failure = source(&server)
            .refresh("r-1")
            .await
            .expect_err("payload rejected");
        assert_eq!(failure.kind(), FailureKind::Decode);
    }

    #[tokio::test]
    #[should_panic(expected = "`get_auth_token` is not implemented for the network source")]
    async fn reading_cached_token_from_network_aborts() {
        let server = StubServer::start(Vec::new()).await;
        let _ = source(&server).get_auth_token().await;
    }
}
