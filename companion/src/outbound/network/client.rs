//! Reqwest-backed client for the companion REST API.
//!
//! The client owns transport details only: endpoint construction, bearer
//! authentication, the request timeout, HTTP error classification and JSON
//! decoding. Sources built on it map DTOs into domain records.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use super::dto::ApiErrorDto;
use crate::domain::ports::AccessTokenProvider;
use crate::domain::{ClaimFailure, Failure, Outcome};

/// Errors raised while constructing an [`ApiClient`].
#[derive(Debug, Error)]
pub enum ApiClientError {
    /// The base URL cannot carry path segments.
    #[error("API base URL `{0}` cannot be used as a base")]
    InvalidBaseUrl(String),
    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

/// Which endpoint family a response came from; some error codes only carry
/// their domain meaning on the claim endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorScope {
    General,
    Claim,
}

/// Authenticated JSON client rooted at one API base URL.
pub struct ApiClient {
    client: Client,
    base_url: Url,
    tokens: Arc<dyn AccessTokenProvider>,
}

impl ApiClient {
    /// Build a client with an explicit request timeout.
    ///
    /// ```rust,ignore
    /// let client = ApiClient::new(base_url, Duration::from_secs(30), tokens)?;
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`ApiClientError::InvalidBaseUrl`] for URLs such as `mailto:`
    /// that cannot take path segments, and [`ApiClientError::Http`] when the
    /// reqwest client cannot be constructed.
    pub fn new(
        base_url: Url,
        timeout: Duration,
        tokens: Arc<dyn AccessTokenProvider>,
    ) -> Result<Self, ApiClientError> {
        if base_url.cannot_be_a_base() {
            return Err(ApiClientError::InvalidBaseUrl(base_url.to_string()));
        }
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            tokens,
        })
    }

    /// Absolute URL for `segments` below the base URL; segments are
    /// percent-encoded.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Outcome<T> {
        let url = self.endpoint(segments);
        let request = self.client.get(url.clone()).query(query);
        let body = self.execute(request, ErrorScope::General).await?;
        decode(&url, &body)
    }

    pub(crate) async fn post_json<B, T>(
        &self,
        segments: &[&str],
        payload: &B,
        scope: ErrorScope,
    ) -> Outcome<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments);
        let request = self.client.post(url.clone()).json(payload);
        let body = self.execute(request, scope).await?;
        decode(&url, &body)
    }

    /// POST whose response body is ignored.
    pub(crate) async fn post<B: Serialize + ?Sized>(
        &self,
        segments: &[&str],
        payload: &B,
    ) -> Outcome<()> {
        let request = self.client.post(self.endpoint(segments)).json(payload);
        self.execute(request, ErrorScope::General).await.map(drop)
    }

    pub(crate) async fn delete(&self, segments: &[&str]) -> Outcome<()> {
        let request = self.client.delete(self.endpoint(segments));
        self.execute(request, ErrorScope::General).await.map(drop)
    }

    async fn execute(&self, request: RequestBuilder, scope: ErrorScope) -> Outcome<Vec<u8>> {
        let request = match self.tokens.access_token().await {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        let response = request
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let url = response.url().clone();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            let failure = map_status_error(status, body.as_ref(), scope);
            debug!(%url, status = status.as_u16(), error = %failure, "API call failed");
            return Err(failure);
        }
        Ok(body.to_vec())
    }
}

fn decode<T: DeserializeOwned>(url: &Url, body: &[u8]) -> Outcome<T> {
    serde_json::from_slice(body).map_err(|error| {
        Failure::decode(format!("invalid payload from {}: {error}", url.path()))
    })
}

pub(crate) fn map_transport_error(error: reqwest::Error) -> Failure {
    if error.is_timeout() {
        Failure::timeout(error.to_string())
    } else {
        Failure::no_connection(error.to_string())
    }
}

/// Classify an unsuccessful response by its `{ code, message }` body.
pub(crate) fn map_status_error(status: StatusCode, body: &[u8], scope: ErrorScope) -> Failure {
    let (code, message) = match serde_json::from_slice::<ApiErrorDto>(body) {
        Ok(payload) => (payload.code, payload.message),
        Err(_) => {
            let preview = body_preview(body);
            (None, (!preview.is_empty()).then_some(preview))
        }
    };

    match code.as_deref() {
        Some("DeviceClaiming") => Failure::claim(ClaimFailure::InProgress, message),
        Some("InvalidClaimId") => Failure::claim(ClaimFailure::InvalidClaimId, message),
        Some("DeviceAlreadyClaimed") => Failure::claim(ClaimFailure::AlreadyClaimed, message),
        Some("DeviceNotFound") if scope == ErrorScope::Claim => {
            Failure::claim(ClaimFailure::DeviceNotFound, message)
        }
        Some("UnsupportedApplicationVersion") => Failure::UnsupportedAppVersion,
        Some(validation)
            if validation.starts_with("Validation")
                && matches!(
                    status,
                    StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY
                ) =>
        {
            Failure::validation(message.unwrap_or_else(|| validation.to_owned()))
        }
        _ => Failure::server(status.as_u16(), code, message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
