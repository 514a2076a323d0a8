//! Failure taxonomy shared by every data source and repository.
//!
//! Every fallible operation in the crate resolves to [`Outcome`]. Adapters
//! classify their medium-specific errors into exactly one [`Failure`] at the
//! boundary; nothing above the adapters re-classifies a failure.

use thiserror::Error;

/// Return contract of every fallible data-access operation.
pub type Outcome<T> = Result<T, Failure>;

/// Domain-specific reasons a device claim can be rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClaimFailure {
    /// The backend is still processing an earlier claim for this device.
    InProgress,
    /// The serial number or claim secret is not recognised.
    InvalidClaimId,
    /// The device already belongs to an account.
    AlreadyClaimed,
    /// No device with this serial number exists.
    DeviceNotFound,
}

impl ClaimFailure {
    /// Stable machine-readable code for this reason.
    pub const fn code(self) -> &'static str {
        match self {
            Self::InProgress => "DeviceClaiming",
            Self::InvalidClaimId => "InvalidClaimId",
            Self::AlreadyClaimed => "DeviceAlreadyClaimed",
            Self::DeviceNotFound => "DeviceNotFound",
        }
    }
}

impl std::fmt::Display for ClaimFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::InProgress => "device claiming in progress",
            Self::InvalidClaimId => "invalid claim id",
            Self::AlreadyClaimed => "device already claimed",
            Self::DeviceNotFound => "device not found",
        })
    }
}

/// Coarse classification used by repositories to pick a strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    NoConnection,
    Timeout,
    Server,
    Cancellation,
    CacheMiss,
    DatabaseMiss,
    Validation,
    Claim,
    CountryNotFound,
    Geocoding,
    UnsupportedAppVersion,
    Decode,
    Storage,
}

/// Closed set of failures an operation can resolve to.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Failure {
    /// The remote service could not be reached.
    #[error("network unreachable: {message}")]
    NoConnection { message: String },
    /// The remote call did not complete in time.
    #[error("request timed out: {message}")]
    Timeout { message: String },
    /// The remote service answered with an unclassified error status.
    #[error("server error (status {status}){}", describe(.code.as_deref(), .message.as_deref()))]
    Server {
        status: u16,
        code: Option<String>,
        message: Option<String>,
    },
    /// A newer query superseded this one before it completed.
    #[error("operation cancelled by a newer request")]
    Cancellation,
    /// Nothing is stored under `key` in the key-value cache.
    #[error("cache miss for key {key}")]
    CacheMiss { key: String },
    /// Nothing matching the request is stored in the local database.
    #[error("database miss: {message}")]
    DatabaseMiss { message: String },
    /// The request was rejected as invalid.
    #[error("validation failed: {message}")]
    Validation { message: String },
    /// The claim endpoint rejected the request.
    #[error("claim failed: {reason}{}", describe(None, .message.as_deref()))]
    Claim {
        reason: ClaimFailure,
        message: Option<String>,
    },
    /// Reverse geocoding returned no country for the location.
    #[error("country not found for location")]
    CountryNotFound,
    /// Geocoding failed for a reason other than cancellation.
    #[error("geocoding failed: {message}")]
    Geocoding { message: String },
    /// The backend refuses this application version.
    #[error("application version is no longer supported")]
    UnsupportedAppVersion,
    /// A payload could not be decoded.
    #[error("payload decode failed: {message}")]
    Decode { message: String },
    /// Local storage failed for a reason other than absence.
    #[error("local storage failure: {message}")]
    Storage { message: String },
}

fn describe(code: Option<&str>, message: Option<&str>) -> String {
    match (code, message) {
        (Some(code), Some(message)) => format!(" {code}: {message}"),
        (Some(code), None) => format!(" {code}"),
        (None, Some(message)) => format!(": {message}"),
        (None, None) => String::new(),
    }
}

impl Failure {
    pub fn no_connection(message: impl Into<String>) -> Self {
        Self::NoConnection {
            message: message.into(),
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    pub fn server(status: u16, code: Option<String>, message: Option<String>) -> Self {
        Self::Server {
            status,
            code,
            message,
        }
    }

    pub fn cache_miss(key: impl Into<String>) -> Self {
        Self::CacheMiss { key: key.into() }
    }

    pub fn database_miss(message: impl Into<String>) -> Self {
        Self::DatabaseMiss {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub const fn claim(reason: ClaimFailure, message: Option<String>) -> Self {
        Self::Claim { reason, message }
    }

    pub fn geocoding(message: impl Into<String>) -> Self {
        Self::Geocoding {
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Classification of this failure.
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::NoConnection { .. } => FailureKind::NoConnection,
            Self::Timeout { .. } => FailureKind::Timeout,
            Self::Server { .. } => FailureKind::Server,
            Self::Cancellation => FailureKind::Cancellation,
            Self::CacheMiss { .. } => FailureKind::CacheMiss,
            Self::DatabaseMiss { .. } => FailureKind::DatabaseMiss,
            Self::Validation { .. } => FailureKind::Validation,
            Self::Claim { .. } => FailureKind::Claim,
            Self::CountryNotFound => FailureKind::CountryNotFound,
            Self::Geocoding { .. } => FailureKind::Geocoding,
            Self::UnsupportedAppVersion => FailureKind::UnsupportedAppVersion,
            Self::Decode { .. } => FailureKind::Decode,
            Self::Storage { .. } => FailureKind::Storage,
        }
    }

    /// Machine-readable code, when the failure carries one.
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Server { code, .. } => code.as_deref(),
            Self::Claim { reason, .. } => Some(reason.code()),
            Self::UnsupportedAppVersion => Some("UnsupportedApplicationVersion"),
            _ => None,
        }
    }

    /// Human-readable detail, when the failure carries one.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::NoConnection { message }
            | Self::Timeout { message }
            | Self::DatabaseMiss { message }
            | Self::Validation { message }
            | Self::Geocoding { message }
            | Self::Decode { message }
            | Self::Storage { message } => Some(message.as_str()),
            Self::Server { message, .. } | Self::Claim { message, .. } => message.as_deref(),
            Self::CacheMiss { .. }
            | Self::Cancellation
            | Self::CountryNotFound
            | Self::UnsupportedAppVersion => None,
        }
    }

    /// Whether another medium may be consulted instead of surfacing this.
    pub const fn is_local_miss(&self) -> bool {
        matches!(self, Self::CacheMiss { .. } | Self::DatabaseMiss { .. })
    }

    /// Whether this is the transient "claim still in progress" state.
    pub const fn is_claim_in_progress(&self) -> bool {
        matches!(
            self,
            Self::Claim {
                reason: ClaimFailure::InProgress,
                ..
            }
        )
    }
}
