//! API-specific error types
//!
//! Classifies HTTP failures from the portal API. Telemetry delivery is
//! single-shot, so the classification feeds logging and the mapping into
//! [`TelemetryError`], not a retry policy.

use std::time::Duration;

use campustrace_domain::TelemetryError;
use thiserror::Error;

/// Coarse categories of API errors, used when logging failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCategory {
    /// Authentication errors (401, 403)
    Authentication,
    /// Rate limiting errors (429)
    RateLimit,
    /// Server errors (5xx)
    Server,
    /// Client errors (4xx except auth)
    Client,
    /// Network/connection errors, including timeouts
    Network,
    /// Configuration errors
    Config,
}

/// API operation errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimit(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Client error: {0}")]
    Client(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),
}

impl ApiError {
    /// Get the error category for this error
    pub fn category(&self) -> ApiErrorCategory {
        match self {
            Self::Auth(_) => ApiErrorCategory::Authentication,
            Self::RateLimit(_) => ApiErrorCategory::RateLimit,
            Self::Server(_) => ApiErrorCategory::Server,
            Self::Client(_) => ApiErrorCategory::Client,
            Self::Network(_) | Self::Timeout(_) => ApiErrorCategory::Network,
            Self::Config(_) => ApiErrorCategory::Config,
        }
    }
}

impl From<ApiError> for TelemetryError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Auth(message) => Self::Auth(message),
            ApiError::RateLimit(message) => Self::Network(message),
            ApiError::Config(message) => Self::Config(message),
            ApiError::Client(message) => Self::InvalidInput(message),
            ApiError::Server(message) => Self::Internal(message),
            ApiError::Network(message) => Self::Network(message),
            ApiError::Timeout(timeout) => {
                Self::Network(format!("request timed out after {timeout:?}"))
            }
        }
    }
}
