//! Bearer token handling for portal API requests.
//!
//! The portal shell owns the auth lifecycle; telemetry just borrows the
//! session's bearer token. [`SessionTokenProvider`] is the production
//! implementation: the shell pushes the token in after login and clears it
//! on logout.

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::errors::ApiError;

/// Trait for providing access tokens
///
/// This trait allows dependency injection and testing with mock providers.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// Get a valid access token for the current session.
    async fn access_token(&self) -> Result<String, ApiError>;
}

/// Token provider fed by the portal's session layer.
#[derive(Default)]
pub struct SessionTokenProvider {
    token: RwLock<Option<String>>,
}

impl SessionTokenProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider pre-loaded with a token, for sessions restored from storage.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self { token: RwLock::new(Some(token.into())) }
    }

    /// Replace the session token after login or refresh.
    pub async fn set_token(&self, token: impl Into<String>) {
        debug!("session token updated");
        *self.token.write().await = Some(token.into());
    }

    /// Drop the session token on logout.
    pub async fn clear(&self) {
        debug!("session token cleared");
        *self.token.write().await = None;
    }
}

#[async_trait]
impl AccessTokenProvider for SessionTokenProvider {
    async fn access_token(&self) -> Result<String, ApiError> {
        self.token
            .read()
            .await
            .clone()
            .ok_or_else(|| ApiError::Auth("no session token available".to_string()))
    }
}
