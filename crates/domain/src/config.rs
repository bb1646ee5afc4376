//! Telemetry configuration structures.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_API_TIMEOUT_SECS, DEFAULT_DRAIN_TIMEOUT_SECS, DEFAULT_QUEUE_CAPACITY,
};

/// Top-level configuration for the telemetry subsystem.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TelemetryConfig {
    pub api: ApiConfig,
    pub delivery: DeliveryConfig,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self { api: ApiConfig::default(), delivery: DeliveryConfig::default() }
    }
}

/// Portal API client settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    /// Base URL of the portal REST API (e.g. "https://portal.example.edu/api").
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://portal.example.edu/api".to_string(),
            timeout_seconds: DEFAULT_API_TIMEOUT_SECS,
        }
    }
}

impl ApiConfig {
    /// Request timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Event delivery queue settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeliveryConfig {
    /// Capacity of the bounded delivery channel. Events beyond this are
    /// dropped rather than blocking the caller.
    pub queue_capacity: usize,
    /// Time allowed for the delivery task to drain on shutdown, in seconds.
    pub drain_timeout_seconds: u64,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            drain_timeout_seconds: DEFAULT_DRAIN_TIMEOUT_SECS,
        }
    }
}

impl DeliveryConfig {
    /// Drain timeout as a [`Duration`].
    pub fn drain_timeout(&self) -> Duration {
        Duration::from_secs(self.drain_timeout_seconds)
    }
}
