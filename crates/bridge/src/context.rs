//! Composition root wiring the telemetry stack together.

use std::sync::Arc;

use campustrace_core::{ActivityTracker, ConfigGate, SystemClock};
use campustrace_domain::{ClientInfo, Result, TelemetryConfig, UserIdentity};
use campustrace_infra::{
    AccessTokenProvider, HttpConfigStore, HttpEventSink, HttpVisitStore, PortalApiClient,
};
use tracing::info;

use crate::bridge::ActivityBridge;

/// All telemetry services, built once by the host at session start.
///
/// The host keeps this alive for the session and calls [`shutdown`] on
/// teardown so the open visit closes and the delivery queue drains.
///
/// [`shutdown`]: TelemetryContext::shutdown
pub struct TelemetryContext {
    pub gate: Arc<ConfigGate>,
    pub tracker: Arc<ActivityTracker>,
    pub bridge: Arc<ActivityBridge>,
}

impl TelemetryContext {
    /// Wire the API client, the port adapters, the gate, the tracker, and
    /// the bridge from one configuration.
    ///
    /// Construction is synchronous and does no I/O; the first network call
    /// happens when the bridge attaches and loads the configuration.
    ///
    /// # Errors
    ///
    /// Returns `TelemetryError::Config` if the HTTP client cannot be built.
    pub fn new(
        config: &TelemetryConfig,
        auth: Arc<dyn AccessTokenProvider>,
        identity: UserIdentity,
        client_info: ClientInfo,
    ) -> Result<Self> {
        let api = Arc::new(PortalApiClient::new(&config.api, auth)?);

        let gate = Arc::new(ConfigGate::new(Arc::new(HttpConfigStore::new(Arc::clone(&api)))));

        let tracker = Arc::new(ActivityTracker::new(
            identity,
            client_info,
            Arc::clone(&gate),
            Arc::new(HttpEventSink::new(Arc::clone(&api))),
            Arc::new(HttpVisitStore::new(Arc::clone(&api))),
            Arc::new(SystemClock),
            &config.delivery,
        ));

        let bridge = Arc::new(ActivityBridge::new(Arc::clone(&tracker), Arc::clone(&gate)));

        info!(session_id = %tracker.session_id(), "telemetry context initialized");

        Ok(Self { gate, tracker, bridge })
    }

    /// Detach the bridge and drain the tracker.
    pub async fn shutdown(&self) {
        self.bridge.detach().await;
        info!("telemetry context shut down");
    }
}

#[cfg(test)]
mod tests {
    use campustrace_infra::SessionTokenProvider;

    use super::*;

    #[tokio::test]
    async fn builds_without_io() {
        let config = TelemetryConfig::default();
        let auth = Arc::new(SessionTokenProvider::with_token("t"));

        let context = TelemetryContext::new(
            &config,
            auth,
            UserIdentity::anonymous(),
            ClientInfo::default(),
        )
        .unwrap();

        assert!(!context.gate.is_ready().await);
        context.shutdown().await;
    }
}
