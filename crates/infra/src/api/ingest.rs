//! Event sink backed by the portal ingestion endpoint.

use std::sync::Arc;

use async_trait::async_trait;
use campustrace_core::EventSink;
use campustrace_domain::constants::ACTIVITY_PATH;
use campustrace_domain::{ActivityEvent, Result};
use tracing::debug;

use super::client::PortalApiClient;

/// Delivers events with one POST per event. No batching, no retry; a
/// failure bubbles up to the delivery worker, which logs and discards.
pub struct HttpEventSink {
    client: Arc<PortalApiClient>,
}

impl HttpEventSink {
    pub fn new(client: Arc<PortalApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl EventSink for HttpEventSink {
    async fn send(&self, event: &ActivityEvent) -> Result<()> {
        debug!(action = ?event.action, page_path = %event.page_path, "posting activity event");

        self.client.post::<_, serde_json::Value>(ACTIVITY_PATH, event).await?;
        Ok(())
    }
}
