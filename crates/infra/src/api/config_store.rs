//! Config store backed by the portal configuration endpoint.
//!
//! Fetch returns the caller's toggle matrix (the server creates a
//! default-all-enabled record on first fetch). Store replaces the whole
//! record; there is no field-level patching.

use std::sync::Arc;

use async_trait::async_trait;
use campustrace_core::ConfigStore;
use campustrace_domain::constants::ACTIVITY_CONFIG_PATH;
use campustrace_domain::{ActivityConfigRecord, Result};
use tracing::debug;

use super::client::PortalApiClient;

pub struct HttpConfigStore {
    client: Arc<PortalApiClient>,
}

impl HttpConfigStore {
    pub fn new(client: Arc<PortalApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ConfigStore for HttpConfigStore {
    async fn fetch(&self) -> Result<ActivityConfigRecord> {
        debug!("fetching tracking configuration");
        let record = self.client.get(ACTIVITY_CONFIG_PATH).await?;
        Ok(record)
    }

    async fn store(&self, record: &ActivityConfigRecord) -> Result<()> {
        debug!("storing tracking configuration");
        self.client.put::<_, serde_json::Value>(ACTIVITY_CONFIG_PATH, record).await?;
        Ok(())
    }
}
