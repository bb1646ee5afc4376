//! Visit store backed by the portal visit endpoints.

use std::sync::Arc;

use async_trait::async_trait;
use campustrace_core::VisitStore;
use campustrace_domain::constants::{VISITS_END_PATH, VISITS_PATH};
use campustrace_domain::{Result, VisitRecord};
use serde::Serialize;
use tracing::debug;

use super::client::PortalApiClient;

/// Close payload: the server matches the visit by session and path and
/// fills in the end timestamp and duration.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CloseVisitRequest<'a> {
    session_id: &'a str,
    page_path: &'a str,
    end_time: chrono::DateTime<chrono::Utc>,
    duration_secs: i64,
}

/// Persists visit opens and closes against the portal API.
pub struct HttpVisitStore {
    client: Arc<PortalApiClient>,
}

impl HttpVisitStore {
    pub fn new(client: Arc<PortalApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl VisitStore for HttpVisitStore {
    async fn open_visit(&self, record: &VisitRecord) -> Result<()> {
        debug!(page_path = %record.page_path, "opening visit");

        self.client.post::<_, serde_json::Value>(VISITS_PATH, record).await?;
        Ok(())
    }

    async fn close_visit(&self, record: &VisitRecord) -> Result<()> {
        debug!(
            page_path = %record.page_path,
            duration_secs = record.duration_secs,
            "closing visit"
        );

        let Some(end_time) = record.end_time else {
            return Err(campustrace_domain::TelemetryError::InvalidInput(
                "cannot close a visit with no end time".to_string(),
            ));
        };

        let request = CloseVisitRequest {
            session_id: &record.session_id,
            page_path: &record.page_path,
            end_time,
            duration_secs: record.duration_secs,
        };

        self.client.put::<_, serde_json::Value>(VISITS_END_PATH, &request).await?;
        Ok(())
    }
}
