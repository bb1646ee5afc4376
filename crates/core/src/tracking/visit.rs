//! Visit recorder - open/close state machine for page dwell time.
//!
//! State machine per (session, path):
//! `NoVisit -start_visit-> Open -end_visit | start_visit on another path->
//! Closed -start_visit-> Open (new record)`.
//!
//! Store failures are logged and swallowed; the recorder still tracks the
//! open visit locally so the close path stays consistent.

use std::sync::Arc;

use campustrace_domain::{ClientInfo, TrackingCategory, VisitRecord};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::config::gate::ConfigGate;
use crate::time::Clock;
use crate::tracking::ports::VisitStore;

/// Records how long the session dwells on each page path.
pub struct VisitRecorder {
    store: Arc<dyn VisitStore>,
    gate: Arc<ConfigGate>,
    clock: Arc<dyn Clock>,
    session_id: String,
    student_id: Option<String>,
    client: ClientInfo,
    current: Mutex<Option<VisitRecord>>,
}

impl VisitRecorder {
    /// Create a recorder with no open visit.
    pub fn new(
        store: Arc<dyn VisitStore>,
        gate: Arc<ConfigGate>,
        clock: Arc<dyn Clock>,
        session_id: impl Into<String>,
        student_id: Option<String>,
        client: ClientInfo,
    ) -> Self {
        Self {
            store,
            gate,
            clock,
            session_id: session_id.into(),
            student_id,
            client,
            current: Mutex::new(None),
        }
    }

    /// Open a visit on `path`, auto-closing any open visit on another path.
    ///
    /// No-op when the `visit_time` category is disabled. A repeated call
    /// for the path that is already open continues the visit instead of
    /// churning records. The new open record is persisted immediately, not
    /// buffered.
    pub async fn start_visit(&self, path: &str) {
        if !self.gate.is_enabled(TrackingCategory::VisitTime).await {
            debug!(path, "visit tracking disabled; skipping start");
            return;
        }

        let mut current = self.current.lock().await;

        if let Some(open) = current.as_ref() {
            if open.page_path == path {
                debug!(path, "visit already open for path; continuing");
                return;
            }
        }

        if let Some(mut open) = current.take() {
            open.close(self.clock.now());
            self.persist_close(&open).await;
        }

        let record = VisitRecord::open(
            self.student_id.clone(),
            self.session_id.clone(),
            path,
            self.clock.now(),
            self.client.clone(),
        );

        if let Err(err) = self.store.open_visit(&record).await {
            warn!(path, error = %err, "failed to persist visit open");
        }

        *current = Some(record);
    }

    /// Close the current open visit, if any. Idempotent.
    pub async fn end_visit(&self) {
        let mut current = self.current.lock().await;

        let Some(mut open) = current.take() else {
            debug!("end_visit with no open visit; no-op");
            return;
        };

        open.close(self.clock.now());
        self.persist_close(&open).await;
    }

    /// Snapshot of the currently open visit, if any.
    pub async fn current_visit(&self) -> Option<VisitRecord> {
        self.current.lock().await.clone()
    }

    async fn persist_close(&self, record: &VisitRecord) {
        debug_assert!(record.duration_secs >= 0);
        if let Err(err) = self.store.close_visit(record).await {
            warn!(path = %record.page_path, error = %err, "failed to persist visit close");
        }
    }
}
