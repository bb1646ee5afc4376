//! Activity tracker - the public tracking surface.
//!
//! Constructed once per session through the composition root and passed
//! explicitly to callers; there is no implicit global instance. Every
//! public method is infallible from the caller's perspective: gate
//! denials are silent no-ops and internal failures are caught and logged
//! at the method boundary, so telemetry can never break the UI.

use std::sync::Arc;

use campustrace_domain::{
    ActionKind, ActivityEvent, ClientInfo, DeliveryConfig, EventMetadata, TrackingCategory,
    UserIdentity,
};
use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, info, warn};

use crate::config::gate::ConfigGate;
use crate::time::Clock;
use crate::tracking::delivery::DeliveryWorker;
use crate::tracking::ports::{EventSink, VisitStore};
use crate::tracking::visit::VisitRecorder;

/// Session-scoped activity tracker.
///
/// Events flow through a bounded channel into a single delivery task;
/// `track_*` callers only pay for a gate check and a `try_send`, never for
/// network I/O.
pub struct ActivityTracker {
    session_id: String,
    identity: UserIdentity,
    gate: Arc<ConfigGate>,
    visits: VisitRecorder,
    clock: Arc<dyn Clock>,
    started_at: DateTime<Utc>,
    sender: Mutex<Option<mpsc::Sender<ActivityEvent>>>,
    worker: Mutex<Option<DeliveryWorker>>,
    drain_timeout: std::time::Duration,
}

impl ActivityTracker {
    /// Create a tracker and spawn its delivery worker.
    ///
    /// Mints a fresh session id; every event and visit produced by this
    /// instance carries it.
    pub fn new(
        identity: UserIdentity,
        client: ClientInfo,
        gate: Arc<ConfigGate>,
        sink: Arc<dyn EventSink>,
        visit_store: Arc<dyn VisitStore>,
        clock: Arc<dyn Clock>,
        delivery: &DeliveryConfig,
    ) -> Self {
        let session_id = uuid::Uuid::new_v4().to_string();
        let (sender, receiver) = mpsc::channel(delivery.queue_capacity.max(1));
        let worker = DeliveryWorker::spawn(sink, receiver);

        let visits = VisitRecorder::new(
            visit_store,
            Arc::clone(&gate),
            Arc::clone(&clock),
            session_id.clone(),
            identity.student_id.clone(),
            client,
        );

        info!(session_id = %session_id, "activity tracker created");

        Self {
            session_id,
            identity,
            gate,
            visits,
            started_at: clock.now(),
            clock,
            sender: Mutex::new(Some(sender)),
            worker: Mutex::new(Some(worker)),
            drain_timeout: delivery.drain_timeout(),
        }
    }

    /// The opaque session identifier correlating this tracker's output.
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Track a page view; drives the visit recorder continuation.
    pub async fn track_page_view(&self, path: &str) {
        if !self.gate.is_enabled(TrackingCategory::PageViews).await {
            debug!(path, "page view tracking disabled");
            return;
        }

        self.visits.start_visit(path).await;

        let event = self.event(ActionKind::PageView, path);
        self.enqueue(event).await;
    }

    /// Track a button click.
    pub async fn track_button_click(&self, element_id: &str, path: &str) {
        if !self.gate.is_enabled(TrackingCategory::ButtonClicks).await {
            debug!(element_id, "button click tracking disabled");
            return;
        }

        let event = self.event(ActionKind::ButtonClick, path).with_element_id(element_id);
        self.enqueue(event).await;
    }

    /// Track a form submission with an optional field snapshot.
    pub async fn track_form_submission(
        &self,
        form_id: &str,
        path: &str,
        form_data: Option<serde_json::Value>,
    ) {
        if !self.gate.is_enabled(TrackingCategory::FormSubmissions).await {
            debug!(form_id, "form submission tracking disabled");
            return;
        }

        let mut event = self.event(ActionKind::FormSubmission, path).with_form_id(form_id);
        if let Some(data) = form_data {
            event = event.with_form_data(data);
        }
        self.enqueue(event).await;
    }

    /// Track a single form input change.
    pub async fn track_form_input(&self, input_name: &str, input_value: &str, path: &str) {
        if !self.gate.is_enabled(TrackingCategory::FormInputs).await {
            debug!(input_name, "form input tracking disabled");
            return;
        }

        let event = self.event(ActionKind::FormInput, path).with_input(input_name, input_value);
        self.enqueue(event).await;
    }

    /// Track an API call made by the portal UI.
    pub async fn track_api_call(&self, api_endpoint: &str, api_method: &str, path: &str) {
        if !self.gate.is_enabled(TrackingCategory::ApiCalls).await {
            debug!(api_endpoint, "api call tracking disabled");
            return;
        }

        let event = self.event(ActionKind::ApiCall, path).with_api_call(api_endpoint, api_method);
        self.enqueue(event).await;
    }

    /// Track a login, tagged with the authenticated user's identity.
    pub async fn track_login(&self, student_id: &str) {
        if !self.gate.is_enabled(TrackingCategory::LoginLogout).await {
            debug!(student_id, "login/logout tracking disabled");
            return;
        }

        let mut event = self.event(ActionKind::Login, "/login");
        event.metadata.student_id = Some(student_id.to_string());
        self.enqueue(event).await;
    }

    /// Track a logout.
    ///
    /// Always closes the open visit first, so no visit survives a session
    /// boundary - even when the `login_logout` category itself is
    /// disabled and no logout event is emitted.
    pub async fn track_logout(&self, student_id: &str) {
        self.visits.end_visit().await;

        if !self.gate.is_enabled(TrackingCategory::LoginLogout).await {
            debug!(student_id, "login/logout tracking disabled");
            return;
        }

        let mut event = self.event(ActionKind::Logout, "/logout");
        event.metadata.student_id = Some(student_id.to_string());
        self.enqueue(event).await;
    }

    /// Close any open visit, stop accepting events, and drain the queue.
    ///
    /// Idempotent; later `track_*` calls become silent no-ops.
    pub async fn shutdown(&self) {
        info!(session_id = %self.session_id, "activity tracker shutting down");

        self.visits.end_visit().await;

        // Dropping the sender lets the worker exit once the queue drains
        self.sender.lock().await.take();

        if let Some(mut worker) = self.worker.lock().await.take() {
            worker.stop(self.drain_timeout).await;
        }
    }

    fn event(&self, action: ActionKind, path: &str) -> ActivityEvent {
        let session_duration = (self.clock.now() - self.started_at).num_seconds().max(0);
        let metadata = EventMetadata::from_identity(&self.identity, session_duration);
        ActivityEvent::new(action, path, self.session_id.clone(), metadata, self.clock.now())
    }

    async fn enqueue(&self, event: ActivityEvent) {
        let guard = self.sender.lock().await;
        let Some(sender) = guard.as_ref() else {
            debug!(action = ?event.action, "tracker shut down; dropping event");
            return;
        };

        match sender.try_send(event) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(event)) => {
                // Dropped telemetry beats a blocked caller
                warn!(action = ?event.action, "delivery queue full; dropping event");
            }
            Err(mpsc::error::TrySendError::Closed(event)) => {
                debug!(action = ?event.action, "delivery channel closed; dropping event");
            }
        }
    }
}
