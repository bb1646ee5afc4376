//! Bridge between the host UI event stream and the tracker.
//!
//! `attach` is fail-closed: the gate must resolve its configuration before
//! any listener starts. A portal that cannot say what the user consented to
//! tracks nothing.

use std::sync::Arc;
use std::time::Duration;

use campustrace_core::{ActivityTracker, ConfigGate};
use campustrace_domain::{Result, TelemetryError, TrackingCategory};
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::events::UiEvent;

const DETACH_JOIN_TIMEOUT: Duration = Duration::from_secs(2);

struct Listener {
    cancellation: CancellationToken,
    handle: JoinHandle<()>,
}

/// Consumes the host's UI event stream and forwards it to the tracker.
pub struct ActivityBridge {
    tracker: Arc<ActivityTracker>,
    gate: Arc<ConfigGate>,
    listener: Mutex<Option<Listener>>,
}

impl ActivityBridge {
    pub fn new(tracker: Arc<ActivityTracker>, gate: Arc<ConfigGate>) -> Self {
        Self { tracker, gate, listener: Mutex::new(None) }
    }

    /// Resolve the tracking configuration, then start consuming `events`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the bridge is already attached (the
    /// running listener keeps its stream; `events` is dropped). Propagates
    /// the configuration fetch failure; no listener starts and the gate
    /// keeps denying, so the host can surface the problem or retry the
    /// attach later.
    pub async fn attach(&self, events: mpsc::Receiver<UiEvent>) -> Result<()> {
        // Hold the lock across the load so racing attaches cannot both spawn
        let mut listener = self.listener.lock().await;
        if listener.is_some() {
            return Err(TelemetryError::InvalidInput("bridge is already attached".to_string()));
        }

        self.gate.load().await?;

        let cancellation = CancellationToken::new();
        let cancel = cancellation.clone();
        let tracker = Arc::clone(&self.tracker);
        let gate = Arc::clone(&self.gate);

        let handle = tokio::spawn(async move {
            Self::run(tracker, gate, events, cancel).await;
        });

        *listener = Some(Listener { cancellation, handle });
        info!("activity bridge attached");
        Ok(())
    }

    /// Whether a listener task is currently running.
    pub async fn is_attached(&self) -> bool {
        self.listener.lock().await.is_some()
    }

    /// Stop the listener and shut the tracker down.
    ///
    /// Closes the open visit and drains the delivery queue; idempotent.
    pub async fn detach(&self) {
        if let Some(listener) = self.listener.lock().await.take() {
            listener.cancellation.cancel();
            if tokio::time::timeout(DETACH_JOIN_TIMEOUT, listener.handle).await.is_err() {
                warn!("bridge listener did not stop in time");
            }
        }

        self.tracker.shutdown().await;
        info!("activity bridge detached");
    }

    async fn run(
        tracker: Arc<ActivityTracker>,
        gate: Arc<ConfigGate>,
        mut events: mpsc::Receiver<UiEvent>,
        cancel: CancellationToken,
    ) {
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!("bridge listener cancelled");
                    break;
                }
                next = events.recv() => {
                    match next {
                        Some(event) => Self::dispatch(&tracker, &gate, event).await,
                        None => {
                            debug!("ui event stream closed");
                            break;
                        }
                    }
                }
            }
        }
    }

    // The tracker re-checks each gate internally; the check here just saves
    // the call for streams dominated by disabled categories.
    async fn dispatch(tracker: &ActivityTracker, gate: &ConfigGate, event: UiEvent) {
        match event {
            UiEvent::RouteChanged { path } => {
                if gate.is_enabled(TrackingCategory::PageViews).await {
                    tracker.track_page_view(&path).await;
                }
            }
            UiEvent::ButtonClicked { element_id, path } => {
                if gate.is_enabled(TrackingCategory::ButtonClicks).await {
                    tracker.track_button_click(&element_id, &path).await;
                }
            }
            UiEvent::FormSubmitted { form_id, path, form_data } => {
                if gate.is_enabled(TrackingCategory::FormSubmissions).await {
                    tracker.track_form_submission(&form_id, &path, form_data).await;
                }
            }
            UiEvent::InputChanged { input_name, input_value, path } => {
                if gate.is_enabled(TrackingCategory::FormInputs).await {
                    tracker.track_form_input(&input_name, &input_value, &path).await;
                }
            }
            UiEvent::LoggedIn { student_id } => {
                if gate.is_enabled(TrackingCategory::LoginLogout).await {
                    tracker.track_login(&student_id).await;
                }
            }
            // No pre-filter: logout must close the visit regardless of the
            // login_logout flag
            UiEvent::LoggedOut { student_id } => {
                tracker.track_logout(&student_id).await;
            }
        }
    }
}
