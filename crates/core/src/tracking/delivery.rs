//! Delivery worker: single consumer of the bounded event queue.
//!
//! One spawned task drains the tracker's channel and pushes each event to
//! the [`EventSink`]. A failed send is logged and discarded; telemetry
//! correctness is secondary to UI responsiveness, so there is no retry, no
//! requeue, and no backpressure onto the tracker beyond the channel bound.

use std::sync::Arc;
use std::time::Duration;

use campustrace_domain::ActivityEvent;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::tracking::ports::EventSink;

/// Background task that delivers queued events one at a time.
pub struct DeliveryWorker {
    cancellation: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl DeliveryWorker {
    /// Spawn the worker over the receiving half of the delivery channel.
    pub fn spawn(sink: Arc<dyn EventSink>, receiver: mpsc::Receiver<ActivityEvent>) -> Self {
        let cancellation = CancellationToken::new();
        let cancel = cancellation.clone();

        let handle = tokio::spawn(async move {
            Self::run(sink, receiver, cancel).await;
        });

        Self { cancellation, handle: Some(handle) }
    }

    /// Wait for the queue to drain, then join the task.
    ///
    /// The tracker drops its sender before calling this, so the worker
    /// exits once the buffered events are delivered. If the drain exceeds
    /// `drain_timeout` the task is cancelled and remaining events are lost
    /// (accepted as silent loss on teardown).
    pub async fn stop(&mut self, drain_timeout: Duration) {
        let Some(handle) = self.handle.take() else {
            return;
        };

        match tokio::time::timeout(drain_timeout, handle).await {
            Ok(Ok(())) => debug!("delivery worker drained and stopped"),
            Ok(Err(err)) => warn!(error = %err, "delivery worker task panicked"),
            Err(_) => {
                warn!(
                    timeout_secs = drain_timeout.as_secs(),
                    "delivery drain timed out; cancelling worker"
                );
                self.cancellation.cancel();
            }
        }
    }

    async fn run(
        sink: Arc<dyn EventSink>,
        mut receiver: mpsc::Receiver<ActivityEvent>,
        cancel: CancellationToken,
    ) {
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!("delivery worker cancelled");
                    break;
                }
                next = receiver.recv() => {
                    match next {
                        Some(event) => {
                            if let Err(err) = sink.send(&event).await {
                                // DeliveryFailure: logged, discarded, never surfaced
                                warn!(
                                    action = ?event.action,
                                    page_path = %event.page_path,
                                    error = %err,
                                    "event delivery failed; dropping"
                                );
                            } else {
                                debug!(action = ?event.action, "event delivered");
                            }
                        }
                        None => {
                            debug!("delivery channel closed; drain complete");
                            break;
                        }
                    }
                }
            }
        }
    }
}

impl Drop for DeliveryWorker {
    fn drop(&mut self) {
        if self.handle.is_some() {
            self.cancellation.cancel();
        }
    }
}
