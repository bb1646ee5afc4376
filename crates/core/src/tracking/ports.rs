//! Port interfaces for activity tracking
//!
//! These traits define the boundaries between telemetry logic and the
//! infrastructure adapters that talk to the portal API.

use async_trait::async_trait;
use campustrace_domain::{ActivityEvent, Result, VisitRecord};

/// Trait for delivering one serialized event to the ingestion endpoint.
#[async_trait]
pub trait EventSink: Send + Sync {
    /// Send a single event. Exactly one network call per invocation; the
    /// caller decides what to do with a failure (the delivery worker logs
    /// and discards it).
    async fn send(&self, event: &ActivityEvent) -> Result<()>;
}

/// Trait for persisting visit open/close records.
#[async_trait]
pub trait VisitStore: Send + Sync {
    /// Persist a newly opened visit record immediately, so the start
    /// timestamp survives even if the session terminates abnormally.
    async fn open_visit(&self, record: &VisitRecord) -> Result<()>;

    /// Close the most recently opened visit with the record's end time and
    /// computed duration.
    async fn close_visit(&self, record: &VisitRecord) -> Result<()>;
}
