//! # CampusTrace Core
//!
//! Pure telemetry logic - no infrastructure dependencies.
//!
//! This crate contains:
//! - The activity tracker, visit recorder, and config gate
//! - Port/adapter interfaces (traits) for the remote collaborators
//! - The bounded delivery queue and its worker task
//!
//! ## Architecture Principles
//! - Only depends on `campustrace-domain`
//! - No HTTP or platform code
//! - All external dependencies via traits

pub mod config;
pub mod time;
pub mod tracking;

// Re-export specific items to avoid ambiguity
pub use config::gate::ConfigGate;
pub use config::ports::ConfigStore;
pub use time::{Clock, SystemClock};
pub use tracking::delivery::DeliveryWorker;
pub use tracking::ports::{EventSink, VisitStore};
pub use tracking::service::ActivityTracker;
pub use tracking::visit::VisitRecorder;
