//! Host integration for CampusTrace.
//!
//! The portal shell owns the UI; this crate is the seam between it and the
//! telemetry core. The shell builds a [`TelemetryContext`], attaches the
//! [`ActivityBridge`] to its UI event stream, and detaches on teardown.

pub mod bridge;
pub mod context;
pub mod events;

pub use bridge::ActivityBridge;
pub use context::TelemetryContext;
pub use events::UiEvent;
