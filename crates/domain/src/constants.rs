//! Domain constants shared across the workspace.

/// Ingestion endpoint for activity events.
pub const ACTIVITY_PATH: &str = "/activity";

/// Per-user tracking configuration endpoint.
pub const ACTIVITY_CONFIG_PATH: &str = "/activity/config";

/// Visit open/continue endpoint.
pub const VISITS_PATH: &str = "/activity/visits";

/// Visit close endpoint (closes the most recently opened visit).
pub const VISITS_END_PATH: &str = "/activity/visits/end";

/// Default capacity of the bounded event delivery channel.
pub const DEFAULT_QUEUE_CAPACITY: usize = 256;

/// Default timeout for portal API requests, in seconds.
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 10;

/// Default time allowed for the delivery queue to drain on shutdown.
pub const DEFAULT_DRAIN_TIMEOUT_SECS: u64 = 5;
