//! Port interface for the remote configuration endpoints.

use async_trait::async_trait;
use campustrace_domain::{ActivityConfigRecord, Result};

/// Trait for fetching and persisting a user's tracking configuration.
///
/// The remote read creates a default-all-true record if none exists for the
/// caller; the write replaces the stored record wholesale.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Fetch the caller's configuration record.
    async fn fetch(&self) -> Result<ActivityConfigRecord>;

    /// Persist the full configuration record, replacing the stored one.
    async fn store(&self, record: &ActivityConfigRecord) -> Result<()>;
}
