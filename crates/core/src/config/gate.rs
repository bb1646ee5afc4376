//! Config gate: cached per-user toggle matrix serving gate checks.
//!
//! # Caching Strategy
//!
//! - **Load-once**: the bridge fetches the remote record at attach time;
//!   until that resolves every gate check answers `false` (default-deny)
//! - **Whole-object replacement**: updates persist the full matrix remotely
//!   and then swap the cached record atomically, so readers never observe
//!   a partially-updated matrix
//! - **Last-write-wins**: concurrent toggles are not merged

use std::sync::Arc;

use campustrace_domain::{ActivityConfigRecord, Result, TrackingCategory};
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::ports::ConfigStore;

/// Gate that decides, per category, whether an event may be emitted.
///
/// The store is kept private - external code interacts via the gate.
pub struct ConfigGate {
    store: Arc<dyn ConfigStore>,
    cache: RwLock<Option<ActivityConfigRecord>>,
}

impl ConfigGate {
    /// Create an unresolved gate; every check denies until [`load`] runs.
    ///
    /// [`load`]: ConfigGate::load
    pub fn new(store: Arc<dyn ConfigStore>) -> Self {
        Self { store, cache: RwLock::new(None) }
    }

    /// Fetch the remote configuration and populate the cache.
    ///
    /// This is the one place where a telemetry failure propagates: the
    /// bridge must know whether tracking can start at all.
    ///
    /// # Errors
    ///
    /// Returns the store error if the remote fetch fails; the cache is left
    /// unresolved and the gate keeps denying.
    pub async fn load(&self) -> Result<ActivityConfigRecord> {
        let record = self.store.fetch().await?;

        let mut cache = self.cache.write().await;
        *cache = Some(record.clone());

        info!("tracking configuration loaded");
        Ok(record)
    }

    /// Whether the gate has a resolved configuration.
    pub async fn is_ready(&self) -> bool {
        self.cache.read().await.is_some()
    }

    /// Gate check for one category.
    ///
    /// Answers `false` while the configuration is unresolved: tracking
    /// calls arriving before [`load`] completes are dropped, not buffered.
    ///
    /// [`load`]: ConfigGate::load
    pub async fn is_enabled(&self, category: TrackingCategory) -> bool {
        match self.cache.read().await.as_ref() {
            Some(record) => record.is_enabled(category),
            None => {
                debug!(?category, "gate check before configuration resolved; denying");
                false
            }
        }
    }

    /// Current cached record, if resolved.
    pub async fn cached(&self) -> Option<ActivityConfigRecord> {
        self.cache.read().await.clone()
    }

    /// Persist the full matrix; on success atomically replace the cache.
    ///
    /// # Errors
    ///
    /// Propagates store failures to the caller (a failed settings save may
    /// surface a notification). The cache keeps the previous record on
    /// failure.
    pub async fn update_config(&self, record: ActivityConfigRecord) -> Result<()> {
        self.store.store(&record).await?;

        let mut cache = self.cache.write().await;
        *cache = Some(record);

        info!("tracking configuration updated");
        Ok(())
    }

    /// Flip one category and write the whole matrix back.
    ///
    /// Read-modify-write over the full record; concurrent toggles follow
    /// last-write-wins with no merge semantics.
    ///
    /// # Errors
    ///
    /// Propagates fetch failures (when the cache is unresolved) and store
    /// failures.
    pub async fn toggle(&self, category: TrackingCategory) -> Result<ActivityConfigRecord> {
        let current = match self.cached().await {
            Some(record) => record,
            None => self.store.fetch().await?,
        };

        let next = current.toggled(category);
        self.update_config(next.clone()).await?;
        Ok(next)
    }
}
