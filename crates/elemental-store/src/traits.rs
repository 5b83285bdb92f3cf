//! Trait for snapshot storage backends

use crate::error::Result;
use crate::snapshot::Snapshot;

/// Trait for snapshot storage backends
///
/// Implementations (SQLite, in-memory) are interchangeable behind
/// [`ProfileBook`](crate::ProfileBook).
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Load the stored snapshot (empty when nothing was saved yet)
    async fn load(&self) -> Result<Snapshot>;

    /// Replace the stored snapshot
    async fn save(&self, snapshot: &Snapshot) -> Result<()>;

    /// Get the store name (for logging)
    fn name(&self) -> &str;
}
