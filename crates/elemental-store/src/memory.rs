//! In-memory snapshot store.

use tokio::sync::RwLock;

use crate::error::Result;
use crate::snapshot::Snapshot;
use crate::traits::SnapshotStore;

/// Keeps the snapshot in process memory. Nothing survives a restart.
#[derive(Default)]
pub struct MemorySnapshotStore {
    snapshot: RwLock<Snapshot>,
}

impl MemorySnapshotStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with an existing snapshot.
    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            snapshot: RwLock::new(snapshot),
        }
    }
}

#[async_trait::async_trait]
impl SnapshotStore for MemorySnapshotStore {
    async fn load(&self) -> Result<Snapshot> {
        Ok(self.snapshot.read().await.clone())
    }

    async fn save(&self, snapshot: &Snapshot) -> Result<()> {
        *self.snapshot.write().await = snapshot.clone();
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
