//! SqliteSnapshotStore - SQLite persistence for snapshots.
//!
//! Tables: `participants`, `element_mappings`, `archetypes`, `settings`.

use crate::error::{Error, Result};

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

mod crud;
mod migrations;

#[cfg(test)]
mod tests;

/// Snapshot store on a single SQLite database file.
#[derive(Clone)]
pub struct SqliteSnapshotStore {
    pub(crate) pool: SqlitePool,
}

impl SqliteSnapshotStore {
    /// Open the database at `db_path`, creating it and its directory when
    /// missing. The file runs in WAL mode.
    pub async fn from_path(db_path: &Path) -> Result<Self> {
        if let Some(dir) = db_path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|e| {
                Error::Internal(format!("cannot create {}: {e}", dir.display()))
            })?;
        }
        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.run_migrations().await?;
        info!(path = %db_path.display(), "Snapshot database ready");
        Ok(store)
    }

    /// Private in-memory database; its contents vanish with the store.
    pub async fn in_memory() -> Result<Self> {
        // One connection, otherwise each would see its own empty database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;
        let store = Self { pool };
        store.run_migrations().await?;
        debug!("In-memory snapshot database ready");
        Ok(store)
    }
}

/// Default data directory (`~/.elemental`).
pub fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .map(|p| p.join(".elemental"))
        .unwrap_or_else(|| PathBuf::from(".elemental"))
}

/// Default database path.
pub fn default_db_path() -> PathBuf {
    default_data_dir().join("elemental.db")
}
