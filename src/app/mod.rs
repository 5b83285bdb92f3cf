//! Application wiring
//!
//! Loads configuration and opens the profile book that every CLI command
//! works against.

pub mod config;
pub mod loader;

pub use config::AppConfig;
pub use loader::load_config;

use anyhow::{Context, Result};
use elemental_store::{ProfileBook, SqliteSnapshotStore};
use std::path::Path;
use tracing::info;

/// Open the SQLite-backed profile book.
///
/// A database that has never been saved is seeded with the configured
/// matching defaults.
pub async fn open_book(
    config: &AppConfig,
    db_override: Option<&Path>,
) -> Result<ProfileBook<SqliteSnapshotStore>> {
    let db_path = db_override
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.db_path());

    let store = SqliteSnapshotStore::from_path(&db_path)
        .await
        .with_context(|| format!("Failed to open database at {}", db_path.display()))?;
    let mut book = ProfileBook::open(store)
        .await
        .context("Failed to load snapshot")?;

    if book.snapshot().saved_at.is_none() {
        let settings = config.matching.to_settings();
        info!(mode = %settings.distribution_mode, "Seeding new database with configured defaults");
        book.set_settings(settings)
            .await
            .context("Failed to store initial settings")?;
    }
    Ok(book)
}
