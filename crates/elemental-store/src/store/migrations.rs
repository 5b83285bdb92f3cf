use super::SqliteSnapshotStore;
use crate::error::Result;

impl SqliteSnapshotStore {
    // ── Migrations ──────────────────────────────────────────────

    pub(crate) async fn run_migrations(&self) -> Result<()> {
        // `position` keeps input order; participant ids may repeat.
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS participants (
                position INTEGER PRIMARY KEY,
                id       INTEGER NOT NULL,
                name     TEXT,
                answers  TEXT NOT NULL DEFAULT '{}'
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_participants_id ON participants(id)")
            .execute(&self.pool)
            .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS element_mappings (
                position    INTEGER PRIMARY KEY,
                question_id INTEGER NOT NULL,
                answers     TEXT NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS archetypes (
                position    INTEGER PRIMARY KEY,
                id          TEXT NOT NULL,
                number      INTEGER NOT NULL,
                name        TEXT,
                description TEXT NOT NULL DEFAULT '',
                fire        REAL NOT NULL,
                water       REAL NOT NULL,
                air         REAL NOT NULL,
                earth       REAL NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS settings (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
