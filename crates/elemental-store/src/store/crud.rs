use super::SqliteSnapshotStore;
use crate::error::Result;
use crate::snapshot::Snapshot;
use crate::traits::SnapshotStore;
use chrono::{DateTime, Utc};
use elemental_core::{AppSettings, Archetype, ElementMapping, ElementScores, Participant};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use tracing::{debug, instrument};

const SETTINGS_KEY: &str = "app";
const SAVED_AT_KEY: &str = "saved_at";

impl SqliteSnapshotStore {
    // ── Participants ────────────────────────────────────────────

    async fn load_participants(&self) -> Result<Vec<Participant>> {
        let rows = sqlx::query("SELECT id, name, answers FROM participants ORDER BY position")
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(row_to_participant).collect()
    }

    // ── Mappings ────────────────────────────────────────────────

    async fn load_mappings(&self) -> Result<Vec<ElementMapping>> {
        let rows =
            sqlx::query("SELECT question_id, answers FROM element_mappings ORDER BY position")
                .fetch_all(&self.pool)
                .await?;
        rows.iter().map(row_to_mapping).collect()
    }

    // ── Archetypes ──────────────────────────────────────────────

    async fn load_archetypes(&self) -> Result<Vec<Archetype>> {
        let rows = sqlx::query(
            "SELECT id, number, name, description, fire, water, air, earth
             FROM archetypes ORDER BY position",
        )
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(row_to_archetype).collect()
    }

    // ── Settings ────────────────────────────────────────────────

    async fn load_setting(&self, key: &str) -> Result<Option<String>> {
        let row = sqlx::query("SELECT value FROM settings WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|r| r.get("value")))
    }

    #[cfg(test)]
    pub(crate) async fn participant_count(&self) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) as cnt FROM participants")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get("cnt"))
    }
}

#[async_trait::async_trait]
impl SnapshotStore for SqliteSnapshotStore {
    #[instrument(skip(self))]
    async fn load(&self) -> Result<Snapshot> {
        let participants = self.load_participants().await?;
        let mappings = self.load_mappings().await?;
        let archetypes = self.load_archetypes().await?;
        let settings = match self.load_setting(SETTINGS_KEY).await? {
            Some(json) => serde_json::from_str(&json)?,
            None => AppSettings::default(),
        };
        let saved_at = self
            .load_setting(SAVED_AT_KEY)
            .await?
            .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
            .map(|dt| dt.with_timezone(&Utc));

        debug!(
            participants = participants.len(),
            mappings = mappings.len(),
            archetypes = archetypes.len(),
            "Snapshot loaded"
        );
        Ok(Snapshot {
            participants,
            mappings,
            archetypes,
            settings,
            saved_at,
        })
    }

    #[instrument(skip(self, snapshot))]
    async fn save(&self, snapshot: &Snapshot) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM participants")
            .execute(&mut *tx)
            .await?;
        for (position, p) in snapshot.participants.iter().enumerate() {
            sqlx::query(
                "INSERT INTO participants (position, id, name, answers)
                 VALUES (?1, ?2, ?3, ?4)",
            )
            .bind(position as i64)
            .bind(p.id)
            .bind(&p.name)
            .bind(serde_json::to_string(&p.answers)?)
            .execute(&mut *tx)
            .await?;
        }

        sqlx::query("DELETE FROM element_mappings")
            .execute(&mut *tx)
            .await?;
        for (position, m) in snapshot.mappings.iter().enumerate() {
            sqlx::query(
                "INSERT INTO element_mappings (position, question_id, answers)
                 VALUES (?1, ?2, ?3)",
            )
            .bind(position as i64)
            .bind(i64::from(m.question_id))
            .bind(serde_json::to_string(&m.answers)?)
            .execute(&mut *tx)
            .await?;
        }

        sqlx::query("DELETE FROM archetypes")
            .execute(&mut *tx)
            .await?;
        for (position, a) in snapshot.archetypes.iter().enumerate() {
            sqlx::query(
                "INSERT INTO archetypes
                 (position, id, number, name, description, fire, water, air, earth)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            )
            .bind(position as i64)
            .bind(&a.id)
            .bind(i64::from(a.number))
            .bind(&a.name)
            .bind(&a.description)
            .bind(a.percentages.fire)
            .bind(a.percentages.water)
            .bind(a.percentages.air)
            .bind(a.percentages.earth)
            .execute(&mut *tx)
            .await?;
        }

        let settings_json = serde_json::to_string(&snapshot.settings)?;
        let saved_at = snapshot.saved_at.unwrap_or_else(Utc::now).to_rfc3339();
        for (key, value) in [(SETTINGS_KEY, settings_json), (SAVED_AT_KEY, saved_at)] {
            sqlx::query(
                "INSERT INTO settings (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            )
            .bind(key)
            .bind(value)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        debug!(
            participants = snapshot.participants.len(),
            archetypes = snapshot.archetypes.len(),
            "Snapshot saved"
        );
        Ok(())
    }

    fn name(&self) -> &str {
        "sqlite"
    }
}

fn row_to_participant(row: &SqliteRow) -> Result<Participant> {
    let answers: String = row.try_get("answers")?;
    Ok(Participant {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        answers: serde_json::from_str(&answers)?,
    })
}

fn row_to_mapping(row: &SqliteRow) -> Result<ElementMapping> {
    let answers: String = row.try_get("answers")?;
    Ok(ElementMapping {
        question_id: row.try_get::<i64, _>("question_id")? as u32,
        answers: serde_json::from_str(&answers)?,
    })
}

fn row_to_archetype(row: &SqliteRow) -> Result<Archetype> {
    Ok(Archetype {
        id: row.try_get("id")?,
        number: row.try_get::<i64, _>("number")? as u32,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        percentages: ElementScores {
            fire: row.try_get("fire")?,
            water: row.try_get("water")?,
            air: row.try_get("air")?,
            earth: row.try_get("earth")?,
        },
    })
}
