//! The persisted state of one profiling project.

use chrono::{DateTime, Utc};
use elemental_core::{AppSettings, Archetype, ElementMapping, Participant};
use serde::{Deserialize, Serialize};

/// Everything the matcher needs, captured at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Participant answer records
    #[serde(default)]
    pub participants: Vec<Participant>,
    /// Question-to-element mappings
    #[serde(default)]
    pub mappings: Vec<ElementMapping>,
    /// Archetype library
    #[serde(default)]
    pub archetypes: Vec<Archetype>,
    /// Run settings
    #[serde(default)]
    pub settings: AppSettings,
    /// When this snapshot was last saved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
}

/// Partial snapshot read by [`Snapshot::merge_json`].
#[derive(Deserialize)]
struct SnapshotPatch {
    participants: Option<Vec<Participant>>,
    mappings: Option<Vec<ElementMapping>>,
    archetypes: Option<Vec<Archetype>>,
    settings: Option<AppSettings>,
}

impl Snapshot {
    /// Parse a snapshot from JSON.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Apply a JSON document on top of this snapshot.
    ///
    /// Top-level keys present in `json` replace the matching collection or
    /// settings; absent keys keep their current value.
    pub fn merge_json(&self, json: &str) -> crate::Result<Self> {
        let patch: SnapshotPatch = serde_json::from_str(json)?;
        Ok(Self {
            participants: patch
                .participants
                .unwrap_or_else(|| self.participants.clone()),
            mappings: patch.mappings.unwrap_or_else(|| self.mappings.clone()),
            archetypes: patch.archetypes.unwrap_or_else(|| self.archetypes.clone()),
            settings: patch.settings.unwrap_or(self.settings),
            saved_at: self.saved_at,
        })
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Find an archetype by ID.
    pub fn archetype(&self, id: &str) -> Option<&Archetype> {
        self.archetypes.iter().find(|a| a.id == id)
    }

    /// Find the mapping for a question.
    pub fn mapping(&self, question_id: u32) -> Option<&ElementMapping> {
        self.mappings.iter().find(|m| m.question_id == question_id)
    }
}
