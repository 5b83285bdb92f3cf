//! ProfileBook - owns the project state and keeps profiles current.
//!
//! Every edit is applied to a copy of the snapshot, validated, saved through
//! the store, and only then committed in memory. Profiles are recomputed in
//! full after each committed edit.

use chrono::Utc;
use elemental_core::{
    match_profiles, validate_archetype, validate_mapping, AnswerValue, AppSettings, Archetype,
    DistributionStats, Element, ElementMapping, Error as CoreError, MatchedProfile, Participant,
};
use tracing::{debug, info};

use crate::error::Result;
use crate::snapshot::Snapshot;
use crate::traits::SnapshotStore;

/// Current snapshot plus the profiles computed from it.
pub struct ProfileBook<S: SnapshotStore> {
    store: S,
    snapshot: Snapshot,
    profiles: Vec<MatchedProfile>,
}

impl<S: SnapshotStore> ProfileBook<S> {
    /// Load the stored snapshot and compute profiles.
    pub async fn open(store: S) -> Result<Self> {
        let snapshot = store.load().await?;
        info!(
            store = store.name(),
            participants = snapshot.participants.len(),
            archetypes = snapshot.archetypes.len(),
            "Profile book opened"
        );
        let mut book = Self {
            store,
            snapshot,
            profiles: Vec::new(),
        };
        book.recalculate();
        Ok(book)
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Profiles from the last recalculation.
    pub fn profiles(&self) -> &[MatchedProfile] {
        &self.profiles
    }

    /// Distribution of the current profiles.
    pub fn stats(&self) -> DistributionStats {
        DistributionStats::from_profiles(&self.profiles)
    }

    /// True when the top archetype exceeds the configured threshold.
    pub fn is_high_concentration(&self) -> bool {
        self.stats()
            .is_high_concentration(self.snapshot.settings.concentration_threshold)
    }

    /// Recompute all profiles from the current snapshot.
    pub fn recalculate(&mut self) -> &[MatchedProfile] {
        let s = &self.snapshot;
        self.profiles = match_profiles(
            &s.participants,
            &s.mappings,
            &s.archetypes,
            s.settings.distribution_mode,
        );
        debug!(
            profiles = self.profiles.len(),
            mode = %s.settings.distribution_mode,
            "Profiles recalculated"
        );
        &self.profiles
    }

    // ── Participants ────────────────────────────────────────────

    /// Replace all participant records.
    pub async fn replace_participants(&mut self, participants: Vec<Participant>) -> Result<()> {
        let mut next = self.snapshot.clone();
        next.participants = participants;
        self.commit(next).await
    }

    /// Remove all participants (and therefore all profiles).
    pub async fn reset_participants(&mut self) -> Result<()> {
        self.replace_participants(Vec::new()).await
    }

    // ── Mappings ────────────────────────────────────────────────

    /// Add a complete mapping for a question not mapped yet.
    pub async fn add_mapping(&mut self, mapping: ElementMapping) -> Result<()> {
        validate_mapping(&mapping)?;
        if self.snapshot.mapping(mapping.question_id).is_some() {
            return Err(CoreError::DuplicateQuestion(mapping.question_id).into());
        }
        let mut next = self.snapshot.clone();
        next.mappings.push(mapping);
        self.commit(next).await
    }

    /// Point one answer of an existing mapping at a different element.
    pub async fn update_mapping(
        &mut self,
        question_id: u32,
        answer: AnswerValue,
        element: Element,
    ) -> Result<()> {
        if !(1..=4).contains(&answer) {
            return Err(CoreError::InvalidAnswer(answer).into());
        }
        let mut next = self.snapshot.clone();
        let mapping = next
            .mappings
            .iter_mut()
            .find(|m| m.question_id == question_id)
            .ok_or(CoreError::MappingNotFound(question_id))?;
        mapping.answers.insert(answer, element);
        self.commit(next).await
    }

    /// Remove the mapping for a question.
    pub async fn remove_mapping(&mut self, question_id: u32) -> Result<()> {
        if self.snapshot.mapping(question_id).is_none() {
            return Err(CoreError::MappingNotFound(question_id).into());
        }
        let mut next = self.snapshot.clone();
        next.mappings.retain(|m| m.question_id != question_id);
        self.commit(next).await
    }

    /// Remove all mappings.
    pub async fn reset_mappings(&mut self) -> Result<()> {
        let mut next = self.snapshot.clone();
        next.mappings.clear();
        self.commit(next).await
    }

    // ── Archetypes ──────────────────────────────────────────────

    /// Add an archetype. Returns its ID.
    pub async fn add_archetype(&mut self, archetype: Archetype) -> Result<String> {
        validate_archetype(&archetype)?;
        let id = archetype.id.clone();
        let mut next = self.snapshot.clone();
        next.archetypes.push(archetype);
        self.commit(next).await?;
        Ok(id)
    }

    /// Replace an existing archetype, matched by ID.
    pub async fn update_archetype(&mut self, archetype: Archetype) -> Result<()> {
        validate_archetype(&archetype)?;
        let mut next = self.snapshot.clone();
        let slot = next
            .archetypes
            .iter_mut()
            .find(|a| a.id == archetype.id)
            .ok_or_else(|| CoreError::ArchetypeNotFound(archetype.id.clone()))?;
        *slot = archetype;
        self.commit(next).await
    }

    /// Remove an archetype by ID.
    pub async fn remove_archetype(&mut self, id: &str) -> Result<()> {
        if self.snapshot.archetype(id).is_none() {
            return Err(CoreError::ArchetypeNotFound(id.to_string()).into());
        }
        let mut next = self.snapshot.clone();
        next.archetypes.retain(|a| a.id != id);
        self.commit(next).await
    }

    /// Remove all archetypes.
    pub async fn reset_archetypes(&mut self) -> Result<()> {
        let mut next = self.snapshot.clone();
        next.archetypes.clear();
        self.commit(next).await
    }

    // ── Settings & bulk ─────────────────────────────────────────

    /// Replace the run settings. The threshold is clamped to 1-100.
    pub async fn set_settings(&mut self, settings: AppSettings) -> Result<()> {
        let mut next = self.snapshot.clone();
        next.settings = settings.with_threshold(settings.concentration_threshold);
        self.commit(next).await
    }

    /// Replace the whole snapshot after validating its mappings and archetypes.
    ///
    /// Imported settings go through the same threshold clamp as `set_settings`.
    pub async fn replace_snapshot(&mut self, mut snapshot: Snapshot) -> Result<()> {
        let mut seen = std::collections::HashSet::new();
        for mapping in &snapshot.mappings {
            validate_mapping(mapping)?;
            if !seen.insert(mapping.question_id) {
                return Err(CoreError::DuplicateQuestion(mapping.question_id).into());
            }
        }
        for archetype in &snapshot.archetypes {
            validate_archetype(archetype)?;
        }
        let settings = snapshot.settings;
        snapshot.settings = settings.with_threshold(settings.concentration_threshold);
        self.commit(snapshot).await
    }

    async fn commit(&mut self, mut next: Snapshot) -> Result<()> {
        next.saved_at = Some(Utc::now());
        self.store.save(&next).await?;
        self.snapshot = next;
        self.recalculate();
        Ok(())
    }
}
