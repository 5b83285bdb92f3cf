//! Distribution statistics over a set of matched profiles.

use serde::Serialize;

use crate::types::MatchedProfile;

/// How many participants landed on one archetype.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArchetypeShare {
    /// Archetype ID
    pub archetype_id: String,
    /// Archetype display number
    pub number: u32,
    /// Archetype display name
    pub name: Option<String>,
    /// Participants assigned
    pub count: usize,
    /// Share of all participants (0–100)
    pub percentage: f64,
}

/// Per-archetype counts for one matching run, largest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DistributionStats {
    /// Number of profiles considered
    pub total: usize,
    /// Profiles without an archetype
    pub unmatched: usize,
    /// Archetype shares sorted by descending count
    pub entries: Vec<ArchetypeShare>,
}

impl DistributionStats {
    /// Group profiles by matched archetype.
    ///
    /// Equal counts keep the order in which the archetype first appears.
    pub fn from_profiles(profiles: &[MatchedProfile]) -> Self {
        let total = profiles.len();
        let mut entries: Vec<ArchetypeShare> = Vec::new();
        let mut unmatched = 0;

        for profile in profiles {
            let Some(archetype) = &profile.matched else {
                unmatched += 1;
                continue;
            };
            match entries.iter_mut().find(|e| e.archetype_id == archetype.id) {
                Some(entry) => entry.count += 1,
                None => entries.push(ArchetypeShare {
                    archetype_id: archetype.id.clone(),
                    number: archetype.number,
                    name: archetype.name.clone(),
                    count: 1,
                    percentage: 0.0,
                }),
            }
        }

        for entry in &mut entries {
            entry.percentage = entry.count as f64 / total as f64 * 100.0;
        }
        entries.sort_by(|a, b| b.count.cmp(&a.count));

        Self {
            total,
            unmatched,
            entries,
        }
    }

    /// Percentage held by the most common archetype (0 when empty).
    pub fn concentration(&self) -> f64 {
        self.entries.first().map(|e| e.percentage).unwrap_or(0.0)
    }

    /// True when the top archetype's share exceeds `threshold` percent.
    pub fn is_high_concentration(&self, threshold: f64) -> bool {
        self.concentration() > threshold
    }
}
