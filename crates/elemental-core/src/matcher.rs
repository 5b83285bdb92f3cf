//! Archetype matching.
//!
//! Two policies share the same distance and ranking primitives:
//!
//! - [`match_normal`]: every participant gets its nearest archetype.
//! - [`match_wide`]: participants are handed out greedily, most confident
//!   first, to one of their top three archetypes while keeping each
//!   archetype under `ceil(n / archetypes) * 1.5` assignments.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::debug;

use crate::scoring::ScoreCalculator;
use crate::types::{Archetype, Element, ElementMapping, ElementScores, MatchedProfile, Participant};

/// Number of fallback candidates considered in wide mode.
pub const WIDE_CANDIDATES: usize = 3;

/// Overflow allowance above an even split in wide mode.
pub const WIDE_OVERFLOW_FACTOR: f64 = 1.5;

/// Which assignment policy to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistributionMode {
    /// Nearest archetype per participant
    #[default]
    Normal,
    /// Capacity-aware spread across each participant's top candidates
    Wide,
}

impl std::fmt::Display for DistributionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::Wide => write!(f, "wide"),
        }
    }
}

impl FromStr for DistributionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(Self::Normal),
            "wide" => Ok(Self::Wide),
            other => Err(format!("unknown distribution mode: {other}")),
        }
    }
}

/// An archetype together with its distance from a score vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedArchetype<'a> {
    /// The candidate archetype
    pub archetype: &'a Archetype,
    /// Position of the archetype in the library slice
    pub index: usize,
    /// Euclidean distance in percentage points
    pub distance: f64,
}

/// Euclidean distance between a score vector and an archetype's target.
pub fn distance(scores: &ElementScores, archetype: &Archetype) -> f64 {
    Element::ALL
        .iter()
        .map(|e| {
            let d = archetype.percentages.get(*e) - scores.get(*e);
            d * d
        })
        .sum::<f64>()
        .sqrt()
}

/// The `k` nearest archetypes, closest first.
///
/// Equal distances keep their library order.
pub fn rank<'a>(
    scores: &ElementScores,
    archetypes: &'a [Archetype],
    k: usize,
) -> Vec<RankedArchetype<'a>> {
    let mut ranked: Vec<RankedArchetype<'a>> = archetypes
        .iter()
        .enumerate()
        .map(|(index, archetype)| RankedArchetype {
            archetype,
            index,
            distance: distance(scores, archetype),
        })
        .collect();
    ranked.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    ranked.truncate(k);
    ranked
}

/// Match every participant to its nearest archetype, in input order.
pub fn match_normal(
    participants: &[Participant],
    mappings: &[ElementMapping],
    archetypes: &[Archetype],
) -> Vec<MatchedProfile> {
    let calculator = ScoreCalculator::new(mappings);
    let profiles: Vec<MatchedProfile> = participants
        .iter()
        .map(|participant| {
            let scores = calculator.calculate(participant);
            let best = rank(&scores, archetypes, 1).into_iter().next();
            build_profile(participant, scores, best)
        })
        .collect();

    debug!(
        participants = profiles.len(),
        archetypes = archetypes.len(),
        "Normal matching complete"
    );
    profiles
}

/// Match participants while spreading them across archetypes.
///
/// Output is sorted by ascending participant id.
pub fn match_wide(
    participants: &[Participant],
    mappings: &[ElementMapping],
    archetypes: &[Archetype],
) -> Vec<MatchedProfile> {
    if participants.is_empty() {
        return Vec::new();
    }

    let calculator = ScoreCalculator::new(mappings);

    if archetypes.is_empty() {
        let mut profiles: Vec<MatchedProfile> = participants
            .iter()
            .map(|p| build_profile(p, calculator.calculate(p), None))
            .collect();
        profiles.sort_by_key(|p| p.id);
        return profiles;
    }

    let pending: Vec<Pending<'_, '_>> = participants
        .iter()
        .map(|participant| {
            let scores = calculator.calculate(participant);
            let candidates = rank(&scores, archetypes, WIDE_CANDIDATES);
            Pending {
                participant,
                scores,
                candidates,
            }
        })
        .collect();

    let target_per_type = participants.len().div_ceil(archetypes.len());
    let cap = target_per_type as f64 * WIDE_OVERFLOW_FACTOR;
    let mut counts = vec![0usize; archetypes.len()];

    // Most confident first; ties keep input order.
    let mut order: Vec<usize> = (0..pending.len()).collect();
    order.sort_by(|&a, &b| pending[a].first_distance().total_cmp(&pending[b].first_distance()));

    let mut choices = vec![0usize; pending.len()];
    for idx in order {
        let candidates = &pending[idx].candidates;
        let choice = candidates
            .iter()
            .position(|c| (counts[c.index] as f64) < cap)
            .unwrap_or_else(|| least_loaded(candidates, &counts));
        counts[candidates[choice].index] += 1;
        choices[idx] = choice;
    }

    let mut profiles: Vec<MatchedProfile> = pending
        .into_iter()
        .zip(choices)
        .map(|(p, choice)| {
            let pick = p.candidates.get(choice).copied();
            build_profile(p.participant, p.scores, pick)
        })
        .collect();
    profiles.sort_by_key(|p| p.id);

    debug!(
        participants = profiles.len(),
        archetypes = archetypes.len(),
        target_per_type,
        cap,
        max_assigned = counts.iter().copied().max().unwrap_or(0),
        "Wide matching complete"
    );
    profiles
}

/// Run the matcher under the given policy.
pub fn match_profiles(
    participants: &[Participant],
    mappings: &[ElementMapping],
    archetypes: &[Archetype],
    mode: DistributionMode,
) -> Vec<MatchedProfile> {
    match mode {
        DistributionMode::Normal => match_normal(participants, mappings, archetypes),
        DistributionMode::Wide => match_wide(participants, mappings, archetypes),
    }
}

struct Pending<'p, 'a> {
    participant: &'p Participant,
    scores: ElementScores,
    candidates: Vec<RankedArchetype<'a>>,
}

impl Pending<'_, '_> {
    fn first_distance(&self) -> f64 {
        self.candidates
            .first()
            .map(|c| c.distance)
            .unwrap_or(f64::INFINITY)
    }
}

/// Candidate position with the lowest current count; the better-ranked
/// candidate wins ties.
fn least_loaded(candidates: &[RankedArchetype<'_>], counts: &[usize]) -> usize {
    let mut best = 0;
    for (i, c) in candidates.iter().enumerate().skip(1) {
        if counts[c.index] < counts[candidates[best].index] {
            best = i;
        }
    }
    best
}

fn build_profile(
    participant: &Participant,
    element_scores: ElementScores,
    choice: Option<RankedArchetype<'_>>,
) -> MatchedProfile {
    let (matched, distance) = match choice {
        Some(c) => (Some(c.archetype.clone()), c.distance),
        None => (None, f64::INFINITY),
    };
    MatchedProfile {
        id: participant.id,
        name: participant.name.clone(),
        element_scores,
        matched,
        distance,
    }
}
