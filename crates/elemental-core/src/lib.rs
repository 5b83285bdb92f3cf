//! Elemental Core - Element Scoring and Archetype Matching
//!
//! Turns quiz answers into a four-element score vector and matches each
//! participant against a library of archetypes.
//!
//! # Architecture
//!
//! ```text
//! Participant ──► ScoreCalculator ──► ElementScores
//!                  (ElementMapping)         │
//!                                       rank (top-k)
//!                                           │
//!                        ┌──────────────────┴──────────────────┐
//!                  match_normal                           match_wide
//!               (nearest archetype)              (capacity-aware greedy)
//!                        └──────────────────┬──────────────────┘
//!                                    MatchedProfile
//!                                           │
//!                                  DistributionStats
//! ```
//!
//! Everything in this crate is synchronous and free of I/O. Callers hand in
//! immutable slices and get fresh output back.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod matcher;
pub mod scoring;
pub mod settings;
pub mod stats;
pub mod types;
pub mod validation;

pub use error::{Error, Result};
pub use matcher::{
    distance, match_normal, match_profiles, match_wide, rank, DistributionMode, RankedArchetype,
    WIDE_CANDIDATES, WIDE_OVERFLOW_FACTOR,
};
pub use scoring::{compute_scores, ScoreCalculator};
pub use settings::{AppSettings, DEFAULT_CONCENTRATION_THRESHOLD};
pub use stats::{ArchetypeShare, DistributionStats};
pub use types::{
    AnswerValue, Archetype, Element, ElementMapping, ElementScores, MatchedProfile, Participant,
    ParticipantId, QuestionId,
};
pub use validation::{validate_archetype, validate_mapping, PERCENTAGE_TOLERANCE};
