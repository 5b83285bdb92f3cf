//! Error types for elemental-core
//!
//! Matching itself never fails. These errors come from data-entry checks
//! performed before records reach the matcher.

use thiserror::Error;

/// Core error type
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Archetype failed validation
    #[error("invalid archetype: {0}")]
    InvalidArchetype(String),

    /// Element mapping does not define all four answers
    #[error("mapping for question {question_id} defines {defined} of 4 answers")]
    IncompleteMapping {
        /// Question the mapping belongs to
        question_id: u32,
        /// How many answers are defined
        defined: usize,
    },

    /// A mapping for this question already exists
    #[error("question {0} is already mapped")]
    DuplicateQuestion(u32),

    /// Archetype id not present in the library
    #[error("archetype not found: {0}")]
    ArchetypeNotFound(String),

    /// Answer value outside 1-4
    #[error("answer {0} is not one of 1-4")]
    InvalidAnswer(i32),

    /// No mapping for this question
    #[error("mapping not found for question {0}")]
    MappingNotFound(u32),

    /// Element name could not be parsed
    #[error("unknown element: {0}")]
    UnknownElement(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
