//! Data-entry checks applied before records are stored.
//!
//! The matcher trusts its inputs; these checks keep the stored library
//! consistent.

use crate::error::{Error, Result};
use crate::types::{Archetype, ElementMapping};

/// Allowed deviation of an archetype's percentage sum from 100.
pub const PERCENTAGE_TOLERANCE: f64 = 0.01;

/// Check that an archetype has a valid number and a 100% element mix.
pub fn validate_archetype(archetype: &Archetype) -> Result<()> {
    if archetype.number < 1 {
        return Err(Error::InvalidArchetype(
            "archetype number must be at least 1".to_string(),
        ));
    }
    if let Some((element, value)) = archetype
        .percentages
        .iter()
        .find(|(_, v)| !v.is_finite() || *v < 0.0)
    {
        return Err(Error::InvalidArchetype(format!(
            "{element} percentage must be a non-negative number, got {value}"
        )));
    }
    let total = archetype.percentages.total();
    if (total - 100.0).abs() > PERCENTAGE_TOLERANCE {
        return Err(Error::InvalidArchetype(format!(
            "percentages must sum to 100, got {total}"
        )));
    }
    Ok(())
}

/// Check that a mapping resolves all four answers.
pub fn validate_mapping(mapping: &ElementMapping) -> Result<()> {
    if mapping.is_complete() {
        return Ok(());
    }
    let defined = (1..=4)
        .filter(|a| mapping.answers.contains_key(a))
        .count();
    Err(Error::IncompleteMapping {
        question_id: mapping.question_id,
        defined,
    })
}
