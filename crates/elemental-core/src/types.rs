//! Core data types for element scoring.
//!
//! Participants answer questions, mappings turn answers into **elements**,
//! and archetypes describe a target mix of the four elements.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::error::Error;

/// Quiz question identifier
pub type QuestionId = u32;

/// Raw answer value (valid answers are 1–4)
pub type AnswerValue = i32;

/// Participant identifier (uniqueness is not enforced)
pub type ParticipantId = i64;

/// One of the four scoring dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    /// Fire
    Fire,
    /// Water
    Water,
    /// Air
    Air,
    /// Earth
    Earth,
}

impl Element {
    /// All elements in canonical order.
    pub const ALL: [Element; 4] = [Element::Fire, Element::Water, Element::Air, Element::Earth];
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fire => write!(f, "fire"),
            Self::Water => write!(f, "water"),
            Self::Air => write!(f, "air"),
            Self::Earth => write!(f, "earth"),
        }
    }
}

impl FromStr for Element {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fire" => Ok(Self::Fire),
            "water" => Ok(Self::Water),
            "air" => Ok(Self::Air),
            "earth" => Ok(Self::Earth),
            other => Err(Error::UnknownElement(other.to_string())),
        }
    }
}

/// A position in element space, in percentage points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementScores {
    /// Fire share
    pub fire: f64,
    /// Water share
    pub water: f64,
    /// Air share
    pub air: f64,
    /// Earth share
    pub earth: f64,
}

impl ElementScores {
    /// Build a vector from its four components.
    pub fn new(fire: f64, water: f64, air: f64, earth: f64) -> Self {
        Self {
            fire,
            water,
            air,
            earth,
        }
    }

    /// Component for a single element.
    pub fn get(&self, element: Element) -> f64 {
        match element {
            Element::Fire => self.fire,
            Element::Water => self.water,
            Element::Air => self.air,
            Element::Earth => self.earth,
        }
    }

    /// Mutable component for a single element.
    pub fn get_mut(&mut self, element: Element) -> &mut f64 {
        match element {
            Element::Fire => &mut self.fire,
            Element::Water => &mut self.water,
            Element::Air => &mut self.air,
            Element::Earth => &mut self.earth,
        }
    }

    /// Sum of all four components.
    pub fn total(&self) -> f64 {
        Element::ALL.iter().map(|e| self.get(*e)).sum()
    }

    /// True when every component is exactly zero.
    pub fn is_zero(&self) -> bool {
        Element::ALL.iter().all(|e| self.get(*e) == 0.0)
    }

    /// Components paired with their element, in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Element, f64)> + '_ {
        Element::ALL.iter().map(move |e| (*e, self.get(*e)))
    }
}

/// Maps the answers of one question to elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementMapping {
    /// Question this mapping applies to
    pub question_id: QuestionId,
    /// Answer value (1–4) to element
    pub answers: BTreeMap<AnswerValue, Element>,
}

impl ElementMapping {
    /// Create a mapping from the elements for answers 1, 2, 3 and 4.
    pub fn new(question_id: QuestionId, elements: [Element; 4]) -> Self {
        let answers = elements
            .into_iter()
            .enumerate()
            .map(|(i, e)| (i as AnswerValue + 1, e))
            .collect();
        Self {
            question_id,
            answers,
        }
    }

    /// Element for an answer, if the mapping defines one.
    pub fn element_for(&self, answer: AnswerValue) -> Option<Element> {
        self.answers.get(&answer).copied()
    }

    /// True when all four answer values resolve to an element.
    pub fn is_complete(&self) -> bool {
        (1..=4).all(|a| self.answers.contains_key(&a))
    }
}

/// A personality archetype: a named target mix of elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Archetype {
    /// Stable opaque ID (UUID), never reused
    pub id: String,
    /// Display number
    pub number: u32,
    /// Optional display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Free-text description
    #[serde(default)]
    pub description: String,
    /// Target element mix (sums to 100)
    pub percentages: ElementScores,
}

impl Archetype {
    /// Create an archetype with a fresh ID.
    pub fn new(number: u32, percentages: ElementScores) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            number,
            name: None,
            description: String::new(),
            percentages,
        }
    }

    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Human-readable label, e.g. `#3 Explorer`.
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => format!("#{} {}", self.number, name),
            None => format!("#{}", self.number),
        }
    }
}

/// One participant's raw quiz answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    /// Participant number
    pub id: ParticipantId,
    /// Optional display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Question to answer value
    #[serde(default)]
    pub answers: BTreeMap<QuestionId, AnswerValue>,
}

impl Participant {
    /// Create a participant without answers.
    pub fn new(id: ParticipantId) -> Self {
        Self {
            id,
            name: None,
            answers: BTreeMap::new(),
        }
    }

    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Record an answer.
    pub fn with_answer(mut self, question_id: QuestionId, answer: AnswerValue) -> Self {
        self.answers.insert(question_id, answer);
        self
    }
}

/// Matcher output for one participant.
///
/// `distance` is `f64::INFINITY` when no archetype was available; JSON
/// output writes that as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchedProfile {
    /// Participant number
    pub id: ParticipantId,
    /// Participant name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Computed element mix
    pub element_scores: ElementScores,
    /// Assigned archetype
    pub matched: Option<Archetype>,
    /// Euclidean distance to the assigned archetype
    pub distance: f64,
}

impl MatchedProfile {
    /// ID of the assigned archetype, if any.
    pub fn archetype_id(&self) -> Option<&str> {
        self.matched.as_ref().map(|a| a.id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_roundtrip_str() {
        for e in Element::ALL {
            assert_eq!(e.to_string().parse::<Element>().unwrap(), e);
        }
        assert_eq!(" Fire ".parse::<Element>().unwrap(), Element::Fire);
        assert!("metal".parse::<Element>().is_err());
    }

    #[test]
    fn test_scores_accessors() {
        let mut s = ElementScores::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(s.get(Element::Air), 30.0);
        *s.get_mut(Element::Fire) += 5.0;
        assert_eq!(s.fire, 15.0);
        assert_eq!(s.total(), 105.0);
        assert!(!s.is_zero());
        assert!(ElementScores::default().is_zero());
    }

    #[test]
    fn test_mapping_completeness() {
        let full = ElementMapping::new(
            6,
            [Element::Fire, Element::Water, Element::Air, Element::Earth],
        );
        assert!(full.is_complete());
        assert_eq!(full.element_for(3), Some(Element::Air));
        assert_eq!(full.element_for(5), None);

        let mut partial = full.clone();
        partial.answers.remove(&4);
        assert!(!partial.is_complete());
    }

    #[test]
    fn test_archetype_ids_are_unique() {
        let a = Archetype::new(1, ElementScores::new(25.0, 25.0, 25.0, 25.0));
        let b = Archetype::new(1, ElementScores::new(25.0, 25.0, 25.0, 25.0));
        assert_ne!(a.id, b.id);
        assert_eq!(a.label(), "#1");
        assert_eq!(a.with_name("Sage").label(), "#1 Sage");
    }

    #[test]
    fn test_participant_json_shape() {
        let json = r#"{"id": 7, "answers": {"6": 1, "7": 4}}"#;
        let p: Participant = serde_json::from_str(json).unwrap();
        assert_eq!(p.id, 7);
        assert_eq!(p.name, None);
        assert_eq!(p.answers.get(&7), Some(&4));
    }
}
