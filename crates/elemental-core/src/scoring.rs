//! Element scoring - converts raw answers into an element percentage mix.

use std::collections::HashMap;

use crate::types::{AnswerValue, ElementMapping, ElementScores, Participant, QuestionId};

const VALID_ANSWERS: std::ops::RangeInclusive<AnswerValue> = 1..=4;

/// Indexes a mapping table once so that many participants can be scored
/// without rescanning it.
pub struct ScoreCalculator<'a> {
    by_question: HashMap<QuestionId, &'a ElementMapping>,
}

impl<'a> ScoreCalculator<'a> {
    /// Index the mappings. When a question appears twice the first entry wins.
    pub fn new(mappings: &'a [ElementMapping]) -> Self {
        let mut by_question = HashMap::with_capacity(mappings.len());
        for mapping in mappings {
            by_question.entry(mapping.question_id).or_insert(mapping);
        }
        Self { by_question }
    }

    /// Score a single participant.
    ///
    /// Answers with no mapping, an out-of-range value, or an undefined
    /// element are skipped. With no valid answers all four components are 0.
    pub fn calculate(&self, participant: &Participant) -> ElementScores {
        let mut scores = ElementScores::default();
        let mut total = 0u32;

        for (question_id, answer) in &participant.answers {
            if !VALID_ANSWERS.contains(answer) {
                continue;
            }
            let Some(element) = self
                .by_question
                .get(question_id)
                .and_then(|m| m.element_for(*answer))
            else {
                continue;
            };
            *scores.get_mut(element) += 1.0;
            total += 1;
        }

        if total > 0 {
            let total = f64::from(total);
            scores.fire = scores.fire / total * 100.0;
            scores.water = scores.water / total * 100.0;
            scores.air = scores.air / total * 100.0;
            scores.earth = scores.earth / total * 100.0;
        }
        scores
    }
}

/// Score one participant against a mapping table.
pub fn compute_scores(participant: &Participant, mappings: &[ElementMapping]) -> ElementScores {
    ScoreCalculator::new(mappings).calculate(participant)
}
