use crate::skills::concept::{Concept, DifficultyLevel};
use crate::skills::model::{ConceptMastery, MasteryMap};

/// Difficulty tier for the next problem of `concept`.
/// No mastery yet means BEGINNER.
pub fn select(concept: Concept, mastery: Option<&ConceptMastery>) -> DifficultyLevel {
    let mastery = match mastery {
        Some(m) => m,
        None => return DifficultyLevel::Beginner,
    };

    let score = mastery.mastery_score;
    if score >= 0.9 && mastery.average_time_ms <= concept.ideal_time_ms() {
        DifficultyLevel::Expert
    } else if score >= 0.8 {
        DifficultyLevel::Advanced
    } else if score >= 0.6 {
        DifficultyLevel::Intermediate
    } else {
        DifficultyLevel::Beginner
    }
}

pub fn select_from_map(concept: Concept, masteries: &MasteryMap) -> DifficultyLevel {
    select(concept, masteries.get(&concept))
}
