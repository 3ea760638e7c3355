use std::cmp::Ordering;
use crate::config::{get_engine_config, EngineConfig};
use crate::curriculum::{LearningPath, Lesson};
use crate::error::TutorError;
use crate::profile::LearningProgress;
use crate::skills::concept::{Concept, MasteryLevel};
use crate::skills::model::{ConceptMastery, MasteryMap};

/// Concepts scoring below this are always recommended.
pub const RECOMMEND_BELOW_SCORE: f32 = 0.8;

/// Up to `max` concepts to practice: weak (score < 0.8) or stale ones,
/// weakest first, and among equal scores the longest-idle first.
pub fn recommend_topics(
    masteries: &MasteryMap,
    max: usize,
    now: i64,
    stale_after_days: i64,
) -> Vec<Concept> {
    let mut candidates: Vec<&ConceptMastery> = masteries
        .values()
        .filter(|m| m.mastery_score < RECOMMEND_BELOW_SCORE || m.is_stale(now, stale_after_days))
        .collect();

    candidates.sort_by(|a, b| {
        a.mastery_score
            .partial_cmp(&b.mastery_score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.staleness_ms(now).cmp(&a.staleness_ms(now)))
    });

    candidates.into_iter().take(max).map(|m| m.concept).collect()
}

/// [`recommend_topics`] with the configured limits.
pub fn recommend_topics_default(masteries: &MasteryMap, now: i64) -> Vec<Concept> {
    let config = get_engine_config();
    recommend_topics(masteries, config.max_recommendations, now, config.stale_after_days)
}

/// The first lesson, in path order, of an unlocked unit that is neither
/// marked completed nor recorded as completed in the learner's progress.
pub fn recommend_next_lesson<'a>(path: &'a LearningPath, progress: &LearningProgress) -> Option<&'a Lesson> {
    path.unlocked_units()
        .flat_map(|unit| unit.lessons.iter().map(move |lesson| (unit, lesson)))
        .find(|(unit, lesson)| !lesson.is_completed && !progress.is_lesson_completed(&unit.id, &lesson.id))
        .map(|(_, lesson)| lesson)
}

/// Unlock units whose predecessor is complete enough. The first unit is
/// always unlocked and an unlocked unit stays unlocked.
pub fn unlock_units(path: &LearningPath, progress: &LearningProgress, unlock_ratio: f32) -> LearningPath {
    let mut next = path.clone();
    for index in 0..next.units.len() {
        let should_unlock = if index == 0 {
            true
        } else {
            let previous = &path.units[index - 1];
            let recorded = if previous.lessons.is_empty() {
                0.0
            } else {
                progress.completed_lesson_count(&previous.id) as f32 / previous.lessons.len() as f32
            };
            recorded.max(previous.completion_ratio()) >= unlock_ratio
        };

        let unit = &mut next.units[index];
        if should_unlock && !unit.is_unlocked {
            tracing::info!(unit = %unit.id, "Unit unlocked");
        }
        unit.is_unlocked = unit.is_unlocked || should_unlock;
    }
    next
}

/// Mark `lesson_id` completed with `mastery`, refresh its unit's completion
/// percentage, then re-evaluate unlocking.
pub fn complete_lesson(
    path: &LearningPath,
    progress: &LearningProgress,
    lesson_id: &str,
    mastery: MasteryLevel,
    config: &EngineConfig,
) -> Result<LearningPath, TutorError> {
    let mut next = path.clone();
    let unit = next
        .units
        .iter_mut()
        .find(|u| u.lessons.iter().any(|l| l.id == lesson_id))
        .ok_or_else(|| TutorError::not_found("lesson", lesson_id, "complete_lesson"))?;

    let mut lesson_xp = 0;
    for lesson in unit.lessons.iter_mut().filter(|l| l.id == lesson_id) {
        if !lesson.is_completed {
            lesson_xp = lesson.xp_value;
        }
        lesson.is_completed = true;
        lesson.mastery_level = mastery;
    }
    unit.xp_earned = unit.xp_earned.saturating_add(lesson_xp);
    unit.completion_percentage = unit.completion_ratio();

    tracing::info!(
        lesson = %lesson_id,
        unit = %unit.id,
        completion = unit.completion_percentage,
        mastery = ?mastery,
        "Lesson completed"
    );

    Ok(unlock_units(&next, progress, config.unit_unlock_ratio))
}
