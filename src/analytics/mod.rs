use std::collections::BTreeMap;
use serde::{Serialize, Deserialize};
use crate::profile::UserProfile;
use crate::sessions::PerformanceObservation;
use crate::skills::concept::Concept;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ConceptSummary {
    pub attempts: usize,
    pub correct: usize,
    pub accuracy: f32,
    /// Mean difficulty rank, 0 (beginner) to 3 (expert)
    pub avg_difficulty: f32,
    pub avg_time_ms: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AnalyticsPayload {
    pub concepts: BTreeMap<Concept, ConceptSummary>,
    pub total_attempts: usize,
    pub overall_accuracy: f32,
    /// XP per day for the last seven days, oldest first
    pub weekly_xp: Vec<u32>,
    pub weekly_xp_total: u32,
}

#[derive(Default)]
struct Totals {
    attempts: usize,
    correct: usize,
    difficulty_sum: u32,
    time_sum: u64,
}

/// Read-only summary of a history for the profile screen.
pub fn summarize(history: &[PerformanceObservation], profile: &UserProfile) -> AnalyticsPayload {
    let mut totals: BTreeMap<Concept, Totals> = BTreeMap::new();

    for observation in history {
        let entry = totals.entry(observation.concept).or_default();
        entry.attempts += 1;
        if observation.is_correct {
            entry.correct += 1;
        }
        entry.difficulty_sum += observation.difficulty.rank() as u32;
        entry.time_sum = entry.time_sum.saturating_add(observation.time_spent_ms);
    }

    let concepts: BTreeMap<Concept, ConceptSummary> = totals
        .into_iter()
        .map(|(concept, t)| {
            let n = t.attempts.max(1);
            let summary = ConceptSummary {
                attempts: t.attempts,
                correct: t.correct,
                accuracy: t.correct as f32 / n as f32,
                avg_difficulty: t.difficulty_sum as f32 / n as f32,
                avg_time_ms: t.time_sum / n as u64,
            };
            (concept, summary)
        })
        .collect();

    let total_attempts = history.len();
    let total_correct = history.iter().filter(|o| o.is_correct).count();
    let overall_accuracy = if total_attempts > 0 {
        total_correct as f32 / total_attempts as f32
    } else {
        0.0
    };

    let weekly_xp = profile.progress.weekly_xp.clone();
    let weekly_xp_total = weekly_xp.iter().sum();

    AnalyticsPayload {
        concepts,
        total_attempts,
        overall_accuracy,
        weekly_xp,
        weekly_xp_total,
    }
}
