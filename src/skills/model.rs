use serde::{Serialize, Deserialize};
use std::collections::BTreeMap;
use chrono::Duration;
use crate::sessions::PerformanceObservation;
use crate::skills::concept::Concept;

/// Weights of the composite mastery score. Fixed; changing them changes
/// every stored classification.
pub const ACCURACY_WEIGHT: f32 = 0.4;
pub const SPEED_WEIGHT: f32 = 0.2;
pub const HINT_WEIGHT: f32 = 0.2;
pub const CONSISTENCY_WEIGHT: f32 = 0.2;

pub const MAX_HINTS: f32 = 4.0;
/// Outcomes considered by the consistency score
pub const CONSISTENCY_WINDOW: usize = 5;
/// Below this many observations consistency is neutral
pub const CONSISTENCY_MIN_SAMPLES: usize = 3;
pub const NEUTRAL_CONSISTENCY: f32 = 0.5;

/// Per-concept mastery, keyed in concept order so iteration is stable.
pub type MasteryMap = BTreeMap<Concept, ConceptMastery>;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ConceptMastery {
    pub concept: Concept,
    pub total_attempts: u32,
    pub correct_attempts: u32,
    pub average_time_ms: u64,
    pub average_hints: f32,
    /// Epoch milliseconds of the latest observation
    pub last_practiced_at: i64,
    pub mastery_score: f32,
}

impl ConceptMastery {
    /// Mastery of a concept that has never been practiced.
    pub fn empty(concept: Concept) -> Self {
        ConceptMastery {
            concept,
            total_attempts: 0,
            correct_attempts: 0,
            average_time_ms: 0,
            average_hints: 0.0,
            last_practiced_at: 0,
            mastery_score: 0.0,
        }
    }

    pub fn accuracy_rate(&self) -> f32 {
        if self.total_attempts > 0 {
            self.correct_attempts as f32 / self.total_attempts as f32
        } else {
            0.0
        }
    }

    /// Milliseconds since this concept was last practiced (never negative).
    pub fn staleness_ms(&self, now: i64) -> i64 {
        (now - self.last_practiced_at).max(0)
    }

    pub fn is_stale(&self, now: i64, stale_after_days: i64) -> bool {
        self.staleness_ms(now) > Duration::days(stale_after_days).num_milliseconds()
    }

    /// Weak or forgotten concepts: score under 0.7 or idle for over a week.
    pub fn needs_review(&self, now: i64) -> bool {
        self.mastery_score < 0.7 || self.is_stale(now, 7)
    }
}

/// Recompute mastery for every concept present in `history`.
/// Always a full recomputation; nothing is carried over between calls.
pub fn analyze(history: &[PerformanceObservation]) -> MasteryMap {
    let mut grouped: BTreeMap<Concept, Vec<&PerformanceObservation>> = BTreeMap::new();
    for observation in history {
        grouped.entry(observation.concept).or_default().push(observation);
    }

    grouped
        .into_iter()
        .map(|(concept, observations)| (concept, analyze_concept(concept, &observations)))
        .collect()
}

/// Mastery for one concept from its observations in log order.
pub fn analyze_concept(concept: Concept, observations: &[&PerformanceObservation]) -> ConceptMastery {
    if observations.is_empty() {
        return ConceptMastery::empty(concept);
    }

    let total = observations.len();
    let correct = observations.iter().filter(|o| o.is_correct).count();
    let time_sum: u128 = observations.iter().map(|o| o.time_spent_ms as u128).sum();
    let average_time_ms = (time_sum / total as u128) as u64;
    let hint_sum: u64 = observations.iter().map(|o| o.hints_used as u64).sum();
    let average_hints = hint_sum as f32 / total as f32;
    let last_practiced_at = observations.iter().map(|o| o.timestamp).max().unwrap_or(0);

    let accuracy = correct as f32 / total as f32;
    let speed = speed_score(average_time_ms, concept);
    let hints = hint_score(average_hints);
    let consistency = consistency_score(observations);

    let mastery_score = (accuracy * ACCURACY_WEIGHT
        + speed * SPEED_WEIGHT
        + hints * HINT_WEIGHT
        + consistency * CONSISTENCY_WEIGHT)
        .clamp(0.0, 1.0);

    tracing::debug!(
        concept = ?concept,
        total,
        accuracy,
        speed,
        hints,
        consistency,
        mastery_score,
        "Concept mastery computed"
    );

    ConceptMastery {
        concept,
        total_attempts: total as u32,
        correct_attempts: correct as u32,
        average_time_ms,
        average_hints,
        last_practiced_at,
        mastery_score,
    }
}

pub fn speed_score(average_time_ms: u64, concept: Concept) -> f32 {
    let ideal = concept.ideal_time_ms();
    (ideal as f32 / average_time_ms.max(ideal) as f32).clamp(0.0, 1.0)
}

pub fn hint_score(average_hints: f32) -> f32 {
    (1.0 - average_hints / MAX_HINTS).clamp(0.0, 1.0)
}

/// `1 - stddev` of the last five correct/incorrect outcomes.
pub fn consistency_score(observations: &[&PerformanceObservation]) -> f32 {
    if observations.len() < CONSISTENCY_MIN_SAMPLES {
        return NEUTRAL_CONSISTENCY;
    }

    let start = observations.len().saturating_sub(CONSISTENCY_WINDOW);
    let outcomes: Vec<f32> = observations[start..]
        .iter()
        .map(|o| if o.is_correct { 1.0 } else { 0.0 })
        .collect();
    let n = outcomes.len() as f32;
    let mean = outcomes.iter().sum::<f32>() / n;
    let variance = outcomes.iter().map(|x| (x - mean).powi(2)).sum::<f32>() / n;

    (1.0 - variance.sqrt()).clamp(0.0, 1.0)
}

/// Score for `concept`, 0 when it has never been practiced.
pub fn mastery_score(masteries: &MasteryMap, concept: Concept) -> f32 {
    masteries.get(&concept).map(|m| m.mastery_score).unwrap_or(0.0)
}

/// Concepts currently classified as mastered.
pub fn mastered_concepts(masteries: &MasteryMap) -> Vec<Concept> {
    masteries
        .values()
        .filter(|m| m.mastery_score >= 0.9)
        .map(|m| m.concept)
        .collect()
}

/// The lowest-scoring practiced concept; ties resolve to concept order.
pub fn weakest_concept(masteries: &MasteryMap) -> Option<Concept> {
    masteries
        .values()
        .min_by(|a, b| a.mastery_score.partial_cmp(&b.mastery_score).unwrap_or(std::cmp::Ordering::Equal))
        .map(|m| m.concept)
}
