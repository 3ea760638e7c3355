use serde::{Serialize, Deserialize};
use crate::skills::concept::{Concept, DifficultyLevel};

/// One answered problem. Observations are append-only; the caller owns the
/// history and persists it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PerformanceObservation {
    pub problem_id: String,
    pub concept: Concept,
    #[serde(default)]
    pub difficulty: DifficultyLevel,
    pub is_correct: bool,
    pub time_spent_ms: u64,
    #[serde(default)]
    pub hints_used: u32,
    #[serde(default = "default_attempts")]
    pub attempts: u32,
    /// Epoch milliseconds
    pub timestamp: i64,
}

fn default_attempts() -> u32 {
    1
}

/// Answers faster than this count toward the speed badges.
pub const FAST_ANSWER_MS: u64 = 3_000;

impl PerformanceObservation {
    pub fn is_fast_correct(&self) -> bool {
        self.is_correct && self.time_spent_ms < FAST_ANSWER_MS
    }
}

/// Return a new history with `observation` appended.
pub fn append(history: &[PerformanceObservation], observation: PerformanceObservation) -> Vec<PerformanceObservation> {
    let mut next = Vec::with_capacity(history.len() + 1);
    next.extend_from_slice(history);
    next.push(observation);
    next
}

/// Fraction of correct answers among the last `n` observations, or `None`
/// when fewer than `n` exist.
pub fn recent_success_rate(history: &[PerformanceObservation], n: usize) -> Option<f32> {
    if n == 0 || history.len() < n {
        return None;
    }
    let recent = &history[history.len() - n..];
    let correct = recent.iter().filter(|o| o.is_correct).count();
    Some(correct as f32 / n as f32)
}

pub fn fast_correct_count(history: &[PerformanceObservation]) -> usize {
    history.iter().filter(|o| o.is_fast_correct()).count()
}

/// Observations for a single concept, in log order.
pub fn for_concept(history: &[PerformanceObservation], concept: Concept) -> Vec<&PerformanceObservation> {
    history.iter().filter(|o| o.concept == concept).collect()
}
