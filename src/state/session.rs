use serde::{Deserialize, Serialize};
use crate::error::TutorError;
use crate::problems::problem::{Hint, Problem};
use crate::sessions::PerformanceObservation;

/// Where the learner is with the problem on screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PracticeState {
    /// No problem on screen
    Idle,
    /// Problem shown, waiting for an answer
    Answering {
        problem: Problem,
        /// Epoch milliseconds the problem was shown
        started_at: i64,
        hints_used: u32,
        /// Answers scored before this one. A problem is scored once, so this
        /// is 0 while answering and every observation reports one attempt.
        attempts: u32,
    },
    /// Answer given; feedback and explanation are shown until the next problem
    Answered {
        problem: Problem,
        selected: u32,
        observation: PerformanceObservation,
    },
}

impl Default for PracticeState {
    fn default() -> Self {
        PracticeState::Idle
    }
}

impl PracticeState {
    /// Show `problem`, discarding whatever was on screen.
    pub fn start(problem: Problem, now: i64) -> Self {
        PracticeState::Answering {
            problem,
            started_at: now,
            hints_used: 0,
            attempts: 0,
        }
    }

    pub fn current_problem(&self) -> Option<&Problem> {
        match self {
            PracticeState::Idle => None,
            PracticeState::Answering { problem, .. } | PracticeState::Answered { problem, .. } => Some(problem),
        }
    }

    pub fn is_awaiting_answer(&self) -> bool {
        matches!(self, PracticeState::Answering { .. })
    }

    /// Reveal the next hint. Once every hint is shown the last one is
    /// repeated and the counter stops growing.
    pub fn request_hint(&self) -> Result<(PracticeState, Hint), TutorError> {
        let PracticeState::Answering { problem, started_at, hints_used, attempts } = self else {
            return Err(TutorError::empty_state("No problem is awaiting an answer", "request_hint"));
        };

        let count = problem.hints.len() as u32;
        if count == 0 {
            return Err(TutorError::empty_state("Problem has no hints", "request_hint")
                .with_context(format!("problem: {}", problem.id)));
        }

        let index = (*hints_used).min(count - 1) as usize;
        let hint = problem.hints[index].clone();
        let next = PracticeState::Answering {
            problem: problem.clone(),
            started_at: *started_at,
            hints_used: (*hints_used + 1).min(count),
            attempts: *attempts,
        };

        tracing::debug!(problem = %problem.id, level = hint.level, "Hint revealed");
        Ok((next, hint))
    }

    /// Score `value` against the problem on screen and produce the
    /// observation to record. Only the first answer is scored: the state
    /// moves to `Answered` whether or not it was right, and a second answer
    /// fails with `EmptyState` until the next problem is shown.
    pub fn select_answer(&self, value: u32, now: i64) -> Result<(PracticeState, PerformanceObservation), TutorError> {
        let PracticeState::Answering { problem, started_at, hints_used, attempts } = self else {
            return Err(TutorError::empty_state("No problem is awaiting an answer", "select_answer"));
        };

        let observation = PerformanceObservation {
            problem_id: problem.id.clone(),
            concept: problem.concept,
            difficulty: problem.difficulty,
            is_correct: problem.is_correct(value),
            time_spent_ms: (now - started_at).max(0) as u64,
            hints_used: *hints_used,
            attempts: attempts + 1,
            timestamp: now,
        };

        let next = PracticeState::Answered {
            problem: problem.clone(),
            selected: value,
            observation: observation.clone(),
        };
        Ok((next, observation))
    }

    /// Leave the current problem.
    pub fn next_problem(&self) -> PracticeState {
        PracticeState::Idle
    }

    /// Trace the current state at debug level.
    pub fn log_state(&self) {
        match self {
            PracticeState::Idle => {
                tracing::debug!("[Practice] State = Idle");
            }
            PracticeState::Answering { problem, hints_used, .. } => {
                tracing::debug!(problem = %problem.id, hints_used, "[Practice] State = Answering");
            }
            PracticeState::Answered { problem, observation, .. } => {
                tracing::debug!(problem = %problem.id, correct = observation.is_correct, "[Practice] State = Answered");
            }
        }
    }
}
