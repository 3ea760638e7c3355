use rand::Rng;
use serde::{Deserialize, Serialize};
use crate::brain;
use crate::config::EngineConfig;
use crate::curriculum::{content, LearningPath, LessonContext};
use crate::error::{ErrorKind, TutorError};
use crate::problems::generator::ProblemGenerator;
use crate::problems::problem::Hint;
use crate::problems::selector;
use crate::profile::{Badge, UnitProgress, UserProfile};
use crate::progress::ProgressionTracker;
use crate::sessions::PerformanceObservation;
use crate::skills::concept::{Concept, MasteryLevel};
use crate::skills::model::{self, MasteryMap};
use crate::state::session::PracticeState;

/// Everything the UI shows for one learner. Each transition returns a new
/// snapshot; the caller decides which one to keep and persist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    pub user: UserProfile,
    pub learning_path: LearningPath,
    #[serde(default)]
    pub current_lesson: Option<LessonContext>,
    #[serde(default)]
    pub history: Vec<PerformanceObservation>,
    #[serde(default)]
    pub masteries: MasteryMap,
    #[serde(default)]
    pub recommended_practice: Vec<Concept>,
    #[serde(default)]
    pub session: PracticeState,
}

/// Result of recording an answer.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordOutcome {
    pub state: AppState,
    pub xp_awarded: u32,
    pub new_badges: Vec<Badge>,
}

impl AppState {
    /// A new learner on the default path.
    pub fn initial<R: Rng>(generator: &mut ProblemGenerator<R>, user_id: &str, now: i64) -> Self {
        Self::with_profile(UserProfile::new(user_id, now), content::default_learning_path(generator))
    }

    pub fn with_profile(user: UserProfile, learning_path: LearningPath) -> Self {
        AppState {
            user,
            learning_path,
            current_lesson: None,
            history: Vec::new(),
            masteries: MasteryMap::new(),
            recommended_practice: Vec::new(),
            session: PracticeState::Idle,
        }
    }

    /// Fold an observation into the snapshot. A completing lesson context
    /// also marks the lesson on the path and re-evaluates unit unlocking.
    pub fn record(
        &self,
        tracker: &ProgressionTracker,
        observation: PerformanceObservation,
        lesson: Option<&LessonContext>,
    ) -> RecordOutcome {
        let now = observation.timestamp;
        let update = tracker.record_performance(&self.user, &self.history, observation, lesson);

        let mut next = self.clone();
        next.user = update.profile;
        next.history = update.history;
        next.masteries = update.masteries;
        next.recommended_practice = update.recommended_topics;

        if let Some(context) = lesson.filter(|c| c.completes_lesson) {
            if let Err(err) = next.mark_lesson_completed(context, tracker.config(), now) {
                tracing::warn!(lesson = %context.lesson_id, error = %err, "Completed lesson is not on the learning path");
                next.learning_path =
                    brain::unlock_units(&next.learning_path, &next.user.progress, tracker.config().unit_unlock_ratio);
            }
        }

        RecordOutcome {
            state: next,
            xp_awarded: update.xp_awarded,
            new_badges: update.new_badges,
        }
    }

    /// Mark a lesson finished at the mastery its concept has reached, unlock
    /// what that earns, and move on to the next recommended lesson.
    pub fn complete_lesson(&self, lesson_id: &str, config: &EngineConfig, now: i64) -> Result<AppState, TutorError> {
        let context = self.learning_path.lesson_context(lesson_id)?;
        let mut next = self.clone();
        next.mark_lesson_completed(&context, config, now)?;

        next.current_lesson = brain::recommend_next_lesson(&next.learning_path, &next.user.progress)
            .and_then(|lesson| next.learning_path.lesson_context(&lesson.id).ok());
        next.session = PracticeState::Idle;
        Ok(next)
    }

    fn mark_lesson_completed(&mut self, context: &LessonContext, config: &EngineConfig, now: i64) -> Result<(), TutorError> {
        let concept = self.learning_path.find_lesson(&context.lesson_id)?.concept;
        let mastery = MasteryLevel::from_score(model::mastery_score(&self.masteries, concept));

        self.user
            .progress
            .unit_progress
            .entry(context.unit_id.clone())
            .or_insert_with(|| UnitProgress::new(&context.unit_id, now))
            .completed_lessons
            .insert(context.lesson_id.clone());

        self.learning_path =
            brain::complete_lesson(&self.learning_path, &self.user.progress, &context.lesson_id, mastery, config)?;
        Ok(())
    }

    /// Position of the problem on screen within the current lesson, with
    /// the lesson's problem count.
    fn lesson_position(&self) -> Option<(usize, usize)> {
        let context = self.current_lesson.as_ref()?;
        let lesson = self.learning_path.find_lesson(&context.lesson_id).ok()?;
        let current = self.session.current_problem()?;
        let position = lesson.problems.iter().position(|p| p.id == current.id)?;
        Some((position, lesson.problems.len()))
    }

    /// Open a lesson and show its first problem.
    pub fn start_lesson(&self, lesson_id: &str, now: i64) -> Result<AppState, TutorError> {
        let context = self.learning_path.lesson_context(lesson_id)?;
        let lesson = self.learning_path.find_lesson(lesson_id)?;
        let unit = self.learning_path.find_unit(&context.unit_id)?;
        if !unit.is_unlocked {
            return Err(TutorError::new(
                ErrorKind::InvalidInput,
                format!("Unit {} is locked", unit.id),
                "start_lesson",
            ));
        }

        let problem = lesson.problems.first().cloned().ok_or_else(|| {
            TutorError::empty_state("Lesson has no problems", "start_lesson")
                .with_context(format!("lesson: {}", lesson_id))
        })?;

        let mut next = self.clone();
        next.current_lesson = Some(context);
        next.session = PracticeState::start(problem, now);
        next.session.log_state();
        Ok(next)
    }

    /// Leave any lesson and show a practice problem for a recommended
    /// concept at the difficulty its mastery calls for.
    pub fn start_practice<R: Rng>(&self, generator: &mut ProblemGenerator<R>, now: i64) -> AppState {
        let problem = selector::pick_problem(generator, &[], &self.recommended_practice, &self.masteries);
        let mut next = self.clone();
        next.current_lesson = None;
        next.session = PracticeState::start(problem, now);
        next.session.log_state();
        next
    }

    pub fn request_hint(&self) -> Result<(AppState, Hint), TutorError> {
        let (session, hint) = self.session.request_hint()?;
        let mut next = self.clone();
        next.session = session;
        Ok((next, hint))
    }

    /// Answer the problem on screen and record the observation against the
    /// current lesson, if any. Answering a lesson's last problem completes
    /// the lesson.
    pub fn answer(&self, value: u32, tracker: &ProgressionTracker, now: i64) -> Result<RecordOutcome, TutorError> {
        let (session, observation) = self.session.select_answer(value, now)?;
        let finishes_lesson = matches!(self.lesson_position(), Some((position, count)) if position + 1 == count);
        let context = self
            .current_lesson
            .clone()
            .map(|c| if finishes_lesson { c.completing() } else { c });

        let mut outcome = self.record(tracker, observation, context.as_ref());
        outcome.state.session = session;
        outcome.state.session.log_state();
        Ok(outcome)
    }

    /// Move on. Inside a lesson this shows its next problem; past the last
    /// one the lesson is completed and the next recommended lesson opens.
    /// Outside a lesson the session goes idle.
    pub fn next_problem(&self, config: &EngineConfig, now: i64) -> Result<AppState, TutorError> {
        let mut next = self.clone();
        next.session = self.session.next_problem();

        let next = match (self.current_lesson.as_ref(), self.lesson_position()) {
            (Some(context), Some((position, count))) if position + 1 == count => {
                let completed = self.complete_lesson(&context.lesson_id, config, now)?;
                match completed.current_lesson.clone() {
                    Some(upcoming) => completed.start_lesson(&upcoming.lesson_id, now)?,
                    None => completed,
                }
            }
            (Some(context), Some((position, _))) => {
                let lesson = self.learning_path.find_lesson(&context.lesson_id)?;
                if let Some(problem) = lesson.problems.get(position + 1) {
                    next.session = PracticeState::start(problem.clone(), now);
                }
                next
            }
            _ => next,
        };
        next.session.log_state();
        Ok(next)
    }
}
