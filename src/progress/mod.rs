use serde::{Serialize, Deserialize};
use chrono::Duration;
use crate::badges;
use crate::brain;
use crate::config::{get_engine_config, EngineConfig};
use crate::curriculum::LessonContext;
use crate::profile::{Badge, LearningProgress, StreakData, UnitProgress, UserProfile, WEEK_DAYS};
use crate::sessions::{self, PerformanceObservation};
use crate::skills::concept::{Concept, MasteryLevel};
use crate::skills::model::{self, MasteryMap};

pub const XP_PER_LEVEL: u32 = 100;
/// Each hint removes a tenth of the XP; ten or more hints remove all of it.
pub const HINT_PENALTY_STEPS: u32 = 10;

fn ms_per_day() -> i64 {
    Duration::days(1).num_milliseconds()
}

/// Days since the epoch (UTC) for an epoch-millisecond timestamp.
pub fn day_index(timestamp_ms: i64) -> i64 {
    timestamp_ms.div_euclid(ms_per_day())
}

/// XP for one observation. Integer arithmetic throughout, truncating after
/// each factor; never less than 1.
pub fn calculate_xp(observation: &PerformanceObservation, base_xp: u32) -> u32 {
    let mut xp = base_xp;
    if observation.is_correct {
        xp = xp.saturating_mul(2);
    }
    if observation.time_spent_ms <= observation.concept.ideal_time_ms() {
        xp = xp.saturating_mul(3) / 2;
    }
    let hints = observation.hints_used.min(HINT_PENALTY_STEPS);
    xp = xp.saturating_mul(HINT_PENALTY_STEPS - hints) / HINT_PENALTY_STEPS;
    xp = xp.saturating_mul(observation.difficulty.xp_multiplier_tenths()) / 10;
    xp.max(1)
}

pub fn level_for_xp(xp_total: u32) -> u32 {
    xp_total / XP_PER_LEVEL + 1
}

/// Shift the weekly window so its last slot is `day`, zero-filling the days
/// in between. Observations older than the window's day are credited to
/// its last slot.
pub fn roll_weekly_xp(weekly_xp: &[u32], window_day: i64, day: i64) -> Vec<u32> {
    let mut window: Vec<u32> = weekly_xp.to_vec();
    window.resize(WEEK_DAYS, 0);
    if day <= window_day {
        return window;
    }
    let shift = (day - window_day).min(WEEK_DAYS as i64) as usize;
    window.drain(..shift);
    window.extend(std::iter::repeat(0).take(shift));
    window
}

/// Streak after an activity at `now` that brought today's XP to `xp_today`.
///
/// The gap is the number of whole days elapsed since the previous activity.
/// Meeting the goal credits the calendar day once: the counter grows when
/// at most one whole day has passed and restarts at 1 otherwise. Missing the
/// goal after more than a day of inactivity breaks the streak.
pub fn update_streak(streak: &StreakData, xp_today: u32, daily_goal: u32, now: i64) -> StreakData {
    let today = day_index(now);
    let gap = (now - streak.last_activity_at).div_euclid(ms_per_day());
    let mut next = streak.clone();

    if xp_today >= daily_goal {
        if streak.last_goal_day != Some(today) {
            next.current = if gap <= 1 { streak.current + 1 } else { 1 };
            next.last_goal_day = Some(today);
        }
    } else if gap > 1 {
        next.current = 0;
    }

    next.longest = next.longest.max(next.current);
    next.last_activity_at = now;
    next
}

fn update_unit_progress(
    progress: &mut LearningProgress,
    lesson: &LessonContext,
    xp: u32,
    concept_score: f32,
    now: i64,
) {
    let unit = progress
        .unit_progress
        .entry(lesson.unit_id.clone())
        .or_insert_with(|| UnitProgress::new(&lesson.unit_id, now));

    unit.xp_earned = unit.xp_earned.saturating_add(xp);
    if lesson.completes_lesson {
        unit.completed_lessons.insert(lesson.lesson_id.clone());
    }
    unit.mastery_level = MasteryLevel::from_score(concept_score);
    unit.last_accessed_at = now;
}

/// Everything that changes when one observation is recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressUpdate {
    pub profile: UserProfile,
    pub history: Vec<PerformanceObservation>,
    pub masteries: MasteryMap,
    pub xp_awarded: u32,
    pub new_badges: Vec<Badge>,
    pub recommended_topics: Vec<Concept>,
}

#[derive(Debug, Clone)]
pub struct ProgressionTracker {
    config: EngineConfig,
}

impl Default for ProgressionTracker {
    fn default() -> Self {
        Self::new(get_engine_config().clone())
    }
}

impl ProgressionTracker {
    pub fn new(config: EngineConfig) -> Self {
        ProgressionTracker { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Fold one observation into the learner's state. The inputs are left
    /// untouched; the returned update holds the new snapshots.
    pub fn record_performance(
        &self,
        profile: &UserProfile,
        history: &[PerformanceObservation],
        observation: PerformanceObservation,
        lesson: Option<&LessonContext>,
    ) -> ProgressUpdate {
        let now = observation.timestamp;
        let xp = calculate_xp(&observation, self.config.base_xp);
        let history = sessions::append(history, observation.clone());
        let masteries = model::analyze(&history);

        let mut next = profile.clone();
        let progress = &mut next.progress;

        let today = day_index(now);
        progress.weekly_xp = roll_weekly_xp(&progress.weekly_xp, progress.weekly_xp_day, today);
        progress.weekly_xp_day = progress.weekly_xp_day.max(today);
        if let Some(slot) = progress.weekly_xp.last_mut() {
            *slot = slot.saturating_add(xp);
        }

        progress.total_problems_completed += 1;
        if observation.is_correct {
            progress.correct_problems_completed += 1;
        }
        progress.accuracy_rate =
            progress.correct_problems_completed as f32 / progress.total_problems_completed as f32;

        if let Some(lesson) = lesson {
            let score = model::mastery_score(&masteries, observation.concept);
            update_unit_progress(progress, lesson, xp, score, now);
        }
        progress.mastered_concepts = model::mastered_concepts(&masteries).into_iter().collect();

        let xp_today = progress.xp_today();
        let previous_level = next.level;
        next.xp_total = next.xp_total.saturating_add(xp);
        next.level = level_for_xp(next.xp_total);
        next.streak = update_streak(&next.streak, xp_today, next.preferences.daily_goal, now);

        if next.level > previous_level {
            tracing::info!(profile = %next.id, level = next.level, "Level up");
        }

        let new_badges = badges::evaluate(&next, &history, now);
        badges::award(&mut next, &new_badges);

        let recommended_topics = brain::recommend_topics(
            &masteries,
            self.config.max_recommendations,
            now,
            self.config.stale_after_days,
        );

        tracing::debug!(
            problem_id = %observation.problem_id,
            concept = ?observation.concept,
            correct = observation.is_correct,
            xp,
            streak = next.streak.current,
            recommended = recommended_topics.len(),
            "Recorded performance"
        );

        ProgressUpdate {
            profile: next,
            history,
            masteries,
            xp_awarded: xp,
            new_badges,
            recommended_topics,
        }
    }
}
