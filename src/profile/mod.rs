use serde::{Serialize, Deserialize};
use std::collections::{BTreeMap, BTreeSet};
use crate::skills::concept::{Concept, DifficultyLevel, MasteryLevel};

/// Days kept in the weekly XP window (last entry is today).
pub const WEEK_DAYS: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BadgeRarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

impl BadgeRarity {
    pub fn display_name(&self) -> &'static str {
        match self {
            BadgeRarity::Common => "Común",
            BadgeRarity::Rare => "Raro",
            BadgeRarity::Epic => "Épico",
            BadgeRarity::Legendary => "Legendario",
        }
    }
}

/// An awarded achievement. Never modified or revoked once in a profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Badge {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    /// Epoch milliseconds
    pub unlocked_at: i64,
    pub rarity: BadgeRarity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreakData {
    pub current: u32,
    pub longest: u32,
    /// Epoch milliseconds of the latest recorded activity
    pub last_activity_at: i64,
    /// Day index (days since epoch, UTC) on which the daily goal was last
    /// credited to the streak
    #[serde(default)]
    pub last_goal_day: Option<i64>,
}

impl StreakData {
    pub fn starting_at(now: i64) -> Self {
        StreakData {
            current: 0,
            longest: 0,
            last_activity_at: now,
            last_goal_day: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPreferences {
    pub audio_enabled: bool,
    pub animations_enabled: bool,
    pub difficulty: DifficultyLevel,
    /// XP target per day
    pub daily_goal: u32,
}

impl Default for UserPreferences {
    fn default() -> Self {
        UserPreferences {
            audio_enabled: true,
            animations_enabled: true,
            difficulty: DifficultyLevel::Beginner,
            daily_goal: crate::config::get_engine_config().daily_goal,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitProgress {
    pub unit_id: String,
    pub completed_lessons: BTreeSet<String>,
    pub xp_earned: u32,
    pub mastery_level: MasteryLevel,
    pub last_accessed_at: i64,
}

impl UnitProgress {
    pub fn new(unit_id: &str, now: i64) -> Self {
        UnitProgress {
            unit_id: unit_id.to_string(),
            completed_lessons: BTreeSet::new(),
            xp_earned: 0,
            mastery_level: MasteryLevel::NotStarted,
            last_accessed_at: now,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningProgress {
    pub unit_progress: BTreeMap<String, UnitProgress>,
    pub mastered_concepts: BTreeSet<Concept>,
    /// XP per day for the last seven days, oldest first
    pub weekly_xp: Vec<u32>,
    /// Day index the last `weekly_xp` entry belongs to
    #[serde(default)]
    pub weekly_xp_day: i64,
    pub total_problems_completed: u32,
    #[serde(default)]
    pub correct_problems_completed: u32,
    pub accuracy_rate: f32,
}

impl Default for LearningProgress {
    fn default() -> Self {
        LearningProgress {
            unit_progress: BTreeMap::new(),
            mastered_concepts: BTreeSet::new(),
            weekly_xp: vec![0; WEEK_DAYS],
            weekly_xp_day: 0,
            total_problems_completed: 0,
            correct_problems_completed: 0,
            accuracy_rate: 0.0,
        }
    }
}

impl LearningProgress {
    /// XP earned on the day the window currently ends at.
    pub fn xp_today(&self) -> u32 {
        self.weekly_xp.last().copied().unwrap_or(0)
    }

    pub fn is_lesson_completed(&self, unit_id: &str, lesson_id: &str) -> bool {
        self.unit_progress
            .get(unit_id)
            .map(|p| p.completed_lessons.contains(lesson_id))
            .unwrap_or(false)
    }

    pub fn completed_lesson_count(&self, unit_id: &str) -> usize {
        self.unit_progress
            .get(unit_id)
            .map(|p| p.completed_lessons.len())
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub avatar: String,
    pub xp_total: u32,
    pub level: u32,
    pub streak: StreakData,
    pub badges: Vec<Badge>,
    pub preferences: UserPreferences,
    pub progress: LearningProgress,
}

impl UserProfile {
    /// A fresh profile; `now` anchors the streak clock.
    pub fn new<S: Into<String>>(id: S, now: i64) -> Self {
        UserProfile {
            id: id.into(),
            name: "Estudiante".to_string(),
            avatar: "🦙".to_string(),
            xp_total: 0,
            level: 1,
            streak: StreakData::starting_at(now),
            badges: Vec::new(),
            preferences: UserPreferences::default(),
            progress: LearningProgress::default(),
        }
    }

    pub fn has_badge(&self, badge_id: &str) -> bool {
        self.badges.iter().any(|b| b.id == badge_id)
    }
}
