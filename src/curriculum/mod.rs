pub mod content;

use serde::{Serialize, Deserialize};
use crate::error::TutorError;
use crate::problems::problem::Problem;
use crate::skills::concept::{Category, Concept, MasteryLevel};

pub const LESSON_XP: u32 = 20;
pub const UNIT_TARGET_XP: u32 = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    /// `<unit id>_lesson_<n>`
    pub id: String,
    pub title: String,
    pub concept: Concept,
    pub problems: Vec<Problem>,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub mastery_level: MasteryLevel,
    pub xp_value: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningUnit {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub lessons: Vec<Lesson>,
    #[serde(default)]
    pub is_unlocked: bool,
    /// Completed lessons / total lessons, in [0, 1]
    #[serde(default)]
    pub completion_percentage: f32,
    #[serde(default)]
    pub xp_earned: u32,
    pub target_xp: u32,
    pub category: Category,
}

impl LearningUnit {
    pub fn completed_lesson_count(&self) -> usize {
        self.lessons.iter().filter(|l| l.is_completed).count()
    }

    /// Completed fraction of this unit's lessons; 0 for a unit without lessons.
    pub fn completion_ratio(&self) -> f32 {
        if self.lessons.is_empty() {
            return 0.0;
        }
        (self.completed_lesson_count() as f32 / self.lessons.len() as f32).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningPath {
    pub units: Vec<LearningUnit>,
}

/// Where a lesson lives in the path, and whether the observation being
/// recorded finishes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonContext {
    pub unit_id: String,
    pub lesson_id: String,
    #[serde(default)]
    pub completes_lesson: bool,
}

impl LessonContext {
    pub fn completing(mut self) -> Self {
        self.completes_lesson = true;
        self
    }
}

impl LearningPath {
    pub fn find_unit(&self, unit_id: &str) -> Result<&LearningUnit, TutorError> {
        self.units
            .iter()
            .find(|u| u.id == unit_id)
            .ok_or_else(|| TutorError::not_found("unit", unit_id, "curriculum"))
    }

    pub fn find_lesson(&self, lesson_id: &str) -> Result<&Lesson, TutorError> {
        self.units
            .iter()
            .flat_map(|u| u.lessons.iter())
            .find(|l| l.id == lesson_id)
            .ok_or_else(|| TutorError::not_found("lesson", lesson_id, "curriculum"))
    }

    pub fn lesson_context(&self, lesson_id: &str) -> Result<LessonContext, TutorError> {
        self.units
            .iter()
            .find(|u| u.lessons.iter().any(|l| l.id == lesson_id))
            .map(|u| LessonContext {
                unit_id: u.id.clone(),
                lesson_id: lesson_id.to_string(),
                completes_lesson: false,
            })
            .ok_or_else(|| TutorError::not_found("lesson", lesson_id, "curriculum"))
    }

    pub fn unlocked_units(&self) -> impl Iterator<Item = &LearningUnit> {
        self.units.iter().filter(|u| u.is_unlocked)
    }
}
