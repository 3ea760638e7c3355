use serde::{Deserialize, Serialize};
use crate::skills::concept::{Concept, DifficultyLevel, Operation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HintType {
    Conceptual,
    Visual,
    StepByStep,
    Encouragement,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hint {
    /// 1-based, increasing from generic to specific
    pub level: u32,
    pub text: String,
    pub kind: HintType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VisualType {
    CountingObjects,
    NumberLine,
    Grouping,
    Decomposition,
    VisualEquation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualElement {
    pub content: String,
    pub position: u32,
    #[serde(default)]
    pub interactive: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualAid {
    pub kind: VisualType,
    pub description: String,
    pub elements: Vec<VisualElement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplanationStep {
    pub number: u32,
    pub title: String,
    pub description: String,
    pub calculation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visual: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explanation {
    pub steps: Vec<ExplanationStep>,
    pub visual_representation: String,
    /// Full worked solution as one sentence for narration
    pub audio_script: String,
}

/// A generated multiple-choice problem. Immutable once generated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    pub id: String,
    pub operand_a: u32,
    pub operand_b: u32,
    pub operation: Operation,
    pub correct_answer: u32,
    /// Four distinct values, the correct answer exactly once
    pub options: Vec<u32>,
    pub difficulty: DifficultyLevel,
    pub concept: Concept,
    #[serde(default)]
    pub hints: Vec<Hint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visual_aid: Option<VisualAid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<Explanation>,
}

impl Problem {
    /// "3 + 4"
    pub fn statement(&self) -> String {
        format!("{} {} {}", self.operand_a, self.operation.symbol(), self.operand_b)
    }

    pub fn is_correct(&self, answer: u32) -> bool {
        answer == self.correct_answer
    }

    pub fn has_option(&self, answer: u32) -> bool {
        self.options.contains(&answer)
    }

    pub fn has_teaching_aids(&self) -> bool {
        !self.hints.is_empty() || self.visual_aid.is_some() || self.explanation.is_some()
    }
}
