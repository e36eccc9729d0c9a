//! Core data model types for kuku.
//!
//! These are the fundamental types the drill pipeline passes around:
//! multiplication facts, level configurations, generated problem instances,
//! and the attempt records a session appends as the learner answers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One multiplication pairing plus its phonetic reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiplicationFact {
    /// Left operand, 1 through 9.
    pub multiplicand: u32,
    /// Right operand, 1 through 9.
    pub multiplier: u32,
    /// `multiplicand * multiplier`.
    pub answer: u32,
    /// How the fact is chanted aloud.
    pub reading: Reading,
}

/// The four chanted parts of a fact, e.g. さん・し・が・じゅうに for 3 × 4.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reading {
    pub multiplicand: String,
    pub multiplier: String,
    pub equals: String,
    pub answer: String,
}

/// Inclusive range of factors a level drills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactRange {
    pub min: u32,
    pub max: u32,
}

impl FactRange {
    /// The whole table, 1 through 9.
    pub const FULL: FactRange = FactRange { min: 1, max: 9 };

    /// Returns `true` if this range is exactly `[1, 9]`.
    pub fn is_full(&self) -> bool {
        *self == Self::FULL
    }

    /// Returns `true` if `n` lies within the range.
    pub fn contains(&self, n: u32) -> bool {
        (self.min..=self.max).contains(&n)
    }
}

impl fmt::Display for FactRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

/// Static configuration for one drill level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelConfig {
    /// Level number shown to the learner.
    pub id: u32,
    /// Short title.
    pub title: String,
    /// One-line description.
    #[serde(default)]
    pub description: String,
    /// Factors drilled by this level.
    pub range: FactRange,
    /// Number of questions in one attempt.
    pub total_questions: u32,
    /// Target time for the whole attempt, in seconds.
    pub target_time: u32,
    /// Shuffle each round.
    #[serde(default)]
    pub is_random: bool,
    /// Hide an operand instead of the product on some questions.
    #[serde(default)]
    pub is_hole_question: bool,
    /// Show the chanted reading under each number.
    #[serde(default)]
    pub has_reading: bool,
}

/// What a problem asks the learner to fill in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    /// `a × b = ?`
    Normal,
    /// `? × b = c`
    MissingMultiplicand,
    /// `a × ? = c`
    MissingMultiplier,
}

impl QuestionType {
    /// Every question type, in declaration order.
    pub const ALL: [QuestionType; 3] = [
        QuestionType::Normal,
        QuestionType::MissingMultiplicand,
        QuestionType::MissingMultiplier,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::Normal => "normal",
            QuestionType::MissingMultiplicand => "missing_multiplicand",
            QuestionType::MissingMultiplier => "missing_multiplier",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for QuestionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "normal" => Ok(QuestionType::Normal),
            "missing_multiplicand" => Ok(QuestionType::MissingMultiplicand),
            "missing_multiplier" => Ok(QuestionType::MissingMultiplier),
            other => Err(format!("unknown question type: {other}")),
        }
    }
}

/// A fact as it appears at one position of a generated drill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemInstance {
    pub problem: MultiplicationFact,
    pub question_type: QuestionType,
    /// 0-based position in the whole sequence.
    pub index: usize,
    /// 1 or 2.
    pub round_number: u8,
}

/// One submitted answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttemptRecord {
    pub problem_instance: ProblemInstance,
    /// Parsed answer, or `-1` when the input was not a number.
    pub user_answer: i32,
    pub is_correct: bool,
    /// When the answer was submitted.
    pub timestamp: DateTime<Utc>,
    /// Seconds between showing the question and submitting the answer.
    pub time_spent: f64,
}
