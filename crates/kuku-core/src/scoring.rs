//! Level results: accuracy, pass/fail, and the wrong-answer review list.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::generator::problem_key;
use crate::model::{AttemptRecord, LevelConfig};

/// Outcome of one drill attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelResult {
    /// Unique result identifier.
    pub id: Uuid,
    pub level_id: u32,
    /// When the attempt was scored.
    pub created_at: DateTime<Utc>,
    pub total_questions: usize,
    pub answered_questions: usize,
    pub correct_answers: usize,
    /// Rounded percentage of all questions answered correctly.
    pub accuracy: u32,
    /// Seconds taken, or the target time when the drill timed out.
    pub total_time_spent: u32,
    pub target_time: u32,
    pub is_timed_out: bool,
    pub is_passed: bool,
    /// Incorrect attempts, one per problem key, in the order first missed.
    pub wrong_answers: Vec<AttemptRecord>,
}

impl LevelResult {
    /// Score `attempts` made against a sequence of `total_questions`.
    pub fn from_attempts(
        level: &LevelConfig,
        total_questions: usize,
        attempts: Vec<AttemptRecord>,
        total_time_spent: u32,
        is_timed_out: bool,
    ) -> Self {
        let answered_questions = attempts.len();
        let correct_answers = attempts.iter().filter(|a| a.is_correct).count();
        let accuracy = accuracy_percent(correct_answers, total_questions);

        let is_passed = !is_timed_out
            && answered_questions == total_questions
            && accuracy == 100
            && total_time_spent <= level.target_time;

        let mut seen = HashSet::new();
        let wrong_answers = attempts
            .into_iter()
            .filter(|a| !a.is_correct)
            .filter(|a| {
                let p = &a.problem_instance;
                seen.insert(problem_key(
                    p.problem.multiplicand,
                    p.problem.multiplier,
                    p.question_type,
                ))
            })
            .collect();

        Self {
            id: Uuid::new_v4(),
            level_id: level.id,
            created_at: Utc::now(),
            total_questions,
            answered_questions,
            correct_answers,
            accuracy,
            total_time_spent,
            target_time: level.target_time,
            is_timed_out,
            is_passed,
            wrong_answers,
        }
    }

    /// Save the result as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize result")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write result to {}", path.display()))?;
        Ok(())
    }

    /// Load a result from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read result from {}", path.display()))?;
        let result: LevelResult =
            serde_json::from_str(&content).context("failed to parse result JSON")?;
        Ok(result)
    }

    /// Encouragement shown under the result. `final_level` is the highest
    /// level id in the catalog the drill was played from.
    pub fn summary_message(&self, final_level: u32) -> String {
        if self.is_passed {
            if self.level_id < final_level {
                format!("次のレベル{}へすすみましょう！", self.level_id + 1)
            } else {
                "すべてのレベルをクリアしました！".to_string()
            }
        } else if self.is_timed_out {
            "時間内にすべての問題を解けるように練習しよう！".to_string()
        } else if !self.wrong_answers.is_empty() {
            "間違えた問題を復習してもう一度チャレンジしよう！".to_string()
        } else {
            "タイムを縮めてもう一度チャレンジしよう！".to_string()
        }
    }
}

fn accuracy_percent(correct: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((correct as f64 / total as f64) * 100.0).round() as u32
}
