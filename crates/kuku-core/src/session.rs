//! A single drill attempt: the problem sequence, the answer cursor, and the
//! append-only attempt log.

use chrono::{DateTime, Utc};

use crate::generator::correct_answer;
use crate::model::{AttemptRecord, LevelConfig, ProblemInstance};
use crate::scoring::LevelResult;

/// Answer recorded when the input holds no number.
pub const UNPARSABLE_ANSWER: i32 = -1;

/// Parse learner input leniently.
///
/// Leading whitespace and an optional sign are accepted, then the leading
/// run of digits is read and anything after it ignored. Input with no
/// digits, or that overflows, yields [`UNPARSABLE_ANSWER`].
pub fn parse_answer(raw: &str) -> i32 {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return UNPARSABLE_ANSWER;
    }

    let parsed = rest[..digits_len].parse::<i32>().ok();
    match (parsed, negative) {
        (Some(n), false) => n,
        (Some(n), true) => -n,
        (None, _) => UNPARSABLE_ANSWER,
    }
}

/// Result of grading one answer.
#[derive(Debug, Clone)]
pub struct AnswerFeedback {
    /// The record appended to the log.
    pub attempt: AttemptRecord,
    /// What the learner should have entered.
    pub correct_answer: u32,
    /// Whether this was the final problem.
    pub is_last: bool,
}

/// Owns one attempt at a level from first question to result.
#[derive(Debug)]
pub struct DrillSession {
    level: LevelConfig,
    problems: Vec<ProblemInstance>,
    attempts: Vec<AttemptRecord>,
    question_started_at: DateTime<Utc>,
}

impl DrillSession {
    /// Begin a session; the first question counts as shown now.
    pub fn new(level: LevelConfig, problems: Vec<ProblemInstance>) -> Self {
        Self::started_at(level, problems, Utc::now())
    }

    /// Begin a session with the first question shown at `now`.
    pub fn started_at(
        level: LevelConfig,
        problems: Vec<ProblemInstance>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            level,
            problems,
            attempts: Vec::new(),
            question_started_at: now,
        }
    }

    pub fn level(&self) -> &LevelConfig {
        &self.level
    }

    pub fn problems(&self) -> &[ProblemInstance] {
        &self.problems
    }

    /// The answer log, in submission order.
    pub fn attempts(&self) -> &[AttemptRecord] {
        &self.attempts
    }

    /// The problem awaiting an answer, or `None` once all are answered.
    pub fn current(&self) -> Option<&ProblemInstance> {
        self.problems.get(self.attempts.len())
    }

    /// 0-based position of the current problem.
    pub fn position(&self) -> usize {
        self.attempts.len()
    }

    pub fn total(&self) -> usize {
        self.problems.len()
    }

    pub fn is_finished(&self) -> bool {
        self.current().is_none()
    }

    /// Grade `raw` against the current problem at the current time.
    pub fn submit(&mut self, raw: &str) -> Option<AnswerFeedback> {
        self.submit_at(raw, Utc::now())
    }

    /// Grade `raw` against the current problem, answered at `now`, and
    /// advance to the next one.
    pub fn submit_at(&mut self, raw: &str, now: DateTime<Utc>) -> Option<AnswerFeedback> {
        let instance = self.current()?.clone();
        let correct_answer = correct_answer(&instance);
        let user_answer = parse_answer(raw);
        let is_correct = u32::try_from(user_answer).is_ok_and(|n| n == correct_answer);
        let time_spent = (now - self.question_started_at).num_milliseconds().max(0) as f64 / 1000.0;

        let attempt = AttemptRecord {
            problem_instance: instance,
            user_answer,
            is_correct,
            timestamp: now,
            time_spent,
        };
        self.attempts.push(attempt.clone());
        self.question_started_at = now;

        tracing::debug!(
            index = attempt.problem_instance.index,
            user_answer,
            is_correct,
            "answer recorded"
        );

        Some(AnswerFeedback {
            attempt,
            correct_answer,
            is_last: self.is_finished(),
        })
    }

    /// Close the session and score it.
    ///
    /// `total_time_spent` is in seconds; a timed-out session passes the
    /// level's target time.
    pub fn finish(self, total_time_spent: u32, timed_out: bool) -> LevelResult {
        let result = LevelResult::from_attempts(
            &self.level,
            self.problems.len(),
            self.attempts,
            total_time_spent,
            timed_out,
        );
        tracing::info!(
            level = result.level_id,
            accuracy = result.accuracy,
            passed = result.is_passed,
            "drill finished"
        );
        result
    }
}
