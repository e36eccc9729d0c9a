//! Problem generation for one drill attempt.
//!
//! A drill is two rounds over the level's fact subset. Randomness is always
//! supplied by the caller so a seeded `StdRng` reproduces a sequence exactly.

use rand::Rng;

use crate::model::{LevelConfig, MultiplicationFact, ProblemInstance, QuestionType};
use crate::traits::FactSource;

/// Rounds per drill attempt.
pub const ROUNDS: u8 = 2;

/// Build the ordered problem sequence for one attempt at `config`.
///
/// The result holds `ROUNDS` passes over the base subset, round 1 first,
/// with `index` running from 0 across both rounds. An empty range yields an
/// empty sequence.
pub fn generate_problems<F, R>(
    config: &LevelConfig,
    facts: &F,
    rng: &mut R,
) -> Vec<ProblemInstance>
where
    F: FactSource + ?Sized,
    R: Rng + ?Sized,
{
    let base: Vec<MultiplicationFact> = if config.range.is_full() {
        facts.all_facts().to_vec()
    } else {
        facts.facts_by_range(config.range.min, config.range.max)
    };

    let mut problems = Vec::with_capacity(base.len() * usize::from(ROUNDS));

    for round_number in 1..=ROUNDS {
        let mut round = base.clone();
        if config.is_random {
            shuffle(&mut round, rng);
        }

        for problem in round {
            let question_type = if config.is_hole_question {
                random_question_type(rng)
            } else {
                QuestionType::Normal
            };
            problems.push(ProblemInstance {
                problem,
                question_type,
                index: problems.len(),
                round_number,
            });
        }
    }

    tracing::debug!(
        level = config.id,
        base = base.len(),
        total = problems.len(),
        "generated problem sequence"
    );

    problems
}

/// Fisher–Yates shuffle in place.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

fn random_question_type<R: Rng + ?Sized>(rng: &mut R) -> QuestionType {
    QuestionType::ALL[rng.gen_range(0..QuestionType::ALL.len())]
}

/// The number the learner must enter for `instance`.
pub fn correct_answer(instance: &ProblemInstance) -> u32 {
    let problem = &instance.problem;
    match instance.question_type {
        QuestionType::Normal => problem.answer,
        QuestionType::MissingMultiplicand => problem.multiplicand,
        QuestionType::MissingMultiplier => problem.multiplier,
    }
}

/// Lookup key for a fact asked a particular way, e.g. `3_4_normal`.
pub fn problem_key(multiplicand: u32, multiplier: u32, question_type: QuestionType) -> String {
    format!("{multiplicand}_{multiplier}_{question_type}")
}
