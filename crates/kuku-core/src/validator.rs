//! Fact table integrity checks.
//!
//! Run at test time and by `kuku validate`; never on the drill hot path.

use crate::error::FactTableError;
use crate::facts::EQUALS_READING;
use crate::model::MultiplicationFact;

/// Facts in a complete table.
pub const EXPECTED_FACTS: usize = 81;

/// Check `facts` and return `true` only if every check passes.
///
/// The first violation is logged at error level.
pub fn validate_fact_table(facts: &[MultiplicationFact]) -> bool {
    match find_violation(facts) {
        None => true,
        Some(violation) => {
            tracing::error!(check = violation.check(), "{violation}");
            false
        }
    }
}

/// Return the first integrity violation in `facts`, if any.
///
/// Checks run in order: entry count, then each fact (product, readings,
/// equals reading, factor range), then coverage of every pair in the grid.
pub fn find_violation(facts: &[MultiplicationFact]) -> Option<FactTableError> {
    if facts.len() != EXPECTED_FACTS {
        return Some(FactTableError::WrongCount(facts.len()));
    }

    for fact in facts {
        if let Some(violation) = check_fact(fact) {
            return Some(violation);
        }
    }

    for multiplicand in 1..=9 {
        for multiplier in 1..=9 {
            let count = facts
                .iter()
                .filter(|f| f.multiplicand == multiplicand && f.multiplier == multiplier)
                .count();
            match count {
                1 => {}
                0 => {
                    return Some(FactTableError::MissingPair {
                        multiplicand,
                        multiplier,
                    })
                }
                count => {
                    return Some(FactTableError::DuplicatePair {
                        multiplicand,
                        multiplier,
                        count,
                    })
                }
            }
        }
    }

    None
}

fn check_fact(fact: &MultiplicationFact) -> Option<FactTableError> {
    let MultiplicationFact {
        multiplicand,
        multiplier,
        answer,
        reading,
    } = fact;
    let (multiplicand, multiplier) = (*multiplicand, *multiplier);

    let expected = u64::from(multiplicand) * u64::from(multiplier);
    if expected != u64::from(*answer) {
        return Some(FactTableError::InvalidProduct {
            multiplicand,
            multiplier,
            expected,
            actual: *answer,
        });
    }

    if reading.multiplicand.is_empty() || reading.multiplier.is_empty() || reading.answer.is_empty()
    {
        return Some(FactTableError::MissingReading {
            multiplicand,
            multiplier,
        });
    }

    if reading.equals != EQUALS_READING {
        return Some(FactTableError::InvalidEquals {
            multiplicand,
            multiplier,
            actual: reading.equals.clone(),
        });
    }

    if !(1..=9).contains(&multiplicand) || !(1..=9).contains(&multiplier) {
        return Some(FactTableError::OutOfRange {
            multiplicand,
            multiplier,
        });
    }

    None
}
