//! Fact table integrity errors.
//!
//! Each variant names one failed integrity check and the fact it failed on.
//! The validator logs these and reports a plain pass/fail; callers that want
//! the detail use [`crate::validator::find_violation`].

use thiserror::Error;

/// A violation found while checking a multiplication fact table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FactTableError {
    /// The table does not hold exactly 81 facts.
    #[error("expected 81 facts, but got {0}")]
    WrongCount(usize),

    /// The stored answer is not the product of the factors.
    #[error("invalid calculation: {multiplicand} × {multiplier} should be {expected}, but got {actual}")]
    InvalidProduct {
        multiplicand: u32,
        multiplier: u32,
        expected: u64,
        actual: u32,
    },

    /// One of the multiplicand, multiplier, or answer readings is empty.
    #[error("missing reading for {multiplicand} × {multiplier}")]
    MissingReading { multiplicand: u32, multiplier: u32 },

    /// The equals sign is not read as 「が」.
    #[error("invalid equals reading for {multiplicand} × {multiplier}: expected \"が\", but got \"{actual}\"")]
    InvalidEquals {
        multiplicand: u32,
        multiplier: u32,
        actual: String,
    },

    /// A factor lies outside 1 through 9.
    #[error("invalid range: {multiplicand} × {multiplier} (multiplicand and multiplier must be 1-9)")]
    OutOfRange { multiplicand: u32, multiplier: u32 },

    /// A pair from the 9 × 9 grid has no fact.
    #[error("missing problem: {multiplicand} × {multiplier}")]
    MissingPair { multiplicand: u32, multiplier: u32 },

    /// A pair from the 9 × 9 grid appears more than once.
    #[error("duplicate problem: {multiplicand} × {multiplier} appears {count} times")]
    DuplicatePair {
        multiplicand: u32,
        multiplier: u32,
        count: usize,
    },
}

impl FactTableError {
    /// Short name of the check that failed.
    pub fn check(&self) -> &'static str {
        match self {
            FactTableError::WrongCount(_) => "count",
            FactTableError::InvalidProduct { .. } => "product",
            FactTableError::MissingReading { .. } => "reading",
            FactTableError::InvalidEquals { .. } => "equals",
            FactTableError::OutOfRange { .. } => "range",
            FactTableError::MissingPair { .. } | FactTableError::DuplicatePair { .. } => {
                "coverage"
            }
        }
    }
}
