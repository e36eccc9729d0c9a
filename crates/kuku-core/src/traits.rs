//! Core trait definitions.
//!
//! The problem generator does not own the fact table; it reads facts through
//! [`FactSource`], implemented by [`crate::facts::FactTable`] for the built-in
//! table and for tables loaded from disk.

use crate::model::{FactRange, MultiplicationFact};

// ---------------------------------------------------------------------------
// Fact source trait
// ---------------------------------------------------------------------------

/// Accessor pair over a multiplication fact table.
pub trait FactSource {
    /// Every fact in the table, in natural order.
    fn all_facts(&self) -> &[MultiplicationFact];

    /// Facts whose multiplicand and multiplier both lie in `[min, max]`,
    /// in natural order. Empty when the range selects nothing.
    fn facts_by_range(&self, min: u32, max: u32) -> Vec<MultiplicationFact> {
        let range = FactRange { min, max };
        self.all_facts()
            .iter()
            .filter(|f| range.contains(f.multiplicand) && range.contains(f.multiplier))
            .cloned()
            .collect()
    }
}

impl FactSource for [MultiplicationFact] {
    fn all_facts(&self) -> &[MultiplicationFact] {
        self
    }
}

impl FactSource for Vec<MultiplicationFact> {
    fn all_facts(&self) -> &[MultiplicationFact] {
        self
    }
}
