//! The 9 × 9 multiplication fact table.
//!
//! The built-in table is assembled once from the traditional chant and
//! shared process-wide. Other tables can be loaded from TOML, mainly so the
//! validator can be pointed at hand-edited data.

use std::path::Path;
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{MultiplicationFact, Reading};
use crate::traits::FactSource;

/// Chanted reading of the equals sign.
pub const EQUALS_READING: &str = "が";

/// (multiplicand, multiplier, answer) chant parts, row = multiplicand - 1,
/// column = multiplier - 1.
const CHANT: [[(&str, &str, &str); 9]; 9] = [
    [
        ("いん", "いち", "いち"),
        ("いん", "に", "に"),
        ("いん", "さん", "さん"),
        ("いん", "し", "し"),
        ("いん", "ご", "ご"),
        ("いん", "ろく", "ろく"),
        ("いん", "しち", "しち"),
        ("いん", "はち", "はち"),
        ("いん", "く", "く"),
    ],
    [
        ("に", "いち", "に"),
        ("に", "にん", "し"),
        ("に", "さん", "ろく"),
        ("に", "し", "はち"),
        ("に", "ご", "じゅう"),
        ("に", "ろく", "じゅうに"),
        ("に", "しち", "じゅうし"),
        ("に", "はち", "じゅうろく"),
        ("に", "く", "じゅうはち"),
    ],
    [
        ("さん", "いち", "さん"),
        ("さん", "に", "ろく"),
        ("さ", "ざん", "く"),
        ("さん", "し", "じゅうに"),
        ("さん", "ご", "じゅうご"),
        ("さぶ", "ろく", "じゅうはち"),
        ("さん", "しち", "にじゅういち"),
        ("さん", "ぱ", "にじゅうし"),
        ("さん", "く", "にじゅうしち"),
    ],
    [
        ("し", "いち", "し"),
        ("し", "に", "はち"),
        ("し", "さん", "じゅうに"),
        ("し", "し", "じゅうろく"),
        ("し", "ご", "にじゅう"),
        ("し", "ろく", "にじゅうし"),
        ("し", "しち", "にじゅうはち"),
        ("し", "は", "さんじゅうに"),
        ("し", "く", "さんじゅうろく"),
    ],
    [
        ("ご", "いち", "ご"),
        ("ご", "に", "じゅう"),
        ("ご", "さん", "じゅうご"),
        ("ご", "し", "にじゅう"),
        ("ご", "ご", "にじゅうご"),
        ("ご", "ろく", "さんじゅう"),
        ("ご", "しち", "さんじゅうご"),
        ("ご", "は", "しじゅう"),
        ("ごっ", "く", "しじゅうご"),
    ],
    [
        ("ろく", "いち", "ろく"),
        ("ろく", "に", "じゅうに"),
        ("ろく", "さん", "じゅうはち"),
        ("ろく", "し", "にじゅうし"),
        ("ろく", "ご", "さんじゅう"),
        ("ろく", "ろく", "さんじゅうろく"),
        ("ろく", "しち", "しじゅうに"),
        ("ろく", "は", "しじゅうはち"),
        ("ろっ", "く", "ごじゅうし"),
    ],
    [
        ("しち", "いち", "しち"),
        ("しち", "に", "じゅうし"),
        ("しち", "さん", "にじゅういち"),
        ("しち", "し", "にじゅうはち"),
        ("しち", "ご", "さんじゅうご"),
        ("しち", "ろく", "しじゅうに"),
        ("しち", "しち", "しじゅうく"),
        ("しち", "は", "ごじゅうろく"),
        ("しち", "く", "ろくじゅうさん"),
    ],
    [
        ("はち", "いち", "はち"),
        ("はち", "に", "じゅうろく"),
        ("はち", "さん", "にじゅうし"),
        ("はち", "し", "さんじゅうに"),
        ("はち", "ご", "しじゅう"),
        ("はち", "ろく", "しじゅうはち"),
        ("はち", "しち", "ごじゅうろく"),
        ("はっ", "ぱ", "ろくじゅうし"),
        ("はっ", "く", "しちじゅうに"),
    ],
    [
        ("く", "いち", "く"),
        ("く", "に", "じゅうはち"),
        ("く", "さん", "にじゅうしち"),
        ("く", "し", "さんじゅうろく"),
        ("く", "ご", "しじゅうご"),
        ("く", "ろく", "ごじゅうし"),
        ("く", "しち", "ろくじゅうさん"),
        ("く", "は", "しちじゅうに"),
        ("く", "く", "はちじゅういち"),
    ],
];

/// An owned collection of multiplication facts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactTable {
    facts: Vec<MultiplicationFact>,
}

impl FactTable {
    pub fn new(facts: Vec<MultiplicationFact>) -> Self {
        Self { facts }
    }

    /// Number of facts in the table.
    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }
}

impl FactSource for FactTable {
    fn all_facts(&self) -> &[MultiplicationFact] {
        &self.facts
    }
}

/// The built-in 81-fact table, multiplicand-major.
pub fn fact_table() -> &'static FactTable {
    static TABLE: OnceLock<FactTable> = OnceLock::new();
    TABLE.get_or_init(|| FactTable::new(build_chant_table()))
}

fn build_chant_table() -> Vec<MultiplicationFact> {
    let mut facts = Vec::with_capacity(81);
    for (row, chants) in (1u32..).zip(CHANT.iter()) {
        for (col, (multiplicand, multiplier, answer)) in (1u32..).zip(chants.iter()) {
            facts.push(MultiplicationFact {
                multiplicand: row,
                multiplier: col,
                answer: row * col,
                reading: Reading {
                    multiplicand: (*multiplicand).to_string(),
                    multiplier: (*multiplier).to_string(),
                    equals: EQUALS_READING.to_string(),
                    answer: (*answer).to_string(),
                },
            });
        }
    }
    facts
}

/// On-disk layout of a fact table file.
#[derive(Debug, Deserialize)]
struct TomlFactFile {
    #[serde(default)]
    facts: Vec<MultiplicationFact>,
}

/// Load a fact table from a TOML file of `[[facts]]` entries.
pub fn load_fact_table(path: &Path) -> Result<FactTable> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read fact table: {}", path.display()))?;

    load_fact_table_str(&content, path)
}

/// Parse a fact table from a TOML string (useful for testing).
pub fn load_fact_table_str(content: &str, source_path: &Path) -> Result<FactTable> {
    let parsed: TomlFactFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;
    Ok(FactTable::new(parsed.facts))
}
