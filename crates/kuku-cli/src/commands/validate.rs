//! The `kuku validate` command.

use std::path::PathBuf;

use anyhow::Result;

use kuku_core::facts::{fact_table, load_fact_table};
use kuku_core::levels::validate_levels;
use kuku_core::traits::FactSource;
use kuku_core::validator::find_violation;

use crate::config::load_config_from;

pub fn execute(facts_path: Option<PathBuf>, levels_path: Option<PathBuf>) -> Result<()> {
    let loaded;
    let facts = match &facts_path {
        Some(path) => {
            loaded = load_fact_table(path)?;
            println!("Fact table: {} ({} facts)", path.display(), loaded.len());
            loaded.all_facts()
        }
        None => {
            println!("Fact table: built-in ({} facts)", fact_table().len());
            fact_table().all_facts()
        }
    };

    if let Some(violation) = find_violation(facts) {
        anyhow::bail!("fact table is invalid: {violation}");
    }
    println!("  OK: counts, products, readings, ranges, coverage");

    let config = load_config_from(None)?;
    let levels = config.load_levels(levels_path.as_deref())?;
    println!("Levels: {} level(s)", levels.len());

    let warnings = validate_levels(&levels);
    for w in &warnings {
        println!("  [level {}] WARNING: {}", w.level_id, w.message);
    }

    if warnings.is_empty() {
        println!("All checks passed.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
