//! The `kuku preview` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;

use kuku_core::facts::fact_table;
use kuku_core::generator::{generate_problems, problem_key};
use kuku_core::levels::find_level;

use crate::commands::play::question_text;
use crate::config::load_config_from;

pub fn execute(level_id: u32, seed: Option<u64>, levels_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(None)?;
    let levels = config.load_levels(levels_path.as_deref())?;
    let level = find_level(&levels, level_id)
        .with_context(|| format!("level {level_id} not found"))?;

    let mut rng = match config.resolve_seed(seed) {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let problems = generate_problems(level, fact_table(), &mut rng);

    for p in &problems {
        println!(
            "{:>3} {} {:<21} {:<12} {}",
            p.index,
            p.round_number,
            p.question_type.as_str(),
            question_text(p),
            problem_key(p.problem.multiplicand, p.problem.multiplier, p.question_type)
        );
    }
    eprintln!("{} problems", problems.len());

    Ok(())
}
