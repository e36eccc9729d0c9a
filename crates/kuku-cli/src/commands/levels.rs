//! The `kuku levels` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use kuku_core::time_format::format_time;

use crate::config::load_config_from;

pub fn execute(levels_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(None)?;
    let levels = config.load_levels(levels_path.as_deref())?;

    let mut table = Table::new();
    table.set_header(vec![
        "Level", "Title", "Range", "Questions", "Target", "Order", "Holes", "Reading",
    ]);

    let yes_no = |b: bool| if b { "yes" } else { "no" };
    for level in &levels {
        table.add_row(vec![
            Cell::new(level.id),
            Cell::new(&level.title),
            Cell::new(level.range),
            Cell::new(level.total_questions),
            Cell::new(format_time(i64::from(level.target_time))),
            Cell::new(if level.is_random { "random" } else { "ordered" }),
            Cell::new(yes_no(level.is_hole_question)),
            Cell::new(yes_no(level.has_reading)),
        ]);
    }

    println!("{table}");
    Ok(())
}
