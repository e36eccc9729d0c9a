//! Level catalog: the built-in course and TOML level files.
//!
//! A level file is a list of `[[levels]]` tables. Omitted fields default to
//! the full 1-9 range, an ordered non-hole drill, and a question count that
//! matches what the generator will produce.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::generator::ROUNDS;
use crate::model::{FactRange, LevelConfig};

/// Intermediate TOML structure for parsing level files.
#[derive(Debug, Deserialize)]
struct TomlLevelFile {
    #[serde(default)]
    levels: Vec<TomlLevel>,
}

#[derive(Debug, Deserialize)]
struct TomlLevel {
    id: u32,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    range: Option<TomlRange>,
    #[serde(default)]
    total_questions: Option<u32>,
    target_time: u32,
    #[serde(default)]
    is_random: bool,
    #[serde(default)]
    is_hole_question: bool,
    #[serde(default)]
    has_reading: bool,
}

#[derive(Debug, Deserialize)]
struct TomlRange {
    #[serde(default = "default_min")]
    min: u32,
    #[serde(default = "default_max")]
    max: u32,
}

fn default_min() -> u32 {
    FactRange::FULL.min
}

fn default_max() -> u32 {
    FactRange::FULL.max
}

/// Number of problems the generator yields for `range`.
pub fn expected_question_count(range: FactRange) -> u32 {
    let side = if range.max >= range.min {
        range.max - range.min + 1
    } else {
        0
    };
    side.saturating_mul(side).saturating_mul(u32::from(ROUNDS))
}

/// The seven standard levels, easiest first.
pub fn builtin_levels() -> Vec<LevelConfig> {
    vec![
        LevelConfig {
            has_reading: true,
            ..builtin(1, "よみかたつき", "よみかたを見ながら じゅんばんに", 600)
        },
        builtin(2, "じゅんばん", "1のだんから9のだんまで じゅんばんに", 480),
        LevelConfig {
            is_random: true,
            ..builtin(3, "ばらばら", "九九がばらばらに出てくる", 480)
        },
        LevelConfig {
            is_random: true,
            ..builtin(4, "スピード", "ばらばらの九九を はやく", 360)
        },
        LevelConfig {
            is_hole_question: true,
            ..builtin(5, "あなあき じゅんばん", "かくれた数を じゅんばんに", 540)
        },
        LevelConfig {
            is_random: true,
            is_hole_question: true,
            ..builtin(6, "あなあき ばらばら", "かくれた数を ばらばらに", 540)
        },
        LevelConfig {
            is_random: true,
            is_hole_question: true,
            ..builtin(7, "マスター", "ぜんぶのもんだいを はやく", 420)
        },
    ]
}

fn builtin(id: u32, title: &str, description: &str, target_time: u32) -> LevelConfig {
    LevelConfig {
        id,
        title: title.to_string(),
        description: description.to_string(),
        range: FactRange::FULL,
        total_questions: expected_question_count(FactRange::FULL),
        target_time,
        is_random: false,
        is_hole_question: false,
        has_reading: false,
    }
}

/// Look up a level by id.
pub fn find_level(levels: &[LevelConfig], id: u32) -> Option<&LevelConfig> {
    levels.iter().find(|l| l.id == id)
}

/// Highest level id in the catalog; passing it clears the course.
pub fn final_level(levels: &[LevelConfig]) -> Option<u32> {
    levels.iter().map(|l| l.id).max()
}

/// Parse a level file.
pub fn parse_levels(path: &Path) -> Result<Vec<LevelConfig>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read level file: {}", path.display()))?;

    parse_levels_str(&content, path)
}

/// Parse level TOML from a string. `source_path` is only used in errors.
pub fn parse_levels_str(content: &str, source_path: &Path) -> Result<Vec<LevelConfig>> {
    let parsed: TomlLevelFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    anyhow::ensure!(
        !parsed.levels.is_empty(),
        "no [[levels]] entries in {}",
        source_path.display()
    );

    let levels = parsed
        .levels
        .into_iter()
        .filter(|l| {
            if l.id == 0 {
                tracing::warn!(
                    "skipping level '{}' in {}: ids start at 1",
                    l.title,
                    source_path.display()
                );
                return false;
            }
            true
        })
        .map(|l| {
            let range = l.range.map_or(FactRange::FULL, |r| FactRange {
                min: r.min,
                max: r.max,
            });
            LevelConfig {
                id: l.id,
                title: l.title,
                description: l.description,
                range,
                total_questions: l
                    .total_questions
                    .unwrap_or_else(|| expected_question_count(range)),
                target_time: l.target_time,
                is_random: l.is_random,
                is_hole_question: l.is_hole_question,
                has_reading: l.has_reading,
            }
        })
        .collect();

    Ok(levels)
}

/// A warning from level validation.
#[derive(Debug, Clone)]
pub struct LevelWarning {
    /// The level the warning is about.
    pub level_id: u32,
    /// Warning message.
    pub message: String,
}

/// Validate a level catalog for common issues.
pub fn validate_levels(levels: &[LevelConfig]) -> Vec<LevelWarning> {
    let mut warnings = Vec::new();

    let mut seen_ids = HashSet::new();
    for level in levels {
        if !seen_ids.insert(level.id) {
            warnings.push(LevelWarning {
                level_id: level.id,
                message: format!("duplicate level ID: {}", level.id),
            });
        }
    }

    for level in levels {
        let range = level.range;
        let warn = |message: String| LevelWarning {
            level_id: level.id,
            message,
        };

        if range.min > range.max {
            warnings.push(warn(format!(
                "range {range} is empty; the drill will have no questions"
            )));
        } else if range.min < FactRange::FULL.min || range.max > FactRange::FULL.max {
            warnings.push(warn(format!("range {range} extends outside 1-9")));
        }

        let expected = expected_question_count(range);
        if level.total_questions != expected {
            warnings.push(warn(format!(
                "total_questions is {} but the drill will ask {expected}",
                level.total_questions
            )));
        }

        if level.target_time == 0 {
            warnings.push(warn("target_time is 0; the drill times out at once".into()));
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::path::PathBuf;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::facts::fact_table;
    use crate::generator::generate_problems;

    const LEVELS_TOML: &str = r#"
[[levels]]
id = 1
title = "One to three"
description = "Every fact with both factors from 1 to 3"
range = { min = 1, max = 3 }
target_time = 60

[[levels]]
id = 2
title = "Everything, shuffled"
target_time = 600
is_random = true
is_hole_question = true
"#;

    fn parse(content: &str) -> Result<Vec<LevelConfig>> {
        parse_levels_str(content, &PathBuf::from("levels.toml"))
    }

    #[test]
    fn builtin_catalog_is_clean() {
        let levels = builtin_levels();
        assert_eq!(levels.len(), 7);
        assert_eq!(
            levels.iter().map(|l| l.id).collect::<Vec<_>>(),
            (1..=7).collect::<Vec<_>>()
        );
        assert!(levels.iter().all(|l| l.total_questions == 162));
        assert!(levels[0].has_reading);
        assert!(!levels[1].is_random && levels[2].is_random);
        assert!(levels[6].is_random && levels[6].is_hole_question);
        assert!(validate_levels(&levels).is_empty());
    }

    #[test]
    fn parse_level_file() {
        let levels = parse(LEVELS_TOML).unwrap();
        assert_eq!(levels.len(), 2);

        assert_eq!(levels[0].range, FactRange { min: 1, max: 3 });
        assert_eq!(levels[0].total_questions, 18);
        assert!(!levels[0].is_random);

        assert_eq!(levels[1].range, FactRange::FULL);
        assert_eq!(levels[1].total_questions, 162);
        assert!(levels[1].is_hole_question);
        assert!(levels[1].description.is_empty());
    }

    #[test]
    fn zero_id_entries_are_skipped() {
        let toml = r#"
[[levels]]
id = 0
title = "Bad"
target_time = 10

[[levels]]
id = 4
title = "Good"
target_time = 10
"#;
        let levels = parse(toml).unwrap();
        assert_eq!(levels.len(), 1);
        assert_eq!(levels[0].id, 4);
    }

    #[test]
    fn empty_file_is_an_error() {
        assert!(parse("").is_err());
    }

    #[test]
    fn malformed_toml_is_an_error() {
        let err = parse("[[levels]]\nid = \"one\"").unwrap_err();
        assert!(format!("{err:#}").contains("levels.toml"));
    }

    #[test]
    fn find_level_by_id() {
        let levels = builtin_levels();
        assert_eq!(find_level(&levels, 4).map(|l| l.id), Some(4));
        assert!(find_level(&levels, 8).is_none());
    }

    #[test]
    fn final_level_is_highest_id() {
        assert_eq!(final_level(&builtin_levels()), Some(7));
        assert_eq!(final_level(&parse(LEVELS_TOML).unwrap()), Some(2));
        assert_eq!(final_level(&[]), None);
    }

    #[test]
    fn sub_range_level_drills_the_whole_block() {
        let levels = parse(LEVELS_TOML).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let problems = generate_problems(&levels[0], fact_table(), &mut rng);
        assert_eq!(problems.len(), levels[0].total_questions as usize);

        let pairs: BTreeSet<_> = problems
            .iter()
            .map(|p| (p.problem.multiplicand, p.problem.multiplier))
            .collect();
        let expected: BTreeSet<_> = (1..=3).flat_map(|a| (1..=3).map(move |b| (a, b))).collect();
        assert_eq!(pairs, expected);
    }

    #[test]
    fn validate_flags_problems() {
        let toml = r#"
[[levels]]
id = 1
title = "Inverted"
range = { min = 5, max = 3 }
total_questions = 0
target_time = 30

[[levels]]
id = 1
title = "Too wide"
range = { min = 0, max = 12 }
target_time = 0
"#;
        let warnings = validate_levels(&parse(toml).unwrap());
        let has = |needle: &str| warnings.iter().any(|w| w.message.contains(needle));
        assert!(has("duplicate level ID"));
        assert!(has("is empty"));
        assert!(has("outside 1-9"));
        assert!(has("target_time is 0"));
        assert!(!has("total_questions is 0"));
    }

    #[test]
    fn validate_flags_wrong_question_count() {
        let mut levels = builtin_levels();
        levels[2].total_questions = 81;
        let warnings = validate_levels(&levels);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].level_id, 3);
        assert!(warnings[0].message.contains("will ask 162"));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("levels.toml");
        std::fs::write(&path, LEVELS_TOML).unwrap();

        let levels = parse_levels(&path).unwrap();
        assert_eq!(levels.len(), 2);
        assert!(parse_levels(&dir.path().join("missing.toml")).is_err());
    }
}
