//! CLI integration tests using assert_cmd.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A `kuku` command isolated from the user's config and environment.
fn kuku(dir: &Path) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("kuku").unwrap();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env_remove("KUKU_SEED")
        .env_remove("RUST_LOG");
    cmd
}

const ONES_LEVELS: &str = r#"
[[levels]]
id = 1
title = "Ones"
range = { min = 1, max = 1 }
target_time = 60
"#;

fn write_levels(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("levels.toml");
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn play_perfect_run_passes() {
    let dir = TempDir::new().unwrap();
    let levels = write_levels(&dir, ONES_LEVELS);

    kuku(dir.path())
        .args(["play", "--level", "1", "--levels"])
        .arg(&levels)
        .write_stdin("1\n1\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("[1/2] 1 × 1 = ?"))
        .stdout(predicate::str::contains("正答率: 100% (2/2問正解)"))
        .stdout(predicate::str::contains("レベル1 合格！"))
        .stdout(predicate::str::contains("すべてのレベルをクリアしました！"))
        .stdout(predicate::str::contains("次のレベル").not());
}

#[test]
fn play_points_to_next_level_in_custom_catalog() {
    let dir = TempDir::new().unwrap();
    let levels = write_levels(
        &dir,
        &format!("{ONES_LEVELS}\n[[levels]]\nid = 2\ntitle = \"All\"\ntarget_time = 600\n"),
    );

    kuku(dir.path())
        .args(["play", "--level", "1", "--levels"])
        .arg(&levels)
        .write_stdin("1\n1\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("次のレベル2へすすみましょう！"));
}

#[test]
fn play_wrong_answer_is_reported() {
    let dir = TempDir::new().unwrap();
    let levels = write_levels(&dir, ONES_LEVELS);

    kuku(dir.path())
        .args(["play", "--level", "1", "--levels"])
        .arg(&levels)
        .write_stdin("1\nabc\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("こたえは 1"))
        .stdout(predicate::str::contains("正答率: 50% (1/2問正解)"))
        .stdout(predicate::str::contains("もう少し！"))
        .stdout(predicate::str::contains("間違えた問題:"))
        .stdout(predicate::str::contains("1 × 1 = 1"));
}

#[test]
fn play_json_output() {
    let dir = TempDir::new().unwrap();
    let levels = write_levels(&dir, ONES_LEVELS);

    let output = kuku(dir.path())
        .args(["play", "--level", "1", "--format", "json", "--levels"])
        .arg(&levels)
        .write_stdin("1\n7\n")
        .output()
        .unwrap();
    assert!(output.status.success());

    let result: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result["level_id"], 1);
    assert_eq!(result["total_questions"], 2);
    assert_eq!(result["correct_answers"], 1);
    assert_eq!(result["is_passed"], false);
    assert_eq!(result["wrong_answers"].as_array().unwrap().len(), 1);
}

#[test]
fn play_quit_still_reports() {
    let dir = TempDir::new().unwrap();
    let levels = write_levels(&dir, ONES_LEVELS);

    kuku(dir.path())
        .args(["play", "--level", "1", "--levels"])
        .arg(&levels)
        .write_stdin("1\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("正答率: 50% (1/2問正解)"))
        .stdout(predicate::str::contains("もう少し！"));
}

#[test]
fn play_eof_still_reports() {
    let dir = TempDir::new().unwrap();
    let levels = write_levels(&dir, ONES_LEVELS);

    kuku(dir.path())
        .args(["play", "--level", "1", "--levels"])
        .arg(&levels)
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("正答率: 0% (0/2問正解)"));
}

#[test]
fn play_saves_result_file() {
    let dir = TempDir::new().unwrap();
    let levels = write_levels(&dir, ONES_LEVELS);
    let out = dir.path().join("results").join("run.json");

    kuku(dir.path())
        .args(["play", "--level", "1", "--levels"])
        .arg(&levels)
        .arg("--output")
        .arg(&out)
        .write_stdin("1\n1\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Result saved to"));

    let saved: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(saved["is_passed"], true);
}

#[test]
fn play_uses_config_defaults() {
    let dir = TempDir::new().unwrap();
    write_levels(
        &dir,
        r#"
[[levels]]
id = 5
title = "Two by two"
range = { min = 2, max = 2 }
target_time = 60
"#,
    );
    std::fs::write(
        dir.path().join("kuku.toml"),
        "levels_file = \"levels.toml\"\ndefault_level = 5\n",
    )
    .unwrap();

    kuku(dir.path())
        .arg("play")
        .write_stdin("4\n4\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("レベル5: Two by two"))
        .stdout(predicate::str::contains("2 × 2 = ?"))
        .stdout(predicate::str::contains("正答率: 100%"));
}

#[test]
fn play_unknown_level_fails() {
    let dir = TempDir::new().unwrap();

    kuku(dir.path())
        .args(["play", "--level", "9"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: level 9 not found"));
}

#[test]
fn play_rejects_bad_seed_env() {
    let dir = TempDir::new().unwrap();

    kuku(dir.path())
        .args(["play", "--level", "1"])
        .env("KUKU_SEED", "lots")
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("KUKU_SEED"));
}

#[test]
fn preview_is_deterministic_with_seed() {
    let dir = TempDir::new().unwrap();
    let run = || {
        kuku(dir.path())
            .args(["preview", "--level", "7", "--seed", "1234"])
            .output()
            .unwrap()
    };

    let first = run();
    let second = run();
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);

    let text = String::from_utf8(first.stdout).unwrap();
    assert_eq!(text.lines().count(), 162);
}

#[test]
fn preview_seed_from_env() {
    let dir = TempDir::new().unwrap();
    let with_flag = kuku(dir.path())
        .args(["preview", "--level", "3", "--seed", "77"])
        .output()
        .unwrap();
    let with_env = kuku(dir.path())
        .args(["preview", "--level", "3"])
        .env("KUKU_SEED", "77")
        .output()
        .unwrap();
    assert_eq!(with_flag.stdout, with_env.stdout);
}

#[test]
fn preview_ordered_level() {
    let dir = TempDir::new().unwrap();

    kuku(dir.path())
        .args(["preview", "--level", "2"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("  0 1 normal"))
        .stdout(predicate::str::contains("1 × 1 = ?"))
        .stdout(predicate::str::contains("1_1_normal"))
        .stdout(predicate::str::contains("161 2 normal"))
        .stderr(predicate::str::contains("162 problems"));
}

#[test]
fn levels_lists_builtin_catalog() {
    let dir = TempDir::new().unwrap();

    kuku(dir.path())
        .arg("levels")
        .assert()
        .success()
        .stdout(predicate::str::contains("Level"))
        .stdout(predicate::str::contains("マスター"))
        .stdout(predicate::str::contains("1-9"));
}

#[test]
fn validate_builtin_table() {
    let dir = TempDir::new().unwrap();

    kuku(dir.path())
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("built-in (81 facts)"))
        .stdout(predicate::str::contains("All checks passed."));
}

#[test]
fn validate_incomplete_fact_file_fails() {
    let dir = TempDir::new().unwrap();
    let facts = dir.path().join("facts.toml");
    std::fs::write(
        &facts,
        r#"
[[facts]]
multiplicand = 2
multiplier = 3
answer = 6

[facts.reading]
multiplicand = "に"
multiplier = "さん"
equals = "が"
answer = "ろく"
"#,
    )
    .unwrap();

    let output = kuku(dir.path())
        .arg("validate")
        .arg("--facts")
        .arg(&facts)
        .output()
        .unwrap();
    assert!(!output.status.success());

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Error: fact table is invalid: expected 81 facts, but got 1"));
    assert_eq!(stderr.matches("expected 81 facts").count(), 1, "{stderr}");
}

#[test]
fn validate_reports_level_warnings() {
    let dir = TempDir::new().unwrap();
    let levels = write_levels(
        &dir,
        r#"
[[levels]]
id = 1
title = "Miscounted"
total_questions = 10
target_time = 60
"#,
    );

    kuku(dir.path())
        .arg("validate")
        .arg("--levels")
        .arg(&levels)
        .assert()
        .success()
        .stdout(predicate::str::contains("[level 1] WARNING"))
        .stdout(predicate::str::contains("1 warning(s) found."));
}

#[test]
fn validate_nonexistent_levels_file() {
    let dir = TempDir::new().unwrap();

    kuku(dir.path())
        .args(["validate", "--levels", "nonexistent.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    kuku(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created kuku.toml"))
        .stdout(predicate::str::contains("Created levels.toml"));

    assert!(dir.path().join("kuku.toml").exists());
    assert!(dir.path().join("levels.toml").exists());

    // The starter files are usable as written.
    kuku(dir.path())
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Levels: 3 level(s)"))
        .stdout(predicate::str::contains("All checks passed."));

    // Level 1 covers every pairing of 1 to 3, not a single fact.
    kuku(dir.path())
        .args(["preview", "--level", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 × 3 = ?"))
        .stdout(predicate::str::contains("3 × 3 = ?"))
        .stderr(predicate::str::contains("18 problems"));
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    // First init
    kuku(dir.path()).arg("init").assert().success();

    // Second init should skip
    kuku(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn help_output() {
    let dir = TempDir::new().unwrap();

    kuku(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Multiplication-table drills"));
}

#[test]
fn version_output() {
    let dir = TempDir::new().unwrap();

    kuku(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("kuku"));
}
