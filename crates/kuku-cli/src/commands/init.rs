//! The `kuku init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    write_if_missing(Path::new("kuku.toml"), SAMPLE_CONFIG)?;
    write_if_missing(Path::new("levels.toml"), EXAMPLE_LEVELS)?;

    println!("\nNext steps:");
    println!("  1. Edit levels.toml to add your own drills");
    println!("  2. Run: kuku validate --levels levels.toml");
    println!("  3. Run: kuku play --level 1");

    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, content)?;
        println!("Created {}", path.display());
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# kuku configuration

# Level catalog to use instead of the built-in seven levels.
levels_file = "levels.toml"

# Level played when --level is not given.
default_level = 1

# Fix the question order (also settable with KUKU_SEED).
# seed = 42

# Force the chanted reading on or off for every level.
# show_reading = true
"#;

const EXAMPLE_LEVELS: &str = r#"# kuku level catalog

[[levels]]
id = 1
title = "1〜3 の九九"
description = "1から3どうしの九九を じゅんばんに"
range = { min = 1, max = 3 }
target_time = 60
has_reading = true

[[levels]]
id = 2
title = "2〜5 の九九 ばらばら"
description = "2から5どうしの九九を ばらばらに"
range = { min = 2, max = 5 }
target_time = 120
is_random = true

[[levels]]
id = 3
title = "ぜんぶ あなあき"
description = "九九ぜんぶ かくれた数をこたえる"
target_time = 540
is_random = true
is_hole_question = true
"#;
