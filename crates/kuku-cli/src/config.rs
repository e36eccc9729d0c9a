//! CLI configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use kuku_core::levels::{builtin_levels, parse_levels};
use kuku_core::model::LevelConfig;

/// Environment variable that overrides the configured seed.
pub const SEED_ENV: &str = "KUKU_SEED";

/// Top-level kuku configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KukuConfig {
    /// Custom level catalog used instead of the built-in levels.
    #[serde(default)]
    pub levels_file: Option<PathBuf>,
    /// Fixed random seed for question order.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Level played when `--level` is not given.
    #[serde(default = "default_level")]
    pub default_level: u32,
    /// Force the chanted reading on or off for every level.
    #[serde(default)]
    pub show_reading: Option<bool>,
}

fn default_level() -> u32 {
    1
}

impl Default for KukuConfig {
    fn default() -> Self {
        Self {
            levels_file: None,
            seed: None,
            default_level: default_level(),
            show_reading: None,
        }
    }
}

impl KukuConfig {
    /// The seed to use: `flag` if given, then the config value.
    pub fn resolve_seed(&self, flag: Option<u64>) -> Option<u64> {
        flag.or(self.seed)
    }

    /// Load the level catalog from `flag`, the configured file, or the
    /// built-in levels, in that order.
    pub fn load_levels(&self, flag: Option<&Path>) -> Result<Vec<LevelConfig>> {
        match flag.or(self.levels_file.as_deref()) {
            Some(path) => parse_levels(path),
            None => Ok(builtin_levels()),
        }
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `kuku.toml` in the current directory
/// 2. `~/.config/kuku/config.toml`
///
/// `KUKU_SEED` overrides the seed from either file.
pub fn load_config_from(path: Option<&Path>) -> Result<KukuConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("kuku.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<KukuConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => KukuConfig::default(),
    };

    if let Ok(raw) = std::env::var(SEED_ENV) {
        let seed = raw
            .trim()
            .parse::<u64>()
            .with_context(|| format!("{SEED_ENV} must be an unsigned integer, got '{raw}'"))?;
        config.seed = Some(seed);
    }

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("kuku"))
}
