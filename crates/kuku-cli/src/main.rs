//! kuku CLI: times-table drills in the terminal.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::filter::{Directive, LevelFilter};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "kuku", version, about = "Multiplication-table drills in the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// How `play` reports the final result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a timed drill
    Play {
        /// Level to play (default: from config, else 1)
        #[arg(long)]
        level: Option<u32>,

        /// Level catalog TOML (default: built-in levels)
        #[arg(long)]
        levels: Option<PathBuf>,

        /// Random seed for a reproducible question order
        #[arg(long)]
        seed: Option<u64>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Result format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Also save the result as JSON to this file
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Print the question sequence a level would generate
    Preview {
        /// Level to preview
        #[arg(long)]
        level: u32,

        /// Random seed
        #[arg(long)]
        seed: Option<u64>,

        /// Level catalog TOML (default: built-in levels)
        #[arg(long)]
        levels: Option<PathBuf>,
    },

    /// List the level catalog
    Levels {
        /// Level catalog TOML (default: built-in levels)
        #[arg(long)]
        levels: Option<PathBuf>,
    },

    /// Check a fact table and level catalog
    Validate {
        /// Fact table TOML (default: built-in table)
        #[arg(long)]
        facts: Option<PathBuf>,

        /// Level catalog TOML (default: built-in levels)
        #[arg(long)]
        levels: Option<PathBuf>,
    },

    /// Create a starter config and level catalog
    Init,
}

#[tokio::main]
async fn main() {
    let default_directive: Directive = "kuku=info"
        .parse()
        .unwrap_or_else(|_| LevelFilter::INFO.into());
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_directive),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            level,
            levels,
            seed,
            config,
            format,
            output,
        } => {
            commands::play::execute(commands::play::PlayArgs {
                level,
                levels,
                seed,
                config,
                format,
                output,
            })
            .await
        }
        Commands::Preview {
            level,
            seed,
            levels,
        } => commands::preview::execute(level, seed, levels),
        Commands::Levels { levels } => commands::levels::execute(levels),
        Commands::Validate { facts, levels } => commands::validate::execute(facts, levels),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
