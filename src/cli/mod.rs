pub mod common;
pub mod parser;
pub mod reader;

pub use common::*;
pub use parser::{parse_config, Settings};

use anyhow::{Context, Result};
use clap::Parser;
use reader::read_config;

use crate::model::Strategy;

/// Mirror every repository of a GitHub account into a Gitea compatible forge.
#[derive(Parser)]
#[clap(version)]
pub struct Args {
    /// Path to the YAML configuration file.
    #[clap(short, long, parse(from_os_str))]
    config: std::path::PathBuf,

    /// Override the configured strategy (mirror or clone).
    #[clap(long)]
    strategy: Option<Strategy>,

    /// Force a mirror sync when a repository already exists.
    #[clap(long)]
    sync_on_conflict: bool,

    /// Force a mirror sync of every repository once the batch is done.
    #[clap(long)]
    sync_after_batch: bool,
}

pub fn run() -> Result<Settings> {
    let args = Args::parse();

    let content = std::fs::read_to_string(&args.config)
        .with_context(|| format!("could not read file `{:?}`", &args.config))?;

    let mut config = read_config(&content)
        .with_context(|| format!("could not parse `{:?}`", &args.config))?;

    if let Some(strategy) = args.strategy {
        config.strategy = strategy;
    }
    config.sync_on_conflict |= args.sync_on_conflict;
    config.sync_after_batch |= args.sync_after_batch;

    let settings = parse_config(config, |key| std::env::var(key).ok())?;

    Ok(settings)
}
