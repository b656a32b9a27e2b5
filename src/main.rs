//! subpick
//!
//! Finds the subtitle stream to burn into a video and derives the indices the
//! encoder's subtitle filter needs.
//!
//! # Usage
//!
//! ```bash
//! subpick select -i "episode.mkv" --codec ass --language eng --keywords dialogue,full
//! subpick burn -i "episode.mkv" --video-codec libx265
//! subpick batch --dir ./season1 --jobs 4 --format json
//! subpick normalize --name "Episode 01 [1080p]"
//! ```

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

use subpick_cli::adapters::TomlConfigAdapter;
use subpick_cli::cli::{commands, Cli, Commands};
use subpick_cli::utils::logging::LoggingSystem;

/// Main entry point for the subpick CLI
#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config =
        TomlConfigAdapter::load(cli.config.as_deref()).context("Failed to load configuration")?;

    // Logging flags override the [logging] section
    let mut logging = config.logging.clone();
    if let Some(level) = &cli.log_level {
        logging.level = level.clone();
    }
    if let Some(format) = cli.log_format {
        logging.format = format;
    }
    LoggingSystem::new(logging)
        .initialize()
        .context("Failed to initialize logging")?;

    debug!("Effective configuration: {:?}", config);

    match cli.command {
        Commands::Select(args) => commands::select(args, &config).await,
        Commands::Burn(args) => commands::burn(args, &config).await,
        Commands::Batch(args) => commands::batch(args, &config).await,
        Commands::Normalize(args) => commands::normalize(args, &config),
    }
}
