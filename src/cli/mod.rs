//! CLI module for subpick
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::utils::logging::LogFormat;

pub mod args;
pub mod commands;

/// subpick
///
/// Picks the subtitle stream to burn into a video by codec, language and
/// title keywords, and derives the indices the encoder's subtitle filter needs.
#[derive(Parser, Debug)]
#[command(name = "subpick")]
#[command(about = "subpick - find the subtitle stream to burn in")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Configuration file (default: ./subpick.toml when present)
    #[arg(long, global = true, env = "SUBPICK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Logging level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "SUBPICK_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Logging output format
    #[arg(long, global = true, value_enum)]
    pub log_format: Option<LogFormat>,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Select a subtitle stream from one file
    Select(args::SelectArgs),
    /// Plan the encoder command that burns the selected subtitles in
    Burn(args::BurnArgs),
    /// Select subtitle streams for every media file under a directory
    Batch(args::BatchArgs),
    /// Normalize a filename for safe use in encoder arguments
    Normalize(args::NormalizeArgs),
}
