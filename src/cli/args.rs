//! Command-line argument definitions

use std::path::PathBuf;

use clap::{Args, ValueEnum};

use crate::adapters::toml_config::{BatchConfig, SelectionConfig};
use crate::domain::burn::BurnSettings;
use crate::domain::errors::DomainError;
use crate::domain::model::{parse_keyword_list, FallbackIndex, SelectionPolicy};
use crate::domain::naming::NamingOptions;

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

/// Selection policy flags; unset flags fall back to the config file
#[derive(Args, Debug, Clone, Default)]
pub struct PolicyArgs {
    /// Subtitle codec to match exactly (e.g. ass, subrip)
    #[arg(long, env = "SUBPICK_CODEC")]
    pub codec: Option<String>,

    /// Subtitle language tag to match exactly (e.g. eng, jpn)
    #[arg(long, env = "SUBPICK_LANGUAGE")]
    pub language: Option<String>,

    /// Comma-separated title keywords, highest priority first
    #[arg(long, env = "SUBPICK_KEYWORDS")]
    pub keywords: Option<String>,

    /// Position among codec/language matches to use when no keyword
    /// matches; the stream there must be untitled. -1 or "disabled" turns
    /// it off
    #[arg(long, env = "SUBPICK_FALLBACK_INDEX", allow_hyphen_values = true)]
    pub fallback_index: Option<FallbackIndex>,
}

impl PolicyArgs {
    /// Merge flags over the `[selection]` config section
    pub fn resolve(&self, config: &SelectionConfig) -> Result<SelectionPolicy, DomainError> {
        let base = config.to_policy()?;

        let codec = self.codec.as_deref().unwrap_or(base.codec());
        let language = self.language.as_deref().unwrap_or(base.language());
        let keywords = match &self.keywords {
            Some(raw) => parse_keyword_list(raw),
            None => base.keywords().to_vec(),
        };
        let fallback = self.fallback_index.unwrap_or(base.fallback_index());

        Ok(SelectionPolicy::new(codec, language)
            .with_keywords(keywords)
            .with_fallback(fallback))
    }
}

/// Where stream metadata comes from
#[derive(Args, Debug, Clone)]
pub struct ProbeArgs {
    /// Read captured `ffprobe -of json` output instead of running ffprobe
    #[arg(long)]
    pub probe_json: Option<PathBuf>,

    /// ffprobe binary to run
    #[arg(long, env = "SUBPICK_FFPROBE", default_value = "ffprobe")]
    pub ffprobe_path: String,
}

/// Filename normalization flags
#[derive(Args, Debug, Clone, Default)]
pub struct NamingArgs {
    /// Keep special characters instead of replacing them
    #[arg(long)]
    pub keep_special_chars: bool,

    /// Replace whitespace runs with the replacement character
    #[arg(long)]
    pub replace_spaces: bool,

    /// Replacement character
    #[arg(long)]
    pub replacement_char: Option<char>,
}

impl NamingArgs {
    /// Merge flags over the `[naming]` config section
    pub fn resolve(&self, config: &NamingOptions) -> NamingOptions {
        NamingOptions {
            remove_special_chars: config.remove_special_chars && !self.keep_special_chars,
            replace_spaces: config.replace_spaces || self.replace_spaces,
            replacement_char: self.replacement_char.unwrap_or(config.replacement_char),
        }
    }
}

/// Arguments for the select command
#[derive(Args, Debug)]
pub struct SelectArgs {
    /// Input media file
    #[arg(short, long)]
    pub input: PathBuf,

    #[command(flatten)]
    pub probe: ProbeArgs,

    #[command(flatten)]
    pub policy: PolicyArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Arguments for the burn command
#[derive(Args, Debug)]
pub struct BurnArgs {
    /// Input media file
    #[arg(short, long)]
    pub input: PathBuf,

    #[command(flatten)]
    pub probe: ProbeArgs,

    #[command(flatten)]
    pub policy: PolicyArgs,

    #[command(flatten)]
    pub naming: NamingArgs,

    /// Video codec for the re-encode
    #[arg(long)]
    pub video_codec: Option<String>,

    /// Audio codec (copy keeps the original)
    #[arg(long)]
    pub audio_codec: Option<String>,

    /// ffmpeg binary written into the planned command
    #[arg(long)]
    pub ffmpeg_path: Option<String>,

    /// Directory the output file is planned in
    #[arg(long)]
    pub work_dir: Option<PathBuf>,

    /// Output container (default: same as input)
    #[arg(long)]
    pub container: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl BurnArgs {
    /// Merge flags over the `[burn]` config section
    pub fn resolve_settings(&self, config: &BurnSettings) -> BurnSettings {
        BurnSettings {
            video_codec: self
                .video_codec
                .clone()
                .unwrap_or_else(|| config.video_codec.clone()),
            audio_codec: self
                .audio_codec
                .clone()
                .unwrap_or_else(|| config.audio_codec.clone()),
            ffmpeg_path: self
                .ffmpeg_path
                .clone()
                .unwrap_or_else(|| config.ffmpeg_path.clone()),
            work_dir: self.work_dir.clone().unwrap_or_else(|| config.work_dir.clone()),
            container: self.container.clone().or_else(|| config.container.clone()),
        }
    }
}

/// Arguments for the batch command
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Directory to scan recursively
    #[arg(short, long)]
    pub dir: PathBuf,

    /// Read `<file>.ffprobe.json` next to each media file instead of running ffprobe
    #[arg(long)]
    pub probe_sidecar: bool,

    /// ffprobe binary to run
    #[arg(long, env = "SUBPICK_FFPROBE", default_value = "ffprobe")]
    pub ffprobe_path: String,

    /// Comma-separated media extensions to include
    #[arg(long, value_delimiter = ',')]
    pub extensions: Option<Vec<String>>,

    /// Files processed concurrently (default: number of CPUs)
    #[arg(short, long)]
    pub jobs: Option<usize>,

    #[command(flatten)]
    pub policy: PolicyArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl BatchArgs {
    pub fn resolve_extensions(&self, config: &BatchConfig) -> Vec<String> {
        self.extensions
            .clone()
            .unwrap_or_else(|| config.extensions.clone())
    }

    pub fn resolve_jobs(&self, config: &BatchConfig) -> usize {
        self.jobs
            .or(config.jobs)
            .unwrap_or_else(num_cpus::get)
            .max(1)
    }
}

/// Arguments for the normalize command
#[derive(Args, Debug)]
pub struct NormalizeArgs {
    /// Filename stem to normalize
    #[arg(short, long)]
    pub name: String,

    #[command(flatten)]
    pub naming: NamingArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}
