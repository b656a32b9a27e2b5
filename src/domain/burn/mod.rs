//! Burn-in command planning
//!
//! Turns a [`SubtitleSelection`] into the encoder argument list that
//! renders exactly one subtitle stream into the video. Nothing here
//! spawns the encoder.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::model::SubtitleSelection;

/// Container used when the input has no extension
pub const DEFAULT_CONTAINER: &str = "mkv";

/// Encoder settings for the burn-in command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BurnSettings {
    pub video_codec: String,
    pub audio_codec: String,
    pub ffmpeg_path: String,
    pub work_dir: PathBuf,
    /// Output container; `None` keeps the input's extension
    pub container: Option<String>,
}

impl Default for BurnSettings {
    fn default() -> Self {
        Self {
            video_codec: "libx265".to_string(),
            audio_codec: "copy".to_string(),
            ffmpeg_path: "ffmpeg".to_string(),
            work_dir: PathBuf::from("."),
            container: None,
        }
    }
}

/// A fully planned encoder invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BurnPlan {
    pub program: String,
    pub args: Vec<String>,
    pub output_path: PathBuf,
    pub filter: String,
}

impl BurnPlan {
    /// Render the invocation as one shell-quoted line
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .map(shell_quote)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Planner for burn-in commands
pub struct BurnPlanner;

impl BurnPlanner {
    /// Plan the burn-in of `selection` from `input` into
    /// `<work_dir>/<output_stem>.<container>`.
    pub fn plan(
        input: &Path,
        selection: &SubtitleSelection,
        output_stem: &str,
        settings: &BurnSettings,
    ) -> BurnPlan {
        let container = settings
            .container
            .clone()
            .or_else(|| {
                input
                    .extension()
                    .map(|ext| ext.to_string_lossy().to_string())
            })
            .filter(|ext| !ext.is_empty())
            .unwrap_or_else(|| DEFAULT_CONTAINER.to_string());

        let output_path = settings
            .work_dir
            .join(format!("{}.{}", output_stem, container));

        let input_str = input.to_string_lossy().to_string();
        let filter = Self::subtitle_filter(&input_str, selection.subtitle_relative_index);

        let args = vec![
            "-i".to_string(),
            input_str,
            "-vf".to_string(),
            filter.clone(),
            "-c:v".to_string(),
            settings.video_codec.clone(),
            "-c:a".to_string(),
            settings.audio_codec.clone(),
            output_path.to_string_lossy().to_string(),
        ];

        BurnPlan {
            program: settings.ffmpeg_path.clone(),
            args,
            output_path,
            filter,
        }
    }

    /// `subtitles` filter addressing one stream by its subtitle-only ordinal
    pub fn subtitle_filter(input: &str, subtitle_relative_index: usize) -> String {
        format!(
            "subtitles='{}':si={}",
            escape_filter_value(input),
            subtitle_relative_index
        )
    }
}

/// Escape a value placed inside single quotes in a filter graph
fn escape_filter_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "'\\''")
}

fn shell_quote(arg: &str) -> String {
    let safe = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:=,+@%".contains(c));
    if safe {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', "'\\''"))
    }
}
