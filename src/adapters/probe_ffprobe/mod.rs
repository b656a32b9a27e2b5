//! FFprobe adapter for media file probing
//!
//! Runs the `ffprobe` binary and turns its JSON stream listing into
//! [`StreamRecord`]s. The same parser backs [`ProbeJsonAdapter`], which
//! reads previously captured output instead of spawning a process.
//!
//! [`ProbeJsonAdapter`]: crate::adapters::ProbeJsonAdapter

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;
use tracing::debug;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// Entries requested from ffprobe; everything selection needs and nothing more
const SHOW_ENTRIES: &str = "stream=index,codec_type,codec_name:stream_tags=language,title";

/// ffprobe JSON output structures
#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    #[serde(default)]
    streams: Vec<FfprobeStream>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    index: usize,
    #[serde(default)]
    codec_type: Option<String>,
    #[serde(default)]
    codec_name: Option<String>,
    #[serde(default)]
    tags: HashMap<String, String>,
}

impl From<FfprobeStream> for StreamRecord {
    fn from(mut stream: FfprobeStream) -> Self {
        let codec_type = stream
            .codec_type
            .as_deref()
            .map(CodecType::from)
            .unwrap_or(CodecType::Other);
        StreamRecord {
            stream_index: stream.index,
            codec_type,
            codec_name: stream.codec_name.unwrap_or_default(),
            language: stream.tags.remove("language"),
            title: stream.tags.remove("title"),
        }
    }
}

/// Parse ffprobe `-of json` output into stream records, preserving order
pub fn parse_ffprobe_json(json: &str) -> Result<Vec<StreamRecord>, DomainError> {
    let output: FfprobeOutput = serde_json::from_str(json)
        .map_err(|e| DomainError::ProbeFail(format!("Invalid ffprobe JSON: {}", e)))?;
    Ok(output.streams.into_iter().map(StreamRecord::from).collect())
}

/// FFprobe-based probe adapter
pub struct FfprobeAdapter {
    ffprobe_path: String,
}

impl FfprobeAdapter {
    /// Create new FFprobe adapter
    pub fn new(ffprobe_path: impl Into<String>) -> Self {
        Self {
            ffprobe_path: ffprobe_path.into(),
        }
    }
}

impl Default for FfprobeAdapter {
    fn default() -> Self {
        Self::new("ffprobe")
    }
}

#[async_trait]
impl ProbePort for FfprobeAdapter {
    async fn probe_streams(&self, file_path: &Path) -> Result<Vec<StreamRecord>, DomainError> {
        debug!("Running {} on {}", self.ffprobe_path, file_path.display());

        let output = Command::new(&self.ffprobe_path)
            .args(["-v", "error", "-show_entries", SHOW_ENTRIES, "-of", "json"])
            .arg(file_path)
            .output()
            .await
            .map_err(|e| {
                DomainError::ProbeFail(format!("Failed to execute {}: {}", self.ffprobe_path, e))
            })?;

        if !output.status.success() {
            return Err(DomainError::ProbeFail(format!(
                "ffprobe failed on {}: {}",
                file_path.display(),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        parse_ffprobe_json(&String::from_utf8_lossy(&output.stdout))
    }
}
