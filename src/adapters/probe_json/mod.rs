// Probe JSON adapter - Reads captured ffprobe output from disk

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use crate::adapters::probe_ffprobe::parse_ffprobe_json;
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// Suffix appended to a media path to find its sidecar capture
pub const SIDECAR_SUFFIX: &str = ".ffprobe.json";

/// Where captured probe output is read from
#[derive(Debug, Clone)]
enum Source {
    /// One capture used for every request
    Fixed(PathBuf),
    /// `<media path>.ffprobe.json` next to each media file
    Sidecar,
}

/// Probe adapter backed by `ffprobe -of json` captures
#[derive(Debug, Clone)]
pub struct ProbeJsonAdapter {
    source: Source,
}

impl ProbeJsonAdapter {
    /// Always answer with the capture at `path`
    pub fn fixed(path: impl Into<PathBuf>) -> Self {
        Self {
            source: Source::Fixed(path.into()),
        }
    }

    /// Read the sidecar capture next to each probed file
    pub fn sidecar() -> Self {
        Self {
            source: Source::Sidecar,
        }
    }

    /// Path of the capture consulted for `file_path`
    pub fn capture_path(&self, file_path: &Path) -> PathBuf {
        match &self.source {
            Source::Fixed(path) => path.clone(),
            Source::Sidecar => {
                let mut name = file_path.as_os_str().to_os_string();
                name.push(SIDECAR_SUFFIX);
                PathBuf::from(name)
            }
        }
    }
}

#[async_trait]
impl ProbePort for ProbeJsonAdapter {
    async fn probe_streams(&self, file_path: &Path) -> Result<Vec<StreamRecord>, DomainError> {
        let capture = self.capture_path(file_path);
        debug!("Reading probe capture {} for {}", capture.display(), file_path.display());

        let content = tokio::fs::read_to_string(&capture).await.map_err(|e| {
            DomainError::ProbeFail(format!(
                "Failed to read probe capture {}: {}",
                capture.display(),
                e
            ))
        })?;

        parse_ffprobe_json(&content)
    }
}
