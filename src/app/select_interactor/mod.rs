// Select interactor - Orchestrates subtitle selection for one file or a tree

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{info_span, warn, Instrument};
use walkdir::WalkDir;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::{IndexMapper, StreamSelector};
use crate::ports::*;

/// Request to select a subtitle stream from one file
#[derive(Debug, Clone)]
pub struct SelectRequest {
    pub input: PathBuf,
    pub policy: SelectionPolicy,
}

/// Selection outcome for one file
#[derive(Debug, Clone, Serialize)]
pub struct SelectResponse {
    pub input: PathBuf,
    pub policy: SelectionPolicy,
    pub subtitle_stream_count: usize,
    pub result: SelectionResult,
    /// Present when a stream was selected
    pub selection: Option<SubtitleSelection>,
}

impl SelectResponse {
    pub fn is_matched(&self) -> bool {
        self.selection.is_some()
    }
}

/// Request to run selection over every media file below a directory
#[derive(Debug, Clone)]
pub struct BatchRequest {
    pub root: PathBuf,
    pub extensions: Vec<String>,
    pub jobs: usize,
    pub policy: SelectionPolicy,
}

/// What happened to one file in a batch
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BatchOutcome {
    Matched { selection: SubtitleSelection },
    Skipped { reason: NoMatchReason },
    Failed { error: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchEntry {
    pub input: PathBuf,
    #[serde(flatten)]
    pub outcome: BatchOutcome,
}

/// Batch results sorted by path
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub files: Vec<BatchEntry>,
    pub matched: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl BatchReport {
    fn from_entries(mut files: Vec<BatchEntry>) -> Self {
        files.sort_by(|a, b| a.input.cmp(&b.input));
        let mut report = BatchReport::default();
        for entry in &files {
            match entry.outcome {
                BatchOutcome::Matched { .. } => report.matched += 1,
                BatchOutcome::Skipped { .. } => report.skipped += 1,
                BatchOutcome::Failed { .. } => report.failed += 1,
            }
        }
        report.files = files;
        report
    }
}

/// Interactor for the subtitle selection use case
#[derive(Clone)]
pub struct SelectInteractor {
    probe_port: Arc<dyn ProbePort>,
    log_port: Arc<dyn LogPort>,
}

impl SelectInteractor {
    /// Create new select interactor with injected ports
    pub fn new(probe_port: Arc<dyn ProbePort>, log_port: Arc<dyn LogPort>) -> Self {
        Self {
            probe_port,
            log_port,
        }
    }

    /// Probe `request.input` and select a subtitle stream from it
    pub async fn execute(&self, request: &SelectRequest) -> Result<SelectResponse, DomainError> {
        let span = info_span!("file", path = %request.input.display());
        self.select_file(&request.input, &request.policy)
            .instrument(span)
            .await
    }

    async fn select_file(
        &self,
        input: &Path,
        policy: &SelectionPolicy,
    ) -> Result<SelectResponse, DomainError> {
        let log = &self.log_port;
        log.info(&format!("Analyzing subtitle streams for: {}", input.display()))
            .await;
        log.info(&format!(
            "Looking for: codec={}, language={}, keywords=\"{}\", fallbackIndex={}",
            policy.codec(),
            policy.language(),
            policy.keywords().join(", "),
            policy.fallback_index()
        ))
        .await;

        let streams = match self.probe_port.probe_streams(input).await {
            Ok(streams) => streams,
            Err(e) => {
                log.error(&format!("Error probing file: {}", e)).await;
                return Err(e);
            }
        };

        let subtitle_stream_count = streams.iter().filter(|s| s.is_subtitle()).count();
        log.info(&format!("Found {} subtitle streams in file", subtitle_stream_count))
            .await;

        let result = StreamSelector::select(&streams, policy);

        let selection = match &result {
            SelectionResult::Matched { stream, reason } => {
                let indices = IndexMapper::map_indices(&streams, stream)?;
                log.info(&format!(
                    "Found subtitle at absolute index {}, subtitle-relative index {}",
                    indices.absolute_index, indices.subtitle_relative_index
                ))
                .await;
                log.info(&format!(
                    "Selected {} {} subtitles at index {} ({})",
                    policy.codec(),
                    policy.language(),
                    indices.absolute_index,
                    reason
                ))
                .await;
                Some(SubtitleSelection::new(indices, policy, reason))
            }
            SelectionResult::NoMatch {
                reason,
                diagnostics,
            } => {
                self.log_no_match(policy, reason, diagnostics).await;
                None
            }
        };

        Ok(SelectResponse {
            input: input.to_path_buf(),
            policy: policy.clone(),
            subtitle_stream_count,
            result,
            selection,
        })
    }

    async fn log_no_match(
        &self,
        policy: &SelectionPolicy,
        reason: &NoMatchReason,
        diagnostics: &[StreamSummary],
    ) {
        let log = &self.log_port;
        log.warn(&format!(
            "No matching subtitles found (codec={}, lang={}, keywords=\"{}\", fallback={}): {}",
            policy.codec(),
            policy.language(),
            policy.keywords().join(", "),
            policy.fallback_index(),
            reason
        ))
        .await;

        if diagnostics.is_empty() {
            log.info("No subtitle streams found in file").await;
        } else {
            log.info("Available subtitle streams:").await;
            for summary in diagnostics {
                log.info(&format!("  {}", summary)).await;
            }
        }

        log.info("Skipping file due to no matching subtitles").await;
    }

    /// Run selection over every media file below `request.root`.
    ///
    /// Files are handled independently with at most `request.jobs` in
    /// flight. A probe failure is recorded for that file and never stops
    /// the batch.
    pub async fn execute_batch(&self, request: BatchRequest) -> Result<BatchReport, DomainError> {
        let files = discover_media_files(&request.root, &request.extensions).await?;
        self.log_port
            .info(&format!(
                "Found {} media files under {}",
                files.len(),
                request.root.display()
            ))
            .await;

        let semaphore = Arc::new(Semaphore::new(request.jobs.max(1)));
        let mut tasks = JoinSet::new();

        for input in files {
            let permit = Arc::clone(&semaphore)
                .acquire_owned()
                .await
                .map_err(|e| DomainError::InternalError(format!("Batch scheduler closed: {}", e)))?;
            let interactor = self.clone();
            let policy = request.policy.clone();
            let span = info_span!("file", path = %input.display());

            tasks.spawn(
                async move {
                    let _permit = permit;
                    let outcome = match interactor.select_file(&input, &policy).await {
                        Ok(SelectResponse {
                            selection: Some(selection),
                            ..
                        }) => BatchOutcome::Matched { selection },
                        Ok(SelectResponse {
                            result: SelectionResult::NoMatch { reason, .. },
                            ..
                        }) => BatchOutcome::Skipped { reason },
                        Ok(_) => BatchOutcome::Failed {
                            error: "selection matched without derived indices".to_string(),
                        },
                        Err(e) => BatchOutcome::Failed {
                            error: e.to_string(),
                        },
                    };
                    BatchEntry { input, outcome }
                }
                .instrument(span),
            );
        }

        let mut entries = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            let entry = joined
                .map_err(|e| DomainError::InternalError(format!("Batch task failed: {}", e)))?;
            entries.push(entry);
        }

        let report = BatchReport::from_entries(entries);
        self.log_port
            .info(&format!(
                "Batch finished: {} matched, {} skipped, {} failed",
                report.matched, report.skipped, report.failed
            ))
            .await;
        Ok(report)
    }
}

/// Media files below `root` whose extension is in `extensions`, sorted
pub async fn discover_media_files(
    root: &Path,
    extensions: &[String],
) -> Result<Vec<PathBuf>, DomainError> {
    if !root.is_dir() {
        return Err(DomainError::FsFail(format!(
            "Not a directory: {}",
            root.display()
        )));
    }

    let root = root.to_path_buf();
    let extensions: Vec<String> = extensions.iter().map(|e| e.to_lowercase()).collect();

    tokio::task::spawn_blocking(move || {
        let mut files: Vec<PathBuf> = WalkDir::new(&root)
            .follow_links(true)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|path| has_media_extension(path, &extensions))
            .collect();
        files.sort();
        files
    })
    .await
    .map_err(|e| DomainError::InternalError(format!("File discovery failed: {}", e)))
}

fn has_media_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| extensions.iter().any(|e| *e == ext))
}
