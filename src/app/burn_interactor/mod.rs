// Burn interactor - Plans the burn-in of the selected subtitle stream

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use tracing::{info_span, Instrument};

use crate::app::select_interactor::{SelectInteractor, SelectRequest, SelectResponse};
use crate::domain::burn::{BurnPlan, BurnPlanner, BurnSettings};
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::naming::{FilenameNormalizer, NamingOptions, NormalizedName, EMPTY_NAME_FALLBACK};
use crate::ports::*;

/// Request to plan a subtitle burn-in for one file
#[derive(Debug, Clone)]
pub struct BurnRequest {
    pub input: PathBuf,
    pub policy: SelectionPolicy,
    pub settings: BurnSettings,
    pub naming: NamingOptions,
}

/// Planned burn-in, or the reason the file is skipped
#[derive(Debug, Clone, Serialize)]
pub struct BurnResponse {
    pub selection: SelectResponse,
    pub name: Option<NormalizedName>,
    pub plan: Option<BurnPlan>,
}

impl BurnResponse {
    pub fn is_planned(&self) -> bool {
        self.plan.is_some()
    }
}

/// Interactor for the burn planning use case
pub struct BurnInteractor {
    select_interactor: Arc<SelectInteractor>,
    log_port: Arc<dyn LogPort>,
}

impl BurnInteractor {
    /// Create new burn interactor with injected collaborators
    pub fn new(select_interactor: Arc<SelectInteractor>, log_port: Arc<dyn LogPort>) -> Self {
        Self {
            select_interactor,
            log_port,
        }
    }

    /// Select a stream, normalize the output name and plan the command
    pub async fn execute(&self, request: &BurnRequest) -> Result<BurnResponse, DomainError> {
        let selection = self
            .select_interactor
            .execute(&SelectRequest {
                input: request.input.clone(),
                policy: request.policy.clone(),
            })
            .await?;

        let span = info_span!("file", path = %request.input.display());
        self.plan_burn(request, selection).instrument(span).await
    }

    async fn plan_burn(
        &self,
        request: &BurnRequest,
        selection: SelectResponse,
    ) -> Result<BurnResponse, DomainError> {
        let log = &self.log_port;

        let Some(subtitle) = selection.selection.clone() else {
            log.info("No subtitle selected, nothing to burn").await;
            return Ok(BurnResponse {
                selection,
                name: None,
                plan: None,
            });
        };

        let stem = request
            .input
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| EMPTY_NAME_FALLBACK.to_string());

        log.info(&format!("Original filename: {}", stem)).await;
        let name = FilenameNormalizer::normalize(&stem, &request.naming);
        if name.fell_back() {
            log.warn("Filename became empty after normalization, using default name")
                .await;
        }
        log.info(&format!("Normalized filename: {}", name.normalized))
            .await;

        let plan = BurnPlanner::plan(&request.input, &subtitle, &name.normalized, &request.settings);

        log.info(&format!(
            "Burning {} {} subtitles (index {}) with keyword \"{}\"",
            subtitle.codec, subtitle.language, subtitle.absolute_index, subtitle.keyword
        ))
        .await;
        log.info(&format!(
            "Using video codec: {}, audio codec: {}",
            request.settings.video_codec, request.settings.audio_codec
        ))
        .await;
        log.info(&format!("Output file: {}", plan.output_path.display()))
            .await;
        log.info(&format!("Subtitle filter: {} (using relative index)", plan.filter))
            .await;
        log.debug(&format!("FFmpeg command: {}", plan.command_line()))
            .await;

        Ok(BurnResponse {
            selection,
            name: Some(name),
            plan: Some(plan),
        })
    }
}
