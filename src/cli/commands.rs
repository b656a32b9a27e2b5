//! Command implementations

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::adapters::toml_config::AppConfig;
use crate::adapters::{FfprobeAdapter, ProbeJsonAdapter, TracingLogAdapter};
use crate::app::{
    AppContainer, BatchOutcome, BatchReport, BatchRequest, BurnRequest, BurnResponse,
    DefaultAppContainer, SelectRequest, SelectResponse,
};
use crate::cli::args::{BatchArgs, BurnArgs, NormalizeArgs, OutputFormat, ProbeArgs, SelectArgs};
use crate::domain::model::SelectionResult;
use crate::domain::naming::{FilenameNormalizer, NormalizedName};
use crate::ports::ProbePort;

/// Exit status for a file where nothing matched
pub const EXIT_NO_MATCH: u8 = 2;

/// Execute the select command
pub async fn select(args: SelectArgs, config: &AppConfig) -> Result<ExitCode> {
    let policy = args
        .policy
        .resolve(&config.selection)
        .context("Invalid selection policy")?;
    info!("Selecting subtitles from {}", args.input.display());

    let container = build_container(probe_port(&args.probe));
    let response = container
        .select_interactor()
        .execute(&SelectRequest {
            input: args.input.clone(),
            policy,
        })
        .await
        .with_context(|| format!("Failed to select subtitles for {}", args.input.display()))?;

    emit(&response, args.format, display_selection)?;

    Ok(selection_exit_code(response.is_matched()))
}

/// Execute the burn command
pub async fn burn(args: BurnArgs, config: &AppConfig) -> Result<ExitCode> {
    let policy = args
        .policy
        .resolve(&config.selection)
        .context("Invalid selection policy")?;
    let settings = args.resolve_settings(&config.burn);
    let naming = args.naming.resolve(&config.naming);
    info!("Planning subtitle burn-in for {}", args.input.display());

    let container = build_container(probe_port(&args.probe));
    let response = container
        .burn_interactor()
        .execute(&BurnRequest {
            input: args.input.clone(),
            policy,
            settings,
            naming,
        })
        .await
        .with_context(|| format!("Failed to plan burn-in for {}", args.input.display()))?;

    emit(&response, args.format, display_burn)?;

    Ok(selection_exit_code(response.is_planned()))
}

/// Execute the batch command
pub async fn batch(args: BatchArgs, config: &AppConfig) -> Result<ExitCode> {
    let policy = args
        .policy
        .resolve(&config.selection)
        .context("Invalid selection policy")?;
    let request = BatchRequest {
        root: args.dir.clone(),
        extensions: args.resolve_extensions(&config.batch),
        jobs: args.resolve_jobs(&config.batch),
        policy,
    };
    info!(
        "Scanning {} with {} concurrent jobs",
        request.root.display(),
        request.jobs
    );

    let probe: Arc<dyn ProbePort> = if args.probe_sidecar {
        Arc::new(ProbeJsonAdapter::sidecar())
    } else {
        Arc::new(FfprobeAdapter::new(args.ffprobe_path.clone()))
    };
    let root = request.root.clone();
    let report = build_container(probe)
        .select_interactor()
        .execute_batch(request)
        .await
        .with_context(|| format!("Batch run failed for {}", root.display()))?;

    emit(&report, args.format, display_batch)?;

    Ok(ExitCode::SUCCESS)
}

/// Execute the normalize command
pub fn normalize(args: NormalizeArgs, config: &AppConfig) -> Result<ExitCode> {
    let options = args.naming.resolve(&config.naming);
    let name = FilenameNormalizer::normalize(&args.name, &options);

    emit(&name, args.format, display_name)?;

    Ok(ExitCode::SUCCESS)
}

fn probe_port(args: &ProbeArgs) -> Arc<dyn ProbePort> {
    match &args.probe_json {
        Some(path) => Arc::new(ProbeJsonAdapter::fixed(path.clone())),
        None => Arc::new(FfprobeAdapter::new(args.ffprobe_path.clone())),
    }
}

fn build_container(probe: Arc<dyn ProbePort>) -> DefaultAppContainer {
    DefaultAppContainer::new(probe, Arc::new(TracingLogAdapter::new()))
}

fn selection_exit_code(matched: bool) -> ExitCode {
    if matched {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_NO_MATCH)
    }
}

/// Print `value` to stdout in the requested format
fn emit<T: Serialize>(value: &T, format: OutputFormat, display: fn(&T)) -> Result<()> {
    match format {
        OutputFormat::Text => display(value),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(value)
                .context("Failed to serialize result to JSON")?;
            println!("{}", json);
        }
        OutputFormat::Yaml => {
            let yaml = serde_yaml::to_string(value).context("Failed to serialize result to YAML")?;
            println!("{}", yaml.trim_end());
        }
    }
    Ok(())
}

/// Display a selection in key=value form
fn display_selection(response: &SelectResponse) {
    println!("file={}", response.input.display());
    match (&response.selection, &response.result) {
        (Some(selection), _) => {
            println!("absolute_index={}", selection.absolute_index);
            println!("subtitle_relative_index={}", selection.subtitle_relative_index);
            println!("codec={}", selection.codec);
            println!("language={}", selection.language);
            println!("reason={}", selection.keyword);
        }
        (None, SelectionResult::NoMatch { reason, diagnostics }) => {
            println!("no_match={}", reason);
            for summary in diagnostics {
                println!("  {}", summary);
            }
        }
        (None, SelectionResult::Matched { .. }) => {}
    }
}

fn display_burn(response: &BurnResponse) {
    match (&response.plan, &response.name) {
        (Some(plan), Some(name)) => {
            println!("output={}", plan.output_path.display());
            println!("normalized_name={}", name.normalized);
            println!("filter={}", plan.filter);
            println!("command={}", plan.command_line());
        }
        _ => display_selection(&response.selection),
    }
}

fn display_batch(report: &BatchReport) {
    for entry in &report.files {
        match &entry.outcome {
            BatchOutcome::Matched { selection } => println!(
                "{}\tmatched\tabsolute_index={} subtitle_relative_index={} reason={}",
                entry.input.display(),
                selection.absolute_index,
                selection.subtitle_relative_index,
                selection.keyword
            ),
            BatchOutcome::Skipped { reason } => {
                println!("{}\tskipped\t{}", entry.input.display(), reason)
            }
            BatchOutcome::Failed { error } => {
                println!("{}\tfailed\t{}", entry.input.display(), error)
            }
        }
    }
    println!(
        "matched={} skipped={} failed={}",
        report.matched, report.skipped, report.failed
    );
}

fn display_name(name: &NormalizedName) {
    println!("{}", name.normalized);
}
