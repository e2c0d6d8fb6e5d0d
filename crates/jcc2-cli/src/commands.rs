use std::time::Instant;

use anyhow::Result;
use tracing::{info, info_span};

use jcc2_core::SurveyProcessor;
use jcc2_ingest::detect_format;
use jcc2_report::export_summary;
use jcc2_validate::validate_dataset;

use crate::cli::{DetectArgs, ProcessArgs};
use crate::types::{DetectResult, ProcessResult};

/// Full pipeline: load, validate, and optionally export the summary.
/// Validation findings are data in the result, never an `Err`.
pub fn run_process(args: &ProcessArgs) -> Result<ProcessResult> {
    let process_span = info_span!("process", file = %args.file.display());
    let _process_guard = process_span.enter();
    let start = Instant::now();

    let survey = SurveyProcessor::open(&args.file)?;
    let errors = validate_dataset(survey.dataset(), survey.schema());

    let summary_path = match &args.output_dir {
        Some(dir) => Some(export_summary(&survey, &errors, dir)?),
        None => None,
    };

    info!(
        format = %survey.format(),
        rows = survey.dataset().row_count(),
        findings = errors.len(),
        duration_ms = start.elapsed().as_millis(),
        "process complete"
    );

    Ok(ProcessResult {
        survey,
        errors,
        summary_path,
    })
}

/// Header-only format detection. Unreadable files detect as unknown; the
/// `process` command is where read failures become errors.
pub fn run_detect(args: &DetectArgs) -> Result<DetectResult> {
    let format = detect_format(&args.file);
    Ok(DetectResult {
        path: args.file.clone(),
        format,
    })
}
