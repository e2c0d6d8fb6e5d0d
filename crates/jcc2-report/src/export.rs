//! Writing the survey summary to disk.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use tracing::info;

use jcc2_core::SurveyProcessor;
use jcc2_model::{DataFormat, ValidationError};

use crate::analyzer::{FormatSummary, format_summary};
use crate::applications::{ApplicationPattern, analyze_application_patterns};
use crate::sections::{SectionSummary, summarize_all_sections};

/// Identifies the payload layout to downstream readers.
pub const SUMMARY_SCHEMA: &str = "jcc2-survey-summary";
pub const SUMMARY_SCHEMA_VERSION: u32 = 1;

/// Validation listings can dwarf the analysis payload; the export carries
/// the first findings only. Full listings stay on the terminal path.
pub const MAX_EXPORTED_ERRORS: usize = 10;

#[derive(Debug, Clone, Serialize)]
pub struct SummaryMetadata {
    pub source_file: PathBuf,
    /// RFC 3339 UTC, second precision.
    pub processed_at: String,
    pub total_rows: usize,
    pub total_columns: usize,
    pub total_sections: usize,
    pub validation_errors: usize,
    pub load_warnings: usize,
}

/// The complete export payload.
#[derive(Debug, Clone, Serialize)]
pub struct SurveySummary {
    pub schema: &'static str,
    pub schema_version: u32,
    pub metadata: SummaryMetadata,
    pub sections: BTreeMap<String, SectionSummary>,
    pub application_patterns: BTreeMap<String, ApplicationPattern>,
    /// First [`MAX_EXPORTED_ERRORS`] findings in row-major order.
    pub validation_errors: Vec<ValidationError>,
    pub format_type: DataFormat,
    pub format_specific: FormatSummary,
}

pub fn build_summary(survey: &SurveyProcessor, errors: &[ValidationError]) -> SurveySummary {
    let dataset = survey.dataset();
    SurveySummary {
        schema: SUMMARY_SCHEMA,
        schema_version: SUMMARY_SCHEMA_VERSION,
        metadata: SummaryMetadata {
            source_file: survey.source().to_path_buf(),
            processed_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            total_rows: dataset.row_count(),
            total_columns: dataset.column_count(),
            total_sections: survey.sections().len(),
            validation_errors: errors.len(),
            load_warnings: survey.warnings().len(),
        },
        sections: summarize_all_sections(dataset, survey.schema(), survey.sections()),
        application_patterns: analyze_application_patterns(dataset, survey.schema()),
        validation_errors: errors.iter().take(MAX_EXPORTED_ERRORS).cloned().collect(),
        format_type: survey.format(),
        format_specific: format_summary(survey),
    }
}

/// File name the summary lands under, e.g.
/// `jcc2_user_questionnaire_summary.json`.
pub fn summary_file_name(format: DataFormat) -> String {
    format!("jcc2_{}_summary.json", format.as_str())
}

/// Builds the summary and writes it into `output_dir`, creating the
/// directory when needed. Returns the written path.
pub fn export_summary(
    survey: &SurveyProcessor,
    errors: &[ValidationError],
    output_dir: &Path,
) -> Result<PathBuf> {
    let summary = build_summary(survey, errors);
    let path = output_dir.join(summary_file_name(summary.format_type));

    fs::create_dir_all(output_dir)
        .with_context(|| format!("create output directory {}", output_dir.display()))?;
    let mut payload = serde_json::to_string_pretty(&summary).context("serialize summary")?;
    payload.push('\n');
    fs::write(&path, payload).with_context(|| format!("write summary {}", path.display()))?;

    info!(path = %path.display(), "summary exported");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jcc2_ingest::{SurveyTable, detect_format_in_headers};
    use jcc2_model::ValidationKind;

    fn survey(headers: &[&str], rows: &[&[&str]]) -> SurveyProcessor {
        let table = SurveyTable {
            headers: headers.iter().map(|s| s.to_string()).collect(),
            schema_tags: headers.iter().map(|_| "text".to_string()).collect(),
            rows: rows
                .iter()
                .map(|row| row.iter().map(|s| s.to_string()).collect())
                .collect(),
        };
        let format = detect_format_in_headers(&table.headers);
        SurveyProcessor::from_table(&table, format)
    }

    #[test]
    fn file_name_embeds_the_format() {
        assert_eq!(
            summary_file_name(DataFormat::UserQuestionnaire),
            "jcc2_user_questionnaire_summary.json"
        );
        assert_eq!(
            summary_file_name(DataFormat::Unknown),
            "jcc2_unknown_summary.json"
        );
    }

    #[test]
    fn summary_counts_everything_but_truncates_the_error_list() {
        let survey = survey(
            &["user_information.rank", "usage.frequency_jcc2"],
            &[&["CPT", "Daily"], &["SSG", ""]],
        );
        let errors: Vec<ValidationError> = (0..25)
            .map(|row| {
                ValidationError::new(
                    row,
                    "usage.frequency_jcc2",
                    ValidationKind::MissingRequired,
                    "Required field is empty",
                )
            })
            .collect();

        let summary = build_summary(&survey, &errors);
        assert_eq!(summary.metadata.total_rows, 2);
        assert_eq!(summary.metadata.total_columns, 2);
        assert_eq!(summary.metadata.total_sections, 2);
        assert_eq!(summary.metadata.validation_errors, 25);
        assert_eq!(summary.validation_errors.len(), MAX_EXPORTED_ERRORS);
        assert_eq!(summary.format_type, DataFormat::UserQuestionnaire);
    }
}
