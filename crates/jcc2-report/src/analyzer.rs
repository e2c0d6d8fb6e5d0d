//! Format dispatch for the survey-level summary.

use serde::Serialize;
use tracing::warn;

use jcc2_core::SurveyProcessor;
use jcc2_model::DataFormat;

use crate::data_collection::{DataCollectionSummary, summarize_data_collection};
use crate::questionnaire::{QuestionnaireSummary, summarize_questionnaire};

/// Format-specific half of a survey summary. Serialized untagged; the
/// variants share no field names, so the JSON stays unambiguous.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum FormatSummary {
    UserQuestionnaire(QuestionnaireSummary),
    DataCollection(DataCollectionSummary),
}

/// Runs the analyzer matching the survey's format. Surveys of unknown
/// format get the questionnaire treatment, which degrades gracefully when
/// its marker columns are absent.
pub fn format_summary(survey: &SurveyProcessor) -> FormatSummary {
    match survey.format() {
        DataFormat::DataCollection => FormatSummary::DataCollection(summarize_data_collection(
            survey.dataset(),
            survey.schema(),
            survey.sections(),
        )),
        DataFormat::UserQuestionnaire => FormatSummary::UserQuestionnaire(
            summarize_questionnaire(survey.dataset(), survey.sections()),
        ),
        DataFormat::Unknown => {
            warn!(file = %survey.source().display(), "unknown format, analyzing as questionnaire");
            FormatSummary::UserQuestionnaire(summarize_questionnaire(
                survey.dataset(),
                survey.sections(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jcc2_ingest::{SurveyTable, detect_format_in_headers};

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
    fn data_collection_headers_pick_the_task_analyzer() {
        let survey = survey(
            &["basic_info.event", "mop_1_1.task_performance"],
            &[&["test", "Yes"]],
        );
        let summary = format_summary(&survey);
        assert!(matches!(summary, FormatSummary::DataCollection(_)));
    }

    #[test]
    fn questionnaire_headers_pick_the_questionnaire_analyzer() {
        let survey = survey(&["user_information.rank"], &[&["CPT"]]);
        let summary = format_summary(&survey);
        assert!(matches!(summary, FormatSummary::UserQuestionnaire(_)));
    }

    #[test]
    fn unknown_format_falls_back_to_the_questionnaire_analyzer() {
        let survey = survey(&["submission_id", "notes"], &[&["1", "fine"]]);
        assert_eq!(survey.format(), DataFormat::Unknown);
        let summary = format_summary(&survey);
        assert!(matches!(summary, FormatSummary::UserQuestionnaire(_)));
    }
}
