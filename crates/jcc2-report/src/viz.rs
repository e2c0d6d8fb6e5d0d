//! Chart-ready aggregates. Everything here is already counted; plotting
//! layers downstream never have to touch the dataset itself.

use serde::Serialize;

use jcc2_core::SurveyProcessor;
use jcc2_model::{DataFormat, Dataset};

use crate::applications::analyze_application_patterns;
use crate::data_collection::{
    TASK_PERFORMANCE_SUFFIX, is_task_section, task_success,
};
use crate::questionnaire::{effectiveness_columns, effectiveness_score, frequency_columns};
use crate::stats::{ValueCount, count_of, value_counts};

/// One rating of an effectiveness question, with its position on the
/// six-point scale. `score` is `None` for Not Applicable and off-scale
/// answers.
#[derive(Debug, Clone, Serialize)]
pub struct EffectivenessCount {
    pub label: String,
    pub score: Option<f64>,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct EffectivenessHeatmapRow {
    pub column: String,
    pub distribution: Vec<EffectivenessCount>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FrequencyRow {
    pub column: String,
    pub distribution: Vec<ValueCount>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApplicationUsageRow {
    pub application: String,
    pub total_fields: usize,
    pub avg_responses: f64,
    pub total_responses: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct TaskPerformanceRow {
    pub task: String,
    pub success_rate: f64,
    pub total_attempts: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkaroundFrequencyRow {
    pub field: String,
    pub workaround_count: usize,
    pub total_responses: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct VisualizationData {
    pub effectiveness_heatmap: Vec<EffectivenessHeatmapRow>,
    pub frequency_distributions: Vec<FrequencyRow>,
    pub application_usage: Vec<ApplicationUsageRow>,
    /// Task success bars; only data-collection surveys have these.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub task_performance: Vec<TaskPerformanceRow>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub workaround_frequency: Vec<WorkaroundFrequencyRow>,
}

pub fn prepare_visualization_data(survey: &SurveyProcessor) -> VisualizationData {
    let dataset = survey.dataset();

    let effectiveness_heatmap = effectiveness_columns(dataset)
        .into_iter()
        .map(|column| {
            let distribution = value_counts(dataset.column_values(&column))
                .into_iter()
                .map(|entry| EffectivenessCount {
                    score: effectiveness_score(&entry.value),
                    label: entry.value,
                    count: entry.count,
                })
                .collect();
            EffectivenessHeatmapRow { column, distribution }
        })
        .collect();

    let frequency_distributions = frequency_columns(dataset)
        .into_iter()
        .map(|column| {
            let distribution = value_counts(dataset.column_values(&column));
            FrequencyRow { column, distribution }
        })
        .collect();

    let application_usage = analyze_application_patterns(dataset, survey.schema())
        .into_iter()
        .map(|(application, pattern)| ApplicationUsageRow {
            application,
            total_fields: pattern.total_fields,
            avg_responses: pattern.avg_responses,
            total_responses: pattern.total_responses,
        })
        .collect();

    let (task_performance, workaround_frequency) = match survey.format() {
        DataFormat::DataCollection => (
            task_performance_rows(survey),
            workaround_frequency_rows(dataset),
        ),
        _ => (Vec::new(), Vec::new()),
    };

    VisualizationData {
        effectiveness_heatmap,
        frequency_distributions,
        application_usage,
        task_performance,
        workaround_frequency,
    }
}

fn task_performance_rows(survey: &SurveyProcessor) -> Vec<TaskPerformanceRow> {
    let dataset = survey.dataset();
    let mut rows = Vec::new();
    for section in survey.sections().sections() {
        if !is_task_section(&section.name) {
            continue;
        }
        let performance = format!("{}.{TASK_PERFORMANCE_SUFFIX}", section.name);
        if !dataset.has_column(&performance) {
            continue;
        }
        let distribution = value_counts(dataset.column_values(&performance));
        if let Some((success_rate, total_attempts)) = task_success(&distribution) {
            rows.push(TaskPerformanceRow {
                task: section.name.clone(),
                success_rate,
                total_attempts,
            });
        }
    }
    rows
}

fn workaround_frequency_rows(dataset: &Dataset) -> Vec<WorkaroundFrequencyRow> {
    let mut rows = Vec::new();
    for column in dataset.columns() {
        let lowered = column.to_lowercase();
        if !lowered.contains("workaround") || lowered.contains("details") {
            continue;
        }
        let distribution = value_counts(dataset.column_values(column));
        let workaround_count = count_of(&distribution, "Yes");
        if workaround_count == 0 {
            continue;
        }
        rows.push(WorkaroundFrequencyRow {
            field: column.clone(),
            workaround_count,
            total_responses: distribution.iter().map(|entry| entry.count).sum(),
        });
    }
    rows
}
