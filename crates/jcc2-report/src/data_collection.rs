//! Data-collection-format analysis: task performance, workarounds, problem
//! occurrence and embedded datatable summaries.

use std::collections::BTreeMap;

use serde::Serialize;

use jcc2_core::{DatatableSummary, Section, SectionIndex, summarize_datatable_column};
use jcc2_model::{Dataset, SurveySchema};

use crate::stats::{ValueCount, count_of, value_counts};

/// Suffix of the per-task pass/fail question.
pub const TASK_PERFORMANCE_SUFFIX: &str = "task_performance";

/// Suffix of the per-task outcome question.
pub const TASK_OUTCOME_SUFFIX: &str = "task_outcome";

/// Suffix of the per-task workaround question.
pub const TASK_WORKAROUND_SUFFIX: &str = "task_workaround";

/// Task sections carry measure-of-performance or measure-of-suitability
/// names.
pub fn is_task_section(name: &str) -> bool {
    name.starts_with("mop") || name.starts_with("mos")
}

/// Metrics of one task section. Empty when the section has neither a
/// performance nor an outcome column.
#[derive(Debug, Clone, Serialize)]
pub struct TaskMetrics {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performance_distribution: Option<Vec<ValueCount>>,
    /// Yes / (Yes + No); answers outside Yes/No do not count as attempts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome_distribution: Option<Vec<ValueCount>>,
}

impl TaskMetrics {
    pub fn is_empty(&self) -> bool {
        self.performance_distribution.is_none()
            && self.success_rate.is_none()
            && self.outcome_distribution.is_none()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkaroundAnalysis {
    pub yes_count: usize,
    pub no_count: usize,
    pub na_count: usize,
    pub distribution: Vec<ValueCount>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DataCollectionSummary {
    pub task_performance_metrics: BTreeMap<String, TaskMetrics>,
    pub workaround_analysis: BTreeMap<String, WorkaroundAnalysis>,
    pub problem_occurrence_rates: BTreeMap<String, Vec<ValueCount>>,
    pub datatable_summaries: BTreeMap<String, DatatableSummary>,
}

pub fn summarize_data_collection(
    dataset: &Dataset,
    schema: &SurveySchema,
    sections: &SectionIndex,
) -> DataCollectionSummary {
    let mut task_performance_metrics = BTreeMap::new();
    for section in sections.sections() {
        if !is_task_section(&section.name) {
            continue;
        }
        let metrics = task_metrics(dataset, section);
        if !metrics.is_empty() {
            task_performance_metrics.insert(section.name.clone(), metrics);
        }
    }

    let mut workaround_analysis = BTreeMap::new();
    for column in topic_columns(dataset, "workaround") {
        let distribution = value_counts(dataset.column_values(&column));
        workaround_analysis.insert(
            column,
            WorkaroundAnalysis {
                yes_count: count_of(&distribution, "Yes"),
                no_count: count_of(&distribution, "No"),
                na_count: count_of(&distribution, "N/A"),
                distribution,
            },
        );
    }

    let problem_occurrence_rates = topic_columns(dataset, "problem_occurrence")
        .into_iter()
        .map(|column| {
            let counts = value_counts(dataset.column_values(&column));
            (column, counts)
        })
        .collect();

    let mut datatable_summaries = BTreeMap::new();
    for field in schema.datatable_fields() {
        if dataset.has_column(&field.name) {
            datatable_summaries.insert(
                field.name.clone(),
                summarize_datatable_column(dataset, &field.name),
            );
        }
    }

    DataCollectionSummary {
        task_performance_metrics,
        workaround_analysis,
        problem_occurrence_rates,
        datatable_summaries,
    }
}

/// Success rates and the workaround-success relationship across tasks.
#[derive(Debug, Clone, Serialize)]
pub struct PerformancePatterns {
    pub task_success_rates: BTreeMap<String, f64>,
    pub workaround_correlations: BTreeMap<String, WorkaroundCorrelation>,
}

/// How often a task still succeeded when a workaround was needed.
#[derive(Debug, Clone, Serialize)]
pub struct WorkaroundCorrelation {
    pub workaround_success_rate: f64,
}

pub fn analyze_performance_patterns(
    dataset: &Dataset,
    sections: &SectionIndex,
) -> PerformancePatterns {
    let mut task_success_rates = BTreeMap::new();
    for section in sections.sections() {
        if !is_task_section(&section.name) {
            continue;
        }
        if let Some(rate) = task_metrics(dataset, section).success_rate {
            task_success_rates.insert(section.name.clone(), rate);
        }
    }

    let mut workaround_correlations = BTreeMap::new();
    for section in sections.sections() {
        let performance = format!("{}.{TASK_PERFORMANCE_SUFFIX}", section.name);
        let workaround = format!("{}.{TASK_WORKAROUND_SUFFIX}", section.name);
        if !dataset.has_column(&performance) || !dataset.has_column(&workaround) {
            continue;
        }

        // pairs where both questions were answered
        let mut with_workaround = 0usize;
        let mut with_workaround_success = 0usize;
        let mut any_success = false;
        for row in 0..dataset.row_count() {
            let Some(perf) = dataset.value(row, &performance).and_then(|c| c.string_form())
            else {
                continue;
            };
            let Some(work) = dataset.value(row, &workaround).and_then(|c| c.string_form())
            else {
                continue;
            };
            if perf == "Yes" {
                any_success = true;
            }
            if work == "Yes" {
                with_workaround += 1;
                if perf == "Yes" {
                    with_workaround_success += 1;
                }
            }
        }

        if with_workaround > 0 && any_success {
            workaround_correlations.insert(
                section.name.clone(),
                WorkaroundCorrelation {
                    workaround_success_rate: with_workaround_success as f64
                        / with_workaround as f64,
                },
            );
        }
    }

    PerformancePatterns {
        task_success_rates,
        workaround_correlations,
    }
}

fn task_metrics(dataset: &Dataset, section: &Section) -> TaskMetrics {
    let mut metrics = TaskMetrics {
        performance_distribution: None,
        success_rate: None,
        outcome_distribution: None,
    };

    let performance = format!("{}.{TASK_PERFORMANCE_SUFFIX}", section.name);
    if section.columns.contains(&performance) && dataset.has_column(&performance) {
        let distribution = value_counts(dataset.column_values(&performance));
        metrics.success_rate = task_success(&distribution).map(|(rate, _)| rate);
        metrics.performance_distribution = Some(distribution);
    }

    let outcome = format!("{}.{TASK_OUTCOME_SUFFIX}", section.name);
    if section.columns.contains(&outcome) && dataset.has_column(&outcome) {
        metrics.outcome_distribution = Some(value_counts(dataset.column_values(&outcome)));
    }

    metrics
}

/// Success rate and attempt count from a performance distribution; `None`
/// when nobody answered Yes or No.
pub(crate) fn task_success(distribution: &[ValueCount]) -> Option<(f64, usize)> {
    let yes = count_of(distribution, "Yes");
    let attempts = yes + count_of(distribution, "No");
    if attempts == 0 {
        return None;
    }
    Some((yes as f64 / attempts as f64, attempts))
}

/// Columns about one topic, with the free-text `details` companions
/// excluded. Both matches are case-insensitive.
fn topic_columns(dataset: &Dataset, topic: &str) -> Vec<String> {
    dataset
        .columns()
        .iter()
        .filter(|column| {
            let lowered = column.to_lowercase();
            lowered.contains(topic) && !lowered.contains("details")
        })
        .cloned()
        .collect()
}
