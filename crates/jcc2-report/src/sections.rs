//! Per-section statistical summaries.

use std::collections::BTreeMap;

use serde::Serialize;

use jcc2_core::{Section, SectionIndex};
use jcc2_model::{Dataset, FieldSchema, FieldType, SurveySchema};

use crate::stats::{
    ValueCount, maximum, mean, median, minimum, multi_value_counts, non_null_count, numeric_values,
    sample_std, value_counts,
};

/// Location and spread of one numeric column. All null when the column has
/// no numeric cells; `std` additionally needs at least two.
#[derive(Debug, Clone, Serialize)]
pub struct NumericSummary {
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub median: Option<f64>,
}

/// Summary of one column within its section.
#[derive(Debug, Clone, Serialize)]
pub struct FieldSummary {
    pub field_type: FieldType,
    pub non_null_count: usize,
    pub null_count: usize,
    /// Non-null share of all data rows; 0 for an empty dataset.
    pub completion_rate: f64,
    /// Choice fields: distribution over answers. Multi-selects count each
    /// selection separately.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_distribution: Option<Vec<ValueCount>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub most_common: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numeric: Option<NumericSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SectionSummary {
    pub section: String,
    pub total_fields: usize,
    pub field_summaries: BTreeMap<String, FieldSummary>,
}

/// Summarizes every column of one section.
pub fn summarize_section(
    dataset: &Dataset,
    schema: &SurveySchema,
    section: &Section,
) -> SectionSummary {
    let mut field_summaries = BTreeMap::new();
    for column in &section.columns {
        let Some(field) = schema.get(column) else {
            continue;
        };
        field_summaries.insert(column.clone(), summarize_field(dataset, field));
    }

    SectionSummary {
        section: section.name.clone(),
        total_fields: section.columns.len(),
        field_summaries,
    }
}

pub fn summarize_all_sections(
    dataset: &Dataset,
    schema: &SurveySchema,
    sections: &SectionIndex,
) -> BTreeMap<String, SectionSummary> {
    sections
        .sections()
        .iter()
        .map(|section| {
            (
                section.name.clone(),
                summarize_section(dataset, schema, section),
            )
        })
        .collect()
}

fn summarize_field(dataset: &Dataset, field: &FieldSchema) -> FieldSummary {
    let non_null = non_null_count(dataset, &field.name);
    let rows = dataset.row_count();
    let completion_rate = if rows == 0 {
        0.0
    } else {
        non_null as f64 / rows as f64
    };

    let mut summary = FieldSummary {
        field_type: field.field_type,
        non_null_count: non_null,
        null_count: rows - non_null,
        completion_rate,
        value_distribution: None,
        most_common: None,
        numeric: None,
    };

    match field.field_type {
        FieldType::Radio | FieldType::Select => {
            let distribution = value_counts(dataset.column_values(&field.name));
            summary.most_common = distribution.first().map(|entry| entry.value.clone());
            summary.value_distribution = Some(distribution);
        }
        FieldType::Checkbox if field.multiple => {
            summary.value_distribution =
                Some(multi_value_counts(dataset.column_values(&field.name)));
        }
        FieldType::Number => {
            let values = numeric_values(dataset, &field.name);
            summary.numeric = Some(NumericSummary {
                mean: mean(&values),
                std: sample_std(&values),
                min: minimum(&values),
                max: maximum(&values),
                median: median(&values),
            });
        }
        _ => {}
    }

    summary
}
