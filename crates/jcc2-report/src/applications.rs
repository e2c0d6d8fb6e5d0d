//! Response patterns per JCC2 application.
//!
//! Application columns are found by case-insensitive substring match on the
//! header, so `mop_1_1.madss_performance` and `usage.madss` both count
//! toward `madss`.

use std::collections::BTreeMap;

use serde::Serialize;

use jcc2_model::{Dataset, SurveySchema};

use crate::stats::non_null_count;

/// The applications surveyed across both form variants.
pub const APPLICATIONS: [&str; 15] = [
    "jcc2cyberops",
    "jcc2readiness",
    "a2it",
    "cad",
    "codex",
    "crucible",
    "cyber9line",
    "dispatch",
    "madss",
    "rally",
    "redmap",
    "sigact",
    "threathub",
    "triage",
    "unity",
];

/// Engagement with one application across all of its columns.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationPattern {
    pub total_fields: usize,
    /// Matching columns grouped by the section they belong to; columns
    /// without a typed schema or a section are counted but not grouped.
    pub sections: BTreeMap<String, Vec<String>>,
    pub avg_responses: f64,
    pub total_responses: usize,
}

/// Patterns for every application with at least one matching column.
pub fn analyze_application_patterns(
    dataset: &Dataset,
    schema: &SurveySchema,
) -> BTreeMap<String, ApplicationPattern> {
    let mut patterns = BTreeMap::new();

    for app in APPLICATIONS {
        let columns: Vec<&String> = dataset
            .columns()
            .iter()
            .filter(|column| column.to_lowercase().contains(app))
            .collect();
        if columns.is_empty() {
            continue;
        }

        let mut sections: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for column in &columns {
            if let Some(field) = schema.get(column)
                && let Some(section) = &field.section
            {
                sections
                    .entry(section.clone())
                    .or_default()
                    .push((*column).clone());
            }
        }

        let counts: Vec<usize> = columns
            .iter()
            .map(|column| non_null_count(dataset, column))
            .collect();
        let total_responses: usize = counts.iter().sum();
        let avg_responses = total_responses as f64 / counts.len() as f64;

        patterns.insert(
            app.to_string(),
            ApplicationPattern {
                total_fields: columns.len(),
                sections,
                avg_responses,
                total_responses,
            },
        );
    }

    patterns
}

#[cfg(test)]
mod tests {
    use super::*;
    use jcc2_model::{CellValue, FieldSchema};

    #[test]
    fn matches_are_case_insensitive_substrings() {
        let schema: SurveySchema = [
            FieldSchema::parse("mop_1_1.madss_use", "radio|options:Yes,No").unwrap(),
            FieldSchema::parse("usage.MADSS_rating", "number").unwrap(),
            FieldSchema::parse("usage.other", "text").unwrap(),
        ]
        .into_iter()
        .collect();
        let mut dataset = Dataset::new(vec![
            "mop_1_1.madss_use".into(),
            "usage.MADSS_rating".into(),
            "usage.other".into(),
        ]);
        dataset.push_row(vec![
            CellValue::Text("Yes".into()),
            CellValue::Number(4.0),
            CellValue::Null,
        ]);
        dataset.push_row(vec![
            CellValue::Text("No".into()),
            CellValue::Null,
            CellValue::Null,
        ]);

        let patterns = analyze_application_patterns(&dataset, &schema);
        assert_eq!(patterns.len(), 1);
        let madss = &patterns["madss"];
        assert_eq!(madss.total_fields, 2);
        assert_eq!(madss.total_responses, 3);
        assert!((madss.avg_responses - 1.5).abs() < f64::EPSILON);
        assert_eq!(madss.sections["mop_1_1"], vec!["mop_1_1.madss_use"]);
        assert_eq!(madss.sections["usage"], vec!["usage.MADSS_rating"]);
    }

    #[test]
    fn applications_without_columns_are_absent() {
        let schema = SurveySchema::new();
        let dataset = Dataset::new(vec!["plain".into()]);

        assert!(analyze_application_patterns(&dataset, &schema).is_empty());
    }
}
