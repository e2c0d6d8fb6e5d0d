//! Questionnaire-format analysis: effectiveness ratings, usage frequency,
//! Net Promoter Score and System Usability Scale.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, warn};

use jcc2_core::SectionIndex;
use jcc2_model::Dataset;

use crate::stats::{ValueCount, count_of, mean, non_null_count, value_counts};

/// The recommendation question NPS is computed from.
pub const RECOMMEND_COLUMN: &str = "overall_system_suitability_eval.recommend_jcc2";

/// Common prefix of the ten SUS items.
pub const SUS_COLUMN_PREFIX: &str = "overall_system_usability.sus_";

/// Mean SUS score over the respondents who answered all ten items.
#[derive(Debug, Clone, Serialize)]
pub struct SusSummary {
    pub mean_score: f64,
    pub respondent_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionnaireSummary {
    /// Answer distribution per effectiveness column.
    pub effectiveness_ratings: BTreeMap<String, Vec<ValueCount>>,
    /// Answer distribution per usage-frequency column.
    pub frequency_distributions: BTreeMap<String, Vec<ValueCount>>,
    /// Mean per-column completion rate per section.
    pub section_completion_rates: BTreeMap<String, f64>,
    pub nps_score: Option<f64>,
    pub sus: Option<SusSummary>,
}

pub fn summarize_questionnaire(
    dataset: &Dataset,
    sections: &SectionIndex,
) -> QuestionnaireSummary {
    let effectiveness_ratings = effectiveness_columns(dataset)
        .into_iter()
        .map(|column| {
            let counts = value_counts(dataset.column_values(&column));
            (column, counts)
        })
        .collect();
    let frequency_distributions = frequency_columns(dataset)
        .into_iter()
        .map(|column| {
            let counts = value_counts(dataset.column_values(&column));
            (column, counts)
        })
        .collect();

    let mut section_completion_rates = BTreeMap::new();
    let rows = dataset.row_count();
    for section in sections.sections() {
        let rates: Vec<f64> = section
            .columns
            .iter()
            .map(|column| {
                if rows == 0 {
                    0.0
                } else {
                    non_null_count(dataset, column) as f64 / rows as f64
                }
            })
            .collect();
        if let Some(rate) = mean(&rates) {
            section_completion_rates.insert(section.name.clone(), rate);
        }
    }

    let sus = sus_scores(dataset).map(|scores| SusSummary {
        // sus_scores never returns an empty list
        mean_score: mean(&scores).unwrap_or(0.0),
        respondent_count: scores.len(),
    });

    QuestionnaireSummary {
        effectiveness_ratings,
        frequency_distributions,
        section_completion_rates,
        nps_score: nps_score(dataset),
        sus,
    }
}

/// Net Promoter Score over the recommendation question: the percentage of
/// "Yes" answers minus the percentage of "No" answers, ranging -100 to 100.
/// `None` when the column is absent or nobody answered.
pub fn nps_score(dataset: &Dataset) -> Option<f64> {
    if !dataset.has_column(RECOMMEND_COLUMN) {
        warn!(column = RECOMMEND_COLUMN, "recommendation column not found, skipping nps");
        return None;
    }

    let counts = value_counts(dataset.column_values(RECOMMEND_COLUMN));
    let total: usize = counts.iter().map(|entry| entry.count).sum();
    if total == 0 {
        return None;
    }

    let promoters = count_of(&counts, "Yes") as f64 / total as f64 * 100.0;
    let detractors = count_of(&counts, "No") as f64 / total as f64 * 100.0;
    let score = promoters - detractors;
    debug!(score, promoters, detractors, "nps computed");
    Some(score)
}

/// Per-respondent SUS scores on the usual 0-100 scale.
///
/// Odd items score `value - 1`, even items `5 - value`, and the sum is
/// scaled by 2.5. Only respondents who answered all ten items numerically
/// get a score. `None` when the ten `sus_1`..`sus_10` columns are not all
/// present or no respondent completed them.
pub fn sus_scores(dataset: &Dataset) -> Option<Vec<f64>> {
    let mut columns: Vec<&String> = dataset
        .columns()
        .iter()
        .filter(|column| column.starts_with(SUS_COLUMN_PREFIX))
        .collect();
    if columns.len() != 10 {
        warn!(found = columns.len(), "expected 10 sus columns, skipping sus");
        return None;
    }
    columns.sort_by_key(|column| sus_item_number(column));

    let mut scores = Vec::new();
    for row in 0..dataset.row_count() {
        let mut total = 0.0;
        let mut answered = 0;
        for (item, column) in columns.iter().enumerate() {
            let Some(value) = dataset.value(row, column).and_then(|cell| cell.as_number())
            else {
                continue;
            };
            total += if (item + 1) % 2 == 1 {
                value - 1.0
            } else {
                5.0 - value
            };
            answered += 1;
        }
        if answered == 10 {
            scores.push(total * 2.5);
        }
    }

    if scores.is_empty() {
        warn!("no complete sus responses");
        return None;
    }
    debug!(respondents = scores.len(), "sus computed");
    Some(scores)
}

fn sus_item_number(column: &str) -> u32 {
    column
        .strip_prefix(SUS_COLUMN_PREFIX)
        .and_then(|suffix| suffix.parse().ok())
        .unwrap_or(u32::MAX)
}

/// Columns holding effectiveness ratings, by case-insensitive name match.
pub(crate) fn effectiveness_columns(dataset: &Dataset) -> Vec<String> {
    dataset
        .columns()
        .iter()
        .filter(|column| column.to_lowercase().contains("effective"))
        .cloned()
        .collect()
}

/// Columns holding usage-frequency answers.
pub(crate) fn frequency_columns(dataset: &Dataset) -> Vec<String> {
    dataset
        .columns()
        .iter()
        .filter(|column| column.to_lowercase().contains("frequency"))
        .cloned()
        .collect()
}

/// Numeric position of an effectiveness label on the 1-6 scale. "Not
/// Applicable" and unrecognized labels have no position.
pub fn effectiveness_score(label: &str) -> Option<f64> {
    match label {
        "Completely Ineffective" => Some(1.0),
        "Moderately Ineffective" => Some(2.0),
        "Slightly Ineffective" => Some(3.0),
        "Slightly Effective" => Some(4.0),
        "Moderately Effective" => Some(5.0),
        "Completely Effective" => Some(6.0),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jcc2_model::CellValue;

    fn text(value: &str) -> CellValue {
        CellValue::Text(value.into())
    }

    #[test]
    fn nps_is_promoter_minus_detractor_percentage() {
        let mut dataset = Dataset::new(vec![RECOMMEND_COLUMN.into()]);
        for answer in ["Yes", "Yes", "No", "Maybe"] {
            dataset.push_row(vec![text(answer)]);
        }

        // 50% promoters - 25% detractors
        assert_eq!(nps_score(&dataset), Some(25.0));
    }

    #[test]
    fn nps_is_none_without_the_column_or_answers() {
        let dataset = Dataset::new(vec!["other".into()]);
        assert_eq!(nps_score(&dataset), None);

        let mut empty = Dataset::new(vec![RECOMMEND_COLUMN.into()]);
        empty.push_row(vec![CellValue::Null]);
        assert_eq!(nps_score(&empty), None);
    }

    fn sus_dataset(rows: Vec<Vec<CellValue>>) -> Dataset {
        let columns = (1..=10)
            .map(|item| format!("{SUS_COLUMN_PREFIX}{item}"))
            .collect();
        let mut dataset = Dataset::new(columns);
        for row in rows {
            dataset.push_row(row);
        }
        dataset
    }

    #[test]
    fn sus_scores_complete_rows_only() {
        // all fives on odd items and all ones on even items is the best
        // possible answer sheet: (5-1)*5 + (5-1)*5 = 40, times 2.5 = 100
        let best: Vec<CellValue> = (1..=10)
            .map(|item| CellValue::Number(if item % 2 == 1 { 5.0 } else { 1.0 }))
            .collect();
        let mut partial: Vec<CellValue> = best.clone();
        partial[3] = CellValue::Null;

        let dataset = sus_dataset(vec![best, partial]);
        assert_eq!(sus_scores(&dataset), Some(vec![100.0]));
    }

    #[test]
    fn sus_requires_all_ten_columns() {
        let mut dataset = Dataset::new(vec![format!("{SUS_COLUMN_PREFIX}1")]);
        dataset.push_row(vec![CellValue::Number(3.0)]);

        assert_eq!(sus_scores(&dataset), None);
    }

    #[test]
    fn sus_orders_items_numerically_not_lexically() {
        // sus_10 must score as an even item even though "sus_10" sorts
        // before "sus_2" lexically
        let mut columns: Vec<String> = (1..=10)
            .map(|item| format!("{SUS_COLUMN_PREFIX}{item}"))
            .collect();
        columns.sort();
        let mut dataset = Dataset::new(columns.clone());
        let row = columns
            .iter()
            .map(|column| {
                let item = sus_item_number(column);
                CellValue::Number(if item % 2 == 1 { 5.0 } else { 1.0 })
            })
            .collect();
        dataset.push_row(row);

        assert_eq!(sus_scores(&dataset), Some(vec![100.0]));
    }

    #[test]
    fn effectiveness_scale_maps_labels() {
        assert_eq!(effectiveness_score("Completely Ineffective"), Some(1.0));
        assert_eq!(effectiveness_score("Completely Effective"), Some(6.0));
        assert_eq!(effectiveness_score("Not Applicable"), None);
        assert_eq!(effectiveness_score("whatever"), None);
    }

    #[test]
    fn summary_collects_ratings_and_completion() {
        use jcc2_model::{FieldSchema, SurveySchema};

        let schema: SurveySchema = [
            FieldSchema::parse("eval.effectiveness", "radio|options:Completely Effective").unwrap(),
            FieldSchema::parse("usage.frequency_daily", "radio|options:Daily,Never").unwrap(),
        ]
        .into_iter()
        .collect();
        let sections = SectionIndex::from_schema(&schema);
        let mut dataset = Dataset::new(vec![
            "eval.effectiveness".into(),
            "usage.frequency_daily".into(),
        ]);
        dataset.push_row(vec![text("Completely Effective"), text("Daily")]);
        dataset.push_row(vec![CellValue::Null, text("Daily")]);

        let summary = summarize_questionnaire(&dataset, &sections);
        assert_eq!(
            summary.effectiveness_ratings["eval.effectiveness"],
            vec![ValueCount { value: "Completely Effective".into(), count: 1 }]
        );
        assert_eq!(
            summary.frequency_distributions["usage.frequency_daily"][0].count,
            2
        );
        assert!((summary.section_completion_rates["eval"] - 0.5).abs() < f64::EPSILON);
        assert_eq!(summary.section_completion_rates["usage"], 1.0);
        assert_eq!(summary.nps_score, None);
        assert!(summary.sus.is_none());
    }
}
