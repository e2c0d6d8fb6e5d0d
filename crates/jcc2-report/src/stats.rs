//! Small numeric and counting helpers shared by the analyzers.
//!
//! All of these treat "no data" as `None` rather than NaN so summaries
//! serialize as JSON null instead of a non-finite float.

use std::collections::BTreeMap;

use serde::Serialize;

use jcc2_model::{CellValue, Dataset};

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n - 1 denominator). `None` below two values.
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let variance = values
        .iter()
        .map(|value| (value - mean).powi(2))
        .sum::<f64>()
        / (values.len() - 1) as f64;
    Some(variance.sqrt())
}

pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Some(sorted[mid])
    } else {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    }
}

pub fn minimum(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::min)
}

pub fn maximum(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::max)
}

/// One distinct value and how often it occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
}

/// Counts distinct string forms of the given cells, most frequent first;
/// ties keep first-seen order. Null cells and embedded tables are skipped.
pub fn value_counts<'a>(cells: impl IntoIterator<Item = &'a CellValue>) -> Vec<ValueCount> {
    tally(cells.into_iter().filter_map(CellValue::string_form))
}

/// Counts individual selections across multi-select cells; scalar cells
/// contribute nothing.
pub fn multi_value_counts<'a>(cells: impl IntoIterator<Item = &'a CellValue>) -> Vec<ValueCount> {
    tally(
        cells
            .into_iter()
            .filter_map(CellValue::as_multi)
            .flatten()
            .cloned(),
    )
}

fn tally(values: impl Iterator<Item = String>) -> Vec<ValueCount> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut order: Vec<String> = Vec::new();
    for value in values {
        match counts.get_mut(&value) {
            Some(count) => *count += 1,
            None => {
                counts.insert(value.clone(), 1);
                order.push(value);
            }
        }
    }

    let mut result: Vec<ValueCount> = order
        .into_iter()
        .map(|value| {
            let count = counts[&value];
            ValueCount { value, count }
        })
        .collect();
    // stable sort keeps the first-seen order among equal counts
    result.sort_by_key(|entry| std::cmp::Reverse(entry.count));
    result
}

/// Count for one specific value in a tally, 0 when absent.
pub fn count_of(counts: &[ValueCount], value: &str) -> usize {
    counts
        .iter()
        .find(|entry| entry.value == value)
        .map_or(0, |entry| entry.count)
}

pub fn non_null_count(dataset: &Dataset, column: &str) -> usize {
    dataset
        .column_values(column)
        .filter(|cell| !cell.is_null())
        .count()
}

/// Every numeric cell of a column, in row order.
pub fn numeric_values(dataset: &Dataset, column: &str) -> Vec<f64> {
    dataset
        .column_values(column)
        .filter_map(CellValue::as_number)
        .collect()
}
