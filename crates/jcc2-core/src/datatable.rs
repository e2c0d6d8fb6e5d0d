//! Encode/decode and summaries for embedded datatable cells.

use std::collections::BTreeMap;

use serde::Serialize;

use jcc2_model::{CellValue, Dataset, DatatableValue};

/// Decodes one raw datatable cell. Absent, empty, and the literal `null`
/// are clean nulls; anything else must parse as the JSON table shape.
/// Callers turn the error case into a null cell plus a warning.
pub fn decode_datatable(raw: &str) -> Result<Option<DatatableValue>, serde_json::Error> {
    let value = raw.trim();
    if value.is_empty() || value == "null" {
        return Ok(None);
    }
    serde_json::from_str(value).map(Some)
}

/// Structural inverse of [`decode_datatable`] for round-trips and exports.
pub fn encode_datatable(table: &DatatableValue) -> Result<String, serde_json::Error> {
    serde_json::to_string(table)
}

/// Sub-column description lifted from the first decoded entry of a column.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DatatableColumnSummary {
    #[serde(rename = "type")]
    pub column_type: String,
    pub label: String,
}

/// Shape of one datatable column across all rows of a file.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DatatableSummary {
    /// Rows whose cell decoded to a table.
    pub total_entries: usize,
    /// Mean embedded-row count over those entries; 0 when there are none.
    pub avg_rows_per_entry: f64,
    /// Sub-column id to description, from the first entry that declares
    /// columns at all.
    pub column_summaries: BTreeMap<String, DatatableColumnSummary>,
}

/// Summarizes the decoded datatable cells of `column`.
pub fn summarize_datatable_column(dataset: &Dataset, column: &str) -> DatatableSummary {
    let tables: Vec<&DatatableValue> = dataset
        .column_values(column)
        .filter_map(CellValue::as_table)
        .collect();

    let mut summary = DatatableSummary {
        total_entries: tables.len(),
        ..DatatableSummary::default()
    };
    if tables.is_empty() {
        return summary;
    }

    let total_rows: usize = tables.iter().map(|table| table.row_count()).sum();
    summary.avg_rows_per_entry = total_rows as f64 / tables.len() as f64;

    if let Some(first) = tables.first()
        && !first.columns.is_empty()
    {
        for column in &first.columns {
            summary.column_summaries.insert(
                column.id.clone(),
                DatatableColumnSummary {
                    column_type: column.column_type.clone(),
                    label: column.label.clone(),
                },
            );
        }
    }

    summary
}
