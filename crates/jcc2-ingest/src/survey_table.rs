//! Reading the three-layer survey export.
//!
//! Layout: row 1 holds column headers, row 2 holds one schema tag per
//! column, rows 3+ are data. The schema row is metadata and never shows up
//! among the data rows. Quoted cells may span multiple physical lines
//! (datatable cells embed JSON with newlines), which the csv reader handles
//! before rows reach us.

use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use crate::error::{IngestError, Result};

/// A raw survey export split into its layers. Headers are trimmed and
/// stripped of a UTF-8 BOM; schema tags and data cells are kept verbatim so
/// identifier values survive untouched.
#[derive(Debug, Clone)]
pub struct SurveyTable {
    pub headers: Vec<String>,
    pub schema_tags: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl SurveyTable {
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

pub(crate) fn normalize_header(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Reads a survey CSV. Fails when the file cannot be read or has fewer than
/// two rows; a file with no data rows is fine.
pub fn read_survey_table(path: &Path) -> Result<SurveyTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|source| IngestError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    let read_failed = |source| IngestError::Read {
        path: path.to_path_buf(),
        source,
    };

    let mut records = reader.records();

    let headers: Vec<String> = match records.next() {
        Some(record) => record.map_err(read_failed)?.iter().map(normalize_header).collect(),
        None => {
            return Err(IngestError::MissingSchemaRow {
                path: path.to_path_buf(),
                rows: 0,
            });
        }
    };

    let schema_tags: Vec<String> = match records.next() {
        Some(record) => {
            let mut tags: Vec<String> =
                record.map_err(read_failed)?.iter().map(str::to_string).collect();
            tags.resize(headers.len(), String::new());
            tags
        }
        None => {
            return Err(IngestError::MissingSchemaRow {
                path: path.to_path_buf(),
                rows: 1,
            });
        }
    };

    let mut rows = Vec::new();
    for record in records {
        let mut row: Vec<String> =
            record.map_err(read_failed)?.iter().map(str::to_string).collect();
        row.resize(headers.len(), String::new());
        rows.push(row);
    }

    debug!(
        path = %path.display(),
        columns = headers.len(),
        rows = rows.len(),
        "read survey table"
    );

    Ok(SurveyTable {
        headers,
        schema_tags,
        rows,
    })
}
