//! The typed survey table.

use std::collections::BTreeMap;

use crate::value::CellValue;

/// Row-ordered typed table. Rows always have exactly one cell per column;
/// short source rows are padded with nulls at construction.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    columns: Vec<String>,
    index: BTreeMap<String, usize>,
    rows: Vec<Vec<CellValue>>,
}

impl Dataset {
    /// Creates an empty dataset over the given column order. On duplicate
    /// headers the first occurrence wins for name lookups.
    pub fn new(columns: Vec<String>) -> Self {
        let mut index = BTreeMap::new();
        for (position, name) in columns.iter().enumerate() {
            index.entry(name.clone()).or_insert(position);
        }
        Dataset {
            columns,
            index,
            rows: Vec::new(),
        }
    }

    /// Appends a row, padding or truncating to the column count.
    pub fn push_row(&mut self, mut row: Vec<CellValue>) {
        row.resize(self.columns.len(), CellValue::Null);
        self.rows.push(row);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn value(&self, row: usize, column: &str) -> Option<&CellValue> {
        let position = self.column_index(column)?;
        self.rows.get(row).and_then(|cells| cells.get(position))
    }

    /// Iterates one column top to bottom; empty iterator for unknown names.
    pub fn column_values<'a>(&'a self, column: &str) -> impl Iterator<Item = &'a CellValue> {
        let position = self.column_index(column);
        self.rows
            .iter()
            .filter_map(move |cells| position.and_then(|index| cells.get(index)))
    }

    /// Rewrites every cell of one column in place. This is the only
    /// mutation the table sees after load.
    pub fn transform_column(&mut self, column: usize, mut transform: impl FnMut(CellValue) -> CellValue) {
        for cells in &mut self.rows {
            if let Some(cell) = cells.get_mut(column) {
                *cell = transform(std::mem::take(cell));
            }
        }
    }
}
