//! Payload shape for `datatable` cells.
//!
//! A datatable cell embeds a whole sub-table as one JSON object:
//! `{"columns": [{"id", "type", "label"}, ...], "rows": [{colId: value}, ...]}`.
//! Exports from older form versions may omit `columns` or `rows` entirely;
//! missing pieces default to empty rather than failing the decode.

use serde::{Deserialize, Serialize};

/// One declared sub-column of an embedded datatable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatatableColumn {
    #[serde(default)]
    pub id: String,
    #[serde(default, rename = "type")]
    pub column_type: String,
    #[serde(default)]
    pub label: String,
}

/// A decoded datatable cell: sub-column declarations plus free-shape rows.
/// Row values stay as raw JSON; the embedded table carries its own type
/// tokens but those are not coerced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatatableValue {
    #[serde(default)]
    pub columns: Vec<DatatableColumn>,
    #[serde(default)]
    pub rows: Vec<serde_json::Map<String, serde_json::Value>>,
}

impl DatatableValue {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column(&self, id: &str) -> Option<&DatatableColumn> {
        self.columns.iter().find(|col| col.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_with_missing_parts() {
        let value: DatatableValue = serde_json::from_str("{}").unwrap();
        assert!(value.columns.is_empty());
        assert_eq!(value.row_count(), 0);

        let value: DatatableValue =
            serde_json::from_str(r#"{"columns":[{"id":"a"}]}"#).unwrap();
        assert_eq!(value.columns[0].id, "a");
        assert_eq!(value.columns[0].column_type, "");
    }

    #[test]
    fn type_key_maps_to_column_type() {
        let value: DatatableValue = serde_json::from_str(
            r#"{"columns":[{"id":"n","type":"number","label":"Count"}],"rows":[{"n":3}]}"#,
        )
        .unwrap();
        assert_eq!(value.column("n").unwrap().column_type, "number");
        assert_eq!(value.rows[0]["n"], serde_json::json!(3));
    }
}
