//! Typed cell values.
//!
//! Every coerced cell is an explicit variant; absence is `Null`, never an
//! empty-string or NaN sentinel, so consumers must handle missing data
//! deliberately.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::datatable::DatatableValue;

/// One typed cell of the dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Missing or uncoercible value.
    #[default]
    Null,
    Text(String),
    Number(f64),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    /// Ordered selections of a `checkbox|multiple` field.
    Multi(Vec<String>),
    /// Decoded payload of a `datatable` field.
    Table(DatatableValue),
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_multi(&self) -> Option<&[String]> {
        match self {
            CellValue::Multi(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&DatatableValue> {
        match self {
            CellValue::Table(table) => Some(table),
            _ => None,
        }
    }

    /// Renders the value the way option membership sees it. `None` for null
    /// cells and embedded tables.
    pub fn string_form(&self) -> Option<String> {
        match self {
            CellValue::Null | CellValue::Table(_) => None,
            CellValue::Text(text) => Some(text.clone()),
            CellValue::Number(value) => Some(value.to_string()),
            CellValue::Date(date) => Some(date.to_string()),
            CellValue::DateTime(datetime) => Some(datetime.to_string()),
            CellValue::Multi(items) => Some(items.join("; ")),
        }
    }
}
