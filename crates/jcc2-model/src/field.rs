//! Field schemas parsed from the embedded schema row.
//!
//! JCC2 survey exports carry a compact, pipe-delimited schema tag for every
//! column in the second CSV row, e.g.
//! `radio|required|options:Yes,No|depends_on:mop_1_1.workaround_use`.
//! The first segment names the field type; the remaining segments are
//! attribute tokens drawn from a fixed vocabulary. Tags written by older
//! exporter versions may carry tokens this vocabulary does not know; those
//! are ignored rather than rejected.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::error::{Result, SchemaError};

/// Declared type of a survey column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Free text; also the fallback for empty or unrecognized type tokens.
    Text,
    /// Floating-point value, optionally bounded by `min:`/`max:`.
    Number,
    /// Calendar date.
    Date,
    /// Date with time of day.
    DateTime,
    /// Opaque key such as a submission id; never normalized.
    Identifier,
    /// Single choice from `options:`.
    Radio,
    /// Single choice from `options:`, rendered as a dropdown upstream.
    Select,
    /// Choice field; with `multiple`, the cell holds a `"; "`-joined list.
    Checkbox,
    /// Nested table embedded in the cell as JSON.
    Datatable,
    /// Declared as unknown by the exporter; handled as text downstream.
    Unknown,
}

impl FieldType {
    /// Returns the type token as written in schema tags.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Number => "number",
            FieldType::Date => "date",
            FieldType::DateTime => "datetime",
            FieldType::Identifier => "identifier",
            FieldType::Radio => "radio",
            FieldType::Select => "select",
            FieldType::Checkbox => "checkbox",
            FieldType::Datatable => "datatable",
            FieldType::Unknown => "unknown",
        }
    }

    /// Matches an exact type token; the vocabulary is closed and
    /// case-sensitive (the exporter emits lowercase tokens).
    pub fn from_token(token: &str) -> Option<FieldType> {
        match token {
            "text" => Some(FieldType::Text),
            "number" => Some(FieldType::Number),
            "date" => Some(FieldType::Date),
            "datetime" => Some(FieldType::DateTime),
            "identifier" => Some(FieldType::Identifier),
            "radio" => Some(FieldType::Radio),
            "select" => Some(FieldType::Select),
            "checkbox" => Some(FieldType::Checkbox),
            "datatable" => Some(FieldType::Datatable),
            "unknown" => Some(FieldType::Unknown),
            _ => None,
        }
    }

    /// Returns true for single-choice types whose cells are checked against
    /// the option list.
    pub fn is_choice(&self) -> bool {
        matches!(self, FieldType::Radio | FieldType::Select)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Nested-table declaration carried by `datatable` fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DatatableSpec {
    /// Declared sub-column count (`columns:`).
    pub columns: Option<usize>,
    /// Sub-column id to type-token mapping (`column_types:`).
    pub column_types: BTreeMap<String, String>,
    /// Minimum row count the form enforced (`minRows:`).
    pub min_rows: Option<usize>,
    /// Maximum row count the form enforced (`maxRows:`).
    pub max_rows: Option<usize>,
}

impl DatatableSpec {
    pub fn is_empty(&self) -> bool {
        self.columns.is_none()
            && self.column_types.is_empty()
            && self.min_rows.is_none()
            && self.max_rows.is_none()
    }
}

/// One column's parsed schema: header name, section assignment, type, and
/// constraint attributes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSchema {
    /// Raw column header, either `section.field` or a bare system name.
    pub name: String,
    /// Text before the first `.` in the header; `None` for system columns
    /// and for headers with an empty prefix.
    pub section: Option<String>,
    /// Text after the first `.`, or the whole header when there is none.
    pub field_id: String,
    pub field_type: FieldType,
    pub required: bool,
    /// For `checkbox`: the cell holds a `"; "`-delimited list.
    pub multiple: bool,
    /// Valid values for choice fields, in declaration order.
    pub options: Vec<String>,
    /// Controlling field name; informational, not enforced.
    pub depends_on: Option<String>,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    /// Present exactly when `field_type` is `datatable`.
    pub datatable: Option<DatatableSpec>,
}

/// Recognized attribute tokens. Value-carrying tags borrow the text after
/// their prefix.
enum AttrTag<'a> {
    Required,
    Optional,
    Multiple,
    Options(&'a str),
    DependsOn(&'a str),
    Min(&'a str),
    Max(&'a str),
    Columns(&'a str),
    ColumnTypes(&'a str),
    MinRows(&'a str),
    MaxRows(&'a str),
    Unrecognized,
}

fn recognize(token: &str) -> AttrTag<'_> {
    match token {
        "required" => AttrTag::Required,
        "optional" => AttrTag::Optional,
        "multiple" => AttrTag::Multiple,
        _ => {
            if let Some(value) = token.strip_prefix("options:") {
                AttrTag::Options(value)
            } else if let Some(value) = token.strip_prefix("depends_on:") {
                AttrTag::DependsOn(value)
            } else if let Some(value) = token.strip_prefix("column_types:") {
                AttrTag::ColumnTypes(value)
            } else if let Some(value) = token.strip_prefix("columns:") {
                AttrTag::Columns(value)
            } else if let Some(value) = token.strip_prefix("minRows:") {
                AttrTag::MinRows(value)
            } else if let Some(value) = token.strip_prefix("maxRows:") {
                AttrTag::MaxRows(value)
            } else if let Some(value) = token.strip_prefix("min:") {
                AttrTag::Min(value)
            } else if let Some(value) = token.strip_prefix("max:") {
                AttrTag::Max(value)
            } else {
                AttrTag::Unrecognized
            }
        }
    }
}

impl FieldSchema {
    /// Parses one schema tag for one column header.
    ///
    /// Degrades instead of failing wherever possible: an empty or
    /// unrecognized type token falls back to `text`, unrecognized attribute
    /// tokens are skipped. The single hard failure is a numeric attribute
    /// (`min:`, `max:`, `columns:`, `minRows:`, `maxRows:`) whose value does
    /// not parse; callers drop the column from the typed schema in that
    /// case.
    pub fn parse(name: &str, tag: &str) -> Result<FieldSchema> {
        let (section, field_id) = split_column_name(name);

        let mut segments = tag.split('|');
        let type_token = segments.next().unwrap_or("");
        let field_type = match FieldType::from_token(type_token) {
            Some(field_type) => field_type,
            None => {
                if !type_token.is_empty() {
                    debug!(column = name, token = type_token, "unrecognized type token, using text");
                }
                FieldType::Text
            }
        };

        let mut required = false;
        let mut multiple = false;
        let mut options = Vec::new();
        let mut depends_on = None;
        let mut min_value = None;
        let mut max_value = None;
        let mut spec = DatatableSpec::default();

        // The outer split consumes every `|`, so the `id:type` pairs of a
        // `column_types:` list arrive as separate segments. Segments after
        // that tag keep feeding the pair list until the next recognized
        // attribute token; pairs without a colon are skipped.
        let mut in_column_types = false;
        for token in segments {
            match recognize(token) {
                AttrTag::Required => {
                    required = true;
                    in_column_types = false;
                }
                AttrTag::Optional => {
                    required = false;
                    in_column_types = false;
                }
                AttrTag::Multiple => {
                    multiple = true;
                    in_column_types = false;
                }
                AttrTag::Options(value) => {
                    options = value.split(',').map(|opt| opt.trim().to_string()).collect();
                    in_column_types = false;
                }
                AttrTag::DependsOn(value) => {
                    depends_on = Some(value.to_string());
                    in_column_types = false;
                }
                AttrTag::Min(value) => {
                    min_value = Some(parse_bound(name, "min", value)?);
                    in_column_types = false;
                }
                AttrTag::Max(value) => {
                    max_value = Some(parse_bound(name, "max", value)?);
                    in_column_types = false;
                }
                AttrTag::Columns(value) => {
                    spec.columns = Some(parse_count(name, "columns", value)?);
                    in_column_types = false;
                }
                AttrTag::MinRows(value) => {
                    spec.min_rows = Some(parse_count(name, "minRows", value)?);
                    in_column_types = false;
                }
                AttrTag::MaxRows(value) => {
                    spec.max_rows = Some(parse_count(name, "maxRows", value)?);
                    in_column_types = false;
                }
                AttrTag::ColumnTypes(value) => {
                    push_column_type_pair(&mut spec.column_types, value);
                    in_column_types = true;
                }
                AttrTag::Unrecognized => {
                    if in_column_types {
                        push_column_type_pair(&mut spec.column_types, token);
                    } else if !token.is_empty() {
                        debug!(column = name, token, "ignoring unrecognized schema tag token");
                    }
                }
            }
        }

        let datatable = match field_type {
            FieldType::Datatable => Some(spec),
            _ => None,
        };

        Ok(FieldSchema {
            name: name.to_string(),
            section,
            field_id,
            field_type,
            required,
            multiple,
            options,
            depends_on,
            min_value,
            max_value,
            datatable,
        })
    }

    /// Returns true when cells of this field hold a list of selections.
    pub fn is_multi_checkbox(&self) -> bool {
        self.field_type == FieldType::Checkbox && self.multiple
    }

    /// Returns true when this column belongs to no section.
    pub fn is_system(&self) -> bool {
        self.section.is_none()
    }
}

/// Splits a header on the first `.` into section prefix and field id. An
/// empty prefix counts as no section at all.
pub fn split_column_name(name: &str) -> (Option<String>, String) {
    match name.split_once('.') {
        Some((section, field)) if !section.is_empty() => {
            (Some(section.to_string()), field.to_string())
        }
        Some((_, field)) => (None, field.to_string()),
        None => (None, name.to_string()),
    }
}

fn parse_bound(column: &str, attribute: &'static str, value: &str) -> Result<f64> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| SchemaError::InvalidNumericAttribute {
            column: column.to_string(),
            attribute,
            value: value.to_string(),
        })
}

fn parse_count(column: &str, attribute: &'static str, value: &str) -> Result<usize> {
    value
        .trim()
        .parse::<usize>()
        .map_err(|_| SchemaError::InvalidNumericAttribute {
            column: column.to_string(),
            attribute,
            value: value.to_string(),
        })
}

fn push_column_type_pair(map: &mut BTreeMap<String, String>, pair: &str) {
    if let Some((id, column_type)) = pair.split_once(':') {
        map.insert(id.to_string(), column_type.to_string());
    }
}
