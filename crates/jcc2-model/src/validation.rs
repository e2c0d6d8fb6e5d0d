//! Validation findings.
//!
//! Findings are data, not errors: validation always runs to completion and
//! hands the caller the full list alongside the dataset.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValidationKind {
    /// A `required` field holds a null cell.
    MissingRequired,
    /// A radio/select value outside the declared option list.
    InvalidOption,
    /// Checkbox selections outside the declared option list.
    InvalidOptionsSubset,
    /// A number below its `min:` bound.
    BelowMinimum,
    /// A number above its `max:` bound.
    AboveMaximum,
}

impl ValidationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationKind::MissingRequired => "missing-required",
            ValidationKind::InvalidOption => "invalid-option",
            ValidationKind::InvalidOptionsSubset => "invalid-options-subset",
            ValidationKind::BelowMinimum => "below-minimum",
            ValidationKind::AboveMaximum => "above-maximum",
        }
    }
}

impl fmt::Display for ValidationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One constraint violation for one cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    /// 0-based index into the dataset's data rows (header and schema row
    /// are not counted).
    pub row_index: usize,
    pub column_name: String,
    pub kind: ValidationKind,
    pub detail: String,
}

impl ValidationError {
    pub fn new(
        row_index: usize,
        column_name: impl Into<String>,
        kind: ValidationKind,
        detail: impl Into<String>,
    ) -> Self {
        ValidationError {
            row_index,
            column_name: column_name.into(),
            kind,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "row {}, {}: {} ({})",
            self.row_index, self.column_name, self.kind, self.detail
        )
    }
}
