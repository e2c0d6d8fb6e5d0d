//! Per-load warning collection.
//!
//! Every processor instance owns one context, so recoverable load problems
//! (dropped schema columns, unknown types, datatable cells that refuse to
//! parse) stay with that instance instead of living in global state. Each
//! warning is also echoed through `tracing` when it is recorded.

use serde::Serialize;
use tracing::warn;

/// One recoverable problem noticed while loading a survey file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadWarning {
    /// Column the problem belongs to, when there is one.
    pub column: Option<String>,
    pub message: String,
}

/// Warning sink passed through the load stages.
#[derive(Debug, Default)]
pub struct ProcessContext {
    warnings: Vec<LoadWarning>,
}

impl ProcessContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a column-scoped warning.
    pub fn warn_column(&mut self, column: &str, message: impl Into<String>) {
        let message = message.into();
        warn!(column = column, message = message.as_str(), "survey load warning");
        self.warnings.push(LoadWarning {
            column: Some(column.to_string()),
            message,
        });
    }

    /// Records a file-scoped warning.
    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!(message = message.as_str(), "survey load warning");
        self.warnings.push(LoadWarning {
            column: None,
            message,
        });
    }

    pub fn warnings(&self) -> &[LoadWarning] {
        &self.warnings
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warnings_accumulate_in_order() {
        let mut context = ProcessContext::new();
        context.warn_column("a", "first");
        context.warn("second");
        assert_eq!(context.warning_count(), 2);
        assert_eq!(context.warnings()[0].column.as_deref(), Some("a"));
        assert!(context.warnings()[1].column.is_none());
    }
}
