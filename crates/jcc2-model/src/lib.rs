pub mod datatable;
pub mod dataset;
pub mod error;
pub mod field;
pub mod format;
pub mod schema;
pub mod validation;
pub mod value;

pub use datatable::{DatatableColumn, DatatableValue};
pub use dataset::Dataset;
pub use error::{Result, SchemaError};
pub use field::{DatatableSpec, FieldSchema, FieldType, split_column_name};
pub use format::DataFormat;
pub use schema::SurveySchema;
pub use validation::{ValidationError, ValidationKind};
pub use value::CellValue;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parsed_field_round_trips_through_schema_index() {
        let mut schema = SurveySchema::new();
        schema.push(FieldSchema::parse("mop_1_1.task_performance", "radio|options:Yes,No").unwrap());
        schema.push(FieldSchema::parse("submission_id", "identifier").unwrap());

        let field = schema.get("mop_1_1.task_performance").unwrap();
        assert_eq!(field.section.as_deref(), Some("mop_1_1"));
        assert!(schema.get("submission_id").unwrap().is_system());
    }

    #[test]
    fn validation_error_json_shape() {
        let error = ValidationError::new(1, "col", ValidationKind::InvalidOption, "bad value");
        let value = serde_json::to_value(&error).unwrap();
        assert_eq!(value["kind"], "invalid-option");
        assert_eq!(value["rowIndex"], 1);
    }
}
