//! Constraint checks over a typed dataset.
//!
//! Every check reads the dataset and pushes findings; nothing here mutates
//! the data, so running validation twice yields the same errors twice.

use jcc2_model::{
    CellValue, Dataset, FieldSchema, FieldType, SurveySchema, ValidationError, ValidationKind,
};
use tracing::debug;

/// Runs every constraint in the schema against every row.
///
/// Findings come back in row order, and within a row in schema column order.
/// Row indexes are zero based positions into the data rows. Schema columns
/// absent from the dataset are skipped.
pub fn validate_dataset(dataset: &Dataset, schema: &SurveySchema) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (row_index, _) in dataset.rows().iter().enumerate() {
        for field in schema.fields() {
            let Some(value) = dataset.value(row_index, &field.name) else {
                continue;
            };
            check_required(row_index, field, value, &mut errors);
            check_options(row_index, field, value, &mut errors);
            check_bounds(row_index, field, value, &mut errors);
        }
    }

    debug!(errors = errors.len(), "validation complete");
    errors
}

/// A required cell with no value at all. An empty multi-select still counts
/// as an answer (the respondent saw the field and picked nothing).
fn check_required(
    row_index: usize,
    field: &FieldSchema,
    value: &CellValue,
    errors: &mut Vec<ValidationError>,
) {
    if field.required && value.is_null() {
        errors.push(ValidationError::new(
            row_index,
            &field.name,
            ValidationKind::MissingRequired,
            "Required field is empty",
        ));
    }
}

/// Membership of declared options. Scalar choice fields must match one
/// option exactly; a multi-select must stay inside the declared set.
fn check_options(
    row_index: usize,
    field: &FieldSchema,
    value: &CellValue,
    errors: &mut Vec<ValidationError>,
) {
    if field.options.is_empty() || value.is_null() {
        return;
    }

    match field.field_type {
        FieldType::Radio | FieldType::Select => {
            let Some(rendered) = value.string_form() else {
                return;
            };
            if !field.options.iter().any(|option| *option == rendered) {
                errors.push(ValidationError::new(
                    row_index,
                    &field.name,
                    ValidationKind::InvalidOption,
                    format!(
                        "Invalid option: {rendered} (valid options: {})",
                        field.options.join(", ")
                    ),
                ));
            }
        }
        FieldType::Checkbox if field.multiple => {
            let CellValue::Multi(selections) = value else {
                return;
            };
            let invalid: Vec<&str> = selections
                .iter()
                .filter(|selection| !field.options.contains(selection))
                .map(String::as_str)
                .collect();
            if !invalid.is_empty() {
                errors.push(ValidationError::new(
                    row_index,
                    &field.name,
                    ValidationKind::InvalidOptionsSubset,
                    format!(
                        "Invalid options: {} (valid options: {})",
                        invalid.join(", "),
                        field.options.join(", ")
                    ),
                ));
            }
        }
        _ => {}
    }
}

/// Numeric range constraints. Both bounds are checked independently so a
/// degenerate schema with min above max reports on both sides.
fn check_bounds(
    row_index: usize,
    field: &FieldSchema,
    value: &CellValue,
    errors: &mut Vec<ValidationError>,
) {
    if field.field_type != FieldType::Number {
        return;
    }
    let Some(number) = value.as_number() else {
        return;
    };

    if let Some(min) = field.min_value
        && number < min
    {
        errors.push(ValidationError::new(
            row_index,
            &field.name,
            ValidationKind::BelowMinimum,
            format!("Value {number} below minimum {min}"),
        ));
    }
    if let Some(max) = field.max_value
        && number > max
    {
        errors.push(ValidationError::new(
            row_index,
            &field.name,
            ValidationKind::AboveMaximum,
            format!("Value {number} above maximum {max}"),
        ));
    }
}
