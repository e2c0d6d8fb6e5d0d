//! The typed-cell pass.
//!
//! Raw cells become typed values in one pass per schema column. Coercion
//! never errors: a value that refuses its declared type becomes null and,
//! where that hides real content (datatable cells), leaves a warning in the
//! context. Columns without a typed schema keep their raw text.

use jcc2_model::{CellValue, Dataset, FieldSchema, FieldType, SurveySchema};

use jcc2_ingest::SurveyTable;

use crate::context::ProcessContext;
use crate::datatable::decode_datatable;
use crate::datetime::{parse_date_value, parse_datetime_value};

/// Separator between selections of a `checkbox|multiple` cell.
pub const MULTI_VALUE_SEPARATOR: &str = "; ";

/// Builds the typed dataset: every raw cell lands as text (empty cells as
/// null), then each typed column is rewritten in place.
pub fn coerce_table(
    table: &SurveyTable,
    schema: &SurveySchema,
    context: &mut ProcessContext,
) -> Dataset {
    let mut dataset = Dataset::new(table.headers.clone());
    for row in &table.rows {
        dataset.push_row(row.iter().map(|cell| raw_cell(cell)).collect());
    }

    for field in schema.fields() {
        let Some(position) = dataset.column_index(&field.name) else {
            continue;
        };
        coerce_column(&mut dataset, position, field, context);
    }

    dataset
}

fn raw_cell(raw: &str) -> CellValue {
    if raw.is_empty() {
        CellValue::Null
    } else {
        CellValue::Text(raw.to_string())
    }
}

fn coerce_column(
    dataset: &mut Dataset,
    position: usize,
    field: &FieldSchema,
    context: &mut ProcessContext,
) {
    match field.field_type {
        FieldType::Number => dataset.transform_column(position, |cell| match cell {
            CellValue::Text(text) => parse_number(&text).map(CellValue::Number).unwrap_or_default(),
            other => other,
        }),
        FieldType::Date => dataset.transform_column(position, |cell| match cell {
            CellValue::Text(text) => {
                parse_date_value(&text).map(CellValue::Date).unwrap_or_default()
            }
            other => other,
        }),
        FieldType::DateTime => dataset.transform_column(position, |cell| match cell {
            CellValue::Text(text) => parse_datetime_value(&text)
                .map(CellValue::DateTime)
                .unwrap_or_default(),
            other => other,
        }),
        FieldType::Checkbox if field.multiple => {
            dataset.transform_column(position, |cell| match cell {
                CellValue::Null => CellValue::Multi(Vec::new()),
                CellValue::Text(text) => CellValue::Multi(
                    text.split(MULTI_VALUE_SEPARATOR).map(str::to_string).collect(),
                ),
                other => other,
            });
        }
        FieldType::Datatable => {
            dataset.transform_column(position, |cell| match cell {
                CellValue::Text(text) => match decode_datatable(&text) {
                    Ok(Some(table)) => CellValue::Table(table),
                    Ok(None) => CellValue::Null,
                    Err(error) => {
                        context.warn_column(
                            &field.name,
                            format!("datatable cell does not parse: {error}"),
                        );
                        CellValue::Null
                    }
                },
                other => other,
            });
        }
        FieldType::Unknown => {
            context.warn_column(&field.name, "declared type is unknown, keeping text");
        }
        // identifier stays verbatim; text/radio/select pass through, as
        // does a single-value checkbox
        FieldType::Identifier
        | FieldType::Text
        | FieldType::Radio
        | FieldType::Select
        | FieldType::Checkbox => {}
    }
}

fn parse_number(text: &str) -> Option<f64> {
    let value = text.trim().parse::<f64>().ok()?;
    // "NaN" parses but means missing, same as an unparsable cell
    if value.is_nan() { None } else { Some(value) }
}
