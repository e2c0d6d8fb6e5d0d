use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("column {column:?}: `{attribute}` value {value:?} is not numeric")]
    InvalidNumericAttribute {
        column: String,
        attribute: &'static str,
        value: String,
    },
}

pub type Result<T> = std::result::Result<T, SchemaError>;
