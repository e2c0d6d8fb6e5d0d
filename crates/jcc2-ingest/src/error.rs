use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("read csv {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("{path}: expected a header row and a schema row, found {rows} row(s)")]
    MissingSchemaRow { path: PathBuf, rows: usize },
}

pub type Result<T> = std::result::Result<T, IngestError>;
