//! Error types for the student records store.

use std::path::PathBuf;

use thiserror::Error;

/// A field that failed validation while building a record.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum RecordError {
    #[error("{field} must be a whole number, got {value:?}")]
    InvalidField { field: &'static str, value: String },
    #[error("expected 6 fields, found {0}")]
    FieldCount(usize),
}

/// Errors emitted by `StudentStore`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StoreError {
    #[error("student {0} not found")]
    NotFound(u32),
    #[error("student {0} already exists")]
    DuplicateCode(u32),
    #[error("{path}:{line}: {source}")]
    Parse {
        path: PathBuf,
        line: u64,
        #[source]
        source: RecordError,
    },
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
