//! Error types in mlpipe
//!

use thiserror::Error;

use ndarray::ShapeError;
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone)]
pub enum Error {
    #[error("invalid parameter {0}")]
    Parameters(String),
    #[error("invalid ndarray shape {0}")]
    NdShape(#[from] ShapeError),
    #[error("column `{0}` not found")]
    MissingColumn(String),
    #[error("column `{0}` appears more than once")]
    DuplicateColumn(String),
    #[error("column `{column}` has {found} values, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        found: usize,
    },
    #[error("row {row} has {found} fields, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("column `{column}` row {row}: cannot parse `{value}` as a number")]
    NotNumeric {
        column: String,
        row: usize,
        value: String,
    },
    #[error("column `{column}` row {row}: target value is missing")]
    MissingTarget { column: String, row: usize },
}
