//! Error definitions for preprocessing
use std::path::PathBuf;

use thiserror::Error;
pub type Result<T> = std::result::Result<T, PreprocessingError>;

#[derive(Error, Debug)]
pub enum PreprocessingError {
    #[error("not enough samples")]
    NotEnoughSamples,
    #[error("feature {0} has no observed values to learn from")]
    NoObservedValues(usize),
    #[error("expected {expected} features, got {found}")]
    FeatureMismatch { expected: usize, found: usize },
    #[error("feature {feature} contains category `{category}` not seen during fitting")]
    UnknownCategory { feature: usize, category: String },
    #[error("expected {expected} rows, got {found}")]
    RowMismatch { expected: usize, found: usize },
    #[error("column group `{0}` has no columns")]
    EmptyColumnGroup(String),
    #[error("column `{column}` is listed twice in group `{group}`")]
    DuplicateColumn { group: String, column: String },
    #[error("column `{0}` is routed to more than one column group")]
    OverlappingColumns(String),
    #[error("cannot access {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot (de)serialize preprocessor: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    MlpipeError(#[from] mlpipe::error::Error),
}
