//! Located errors of a transformation run
//!
//! Library errors are wrapped once, at the public operation which observed them, together with
//! a description of the operation and the source location of the call. The wrapped error is
//! logged at `error` level before it is returned.

use std::fmt;
use std::panic::Location;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PipelineError>;

/// Coarse classification of a failure
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// A table could not be read or does not match the expected columns
    DataLoading,
    /// Fitting or applying the preprocessor failed
    Transformation,
    /// The fitted preprocessor or the output could not be written or read back
    Serialization,
    /// The run could not be set up
    Configuration,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::DataLoading => "data loading",
            ErrorKind::Transformation => "transformation",
            ErrorKind::Serialization => "serialization",
            ErrorKind::Configuration => "configuration",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
#[error(
    "error in {} line {} while {}: {}",
    .location.file(),
    .location.line(),
    .operation,
    .source
)]
pub struct PipelineError {
    operation: String,
    location: &'static Location<'static>,
    kind: ErrorKind,
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
}

impl PipelineError {
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Description of the operation which failed
    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// Source location which attached the context
    pub fn location(&self) -> &'static Location<'static> {
        self.location
    }
}

/// Errors which know which [`ErrorKind`] they belong to
pub trait Classify {
    fn kind(&self) -> ErrorKind;
}

/// Failures of the run setup itself
#[derive(Error, Debug)]
pub enum SetupError {
    #[error("target column `{0}` is also listed as a feature column")]
    TargetIsFeature(String),
    #[error("logging is already set up in this process")]
    LoggingInstalled,
}

impl Classify for SetupError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Configuration
    }
}

impl Classify for mlpipe::error::Error {
    fn kind(&self) -> ErrorKind {
        use mlpipe::error::Error::*;

        match self {
            Parameters(_) | NdShape(_) => ErrorKind::Transformation,
            _ => ErrorKind::DataLoading,
        }
    }
}

impl Classify for mlpipe_datasets::Error {
    fn kind(&self) -> ErrorKind {
        ErrorKind::DataLoading
    }
}

impl Classify for mlpipe_preprocessing::PreprocessingError {
    fn kind(&self) -> ErrorKind {
        use mlpipe_preprocessing::PreprocessingError::*;

        match self {
            Io { .. } | Json(_) => ErrorKind::Serialization,
            // a feature cell which is not a number fails the fitted step, not the loading
            MlpipeError(mlpipe::error::Error::NotNumeric { .. }) => ErrorKind::Transformation,
            MlpipeError(err) => err.kind(),
            EmptyColumnGroup(_) | DuplicateColumn { .. } | OverlappingColumns(_) => {
                ErrorKind::Configuration
            }
            _ => ErrorKind::Transformation,
        }
    }
}

impl Classify for ndarray::ShapeError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Transformation
    }
}

impl Classify for csv::Error {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Serialization
    }
}

impl Classify for std::io::Error {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Configuration
    }
}

impl Classify for serde_json::Error {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Configuration
    }
}

impl Classify for tracing_subscriber::util::TryInitError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Configuration
    }
}

/// Attaches the failed operation and the caller's location to an error
pub trait ResultExt<T> {
    fn during(self, operation: &str) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Classify + std::error::Error + Send + Sync + 'static,
{
    #[track_caller]
    fn during(self, operation: &str) -> Result<T> {
        match self {
            Ok(value) => Ok(value),
            Err(source) => {
                let err = PipelineError {
                    operation: operation.to_string(),
                    location: Location::caller(),
                    kind: source.kind(),
                    source: Box::new(source),
                };
                tracing::error!(kind = %err.kind, "{}", err);
                Err(err)
            }
        }
    }
}
