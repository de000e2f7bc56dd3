//! Error definitions for dataset loading
use std::path::PathBuf;

use thiserror::Error;
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("cannot open {}: {}", .path.display(), .source)]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed delimited text: {0}")]
    Csv(#[from] csv::Error),
    #[error("input has no header row")]
    MissingHeader,
    #[error(transparent)]
    Table(#[from] mlpipe::error::Error),
}
