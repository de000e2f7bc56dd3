//! Saving and loading fitted transformers
//!
//! Fitted objects are stored as JSON. Saving creates missing parent directories and replaces
//! an existing file at the same path.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{PreprocessingError, Result};

/// Serializes `object` to `path`
pub fn save_object<P: AsRef<Path>, O: Serialize>(path: P, object: &O) -> Result<()> {
    let path = path.as_ref();
    let io_error = |source| PreprocessingError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error)?;
    }

    let mut writer = BufWriter::new(File::create(path).map_err(io_error)?);
    serde_json::to_writer(&mut writer, object)?;
    writer.flush().map_err(io_error)?;

    tracing::debug!("saved object to {}", path.display());
    Ok(())
}

/// Deserializes an object previously written with [`save_object`]
pub fn load_object<P: AsRef<Path>, O: DeserializeOwned>(path: P) -> Result<O> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| PreprocessingError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let object = serde_json::from_reader(BufReader::new(file))?;
    tracing::debug!("loaded object from {}", path.display());

    Ok(object)
}
