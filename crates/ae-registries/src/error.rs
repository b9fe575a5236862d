//! Registry snapshot errors

use std::path::PathBuf;
use thiserror::Error;

/// Result type for registry operations
pub type RegistryResult<T> = Result<T, RegistryError>;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("failed to read registry snapshot {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON deserialization error: {0}")]
    Json(#[from] serde_json::Error),
}
