use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when reading or writing a storage slot.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing file could not be read or written.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A serialization/deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The stored envelope was written by an incompatible schema.
    #[error("Unsupported schema version {found} (expected {expected})")]
    UnsupportedSchema { found: u32, expected: u32 },
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;
