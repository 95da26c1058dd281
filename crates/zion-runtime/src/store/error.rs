//! Storage error types.

use std::path::PathBuf;
use thiserror::Error;
use zion_types::ErrorCode;

/// Errors raised while persisting the session record.
#[derive(Debug, Error)]
pub enum StorageError {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Storage directory creation failed.
    #[error("failed to create storage directory: {path}")]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StorageError {
    pub fn directory_creation(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::DirectoryCreation {
            path: path.into(),
            source,
        }
    }
}

impl ErrorCode for StorageError {
    fn code(&self) -> &'static str {
        match self {
            Self::Io(_) => "STORAGE_IO",
            Self::Serialization(_) => "STORAGE_SERIALIZATION",
            Self::DirectoryCreation { .. } => "STORAGE_DIRECTORY_CREATION",
        }
    }

    fn is_recoverable(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}
