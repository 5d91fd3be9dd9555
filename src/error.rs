//! Error types for catalog loading, storage and quiz sessions

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading a catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Catalog file could not be read
    #[error("Failed to read catalog from {path:?}: {source}")]
    Io {
        /// Path that was being read
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Catalog JSON is malformed
    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    /// Catalog parsed but breaks a content rule
    #[error("Invalid catalog: {0}")]
    Invalid(String),
}

/// Errors raised by a key-value store
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed
    #[error("Storage I/O error for key '{key}': {source}")]
    Io {
        /// Key being accessed
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Value could not be serialized
    #[error("Failed to serialize value: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Key contains characters that cannot name a file
    #[error("Invalid storage key '{0}'")]
    InvalidKey(String),
}

/// Errors raised when starting a quiz session
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuizError {
    /// There are no questions to draw from
    #[error("No practice questions available")]
    EmptyPool,
}
