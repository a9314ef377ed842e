//! Error types for snapshot and configuration loading.
//!
//! Provides a unified error type covering I/O, serialization, invalid
//! naming selectors and incomplete snapshot directories.

use std::path::PathBuf;

use directus_typegen_core::NamingError;
use thiserror::Error;

/// Errors that can occur while loading snapshots or configuration.
#[derive(Debug, Error)]
pub enum SourceError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing or serialization failure.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Unrecognized naming strategy selector.
    #[error(transparent)]
    Naming(#[from] NamingError),

    /// A snapshot directory lacks one of its JSON files.
    #[error("snapshot directory is missing '{}'", .0.display())]
    MissingPart(PathBuf),
}

/// Convenience alias for results with [`SourceError`].
pub type Result<T> = std::result::Result<T, SourceError>;
