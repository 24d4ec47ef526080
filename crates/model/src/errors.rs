//! Error types for the brain-age model crate

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while fitting, scoring or persisting a model
#[derive(Error, Debug)]
pub enum ModelError {
    /// Inputs have the wrong shape or contain unusable values
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Training data cannot support a least-squares fit
    #[error("degenerate training data: {0}")]
    Degenerate(String),

    /// I/O error on an artifact path
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Artifact was written by an incompatible format version
    #[error("unsupported artifact format version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    /// Artifact content does not match its sidecar hash
    #[error("artifact hash mismatch for {path}: expected {expected}, computed {actual}")]
    IntegrityMismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },
}

impl ModelError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for model operations
pub type Result<T> = std::result::Result<T, ModelError>;
