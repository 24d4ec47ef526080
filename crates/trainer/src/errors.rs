use brain_age_model::ModelError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors returned by the brain-age trainer.
#[derive(Debug, Error)]
pub enum TrainerError {
    #[error("CSV must contain a '{column}' column as the target")]
    MissingTargetColumn { column: String },

    #[error("validation error: {0}")]
    Validation(String),

    #[error("line {line}, column '{column}': invalid number '{value}'")]
    Parse {
        line: u64,
        column: String,
        value: String,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Model(#[from] ModelError),
}

impl TrainerError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, TrainerError>;
