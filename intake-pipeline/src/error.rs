//! Error types for pipeline runs.

use intake_source::SourceError;
use intake_store::StorageError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Errors that end a run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Configuration values are unusable.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Configuration file is not valid TOML for [`IntakeConfig`](crate::IntakeConfig).
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The source could not be opened or read.
    #[error("source error: {0}")]
    Source(#[from] SourceError),

    /// A store operation failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// A malformed row was found while running with the abort policy.
    #[error("malformed row at line {line}: {source}")]
    MalformedRow {
        line: u64,
        #[source]
        source: SourceError,
    },
}
