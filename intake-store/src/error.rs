//! Error types for the storage layer.

use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur in storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Database error from SQLite.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Connection or schema setup failed.
    #[error(transparent)]
    Db(#[from] intake_db::DbError),

    /// A stored value could not be converted back into a domain type.
    #[error("invalid stored data: {0}")]
    Types(#[from] intake_types::Error),

    /// No canonical record has this natural key.
    #[error("no patient with insurance number {0}")]
    NotFound(String),

    /// A canonical record with this natural key already exists.
    #[error("duplicate insurance number {0}")]
    DuplicateKey(String),
}
