//! Core type definitions for patient intake.
//!
//! This crate defines the record shapes shared by every stage of the run:
//! - [`IncomingRecord`]: one source row, addressed by column name
//! - [`PatientFields`]: the normalized (sentinel-free) view of a row
//! - [`CanonicalPatient`] / [`DerivedPatient`]: the two stored record sets
//! - [`WriteIntent`]: what the merge step wants persisted
//! - [`PatientId`] and [`Timestamp`]: surrogate identifiers and write times
//!
//! Nothing here performs I/O. Validation rules live in `intake-reconcile`,
//! persistence in `intake-store`.

mod field;
mod ids;
mod intent;
mod patient;
mod record;
mod timestamp;

pub use field::{FieldValue, PatientField, COLUMN_COUNT};
pub use ids::PatientId;
pub use intent::{FieldChange, PatientUpdate, WriteIntent};
pub use patient::{CanonicalPatient, DerivedPatient, Telecom};
pub use record::{
    is_sentinel, normalize, parse_iso_date, IncomingRecord, PatientFields, UNKNOWN_SENTINEL,
};
pub use timestamp::Timestamp;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("expected {expected} columns, found {found}")]
    ColumnCount { expected: usize, found: usize },

    #[error("invalid patient id: {0}")]
    InvalidPatientId(String),

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("unknown column: {0}")]
    UnknownColumn(String),
}
