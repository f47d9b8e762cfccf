//! Storage layer for patient intake.
//!
//! Two record sets live behind one [`PatientStore`]:
//!
//! - the canonical store, at most one row per insurance number
//! - the derived store, keyed by hash id and written by upsert
//!
//! [`SqliteStore`] is the durable implementation; [`MemoryStore`] keeps the
//! same contract in process memory for tests and dry runs.

mod error;
mod memory;
mod sqlite;
mod store;

pub use error::{StorageError, StorageResult};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use store::PatientStore;
