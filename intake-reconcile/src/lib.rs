//! Decision logic for patient intake.
//!
//! Everything in this crate is a pure function of its inputs:
//!
//! - [`validate_email`] / [`validate_past_date`] / [`screen_record`]: field
//!   well-formedness checks applied at the source boundary
//! - [`compute_identity`]: stable surrogate ids for derived records
//! - [`reconcile`]: insert / field-level update / no-op decision against the
//!   stored record for the same insurance number
//! - [`project`]: canonical record to interoperability shape
//!
//! No function here reads the clock or touches a store. Callers pass `today`
//! and `now` explicitly, which keeps every decision reproducible in tests.
//!
//! Reconciliation guarantees:
//! - **Non-erasure**: an absent incoming value never overwrites a stored one
//! - **Monotonic watermark**: `last_visit_date` never moves backwards
//! - **Quiet no-ops**: a record with nothing new produces no write at all

mod identity;
mod merge;
mod projection;
mod validate;

pub use identity::compute_identity;
pub use merge::{reconcile, reconcile_normalized};
pub use projection::{full_name, project};
pub use validate::{screen_record, validate_email, validate_past_date};
