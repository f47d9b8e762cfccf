//! Surrogate identifiers for derived records.

use intake_types::PatientId;
use md5::{Digest, Md5};

/// Derives the identifier of a derived record from its identity tuple.
///
/// Absent parts count as empty strings. The parts are concatenated in fixed
/// order with no separator and hashed with MD5. The same tuple always yields
/// the same id; distinct tuples that concatenate to the same string (or
/// collide) share an id.
#[must_use]
pub fn compute_identity(
    first_name: Option<&str>,
    last_name: Option<&str>,
    birth_date: Option<&str>,
    insurance_number: Option<&str>,
) -> PatientId {
    let mut hasher = Md5::new();
    for part in [first_name, last_name, birth_date, insurance_number] {
        hasher.update(part.unwrap_or_default().as_bytes());
    }
    PatientId::from_digest(hasher.finalize().into())
}
