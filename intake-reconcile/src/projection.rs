//! Projection of canonical patients into the interoperability shape.

use crate::identity::compute_identity;
use intake_types::{CanonicalPatient, DerivedPatient, Telecom};

/// Joins first and last name with one space.
///
/// Absent parts render as empty strings, so a missing name leaves a leading
/// or trailing space. Callers relying on the stored form expect this.
#[must_use]
pub fn full_name(first_name: Option<&str>, last_name: Option<&str>) -> String {
    format!(
        "{} {}",
        first_name.unwrap_or_default(),
        last_name.unwrap_or_default()
    )
}

/// Builds the derived record for a canonical patient.
#[must_use]
pub fn project(canonical: &CanonicalPatient) -> DerivedPatient {
    let fields = &canonical.fields;
    let birth_date = fields.birth_date.map(|d| d.format("%Y-%m-%d").to_string());

    DerivedPatient {
        id: compute_identity(
            fields.first_name.as_deref(),
            fields.last_name.as_deref(),
            birth_date.as_deref(),
            fields.insurance_number.as_deref(),
        ),
        full_name: full_name(fields.first_name.as_deref(), fields.last_name.as_deref()),
        birth_date: fields.birth_date,
        gender: fields.gender.clone(),
        address: fields.address.clone(),
        telecom: Telecom {
            phone: fields.phone_number.clone(),
            email: fields.email.clone(),
        },
        marital_status: fields.marital_status.clone(),
        insurance_number: fields.insurance_number.clone(),
        nationality: fields.nationality.clone(),
    }
}
