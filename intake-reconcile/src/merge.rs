//! Merge engine: decides how an incoming record lands in the canonical store.
//!
//! The engine is a pure state machine. It consumes the stored record (if any)
//! and an incoming row and produces a [`WriteIntent`]; the pipeline performs
//! the actual write.

use intake_types::{
    normalize, CanonicalPatient, FieldChange, IncomingRecord, PatientField, PatientFields,
    PatientUpdate, Timestamp, WriteIntent,
};

/// Reconciles a raw incoming row against the stored record for its key.
///
/// The row is normalized exactly once (sentinels and unparseable dates become
/// absent) and then handed to [`reconcile_normalized`].
#[must_use]
pub fn reconcile(
    existing: Option<&CanonicalPatient>,
    incoming: &IncomingRecord,
    now: Timestamp,
) -> WriteIntent {
    reconcile_normalized(existing, normalize(incoming), now)
}

/// Reconciles an already-normalized field set.
///
/// - No stored record: insert everything, stamping `created_at` and
///   `updated_at` with `now`.
/// - Stored record: collect, in column order, every incoming field that is
///   present and differs from the stored value. An incoming `last_visit_date`
///   only counts when it is later than the stored one. If anything was
///   found, the update also carries the later of the two `last_visit_date`s
///   and `now` as `updated_at`. If nothing was found, nothing is written.
#[must_use]
pub fn reconcile_normalized(
    existing: Option<&CanonicalPatient>,
    incoming: PatientFields,
    now: Timestamp,
) -> WriteIntent {
    let Some(existing) = existing else {
        return WriteIntent::Insert(CanonicalPatient::new(incoming, now));
    };

    let changes: Vec<FieldChange> = incoming
        .present()
        .filter(|(field, _)| *field != PatientField::LastVisitDate)
        .filter(|(field, value)| existing.fields.get(*field).as_ref() != Some(value))
        .map(|(field, value)| FieldChange::new(field, value))
        .collect();

    // Option orders None below Some, so an absent date never wins.
    let last_visit_date = existing
        .fields
        .last_visit_date
        .max(incoming.last_visit_date);
    let visit_advanced = last_visit_date != existing.fields.last_visit_date;

    if changes.is_empty() && !visit_advanced {
        return WriteIntent::NoOp;
    }

    WriteIntent::Update(PatientUpdate {
        changes,
        last_visit_date,
        updated_at: now,
    })
}
