use crate::StorageResult;
use intake_types::{CanonicalPatient, DerivedPatient, PatientId, PatientUpdate};

/// Persistence contract used by the ingest and projection phases.
///
/// Lookups are by natural key. Records without an insurance number can be
/// inserted any number of times but can never be found or updated.
pub trait PatientStore {
    /// Returns the canonical record for `insurance_number`, if one exists.
    fn find_by_natural_key(&self, insurance_number: &str)
        -> StorageResult<Option<CanonicalPatient>>;

    /// Inserts a new canonical record.
    ///
    /// Fails with [`StorageError::DuplicateKey`](crate::StorageError::DuplicateKey)
    /// if a record with the same insurance number is already stored.
    fn insert_canonical(&mut self, patient: &CanonicalPatient) -> StorageResult<()>;

    /// Applies a field-level update to the record with this key.
    ///
    /// Writes the changed columns, the watermark and `updated_at`. Fails
    /// with [`StorageError::NotFound`](crate::StorageError::NotFound) if no
    /// record matched.
    fn apply_update(&mut self, insurance_number: &str, update: &PatientUpdate)
        -> StorageResult<()>;

    /// Inserts a derived record, replacing any record with the same id.
    fn insert_derived(&mut self, patient: &DerivedPatient) -> StorageResult<()>;

    /// Returns every canonical record in insertion order.
    fn scan_all_canonical(&self) -> StorageResult<Vec<CanonicalPatient>>;

    /// Returns the derived record with this id.
    fn find_derived(&self, id: &PatientId) -> StorageResult<Option<DerivedPatient>>;

    fn count_canonical(&self) -> StorageResult<usize>;

    fn count_derived(&self) -> StorageResult<usize>;
}
