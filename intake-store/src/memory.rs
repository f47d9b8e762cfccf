use crate::{PatientStore, StorageError, StorageResult};
use intake_types::{CanonicalPatient, DerivedPatient, PatientId, PatientUpdate};
use std::collections::BTreeMap;

/// In-memory patient store with the same contract as [`SqliteStore`](crate::SqliteStore).
#[derive(Debug, Default)]
pub struct MemoryStore {
    canonical: Vec<CanonicalPatient>,
    derived: BTreeMap<PatientId, DerivedPatient>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, insurance_number: &str) -> Option<usize> {
        self.canonical
            .iter()
            .position(|p| p.natural_key() == Some(insurance_number))
    }
}

impl PatientStore for MemoryStore {
    fn find_by_natural_key(
        &self,
        insurance_number: &str,
    ) -> StorageResult<Option<CanonicalPatient>> {
        Ok(self
            .position(insurance_number)
            .map(|i| self.canonical[i].clone()))
    }

    fn insert_canonical(&mut self, patient: &CanonicalPatient) -> StorageResult<()> {
        if let Some(key) = patient.natural_key() {
            if self.position(key).is_some() {
                return Err(StorageError::DuplicateKey(key.to_string()));
            }
        }
        self.canonical.push(patient.clone());
        Ok(())
    }

    fn apply_update(
        &mut self,
        insurance_number: &str,
        update: &PatientUpdate,
    ) -> StorageResult<()> {
        let i = self
            .position(insurance_number)
            .ok_or_else(|| StorageError::NotFound(insurance_number.to_string()))?;
        self.canonical[i].apply(update);
        Ok(())
    }

    fn insert_derived(&mut self, patient: &DerivedPatient) -> StorageResult<()> {
        self.derived.insert(patient.id.clone(), patient.clone());
        Ok(())
    }

    fn scan_all_canonical(&self) -> StorageResult<Vec<CanonicalPatient>> {
        Ok(self.canonical.clone())
    }

    fn find_derived(&self, id: &PatientId) -> StorageResult<Option<DerivedPatient>> {
        Ok(self.derived.get(id).cloned())
    }

    fn count_canonical(&self) -> StorageResult<usize> {
        Ok(self.canonical.len())
    }

    fn count_derived(&self) -> StorageResult<usize> {
        Ok(self.derived.len())
    }
}
