use crate::ids::PatientId;
use crate::intent::PatientUpdate;
use crate::record::PatientFields;
use crate::Timestamp;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A patient in the canonical store, one per natural key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalPatient {
    #[serde(flatten)]
    pub fields: PatientFields,
    /// Set once, when the record is first inserted.
    pub created_at: Timestamp,
    /// Set on every write that changes the record.
    pub updated_at: Timestamp,
}

impl CanonicalPatient {
    /// Creates a freshly inserted record.
    #[must_use]
    pub fn new(fields: PatientFields, now: Timestamp) -> Self {
        Self {
            fields,
            created_at: now,
            updated_at: now,
        }
    }

    /// The deduplication key, if present.
    #[must_use]
    pub fn natural_key(&self) -> Option<&str> {
        self.fields.natural_key()
    }

    /// Applies an update in place, the same way the store does.
    pub fn apply(&mut self, update: &PatientUpdate) {
        for change in &update.changes {
            self.fields.set(change.field, change.value.clone());
        }
        self.fields.last_visit_date = update.last_visit_date;
        self.updated_at = update.updated_at;
    }
}

/// Contact payload of a derived record. Both keys are always serialized;
/// absent values become `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Telecom {
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl Telecom {
    /// Serializes to the stored JSON form, e.g. `{"phone":"555","email":null}`.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parses the stored JSON form.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Interoperability-shaped projection of a canonical patient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedPatient {
    pub id: PatientId,
    pub full_name: String,
    pub birth_date: Option<NaiveDate>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub telecom: Telecom,
    pub marital_status: Option<String>,
    pub insurance_number: Option<String>,
    pub nationality: Option<String>,
}
