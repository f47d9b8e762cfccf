//! Write intents produced by reconciliation.
//!
//! An intent is the complete description of one canonical-store write. The
//! merge step produces it without touching the store; the pipeline hands it
//! to a store adapter unchanged.

use crate::field::{FieldValue, PatientField};
use crate::patient::CanonicalPatient;
use crate::Timestamp;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single column assignment inside an update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldChange {
    pub field: PatientField,
    pub value: FieldValue,
}

impl FieldChange {
    /// Creates a field change.
    #[must_use]
    pub fn new(field: PatientField, value: FieldValue) -> Self {
        Self { field, value }
    }
}

/// Field-level update of an existing canonical record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientUpdate {
    /// Changed columns in source order. Never contains `last_visit_date`,
    /// which is carried separately as the watermark.
    pub changes: Vec<FieldChange>,
    /// Watermark after the merge: the later of the stored and incoming dates.
    pub last_visit_date: Option<NaiveDate>,
    /// Write time.
    pub updated_at: Timestamp,
}

impl PatientUpdate {
    /// Names of the changed columns, in order.
    pub fn changed_columns(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.changes.iter().map(|c| c.field.column_name())
    }

    /// Returns the new value of a column if this update changes it.
    #[must_use]
    pub fn change_for(&self, field: PatientField) -> Option<&FieldValue> {
        self.changes
            .iter()
            .find(|c| c.field == field)
            .map(|c| &c.value)
    }
}

/// What the canonical store should do with an incoming record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", content = "data", rename_all = "snake_case")]
pub enum WriteIntent {
    /// No record exists for the key; store this one.
    Insert(CanonicalPatient),
    /// A record exists; apply these column changes to it.
    Update(PatientUpdate),
    /// The incoming record carries nothing new.
    NoOp,
}

impl WriteIntent {
    /// Returns true if this intent results in a write.
    #[must_use]
    pub fn is_write(&self) -> bool {
        !matches!(self, Self::NoOp)
    }
}
