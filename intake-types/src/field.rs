//! Column definitions for the patient source layout.
//!
//! The source file is positional; this enum is the single place where a
//! position is mapped to a name. Everything downstream addresses fields by
//! variant.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of columns in a patient source row.
pub const COLUMN_COUNT: usize = 20;

/// A column of the canonical patient record, in source order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatientField {
    FirstName,
    LastName,
    BirthDate,
    Gender,
    Address,
    City,
    State,
    ZipCode,
    PhoneNumber,
    Email,
    EmergencyContactName,
    EmergencyContactPhone,
    BloodType,
    InsuranceProvider,
    InsuranceNumber,
    MaritalStatus,
    PreferredLanguage,
    Nationality,
    Allergies,
    LastVisitDate,
}

impl PatientField {
    /// All columns in source order.
    pub const ALL: [PatientField; COLUMN_COUNT] = [
        PatientField::FirstName,
        PatientField::LastName,
        PatientField::BirthDate,
        PatientField::Gender,
        PatientField::Address,
        PatientField::City,
        PatientField::State,
        PatientField::ZipCode,
        PatientField::PhoneNumber,
        PatientField::Email,
        PatientField::EmergencyContactName,
        PatientField::EmergencyContactPhone,
        PatientField::BloodType,
        PatientField::InsuranceProvider,
        PatientField::InsuranceNumber,
        PatientField::MaritalStatus,
        PatientField::PreferredLanguage,
        PatientField::Nationality,
        PatientField::Allergies,
        PatientField::LastVisitDate,
    ];

    /// The storage column name.
    #[must_use]
    pub const fn column_name(self) -> &'static str {
        match self {
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::BirthDate => "birth_date",
            Self::Gender => "gender",
            Self::Address => "address",
            Self::City => "city",
            Self::State => "state",
            Self::ZipCode => "zip_code",
            Self::PhoneNumber => "phone_number",
            Self::Email => "email",
            Self::EmergencyContactName => "emergency_contact_name",
            Self::EmergencyContactPhone => "emergency_contact_phone",
            Self::BloodType => "blood_type",
            Self::InsuranceProvider => "insurance_provider",
            Self::InsuranceNumber => "insurance_number",
            Self::MaritalStatus => "marital_status",
            Self::PreferredLanguage => "preferred_language",
            Self::Nationality => "nationality",
            Self::Allergies => "allergies",
            Self::LastVisitDate => "last_visit_date",
        }
    }

    /// Zero-based position of this column in a source row.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns true for the two calendar-date columns.
    #[must_use]
    pub const fn is_date(self) -> bool {
        matches!(self, Self::BirthDate | Self::LastVisitDate)
    }
}

impl fmt::Display for PatientField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

impl FromStr for PatientField {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.column_name() == s)
            .ok_or_else(|| crate::Error::UnknownColumn(s.to_string()))
    }
}

/// A present (non-absent) field value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Date(NaiveDate),
}

impl FieldValue {
    /// Returns the text payload, if this is a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Date(_) => None,
        }
    }

    /// Returns the date payload, if this is a date value.
    #[must_use]
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Text(_) => None,
            Self::Date(d) => Some(*d),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}
