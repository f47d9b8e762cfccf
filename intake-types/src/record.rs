//! Source rows and their normalized form.
//!
//! A row arrives as 20 ordered strings. It is turned into a named
//! [`IncomingRecord`] exactly once, at the source boundary, and every later
//! stage works on names. [`normalize`] is the one place where the empty
//! string and the `"Unknown"` sentinel become absence.

use crate::field::{FieldValue, PatientField, COLUMN_COUNT};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Literal placeholder the source uses for "no value".
pub const UNKNOWN_SENTINEL: &str = "Unknown";

/// Returns true if a raw value carries no information.
#[must_use]
pub fn is_sentinel(value: &str) -> bool {
    value.is_empty() || value == UNKNOWN_SENTINEL
}

/// Parses a `YYYY-MM-DD` calendar date.
#[must_use]
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// One source row with every column addressed by name.
///
/// Values are kept exactly as read (no trimming, no sentinel handling).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomingRecord {
    pub first_name: String,
    pub last_name: String,
    pub birth_date: String,
    pub gender: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub phone_number: String,
    pub email: String,
    pub emergency_contact_name: String,
    pub emergency_contact_phone: String,
    pub blood_type: String,
    pub insurance_provider: String,
    pub insurance_number: String,
    pub marital_status: String,
    pub preferred_language: String,
    pub nationality: String,
    pub allergies: String,
    pub last_visit_date: String,
}

impl IncomingRecord {
    /// Builds a record from one ordered row.
    ///
    /// Fails if the row does not have exactly [`COLUMN_COUNT`] values; a
    /// short or long row is never assigned positionally.
    pub fn from_values<I, S>(values: I) -> crate::Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        let found = values.len();
        let columns: [String; COLUMN_COUNT] =
            values.try_into().map_err(|_| crate::Error::ColumnCount {
                expected: COLUMN_COUNT,
                found,
            })?;

        let [
            first_name,
            last_name,
            birth_date,
            gender,
            address,
            city,
            state,
            zip_code,
            phone_number,
            email,
            emergency_contact_name,
            emergency_contact_phone,
            blood_type,
            insurance_provider,
            insurance_number,
            marital_status,
            preferred_language,
            nationality,
            allergies,
            last_visit_date,
        ] = columns;

        Ok(Self {
            first_name,
            last_name,
            birth_date,
            gender,
            address,
            city,
            state,
            zip_code,
            phone_number,
            email,
            emergency_contact_name,
            emergency_contact_phone,
            blood_type,
            insurance_provider,
            insurance_number,
            marital_status,
            preferred_language,
            nationality,
            allergies,
            last_visit_date,
        })
    }

    /// Returns the raw value of a column.
    #[must_use]
    pub fn get(&self, field: PatientField) -> &str {
        match field {
            PatientField::FirstName => &self.first_name,
            PatientField::LastName => &self.last_name,
            PatientField::BirthDate => &self.birth_date,
            PatientField::Gender => &self.gender,
            PatientField::Address => &self.address,
            PatientField::City => &self.city,
            PatientField::State => &self.state,
            PatientField::ZipCode => &self.zip_code,
            PatientField::PhoneNumber => &self.phone_number,
            PatientField::Email => &self.email,
            PatientField::EmergencyContactName => &self.emergency_contact_name,
            PatientField::EmergencyContactPhone => &self.emergency_contact_phone,
            PatientField::BloodType => &self.blood_type,
            PatientField::InsuranceProvider => &self.insurance_provider,
            PatientField::InsuranceNumber => &self.insurance_number,
            PatientField::MaritalStatus => &self.marital_status,
            PatientField::PreferredLanguage => &self.preferred_language,
            PatientField::Nationality => &self.nationality,
            PatientField::Allergies => &self.allergies,
            PatientField::LastVisitDate => &self.last_visit_date,
        }
    }

    /// Replaces the raw value of a column.
    pub fn set(&mut self, field: PatientField, value: impl Into<String>) {
        let slot = match field {
            PatientField::FirstName => &mut self.first_name,
            PatientField::LastName => &mut self.last_name,
            PatientField::BirthDate => &mut self.birth_date,
            PatientField::Gender => &mut self.gender,
            PatientField::Address => &mut self.address,
            PatientField::City => &mut self.city,
            PatientField::State => &mut self.state,
            PatientField::ZipCode => &mut self.zip_code,
            PatientField::PhoneNumber => &mut self.phone_number,
            PatientField::Email => &mut self.email,
            PatientField::EmergencyContactName => &mut self.emergency_contact_name,
            PatientField::EmergencyContactPhone => &mut self.emergency_contact_phone,
            PatientField::BloodType => &mut self.blood_type,
            PatientField::InsuranceProvider => &mut self.insurance_provider,
            PatientField::InsuranceNumber => &mut self.insurance_number,
            PatientField::MaritalStatus => &mut self.marital_status,
            PatientField::PreferredLanguage => &mut self.preferred_language,
            PatientField::Nationality => &mut self.nationality,
            PatientField::Allergies => &mut self.allergies,
            PatientField::LastVisitDate => &mut self.last_visit_date,
        };
        *slot = value.into();
    }
}

/// The normalized field set of a patient. `None` means "no value".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientFields {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_phone: Option<String>,
    pub blood_type: Option<String>,
    pub insurance_provider: Option<String>,
    pub insurance_number: Option<String>,
    pub marital_status: Option<String>,
    pub preferred_language: Option<String>,
    pub nationality: Option<String>,
    pub allergies: Option<String>,
    pub last_visit_date: Option<NaiveDate>,
}

impl PatientFields {
    /// The deduplication key, if present.
    #[must_use]
    pub fn natural_key(&self) -> Option<&str> {
        self.insurance_number.as_deref()
    }

    /// Returns the value of a column, or `None` if absent.
    #[must_use]
    pub fn get(&self, field: PatientField) -> Option<FieldValue> {
        let text = |v: &Option<String>| v.clone().map(FieldValue::Text);
        match field {
            PatientField::FirstName => text(&self.first_name),
            PatientField::LastName => text(&self.last_name),
            PatientField::BirthDate => self.birth_date.map(FieldValue::Date),
            PatientField::Gender => text(&self.gender),
            PatientField::Address => text(&self.address),
            PatientField::City => text(&self.city),
            PatientField::State => text(&self.state),
            PatientField::ZipCode => text(&self.zip_code),
            PatientField::PhoneNumber => text(&self.phone_number),
            PatientField::Email => text(&self.email),
            PatientField::EmergencyContactName => text(&self.emergency_contact_name),
            PatientField::EmergencyContactPhone => text(&self.emergency_contact_phone),
            PatientField::BloodType => text(&self.blood_type),
            PatientField::InsuranceProvider => text(&self.insurance_provider),
            PatientField::InsuranceNumber => text(&self.insurance_number),
            PatientField::MaritalStatus => text(&self.marital_status),
            PatientField::PreferredLanguage => text(&self.preferred_language),
            PatientField::Nationality => text(&self.nationality),
            PatientField::Allergies => text(&self.allergies),
            PatientField::LastVisitDate => self.last_visit_date.map(FieldValue::Date),
        }
    }

    /// Sets a column from a present value.
    ///
    /// A date value written to a text column is stored in its `YYYY-MM-DD`
    /// form; a text value written to a date column is parsed and dropped to
    /// absence if it is not a valid date.
    pub fn set(&mut self, field: PatientField, value: FieldValue) {
        if field.is_date() {
            let date = match value {
                FieldValue::Date(d) => Some(d),
                FieldValue::Text(s) => parse_iso_date(&s),
            };
            match field {
                PatientField::BirthDate => self.birth_date = date,
                _ => self.last_visit_date = date,
            }
            return;
        }

        let text = Some(value.to_string());
        match field {
            PatientField::FirstName => self.first_name = text,
            PatientField::LastName => self.last_name = text,
            PatientField::Gender => self.gender = text,
            PatientField::Address => self.address = text,
            PatientField::City => self.city = text,
            PatientField::State => self.state = text,
            PatientField::ZipCode => self.zip_code = text,
            PatientField::PhoneNumber => self.phone_number = text,
            PatientField::Email => self.email = text,
            PatientField::EmergencyContactName => self.emergency_contact_name = text,
            PatientField::EmergencyContactPhone => self.emergency_contact_phone = text,
            PatientField::BloodType => self.blood_type = text,
            PatientField::InsuranceProvider => self.insurance_provider = text,
            PatientField::InsuranceNumber => self.insurance_number = text,
            PatientField::MaritalStatus => self.marital_status = text,
            PatientField::PreferredLanguage => self.preferred_language = text,
            PatientField::Nationality => self.nationality = text,
            PatientField::Allergies => self.allergies = text,
            PatientField::BirthDate | PatientField::LastVisitDate => {}
        }
    }

    /// Iterates over the present columns in source order.
    pub fn present(&self) -> impl Iterator<Item = (PatientField, FieldValue)> + '_ {
        PatientField::ALL
            .into_iter()
            .filter_map(|field| self.get(field).map(|value| (field, value)))
    }
}

/// Converts a raw row into its normalized field set.
///
/// Empty strings and [`UNKNOWN_SENTINEL`] become `None`. The two date
/// columns are parsed as `YYYY-MM-DD`; a value that does not parse is
/// treated as absent rather than failing the row.
#[must_use]
pub fn normalize(record: &IncomingRecord) -> PatientFields {
    let mut fields = PatientFields::default();
    for field in PatientField::ALL {
        let raw = record.get(field);
        if is_sentinel(raw) {
            continue;
        }
        if field.is_date() {
            if let Some(date) = parse_iso_date(raw) {
                fields.set(field, FieldValue::Date(date));
            }
        } else {
            fields.set(field, FieldValue::Text(raw.to_string()));
        }
    }
    fields
}
