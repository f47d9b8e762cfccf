//! SQLite-backed patient store.

use crate::{PatientStore, StorageError, StorageResult};
use intake_types::{
    parse_iso_date, CanonicalPatient, DerivedPatient, FieldValue, PatientField, PatientFields,
    PatientId, PatientUpdate, Telecom, Timestamp,
};
use rusqlite::{params, params_from_iter, Connection, ErrorCode, OptionalExtension, Row};
use std::path::Path;
use tracing::debug;

const DERIVED_COLUMNS: &str = "id, full_name, birth_date, gender, address, telecom, \
                               marital_status, insurance_number, nationality";

/// Patient store over one SQLite connection.
///
/// The store owns its connection for the lifetime of a run; dropping it (or
/// calling [`SqliteStore::close`]) releases the database.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens (or creates) a store at the given path.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        Ok(Self {
            conn: intake_db::open(path)?,
        })
    }

    /// Opens an in-memory store (for testing).
    pub fn open_in_memory() -> StorageResult<Self> {
        Ok(Self {
            conn: intake_db::open_in_memory()?,
        })
    }

    /// Wraps an already prepared connection, ensuring the schema.
    pub fn from_connection(conn: Connection) -> StorageResult<Self> {
        intake_db::ensure_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Closes the connection, surfacing any error SQLite reports on close.
    pub fn close(self) -> StorageResult<()> {
        self.conn.close().map_err(|(_, e)| StorageError::Database(e))
    }

    fn canonical_select() -> String {
        let columns: Vec<&str> = PatientField::ALL
            .iter()
            .map(|field| field.column_name())
            .collect();
        format!(
            "SELECT {}, created_at, updated_at FROM raw_patient",
            columns.join(", ")
        )
    }
}

/// Raw text of one canonical row, before conversion.
struct CanonicalRow {
    values: Vec<Option<String>>,
    created_at: String,
    updated_at: String,
}

impl CanonicalRow {
    fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        let values = (0..PatientField::ALL.len())
            .map(|i| row.get(i))
            .collect::<rusqlite::Result<Vec<Option<String>>>>()?;
        Ok(Self {
            values,
            created_at: row.get(PatientField::ALL.len())?,
            updated_at: row.get(PatientField::ALL.len() + 1)?,
        })
    }

    fn into_patient(self) -> StorageResult<CanonicalPatient> {
        let mut fields = PatientFields::default();
        for (field, value) in PatientField::ALL.into_iter().zip(self.values) {
            if let Some(value) = value {
                fields.set(field, FieldValue::Text(value));
            }
        }
        Ok(CanonicalPatient {
            fields,
            created_at: Timestamp::parse(&self.created_at)?,
            updated_at: Timestamp::parse(&self.updated_at)?,
        })
    }
}

/// Raw text of one derived row, before conversion.
struct DerivedRow {
    id: String,
    full_name: String,
    birth_date: Option<String>,
    gender: Option<String>,
    address: Option<String>,
    telecom: String,
    marital_status: Option<String>,
    insurance_number: Option<String>,
    nationality: Option<String>,
}

impl DerivedRow {
    fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            full_name: row.get(1)?,
            birth_date: row.get(2)?,
            gender: row.get(3)?,
            address: row.get(4)?,
            telecom: row.get(5)?,
            marital_status: row.get(6)?,
            insurance_number: row.get(7)?,
            nationality: row.get(8)?,
        })
    }

    fn into_patient(self) -> StorageResult<DerivedPatient> {
        Ok(DerivedPatient {
            id: PatientId::parse(&self.id)?,
            full_name: self.full_name,
            birth_date: self.birth_date.as_deref().and_then(parse_iso_date),
            gender: self.gender,
            address: self.address,
            telecom: Telecom::from_json(&self.telecom)?,
            marital_status: self.marital_status,
            insurance_number: self.insurance_number,
            nationality: self.nationality,
        })
    }
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation
    )
}

fn column_text(fields: &PatientFields, field: PatientField) -> Option<String> {
    fields.get(field).map(|value| value.to_string())
}

impl PatientStore for SqliteStore {
    fn find_by_natural_key(
        &self,
        insurance_number: &str,
    ) -> StorageResult<Option<CanonicalPatient>> {
        let sql = format!("{} WHERE insurance_number = ?1", Self::canonical_select());
        let row = self
            .conn
            .query_row(&sql, [insurance_number], CanonicalRow::read)
            .optional()?;
        row.map(CanonicalRow::into_patient).transpose()
    }

    fn insert_canonical(&mut self, patient: &CanonicalPatient) -> StorageResult<()> {
        let columns: Vec<&str> = PatientField::ALL
            .iter()
            .map(|field| field.column_name())
            .collect();
        let placeholders: Vec<String> = (1..=columns.len() + 2).map(|i| format!("?{i}")).collect();
        let sql = format!(
            "INSERT INTO raw_patient ({}, created_at, updated_at) VALUES ({})",
            columns.join(", "),
            placeholders.join(", ")
        );

        let values = PatientField::ALL
            .into_iter()
            .map(|field| column_text(&patient.fields, field))
            .chain([
                Some(patient.created_at.to_string()),
                Some(patient.updated_at.to_string()),
            ]);

        match self.conn.execute(&sql, params_from_iter(values)) {
            Ok(_) => {
                debug!("Inserted canonical patient");
                Ok(())
            }
            Err(e) if is_unique_violation(&e) => Err(StorageError::DuplicateKey(
                patient.natural_key().unwrap_or_default().to_string(),
            )),
            Err(e) => Err(e.into()),
        }
    }

    fn apply_update(
        &mut self,
        insurance_number: &str,
        update: &PatientUpdate,
    ) -> StorageResult<()> {
        let mut assignments: Vec<String> = update
            .changed_columns()
            .map(|column| format!("{column} = ?"))
            .collect();
        assignments.push("last_visit_date = ?".to_string());
        assignments.push("updated_at = ?".to_string());
        let sql = format!(
            "UPDATE raw_patient SET {} WHERE insurance_number = ?",
            assignments.join(", ")
        );

        let values = update
            .changes
            .iter()
            .map(|change| Some(change.value.to_string()))
            .chain([
                update.last_visit_date.map(|d| d.format("%Y-%m-%d").to_string()),
                Some(update.updated_at.to_string()),
                Some(insurance_number.to_string()),
            ]);

        let updated = self.conn.execute(&sql, params_from_iter(values))?;
        if updated == 0 {
            return Err(StorageError::NotFound(insurance_number.to_string()));
        }
        debug!("Updated {} column(s)", update.changes.len());
        Ok(())
    }

    fn insert_derived(&mut self, patient: &DerivedPatient) -> StorageResult<()> {
        let sql = format!(
            "INSERT INTO fhir_patient ({DERIVED_COLUMNS})
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
             ON CONFLICT(id) DO UPDATE SET
                full_name = excluded.full_name,
                birth_date = excluded.birth_date,
                gender = excluded.gender,
                address = excluded.address,
                telecom = excluded.telecom,
                marital_status = excluded.marital_status,
                insurance_number = excluded.insurance_number,
                nationality = excluded.nationality"
        );
        self.conn.execute(
            &sql,
            params![
                patient.id.as_str(),
                patient.full_name,
                patient.birth_date.map(|d| d.format("%Y-%m-%d").to_string()),
                patient.gender,
                patient.address,
                patient.telecom.to_json()?,
                patient.marital_status,
                patient.insurance_number,
                patient.nationality,
            ],
        )?;
        Ok(())
    }

    fn scan_all_canonical(&self) -> StorageResult<Vec<CanonicalPatient>> {
        let sql = format!("{} ORDER BY id", Self::canonical_select());
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map([], CanonicalRow::read)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        rows.into_iter().map(CanonicalRow::into_patient).collect()
    }

    fn find_derived(&self, id: &PatientId) -> StorageResult<Option<DerivedPatient>> {
        let sql = format!("SELECT {DERIVED_COLUMNS} FROM fhir_patient WHERE id = ?1");
        let row = self
            .conn
            .query_row(&sql, [id.as_str()], DerivedRow::read)
            .optional()?;
        row.map(DerivedRow::into_patient).transpose()
    }

    fn count_canonical(&self) -> StorageResult<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM raw_patient", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    fn count_derived(&self) -> StorageResult<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM fhir_patient", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}
