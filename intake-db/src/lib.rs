//! SQLite connection management for patient intake.
//!
//! Opens connections with the pragmas the intake store relies on and creates
//! the two tables if they are missing:
//!
//! - `raw_patient`: the canonical store, one row per insurance number
//! - `fhir_patient`: the derived store, keyed by hash id
//!
//! Schema creation is idempotent. There is no migration framework; a
//! database created by this crate is expected to keep this exact layout.

use rusqlite::Connection;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Canonical table name.
pub const CANONICAL_TABLE: &str = "raw_patient";

/// Derived table name.
pub const DERIVED_TABLE: &str = "fhir_patient";

/// Result type for connection management.
pub type DbResult<T> = Result<T, DbError>;

/// Errors raised while opening or preparing a database.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("failed to open database at {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("failed to set pragma {pragma}: {source}")]
    Pragma {
        pragma: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    #[error("failed to create schema: {0}")]
    Schema(#[source] rusqlite::Error),

    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS raw_patient (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        first_name TEXT,
        last_name TEXT,
        birth_date TEXT,
        gender TEXT,
        address TEXT,
        city TEXT,
        state TEXT,
        zip_code TEXT,
        phone_number TEXT,
        email TEXT,
        emergency_contact_name TEXT,
        emergency_contact_phone TEXT,
        blood_type TEXT,
        insurance_provider TEXT,
        insurance_number TEXT,
        marital_status TEXT,
        preferred_language TEXT,
        nationality TEXT,
        allergies TEXT,
        last_visit_date TEXT,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );

    CREATE UNIQUE INDEX IF NOT EXISTS raw_patient_insurance_number
        ON raw_patient(insurance_number)
        WHERE insurance_number IS NOT NULL;

    CREATE TABLE IF NOT EXISTS fhir_patient (
        id TEXT PRIMARY KEY,
        full_name TEXT NOT NULL,
        birth_date TEXT,
        gender TEXT,
        address TEXT,
        telecom TEXT NOT NULL,
        marital_status TEXT,
        insurance_number TEXT,
        nationality TEXT
    );
";

/// Opens (or creates) a database file and ensures the schema.
///
/// File databases run in WAL mode.
pub fn open(path: impl AsRef<Path>) -> DbResult<Connection> {
    let path = path.as_ref();
    let conn = Connection::open(path).map_err(|source| DbError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let mode: String = conn
        .pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))
        .map_err(|source| DbError::Pragma {
            pragma: "journal_mode",
            source,
        })?;
    debug!("Opened {} (journal_mode={mode})", path.display());

    prepare(&conn)?;
    Ok(conn)
}

/// Opens a private in-memory database with the schema applied.
pub fn open_in_memory() -> DbResult<Connection> {
    let conn = Connection::open_in_memory().map_err(|source| DbError::Open {
        path: PathBuf::from(":memory:"),
        source,
    })?;
    prepare(&conn)?;
    Ok(conn)
}

fn prepare(conn: &Connection) -> DbResult<()> {
    conn.pragma_update(None, "foreign_keys", true)
        .map_err(|source| DbError::Pragma {
            pragma: "foreign_keys",
            source,
        })?;
    ensure_schema(conn)
}

/// Creates both tables and the natural-key index if they do not exist.
pub fn ensure_schema(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(SCHEMA).map_err(DbError::Schema)?;
    Ok(())
}

/// Returns true if a table with this name exists.
pub fn table_exists(conn: &Connection, name: &str) -> DbResult<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
        [name],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

/// Column names of a table, in declaration order.
pub fn table_columns(conn: &Connection, table: &str) -> DbResult<Vec<String>> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1) ORDER BY cid")?;
    let columns = stmt
        .query_map([table], |row| row.get(0))?
        .collect::<Result<Vec<String>, _>>()?;
    Ok(columns)
}
