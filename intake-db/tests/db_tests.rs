use intake_db::{
    ensure_schema, open, open_in_memory, table_columns, table_exists, CANONICAL_TABLE,
    DERIVED_TABLE,
};
use rusqlite::params;

fn insert_raw(conn: &rusqlite::Connection, key: Option<&str>) -> rusqlite::Result<usize> {
    conn.execute(
        "INSERT INTO raw_patient (insurance_number, created_at, updated_at) VALUES (?1, ?2, ?2)",
        params![key, "2024-01-01 00:00:00"],
    )
}

// ── Schema ───────────────────────────────────────────────────────

#[test]
fn in_memory_has_both_tables() {
    let conn = open_in_memory().unwrap();
    assert!(table_exists(&conn, CANONICAL_TABLE).unwrap());
    assert!(table_exists(&conn, DERIVED_TABLE).unwrap());
    assert!(!table_exists(&conn, "nope").unwrap());
}

#[test]
fn ensure_schema_is_idempotent() {
    let conn = open_in_memory().unwrap();
    insert_raw(&conn, Some("INS1")).unwrap();
    ensure_schema(&conn).unwrap();
    ensure_schema(&conn).unwrap();

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM raw_patient", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn canonical_columns_in_source_order() {
    let conn = open_in_memory().unwrap();
    let columns = table_columns(&conn, CANONICAL_TABLE).unwrap();
    assert_eq!(columns.len(), 23);
    assert_eq!(columns[0], "id");
    assert_eq!(columns[1], "first_name");
    assert_eq!(columns[15], "insurance_number");
    assert_eq!(columns[20], "last_visit_date");
    assert_eq!(&columns[21..], ["created_at", "updated_at"]);
}

#[test]
fn derived_columns() {
    let conn = open_in_memory().unwrap();
    let columns = table_columns(&conn, DERIVED_TABLE).unwrap();
    assert_eq!(
        columns,
        [
            "id",
            "full_name",
            "birth_date",
            "gender",
            "address",
            "telecom",
            "marital_status",
            "insurance_number",
            "nationality",
        ]
    );
}

// ── Natural-key index ────────────────────────────────────────────

#[test]
fn duplicate_insurance_number_rejected() {
    let conn = open_in_memory().unwrap();
    insert_raw(&conn, Some("INS1")).unwrap();
    assert!(insert_raw(&conn, Some("INS1")).is_err());
}

#[test]
fn many_keyless_rows_allowed() {
    let conn = open_in_memory().unwrap();
    insert_raw(&conn, None).unwrap();
    insert_raw(&conn, None).unwrap();
    insert_raw(&conn, None).unwrap();

    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM raw_patient WHERE insurance_number IS NULL",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(count, 3);
}

// ── File databases ───────────────────────────────────────────────

#[test]
fn file_database_uses_wal_and_persists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("intake.db");

    {
        let conn = open(&path).unwrap();
        let mode: String = conn
            .query_row("PRAGMA journal_mode", [], |row| row.get(0))
            .unwrap();
        assert_eq!(mode.to_lowercase(), "wal");
        insert_raw(&conn, Some("INS1")).unwrap();
    }

    let conn = open(&path).unwrap();
    let key: String = conn
        .query_row("SELECT insurance_number FROM raw_patient", [], |row| row.get(0))
        .unwrap();
    assert_eq!(key, "INS1");
}

#[test]
fn open_fails_for_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("intake.db");
    let err = open(&path).unwrap_err();
    assert!(err.to_string().contains("failed to open database"));
}

#[test]
fn foreign_keys_enabled() {
    let conn = open_in_memory().unwrap();
    let enabled: i64 = conn
        .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
        .unwrap();
    assert_eq!(enabled, 1);
}
