use intake_source::{CsvSource, SourceError, SourceOptions};
use pretty_assertions::assert_eq;
use std::io::Write;

const HEADER: &str = "first_name,last_name,birth_date,gender,address,city,state,zip_code,\
phone_number,email,emergency_contact_name,emergency_contact_phone,blood_type,\
insurance_provider,insurance_number,marital_status,preferred_language,nationality,\
allergies,last_visit_date";

const JANE: &str = "Jane,Doe,1990-05-01,Female,1 Main St,Springfield,IL,62701,555,\
jane@example.com,John Doe,556,O+,Acme,INS1,Married,English,Unknown,None,2023-01-01";

fn source(body: &str) -> CsvSource<&[u8]> {
    CsvSource::from_reader(body.as_bytes(), SourceOptions::default()).unwrap()
}

// ── Happy path ───────────────────────────────────────────────────

#[test]
fn reads_rows_positionally() {
    let body = format!("{HEADER}\n{JANE}\n");
    let rows: Vec<_> = source(&body).collect::<Result<_, _>>().unwrap();

    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.line, 2);
    assert_eq!(row.record.first_name, "Jane");
    assert_eq!(row.record.insurance_number, "INS1");
    assert_eq!(row.record.nationality, "Unknown");
    assert_eq!(row.record.last_visit_date, "2023-01-01");
}

#[test]
fn values_are_not_trimmed() {
    let row = JANE.replacen("Jane", " Jane ", 1);
    let body = format!("{HEADER}\n{row}\n");
    let rows: Vec<_> = source(&body).collect::<Result<_, _>>().unwrap();
    assert_eq!(rows[0].record.first_name, " Jane ");
}

#[test]
fn quoted_fields_keep_delimiters() {
    let row = JANE.replacen("1 Main St", "\"1 Main St, Apt 2\"", 1);
    let body = format!("{HEADER}\n{row}\n");
    let rows: Vec<_> = source(&body).collect::<Result<_, _>>().unwrap();
    assert_eq!(rows[0].record.address, "1 Main St, Apt 2");
}

#[test]
fn header_only_yields_nothing() {
    assert_eq!(source(&format!("{HEADER}\n")).count(), 0);
}

#[test]
fn custom_delimiter() {
    let body = format!("{}\n{}\n", HEADER.replace(',', ";"), JANE.replace(',', ";"));
    let options = SourceOptions { delimiter: b';' };
    let rows: Vec<_> = CsvSource::from_reader(body.as_bytes(), options)
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(rows[0].record.last_name, "Doe");
}

// ── Malformed input ──────────────────────────────────────────────

#[test]
fn short_header_rejected() {
    let err = CsvSource::from_reader("a,b,c\n".as_bytes(), SourceOptions::default())
        .err()
        .unwrap();
    assert!(matches!(err, SourceError::Header { expected: 20, found: 3 }));
}

#[test]
fn short_row_reported_with_line_and_reading_continues() {
    let body = format!("{HEADER}\nJane,Doe\n{JANE}\n");
    let results: Vec<_> = source(&body).collect();

    assert_eq!(results.len(), 2);
    match &results[0] {
        Err(err @ SourceError::Malformed { line, expected, found }) => {
            assert_eq!((*line, *expected, *found), (2, 20, 2));
            assert!(err.is_row_error());
        }
        other => panic!("expected malformed row, got {other:?}"),
    }
    assert_eq!(results[1].as_ref().unwrap().line, 3);
}

#[test]
fn long_row_reported() {
    let body = format!("{HEADER}\n{JANE},extra\n");
    let results: Vec<_> = source(&body).collect();
    assert!(matches!(
        results[0],
        Err(SourceError::Malformed { found: 21, .. })
    ));
}

// ── Files ────────────────────────────────────────────────────────

#[test]
fn opens_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "{HEADER}").unwrap();
    writeln!(file, "{JANE}").unwrap();
    file.flush().unwrap();

    let rows: Vec<_> = CsvSource::open(file.path(), SourceOptions::default())
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(rows.len(), 1);
}

#[test]
fn missing_file_is_csv_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = CsvSource::open(dir.path().join("absent.csv"), SourceOptions::default())
        .err()
        .unwrap();
    assert!(matches!(err, SourceError::Csv(_)));
    assert!(!err.is_row_error());
}

#[test]
fn invalid_utf8_is_a_row_error() {
    let mut body = format!("{HEADER}\n").into_bytes();
    body.extend_from_slice(&JANE.as_bytes()[..4]);
    body.push(0xFF);
    body.extend_from_slice(&JANE.as_bytes()[4..]);
    body.extend_from_slice(format!("\n{JANE}\n").as_bytes());

    let results: Vec<_> = CsvSource::from_reader(body.as_slice(), SourceOptions::default())
        .unwrap()
        .collect();
    let err = results[0].as_ref().unwrap_err();
    assert!(err.is_row_error());
    assert_eq!(err.line(), Some(2));
    assert!(results[1].is_ok());
}
