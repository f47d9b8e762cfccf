use chrono::NaiveDate;
use intake_types::{
    is_sentinel, normalize, parse_iso_date, FieldValue, IncomingRecord, PatientField,
    PatientFields, COLUMN_COUNT,
};
use pretty_assertions::assert_eq;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn jane_row() -> Vec<&'static str> {
    vec![
        "Jane", "Doe", "1990-05-01", "Female", "1 Main St", "Springfield", "IL", "62701",
        "555", "jane@example.com", "John Doe", "556", "O+", "Acme", "INS1", "Married",
        "English", "American", "Peanuts", "2023-01-01",
    ]
}

// ── Columns ──────────────────────────────────────────────────────

#[test]
fn column_order_matches_source_layout() {
    assert_eq!(PatientField::ALL.len(), COLUMN_COUNT);
    assert_eq!(PatientField::ALL[0].column_name(), "first_name");
    assert_eq!(PatientField::ALL[2], PatientField::BirthDate);
    assert_eq!(PatientField::ALL[9], PatientField::Email);
    assert_eq!(PatientField::ALL[14], PatientField::InsuranceNumber);
    assert_eq!(PatientField::ALL[19], PatientField::LastVisitDate);
    for (i, field) in PatientField::ALL.iter().enumerate() {
        assert_eq!(field.index(), i);
    }
}

#[test]
fn column_names_parse_back() {
    for field in PatientField::ALL {
        assert_eq!(field.column_name().parse::<PatientField>().unwrap(), field);
    }
    assert!("shoe_size".parse::<PatientField>().is_err());
}

#[test]
fn only_two_date_columns() {
    let dates: Vec<_> = PatientField::ALL.into_iter().filter(|f| f.is_date()).collect();
    assert_eq!(dates, vec![PatientField::BirthDate, PatientField::LastVisitDate]);
}

// ── IncomingRecord ───────────────────────────────────────────────

#[test]
fn from_values_assigns_by_position_once() {
    let record = IncomingRecord::from_values(jane_row()).unwrap();
    assert_eq!(record.first_name, "Jane");
    assert_eq!(record.email, "jane@example.com");
    assert_eq!(record.insurance_number, "INS1");
    assert_eq!(record.last_visit_date, "2023-01-01");
    assert_eq!(record.get(PatientField::Allergies), "Peanuts");
}

#[test]
fn from_values_rejects_short_row() {
    let mut row = jane_row();
    row.pop();
    let err = IncomingRecord::from_values(row).unwrap_err();
    assert!(matches!(
        err,
        intake_types::Error::ColumnCount { expected: 20, found: 19 }
    ));
}

#[test]
fn from_values_rejects_long_row() {
    let mut row = jane_row();
    row.push("extra");
    assert!(IncomingRecord::from_values(row).is_err());
}

#[test]
fn set_and_get_every_column() {
    let mut record = IncomingRecord::default();
    for field in PatientField::ALL {
        record.set(field, field.column_name());
    }
    for field in PatientField::ALL {
        assert_eq!(record.get(field), field.column_name());
    }
}

// ── Normalization ────────────────────────────────────────────────

#[test]
fn sentinels() {
    assert!(is_sentinel(""));
    assert!(is_sentinel("Unknown"));
    assert!(!is_sentinel("unknown"));
    assert!(!is_sentinel(" "));
    assert!(!is_sentinel("Jane"));
}

#[test]
fn normalize_maps_sentinels_to_absent() {
    let mut record = IncomingRecord::from_values(jane_row()).unwrap();
    record.email = "Unknown".into();
    record.city = String::new();

    let fields = normalize(&record);
    assert_eq!(fields.email, None);
    assert_eq!(fields.city, None);
    assert_eq!(fields.first_name.as_deref(), Some("Jane"));
}

#[test]
fn normalize_parses_dates() {
    let fields = normalize(&IncomingRecord::from_values(jane_row()).unwrap());
    assert_eq!(fields.birth_date, Some(date("1990-05-01")));
    assert_eq!(fields.last_visit_date, Some(date("2023-01-01")));
}

#[test]
fn normalize_drops_unparseable_dates() {
    let mut record = IncomingRecord::from_values(jane_row()).unwrap();
    record.last_visit_date = "last tuesday".into();
    record.birth_date = "1990-02-30".into();
    let fields = normalize(&record);
    assert_eq!(fields.last_visit_date, None);
    assert_eq!(fields.birth_date, None);
}

#[test]
fn normalize_empty_record_is_all_absent() {
    assert_eq!(normalize(&IncomingRecord::default()), PatientFields::default());
}

#[test]
fn parse_iso_date_formats() {
    assert_eq!(parse_iso_date("2024-01-01"), Some(date("2024-01-01")));
    assert_eq!(parse_iso_date("01/02/2024"), None);
    assert_eq!(parse_iso_date(""), None);
}

// ── PatientFields ────────────────────────────────────────────────

#[test]
fn natural_key() {
    let fields = normalize(&IncomingRecord::from_values(jane_row()).unwrap());
    assert_eq!(fields.natural_key(), Some("INS1"));
    assert_eq!(PatientFields::default().natural_key(), None);
}

#[test]
fn present_iterates_in_column_order() {
    let mut fields = PatientFields::default();
    fields.set(PatientField::Nationality, FieldValue::Text("Dutch".into()));
    fields.set(PatientField::FirstName, FieldValue::Text("Ana".into()));
    fields.set(PatientField::BirthDate, FieldValue::Date(date("2000-01-01")));

    let present: Vec<_> = fields.present().map(|(f, _)| f).collect();
    assert_eq!(
        present,
        vec![PatientField::FirstName, PatientField::BirthDate, PatientField::Nationality]
    );
}

#[test]
fn set_date_column_from_text() {
    let mut fields = PatientFields::default();
    fields.set(PatientField::LastVisitDate, FieldValue::Text("2022-06-01".into()));
    assert_eq!(fields.last_visit_date, Some(date("2022-06-01")));

    fields.set(PatientField::LastVisitDate, FieldValue::Text("garbage".into()));
    assert_eq!(fields.last_visit_date, None);
}

#[test]
fn field_value_display() {
    assert_eq!(FieldValue::Text("x".into()).to_string(), "x");
    assert_eq!(FieldValue::Date(date("1990-05-01")).to_string(), "1990-05-01");
    assert_eq!(FieldValue::Date(date("1990-05-01")).as_text(), None);
    assert_eq!(FieldValue::Text("x".into()).as_date(), None);
}
