//! Property-based tests for row normalization.

use intake_types::{is_sentinel, normalize, FieldValue, IncomingRecord, PatientField, COLUMN_COUNT};
use proptest::prelude::*;

fn cell() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("Unknown".to_string()),
        Just("1990-05-01".to_string()),
        prop::string::string_regex("[A-Za-z0-9 @.-]{1,16}").unwrap(),
    ]
}

fn row() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(cell(), COLUMN_COUNT)
}

proptest! {
    /// Sentinels never survive normalization
    #[test]
    fn sentinels_become_absent(values in row()) {
        let record = IncomingRecord::from_values(values).unwrap();
        let fields = normalize(&record);
        for field in PatientField::ALL {
            if is_sentinel(record.get(field)) {
                prop_assert!(fields.get(field).is_none());
            }
        }
    }

    /// Text columns keep their raw value verbatim
    #[test]
    fn text_columns_are_verbatim(values in row()) {
        let record = IncomingRecord::from_values(values).unwrap();
        let fields = normalize(&record);
        for field in PatientField::ALL.into_iter().filter(|f| !f.is_date()) {
            if let Some(FieldValue::Text(text)) = fields.get(field) {
                prop_assert_eq!(text.as_str(), record.get(field));
            }
        }
    }

    /// Rows of any other width are rejected
    #[test]
    fn wrong_width_rejected(width in 0usize..40) {
        prop_assume!(width != COLUMN_COUNT);
        let values = vec!["x"; width];
        prop_assert!(IncomingRecord::from_values(values).is_err());
    }
}
