//! Field validators.
//!
//! A failed check is never an error: the offending value is replaced by
//! absence and the row carries on.

use chrono::NaiveDate;
use intake_types::{parse_iso_date, IncomingRecord, PatientField};
use regex_lite::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// Accepts `local@label.rest`. The tail is deliberately lax: multi-label
/// domains pass, and so do consecutive dots.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9.-]+$")
        .expect("email pattern is a valid regex")
});

/// Returns true if `candidate` looks like an email address.
#[must_use]
pub fn validate_email(candidate: Option<&str>) -> bool {
    candidate.is_some_and(|s| EMAIL_PATTERN.is_match(s))
}

/// Parses `candidate` as `YYYY-MM-DD` and returns it if it is not after `today`.
#[must_use]
pub fn validate_past_date(candidate: &str, today: NaiveDate) -> Option<NaiveDate> {
    parse_iso_date(candidate).filter(|date| *date <= today)
}

/// Applies the source-boundary checks to one row.
///
/// `birth_date` is trimmed and cleared unless it is a valid date on or
/// before `today`; `email` is cleared unless it passes [`validate_email`].
/// Cleared values become empty strings, which normalization treats as
/// absent. Other columns are returned untouched.
#[must_use]
pub fn screen_record(mut record: IncomingRecord, today: NaiveDate) -> IncomingRecord {
    let birth_date = record.birth_date.trim();
    record.birth_date = if birth_date.is_empty() {
        String::new()
    } else {
        match validate_past_date(birth_date, today) {
            Some(date) => date.format("%Y-%m-%d").to_string(),
            None => {
                debug!("Rejected {}: not a past YYYY-MM-DD date", PatientField::BirthDate);
                String::new()
            }
        }
    };

    if !record.email.is_empty() && !validate_email(Some(&record.email)) {
        debug!("Rejected {}: malformed address", PatientField::Email);
        record.email.clear();
    }

    record
}
