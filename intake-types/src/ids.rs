//! Surrogate identifiers for derived patient records.
//!
//! A [`PatientId`] is the lowercase hex encoding of a 128-bit content hash.
//! It carries no business meaning; equal identity tuples produce equal ids.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Length of the hex-encoded identifier.
const HEX_LEN: usize = 32;

/// Hash-derived primary key of a derived patient record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PatientId(String);

impl PatientId {
    /// Creates an identifier from a 16-byte digest.
    #[must_use]
    pub fn from_digest(digest: [u8; 16]) -> Self {
        Self(hex::encode(digest))
    }

    /// Parses an identifier from its hex form.
    pub fn parse(s: &str) -> crate::Result<Self> {
        let valid = s.len() == HEX_LEN
            && s.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
        if valid {
            Ok(Self(s.to_string()))
        } else {
            Err(crate::Error::InvalidPatientId(s.to_string()))
        }
    }

    /// Returns the hex form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for PatientId {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PatientId {
    type Error = crate::Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<PatientId> for String {
    fn from(id: PatientId) -> Self {
        id.0
    }
}
