//! Delimited patient source.
//!
//! Reads a header row followed by data rows of exactly twenty columns in
//! source order. Rows are yielded as raw [`IncomingRecord`]s; validation and
//! normalization happen downstream.

use intake_types::{IncomingRecord, COLUMN_COUNT};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Result type for source operations.
pub type SourceResult<T> = Result<T, SourceError>;

/// Errors raised while reading a patient source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The header row does not have the expected number of columns.
    #[error("header has {found} columns, expected {expected}")]
    Header { expected: usize, found: usize },

    /// A data row does not have the expected number of columns.
    #[error("line {line}: row has {found} columns, expected {expected}")]
    Malformed {
        line: u64,
        expected: usize,
        found: usize,
    },

    /// Underlying read or parse failure.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

impl SourceError {
    /// Returns true for row-level problems that leave the reader usable.
    #[must_use]
    pub fn is_row_error(&self) -> bool {
        match self {
            Self::Malformed { .. } => true,
            Self::Csv(e) => matches!(e.kind(), csv::ErrorKind::Utf8 { .. }),
            Self::Header { .. } => false,
        }
    }

    /// Source line the error refers to, when known.
    #[must_use]
    pub fn line(&self) -> Option<u64> {
        match self {
            Self::Malformed { line, .. } => Some(*line),
            Self::Csv(e) => e.position().map(csv::Position::line),
            Self::Header { .. } => Some(1),
        }
    }
}

/// Reader options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceOptions {
    /// Field delimiter byte.
    pub delimiter: u8,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

/// One data row and the line it started on (1-based, header is line 1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRow {
    pub line: u64,
    pub record: IncomingRecord,
}

/// Iterator over the data rows of a patient source.
pub struct CsvSource<R> {
    records: csv::StringRecordsIntoIter<R>,
}

impl CsvSource<File> {
    /// Opens a source file and validates its header.
    pub fn open(path: impl AsRef<Path>, options: SourceOptions) -> SourceResult<Self> {
        let path = path.as_ref();
        debug!("Opening source {}", path.display());
        let reader = builder(options).from_path(path)?;
        Self::from_csv(reader)
    }
}

impl<R: Read> CsvSource<R> {
    /// Reads a source from any byte stream and validates its header.
    pub fn from_reader(reader: R, options: SourceOptions) -> SourceResult<Self> {
        Self::from_csv(builder(options).from_reader(reader))
    }

    fn from_csv(mut reader: csv::Reader<R>) -> SourceResult<Self> {
        let found = reader.headers()?.len();
        if found != COLUMN_COUNT {
            return Err(SourceError::Header {
                expected: COLUMN_COUNT,
                found,
            });
        }
        Ok(Self {
            records: reader.into_records(),
        })
    }
}

fn builder(options: SourceOptions) -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(true)
        .delimiter(options.delimiter)
        .flexible(true);
    builder
}

impl<R: Read> Iterator for CsvSource<R> {
    type Item = SourceResult<SourceRow>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = match self.records.next()? {
            Ok(record) => record,
            Err(e) => return Some(Err(e.into())),
        };
        let line = record.position().map_or(0, csv::Position::line);

        if record.len() != COLUMN_COUNT {
            return Some(Err(SourceError::Malformed {
                line,
                expected: COLUMN_COUNT,
                found: record.len(),
            }));
        }

        let row = IncomingRecord::from_values(record.iter())
            .map(|record| SourceRow { line, record })
            .map_err(|_| SourceError::Malformed {
                line,
                expected: COLUMN_COUNT,
                found: record.len(),
            });
        Some(row)
    }
}
