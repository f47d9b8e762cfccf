//! Run configuration.
//!
//! Loaded from a TOML file; every key is optional and falls back to the
//! values in [`IntakeConfig::default`].
//!
//! ```toml
//! source_path = "patient.csv"
//! database_path = "patient_intake.db"
//! delimiter = ","
//! malformed_rows = "skip"
//! project = true
//! ```

use crate::{PipelineError, PipelineResult};
use intake_source::SourceOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// What to do with a source row that has the wrong number of columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedRowPolicy {
    /// Log a warning and continue with the next row.
    #[default]
    Skip,
    /// Stop the run with [`PipelineError::MalformedRow`].
    Abort,
}

/// Configuration for one intake run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IntakeConfig {
    /// Delimited input file.
    pub source_path: PathBuf,
    /// SQLite database file.
    pub database_path: PathBuf,
    /// Field delimiter; must be a single ASCII character.
    pub delimiter: char,
    pub malformed_rows: MalformedRowPolicy,
    /// Run the projection phase after ingest.
    pub project: bool,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            source_path: PathBuf::from("patient.csv"),
            database_path: PathBuf::from("patient_intake.db"),
            delimiter: ',',
            malformed_rows: MalformedRowPolicy::Skip,
            project: true,
        }
    }
}

impl IntakeConfig {
    /// Reads and validates a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> PipelineResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| PipelineError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Parses and validates TOML configuration text.
    pub fn from_toml_str(text: &str) -> PipelineResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> PipelineResult<()> {
        self.source_options().map(|_| ())
    }

    /// Reader options derived from this configuration.
    pub fn source_options(&self) -> PipelineResult<SourceOptions> {
        if !self.delimiter.is_ascii() {
            return Err(PipelineError::Config(format!(
                "delimiter {:?} is not an ASCII character",
                self.delimiter
            )));
        }
        let delimiter = u8::try_from(self.delimiter)
            .map_err(|e| PipelineError::Config(format!("delimiter: {e}")))?;
        Ok(SourceOptions { delimiter })
    }
}
