//! Argument parsing for the `patient-intake` binary.

use clap::Parser;
use intake_pipeline::{IntakeConfig, MalformedRowPolicy, PipelineResult};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "patient-intake")]
#[command(about = "Ingest patient records and build the derived record set")]
pub struct Cli {
    /// TOML configuration file; flags below override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Delimited source file
    #[arg(short, long)]
    pub source: Option<PathBuf>,

    /// SQLite database file
    #[arg(short, long)]
    pub database: Option<PathBuf>,

    /// Field delimiter (single ASCII character)
    #[arg(long)]
    pub delimiter: Option<char>,

    /// Abort on the first malformed row instead of skipping it
    #[arg(long)]
    pub strict: bool,

    /// Only ingest; leave the derived store untouched
    #[arg(long)]
    pub skip_projection: bool,

    /// Enable verbose debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Builds the run configuration: file (or defaults), then flag overrides.
    pub fn resolve_config(&self) -> PipelineResult<IntakeConfig> {
        let mut config = match &self.config {
            Some(path) => IntakeConfig::load(path)?,
            None => IntakeConfig::default(),
        };

        if let Some(source) = &self.source {
            config.source_path = source.clone();
        }
        if let Some(database) = &self.database {
            config.database_path = database.clone();
        }
        if let Some(delimiter) = self.delimiter {
            config.delimiter = delimiter;
        }
        if self.strict {
            config.malformed_rows = MalformedRowPolicy::Abort;
        }
        if self.skip_projection {
            config.project = false;
        }

        config.validate()?;
        Ok(config)
    }

    /// Default log filter when `RUST_LOG` is unset.
    #[must_use]
    pub fn default_log_filter(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}
