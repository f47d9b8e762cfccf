use crate::{
    project_all, Clock, IngestSummary, Ingestor, IntakeConfig, PipelineResult, ProjectionSummary,
};
use intake_source::{CsvSource, SourceResult, SourceRow};
use intake_store::{PatientStore, SqliteStore};
use serde::Serialize;
use std::fmt;
use tracing::info;

/// Outcome of a full run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub ingest: IngestSummary,
    /// `None` when projection was disabled.
    pub projection: Option<ProjectionSummary>,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ingest)?;
        match &self.projection {
            Some(projection) => write!(f, "; {projection}"),
            None => write!(f, "; projection skipped"),
        }
    }
}

/// Runs ingest and, if enabled, projection against the configured files.
///
/// The store is opened for this run only and closed before returning; on
/// error it is dropped, which also closes it.
pub fn run<C: Clock>(config: &IntakeConfig, clock: &C) -> PipelineResult<RunSummary> {
    let options = config.source_options()?;
    info!(
        "Starting intake run: source={}, database={}",
        config.source_path.display(),
        config.database_path.display()
    );

    let source = CsvSource::open(&config.source_path, options)?;
    let mut store = SqliteStore::open(&config.database_path)?;
    let summary = run_with_store(&mut store, source, config, clock)?;
    store.close()?;
    Ok(summary)
}

/// Runs both phases against an already open store.
pub fn run_with_store<S, I, C>(
    store: &mut S,
    rows: I,
    config: &IntakeConfig,
    clock: &C,
) -> PipelineResult<RunSummary>
where
    S: PatientStore,
    I: IntoIterator<Item = SourceResult<SourceRow>>,
    C: Clock,
{
    let ingest = Ingestor::new(store, clock)
        .with_policy(config.malformed_rows)
        .ingest(rows)?;

    let projection = if config.project {
        Some(project_all(store)?)
    } else {
        info!("Projection disabled");
        None
    };

    Ok(RunSummary { ingest, projection })
}
