//! Ingest phase: source rows into the canonical store.

use crate::{Clock, MalformedRowPolicy, PipelineError, PipelineResult};
use intake_reconcile::{reconcile_normalized, screen_record};
use intake_source::{SourceResult, SourceRow};
use intake_store::PatientStore;
use intake_types::{normalize, IncomingRecord, WriteIntent};
use serde::Serialize;
use std::fmt;
use tracing::{debug, info, warn};

/// What happened to one incoming record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    Inserted,
    /// Columns written besides the watermark and `updated_at`.
    Updated { columns: Vec<&'static str> },
    Unchanged,
}

/// Counters for one ingest phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestSummary {
    pub rows_read: usize,
    pub inserted: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub skipped_malformed: usize,
}

impl IngestSummary {
    fn record(&mut self, outcome: &RecordOutcome) {
        match outcome {
            RecordOutcome::Inserted => self.inserted += 1,
            RecordOutcome::Updated { .. } => self.updated += 1,
            RecordOutcome::Unchanged => self.unchanged += 1,
        }
    }
}

impl fmt::Display for IngestSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} rows read ({} inserted, {} updated, {} unchanged, {} skipped)",
            self.rows_read, self.inserted, self.updated, self.unchanged, self.skipped_malformed
        )
    }
}

/// Reconciles incoming rows against a store, one row at a time.
pub struct Ingestor<'a, S, C> {
    store: &'a mut S,
    clock: &'a C,
    policy: MalformedRowPolicy,
}

impl<'a, S: PatientStore, C: Clock> Ingestor<'a, S, C> {
    pub fn new(store: &'a mut S, clock: &'a C) -> Self {
        Self {
            store,
            clock,
            policy: MalformedRowPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: MalformedRowPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Screens, normalizes and reconciles one record, then performs the write.
    ///
    /// Records without an insurance number are never looked up and always
    /// inserted. Store failures propagate.
    pub fn ingest_record(&mut self, record: IncomingRecord) -> PipelineResult<RecordOutcome> {
        let now = self.clock.now();
        let fields = normalize(&screen_record(record, self.clock.today()));

        let key = fields.natural_key().map(str::to_owned);
        let existing = match key.as_deref() {
            Some(key) => self.store.find_by_natural_key(key)?,
            None => None,
        };

        let outcome = match (reconcile_normalized(existing.as_ref(), fields, now), key) {
            (WriteIntent::Insert(patient), _) => {
                self.store.insert_canonical(&patient)?;
                RecordOutcome::Inserted
            }
            (WriteIntent::Update(update), Some(key)) => {
                self.store.apply_update(&key, &update)?;
                RecordOutcome::Updated {
                    columns: update.changed_columns().collect(),
                }
            }
            // An update is only produced for a stored record, which always has a key.
            (WriteIntent::Update(_), None) | (WriteIntent::NoOp, _) => RecordOutcome::Unchanged,
        };
        Ok(outcome)
    }

    /// Ingests every row from a source.
    ///
    /// Malformed rows are skipped or abort the run according to the policy.
    /// Any other source error, and any store error, aborts immediately.
    pub fn ingest<I>(&mut self, rows: I) -> PipelineResult<IngestSummary>
    where
        I: IntoIterator<Item = SourceResult<SourceRow>>,
    {
        info!("Ingesting source rows");
        let mut summary = IngestSummary::default();

        for row in rows {
            summary.rows_read += 1;
            let row = match row {
                Ok(row) => row,
                Err(e) if e.is_row_error() => {
                    let line = e.line().unwrap_or_default();
                    match self.policy {
                        MalformedRowPolicy::Skip => {
                            warn!(line, "Skipping malformed row: {e}");
                            summary.skipped_malformed += 1;
                            continue;
                        }
                        MalformedRowPolicy::Abort => {
                            return Err(PipelineError::MalformedRow { line, source: e });
                        }
                    }
                }
                Err(e) => return Err(e.into()),
            };

            let outcome = self.ingest_record(row.record)?;
            match &outcome {
                RecordOutcome::Inserted => debug!(line = row.line, "Inserted"),
                RecordOutcome::Updated { columns } => {
                    debug!(line = row.line, ?columns, "Updated")
                }
                RecordOutcome::Unchanged => debug!(line = row.line, "Unchanged"),
            }
            summary.record(&outcome);
        }

        info!("Ingest finished: {summary}");
        Ok(summary)
    }
}
