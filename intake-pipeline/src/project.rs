//! Projection phase: canonical store into the derived store.

use crate::PipelineResult;
use intake_reconcile::project;
use intake_store::PatientStore;
use serde::Serialize;
use std::fmt;
use tracing::{debug, info};

/// Counters for one projection phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProjectionSummary {
    /// Canonical records read and written to the derived store.
    pub projected: usize,
}

impl fmt::Display for ProjectionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} records projected", self.projected)
    }
}

/// Reads the whole canonical store once and upserts one derived record per
/// canonical record.
///
/// Derived records are written by hash id, so running this again over the
/// same canonical data leaves the derived store unchanged.
pub fn project_all<S: PatientStore>(store: &mut S) -> PipelineResult<ProjectionSummary> {
    let canonical = store.scan_all_canonical()?;
    info!("Projecting {} canonical records", canonical.len());

    let mut summary = ProjectionSummary::default();
    for patient in &canonical {
        let derived = project(patient);
        store.insert_derived(&derived)?;
        debug!(id = %derived.id, "Projected");
        summary.projected += 1;
    }

    info!("Projection finished: {summary}");
    Ok(summary)
}
