//! Patient intake runs.
//!
//! A run has two phases over one store:
//!
//! 1. **Ingest**: each source row is screened, normalized and reconciled
//!    against the canonical record for its insurance number, then written.
//! 2. **Projection**: every canonical record is mapped to its derived shape
//!    and upserted by hash id.
//!
//! Rows are processed strictly one after another. A store failure aborts the
//! run; malformed rows follow the configured [`MalformedRowPolicy`].
//!
//! # Example
//!
//! ```no_run
//! use intake_pipeline::{run, IntakeConfig, SystemClock};
//!
//! let config = IntakeConfig::load("intake.toml")?;
//! let summary = run(&config, &SystemClock)?;
//! println!("{summary}");
//! # Ok::<(), intake_pipeline::PipelineError>(())
//! ```

mod clock;
mod config;
mod error;
mod ingest;
mod project;
mod run;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{IntakeConfig, MalformedRowPolicy};
pub use error::{PipelineError, PipelineResult};
pub use ingest::{IngestSummary, Ingestor, RecordOutcome};
pub use project::{project_all, ProjectionSummary};
pub use run::{run, run_with_store, RunSummary};
