//! Patient intake runner.
//!
//! Reads a delimited patient file into the canonical store, then rebuilds the
//! derived record set from it.
//!
//! Usage:
//!   patient-intake --source patient.csv --database patient_intake.db

use anyhow::{Context, Result};
use clap::Parser;
use intake_cli::Cli;
use intake_pipeline::{run, SystemClock};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.default_log_filter()));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();

    let config = cli.resolve_config().context("Failed to load configuration")?;
    info!("Patient intake starting...");

    let summary = run(&config, &SystemClock).with_context(|| {
        format!(
            "Intake run failed (source {}, database {})",
            config.source_path.display(),
            config.database_path.display()
        )
    })?;

    println!("{summary}");
    Ok(())
}
