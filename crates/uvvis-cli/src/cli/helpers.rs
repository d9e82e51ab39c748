use super::CliError;
use anyhow::Context;
use std::path::Path;
use tracing_subscriber::EnvFilter;
use uvvis_core::modules::pipeline::{RunReport, render_human_summary, write_report};

/// Logs go to stderr so stdout carries only the run summary. `RUST_LOG`
/// overrides the default `info` level.
pub(super) fn init_tracing() -> Result<(), CliError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|error| anyhow::anyhow!("{error}"))
        .context("failed to install the log subscriber")?;
    Ok(())
}

pub(super) fn finish_report(
    report: &RunReport,
    report_path: Option<&Path>,
) -> Result<(), CliError> {
    println!("{}", render_human_summary(report));
    if let Some(report_path) = report_path {
        write_report(report_path, report).map_err(CliError::Compute)?;
        println!("JSON report: {}", report_path.display());
    }
    Ok(())
}
