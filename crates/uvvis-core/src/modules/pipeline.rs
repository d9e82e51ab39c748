use crate::common::constants::{
    DATASET_FILE_NAME, MEAN_SAMPLES_FILE_NAME, RAW_SAMPLES_FILE_NAME,
};
use crate::domain::{ComputeArtifact, SpectrumConfig, SpectrumError, SpectrumResult};
use crate::modules::aggregate::{aggregate, render_delimited_series, render_spectrum_series};
use crate::modules::dataset::{read_dataset, write_dataset};
use crate::modules::extract::{ExtractionRequest, SkippedFile, extract_corpus};
use crate::modules::serialization::write_text_artifact;
use crate::modules::synthesis::{
    KernelFailure, render_raw_samples, render_structure_spectra, synthesize,
};
use serde::Serialize;
use std::fs;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::info;

#[derive(Debug, Clone, Serialize)]
pub struct ExtractionSummary {
    pub source_dir: String,
    pub format: String,
    pub file_pattern: String,
    pub structure_count: usize,
    pub excited_state_counts: Vec<usize>,
    pub record_count: usize,
    pub excluded_files: Vec<String>,
    pub skipped_files: Vec<SkippedFile>,
    pub dataset_path: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SynthesisSummary {
    pub dataset_path: String,
    pub fit: String,
    pub average: String,
    pub grid_length: usize,
    pub structure_count: usize,
    pub sample_count: usize,
    pub mean_row_count: usize,
    pub dispersion_row_count: usize,
    pub kernel_failures: Vec<KernelFailure>,
    pub aggregate_warnings: Vec<String>,
    pub artifacts: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub generated_at_unix_seconds: u64,
    pub config_warnings: Vec<String>,
    pub extraction: Option<ExtractionSummary>,
    pub synthesis: Option<SynthesisSummary>,
}

impl RunReport {
    pub fn new(config_warnings: Vec<String>) -> Self {
        Self {
            generated_at_unix_seconds: current_unix_timestamp_seconds(),
            config_warnings,
            extraction: None,
            synthesis: None,
        }
    }

    /// Every recoverable problem recorded during the run.
    pub fn warning_count(&self) -> usize {
        let extraction = self
            .extraction
            .as_ref()
            .map_or(0, |summary| summary.skipped_files.len());
        let synthesis = self.synthesis.as_ref().map_or(0, |summary| {
            summary.kernel_failures.len() + summary.aggregate_warnings.len()
        });
        self.config_warnings.len() + extraction + synthesis
    }
}

/// Extracts the corpus from `request.source_dir` and persists it as
/// `<output_dir>/input.dat`. Nothing is written unless extraction succeeds.
pub fn run_extraction(
    request: &ExtractionRequest,
    output_dir: &Path,
) -> SpectrumResult<ExtractionSummary> {
    let outcome = extract_corpus(request)?;

    create_output_dir(output_dir)?;
    let dataset_path = output_dir.join(DATASET_FILE_NAME);
    write_dataset(&dataset_path, &outcome.corpus)?;
    info!(
        "wrote {} structures ({} excited states) to '{}'",
        outcome.corpus.structure_count(),
        outcome.corpus.total_records(),
        dataset_path.display()
    );

    Ok(ExtractionSummary {
        source_dir: normalize_path(&request.source_dir),
        format: request.format.to_string(),
        file_pattern: request.file_pattern().to_string(),
        structure_count: outcome.corpus.structure_count(),
        excited_state_counts: outcome.corpus.excited_state_counts(),
        record_count: outcome.corpus.total_records(),
        excluded_files: outcome.excluded,
        skipped_files: outcome.skipped,
        dataset_path: normalize_path(&dataset_path),
    })
}

/// Loads `<output_dir>/input.dat` and writes the per-structure spectra, the
/// mean and dispersion series and the delimited sample dumps next to it.
pub fn run_synthesis(
    output_dir: &Path,
    config: &SpectrumConfig,
) -> SpectrumResult<SynthesisSummary> {
    let dataset_path = output_dir.join(DATASET_FILE_NAME);
    let corpus = read_dataset(&dataset_path)?;
    info!(
        "loaded {} structures from '{}'",
        corpus.structure_count(),
        dataset_path.display()
    );

    let outcome = synthesize(&corpus, config);
    let aggregated = aggregate(&outcome, config.average);
    let precision = config.fit.intensity_precision();

    let rendered = [
        (
            config.fit.spectrum_file_name(),
            render_structure_spectra(&outcome),
        ),
        (
            config.fit.average_file_name(),
            render_spectrum_series(&aggregated.mean, precision),
        ),
        (
            config.fit.dispersion_file_name(),
            render_spectrum_series(&aggregated.dispersion, precision),
        ),
        (RAW_SAMPLES_FILE_NAME, render_raw_samples(&outcome)),
        (
            MEAN_SAMPLES_FILE_NAME,
            render_delimited_series(&aggregated.mean),
        ),
    ];

    let mut artifacts = Vec::with_capacity(rendered.len());
    for (file_name, content) in &rendered {
        let path = output_dir.join(file_name);
        write_text_artifact(&path, content).map_err(|source| {
            SpectrumError::io_system(
                "IO.SYNTHESIS_WRITE",
                format!("failed to write '{}': {}", path.display(), source),
            )
        })?;
        info!("wrote '{}'", path.display());
        artifacts.push(ComputeArtifact::new(*file_name));
    }

    Ok(SynthesisSummary {
        dataset_path: normalize_path(&dataset_path),
        fit: config.fit.to_string(),
        average: config.average.to_string(),
        grid_length: config.grid.len(),
        structure_count: corpus.structure_count(),
        sample_count: outcome.sample_count(),
        mean_row_count: aggregated.mean.len(),
        dispersion_row_count: aggregated.dispersion.len(),
        kernel_failures: outcome.failures,
        aggregate_warnings: aggregated.warnings,
        artifacts: artifacts
            .iter()
            .map(|artifact| normalize_path(&artifact.relative_path))
            .collect(),
    })
}

pub fn write_report(report_path: &Path, report: &RunReport) -> SpectrumResult<()> {
    if let Some(parent_dir) = report_path.parent()
        && !parent_dir.as_os_str().is_empty()
    {
        create_output_dir(parent_dir)?;
    }

    let report_json = serde_json::to_string_pretty(report).map_err(|source| {
        SpectrumError::internal(
            "SYS.REPORT_SERIALIZE",
            format!(
                "failed to serialize report '{}': {}",
                report_path.display(),
                source
            ),
        )
    })?;
    write_text_artifact(report_path, &report_json).map_err(|source| {
        SpectrumError::io_system(
            "IO.REPORT_WRITE",
            format!(
                "failed to write report '{}': {}",
                report_path.display(),
                source
            ),
        )
    })
}

pub fn render_human_summary(report: &RunReport) -> String {
    let mut lines = Vec::new();

    if let Some(extraction) = &report.extraction {
        lines.push(format!(
            "Extraction: {} structures, {} excited states from '{}' ({} files matching '{}')",
            extraction.structure_count,
            extraction.record_count,
            extraction.source_dir,
            extraction.format,
            extraction.file_pattern
        ));
        if !extraction.excluded_files.is_empty() {
            lines.push(format!(
                "  excluded: {}",
                extraction.excluded_files.join(", ")
            ));
        }
        for skipped in &extraction.skipped_files {
            lines.push(format!("  skipped {}: {}", skipped.file_name, skipped.reason));
        }
        lines.push(format!("  dataset: {}", extraction.dataset_path));
    }

    if let Some(synthesis) = &report.synthesis {
        lines.push(format!(
            "Synthesis: {} fit, {} average, {} grid points, {} structures, {} samples",
            synthesis.fit,
            synthesis.average,
            synthesis.grid_length,
            synthesis.structure_count,
            synthesis.sample_count
        ));
        if !synthesis.kernel_failures.is_empty() {
            lines.push(format!(
                "  kernel failures: {}",
                synthesis.kernel_failures.len()
            ));
        }
        lines.push(format!("  artifacts: {}", synthesis.artifacts.join(", ")));
    }

    lines.push(format!("Warnings: {}", report.warning_count()));
    lines.join("\n")
}

fn create_output_dir(path: &Path) -> SpectrumResult<()> {
    fs::create_dir_all(path).map_err(|source| {
        SpectrumError::io_system(
            "IO.OUTPUT_DIRECTORY",
            format!(
                "failed to create output directory '{}': {}",
                path.display(),
                source
            ),
        )
    })
}

fn current_unix_timestamp_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| duration.as_secs())
}

fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
