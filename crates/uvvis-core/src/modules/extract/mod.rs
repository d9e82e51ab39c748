mod discovery;
mod gaussian;
mod orca;

pub use discovery::{CandidateFile, DiscoveryOrder, file_contains_marker, list_candidate_files};
pub use gaussian::{
    DEFAULT_ENTER_MARKER, GaussianExtractor, GaussianMarkers, NORMAL_TERMINATION_MARKER,
};
pub use orca::{ORCA_SECTION_HEADER, OrcaExtractor};

use super::LogExtractor;
use crate::domain::{Corpus, SourceFormat, SpectrumError, SpectrumResult, StructureDataset};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

/// Recoverable failure confined to a single source file.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractionFailure {
    #[error("line {line}: {reason}")]
    MalformedLine { line: usize, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionRequest {
    pub source_dir: PathBuf,
    pub format: SourceFormat,
    pub pattern: Option<String>,
    pub order: DiscoveryOrder,
    pub markers: GaussianMarkers,
}

impl ExtractionRequest {
    pub fn new(source_dir: impl Into<PathBuf>, format: SourceFormat) -> Self {
        Self {
            source_dir: source_dir.into(),
            format,
            pattern: None,
            order: DiscoveryOrder::default(),
            markers: GaussianMarkers::default(),
        }
    }

    pub fn file_pattern(&self) -> &str {
        self.pattern
            .as_deref()
            .unwrap_or(self.format.default_file_pattern())
    }

    pub fn extractor(&self) -> Box<dyn LogExtractor> {
        match self.format {
            SourceFormat::Gaussian => Box::new(GaussianExtractor::new(self.markers.clone())),
            SourceFormat::Orca => Box::new(OrcaExtractor),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub file_name: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionOutcome {
    pub corpus: Corpus,
    /// Matched the file pattern but lacked the required marker.
    pub excluded: Vec<String>,
    /// Candidates dropped because a line did not fit the expected layout.
    pub skipped: Vec<SkippedFile>,
}

/// Runs the format's extractor over every candidate file of the source
/// directory. Malformed files are skipped with a warning; I/O failures abort.
pub fn extract_corpus(request: &ExtractionRequest) -> SpectrumResult<ExtractionOutcome> {
    let extractor = request.extractor();
    let listed = list_candidate_files(&request.source_dir, request.file_pattern(), request.order)?;

    let mut corpus = Corpus::default();
    let mut excluded = Vec::new();
    let mut skipped = Vec::new();

    for candidate in listed {
        if let Some(marker) = extractor.required_marker()
            && !file_contains_marker(&candidate.path, marker)?
        {
            info!(
                "excluding '{}': marker '{}' not found",
                candidate.file_name, marker
            );
            excluded.push(candidate.file_name);
            continue;
        }

        info!("extracting excited states from '{}'", candidate.file_name);
        let bytes = fs::read(&candidate.path).map_err(|source| {
            SpectrumError::io_system(
                "IO.EXTRACT_READ",
                format!("failed to read '{}': {}", candidate.path.display(), source),
            )
        })?;
        let source = String::from_utf8_lossy(&bytes);

        match extractor.extract(&source) {
            Ok(records) => {
                if records.is_empty() {
                    warn!(
                        "'{}' contains no {} excited-state records",
                        candidate.file_name,
                        extractor.source_format()
                    );
                }
                corpus.push(StructureDataset::new(candidate.file_name, records));
            }
            Err(failure) => {
                warn!("skipping '{}': {}", candidate.file_name, failure);
                skipped.push(SkippedFile {
                    file_name: candidate.file_name,
                    reason: failure.to_string(),
                });
            }
        }
    }

    if corpus.is_empty() {
        return Err(SpectrumError::computation(
            "RUN.EXTRACT_EMPTY",
            format!(
                "no extractable {} files matching '{}' in '{}' ({} excluded, {} skipped)",
                request.format,
                request.file_pattern(),
                request.source_dir.display(),
                excluded.len(),
                skipped.len()
            ),
        ));
    }

    Ok(ExtractionOutcome {
        corpus,
        excluded,
        skipped,
    })
}

pub(crate) fn parse_positive_wavelength(
    token: &str,
    line: usize,
) -> Result<f64, ExtractionFailure> {
    let value = parse_numeric_field(token, line, "wavelength")?;
    if value <= 0.0 {
        return Err(ExtractionFailure::MalformedLine {
            line,
            reason: format!("wavelength must be positive, found '{}'", token),
        });
    }
    Ok(value)
}

pub(crate) fn parse_strength(token: &str, line: usize) -> Result<f64, ExtractionFailure> {
    parse_numeric_field(token, line, "oscillator strength")
}

fn parse_numeric_field(token: &str, line: usize, field: &str) -> Result<f64, ExtractionFailure> {
    token
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| ExtractionFailure::MalformedLine {
            line,
            reason: format!("{} '{}' is not a finite number", field, token),
        })
}
