use crate::domain::{SpectrumError, SpectrumResult};
use globset::Glob;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Order in which candidate files become structures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiscoveryOrder {
    /// Whatever order the filesystem reports.
    #[default]
    Filesystem,
    /// Sorted by file name.
    Lexical,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    pub path: PathBuf,
    pub file_name: String,
}

pub fn list_candidate_files(
    directory: &Path,
    pattern: &str,
    order: DiscoveryOrder,
) -> SpectrumResult<Vec<CandidateFile>> {
    let matcher = Glob::new(pattern)
        .map_err(|source| {
            SpectrumError::input_validation(
                "INPUT.FILE_PATTERN",
                format!("invalid file pattern '{}': {}", pattern, source),
            )
        })?
        .compile_matcher();

    let entries = fs::read_dir(directory).map_err(|source| {
        SpectrumError::io_system(
            "IO.EXTRACT_DIRECTORY",
            format!(
                "failed to list source directory '{}': {}",
                directory.display(),
                source
            ),
        )
    })?;

    let mut candidates = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| {
            SpectrumError::io_system(
                "IO.EXTRACT_DIRECTORY",
                format!(
                    "failed to read entry of '{}': {}",
                    directory.display(),
                    source
                ),
            )
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
            continue;
        };
        if matcher.is_match(file_name) {
            candidates.push(CandidateFile {
                file_name: file_name.to_string(),
                path,
            });
        }
    }

    if order == DiscoveryOrder::Lexical {
        candidates.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    }

    Ok(candidates)
}

/// Streams the file looking for `marker` on any line.
pub fn file_contains_marker(path: &Path, marker: &str) -> SpectrumResult<bool> {
    let read_error = |source: std::io::Error| {
        SpectrumError::io_system(
            "IO.EXTRACT_READ",
            format!("failed to read '{}': {}", path.display(), source),
        )
    };

    let file = File::open(path).map_err(read_error)?;
    for line in BufReader::new(file).split(b'\n') {
        let line = line.map_err(read_error)?;
        if String::from_utf8_lossy(&line).contains(marker) {
            return Ok(true);
        }
    }
    Ok(false)
}
