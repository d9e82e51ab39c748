//! Intermediate `input.dat` dataset coupling extraction and synthesis.
//!
//! Layout:
//!
//! ```text
//! 2
//! 2 1
//! 400  0.5
//! 420  0.3
//! 310.5  0.01
//! ```
//!
//! The first line holds the structure count (left-justified to four
//! characters), the second the per-structure excited-state counts, then one
//! `<wavelength>  <strength>` line per record in structure order.

use crate::domain::{
    Corpus, ExcitedStateRecord, ParserResult, SpectrumError, SpectrumResult, StructureDataset,
};
use crate::modules::serialization::write_text_artifact;
use std::fs;
use std::path::Path;

pub fn render_dataset(corpus: &Corpus) -> String {
    let mut content = format!("{:<4}\n", corpus.structure_count());

    let counts = corpus
        .excited_state_counts()
        .iter()
        .map(usize::to_string)
        .collect::<Vec<_>>()
        .join(" ");
    content.push_str(&counts);
    content.push('\n');

    for record in corpus.flattened_records() {
        let line = match record.tokens() {
            Some(tokens) => format!("{}  {}\n", tokens.wavelength, tokens.oscillator_strength),
            None => format!(
                "{}  {}\n",
                record.wavelength(),
                record.oscillator_strength()
            ),
        };
        content.push_str(&line);
    }
    content
}

pub fn write_dataset(path: &Path, corpus: &Corpus) -> SpectrumResult<()> {
    if corpus.is_empty() {
        return Err(SpectrumError::computation(
            "RUN.DATASET_EMPTY",
            "refusing to write a dataset without structures",
        ));
    }

    write_text_artifact(path, &render_dataset(corpus)).map_err(|source| {
        SpectrumError::io_system(
            "IO.DATASET_WRITE",
            format!("failed to write dataset '{}': {}", path.display(), source),
        )
    })
}

pub fn read_dataset(path: &Path) -> SpectrumResult<Corpus> {
    let source = fs::read_to_string(path).map_err(|source| {
        SpectrumError::io_system(
            "IO.DATASET_READ",
            format!("failed to read dataset '{}': {}", path.display(), source),
        )
    })?;
    parse_dataset(&source)
}

/// Rebuilds the per-structure grouping from the stored counts.
pub fn parse_dataset(source: &str) -> ParserResult<Corpus> {
    let mut lines = source.lines().enumerate();

    let structure_count = match lines.next() {
        Some((_, line)) => line.trim().parse::<usize>().ok().filter(|count| *count > 0),
        None => None,
    }
    .ok_or_else(|| {
        SpectrumError::input_validation(
            "INPUT.DATASET_HEADER",
            "line 1: expected a positive structure count",
        )
    })?;

    let counts = lines
        .next()
        .map(|(_, line)| {
            line.split_whitespace()
                .map(|token| token.parse::<usize>())
                .collect::<Result<Vec<_>, _>>()
        })
        .and_then(Result::ok)
        .ok_or_else(|| {
            SpectrumError::input_validation(
                "INPUT.DATASET_COUNTS",
                "line 2: expected whitespace-separated excited-state counts",
            )
        })?;
    if counts.len() != structure_count {
        return Err(SpectrumError::input_validation(
            "INPUT.DATASET_COUNTS",
            format!(
                "line 2: {} excited-state counts listed for {} structures",
                counts.len(),
                structure_count
            ),
        ));
    }

    let mut structures = Vec::with_capacity(structure_count);
    for (structure_index, count) in counts.into_iter().enumerate() {
        let mut records = Vec::new();
        for _ in 0..count {
            let (index, line) = lines.next().ok_or_else(|| {
                SpectrumError::input_validation(
                    "INPUT.DATASET_TRUNCATED",
                    format!(
                        "dataset ends before the {} records of structure {}",
                        count,
                        structure_index + 1
                    ),
                )
            })?;
            records.push(parse_record_line(line, index + 1)?);
        }
        structures.push(StructureDataset::new(
            format!("structure {}", structure_index + 1),
            records,
        ));
    }

    if let Some((index, _)) = lines.find(|(_, line)| !line.trim().is_empty()) {
        return Err(SpectrumError::input_validation(
            "INPUT.DATASET_TRAILING",
            format!(
                "line {}: more records than the excited-state counts declare",
                index + 1
            ),
        ));
    }

    Ok(Corpus::new(structures))
}

fn parse_record_line(line: &str, line_number: usize) -> ParserResult<ExcitedStateRecord> {
    let tokens = line.split_whitespace().collect::<Vec<_>>();
    let values = tokens
        .iter()
        .map(|token| token.parse::<f64>().ok().filter(|value| value.is_finite()))
        .collect::<Option<Vec<_>>>();

    match (tokens.as_slice(), values.as_deref()) {
        ([wavelength_text, strength_text], Some([wavelength, strength])) => {
            Ok(ExcitedStateRecord::new(*wavelength, *strength)
                .with_tokens(wavelength_text, strength_text))
        }
        _ => Err(SpectrumError::input_validation(
            "INPUT.DATASET_RECORD",
            format!(
                "line {}: expected '<wavelength>  <strength>', found '{}'",
                line_number,
                line.trim()
            ),
        )),
    }
}
