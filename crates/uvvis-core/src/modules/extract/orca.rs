use super::{ExtractionFailure, parse_positive_wavelength, parse_strength};
use crate::domain::{ExcitedStateRecord, SourceFormat};
use crate::modules::LogExtractor;

pub const ORCA_SECTION_HEADER: &str =
    "ABSORPTION SPECTRUM VIA TRANSITION ELECTRIC DIPOLE MOMENTS";

const WAVELENGTH_COLUMN: usize = 2;
const STRENGTH_COLUMN: usize = 3;

/// Reads the tabular absorption spectrum block of ORCA TD-DFT output.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrcaExtractor;

impl LogExtractor for OrcaExtractor {
    fn source_format(&self) -> SourceFormat {
        SourceFormat::Orca
    }

    fn extract(&self, source: &str) -> Result<Vec<ExcitedStateRecord>, ExtractionFailure> {
        let mut records = Vec::new();
        let mut in_section = false;

        for (index, line) in source.lines().enumerate() {
            let trimmed = line.trim();
            if !in_section {
                in_section = trimmed == ORCA_SECTION_HEADER;
                continue;
            }
            if trimmed.is_empty() {
                break;
            }

            let tokens = trimmed.split_whitespace().collect::<Vec<_>>();
            let is_data_row = tokens
                .first()
                .is_some_and(|token| token.parse::<i64>().is_ok());
            if !is_data_row {
                continue;
            }

            let line_number = index + 1;
            if tokens.len() <= STRENGTH_COLUMN {
                return Err(ExtractionFailure::MalformedLine {
                    line: line_number,
                    reason: format!(
                        "spectrum row has {} columns, expected at least {}",
                        tokens.len(),
                        STRENGTH_COLUMN + 1
                    ),
                });
            }

            let (wavelength, strength) = (tokens[WAVELENGTH_COLUMN], tokens[STRENGTH_COLUMN]);
            records.push(
                ExcitedStateRecord::new(
                    parse_positive_wavelength(wavelength, line_number)?,
                    parse_strength(strength, line_number)?,
                )
                .with_tokens(wavelength, strength),
            );
        }

        Ok(records)
    }
}
