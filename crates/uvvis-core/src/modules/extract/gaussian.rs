use super::{ExtractionFailure, parse_positive_wavelength, parse_strength};
use crate::domain::{ExcitedStateRecord, SourceFormat};
use crate::modules::LogExtractor;

pub const NORMAL_TERMINATION_MARKER: &str = "Normal termination of Gaussian";
pub const DEFAULT_ENTER_MARKER: &str = "(Enter /scr/programs/g09/l914.exe)";
pub const LEAVE_MARKER_PREFIX: &str = "Leave Link";
pub const RECORD_MARKER_PREFIX: &str = "Excited State";
pub const STRENGTH_PREFIX: &str = "f=";

const WAVELENGTH_FIELD: usize = 3;
const STRENGTH_FIELD: usize = 5;

/// Text markers delimiting the link 914 (CIS/TD) excited-state block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GaussianMarkers {
    pub termination: String,
    pub enter: String,
    pub leave_prefix: String,
    pub record_prefix: String,
}

impl Default for GaussianMarkers {
    fn default() -> Self {
        Self {
            termination: NORMAL_TERMINATION_MARKER.to_string(),
            enter: DEFAULT_ENTER_MARKER.to_string(),
            leave_prefix: LEAVE_MARKER_PREFIX.to_string(),
            record_prefix: RECORD_MARKER_PREFIX.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GaussianExtractor {
    markers: GaussianMarkers,
}

impl GaussianExtractor {
    pub fn new(markers: GaussianMarkers) -> Self {
        Self { markers }
    }

    pub fn markers(&self) -> &GaussianMarkers {
        &self.markers
    }

    /// `Excited State   1:   Singlet-A   4.1034 eV  302.15 nm  f=0.0012 ...`
    fn parse_record_line(
        &self,
        line: &str,
        line_number: usize,
    ) -> Result<ExcitedStateRecord, ExtractionFailure> {
        let Some((_, remainder)) = line.split_once(':') else {
            return Err(ExtractionFailure::MalformedLine {
                line: line_number,
                reason: "excited-state line has no ':' separator".to_string(),
            });
        };

        let fields = remainder.split_whitespace().collect::<Vec<_>>();
        if fields.len() <= STRENGTH_FIELD {
            return Err(ExtractionFailure::MalformedLine {
                line: line_number,
                reason: format!(
                    "excited-state line has {} fields after ':', expected at least {}",
                    fields.len(),
                    STRENGTH_FIELD + 1
                ),
            });
        }

        let Some(strength) = fields[STRENGTH_FIELD].strip_prefix(STRENGTH_PREFIX) else {
            return Err(ExtractionFailure::MalformedLine {
                line: line_number,
                reason: format!(
                    "expected oscillator strength '{}<value>', found '{}'",
                    STRENGTH_PREFIX, fields[STRENGTH_FIELD]
                ),
            });
        };

        let wavelength = fields[WAVELENGTH_FIELD];
        Ok(ExcitedStateRecord::new(
            parse_positive_wavelength(wavelength, line_number)?,
            parse_strength(strength, line_number)?,
        )
        .with_tokens(wavelength, strength))
    }
}

impl LogExtractor for GaussianExtractor {
    fn source_format(&self) -> SourceFormat {
        SourceFormat::Gaussian
    }

    fn required_marker(&self) -> Option<&str> {
        Some(self.markers.termination.as_str())
    }

    fn extract(&self, source: &str) -> Result<Vec<ExcitedStateRecord>, ExtractionFailure> {
        let mut records = Vec::new();
        let mut in_section = false;

        for (index, line) in source.lines().enumerate() {
            let trimmed = line.trim();
            if !in_section {
                in_section = trimmed == self.markers.enter;
                continue;
            }
            if trimmed.starts_with(&self.markers.leave_prefix) {
                break;
            }
            if trimmed.starts_with(&self.markers.record_prefix) {
                records.push(self.parse_record_line(trimmed, index + 1)?);
            }
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::{GaussianExtractor, GaussianMarkers};
    use crate::modules::LogExtractor;
    use crate::modules::extract::ExtractionFailure;

    const GAUSSIAN_FIXTURE: &str = "\
 Excited State   9:      Singlet-A      9.9999 eV  124.00 nm  f=0.9000  <S**2>=0.000
 (Enter /scr/programs/g09/l914.exe)
 **********************************************************************
 Excitation energies and oscillator strengths:

 Excited State   1:      Singlet-A      4.1034 eV  302.15 nm  f=0.0012  <S**2>=0.000
      45 -> 48         0.69876
 Excited State   2:      Singlet-A      4.5510 eV  272.43 nm  f=0.2310  <S**2>=0.000
      46 -> 47         0.70123
 SavETr:  write IOETrn=   770 NScale= 10 NData=  16 NLR=1 NState=    2 LETran=      64.
 Leave Link  914 at Mon Jan  1 00:00:00 2024, MaxMem=   33554432 cpu:         1.0
 Excited State   3:      Singlet-A      5.0000 eV  247.97 nm  f=0.5000  <S**2>=0.000
 Normal termination of Gaussian 09 at Mon Jan  1 00:00:01 2024.
";

    #[test]
    fn extracts_records_inside_link_914_only() {
        let records = GaussianExtractor::default()
            .extract(GAUSSIAN_FIXTURE)
            .expect("fixture should parse");

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].wavelength(), 302.15);
        assert_eq!(records[0].oscillator_strength(), 0.0012);
        assert_eq!(records[1].wavelength(), 272.43);
        assert_eq!(records[1].oscillator_strength(), 0.231);
        let tokens = records[0].tokens().expect("source tokens");
        assert_eq!(tokens.wavelength, "302.15");
        assert_eq!(tokens.oscillator_strength, "0.0012");
    }

    #[test]
    fn default_markers_require_normal_termination() {
        let extractor = GaussianExtractor::default();
        assert_eq!(
            extractor.required_marker(),
            Some("Normal termination of Gaussian")
        );
    }

    #[test]
    fn custom_enter_marker_selects_other_installations() {
        let source = GAUSSIAN_FIXTURE.replace(
            "(Enter /scr/programs/g09/l914.exe)",
            "(Enter /opt/g16/l914.exe)",
        );
        assert!(
            GaussianExtractor::default()
                .extract(&source)
                .expect("scan")
                .is_empty()
        );

        let extractor = GaussianExtractor::new(GaussianMarkers {
            enter: "(Enter /opt/g16/l914.exe)".to_string(),
            ..GaussianMarkers::default()
        });
        assert_eq!(extractor.extract(&source).expect("scan").len(), 2);
    }

    #[test]
    fn truncated_record_line_fails_the_file() {
        let source = " (Enter /scr/programs/g09/l914.exe)\n Excited State   1:      Singlet-A      4.1034 eV\n";
        let failure = GaussianExtractor::default()
            .extract(source)
            .expect_err("truncated line should fail");
        assert!(matches!(
            failure,
            ExtractionFailure::MalformedLine { line: 2, .. }
        ));
    }

    #[test]
    fn strength_without_prefix_is_malformed() {
        let source = " (Enter /scr/programs/g09/l914.exe)\n Excited State   1:      Singlet-A      4.1034 eV  302.15 nm  0.0012\n";
        let failure = GaussianExtractor::default()
            .extract(source)
            .expect_err("missing f= should fail");
        assert!(failure.to_string().contains("f=<value>"));
    }
}
