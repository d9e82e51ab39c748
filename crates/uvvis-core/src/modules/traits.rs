use crate::domain::{ExcitedStateRecord, FitKind, SourceFormat};
use crate::modules::extract::ExtractionFailure;
use crate::modules::synthesis::KernelError;

/// Pulls excited-state records out of the text of one program output file.
pub trait LogExtractor {
    fn source_format(&self) -> SourceFormat;

    /// Phrase a file must contain anywhere to be considered at all. Files
    /// without it are dropped from the candidate list before extraction.
    fn required_marker(&self) -> Option<&str> {
        None
    }

    /// Records in order of appearance; their count is the file's
    /// excited-state count.
    fn extract(&self, source: &str) -> Result<Vec<ExcitedStateRecord>, ExtractionFailure>;
}

/// Closed-form lineshape spreading one transition over the wavenumber axis.
pub trait BroadeningKernel {
    fn fit_kind(&self) -> FitKind;

    fn contribution(
        &self,
        wavenumber: f64,
        record: &ExcitedStateRecord,
    ) -> Result<f64, KernelError>;
}
