pub mod config;
pub mod corpus;
pub mod errors;
pub mod grid;

pub use config::{ResolvedConfig, SpectrumConfig, SpectrumOptions};
pub use corpus::{Corpus, ExcitedStateRecord, RecordTokens, StructureDataset};
pub use errors::{
    ComputeResult, ExitClass, ParserResult, SpectrumError, SpectrumErrorCategory, SpectrumResult,
};
pub use grid::{SpectrumPoint, WavenumberGrid};

use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::str::FromStr;

/// Program that produced the excited-state output files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceFormat {
    Gaussian,
    Orca,
}

impl SourceFormat {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Gaussian => "gaussian",
            Self::Orca => "orca",
        }
    }

    pub const fn default_file_pattern(self) -> &'static str {
        match self {
            Self::Gaussian => "*.log",
            Self::Orca => "*.out",
        }
    }
}

impl Display for SourceFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

impl FromStr for SourceFormat {
    type Err = String;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token.trim().to_ascii_lowercase().as_str() {
            "gaussian" | "g09" | "g16" => Ok(Self::Gaussian),
            "orca" => Ok(Self::Orca),
            other => Err(format!(
                "unknown source format '{}'; expected 'gaussian' or 'orca'",
                other
            )),
        }
    }
}

/// Broadening lineshape used to turn discrete transitions into a spectrum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FitKind {
    #[default]
    Gaussian,
    Lorentzian,
}

impl FitKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Gaussian => "gaussian",
            Self::Lorentzian => "lorentzian",
        }
    }

    /// Accepts the historical `lorentzain` spelling alongside `lorentzian`.
    pub fn parse(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "gaussian" => Some(Self::Gaussian),
            "lorentzian" | "lorentzain" => Some(Self::Lorentzian),
            _ => None,
        }
    }

    pub const fn spectrum_file_name(self) -> &'static str {
        match self {
            Self::Gaussian => "spectrum_gaussian.dat",
            Self::Lorentzian => "spectrum_lorentzian.dat",
        }
    }

    pub const fn average_file_name(self) -> &'static str {
        match self {
            Self::Gaussian => "average_spectrum.dat",
            Self::Lorentzian => "average.dat",
        }
    }

    pub const fn dispersion_file_name(self) -> &'static str {
        match self {
            Self::Gaussian => "dispersion_spectrum.dat",
            Self::Lorentzian => "dispersion.dat",
        }
    }

    /// Decimal places used for intensities in the fixed-width spectrum files.
    pub const fn intensity_precision(self) -> usize {
        match self {
            Self::Gaussian => 10,
            Self::Lorentzian => 12,
        }
    }
}

impl Display for FitKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AverageMode {
    #[default]
    Arithmetic,
}

impl AverageMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Arithmetic => "arithmetic",
        }
    }

    pub fn parse(token: &str) -> SpectrumResult<Self> {
        match token.trim().to_lowercase().as_str() {
            "arithmetic" | "aritmética" | "aritmetica" => Ok(Self::Arithmetic),
            other => Err(SpectrumError::input_validation(
                "INPUT.AVERAGE_MODE",
                format!(
                    "unsupported averaging mode '{}'; only 'arithmetic' is implemented",
                    other
                ),
            )),
        }
    }
}

impl Display for AverageMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComputeArtifact {
    pub relative_path: PathBuf,
}

impl ComputeArtifact {
    pub fn new(relative_path: impl Into<PathBuf>) -> Self {
        Self {
            relative_path: relative_path.into(),
        }
    }
}
