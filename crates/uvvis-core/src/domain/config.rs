use super::{AverageMode, FitKind, SpectrumResult, WavenumberGrid};
use crate::common::constants::{
    DEFAULT_WAVENUMBER_INTERVAL, DEFAULT_WAVENUMBER_LOWER, DEFAULT_WAVENUMBER_UPPER,
    KernelConstants,
};
use tracing::warn;

/// Unvalidated user choices, as typed on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpectrumOptions {
    pub fit: Option<String>,
    pub range: Option<String>,
    pub interval: Option<String>,
    pub average: Option<String>,
}

/// Immutable configuration handed to every synthesis stage.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectrumConfig {
    pub fit: FitKind,
    pub average: AverageMode,
    pub grid: WavenumberGrid,
    pub constants: KernelConstants,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub config: SpectrumConfig,
    pub warnings: Vec<String>,
}

impl SpectrumConfig {
    pub fn new(fit: FitKind, average: AverageMode, grid: WavenumberGrid) -> Self {
        Self {
            fit,
            average,
            grid,
            constants: KernelConstants::default(),
        }
    }

    /// Invalid fit, range or interval values fall back to their defaults with
    /// a warning, as does a range/interval pair producing too many grid
    /// points. An unsupported averaging mode is rejected.
    pub fn resolve(options: &SpectrumOptions) -> SpectrumResult<ResolvedConfig> {
        let mut warnings = Vec::new();

        let fit = match non_blank(options.fit.as_deref()) {
            None => FitKind::default(),
            Some(raw) => FitKind::parse(raw).unwrap_or_else(|| {
                push_warning(
                    &mut warnings,
                    format!(
                        "invalid fit type '{}', using '{}'",
                        raw,
                        FitKind::default()
                    ),
                );
                FitKind::default()
            }),
        };

        let (lower, upper) = match non_blank(options.range.as_deref()) {
            None => (DEFAULT_WAVENUMBER_LOWER, DEFAULT_WAVENUMBER_UPPER),
            Some(raw) => parse_range(raw).unwrap_or_else(|| {
                push_warning(
                    &mut warnings,
                    format!(
                        "invalid wavenumber range '{}', using '{}-{}'",
                        raw, DEFAULT_WAVENUMBER_LOWER, DEFAULT_WAVENUMBER_UPPER
                    ),
                );
                (DEFAULT_WAVENUMBER_LOWER, DEFAULT_WAVENUMBER_UPPER)
            }),
        };

        let interval = match non_blank(options.interval.as_deref()) {
            None => DEFAULT_WAVENUMBER_INTERVAL,
            Some(raw) => parse_interval(raw).unwrap_or_else(|| {
                push_warning(
                    &mut warnings,
                    format!(
                        "invalid wavenumber interval '{}', using '{}'",
                        raw, DEFAULT_WAVENUMBER_INTERVAL
                    ),
                );
                DEFAULT_WAVENUMBER_INTERVAL
            }),
        };

        let average = match non_blank(options.average.as_deref()) {
            None => AverageMode::default(),
            Some(raw) => AverageMode::parse(raw)?,
        };

        let grid = match WavenumberGrid::from_range(lower, upper, interval) {
            Ok(grid) => grid,
            Err(error) => {
                push_warning(
                    &mut warnings,
                    format!(
                        "{}, using '{}-{}' with interval '{}'",
                        error.message(),
                        DEFAULT_WAVENUMBER_LOWER,
                        DEFAULT_WAVENUMBER_UPPER,
                        DEFAULT_WAVENUMBER_INTERVAL
                    ),
                );
                WavenumberGrid::from_range(
                    DEFAULT_WAVENUMBER_LOWER,
                    DEFAULT_WAVENUMBER_UPPER,
                    DEFAULT_WAVENUMBER_INTERVAL,
                )?
            }
        };

        Ok(ResolvedConfig {
            config: Self::new(fit, average, grid),
            warnings,
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

fn push_warning(warnings: &mut Vec<String>, message: String) {
    warn!("{}", message);
    warnings.push(message);
}

/// Parses `"<low>-<high>"`.
fn parse_range(raw: &str) -> Option<(f64, f64)> {
    let (lower, upper) = raw.split_once('-')?;
    let lower = lower.trim().parse::<f64>().ok()?;
    let upper = upper.trim().parse::<f64>().ok()?;
    (lower.is_finite() && upper.is_finite() && lower <= upper).then_some((lower, upper))
}

fn parse_interval(raw: &str) -> Option<f64> {
    raw.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value > 0.0)
}
