use super::{SpectrumError, SpectrumResult};
use crate::common::constants::MAX_GRID_POINTS;
use serde::Serialize;

/// Ordered wavenumber sample points. Duplicates are kept and the order is the
/// output order of every spectrum.
#[derive(Debug, Clone, PartialEq)]
pub struct WavenumberGrid {
    points: Vec<f64>,
}

impl WavenumberGrid {
    /// Builds `lower, lower + step, ...` up to but excluding `upper + 1`, with
    /// the point count rounded up the way `arange(lower, upper + 1, step)` does.
    /// Pairs yielding more than [`MAX_GRID_POINTS`] points are rejected.
    pub fn from_range(lower: f64, upper: f64, step: f64) -> SpectrumResult<Self> {
        if !lower.is_finite() || !upper.is_finite() || lower > upper {
            return Err(SpectrumError::input_validation(
                "INPUT.WAVENUMBER_RANGE",
                format!("invalid wavenumber range {}-{}", lower, upper),
            ));
        }
        if !step.is_finite() || step <= 0.0 {
            return Err(SpectrumError::input_validation(
                "INPUT.WAVENUMBER_INTERVAL",
                format!("wavenumber interval must be positive, got {}", step),
            ));
        }

        let count = ((upper + 1.0 - lower) / step).ceil();
        if !count.is_finite() || count > MAX_GRID_POINTS as f64 {
            return Err(SpectrumError::input_validation(
                "INPUT.WAVENUMBER_INTERVAL",
                format!(
                    "wavenumber interval {} over {}-{} exceeds {} grid points",
                    step, lower, upper, MAX_GRID_POINTS
                ),
            ));
        }
        let count = count as usize;
        let points = (0..count)
            .map(|index| lower + index as f64 * step)
            .collect();
        Ok(Self { points })
    }

    pub fn from_values(points: Vec<f64>) -> SpectrumResult<Self> {
        if points.is_empty() {
            return Err(SpectrumError::input_validation(
                "INPUT.WAVENUMBER_GRID",
                "wavenumber grid must contain at least one point",
            ));
        }
        if let Some(value) = points.iter().find(|value| !value.is_finite()) {
            return Err(SpectrumError::input_validation(
                "INPUT.WAVENUMBER_GRID",
                format!("wavenumber grid contains non-finite value {}", value),
            ));
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[f64] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.points.get(index).copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpectrumPoint {
    pub wavenumber: f64,
    pub intensity: f64,
}

impl SpectrumPoint {
    pub const fn new(wavenumber: f64, intensity: f64) -> Self {
        Self {
            wavenumber,
            intensity,
        }
    }
}
