//! Cross-structure mean spectrum and its population dispersion.

use crate::domain::{AverageMode, ComputeResult, SpectrumError, SpectrumPoint};
use crate::modules::serialization::{format_delimited_sample, format_spectrum_line};
use crate::modules::synthesis::SynthesisOutcome;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AggregatedSpectrum {
    pub mean: Vec<SpectrumPoint>,
    pub dispersion: Vec<SpectrumPoint>,
    pub warnings: Vec<String>,
}

/// Mean squared deviation of `samples` around `mean`, divided by the sample
/// count.
pub fn mean_squared_deviation(mean: f64, samples: &[f64]) -> ComputeResult<f64> {
    if samples.is_empty() {
        return Err(SpectrumError::computation(
            "RUN.DISPERSION_NO_SAMPLES",
            format!("no samples to compute the dispersion around mean {}", mean),
        ));
    }

    let squared = samples
        .iter()
        .map(|sample| (sample - mean).powi(2))
        .sum::<f64>();
    Ok(squared / samples.len() as f64)
}

/// Finalizes every accumulation slot in grid order. Indices without samples
/// are omitted from both series with a warning.
pub fn aggregate(outcome: &SynthesisOutcome, mode: AverageMode) -> AggregatedSpectrum {
    let mut aggregated = AggregatedSpectrum::default();

    for (grid_index, wavenumber) in outcome.grid.points().iter().copied().enumerate() {
        let Some(mean) = outcome
            .accumulator
            .slot(grid_index)
            .and_then(|slot| slot.finalize(mode))
        else {
            let message = format!(
                "no structure produced a sample at wavenumber {}; omitted from the {} mean",
                wavenumber, mode
            );
            warn!("{}", message);
            aggregated.warnings.push(message);
            continue;
        };
        aggregated.mean.push(SpectrumPoint::new(wavenumber, mean));

        match mean_squared_deviation(mean, &outcome.samples_at(grid_index)) {
            Ok(dispersion) => aggregated
                .dispersion
                .push(SpectrumPoint::new(wavenumber, dispersion)),
            Err(error) => {
                warn!("dispersion at wavenumber {} omitted: {}", wavenumber, error);
                aggregated.warnings.push(error.to_string());
            }
        }
    }

    aggregated
}

pub fn render_spectrum_series(points: &[SpectrumPoint], precision: usize) -> String {
    let mut content = String::new();
    for point in points {
        content.push_str(&format_spectrum_line(
            point.wavenumber,
            point.intensity,
            precision,
        ));
        content.push('\n');
    }
    content
}

pub fn render_delimited_series(points: &[SpectrumPoint]) -> String {
    let mut content = String::new();
    for point in points {
        content.push_str(&format_delimited_sample(point.wavenumber, point.intensity));
        content.push('\n');
    }
    content
}
