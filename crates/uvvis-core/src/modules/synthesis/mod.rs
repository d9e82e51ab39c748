mod kernel;

pub use kernel::{GaussianKernel, KernelError, LorentzianKernel, kernel_for};

use super::BroadeningKernel;
use crate::domain::{
    AverageMode, Corpus, ExcitedStateRecord, FitKind, SpectrumConfig, SpectrumPoint,
    WavenumberGrid,
};
use crate::modules::serialization::{format_delimited_sample, format_spectrum_line};
use serde::Serialize;
use tracing::{info, warn};

/// Running sum of one grid index across structures.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AccumulatorSlot {
    pub sum: f64,
    pub samples: usize,
}

impl AccumulatorSlot {
    /// `None` when no structure produced a sample at this index.
    pub fn finalize(&self, mode: AverageMode) -> Option<f64> {
        if self.samples == 0 {
            return None;
        }
        match mode {
            AverageMode::Arithmetic => Some(self.sum / self.samples as f64),
        }
    }
}

/// One slot per grid index, so repeated wavenumbers never share a sum.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectrumAccumulator {
    slots: Vec<AccumulatorSlot>,
}

impl SpectrumAccumulator {
    pub fn new(grid_len: usize) -> Self {
        Self {
            slots: vec![AccumulatorSlot::default(); grid_len],
        }
    }

    /// # Panics
    ///
    /// Panics if `grid_index` is not an index of the grid the accumulator was
    /// sized for.
    pub fn add(&mut self, grid_index: usize, intensity: f64) {
        let slot = &mut self.slots[grid_index];
        slot.sum += intensity;
        slot.samples += 1;
    }

    pub fn slots(&self) -> &[AccumulatorSlot] {
        &self.slots
    }

    pub fn slot(&self, grid_index: usize) -> Option<&AccumulatorSlot> {
        self.slots.get(grid_index)
    }
}

/// Intensities of one structure by grid index; `None` marks a kernel failure.
#[derive(Debug, Clone, PartialEq)]
pub struct StructureSpectrum {
    pub label: String,
    pub intensities: Vec<Option<f64>>,
}

impl StructureSpectrum {
    pub fn points<'a>(
        &'a self,
        grid: &'a WavenumberGrid,
    ) -> impl Iterator<Item = SpectrumPoint> + 'a {
        grid.points()
            .iter()
            .zip(&self.intensities)
            .filter_map(|(wavenumber, intensity)| {
                intensity.map(|intensity| SpectrumPoint::new(*wavenumber, intensity))
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KernelFailure {
    pub structure: String,
    pub structure_index: usize,
    pub grid_index: usize,
    pub wavenumber: f64,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisOutcome {
    pub fit: FitKind,
    pub grid: WavenumberGrid,
    pub structures: Vec<StructureSpectrum>,
    pub accumulator: SpectrumAccumulator,
    pub failures: Vec<KernelFailure>,
}

impl SynthesisOutcome {
    /// Every successful per-structure intensity at one grid index.
    pub fn samples_at(&self, grid_index: usize) -> Vec<f64> {
        self.structures
            .iter()
            .filter_map(|structure| structure.intensities.get(grid_index).copied().flatten())
            .collect()
    }

    pub fn sample_count(&self) -> usize {
        self.structures
            .iter()
            .map(|structure| structure.intensities.iter().flatten().count())
            .sum()
    }
}

/// Superposes the configured kernel over every structure of the corpus at
/// each grid point, in grid order.
pub fn synthesize(corpus: &Corpus, config: &SpectrumConfig) -> SynthesisOutcome {
    let kernel = kernel_for(config.fit, config.constants);
    let grid = &config.grid;
    let mut accumulator = SpectrumAccumulator::new(grid.len());
    let mut structures = Vec::with_capacity(corpus.structure_count());
    let mut failures = Vec::new();

    for (structure_index, structure) in corpus.structures().iter().enumerate() {
        info!(
            "synthesizing {} spectrum for '{}' ({} excited states)",
            config.fit,
            structure.label(),
            structure.excited_state_count()
        );

        let mut intensities = Vec::with_capacity(grid.len());
        for (grid_index, wavenumber) in grid.points().iter().copied().enumerate() {
            match structure_intensity(kernel.as_ref(), wavenumber, structure.records()) {
                Ok(intensity) => {
                    accumulator.add(grid_index, intensity);
                    intensities.push(Some(intensity));
                }
                Err(error) => {
                    warn!(
                        "no sample for '{}' at wavenumber {}: {}",
                        structure.label(),
                        wavenumber,
                        error
                    );
                    failures.push(KernelFailure {
                        structure: structure.label().to_string(),
                        structure_index,
                        grid_index,
                        wavenumber,
                        reason: error.to_string(),
                    });
                    intensities.push(None);
                }
            }
        }

        structures.push(StructureSpectrum {
            label: structure.label().to_string(),
            intensities,
        });
    }

    SynthesisOutcome {
        fit: config.fit,
        grid: grid.clone(),
        structures,
        accumulator,
        failures,
    }
}

pub fn structure_intensity(
    kernel: &dyn BroadeningKernel,
    wavenumber: f64,
    records: &[ExcitedStateRecord],
) -> Result<f64, KernelError> {
    records.iter().try_fold(0.0, |total, record| {
        Ok(total + kernel.contribution(wavenumber, record)?)
    })
}

/// Fixed-width per-structure blocks, each followed by a blank line.
pub fn render_structure_spectra(outcome: &SynthesisOutcome) -> String {
    let precision = outcome.fit.intensity_precision();
    let mut content = String::new();
    for structure in &outcome.structures {
        for point in structure.points(&outcome.grid) {
            content.push_str(&format_spectrum_line(
                point.wavenumber,
                point.intensity,
                precision,
            ));
            content.push('\n');
        }
        content.push('\n');
    }
    content
}

pub fn render_raw_samples(outcome: &SynthesisOutcome) -> String {
    let mut content = String::new();
    for structure in &outcome.structures {
        for point in structure.points(&outcome.grid) {
            content.push_str(&format_delimited_sample(point.wavenumber, point.intensity));
            content.push('\n');
        }
    }
    content
}
