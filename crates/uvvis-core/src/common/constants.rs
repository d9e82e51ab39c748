//! Physical constants of the UV-VIS broadening kernels and run defaults.
//!
//! The kernels receive these through [`KernelConstants`] rather than reading
//! module-level values, so alternative widths can be injected in tests.

pub const AMPLITUDE: f64 = 1.306_297_447_36e8;
pub const FACT1: f64 = 1.0e7;
pub const FACT2: f64 = 1.0;
pub const SIGMA: f64 = 3_099.6;

pub const DEFAULT_WAVENUMBER_LOWER: f64 = 100.0;
pub const DEFAULT_WAVENUMBER_UPPER: f64 = 800.0;
pub const DEFAULT_WAVENUMBER_INTERVAL: f64 = 10.0;
/// Upper bound on the sample points a range/interval pair may produce.
pub const MAX_GRID_POINTS: usize = 10_000_000;

pub const DATASET_FILE_NAME: &str = "input.dat";
pub const RAW_SAMPLES_FILE_NAME: &str = "dados_spectrum.txt";
pub const MEAN_SAMPLES_FILE_NAME: &str = "medias.txt";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KernelConstants {
    pub amplitude: f64,
    pub fact1: f64,
    pub fact2: f64,
    pub sigma: f64,
}

impl KernelConstants {
    /// Divisor applied to the oscillator strength, `FACT1 / SIGMA`.
    pub fn strength_scale(&self) -> f64 {
        self.fact1 / self.sigma
    }

    /// Gaussian width in inverse wavelength, `FACT2 / SIGMA`.
    pub fn inverse_width(&self) -> f64 {
        self.fact2 / self.sigma
    }
}

impl Default for KernelConstants {
    fn default() -> Self {
        Self {
            amplitude: AMPLITUDE,
            fact1: FACT1,
            fact2: FACT2,
            sigma: SIGMA,
        }
    }
}
