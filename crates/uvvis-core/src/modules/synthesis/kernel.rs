use crate::common::constants::KernelConstants;
use crate::domain::{ExcitedStateRecord, FitKind};
use crate::modules::BroadeningKernel;

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum KernelError {
    #[error("{fit} kernel is singular at wavenumber {wavenumber}")]
    SingularWavenumber { fit: FitKind, wavenumber: f64 },
    #[error("{fit} kernel is singular for transition wavelength {wavelength}")]
    SingularWavelength { fit: FitKind, wavelength: f64 },
    #[error(
        "{fit} kernel produced a non-finite intensity at wavenumber {wavenumber} for wavelength {wavelength}"
    )]
    NonFinite {
        fit: FitKind,
        wavenumber: f64,
        wavelength: f64,
    },
}

/// `A * (f / (FACT1/SIGMA)) * exp(-(((1/nu) - (1/lambda)) / (FACT2/SIGMA))^2)`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GaussianKernel {
    constants: KernelConstants,
}

impl GaussianKernel {
    pub const fn new(constants: KernelConstants) -> Self {
        Self { constants }
    }
}

impl BroadeningKernel for GaussianKernel {
    fn fit_kind(&self) -> FitKind {
        FitKind::Gaussian
    }

    fn contribution(
        &self,
        wavenumber: f64,
        record: &ExcitedStateRecord,
    ) -> Result<f64, KernelError> {
        let wavelength = record.wavelength();
        if wavenumber == 0.0 {
            return Err(KernelError::SingularWavenumber {
                fit: FitKind::Gaussian,
                wavenumber,
            });
        }
        if wavelength == 0.0 {
            return Err(KernelError::SingularWavelength {
                fit: FitKind::Gaussian,
                wavelength,
            });
        }

        let offset = (wavenumber.recip() - wavelength.recip()) / self.constants.inverse_width();
        let value = self.constants.amplitude
            * (record.oscillator_strength() / self.constants.strength_scale())
            * (-(offset * offset)).exp();
        finite_or_error(FitKind::Gaussian, value, wavenumber, wavelength)
    }
}

/// `A * (f / (FACT1/SIGMA)) * 1 / ((nu - lambda)^2 + 1)`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LorentzianKernel {
    constants: KernelConstants,
}

impl LorentzianKernel {
    pub const fn new(constants: KernelConstants) -> Self {
        Self { constants }
    }
}

impl BroadeningKernel for LorentzianKernel {
    fn fit_kind(&self) -> FitKind {
        FitKind::Lorentzian
    }

    fn contribution(
        &self,
        wavenumber: f64,
        record: &ExcitedStateRecord,
    ) -> Result<f64, KernelError> {
        let wavelength = record.wavelength();
        let offset = wavenumber - wavelength;
        let value = self.constants.amplitude
            * (record.oscillator_strength() / self.constants.strength_scale())
            * (offset * offset + 1.0).recip();
        finite_or_error(FitKind::Lorentzian, value, wavenumber, wavelength)
    }
}

pub fn kernel_for(fit: FitKind, constants: KernelConstants) -> Box<dyn BroadeningKernel> {
    match fit {
        FitKind::Gaussian => Box::new(GaussianKernel::new(constants)),
        FitKind::Lorentzian => Box::new(LorentzianKernel::new(constants)),
    }
}

fn finite_or_error(
    fit: FitKind,
    value: f64,
    wavenumber: f64,
    wavelength: f64,
) -> Result<f64, KernelError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(KernelError::NonFinite {
            fit,
            wavenumber,
            wavelength,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{GaussianKernel, KernelError, LorentzianKernel, kernel_for};
    use crate::common::constants::{AMPLITUDE, FACT1, KernelConstants, SIGMA};
    use crate::domain::{ExcitedStateRecord, FitKind};
    use crate::modules::BroadeningKernel;

    #[test]
    fn gaussian_peak_equals_scaled_strength() {
        let kernel = GaussianKernel::default();
        let record = ExcitedStateRecord::new(400.0, 0.5);
        let peak = kernel.contribution(400.0, &record).expect("finite peak");

        let expected = AMPLITUDE * (0.5 / (FACT1 / SIGMA));
        assert!(peak.is_finite());
        assert!(peak > 0.0);
        assert!((peak - expected).abs() <= expected * 1.0e-12);
    }

    #[test]
    fn gaussian_decreases_with_inverse_wavelength_offset() {
        let kernel = GaussianKernel::default();
        let record = ExcitedStateRecord::new(400.0, 0.5);
        let mut previous = kernel.contribution(400.0, &record).expect("peak");
        for wavenumber in [402.0, 405.0, 410.0, 420.0, 450.0] {
            let value = kernel.contribution(wavenumber, &record).expect("finite");
            assert!(value < previous, "value at {} should decrease", wavenumber);
            previous = value;
        }
        let mut previous = kernel.contribution(400.0, &record).expect("peak");
        for wavenumber in [398.0, 395.0, 390.0, 380.0, 350.0] {
            let value = kernel.contribution(wavenumber, &record).expect("finite");
            assert!(value < previous, "value at {} should decrease", wavenumber);
            previous = value;
        }
    }

    #[test]
    fn gaussian_rejects_zero_wavenumber_and_wavelength() {
        let kernel = GaussianKernel::default();
        assert!(matches!(
            kernel.contribution(0.0, &ExcitedStateRecord::new(400.0, 0.5)),
            Err(KernelError::SingularWavenumber { .. })
        ));
        assert!(matches!(
            kernel.contribution(400.0, &ExcitedStateRecord::new(0.0, 0.5)),
            Err(KernelError::SingularWavelength { .. })
        ));
    }

    #[test]
    fn lorentzian_is_maximal_at_the_transition_and_strictly_decreasing() {
        let kernel = LorentzianKernel::default();
        let record = ExcitedStateRecord::new(420.0, 0.3);
        let peak = kernel.contribution(420.0, &record).expect("peak");
        assert!((peak - AMPLITUDE * (0.3 / (FACT1 / SIGMA))).abs() <= peak * 1.0e-12);

        let mut previous = peak;
        for offset in [0.25, 0.5, 1.0, 2.0, 10.0, 100.0] {
            let above = kernel.contribution(420.0 + offset, &record).expect("finite");
            let below = kernel.contribution(420.0 - offset, &record).expect("finite");
            assert!(above < previous);
            assert!((above - below).abs() <= above * 1.0e-12);
            previous = above;
        }
    }

    #[test]
    fn lorentzian_has_no_singularity_at_zero() {
        let kernel = LorentzianKernel::default();
        let value = kernel
            .contribution(0.0, &ExcitedStateRecord::new(0.0, 1.0))
            .expect("finite at origin");
        assert!(value > 0.0);
    }

    #[test]
    fn non_finite_results_are_reported() {
        let constants = KernelConstants {
            amplitude: f64::MAX,
            ..KernelConstants::default()
        };
        let kernel = LorentzianKernel::new(constants);
        let error = kernel
            .contribution(400.0, &ExcitedStateRecord::new(400.0, 1.0e10))
            .expect_err("overflow should be reported");
        assert!(matches!(error, KernelError::NonFinite { .. }));
    }

    #[test]
    fn kernel_factory_matches_fit_kind() {
        let constants = KernelConstants::default();
        assert_eq!(
            kernel_for(FitKind::Gaussian, constants).fit_kind(),
            FitKind::Gaussian
        );
        assert_eq!(
            kernel_for(FitKind::Lorentzian, constants).fit_kind(),
            FitKind::Lorentzian
        );
    }
}
