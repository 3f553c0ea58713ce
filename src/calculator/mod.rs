//! FeEDTA iron-buffer calculator.
//!
//! Estimates how much phytoplankton biomass an FeEDTA-buffered culture
//! medium can support before cellular iron uptake pulls the dissolved
//! inorganic iron (Fe') more than 10% below its abiotic steady state.
//!
//! Fe' at a given cell density is the positive root of the steady-state
//! balance between FeEDTA dissociation, re-chelation by free EDTA and
//! uptake by the cells:
//!
//! ```text
//! kf·EDTA·Fe'² + (Krho·kf·EDTA − kd'·FeEDTA + N·rho_max)·Fe' − kd'·FeEDTA·Krho = 0
//! ```
//!
//! Rate constants follow Sunda & Huntsman (1997, 2003) and Sunda (2005).
//! Reference: Rivers, Rose & Webb (2013), J. Phycol. 49(5) 1017-1021.

mod precision;

use serde::Serialize;

use crate::error::CalculatorError;

pub use precision::to_precision;

/// FeEDTA dark dissociation rate constant at 20 °C (s⁻¹).
pub const KD: f64 = 1.72e-6;

/// FeEDTA photo-dissociation rate constant at 500 µE m⁻² s⁻¹ (s⁻¹).
pub const KHV: f64 = 4.3e-6;

/// Light intensity at which [`KHV`] was measured (µE m⁻² s⁻¹).
pub const KHV_REFERENCE_LIGHT: f64 = 500.0;

/// FeEDTA formation rate constant (L mol⁻¹ s⁻¹).
pub const KF: f64 = 17.0;

/// Cellular carbon per litre of cell volume (mol C L⁻¹).
pub const CARBON_PER_CELL_VOLUME: f64 = 15.0;

/// Maximum iron uptake rate per membrane area (nmol m⁻² d⁻¹).
pub const VMAX: f64 = 1276.0;

/// Half-saturation constant for iron uptake (mol L⁻¹).
pub const KRHO: f64 = 5.1e-10;

/// Largest biomass plotted on the biomass curve (mol C L⁻¹).
pub const MAX_BIOMASS: f64 = 2e-4;

/// Points per curve.
pub const RESOLUTION: u32 = 50;

/// Relative Fe' drop that counts as buffer failure.
pub const FAILURE_FRACTION: f64 = 0.1;

/// Fe' solubility limit (mol L⁻¹), Liu & Millero (2002).
pub const SOLUBILITY_LIMIT: f64 = 4e-10;

/// Culture conditions entered by the user.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BufferParams {
    /// Cell diameter (µm).
    pub cell_diameter_um: f64,
    /// EDTA not bound to iron (mol L⁻¹).
    pub edta: f64,
    /// Iron chelated to EDTA (mol L⁻¹).
    pub fe_edta: f64,
    /// Light intensity (µE m⁻² s⁻¹).
    pub light: f64,
    /// Hours of light per day.
    pub photoperiod_h: f64,
}

impl BufferParams {
    /// Checks that every parameter is physically meaningful.
    ///
    /// # Errors
    ///
    /// Returns [`CalculatorError::InvalidParameter`] for the first parameter
    /// out of range.
    pub fn validate(&self) -> Result<(), CalculatorError> {
        positive("diameter", self.cell_diameter_um)?;
        positive("edta", self.edta)?;
        positive("fe", self.fe_edta)?;
        if !(self.light.is_finite() && self.light >= 0.0) {
            return Err(CalculatorError::InvalidParameter {
                name: "light",
                value: self.light,
                expected: "a non-negative intensity",
            });
        }
        if !(0.0..=24.0).contains(&self.photoperiod_h) {
            return Err(CalculatorError::InvalidParameter {
                name: "photoperiod",
                value: self.photoperiod_h,
                expected: "hours between 0 and 24",
            });
        }
        Ok(())
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), CalculatorError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(CalculatorError::InvalidParameter {
            name,
            value,
            expected: "a positive number",
        })
    }
}

/// Key values of the buffer estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BufferEstimate {
    /// Abiotic steady-state Fe' (mol L⁻¹).
    pub abiotic_fe_prime: f64,
    /// Fe' at which the buffer is considered failed (mol L⁻¹).
    pub failure_fe_prime: f64,
    /// Cell density at buffer failure (cells mL⁻¹).
    pub failure_density_per_ml: f64,
    /// Biomass at buffer failure (µmol C L⁻¹).
    pub failure_biomass_umol_c: f64,
    /// Whether the abiotic Fe' exceeds [`SOLUBILITY_LIMIT`].
    pub exceeds_solubility: bool,
}

/// Fe' curves for plotting, as `[x, Fe' (pmol L⁻¹)]` pairs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BufferCurves {
    /// Fe' against biomass (µmol C L⁻¹), linear steps.
    pub by_biomass: Vec<[f64; 2]>,
    /// Fe' against cell density (cells mL⁻¹), logarithmic steps.
    pub by_density: Vec<[f64; 2]>,
}

/// Quantities derived from [`BufferParams`].
#[derive(Debug, Clone, Copy)]
struct Model {
    edta: f64,
    fe_edta: f64,
    /// Effective FeEDTA dissociation rate (s⁻¹).
    kd_prime: f64,
    /// Carbon per cell (mol C cell⁻¹).
    carbon_per_cell: f64,
    /// Maximum uptake rate per cell (L s⁻¹).
    rho_max: f64,
}

#[allow(clippy::suboptimal_flops)]
impl Model {
    fn new(params: &BufferParams) -> Result<Self, CalculatorError> {
        params.validate()?;

        let radius = params.cell_diameter_um / 1e6 / 2.0;
        let cell_volume = (4.0 / 3.0) * std::f64::consts::PI * radius.powi(3) * 1000.0;
        let rho_max = 4.0 * std::f64::consts::PI * radius.powi(2) * VMAX / (86_400.0 * 1e9);
        let kd_prime = KD
            + KHV * (params.light / KHV_REFERENCE_LIGHT) * (params.photoperiod_h / 24.0);

        Ok(Self {
            edta: params.edta,
            fe_edta: params.fe_edta,
            kd_prime,
            carbon_per_cell: cell_volume * CARBON_PER_CELL_VOLUME,
            rho_max,
        })
    }

    fn abiotic_fe_prime(&self) -> f64 {
        (self.kd_prime * self.fe_edta) / (KF * self.edta)
    }

    /// Steady-state Fe' (pmol L⁻¹) at `cells` cells per litre.
    fn fe_prime_pm(&self, cells: f64) -> f64 {
        let chelation = KRHO * self.edta * KF;
        let release = self.fe_edta * self.kd_prime;
        let uptake = cells * self.rho_max;
        let discriminant = chelation.powi(2)
            + 2.0 * chelation * release
            + release.powi(2)
            + uptake.powi(2)
            + 2.0 * (chelation - release) * uptake;

        -(1e12 / 2.0) * (chelation - release + uptake - discriminant.sqrt()) / (self.edta * KF)
    }

    /// Cell density (cells L⁻¹) at which Fe' falls to `fe_prime` (mol L⁻¹).
    fn density_at(&self, fe_prime: f64) -> f64 {
        let formation = self.edta * KF;
        let release = self.fe_edta * self.kd_prime;
        -(formation * fe_prime.powi(2) - fe_prime * release
            + (formation * fe_prime - release) * KRHO)
            / (fe_prime * self.rho_max)
    }
}

/// Computes the buffer failure point for `params`.
///
/// # Errors
///
/// Returns [`CalculatorError::InvalidParameter`] if `params` is invalid.
pub fn estimate(params: &BufferParams) -> Result<BufferEstimate, CalculatorError> {
    let model = Model::new(params)?;
    let abiotic = model.abiotic_fe_prime();
    let failure = (1.0 - FAILURE_FRACTION) * abiotic;
    let density = model.density_at(failure);

    Ok(BufferEstimate {
        abiotic_fe_prime: abiotic,
        failure_fe_prime: failure,
        failure_density_per_ml: density / 1000.0,
        failure_biomass_umol_c: density * model.carbon_per_cell * 1e6,
        exceeds_solubility: abiotic > SOLUBILITY_LIMIT,
    })
}

/// Steady-state Fe' (pmol L⁻¹) at `cells_per_litre`.
///
/// # Errors
///
/// Returns [`CalculatorError::InvalidParameter`] if `params` is invalid.
pub fn fe_prime_pm(params: &BufferParams, cells_per_litre: f64) -> Result<f64, CalculatorError> {
    Ok(Model::new(params)?.fe_prime_pm(cells_per_litre))
}

/// Samples the Fe' curves over the plotted biomass range.
///
/// # Errors
///
/// Returns [`CalculatorError::InvalidParameter`] if `params` is invalid.
pub fn curves(params: &BufferParams) -> Result<BufferCurves, CalculatorError> {
    let model = Model::new(params)?;
    let max_cells = MAX_BIOMASS / model.carbon_per_cell;
    let step = max_cells / f64::from(RESOLUTION);
    let ln_step = max_cells.ln() / f64::from(RESOLUTION);

    let by_biomass = (0..RESOLUTION)
        .map(|i| {
            let cells = f64::from(i) * step;
            [model.carbon_per_cell * 1e6 * cells, model.fe_prime_pm(cells)]
        })
        .collect();
    let by_density = (0..RESOLUTION)
        .map(|i| {
            let cells = (f64::from(i) * ln_step).exp();
            [cells / 1e3, model.fe_prime_pm(cells)]
        })
        .collect();

    Ok(BufferCurves {
        by_biomass,
        by_density,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typical() -> BufferParams {
        BufferParams {
            cell_diameter_um: 5.0,
            edta: 1e-4,
            fe_edta: 1e-7,
            light: 100.0,
            photoperiod_h: 24.0,
        }
    }

    fn assert_close(actual: f64, expected: f64) {
        let tolerance = expected.abs() * 1e-6;
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn abiotic_fe_prime_in_the_dark() {
        let params = BufferParams {
            light: 0.0,
            ..typical()
        };
        let est = estimate(&params).unwrap();
        assert_close(est.abiotic_fe_prime, KD * 1e-7 / (KF * 1e-4));
    }

    #[test]
    fn light_increases_dissociation() {
        let dark = estimate(&BufferParams {
            light: 0.0,
            ..typical()
        })
        .unwrap();
        let lit = estimate(&typical()).unwrap();
        assert!(lit.abiotic_fe_prime > dark.abiotic_fe_prime);
    }

    #[test]
    fn failure_is_ten_percent_below_abiotic() {
        let est = estimate(&typical()).unwrap();
        assert_close(est.failure_fe_prime, 0.9 * est.abiotic_fe_prime);
    }

    #[test]
    fn no_cells_gives_abiotic_fe_prime() {
        let est = estimate(&typical()).unwrap();
        let at_zero = fe_prime_pm(&typical(), 0.0).unwrap();
        assert_close(at_zero, est.abiotic_fe_prime * 1e12);
    }

    #[test]
    fn failure_density_reaches_failure_fe_prime() {
        let est = estimate(&typical()).unwrap();
        assert!(est.failure_density_per_ml > 0.0);
        let cells_per_litre = est.failure_density_per_ml * 1000.0;
        let fe = fe_prime_pm(&typical(), cells_per_litre).unwrap();
        assert_close(fe, est.failure_fe_prime * 1e12);
    }

    #[test]
    fn solubility_warning() {
        assert!(!estimate(&typical()).unwrap().exceeds_solubility);
        let saturated = BufferParams {
            edta: 1e-6,
            fe_edta: 1e-5,
            ..typical()
        };
        assert!(estimate(&saturated).unwrap().exceeds_solubility);
    }

    #[test]
    fn curves_have_fixed_resolution() {
        let curves = curves(&typical()).unwrap();
        assert_eq!(curves.by_biomass.len(), RESOLUTION as usize);
        assert_eq!(curves.by_density.len(), RESOLUTION as usize);
        assert_eq!(curves.by_biomass[0][0], 0.0);
        assert_close(curves.by_density[0][0], 1e-3);
    }

    #[test]
    fn fe_prime_falls_as_biomass_grows() {
        let curves = curves(&typical()).unwrap();
        for pair in curves.by_biomass.windows(2) {
            assert!(pair[1][1] < pair[0][1], "{pair:?}");
            assert!(pair[1][0] > pair[0][0]);
        }
    }

    #[test]
    fn rejects_zero_diameter() {
        let err = estimate(&BufferParams {
            cell_diameter_um: 0.0,
            ..typical()
        })
        .unwrap_err();
        assert!(err.to_string().contains("diameter"));
    }

    #[test]
    fn rejects_non_finite_edta() {
        let err = curves(&BufferParams {
            edta: f64::NAN,
            ..typical()
        })
        .unwrap_err();
        assert!(err.to_string().contains("edta"));
    }

    #[test]
    fn rejects_long_photoperiod() {
        let err = estimate(&BufferParams {
            photoperiod_h: 25.0,
            ..typical()
        })
        .unwrap_err();
        assert!(err.to_string().contains("photoperiod"));
    }

    #[test]
    fn rejects_negative_light() {
        assert!(
            estimate(&BufferParams {
                light: -1.0,
                ..typical()
            })
            .is_err()
        );
    }
}
