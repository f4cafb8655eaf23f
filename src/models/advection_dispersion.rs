//! One-dimensional advection–dispersion–decay model
//!
//! # Mathematical Background
//!
//! A solute carried through a saturated column obeys
//!
//! ```text
//! ∂C/∂t = -v(x)·∂C/∂x + D(x)·∂²C/∂x² - λ(x)·C
//! ```
//!
//! Where:
//! - **C** : Concentration [mg/L]
//! - **v** : Pore-water velocity [m/day]
//! - **D** : Dispersion coefficient [m²/day]
//! - **λ** : First-order decay rate [1/day]
//! - **x** : Depth [m]
//!
//! The coefficients are piecewise constant, one triple per layer, and are
//! supplied point by point through a [`CoefficientField`].
//!
//! ## Spatial Discretization
//!
//! At an interior point `i` (`1 ≤ i ≤ Nx-2`) the right-hand side is
//!
//! ```text
//! adv   = -v[i]·(C[i] - C[i-1]) / dx                      (upwind, v ≥ 0)
//! disp  =  D[i]·(C[i+1] - 2·C[i] + C[i-1]) / dx²          (central)
//! decay = -λ[i]·C[i]
//! ```
//!
//! and the rate returned is `adv + disp + decay`, summed in that order.
//! The rate at `i = 0` and `i = Nx-1` is zero: both boundary
//! values are imposed by the solver after every step.
//!
//! # Example Usage
//!
//! ```rust
//! use strata_rs::media::{CoefficientField, MaterialKind, TransportProperties};
//! use strata_rs::models::AdvectionDispersionDecay;
//! use strata_rs::physics::PhysicalModel;
//!
//! let gravel = TransportProperties::new(1e-3, 1e-2, 1e-2);
//! let field = CoefficientField::uniform(50, gravel, MaterialKind::Gravel);
//! let model = AdvectionDispersionDecay::new(field, 0.1, 100.0).unwrap();
//!
//! let rate = model.compute_physics(&model.setup_initial_state());
//! // Flat interior profile: only decay acts
//! assert!((rate[10] + 1e-2 * 100.0).abs() < 1e-12);
//! assert_eq!(rate[0], 0.0);
//! ```

use nalgebra::DVector;

use crate::error::{TransportError, TransportResult};
use crate::grid::MIN_GRID_POINTS;
use crate::media::{CoefficientField, MaterialKind, TransportProperties};
use crate::physics::PhysicalModel;
use crate::solver::StabilityReport;

// =================================================================================================
// Model
// =================================================================================================

/// Advection–dispersion–decay transport through a layered column
#[derive(Debug, Clone)]
pub struct AdvectionDispersionDecay {
    coefficients: CoefficientField,
    dx: f64,
    initial_concentration: f64,
}

impl AdvectionDispersionDecay {
    /// Build the model from per-point coefficients
    ///
    /// # Arguments
    ///
    /// * `coefficients` - `D`, `v`, `λ` at every grid point
    /// * `dx` - Spatial step of the difference quotients [m]
    /// * `initial_concentration` - Uniform concentration at `t = 0` [mg/L]
    ///
    /// # Errors
    ///
    /// Fewer than three points, inconsistent coefficient lengths, a
    /// non-positive `dx` or a non-finite initial concentration.
    pub fn new(
        coefficients: CoefficientField,
        dx: f64,
        initial_concentration: f64,
    ) -> TransportResult<Self> {
        let points = coefficients.len();
        if points < MIN_GRID_POINTS {
            return Err(TransportError::InvalidGrid(format!(
                "model needs at least {} points, got {}",
                MIN_GRID_POINTS, points
            )));
        }
        coefficients.check_length(points)?;
        if coefficients.layer_index.len() != points {
            return Err(TransportError::DimensionMismatch {
                what: "layer indices",
                expected: points,
                actual: coefficients.layer_index.len(),
            });
        }

        if !dx.is_finite() || dx <= 0.0 {
            return Err(TransportError::InvalidGrid(format!(
                "spatial step must be positive and finite, got {}",
                dx
            )));
        }
        if !initial_concentration.is_finite() {
            return Err(TransportError::Config(format!(
                "initial concentration must be finite, got {}",
                initial_concentration
            )));
        }

        Ok(Self {
            coefficients,
            dx,
            initial_concentration,
        })
    }

    /// Homogeneous column with a single material
    pub fn homogeneous(
        points: usize,
        dx: f64,
        properties: TransportProperties,
        initial_concentration: f64,
    ) -> TransportResult<Self> {
        properties.validate(MaterialKind::Gravel)?;
        let field = CoefficientField::uniform(points, properties, MaterialKind::Gravel);
        Self::new(field, dx, initial_concentration)
    }

    /// Per-point coefficients
    pub fn coefficients(&self) -> &CoefficientField {
        &self.coefficients
    }

    /// Uniform concentration at `t = 0`
    pub fn initial_concentration(&self) -> f64 {
        self.initial_concentration
    }

    /// Stability numbers of the explicit march for step `dt`
    pub fn stability_report(&self, dt: f64) -> StabilityReport {
        StabilityReport::assess(&self.coefficients, self.dx, dt)
    }

    /// Rate of change at interior point `i`
    #[inline]
    fn interior_rate(&self, c: &[f64], i: usize) -> f64 {
        let d = self.coefficients.dispersion[i];
        let v = self.coefficients.velocity[i];
        let lam = self.coefficients.decay[i];
        let dx = self.dx;

        let adv = -v * (c[i] - c[i - 1]) / dx;
        let disp = d * (c[i + 1] - 2.0 * c[i] + c[i - 1]) / (dx * dx);
        let decay = -lam * c[i];

        adv + disp + decay
    }

    /// Interior rates, in parallel when the grid exceeds `threshold` points
    fn sweep(&self, concentration: &DVector<f64>, threshold: usize) -> DVector<f64> {
        let n = self.points();
        debug_assert_eq!(
            concentration.len(),
            n,
            "profile length {} expected, got {}",
            n,
            concentration.len()
        );

        let c = concentration.as_slice();
        let mut rate = DVector::zeros(n);

        // Interior slice [1, n-2]; rate[0] and rate[n-1] stay at zero
        let interior = &mut rate.as_mut_slice()[1..n - 1];

        if n > threshold {
            #[cfg(feature = "parallel")]
            {
                use rayon::prelude::*;

                interior
                    .par_iter_mut()
                    .enumerate()
                    .for_each(|(k, r)| *r = self.interior_rate(c, k + 1));
            }
            #[cfg(not(feature = "parallel"))]
            {
                for (k, r) in interior.iter_mut().enumerate() {
                    *r = self.interior_rate(c, k + 1);
                }
            }
        } else {
            for (k, r) in interior.iter_mut().enumerate() {
                *r = self.interior_rate(c, k + 1);
            }
        }

        rate
    }
}

impl PhysicalModel for AdvectionDispersionDecay {
    fn points(&self) -> usize {
        self.coefficients.len()
    }

    fn dx(&self) -> f64 {
        self.dx
    }

    fn compute_physics(&self, concentration: &DVector<f64>) -> DVector<f64> {
        self.sweep(concentration, crate::solver::parallel_threshold())
    }

    fn setup_initial_state(&self) -> DVector<f64> {
        DVector::from_element(self.points(), self.initial_concentration)
    }

    fn name(&self) -> &str {
        "Advection-Dispersion-Decay 1D"
    }

    fn description(&self) -> Option<&str> {
        Some("Upwind advection, central dispersion and first-order decay in layered media")
    }

    fn max_stable_time_step(&self) -> Option<f64> {
        StabilityReport::assess(&self.coefficients, self.dx, 1.0).max_stable_dt
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn gravel() -> TransportProperties {
        TransportProperties::new(1e-3, 1e-2, 1e-2)
    }

    #[test]
    fn test_rejects_short_grid() {
        let err = AdvectionDispersionDecay::homogeneous(2, 0.1, gravel(), 100.0).unwrap_err();
        assert!(matches!(err, TransportError::InvalidGrid(_)));
    }

    #[test]
    fn test_rejects_bad_spacing() {
        assert!(AdvectionDispersionDecay::homogeneous(10, 0.0, gravel(), 100.0).is_err());
        assert!(AdvectionDispersionDecay::homogeneous(10, f64::NAN, gravel(), 100.0).is_err());
    }

    #[test]
    fn test_initial_state_is_uniform() {
        let model = AdvectionDispersionDecay::homogeneous(7, 0.1, gravel(), 100.0).unwrap();
        let state = model.setup_initial_state();

        assert_eq!(state.len(), 7);
        assert!(state.iter().all(|&c| c == 100.0));
    }

    #[test]
    fn test_boundary_rates_are_zero() {
        let model = AdvectionDispersionDecay::homogeneous(5, 0.1, gravel(), 1.0).unwrap();
        let profile = DVector::from_vec(vec![3.0, 1.0, 4.0, 1.0, 5.0]);
        let rate = model.compute_physics(&profile);

        assert_eq!(rate[0], 0.0);
        assert_eq!(rate[4], 0.0);
    }

    #[test]
    fn test_flat_profile_only_decays() {
        let model = AdvectionDispersionDecay::homogeneous(6, 0.025, gravel(), 100.0).unwrap();
        let rate = model.compute_physics(&model.setup_initial_state());

        for i in 1..5 {
            assert_relative_eq!(rate[i], -1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_linear_profile_has_no_dispersion() {
        // C = x, dx = 1: the second difference vanishes
        let props = TransportProperties::new(0.5, 2.0, 0.0);
        let model = AdvectionDispersionDecay::homogeneous(5, 1.0, props, 0.0).unwrap();
        let profile = DVector::from_vec(vec![0.0, 1.0, 2.0, 3.0, 4.0]);
        let rate = model.compute_physics(&profile);

        for i in 1..4 {
            assert_relative_eq!(rate[i], -2.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_rate_matches_hand_computation() {
        let props = TransportProperties::new(1e-3, 1e-2, 1e-2);
        let model = AdvectionDispersionDecay::homogeneous(3, 0.025, props, 0.0).unwrap();
        let profile = DVector::from_vec(vec![0.0, 100.0, 100.0]);
        let rate = model.compute_physics(&profile);

        let adv = -1e-2 * (100.0 - 0.0) / 0.025;
        let disp = 1e-3 * (100.0 - 2.0 * 100.0 + 0.0) / (0.025 * 0.025);
        let decay = -1e-2 * 100.0;
        assert_eq!(rate[1], adv + disp + decay);
    }

    #[test]
    fn test_heterogeneous_coefficients_are_used_pointwise() {
        let mut field = CoefficientField::uniform(5, gravel(), MaterialKind::Gravel);
        field.decay[2] = 0.5;
        let model = AdvectionDispersionDecay::new(field, 0.1, 10.0).unwrap();
        let rate = model.compute_physics(&model.setup_initial_state());

        assert_relative_eq!(rate[1], -0.1, epsilon = 1e-12);
        assert_relative_eq!(rate[2], -5.0, epsilon = 1e-12);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_threshold_path_is_bit_identical() {
        let model = AdvectionDispersionDecay::homogeneous(64, 0.025, gravel(), 0.0).unwrap();
        let profile = DVector::from_fn(64, |i, _| ((i * 37) % 11) as f64);

        let sequential = model.sweep(&profile, usize::MAX);
        let threshold_path = model.sweep(&profile, 8);

        assert_eq!(sequential, threshold_path);
    }

    #[test]
    fn test_stability_limit() {
        let model = AdvectionDispersionDecay::homogeneous(10, 0.025, gravel(), 100.0).unwrap();
        let limit = model.max_stable_time_step().unwrap();

        // 1 / (2·1e-3/0.025² + 1e-2/0.025 + 1e-2) = 1 / 3.61
        assert_relative_eq!(limit, 1.0 / 3.61, epsilon = 1e-12);
        assert!(model.stability_report(0.1).is_stable());
        assert!(!model.stability_report(1.0).is_stable());
    }
}
