//! Explicit-scheme stability diagnostics
//!
//! # Mathematical Background
//!
//! Writing the forward-time / upwind / central update at an interior point
//! as a combination of the previous level,
//!
//! ```text
//! C[i,t+1] = (r + c)·C[i-1,t] + (1 - 2r - c - λ·dt)·C[i,t] + r·C[i+1,t]
//!
//! r = D·dt/dx²   (diffusion number)
//! c = v·dt/dx    (Courant number)
//! ```
//!
//! all weights are non-negative, and the scheme is monotone and bounded,
//! as long as
//!
//! ```text
//! dt · (2D/dx² + v/dx + λ) ≤ 1
//! ```
//!
//! at every point. This module evaluates that bound. It is a diagnostic: a
//! violation never alters the march, which relies on zero substitution of
//! non-finite cells instead.

use crate::media::CoefficientField;

/// Stability numbers of one run, maximised over the grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StabilityReport {
    /// Time step assessed
    pub dt: f64,

    /// Spatial step assessed
    pub dx: f64,

    /// max D·dt/dx²
    pub max_diffusion_number: f64,

    /// max v·dt/dx
    pub max_courant_number: f64,

    /// max λ·dt
    pub max_decay_product: f64,

    /// max dt·(2D/dx² + v/dx + λ)
    pub max_combined: f64,

    /// Grid point where the combined number peaks
    pub critical_point: usize,

    /// Largest dt satisfying the bound everywhere (`None` when every
    /// coefficient is zero)
    pub max_stable_dt: Option<f64>,
}

impl StabilityReport {
    /// Evaluate the stability numbers of `coefficients` for steps `dx`, `dt`
    pub fn assess(coefficients: &CoefficientField, dx: f64, dt: f64) -> Self {
        let inv_dx = 1.0 / dx;
        let inv_dx2 = inv_dx * inv_dx;

        let mut report = Self {
            dt,
            dx,
            max_diffusion_number: 0.0,
            max_courant_number: 0.0,
            max_decay_product: 0.0,
            max_combined: 0.0,
            critical_point: 0,
            max_stable_dt: None,
        };

        let mut max_rate: f64 = 0.0;

        for i in 0..coefficients.len() {
            let d = coefficients.dispersion[i];
            let v = coefficients.velocity[i];
            let lambda = coefficients.decay[i];

            report.max_diffusion_number = report.max_diffusion_number.max(d * dt * inv_dx2);
            report.max_courant_number = report.max_courant_number.max(v.abs() * dt * inv_dx);
            report.max_decay_product = report.max_decay_product.max(lambda * dt);

            let rate = 2.0 * d * inv_dx2 + v.abs() * inv_dx + lambda;
            if rate > max_rate {
                max_rate = rate;
                report.critical_point = i;
            }
        }

        report.max_combined = max_rate * dt;
        if max_rate > 0.0 {
            report.max_stable_dt = Some(1.0 / max_rate);
        }

        report
    }

    /// `true` when the monotonicity bound holds at every point
    pub fn is_stable(&self) -> bool {
        self.max_combined <= 1.0
    }
}

// =================================================================================================
// Tests
// =================================================================================================
