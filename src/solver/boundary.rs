//! Column boundary conditions
//!
//! A layered column has two spatial ends:
//!
//! - **Inlet** (`i = 0`, top of the column): a fixed concentration imposed at
//!   every time level, the initial level included.
//! - **Outlet** (`i = Nx-1`, bottom of the column): zero concentration
//!   gradient, realised by copying the last interior value after each
//!   interior update.
//!
//! The solver owns the order of operations; this module only knows how to
//! write one boundary value into a profile.

use std::fmt;

use crate::error::{TransportError, TransportResult};

// =================================================================================================
// Inlet
// =================================================================================================

/// Condition at the top of the column
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Inlet {
    /// Dirichlet: `C[0, t] = value` for every `t`
    Fixed(f64),
}

impl Inlet {
    /// Clean water at the inlet
    pub fn clean() -> Self {
        Inlet::Fixed(0.0)
    }
}

impl Default for Inlet {
    fn default() -> Self {
        Self::clean()
    }
}

// =================================================================================================
// Outlet
// =================================================================================================

/// Condition at the bottom of the column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Outlet {
    /// Neumann: `∂C/∂x = 0`, i.e. `C[Nx-1] = C[Nx-2]`
    #[default]
    ZeroGradient,
}

// =================================================================================================
// Boundary Conditions
// =================================================================================================

/// Both ends of a one-dimensional column
///
/// # Examples
///
/// ```rust
/// use strata_rs::solver::{BoundaryConditions, Inlet, Outlet};
///
/// let bc = BoundaryConditions::default();
/// assert_eq!(bc.inlet, Inlet::Fixed(0.0));
/// assert_eq!(bc.outlet, Outlet::ZeroGradient);
///
/// let mut profile = vec![100.0, 90.0, 80.0, 70.0];
/// bc.apply_inlet(&mut profile);
/// bc.apply_outlet(&mut profile);
/// assert_eq!(profile, vec![0.0, 90.0, 80.0, 80.0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundaryConditions {
    pub inlet: Inlet,
    pub outlet: Outlet,
}

impl BoundaryConditions {
    pub fn new(inlet: Inlet, outlet: Outlet) -> Self {
        Self { inlet, outlet }
    }

    /// Fixed inlet concentration, zero-gradient outlet
    pub fn fixed_inlet(value: f64) -> Self {
        Self::new(Inlet::Fixed(value), Outlet::ZeroGradient)
    }

    /// Check boundary values are usable
    pub fn validate(&self) -> TransportResult<()> {
        let Inlet::Fixed(value) = self.inlet;
        if !value.is_finite() {
            return Err(TransportError::Config(format!(
                "inlet concentration must be finite, got {}",
                value
            )));
        }
        Ok(())
    }

    /// Write the inlet value into `profile[0]`
    #[inline]
    pub fn apply_inlet(&self, profile: &mut [f64]) {
        let Inlet::Fixed(value) = self.inlet;
        if let Some(first) = profile.first_mut() {
            *first = value;
        }
    }

    /// Write the outlet value into `profile[n-1]` from the interior
    #[inline]
    pub fn apply_outlet(&self, profile: &mut [f64]) {
        match self.outlet {
            Outlet::ZeroGradient => {
                let n = profile.len();
                if n >= 2 {
                    profile[n - 1] = profile[n - 2];
                }
            }
        }
    }
}

impl fmt::Display for BoundaryConditions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Inlet::Fixed(value) = self.inlet;
        match self.outlet {
            Outlet::ZeroGradient => write!(f, "inlet C = {}, outlet dC/dx = 0", value),
        }
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_clean_inlet() {
        let bc = BoundaryConditions::default();
        assert_eq!(bc, BoundaryConditions::fixed_inlet(0.0));
        assert!(bc.validate().is_ok());
    }

    #[test]
    fn test_apply_inlet() {
        let bc = BoundaryConditions::fixed_inlet(5.0);
        let mut profile = vec![1.0, 2.0, 3.0];
        bc.apply_inlet(&mut profile);

        assert_eq!(profile, vec![5.0, 2.0, 3.0]);
    }

    #[test]
    fn test_apply_outlet_copies_last_interior() {
        let bc = BoundaryConditions::default();
        let mut profile = vec![0.0, 2.0, 3.0, 9.0];
        bc.apply_outlet(&mut profile);

        assert_eq!(profile[3], 3.0);
    }

    #[test]
    fn test_short_profiles_are_left_alone() {
        let bc = BoundaryConditions::default();
        let mut empty: Vec<f64> = vec![];
        bc.apply_inlet(&mut empty);
        bc.apply_outlet(&mut empty);
        assert!(empty.is_empty());

        let mut single = vec![4.0];
        bc.apply_outlet(&mut single);
        assert_eq!(single, vec![4.0]);
    }

    #[test]
    fn test_non_finite_inlet_is_rejected() {
        assert!(BoundaryConditions::fixed_inlet(f64::NAN).validate().is_err());
        assert!(BoundaryConditions::fixed_inlet(f64::INFINITY).validate().is_err());
    }

    #[test]
    fn test_display() {
        let text = BoundaryConditions::fixed_inlet(0.0).to_string();
        assert!(text.contains("inlet C = 0"));
        assert!(text.contains("dC/dx = 0"));
    }
}
