//! Simulation scenario definition
//!
//! A scenario combines a physical model with boundary conditions.

use crate::error::{TransportError, TransportResult};
use crate::grid::MIN_GRID_POINTS;
use crate::physics::PhysicalModel;
use crate::solver::BoundaryConditions;

/// Simulation scenario
///
/// Defines a specific case to simulate:
/// - Physical model (equations)
/// - Boundary conditions (column ends)
///
/// The same scenario can be solved with different time axes.
/// This is the "WHAT to solve" (not "HOW to solve").
pub struct Scenario {
    /// Physical model (equations)
    pub model: Box<dyn PhysicalModel>,

    /// Column boundary conditions
    pub boundaries: BoundaryConditions,
}

impl Scenario {
    /// Create a scenario
    pub fn new(model: Box<dyn PhysicalModel>, boundaries: BoundaryConditions) -> Self {
        Self { model, boundaries }
    }

    /// Check the model and boundaries before a run
    pub fn validate(&self) -> TransportResult<()> {
        self.boundaries.validate()?;

        let points = self.model.points();
        if points < MIN_GRID_POINTS {
            return Err(TransportError::InvalidGrid(format!(
                "scenario needs at least {} points, got {}",
                MIN_GRID_POINTS, points
            )));
        }

        let dx = self.model.dx();
        if !dx.is_finite() || dx <= 0.0 {
            return Err(TransportError::InvalidGrid(format!(
                "spatial step must be positive and finite, got {}",
                dx
            )));
        }

        Ok(())
    }

    /// Get model name
    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    /// Number of grid points
    pub fn points(&self) -> usize {
        self.model.points()
    }
}

impl std::fmt::Debug for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scenario")
            .field("model", &self.model_name())
            .field("points", &self.points())
            .field("dx", &self.model.dx())
            .field("boundaries", &self.boundaries)
            .finish()
    }
}

// ================================================================================================
// Tests
// ================================================================================================
