//! Physical model trait
//!
//! A physical model owns the spatial operator of a transport equation. Given
//! the concentration profile at one time level it returns `∂C/∂t` at every
//! grid point. It never advances time itself: time marching, boundary
//! enforcement and guarding belong to the solver.

use nalgebra::DVector;

// =================================================================================================
// Physical Model Trait
// =================================================================================================

/// Trait for physical models
///
/// # Responsibility
///
/// Computes the right-hand side `f(C)` of `dC/dt = f(C)` on a fixed grid.
/// Does NOT integrate it (that's the Solver's job).
///
/// # Boundary Points
///
/// Entries of the returned rate at boundary points are ignored by the
/// solver, which overwrites boundary values after each step. Models should
/// return `0.0` there.
pub trait PhysicalModel: Send + Sync {
    /// Number of spatial points
    ///
    /// Used by the solver to size the concentration field
    fn points(&self) -> usize;

    /// Spatial step used in the difference quotients
    fn dx(&self) -> f64;

    /// Computes `∂C/∂t` at the given concentration profile
    ///
    /// # Arguments
    ///
    /// * `concentration` - Profile `C[·, t]`, length [`points()`](Self::points)
    ///
    /// # Returns
    ///
    /// Rate of change at every grid point (zero at the boundaries)
    fn compute_physics(&self, concentration: &DVector<f64>) -> DVector<f64>;

    /// Concentration profile at `t = 0`, before boundary conditions
    fn setup_initial_state(&self) -> DVector<f64>;

    /// Name of the model (used to display and logging)
    fn name(&self) -> &str;

    /// Description of the model (option)
    fn description(&self) -> Option<&str> {
        None
    }

    /// Largest time step the explicit scheme tolerates, when known
    ///
    /// Solvers use it for diagnostics only.
    fn max_stable_time_step(&self) -> Option<f64> {
        None
    }
}

// =================================================================================================
// Tests
// =================================================================================================
