//! Numerical solver traits and types
//!
//! # Design Philosophy
//!
//! - `SolverConfiguration` carries HOW to march (time axis, diagnostics)
//! - `SimulationResult` carries the full concentration field plus metadata
//! - The `Solver` trait ties a scenario and a configuration to a result
//!
//! # Field Layout
//!
//! The concentration field is an `Nx × Nt` matrix: one row per grid point,
//! one column per time level. nalgebra stores matrices column-major, so each
//! time level is a contiguous slice that the solver fills in one pass.

use std::collections::HashMap;

use nalgebra::{DMatrix, DVector};

use crate::error::TransportResult;
use crate::grid::TimeAxis;
use crate::solver::Scenario;

// =================================================================================================
// Solver Trait
// =================================================================================================

/// Interface shared by all numerical solvers
pub trait Solver {
    /// Solve `scenario` with the numerical parameters of `config`
    ///
    /// # Errors
    ///
    /// Structural problems only (inconsistent dimensions, invalid
    /// boundaries). Numerical excursions during the march are handled by the
    /// solver itself.
    fn solve(
        &self,
        scenario: &Scenario,
        config: &SolverConfiguration,
    ) -> TransportResult<SimulationResult>;

    /// Solver name (used in metadata and logging)
    fn name(&self) -> &str;
}

// =================================================================================================
// Solver configuration
// =================================================================================================

/// Configuration for a time-marching solver
///
/// # Examples
///
/// ```rust
/// use strata_rs::solver::SolverConfiguration;
///
/// let config = SolverConfiguration::time_evolution(100.0, 0.1)
///     .unwrap()
///     .with_stability_check(false);
///
/// assert_eq!(config.time_axis.levels(), 1000);
/// assert!(!config.stability_check);
/// ```
#[derive(Clone, Debug)]
pub struct SolverConfiguration {
    /// Time levels to compute
    pub time_axis: TimeAxis,

    /// Run the pre-march stability diagnostic
    pub stability_check: bool,
}

impl SolverConfiguration {
    /// Create a configuration from an existing time axis
    pub fn new(time_axis: TimeAxis) -> Self {
        Self {
            time_axis,
            stability_check: true,
        }
    }

    /// Create a time evolution configuration from `T` and `dt`
    pub fn time_evolution(total_time: f64, dt: f64) -> TransportResult<Self> {
        Ok(Self::new(TimeAxis::new(total_time, dt)?))
    }

    /// Enable or disable the stability diagnostic
    pub fn with_stability_check(mut self, enabled: bool) -> Self {
        self.stability_check = enabled;
        self
    }

    /// Time step
    pub fn dt(&self) -> f64 {
        self.time_axis.dt()
    }
}

// =================================================================================================
// Simulation result
// =================================================================================================

/// Output of a solver run
#[derive(Clone, Debug)]
pub struct SimulationResult {
    /// Time coordinates `t[k] = k·dt`, one per column of `field`
    pub time_points: Vec<f64>,

    /// Concentration field `C[i, k]` (rows = space, columns = time level)
    pub field: DMatrix<f64>,

    /// Number of cell updates replaced by zero because they were not finite
    pub masked_cells: usize,

    /// Free-form diagnostics (solver name, steps, stability numbers, ...)
    pub metadata: HashMap<String, String>,
}

impl SimulationResult {
    /// Create a result with empty metadata
    pub fn new(time_points: Vec<f64>, field: DMatrix<f64>, masked_cells: usize) -> Self {
        Self {
            time_points,
            field,
            masked_cells,
            metadata: HashMap::new(),
        }
    }

    /// Record a diagnostic entry
    pub fn add_metadata(&mut self, key: &str, value: &str) {
        self.metadata.insert(key.to_string(), value.to_string());
    }

    /// Look up a diagnostic entry
    pub fn get_metadata(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }

    /// Number of grid points (rows)
    pub fn n_points(&self) -> usize {
        self.field.nrows()
    }

    /// Number of time levels (columns)
    pub fn n_levels(&self) -> usize {
        self.field.ncols()
    }

    /// Number of stored time levels
    pub fn len(&self) -> usize {
        self.time_points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time_points.is_empty()
    }

    /// Time series `C[index, 0..Nt]` at one grid point
    pub fn series(&self, index: usize) -> Option<Vec<f64>> {
        if index >= self.n_points() {
            return None;
        }
        Some(self.field.row(index).iter().copied().collect())
    }

    /// Profile `C[0..Nx, level]` at one time level
    pub fn profile(&self, level: usize) -> Option<DVector<f64>> {
        if level >= self.n_levels() {
            return None;
        }
        Some(self.field.column(level).clone_owned())
    }

    /// Profile at the last time level
    pub fn final_profile(&self) -> Option<DVector<f64>> {
        self.n_levels().checked_sub(1).and_then(|k| self.profile(k))
    }

    /// `true` when every stored value is finite
    pub fn is_finite(&self) -> bool {
        self.field.iter().all(|c| c.is_finite())
    }
}

// =================================================================================================
// Tests
// =================================================================================================
