//! Forward Euler (explicit) time marching
//!
//! # Mathematical Background
//!
//! Given the semi-discrete system `dC/dt = f(C)` supplied by the model, the
//! profile is advanced level by level:
//!
//! ```text
//! C[i, t+1] = C[i, t] + dt · f(C[·, t])[i]        1 ≤ i ≤ Nx-2
//! C[0, t+1] = inlet value
//! C[Nx-1, t+1] = C[Nx-2, t+1]                     (zero gradient)
//! ```
//!
//! # Order of Operations per Level
//!
//! 1. Evaluate the model rate on the previous level
//! 2. Update every interior point
//! 3. Replace each non-finite interior value by exactly `0.0`
//! 4. Impose the inlet value, then copy the outlet from its neighbour
//!
//! Level 0 holds the model's initial state with the inlet value imposed.
//!
//! # Non-finite Values
//!
//! An update that overflows or produces NaN is not an error. It is stored
//! as zero and the march continues; the number of such cells is returned in
//! [`SimulationResult::masked_cells`]. With a time step far above the
//! stability limit the field therefore stays finite but is physically
//! meaningless, which is why the solver warns up front when the model knows
//! its limit.

use nalgebra::{DMatrix, DVector};

use crate::error::{TransportError, TransportResult};
use crate::grid::check_field_size;
use crate::solver::{Scenario, SimulationResult, Solver, SolverConfiguration, mask_non_finite};

// =================================================================================================
// Forward Euler Solver
// =================================================================================================

/// Forward Euler time-stepping solver
///
/// # Example
///
/// ```rust
/// use strata_rs::models::AdvectionDispersionDecay;
/// use strata_rs::media::TransportProperties;
/// use strata_rs::solver::{BoundaryConditions, EulerSolver, Scenario, Solver, SolverConfiguration};
///
/// let model = AdvectionDispersionDecay::homogeneous(
///     20, 0.05, TransportProperties::new(1e-3, 1e-2, 1e-2), 100.0,
/// ).unwrap();
/// let scenario = Scenario::new(Box::new(model), BoundaryConditions::default());
/// let config = SolverConfiguration::time_evolution(10.0, 0.1).unwrap();
///
/// let result = EulerSolver::new().solve(&scenario, &config).unwrap();
/// assert_eq!(result.n_levels(), 100);
/// assert_eq!(result.masked_cells, 0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct EulerSolver;

impl EulerSolver {
    /// Create a new Forward Euler solver
    pub fn new() -> Self {
        Self
    }
}

impl Solver for EulerSolver {
    fn solve(
        &self,
        scenario: &Scenario,
        config: &SolverConfiguration,
    ) -> TransportResult<SimulationResult> {
        // ====== Step 1: Validation ======

        scenario.validate()?;

        let model = scenario.model.as_ref();
        let boundaries = &scenario.boundaries;
        let n = model.points();
        let levels = config.time_axis.levels();
        let steps = config.time_axis.steps();
        let dt = config.dt();

        check_field_size(n, levels)?;

        let initial = model.setup_initial_state();
        if initial.len() != n {
            return Err(TransportError::DimensionMismatch {
                what: "initial state",
                expected: n,
                actual: initial.len(),
            });
        }

        // ====== Step 2: Stability diagnostic ======

        let stable_limit = if config.stability_check {
            model.max_stable_time_step()
        } else {
            None
        };

        if let Some(limit) = stable_limit
            && dt > limit
        {
            log::warn!(
                "{}: dt = {} exceeds the explicit stability limit {:.6e} by a factor {:.3}; \
                 non-finite values will be masked",
                model.name(),
                dt,
                limit,
                dt / limit
            );
        }

        // ====== Step 3: Initial level ======

        let mut field = DMatrix::zeros(n, levels);
        let mut state: DVector<f64> = initial;
        boundaries.apply_inlet(state.as_mut_slice());
        field.set_column(0, &state);

        log::debug!(
            "{}: marching {} points over {} levels (dt = {})",
            self.name(),
            n,
            levels,
            dt
        );

        // ====== Step 4: Time marching ======

        let mut masked_cells = 0;

        for level in 1..levels {
            let rate = model.compute_physics(&state);
            if rate.len() != n {
                return Err(TransportError::DimensionMismatch {
                    what: "model rate",
                    expected: n,
                    actual: rate.len(),
                });
            }

            let mut next = state.clone();
            {
                let next = next.as_mut_slice();
                for i in 1..n - 1 {
                    next[i] = state[i] + dt * rate[i];
                }
                masked_cells += mask_non_finite(&mut next[1..n - 1]);

                boundaries.apply_inlet(next);
                boundaries.apply_outlet(next);
            }

            field.set_column(level, &next);
            state = next;
        }

        if masked_cells > 0 {
            log::warn!(
                "{}: {} non-finite cell update(s) replaced by zero",
                model.name(),
                masked_cells
            );
        }

        // ====== Step 5: Build Result ======

        let mut result =
            SimulationResult::new(config.time_axis.times().to_vec(), field, masked_cells);

        result.add_metadata("solver", self.name());
        result.add_metadata("model", model.name());
        result.add_metadata("boundaries", &boundaries.to_string());
        result.add_metadata("grid points", &n.to_string());
        result.add_metadata("dx", &model.dx().to_string());
        result.add_metadata("time levels", &levels.to_string());
        result.add_metadata("time steps", &steps.to_string());
        result.add_metadata("dt", &dt.to_string());
        result.add_metadata("total time", &config.time_axis.total_time().to_string());
        result.add_metadata("masked cells", &masked_cells.to_string());
        if let Some(limit) = stable_limit {
            result.add_metadata("max stable dt", &limit.to_string());
            result.add_metadata("stable", &(dt <= limit).to_string());
        }

        log::info!(
            "{} completed: {} levels, {} masked cell(s)",
            self.name(),
            levels,
            masked_cells
        );

        Ok(result)
    }

    fn name(&self) -> &str {
        "Forward Euler"
    }
}

// =================================================================================================
// Tests
// =================================================================================================
