//! End-to-end run: Grid → Mapper → Solver → Sampling
//!
//! # Example
//!
//! ```rust
//! use strata_rs::config::SimulationConfig;
//! use strata_rs::pipeline::run_simulation;
//!
//! let config = SimulationConfig { total_time: 5.0, ..SimulationConfig::reference() };
//! let outcome = run_simulation(&config).unwrap();
//!
//! assert_eq!(outcome.result.n_levels(), 50);
//! assert_eq!(outcome.samples.len(), 3);
//! ```

use crate::config::SimulationConfig;
use crate::error::TransportResult;
use crate::grid::Discretization;
use crate::media::{CoefficientField, map_properties};
use crate::models::AdvectionDispersionDecay;
use crate::sampling::{SampleSeries, extract, resolve};
use crate::solver::{EulerSolver, Scenario, SimulationResult, Solver};

/// Everything a run produces
#[derive(Debug, Clone)]
pub struct SimulationOutcome {
    /// Grid and time axis used
    pub discretization: Discretization,

    /// Per-point coefficients fed to the model
    pub coefficients: CoefficientField,

    /// Full concentration field
    pub result: SimulationResult,

    /// Series at each configured sample
    pub samples: Vec<SampleSeries>,
}

/// Run the configured simulation
///
/// # Errors
///
/// Any configuration error; see [`SimulationConfig::validate`]. The march
/// itself never fails on numerical grounds.
pub fn run_simulation(config: &SimulationConfig) -> TransportResult<SimulationOutcome> {
    config.validate()?;

    // Grid
    let discretization = Discretization::build(
        config.domain_length,
        config.grid_points,
        config.total_time,
        config.time_step,
    )?;
    let grid = &discretization.space;

    // Mapper
    let stack = config.layer_stack()?;
    let coefficients = map_properties(grid, &stack, &config.materials)?;
    log::debug!(
        "Mapped {} grid points onto {} layers",
        coefficients.len(),
        stack.len()
    );

    // Solver
    let model =
        AdvectionDispersionDecay::new(coefficients.clone(), grid.dx(), config.initial_concentration)?;
    let scenario = Scenario::new(Box::new(model), config.boundaries());
    let solver_config = config.solver_configuration(discretization.time.clone());
    let result = EulerSolver::new().solve(&scenario, &solver_config)?;

    // Sampling
    let targets = config.sample_targets(&stack)?;
    let resolved = resolve(grid, &targets)?;
    for sample in &resolved {
        log::debug!(
            "Sample {} at depth {} → grid point {} (x = {})",
            sample.label,
            sample.depth,
            sample.index,
            sample.coordinate
        );
    }
    let samples = extract(&result, &resolved)?;

    log::info!(
        "Simulation finished: Nx = {}, Nt = {}, {} sample(s), {} masked cell(s)",
        grid.points(),
        discretization.time.levels(),
        samples.len(),
        result.masked_cells
    );

    Ok(SimulationOutcome {
        discretization,
        coefficients,
        result,
        samples,
    })
}

// =================================================================================================
// Tests
// =================================================================================================
