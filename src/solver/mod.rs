//! Numerical solvers
//!
//! This module provides traits and implementations for numerical solvers.
//! A numerical solver applies a time-marching method to the equations
//! provided by a physical model within a specific scenario.
//!
//! # Core Concepts
//!
//! The solver architecture separates concerns into three layers:
//!
//! 1. **Scenario** (`Scenario`) - WHAT to solve
//!    - Physical model (equations)
//!    - Column boundary conditions
//!
//! 2. **Configuration** (`SolverConfiguration`) - HOW to solve
//!    - Time axis (`T`, `dt`, number of levels)
//!    - Diagnostics switches
//!
//! 3. **Solver** (`Solver` trait) - The numerical method
//!    - Applies the numerical scheme
//!    - Returns the full concentration field
//!    - Independent of physics
//!
//! # Module Organization
//!
//! - **`traits`**: `Solver`, `SolverConfiguration`, `SimulationResult`
//! - **`boundary`**: inlet / outlet conditions
//! - **`scenario`**: model + boundaries
//! - **`stability`**: explicit-scheme stability numbers
//! - **`methods`**: `EulerSolver`
//!
//! # Workflow Diagram
//!
//! ```text
//! ┌─────────────────┐
//! │  Physical Model │  (equations)
//! └────────┬────────┘
//!          │
//!          ├──────────────┐
//!          │              │
//! ┌────────▼────────┐ ┌──▼──────────────┐
//! │ Boundary        │ │ Scenario        │ ← WHAT to solve
//! │ Conditions      │ │ (model + bounds)│
//! └─────────────────┘ └────────┬────────┘
//!                              │
//!                     ┌────────▼─────────────┐
//!                     │ Solver Configuration │ ← HOW to solve
//!                     │ (time axis)          │
//!                     └────────┬─────────────┘
//!                              │
//!                     ┌────────▼────────┐
//!                     │ Numerical Solver│ ← The method
//!                     │ (Forward Euler) │
//!                     └────────┬────────┘
//!                              │
//!                     ┌────────▼────────────┐
//!                     │ Simulation Result   │ ← The solution
//!                     │ (C[i,t] + metadata) │
//!                     └─────────────────────┘
//! ```
//!
//! # Quick Start Example
//!
//! ```rust
//! use strata_rs::media::TransportProperties;
//! use strata_rs::models::AdvectionDispersionDecay;
//! use strata_rs::solver::{BoundaryConditions, EulerSolver, Scenario, Solver, SolverConfiguration};
//!
//! let model = AdvectionDispersionDecay::homogeneous(
//!     50, 0.02, TransportProperties::new(1e-4, 1e-3, 5e-3), 100.0,
//! ).unwrap();
//! let scenario = Scenario::new(Box::new(model), BoundaryConditions::default());
//! let config = SolverConfiguration::time_evolution(50.0, 0.1).unwrap();
//!
//! let result = EulerSolver::new().solve(&scenario, &config).unwrap();
//! assert!(result.series(0).unwrap().iter().all(|&c| c == 0.0));
//! ```
//!
//! # Error Handling
//!
//! Solvers return [`TransportResult`](crate::error::TransportResult). Errors
//! are structural (dimensions, boundaries) and raised before or independently
//! of the numbers being marched. A non-finite update is masked, not reported
//! as an error.

// =================================================================================================
// Module Declarations
// =================================================================================================

mod boundary;
mod methods;
mod scenario;
mod stability;
mod traits;

// =================================================================================================
// Parallel Execution Threshold
// =================================================================================================
//
// Deciding *when* to hand the interior sweep to Rayon is a numerical-execution
// concern, so the knob lives here rather than in the model.
//
// The threshold is stored in an AtomicUsize so that it can be changed at
// runtime (benchmarks, tests) without a mutex on every sweep. Relaxed
// ordering is sufficient: the value is a performance hint, not a
// synchronisation point.
// =================================================================================================

use std::sync::atomic::{AtomicUsize, Ordering};

/// Default number of grid points above which the interior sweep switches to
/// parallel iteration.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 4096;

/// Runtime-configurable parallel-execution threshold.
///
/// Read via [`parallel_threshold()`], written via [`set_parallel_threshold()`].
static PARALLEL_THRESHOLD: AtomicUsize = AtomicUsize::new(DEFAULT_PARALLEL_THRESHOLD);

/// Return the current parallel-execution threshold.
///
/// The transport model sweeps its interior sequentially when the grid has at
/// most this many points, and with Rayon above it, but only when the crate
/// is compiled with the `parallel` feature.
///
/// # Example
///
/// ```rust
/// use strata_rs::solver::parallel_threshold;
///
/// assert!(parallel_threshold() > 0);
/// ```
pub fn parallel_threshold() -> usize {
    PARALLEL_THRESHOLD.load(Ordering::Relaxed)
}

/// Set the parallel-execution threshold to a new value.
///
/// # Panics
///
/// Panics when `threshold == 0`.
///
/// # Example
///
/// ```rust
/// use strata_rs::solver::{parallel_threshold, set_parallel_threshold};
///
/// let previous = parallel_threshold();
/// set_parallel_threshold(2048);
/// assert_eq!(parallel_threshold(), 2048);
///
/// // Restore so other tests are not affected.
/// set_parallel_threshold(previous);
/// ```
pub fn set_parallel_threshold(threshold: usize) {
    assert!(threshold > 0, "parallel threshold must be at least 1");
    PARALLEL_THRESHOLD.store(threshold, Ordering::Relaxed);
}

/// RAII guard that saves the current threshold on construction and restores
/// it on drop.
///
/// Guards are serialized through a lock, so tests holding one never observe
/// each other's values. Only compiled in test builds.
///
/// ```rust,ignore
/// let _guard = crate::solver::ThresholdGuard::save(50);
/// // threshold is now 50 …
/// // … and is automatically restored when _guard is dropped.
/// ```
#[cfg(test)]
pub(crate) struct ThresholdGuard {
    previous: usize,
    _lock: std::sync::MutexGuard<'static, ()>,
}

#[cfg(test)]
static THRESHOLD_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(test)]
impl ThresholdGuard {
    /// Set the threshold to `new_value` and return a guard that will
    /// restore the previous value on drop.
    pub(crate) fn save(new_value: usize) -> Self {
        let lock = THRESHOLD_LOCK
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let previous = parallel_threshold();
        set_parallel_threshold(new_value);
        Self {
            previous,
            _lock: lock,
        }
    }

    /// Threshold in force before this guard was taken
    pub(crate) fn previous(&self) -> usize {
        self.previous
    }
}

#[cfg(test)]
impl Drop for ThresholdGuard {
    fn drop(&mut self) {
        // Bypass the public setter so restoring never panics.
        PARALLEL_THRESHOLD.store(self.previous, Ordering::Relaxed);
    }
}

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use traits::{SimulationResult, Solver, SolverConfiguration};

pub use boundary::{BoundaryConditions, Inlet, Outlet};
pub use scenario::Scenario;
pub use stability::StabilityReport;

pub use methods::EulerSolver;

// =================================================================================================
// Helper Functions
// =================================================================================================

/// Replace every non-finite value by exactly `0.0`
///
/// Returns the number of values replaced.
///
/// # Example
///
/// ```rust
/// use strata_rs::solver::mask_non_finite;
///
/// let mut values = [1.0, f64::NAN, f64::NEG_INFINITY, 2.0];
/// assert_eq!(mask_non_finite(&mut values), 2);
/// assert_eq!(values, [1.0, 0.0, 0.0, 2.0]);
/// ```
pub fn mask_non_finite(values: &mut [f64]) -> usize {
    let mut masked = 0;
    for value in values.iter_mut() {
        if !value.is_finite() {
            *value = 0.0;
            masked += 1;
        }
    }
    masked
}

// =================================================================================================
// Tests
// =================================================================================================
