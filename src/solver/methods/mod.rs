//! Numerical methods for marching transport equations
//!
//! This module contains concrete implementations of the [`Solver`](crate::solver::Solver) trait.
//!
//! # Architecture
//!
//! The separation between abstract solver interface (`solver::traits`) and concrete
//! implementations (`solver::methods`) keeps new schemes additive: a method only
//! needs a model's right-hand side and the column boundaries.
//!
//! # Available Methods
//!
//! - **[`EulerSolver`]**: Forward Euler
//!   - Order: first order in time
//!   - Cost: 1 model evaluation per level
//!   - Non-finite updates are stored as zero and counted
//!
//! # Performance Considerations
//!
//! The interior sweep of the transport model benefits from:
//! - **Rayon parallelization** (feature `parallel`) for large grids
//! - **Configurable threshold** via `set_parallel_threshold()`

pub mod explicit;

pub use explicit::EulerSolver;
