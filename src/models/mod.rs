//! Transport models
//!
//! All models implement the [`PhysicalModel`](crate::physics::PhysicalModel) trait.
//! The solver calls `compute_physics` at each time step: models are responsible
//! for the spatial operator, the solver for time marching and boundaries.
//!
//! # Available Models
//!
//! ## [`AdvectionDispersionDecay`]
//!
//! A single solute transported through a layered column by pore-water flow,
//! spread by dispersion and removed by first-order decay. Coefficients vary
//! point by point according to the layer each grid point falls in.

// =================================================================================================
// Module Declarations
// =================================================================================================

pub mod advection_dispersion;

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use advection_dispersion::AdvectionDispersionDecay;
