//! strata-rs: 1D solute transport through layered porous media
//!
//! Simulates advection, dispersion and first-order decay of a dissolved
//! contaminant along a vertical column made of stacked material layers,
//! using an explicit finite-difference scheme.
//!
//! # Architecture
//!
//! The pipeline runs in four stages:
//!
//! ```text
//! Grid ──▶ Mapper ──▶ Solver ──▶ Sampling
//! ```
//!
//! 1. **Separation of Physics and Numerics**
//!    - Physical models define the spatial operator (what to solve)
//!    - Numerical solvers march it in time (how to solve)
//!
//! 2. **Layered media as data**
//!    - Materials and layers are plain values, loadable from JSON
//!    - Each grid point gets its coefficients from the layer it falls in
//!
//! # Quick Start
//!
//! ```rust
//! use strata_rs::prelude::*;
//!
//! # fn main() -> Result<(), TransportError> {
//! // Reference column, shortened to 10 days
//! let config = SimulationConfig {
//!     total_time: 10.0,
//!     ..SimulationConfig::reference()
//! };
//!
//! let outcome = run_simulation(&config)?;
//!
//! assert_eq!(outcome.result.n_points(), 200);
//! for series in &outcome.samples {
//!     println!("{}: final C = {:?}", series.label, series.final_value());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`grid`]: Spatial grid and time axis
//! - [`media`]: Materials, layer stack and coefficient mapping
//! - [`physics`]: Physical model trait
//! - [`models`]: Advection-dispersion-decay operator
//! - [`solver`]: Explicit time marching, boundaries, stability
//! - [`sampling`]: Sample depth resolution and series extraction
//! - [`config`]: JSON run configuration
//! - [`pipeline`]: End-to-end run
//! - [`output`]: CSV export and plots

pub mod config;
pub mod error;
pub mod grid;
pub mod media;
pub mod models;
pub mod output;
pub mod physics;
pub mod pipeline;
pub mod sampling;
pub mod solver;

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //! use strata_rs::prelude::*;
    //! ```
    pub use crate::config::{SampleSpec, SimulationConfig};
    pub use crate::error::{TransportError, TransportResult};
    pub use crate::grid::{Discretization, SpatialGrid, TimeAxis};
    pub use crate::media::{
        CoefficientField, Layer, LayerStack, MaterialKind, MaterialTable, TransportProperties,
        map_properties,
    };
    pub use crate::models::AdvectionDispersionDecay;
    pub use crate::physics::PhysicalModel;
    pub use crate::pipeline::{SimulationOutcome, run_simulation};
    pub use crate::sampling::{SampleSeries, SampleTarget};
    pub use crate::solver::{
        BoundaryConditions, EulerSolver, Scenario, SimulationResult, Solver, SolverConfiguration,
    };
}
