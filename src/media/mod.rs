//! Layered medium description
//!
//! This module turns a description of the medium (layers and materials)
//! into the per-point coefficient arrays the transport model consumes.
//!
//! # Organization
//!
//! - **`material`**: material classes and the `(D, v, λ)` lookup table
//! - **`layers`**: layer stack geometry (thicknesses, boundaries, midpoints)
//! - **`mapper`**: assignment of a material triple to every grid point
//!
//! # Example
//!
//! ```rust
//! use strata_rs::grid::SpatialGrid;
//! use strata_rs::media::{map_properties, LayerStack, MaterialTable};
//!
//! let grid = SpatialGrid::new(1.0, 100).unwrap();
//! let stack = LayerStack::reference();
//! let field = map_properties(&grid, &stack, &MaterialTable::reference()).unwrap();
//!
//! assert_eq!(field.len(), grid.points());
//! ```

pub mod layers;
pub mod mapper;
pub mod material;

pub use layers::{Layer, LayerBounds, LayerStack, REFERENCE_GRAVEL_LAYERS, reference_layers};
pub use mapper::{CoefficientField, map_properties};
pub use material::{MaterialKind, MaterialTable, TransportProperties};
