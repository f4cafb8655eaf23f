//! Physical models
//!
//! This module provides the trait for physical models. A physical model
//! encapsulates the spatial operator of a transport equation on a fixed
//! grid.
//!
//! # Architecture
//!
//! Physical models are **separate from numerical solvers**:
//! - The model provides the **equations** (physics)
//! - The solver provides the **method** to march them (numerics)
//!
//! # Implementing a New Physical Model
//!
//! ```rust
//! use nalgebra::DVector;
//! use strata_rs::physics::PhysicalModel;
//!
//! struct PureDecay {
//!     rate: f64,
//!     points: usize,
//! }
//!
//! impl PhysicalModel for PureDecay {
//!     fn points(&self) -> usize { self.points }
//!     fn dx(&self) -> f64 { 1.0 }
//!     fn compute_physics(&self, c: &DVector<f64>) -> DVector<f64> {
//!         c.map(|ci| -self.rate * ci)
//!     }
//!     fn setup_initial_state(&self) -> DVector<f64> {
//!         DVector::from_element(self.points, 1.0)
//!     }
//!     fn name(&self) -> &str { "Pure decay" }
//! }
//!
//! let model = PureDecay { rate: 0.1, points: 5 };
//! let rate = model.compute_physics(&model.setup_initial_state());
//! assert!((rate[0] + 0.1).abs() < 1e-12);
//! ```
//!
//! # Available Models
//!
//! - **Advection-dispersion-decay 1D** ([`crate::models::AdvectionDispersionDecay`])

pub mod traits;

pub use traits::PhysicalModel;
