//! Visualization of transport results with `plotters`
//!
//! # Organization
//!
//! - **config**: Shared plot configuration (`PlotConfig`)
//! - **series**: Temporal plots (concentration at sample depths vs time)
//! - **profile**: Spatial plots (concentration vs depth at chosen times)
//!
//! PNG or SVG output is picked from the file extension.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use strata_rs::output::visualization::{plot_samples, plot_profile_evolution, PlotConfig};
//!
//! let outcome = run_simulation(&config)?;
//!
//! plot_samples(&outcome.samples, "gravel.png", None)?;
//!
//! let mut profile_config = PlotConfig::depth_profile("Column snapshots");
//! profile_config.width = 1600;
//! plot_profile_evolution(
//!     &outcome.result,
//!     outcome.discretization.space.coordinates(),
//!     5,
//!     "profiles.svg",
//!     Some(&profile_config),
//! )?;
//! ```
//!
//! | Use Case | Module | Function |
//! |----------|--------|----------|
//! | Sample histories | `series` | `plot_samples` |
//! | Arbitrary depth profiles | `profile` | `plot_profiles` |
//! | Profile evolution over time | `profile` | `plot_profile_evolution` |

pub mod config;
pub mod profile;
pub mod series;

pub use config::{IntoOptionalTitle, NO_TITLE, PlotConfig};
pub use profile::{plot_profile_evolution, plot_profiles, snapshot_levels};
pub use series::plot_samples;
