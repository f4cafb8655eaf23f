//! Output of simulation results
//!
//! - **Visualization**: PNG/SVG plots using plotters
//! - **Export**: CSV files, one per sample
//!
//! ```text
//! output/
//! ├── mod.rs
//! ├── visualization/
//! │   ├── config.rs
//! │   ├── series.rs
//! │   └── profile.rs
//! └── export/
//!     ├── mod.rs
//!     └── csv.rs
//! ```
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use strata_rs::output::{plot_samples, CsvExporter, Exporter};
//!
//! plot_samples(&outcome.samples, "gravel.png", None)?;
//! CsvExporter::default().export_samples(&outcome.samples, Path::new("out"))?;
//! ```

pub mod export;
pub mod visualization;

pub use visualization::{PlotConfig, plot_profile_evolution, plot_profiles, plot_samples};

pub use export::{CsvConfig, CsvExporter, Exporter, export_samples_csv, export_series_csv};
