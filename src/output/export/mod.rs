//! Export module for simulation results.
//!
//! # Architecture
//!
//! This module defines the [`Exporter`] trait that abstracts the export format.
//! Each format is an independent implementation in its own sub-module, so
//! adding a format means adding a file.
//!
//! # Available formats
//!
//! | Format  | Module  |
//! |---------|---------|
//! | CSV     | [`csv`] |
//!
//! # Usage example
//!
//! ```rust,ignore
//! use strata_rs::output::export::{CsvExporter, Exporter};
//!
//! let exporter = CsvExporter::default();
//! let paths = exporter.export_samples(&outcome.samples, Path::new("out"))?;
//! ```

pub mod csv;

pub use csv::{
    CsvConfig, CsvError, CsvExporter, CsvMetadata, export_samples_csv, export_series_csv,
    sample_file_name, write_series_csv,
};

use std::path::{Path, PathBuf};

use crate::sampling::SampleSeries;

/// Abstraction trait for all export formats.
///
/// Each format manages its own errors via the associated type, so the
/// caller can react precisely to the error kind.
pub trait Exporter {
    /// Error type specific to this export format.
    type Error: std::error::Error + From<std::io::Error>;

    /// File name used for the sample labelled `label`
    fn file_name(&self, label: &str) -> Result<String, Self::Error>;

    /// Write one sample's time series to `path`
    fn export_series(&self, series: &SampleSeries, path: &Path) -> Result<(), Self::Error>;

    /// Write every sample into `directory`, one file each
    ///
    /// The directory is created when missing. Returns the paths written, in sample order.
    fn export_samples(
        &self,
        samples: &[SampleSeries],
        directory: &Path,
    ) -> Result<Vec<PathBuf>, Self::Error> {
        std::fs::create_dir_all(directory)?;

        let mut written = Vec::with_capacity(samples.len());
        for series in samples {
            let path = directory.join(self.file_name(&series.label)?);
            self.export_series(series, &path)?;
            written.push(path);
        }
        Ok(written)
    }
}
