//! CSV export of sample time series
//!
//! One file per sample, two columns:
//!
//! ```csv
//! Time (days),Concentration (mg/L)
//! 0.000000,100.000000
//! 0.100000,99.999000
//! ...
//! ```
//!
//! Files are named `{label}_Concentration.csv`.
//!
//! # With Metadata
//!
//! ```rust,ignore
//! use strata_rs::output::export::{export_series_csv, CsvConfig, CsvMetadata};
//!
//! let metadata = CsvMetadata::from_simulation("Advection-Dispersion-Decay 1D", "Forward Euler", 100.0, 999);
//! let config = CsvConfig::default().with_metadata(metadata);
//!
//! export_series_csv(&times, &concentrations, "Gravel_1_Concentration.csv", Some(&config))?;
//! ```
//!
//! **Output**:
//! ```csv
//! # Layered-Medium Transport Simulation Data
//! # Generated: 2026-02-11T15:30:00+00:00
//! # Model: Advection-Dispersion-Decay 1D
//! # Solver: Forward Euler
//! # Total Time: 100 days
//! # Time Steps: 999
//! #
//! Time (days),Concentration (mg/L)
//! ...
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::output::export::Exporter;
use crate::sampling::SampleSeries;

// =============================================================================
// Errors
// =============================================================================

#[derive(Error, Debug)]
pub enum CsvError {
    #[error("Empty data: time and concentration series must not be empty")]
    EmptyData,

    #[error("Data length mismatch: {times} time points versus {concentrations} concentrations")]
    LengthMismatch { times: usize, concentrations: usize },

    #[error("Invalid data: NaN or Inf in {column} at row {row}")]
    NonFinite { column: &'static str, row: usize },

    #[error("Invalid sample label {0:?}: cannot be used in a file name")]
    InvalidLabel(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Configuration Structures
// =============================================================================

/// Configuration for CSV export
///
/// # Example
///
/// ```rust
/// use strata_rs::output::export::CsvConfig;
///
/// let config = CsvConfig {
///     delimiter: ';',
///     precision: 10,
///     ..Default::default()
/// };
/// assert_eq!(config.time_header, "Time (days)");
/// ```
#[derive(Debug, Clone)]
pub struct CsvConfig {
    /// Column delimiter (default: ',')
    pub delimiter: char,

    /// Decimal separator (default: '.')
    pub decimal_separator: char,

    /// Number of decimal places for floating-point values (default: 6)
    pub precision: usize,

    /// Include metadata header comments (default: false)
    pub include_metadata: bool,

    /// Metadata to include in header
    pub metadata: Option<CsvMetadata>,

    /// Header of the time column (default: "Time (days)")
    pub time_header: String,

    /// Header of the concentration column (default: "Concentration (mg/L)")
    pub concentration_header: String,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            decimal_separator: '.',
            precision: 6,
            include_metadata: false,
            metadata: None,
            time_header: "Time (days)".to_string(),
            concentration_header: "Concentration (mg/L)".to_string(),
        }
    }
}

impl CsvConfig {
    /// Semicolon delimiter, comma as decimal separator
    pub fn european() -> Self {
        Self {
            delimiter: ';',
            decimal_separator: ',',
            ..Default::default()
        }
    }

    /// 12 decimal places
    pub fn high_precision() -> Self {
        Self {
            precision: 12,
            ..Default::default()
        }
    }

    /// Builder pattern: set delimiter
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Builder pattern: set precision
    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Builder pattern: enable metadata
    pub fn with_metadata(mut self, metadata: CsvMetadata) -> Self {
        self.include_metadata = true;
        self.metadata = Some(metadata);
        self
    }
}

/// Metadata for CSV header comments
///
/// Only non-`None` fields are written.
#[derive(Debug, Clone, Default)]
pub struct CsvMetadata {
    pub model_name: Option<String>,
    pub solver_name: Option<String>,

    /// Simulation horizon [days]
    pub total_time: Option<f64>,

    /// Number of explicit steps
    pub time_steps: Option<usize>,

    /// Time step [days]
    pub dt: Option<f64>,

    pub grid_points: Option<usize>,

    /// Sample label and depth [m]
    pub sample: Option<(String, f64)>,

    /// Additional custom parameters
    pub custom: Vec<(String, String)>,
}

impl CsvMetadata {
    pub fn from_simulation(model: &str, solver: &str, total_time: f64, time_steps: usize) -> Self {
        Self {
            model_name: Some(model.to_string()),
            solver_name: Some(solver.to_string()),
            total_time: Some(total_time),
            time_steps: Some(time_steps),
            ..Default::default()
        }
    }

    /// Copy of `self` describing one sample
    pub fn for_sample(&self, series: &SampleSeries) -> Self {
        Self {
            sample: Some((series.label.clone(), series.depth)),
            ..self.clone()
        }
    }

    /// Add custom parameter
    pub fn add_custom(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.custom.push((key.into(), value.into()));
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn write_metadata_header<W: Write>(writer: &mut W, metadata: &CsvMetadata) -> std::io::Result<()> {
    writeln!(writer, "# Layered-Medium Transport Simulation Data")?;
    writeln!(writer, "# Generated: {}", chrono::Utc::now().to_rfc3339())?;

    if let Some(model) = &metadata.model_name {
        writeln!(writer, "# Model: {}", model)?;
    }
    if let Some(solver) = &metadata.solver_name {
        writeln!(writer, "# Solver: {}", solver)?;
    }
    if let Some(total_time) = metadata.total_time {
        writeln!(writer, "# Total Time: {} days", total_time)?;
    }
    if let Some(time_steps) = metadata.time_steps {
        writeln!(writer, "# Time Steps: {}", time_steps)?;
    }
    if let Some(dt) = metadata.dt {
        writeln!(writer, "# Time Step: {} days", dt)?;
    }
    if let Some(points) = metadata.grid_points {
        writeln!(writer, "# Grid Points: {}", points)?;
    }
    if let Some((label, depth)) = &metadata.sample {
        writeln!(writer, "# Sample: {} at {} m", label, depth)?;
    }
    for (key, value) in &metadata.custom {
        writeln!(writer, "# {}: {}", key, value)?;
    }

    writeln!(writer, "#")
}

/// Format number with configured precision and decimal separator
fn format_number(value: f64, config: &CsvConfig) -> String {
    let formatted = format!("{:.prec$}", value, prec = config.precision);

    if config.decimal_separator != '.' {
        formatted.replace('.', &config.decimal_separator.to_string())
    } else {
        formatted
    }
}

fn validate_series(times: &[f64], concentrations: &[f64]) -> Result<(), CsvError> {
    if times.is_empty() || concentrations.is_empty() {
        return Err(CsvError::EmptyData);
    }
    if times.len() != concentrations.len() {
        return Err(CsvError::LengthMismatch {
            times: times.len(),
            concentrations: concentrations.len(),
        });
    }
    if let Some(row) = times.iter().position(|t| !t.is_finite()) {
        return Err(CsvError::NonFinite { column: "time", row });
    }
    if let Some(row) = concentrations.iter().position(|c| !c.is_finite()) {
        return Err(CsvError::NonFinite {
            column: "concentration",
            row,
        });
    }
    Ok(())
}

/// File name of a sample's CSV: `{label}_Concentration.csv`
///
/// # Example
///
/// ```rust
/// use strata_rs::output::export::sample_file_name;
///
/// assert_eq!(sample_file_name("Gravel_1").unwrap(), "Gravel_1_Concentration.csv");
/// assert!(sample_file_name("../etc").is_err());
/// ```
pub fn sample_file_name(label: &str) -> Result<String, CsvError> {
    if label.trim().is_empty() || label.contains(['/', '\\']) || label == "." || label == ".." {
        return Err(CsvError::InvalidLabel(label.to_string()));
    }
    Ok(format!("{}_Concentration.csv", label))
}

// =============================================================================
// Export Functions
// =============================================================================

/// Write a time series as CSV to any writer
pub fn write_series_csv<W: Write>(
    writer: &mut W,
    times: &[f64],
    concentrations: &[f64],
    configuration: &CsvConfig,
) -> Result<(), CsvError> {
    validate_series(times, concentrations)?;

    if configuration.include_metadata
        && let Some(metadata) = &configuration.metadata
    {
        write_metadata_header(writer, metadata)?;
    }

    writeln!(
        writer,
        "{}{}{}",
        configuration.time_header, configuration.delimiter, configuration.concentration_header
    )?;

    for (time, concentration) in times.iter().zip(concentrations.iter()) {
        writeln!(
            writer,
            "{}{}{}",
            format_number(*time, configuration),
            configuration.delimiter,
            format_number(*concentration, configuration)
        )?;
    }

    Ok(())
}

/// Export one time series to a CSV file
///
/// # Errors
///
/// - Empty data
/// - Mismatched lengths
/// - NaN or Inf values
/// - File creation errors
pub fn export_series_csv(
    times: &[f64],
    concentrations: &[f64],
    output_path: impl AsRef<Path>,
    configuration: Option<&CsvConfig>,
) -> Result<(), CsvError> {
    validate_series(times, concentrations)?;

    let binding = CsvConfig::default();
    let configuration = configuration.unwrap_or(&binding);

    let mut writer = BufWriter::new(File::create(output_path)?);
    write_series_csv(&mut writer, times, concentrations, configuration)?;
    writer.flush()?;

    Ok(())
}

/// Export every sample to `{directory}/{label}_Concentration.csv`
///
/// The directory is created when missing. Returns the paths written, in
/// sample order.
pub fn export_samples_csv(
    samples: &[SampleSeries],
    directory: impl AsRef<Path>,
    configuration: Option<&CsvConfig>,
) -> Result<Vec<PathBuf>, CsvError> {
    let binding = CsvConfig::default();
    CsvExporter::new(configuration.unwrap_or(&binding).clone()).export_samples(samples, directory.as_ref())
}

// =============================================================================
// Exporter
// =============================================================================

/// CSV implementation of [`Exporter`]
#[derive(Debug, Clone, Default)]
pub struct CsvExporter {
    pub config: CsvConfig,
}

impl CsvExporter {
    pub fn new(config: CsvConfig) -> Self {
        Self { config }
    }
}

impl Exporter for CsvExporter {
    type Error = CsvError;

    fn file_name(&self, label: &str) -> Result<String, CsvError> {
        sample_file_name(label)
    }

    fn export_series(&self, series: &SampleSeries, path: &Path) -> Result<(), CsvError> {
        let config = match (&self.config.metadata, self.config.include_metadata) {
            (Some(metadata), true) => CsvConfig {
                metadata: Some(metadata.for_sample(series)),
                ..self.config.clone()
            },
            _ => self.config.clone(),
        };

        export_series_csv(&series.times, &series.concentrations, path, Some(&config))?;
        log::debug!("Exported {} rows for {} to {}", series.len(), series.label, path.display());
        Ok(())
    }
}

// =================================================================================================
// Tests
// =================================================================================================
