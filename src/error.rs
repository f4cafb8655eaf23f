//! Error types shared by every stage of a run
//!
//! Only structural problems are errors: a bad grid, an inconsistent layer
//! stack, a sample that cannot be resolved. Numerical excursions during the
//! time march are not errors at all, they are masked by the solver (see
//! [`crate::solver`]).

use thiserror::Error;

use crate::media::MaterialKind;

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Invalid grid: {0}")]
    InvalidGrid(String),

    #[error("Invalid time axis: {0}")]
    InvalidTimeAxis(String),

    #[error("Invalid layer stack: {0}")]
    InvalidLayerStack(String),

    #[error("Invalid transport properties for {material}: {message}")]
    InvalidMaterial {
        material: MaterialKind,
        message: String,
    },

    #[error("Material {0} has no entry in the material table")]
    MissingMaterial(MaterialKind),

    #[error("Grid point {index} at x = {coordinate} is not covered by any layer")]
    UnassignedGridPoint { index: usize, coordinate: f64 },

    #[error("Dimension mismatch for {what}: expected {expected}, got {actual}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Sampling error: {0}")]
    Sampling(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type TransportResult<T> = Result<T, TransportError>;
