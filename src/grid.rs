//! Space and time discretization
//!
//! # Spatial Grid
//!
//! The domain `[0, L]` is sampled at `Nx` equally spaced coordinates that
//! include both ends:
//!
//! ```text
//! x[i] = i · L / (Nx - 1),    i ∈ [0, Nx-1]
//! ```
//!
//! The finite-difference step used by the transport scheme is a separate
//! quantity:
//!
//! ```text
//! dx = L / Nx
//! ```
//!
//! The two spacings differ by a factor `(Nx - 1) / Nx`. Coordinates are used
//! to decide which layer a point belongs to and where samples are taken;
//! `dx` only enters the difference quotients. Do not merge the two: the
//! computed fields depend on both exactly.
//!
//! # Time Axis
//!
//! ```text
//! Nt   = floor(T / dt)
//! t[k] = k · dt,              k ∈ [0, Nt-1]
//! ```
//!
//! Time coordinates are computed from the index, never accumulated, so
//! the rounding error of `t[k]` does not grow with `k`.
//!
//! # Example
//!
//! ```rust
//! use strata_rs::grid::Discretization;
//!
//! let disc = Discretization::build(5.0, 200, 100.0, 0.1).unwrap();
//!
//! assert_eq!(disc.space.points(), 200);
//! assert_eq!(disc.time.levels(), 1000);
//! assert_eq!(disc.space.coordinates()[199], 5.0);
//! ```

use nalgebra::DVector;

use crate::error::{TransportError, TransportResult};

/// Smallest grid that still has an interior point between the two boundaries
pub const MIN_GRID_POINTS: usize = 3;

/// Smallest time axis that contains at least one step
pub const MIN_TIME_LEVELS: usize = 2;

/// Largest time axis accepted
pub const MAX_TIME_LEVELS: usize = 10_000_000;

/// Largest `Nx × Nt` concentration field accepted (800 MB of `f64`)
pub const MAX_FIELD_CELLS: usize = 100_000_000;

// =================================================================================================
// Spatial Grid
// =================================================================================================

/// Uniform one-dimensional grid over `[0, L]`
#[derive(Debug, Clone, PartialEq)]
pub struct SpatialGrid {
    length: f64,
    dx: f64,
    coordinates: DVector<f64>,
}

impl SpatialGrid {
    /// Build a grid of `points` coordinates over `[0, length]`
    ///
    /// # Errors
    ///
    /// - `length` is not a positive finite number
    /// - `points < 3` (no interior point)
    pub fn new(length: f64, points: usize) -> TransportResult<Self> {
        if !length.is_finite() || length <= 0.0 {
            return Err(TransportError::InvalidGrid(format!(
                "domain length must be positive and finite, got {}",
                length
            )));
        }

        if points < MIN_GRID_POINTS {
            return Err(TransportError::InvalidGrid(format!(
                "need at least {} grid points (inlet, interior, outlet), got {}",
                MIN_GRID_POINTS, points
            )));
        }

        let dx = length / points as f64;
        let spacing = length / (points - 1) as f64;

        // Last coordinate pinned to the domain end so x[Nx-1] == L exactly
        let coordinates = DVector::from_fn(points, |i, _| {
            if i == points - 1 {
                length
            } else {
                i as f64 * spacing
            }
        });

        Ok(Self {
            length,
            dx,
            coordinates,
        })
    }

    /// Domain length `L`
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Finite-difference step `dx = L / Nx`
    pub fn dx(&self) -> f64 {
        self.dx
    }

    /// Number of grid points `Nx`
    pub fn points(&self) -> usize {
        self.coordinates.len()
    }

    /// Grid coordinates, strictly increasing from `0` to `L`
    pub fn coordinates(&self) -> &[f64] {
        self.coordinates.as_slice()
    }

    /// Coordinate of point `index`
    pub fn coordinate(&self, index: usize) -> Option<f64> {
        self.coordinates.get(index).copied()
    }
}

// =================================================================================================
// Time Axis
// =================================================================================================

/// Uniform time axis with `Nt = floor(T / dt)` levels
#[derive(Debug, Clone, PartialEq)]
pub struct TimeAxis {
    total_time: f64,
    dt: f64,
    times: Vec<f64>,
}

impl TimeAxis {
    /// Build the time axis for horizon `total_time` and step `dt`
    ///
    /// # Errors
    ///
    /// - `total_time` or `dt` is not a positive finite number
    /// - the horizon holds fewer than two levels, or more than
    ///   [`MAX_TIME_LEVELS`]
    pub fn new(total_time: f64, dt: f64) -> TransportResult<Self> {
        if !total_time.is_finite() || total_time <= 0.0 {
            return Err(TransportError::InvalidTimeAxis(format!(
                "total time must be positive and finite, got {}",
                total_time
            )));
        }

        if !dt.is_finite() || dt <= 0.0 {
            return Err(TransportError::InvalidTimeAxis(format!(
                "time step must be positive and finite, got {}",
                dt
            )));
        }

        let levels = (total_time / dt).floor();

        if levels < MIN_TIME_LEVELS as f64 {
            return Err(TransportError::InvalidTimeAxis(format!(
                "T / dt = {} / {} gives {} time levels, need at least {}",
                total_time, dt, levels, MIN_TIME_LEVELS
            )));
        }

        // Compared as f64: the cast saturates and T / dt may be infinite
        if levels > MAX_TIME_LEVELS as f64 {
            return Err(TransportError::InvalidTimeAxis(format!(
                "T / dt = {} / {} gives {:e} time levels, at most {} are accepted",
                total_time, dt, levels, MAX_TIME_LEVELS
            )));
        }

        let levels = levels as usize;
        let times = (0..levels).map(|k| k as f64 * dt).collect();

        Ok(Self {
            total_time,
            dt,
            times,
        })
    }

    /// Simulation horizon `T`
    pub fn total_time(&self) -> f64 {
        self.total_time
    }

    /// Time step `dt`
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Number of time levels `Nt`
    pub fn levels(&self) -> usize {
        self.times.len()
    }

    /// Number of explicit steps taken to fill every level (`Nt - 1`)
    pub fn steps(&self) -> usize {
        self.times.len() - 1
    }

    /// Time coordinates `t[k] = k · dt`
    pub fn times(&self) -> &[f64] {
        &self.times
    }
}

// =================================================================================================
// Discretization
// =================================================================================================

/// Reject a concentration field larger than [`MAX_FIELD_CELLS`]
pub fn check_field_size(points: usize, levels: usize) -> TransportResult<()> {
    match points.checked_mul(levels) {
        Some(cells) if cells <= MAX_FIELD_CELLS => Ok(()),
        _ => Err(TransportError::InvalidTimeAxis(format!(
            "a field of {} points × {} levels exceeds {} cells",
            points, levels, MAX_FIELD_CELLS
        ))),
    }
}

/// Spatial grid and time axis of one run
#[derive(Debug, Clone, PartialEq)]
pub struct Discretization {
    pub space: SpatialGrid,
    pub time: TimeAxis,
}

impl Discretization {
    /// Build both axes from the user-facing parameters `L`, `Nx`, `T`, `dt`
    pub fn build(
        length: f64,
        points: usize,
        total_time: f64,
        dt: f64,
    ) -> TransportResult<Self> {
        let space = SpatialGrid::new(length, points)?;
        let time = TimeAxis::new(total_time, dt)?;
        check_field_size(space.points(), time.levels())?;

        log::debug!(
            "Discretization: Nx = {}, dx = {:e}, Nt = {}, dt = {:e}",
            space.points(),
            space.dx(),
            time.levels(),
            time.dt()
        );

        Ok(Self { space, time })
    }
}

// =================================================================================================
// Tests
// =================================================================================================
