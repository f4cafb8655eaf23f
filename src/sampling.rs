//! Sample locations and time-series extraction
//!
//! A sample target is a labelled depth. It is resolved once to the grid
//! index whose coordinate is closest to that depth, and the concentration
//! history at that index is then read out of the solver's field.
//!
//! # Nearest Index
//!
//! Coordinates are strictly increasing, so the closest point is one of the
//! two neighbours of the insertion position found by binary search. When the
//! depth is exactly halfway between two points the lower index wins.

use crate::error::{TransportError, TransportResult};
use crate::grid::SpatialGrid;
use crate::media::{LayerStack, MaterialKind};
use crate::solver::SimulationResult;

// =================================================================================================
// Targets
// =================================================================================================

/// Labelled depth to sample
#[derive(Debug, Clone, PartialEq)]
pub struct SampleTarget {
    pub label: String,

    /// Depth below the inlet [m]
    pub depth: f64,
}

impl SampleTarget {
    pub fn new(label: impl Into<String>, depth: f64) -> Self {
        Self {
            label: label.into(),
            depth,
        }
    }

    /// Target at the midpoint of layer `layer` of `stack`
    pub fn layer_midpoint(
        label: impl Into<String>,
        stack: &LayerStack,
        layer: usize,
    ) -> TransportResult<Self> {
        Ok(Self::new(label, stack.midpoint(layer)?))
    }
}

/// One target per layer of `material`, labelled `{Material}_1`, `{Material}_2`, ...
///
/// # Example
///
/// ```rust
/// use strata_rs::media::{LayerStack, MaterialKind};
/// use strata_rs::sampling::material_midpoints;
///
/// let targets = material_midpoints(&LayerStack::reference(), MaterialKind::Gravel);
/// let labels: Vec<_> = targets.iter().map(|t| t.label.as_str()).collect();
/// assert_eq!(labels, ["Gravel_1", "Gravel_2", "Gravel_3"]);
/// ```
pub fn material_midpoints(stack: &LayerStack, material: MaterialKind) -> Vec<SampleTarget> {
    stack
        .indices_of(material)
        .into_iter()
        .enumerate()
        .filter_map(|(n, j)| {
            let label = format!("{}_{}", material.name(), n + 1);
            SampleTarget::layer_midpoint(label, stack, j).ok()
        })
        .collect()
}

// =================================================================================================
// Resolution
// =================================================================================================

/// Index of the coordinate closest to `depth`, lowest index on ties
///
/// `coordinates` must be sorted in increasing order.
///
/// # Errors
///
/// Empty coordinate list or non-finite depth.
///
/// # Example
///
/// ```rust
/// use strata_rs::sampling::nearest_index;
///
/// let x = [0.0, 1.0, 2.0, 3.0];
/// assert_eq!(nearest_index(&x, 1.2).unwrap(), 1);
/// assert_eq!(nearest_index(&x, 1.5).unwrap(), 1); // tie → lower
/// assert_eq!(nearest_index(&x, 9.0).unwrap(), 3);
/// ```
pub fn nearest_index(coordinates: &[f64], depth: f64) -> TransportResult<usize> {
    if coordinates.is_empty() {
        return Err(TransportError::Sampling(
            "cannot sample an empty grid".to_string(),
        ));
    }
    if !depth.is_finite() {
        return Err(TransportError::Sampling(format!(
            "sample depth must be finite, got {}",
            depth
        )));
    }

    let p = coordinates.partition_point(|&x| x < depth);
    if p == 0 {
        return Ok(0);
    }
    if p == coordinates.len() {
        return Ok(coordinates.len() - 1);
    }

    let below = (coordinates[p - 1] - depth).abs();
    let above = (coordinates[p] - depth).abs();
    Ok(if below <= above { p - 1 } else { p })
}

/// Target bound to a grid point
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSample {
    pub label: String,

    /// Requested depth [m]
    pub depth: f64,

    /// Nearest grid index
    pub index: usize,

    /// Coordinate of that grid index [m]
    pub coordinate: f64,
}

/// Resolve every target against `grid`
pub fn resolve(grid: &SpatialGrid, targets: &[SampleTarget]) -> TransportResult<Vec<ResolvedSample>> {
    let coordinates = grid.coordinates();
    let mut resolved = Vec::with_capacity(targets.len());

    for target in targets {
        let index = nearest_index(coordinates, target.depth)?;
        if target.depth < 0.0 || target.depth > grid.length() {
            log::warn!(
                "sample {} at depth {} lies outside [0, {}], using grid point {}",
                target.label,
                target.depth,
                grid.length(),
                index
            );
        }

        resolved.push(ResolvedSample {
            label: target.label.clone(),
            depth: target.depth,
            index,
            coordinate: coordinates[index],
        });
    }

    Ok(resolved)
}

// =================================================================================================
// Extraction
// =================================================================================================

/// Concentration history at one sample point
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSeries {
    pub label: String,
    pub depth: f64,
    pub index: usize,
    pub coordinate: f64,

    /// Time coordinates [days]
    pub times: Vec<f64>,

    /// `C[index, k]` for every level `k` [mg/L]
    pub concentrations: Vec<f64>,
}

impl SampleSeries {
    pub fn len(&self) -> usize {
        self.concentrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.concentrations.is_empty()
    }

    /// Largest concentration and the time it occurs at
    pub fn peak(&self) -> Option<(f64, f64)> {
        self.times
            .iter()
            .zip(self.concentrations.iter())
            .fold(None, |best: Option<(f64, f64)>, (&t, &c)| match best {
                Some((_, bc)) if bc >= c => best,
                _ => Some((t, c)),
            })
    }

    /// Concentration at the last level
    pub fn final_value(&self) -> Option<f64> {
        self.concentrations.last().copied()
    }
}

/// Read the time series of every resolved sample out of `result`
pub fn extract(
    result: &SimulationResult,
    samples: &[ResolvedSample],
) -> TransportResult<Vec<SampleSeries>> {
    samples
        .iter()
        .map(|sample| {
            let concentrations = result.series(sample.index).ok_or_else(|| {
                TransportError::Sampling(format!(
                    "sample {} index {} outside field with {} points",
                    sample.label,
                    sample.index,
                    result.n_points()
                ))
            })?;

            Ok(SampleSeries {
                label: sample.label.clone(),
                depth: sample.depth,
                index: sample.index,
                coordinate: sample.coordinate,
                times: result.time_points.clone(),
                concentrations,
            })
        })
        .collect()
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::DMatrix;

    /// Brute-force argmin with first-minimum semantics
    fn argmin(coordinates: &[f64], depth: f64) -> usize {
        let mut best = 0;
        for (i, &x) in coordinates.iter().enumerate() {
            if (x - depth).abs() < (coordinates[best] - depth).abs() {
                best = i;
            }
        }
        best
    }

    #[test]
    fn test_nearest_index_matches_linear_argmin() {
        let grid = SpatialGrid::new(5.0, 200).unwrap();
        let x = grid.coordinates();

        for k in 0..=1000 {
            let depth = -0.5 + 6.0 * k as f64 / 1000.0;
            assert_eq!(nearest_index(x, depth).unwrap(), argmin(x, depth), "depth {}", depth);
        }
    }

    #[test]
    fn test_nearest_index_tie_goes_low() {
        let x = [0.0, 0.5, 1.0];
        assert_eq!(nearest_index(&x, 0.25).unwrap(), 0);
        assert_eq!(nearest_index(&x, 0.75).unwrap(), 1);
    }

    #[test]
    fn test_nearest_index_exact_hit() {
        let x = [0.0, 0.5, 1.0];
        assert_eq!(nearest_index(&x, 0.5).unwrap(), 1);
        assert_eq!(nearest_index(&x, 0.0).unwrap(), 0);
        assert_eq!(nearest_index(&x, 1.0).unwrap(), 2);
    }

    #[test]
    fn test_nearest_index_errors() {
        assert!(nearest_index(&[], 0.5).is_err());
        assert!(nearest_index(&[0.0, 1.0], f64::NAN).is_err());
    }

    #[test]
    fn test_reference_gravel_midpoints() {
        let targets = material_midpoints(&LayerStack::reference(), MaterialKind::Gravel);

        assert_eq!(targets.len(), 3);
        assert_relative_eq!(targets[0].depth, 0.29, epsilon = 1e-12);
        assert_relative_eq!(targets[1].depth, 0.62, epsilon = 1e-12);
        assert_relative_eq!(targets[2].depth, 0.95, epsilon = 1e-12);
    }

    #[test]
    fn test_layer_midpoint_out_of_range() {
        let err = SampleTarget::layer_midpoint("x", &LayerStack::reference(), 11).unwrap_err();
        assert!(matches!(err, TransportError::Sampling(_)));
    }

    #[test]
    fn test_resolve_binds_coordinates() {
        let grid = SpatialGrid::new(1.0, 11).unwrap();
        let resolved = resolve(&grid, &[SampleTarget::new("mid", 0.52)]).unwrap();

        assert_eq!(resolved[0].index, 5);
        assert_relative_eq!(resolved[0].coordinate, 0.5, epsilon = 1e-12);
        assert_eq!(resolved[0].label, "mid");
    }

    #[test]
    fn test_extract_reads_rows() {
        let field = DMatrix::from_fn(4, 3, |i, k| (10 * i + k) as f64);
        let result = SimulationResult::new(vec![0.0, 1.0, 2.0], field, 0);
        let sample = ResolvedSample {
            label: "p2".to_string(),
            depth: 0.2,
            index: 2,
            coordinate: 0.2,
        };

        let series = extract(&result, &[sample]).unwrap();
        assert_eq!(series[0].concentrations, vec![20.0, 21.0, 22.0]);
        assert_eq!(series[0].times, vec![0.0, 1.0, 2.0]);
        assert_eq!(series[0].peak(), Some((2.0, 22.0)));
        assert_eq!(series[0].final_value(), Some(22.0));
    }

    #[test]
    fn test_extract_out_of_range() {
        let result = SimulationResult::new(vec![0.0, 1.0], DMatrix::zeros(3, 2), 0);
        let sample = ResolvedSample {
            label: "deep".to_string(),
            depth: 9.0,
            index: 3,
            coordinate: 9.0,
        };

        assert!(extract(&result, &[sample]).is_err());
    }
}
