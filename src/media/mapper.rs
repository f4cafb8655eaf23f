//! Per-point coefficient assignment
//!
//! # Algorithm
//!
//! Grid coordinates are sorted, and so are the layer edges. A single pass
//! over the grid therefore suffices: a pointer `j` into the layer list only
//! ever moves forward, and for each coordinate `x_i` it is advanced past
//! every layer whose edge is `≤ x_i`.
//!
//! ```text
//! x:      0 ──●──●──●──●──●──●──●──●──●──●──●──●──●──●── L
//! layers: [ barrier  )[clay)[gravel)[clay)[ barrier ...  )
//!          j = 0      j = 1  j = 2   j = 3  j = 4 ...
//! ```
//!
//! Membership is half-open, `start[j] ≤ x_i < edge[j]`: a point sitting
//! exactly on a shared boundary belongs to the deeper layer.
//!
//! # Coverage
//!
//! A point at or beyond the edge of the last layer (this includes
//! `x = L` when the stack fills the domain exactly, and the whole tail of the
//! domain when the stack is thinner than `L`) takes the properties of the
//! last layer. Every grid point therefore receives a material triple; no
//! zero or default coefficients leak into the solver.

use nalgebra::DVector;

use crate::error::{TransportError, TransportResult};
use crate::grid::SpatialGrid;
use crate::media::{LayerStack, MaterialKind, MaterialTable, TransportProperties};

/// Per-grid-point transport coefficients
#[derive(Debug, Clone, PartialEq)]
pub struct CoefficientField {
    /// D[i] [m²/day]
    pub dispersion: DVector<f64>,

    /// v[i] [m/day]
    pub velocity: DVector<f64>,

    /// λ[i] [1/day]
    pub decay: DVector<f64>,

    /// Index of the layer each point was assigned to
    pub layer_index: Vec<usize>,

    /// Material of each point
    pub material: Vec<MaterialKind>,
}

impl CoefficientField {
    /// Uniform field (same triple everywhere), handy for homogeneous columns
    pub fn uniform(points: usize, properties: TransportProperties, material: MaterialKind) -> Self {
        Self {
            dispersion: DVector::from_element(points, properties.dispersion),
            velocity: DVector::from_element(points, properties.velocity),
            decay: DVector::from_element(points, properties.decay),
            layer_index: vec![0; points],
            material: vec![material; points],
        }
    }

    /// Number of grid points covered
    pub fn len(&self) -> usize {
        self.dispersion.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dispersion.is_empty()
    }

    /// Triple at point `i`
    pub fn at(&self, i: usize) -> Option<TransportProperties> {
        if i >= self.len() {
            return None;
        }
        Some(TransportProperties::new(
            self.dispersion[i],
            self.velocity[i],
            self.decay[i],
        ))
    }

    /// Check the three arrays have the expected length
    pub fn check_length(&self, expected: usize) -> TransportResult<()> {
        let lengths = [
            ("dispersion coefficients", self.dispersion.len()),
            ("velocity coefficients", self.velocity.len()),
            ("decay coefficients", self.decay.len()),
        ];

        for (what, actual) in lengths {
            if actual != expected {
                return Err(TransportError::DimensionMismatch {
                    what,
                    expected,
                    actual,
                });
            }
        }
        Ok(())
    }
}

/// Assign each grid point the transport properties of the layer containing it
///
/// # Errors
///
/// - the stack is thicker than the grid's domain length
/// - a layer's material is missing from `table`, or its triple is invalid
/// - a coordinate lies before the first layer (cannot happen for grids
///   built by [`SpatialGrid::new`], which start at `x = 0`)
///
/// # Example
///
/// ```rust
/// use strata_rs::grid::SpatialGrid;
/// use strata_rs::media::{map_properties, LayerStack, MaterialKind, MaterialTable};
///
/// let grid = SpatialGrid::new(5.0, 200).unwrap();
/// let field = map_properties(&grid, &LayerStack::reference(), &MaterialTable::reference()).unwrap();
///
/// assert_eq!(field.len(), 200);
/// assert_eq!(field.material[0], MaterialKind::Barrier);
/// // Beyond the 0.97 m stack the last (gravel) layer is extended
/// assert_eq!(field.material[199], MaterialKind::Gravel);
/// ```
pub fn map_properties(
    grid: &SpatialGrid,
    stack: &LayerStack,
    table: &MaterialTable,
) -> TransportResult<CoefficientField> {
    stack.validate_against(grid.length())?;

    // Resolve each layer's triple once
    let mut layer_properties = Vec::with_capacity(stack.len());
    for layer in stack.layers() {
        let properties = table.get(layer.material)?;
        properties.validate(layer.material)?;
        layer_properties.push(properties);
    }

    let n = grid.points();
    let bounds = stack.bounds();
    let last = bounds.len() - 1;

    let mut dispersion = DVector::zeros(n);
    let mut velocity = DVector::zeros(n);
    let mut decay = DVector::zeros(n);
    let mut layer_index = Vec::with_capacity(n);
    let mut material = Vec::with_capacity(n);

    let mut j = 0;
    for (i, &x) in grid.coordinates().iter().enumerate() {
        while j < last && x >= bounds[j].edge {
            j += 1;
        }

        // j < last  => start[j] ≤ x < edge[j]
        // j == last => x ≥ start[last], clamped into the last layer
        if x < bounds[j].start {
            return Err(TransportError::UnassignedGridPoint {
                index: i,
                coordinate: x,
            });
        }

        let properties = layer_properties[j];
        dispersion[i] = properties.dispersion;
        velocity[i] = properties.velocity;
        decay[i] = properties.decay;
        layer_index.push(j);
        material.push(stack.layers()[j].material);
    }

    let beyond = grid
        .coordinates()
        .iter()
        .filter(|&&x| x >= bounds[last].edge)
        .count();
    if beyond > 0 {
        log::debug!(
            "{} grid point(s) beyond the stack edge {} assigned to the last layer ({})",
            beyond,
            bounds[last].edge,
            stack.layers()[last].material
        );
    }

    Ok(CoefficientField {
        dispersion,
        velocity,
        decay,
        layer_index,
        material,
    })
}

// =================================================================================================
// Tests
// =================================================================================================
