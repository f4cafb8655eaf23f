//! Layer stack geometry
//!
//! A stack is an ordered list of layers measured from the inlet (`x = 0`)
//! downwards. Layer `j` occupies the half-open interval
//!
//! ```text
//! [start[j], edge[j]),   edge[j] = start[j] + thickness[j]
//! ```
//!
//! with `start[0] = 0` and `start[j+1] = edge[j]`. Starts are built from a
//! running sum of the thicknesses, so consecutive layers share their
//! boundary value exactly and no coordinate can fall into a gap.

use serde::{Deserialize, Serialize};

use crate::error::{TransportError, TransportResult};
use crate::media::MaterialKind;

/// Relative slack accepted when comparing the stack thickness with `L`
const THICKNESS_TOLERANCE: f64 = 1e-9;

/// Reference thickness sequence [m]
pub const REFERENCE_THICKNESSES: [f64; 11] = [
    0.25, 0.02, 0.04, 0.02, 0.25, 0.02, 0.04, 0.02, 0.25, 0.02, 0.04,
];

/// Indices of the gravel lenses in the reference stack (0-based)
pub const REFERENCE_GRAVEL_LAYERS: [usize; 3] = [2, 6, 10];

// =================================================================================================
// Layer
// =================================================================================================

/// One layer of the medium
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    /// Layer thickness [m]
    pub thickness: f64,

    /// Material class
    pub material: MaterialKind,
}

impl Layer {
    pub fn new(thickness: f64, material: MaterialKind) -> Self {
        Self { thickness, material }
    }
}

/// Interval `[start, edge)` occupied by a layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerBounds {
    pub start: f64,
    pub edge: f64,
}

impl LayerBounds {
    /// Half-open membership test `start ≤ x < edge`
    pub fn contains(&self, x: f64) -> bool {
        self.start <= x && x < self.edge
    }

    pub fn thickness(&self) -> f64 {
        self.edge - self.start
    }
}

// =================================================================================================
// Layer Stack
// =================================================================================================

/// Ordered, contiguous sequence of layers starting at `x = 0`
#[derive(Debug, Clone, PartialEq)]
pub struct LayerStack {
    layers: Vec<Layer>,
    bounds: Vec<LayerBounds>,
}

impl LayerStack {
    /// Build a stack from its layers
    ///
    /// # Errors
    ///
    /// - the stack is empty
    /// - a thickness is not positive and finite
    pub fn new(layers: Vec<Layer>) -> TransportResult<Self> {
        if layers.is_empty() {
            return Err(TransportError::InvalidLayerStack(
                "stack must contain at least one layer".to_string(),
            ));
        }

        for (j, layer) in layers.iter().enumerate() {
            if !layer.thickness.is_finite() || layer.thickness <= 0.0 {
                return Err(TransportError::InvalidLayerStack(format!(
                    "layer {} ({}) has invalid thickness {}",
                    j, layer.material, layer.thickness
                )));
            }
        }

        let bounds = cumulative_bounds(&layers);
        Ok(Self { layers, bounds })
    }

    /// Build a stack from parallel thickness and material sequences
    pub fn from_parts(thicknesses: &[f64], materials: &[MaterialKind]) -> TransportResult<Self> {
        if thicknesses.len() != materials.len() {
            return Err(TransportError::DimensionMismatch {
                what: "layer materials",
                expected: thicknesses.len(),
                actual: materials.len(),
            });
        }

        Self::new(
            thicknesses
                .iter()
                .zip(materials)
                .map(|(t, m)| Layer::new(*t, *m))
                .collect(),
        )
    }

    /// Reference 11-layer stack
    ///
    /// Materials repeat `Barrier, Clayey, Gravel, Clayey` from the inlet, so
    /// the gravel lenses sit at indices 2, 6 and 10.
    pub fn reference() -> Self {
        let layers = reference_layers();
        let bounds = cumulative_bounds(&layers);
        Self { layers, bounds }
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn bounds(&self) -> &[LayerBounds] {
        &self.bounds
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Cumulative thickness (edge of the last layer)
    pub fn total_thickness(&self) -> f64 {
        self.bounds.last().map(|b| b.edge).unwrap_or(0.0)
    }

    /// Depth of the midpoint of layer `index`: `edge - thickness / 2`
    pub fn midpoint(&self, index: usize) -> TransportResult<f64> {
        let layer = self.layers.get(index).ok_or_else(|| {
            TransportError::Sampling(format!(
                "layer index {} out of range (stack has {} layers)",
                index,
                self.layers.len()
            ))
        })?;

        Ok(self.bounds[index].edge - layer.thickness / 2.0)
    }

    /// Indices of every layer made of `material`
    pub fn indices_of(&self, material: MaterialKind) -> Vec<usize> {
        self.layers
            .iter()
            .enumerate()
            .filter(|(_, l)| l.material == material)
            .map(|(j, _)| j)
            .collect()
    }

    /// Check the stack fits in a domain of length `domain_length`
    pub fn validate_against(&self, domain_length: f64) -> TransportResult<()> {
        let total = self.total_thickness();
        if total > domain_length * (1.0 + THICKNESS_TOLERANCE) {
            return Err(TransportError::InvalidLayerStack(format!(
                "cumulative thickness {} exceeds domain length {}",
                total, domain_length
            )));
        }
        Ok(())
    }
}

/// Running-sum interval boundaries; `start[j+1]` is `edge[j]` itself
fn cumulative_bounds(layers: &[Layer]) -> Vec<LayerBounds> {
    let mut bounds = Vec::with_capacity(layers.len());
    let mut start = 0.0;
    for layer in layers {
        let edge = start + layer.thickness;
        bounds.push(LayerBounds { start, edge });
        start = edge;
    }
    bounds
}

/// Reference layers as a plain list (configuration default)
pub fn reference_layers() -> Vec<Layer> {
    const PATTERN: [MaterialKind; 4] = [
        MaterialKind::Barrier,
        MaterialKind::Clayey,
        MaterialKind::Gravel,
        MaterialKind::Clayey,
    ];

    REFERENCE_THICKNESSES
        .iter()
        .enumerate()
        .map(|(j, t)| Layer::new(*t, PATTERN[j % PATTERN.len()]))
        .collect()
}

// =================================================================================================
// Tests
// =================================================================================================
