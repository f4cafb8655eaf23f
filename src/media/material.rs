//! Material classes and their transport properties
//!
//! Every layer of the medium belongs to one of three material classes. Each
//! class carries a triple `(D, v, λ)`:
//!
//! - **D** : dispersion coefficient [m²/day]
//! - **v** : advective (pore) velocity [m/day]
//! - **λ** : first-order decay rate [1/day]
//!
//! The reference table models a sequence of low-permeability barriers,
//! clayey transition layers and thin gravel lenses:
//!
//! | Class   | D [m²/day] | v [m/day] | λ [1/day] |
//! |---------|------------|-----------|-----------|
//! | Barrier | 1.0e-5     | 1.0e-4    | 1.0e-3    |
//! | Clayey  | 1.0e-4     | 1.0e-3    | 5.0e-3    |
//! | Gravel  | 1.0e-3     | 1.0e-2    | 1.0e-2    |

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{TransportError, TransportResult};

// =================================================================================================
// Material Kind
// =================================================================================================

/// Material class of a layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialKind {
    /// Low-permeability barrier
    Barrier,

    /// Intermediate clayey material
    Clayey,

    /// High-permeability gravel
    Gravel,
}

impl MaterialKind {
    /// All material classes, in table order
    pub const ALL: [MaterialKind; 3] = [MaterialKind::Barrier, MaterialKind::Clayey, MaterialKind::Gravel];

    /// Human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            MaterialKind::Barrier => "Barrier",
            MaterialKind::Clayey => "Clayey",
            MaterialKind::Gravel => "Gravel",
        }
    }
}

impl fmt::Display for MaterialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =================================================================================================
// Transport Properties
// =================================================================================================

/// Transport coefficient triple `(D, v, λ)` of one material
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransportProperties {
    /// Dispersion coefficient D [m²/day]
    pub dispersion: f64,

    /// Advective velocity v [m/day]
    pub velocity: f64,

    /// Decay rate λ [1/day]
    pub decay: f64,
}

impl TransportProperties {
    pub fn new(dispersion: f64, velocity: f64, decay: f64) -> Self {
        Self {
            dispersion,
            velocity,
            decay,
        }
    }

    /// Check the triple can drive the explicit upwind scheme
    ///
    /// All three coefficients must be finite and non-negative. A negative
    /// velocity would reverse the flow direction, which the backward
    /// (upwind from `i-1`) advection difference does not support.
    pub fn validate(&self, material: MaterialKind) -> TransportResult<()> {
        let checks = [
            ("dispersion", self.dispersion),
            ("velocity", self.velocity),
            ("decay", self.decay),
        ];

        for (name, value) in checks {
            if !value.is_finite() {
                return Err(TransportError::InvalidMaterial {
                    material,
                    message: format!("{} is not finite ({})", name, value),
                });
            }
            if value < 0.0 {
                return Err(TransportError::InvalidMaterial {
                    material,
                    message: format!("{} must be non-negative, got {}", name, value),
                });
            }
        }

        Ok(())
    }
}

// =================================================================================================
// Material Table
// =================================================================================================

/// Lookup table from material class to transport properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaterialTable {
    entries: BTreeMap<MaterialKind, TransportProperties>,
}

impl MaterialTable {
    /// Empty table
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Reference table (barrier / clayey / gravel)
    pub fn reference() -> Self {
        Self::new()
            .with(MaterialKind::Barrier, TransportProperties::new(1.0e-5, 1.0e-4, 1.0e-3))
            .with(MaterialKind::Clayey, TransportProperties::new(1.0e-4, 1.0e-3, 5.0e-3))
            .with(MaterialKind::Gravel, TransportProperties::new(1.0e-3, 1.0e-2, 1.0e-2))
    }

    /// Builder pattern: set the properties of one material
    pub fn with(mut self, kind: MaterialKind, properties: TransportProperties) -> Self {
        self.entries.insert(kind, properties);
        self
    }

    /// Set the properties of one material
    pub fn insert(&mut self, kind: MaterialKind, properties: TransportProperties) {
        self.entries.insert(kind, properties);
    }

    /// Properties of `kind`
    ///
    /// # Errors
    ///
    /// [`TransportError::MissingMaterial`] if the table has no entry.
    pub fn get(&self, kind: MaterialKind) -> TransportResult<TransportProperties> {
        self.entries
            .get(&kind)
            .copied()
            .ok_or(TransportError::MissingMaterial(kind))
    }

    /// Iterate over the entries in material order
    pub fn iter(&self) -> impl Iterator<Item = (MaterialKind, TransportProperties)> + '_ {
        self.entries.iter().map(|(k, p)| (*k, *p))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Validate every entry
    pub fn validate(&self) -> TransportResult<()> {
        for (kind, properties) in self.iter() {
            properties.validate(kind)?;
        }
        Ok(())
    }
}

impl Default for MaterialTable {
    fn default() -> Self {
        Self::reference()
    }
}

// =================================================================================================
// Tests
// =================================================================================================
