//! Run configuration
//!
//! [`SimulationConfig`] carries every input of a run: domain and grid,
//! time axis, initial and inlet concentrations, layer stack, material table
//! and sample locations. It deserializes from JSON and every field is
//! optional there: missing fields take the reference scenario's value.
//! Unknown keys are rejected.
//!
//! ```json
//! {
//!   "grid_points": 300,
//!   "time_step": 0.05,
//!   "samples": [
//!     { "label": "Gravel_1", "location": { "layer_midpoint": 2 } },
//!     { "label": "Probe", "location": { "depth": 1.5 } }
//!   ]
//! }
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{TransportError, TransportResult};
use crate::grid::{MIN_GRID_POINTS, TimeAxis, check_field_size};
use crate::media::{Layer, LayerStack, MaterialTable, REFERENCE_GRAVEL_LAYERS, reference_layers};
use crate::sampling::SampleTarget;
use crate::solver::{BoundaryConditions, SolverConfiguration};

// =================================================================================================
// Grid limits
// =================================================================================================

/// Accepted range for the number of grid points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GridLimits {
    pub min_points: usize,
    pub max_points: usize,
}

impl Default for GridLimits {
    fn default() -> Self {
        Self {
            min_points: 100,
            max_points: 500,
        }
    }
}

impl GridLimits {
    pub fn contains(&self, points: usize) -> bool {
        (self.min_points..=self.max_points).contains(&points)
    }
}

// =================================================================================================
// Samples
// =================================================================================================

/// Where a sample is taken
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleLocation {
    /// Midpoint of the layer with this index
    LayerMidpoint(usize),

    /// Explicit depth [m]
    Depth(f64),
}

/// Labelled sample location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SampleSpec {
    pub label: String,
    pub location: SampleLocation,
}

impl SampleSpec {
    pub fn layer_midpoint(label: impl Into<String>, layer: usize) -> Self {
        Self {
            label: label.into(),
            location: SampleLocation::LayerMidpoint(layer),
        }
    }

    pub fn depth(label: impl Into<String>, depth: f64) -> Self {
        Self {
            label: label.into(),
            location: SampleLocation::Depth(depth),
        }
    }
}

fn reference_samples() -> Vec<SampleSpec> {
    REFERENCE_GRAVEL_LAYERS
        .iter()
        .enumerate()
        .map(|(n, &j)| SampleSpec::layer_midpoint(format!("Gravel_{}", n + 1), j))
        .collect()
}

// =================================================================================================
// Simulation configuration
// =================================================================================================

/// Complete description of one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Domain length `L` [m]
    pub domain_length: f64,

    /// Number of grid points `Nx`
    pub grid_points: usize,

    /// Simulation horizon `T` [days]
    pub total_time: f64,

    /// Time step `dt` [days]
    pub time_step: f64,

    /// Uniform concentration at `t = 0` [mg/L]
    pub initial_concentration: f64,

    /// Fixed inlet concentration [mg/L]
    pub inlet_concentration: f64,

    /// Layers from the inlet downwards
    pub layers: Vec<Layer>,

    /// Transport properties per material
    pub materials: MaterialTable,

    pub samples: Vec<SampleSpec>,

    pub grid_limits: GridLimits,

    /// Warn before the march when `dt` exceeds the explicit stability limit
    pub stability_check: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            domain_length: 5.0,
            grid_points: 200,
            total_time: 100.0,
            time_step: 0.1,
            initial_concentration: 100.0,
            inlet_concentration: 0.0,
            layers: reference_layers(),
            materials: MaterialTable::reference(),
            samples: reference_samples(),
            grid_limits: GridLimits::default(),
            stability_check: true,
        }
    }
}

impl SimulationConfig {
    /// Reference scenario (5 m column, 200 points, 100 days at 0.1 day)
    pub fn reference() -> Self {
        Self::default()
    }

    /// Parse a JSON document
    pub fn from_json_str(json: &str) -> TransportResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }

    /// Load a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> TransportResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Serialize as pretty JSON
    pub fn to_json_string(&self) -> TransportResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every parameter before anything is allocated
    pub fn validate(&self) -> TransportResult<()> {
        let limits = self.grid_limits;
        if limits.min_points < MIN_GRID_POINTS || limits.min_points > limits.max_points {
            return Err(TransportError::Config(format!(
                "grid limits [{}, {}] are invalid (minimum is {})",
                limits.min_points, limits.max_points, MIN_GRID_POINTS
            )));
        }
        if !limits.contains(self.grid_points) {
            return Err(TransportError::InvalidGrid(format!(
                "{} grid points outside the accepted range [{}, {}]",
                self.grid_points, limits.min_points, limits.max_points
            )));
        }

        if !self.domain_length.is_finite() || self.domain_length <= 0.0 {
            return Err(TransportError::InvalidGrid(format!(
                "domain length must be positive and finite, got {}",
                self.domain_length
            )));
        }

        let time_axis = TimeAxis::new(self.total_time, self.time_step)?;
        check_field_size(self.grid_points, time_axis.levels())?;

        for (name, value) in [
            ("initial concentration", self.initial_concentration),
            ("inlet concentration", self.inlet_concentration),
        ] {
            if !value.is_finite() {
                return Err(TransportError::Config(format!(
                    "{} must be finite, got {}",
                    name, value
                )));
            }
        }

        self.materials.validate()?;

        let stack = self.layer_stack()?;
        stack.validate_against(self.domain_length)?;
        for layer in stack.layers() {
            self.materials.get(layer.material)?;
        }

        let mut labels = HashSet::new();
        for sample in &self.samples {
            if sample.label.trim().is_empty() {
                return Err(TransportError::Config("sample label is empty".to_string()));
            }
            if !labels.insert(sample.label.as_str()) {
                return Err(TransportError::Config(format!(
                    "duplicate sample label {}",
                    sample.label
                )));
            }
        }
        self.sample_targets(&stack)?;

        Ok(())
    }

    /// Layer stack built from `layers`
    pub fn layer_stack(&self) -> TransportResult<LayerStack> {
        LayerStack::new(self.layers.clone())
    }

    /// Resolve sample specifications to depths
    pub fn sample_targets(&self, stack: &LayerStack) -> TransportResult<Vec<SampleTarget>> {
        self.samples
            .iter()
            .map(|sample| match sample.location {
                SampleLocation::LayerMidpoint(j) => {
                    SampleTarget::layer_midpoint(sample.label.clone(), stack, j)
                }
                SampleLocation::Depth(depth) => {
                    if !depth.is_finite() {
                        return Err(TransportError::Sampling(format!(
                            "sample {} depth must be finite, got {}",
                            sample.label, depth
                        )));
                    }
                    Ok(SampleTarget::new(sample.label.clone(), depth))
                }
            })
            .collect()
    }

    /// Boundary conditions of the column
    pub fn boundaries(&self) -> BoundaryConditions {
        BoundaryConditions::fixed_inlet(self.inlet_concentration)
    }

    /// Solver configuration on `time_axis`
    pub fn solver_configuration(&self, time_axis: TimeAxis) -> SolverConfiguration {
        SolverConfiguration::new(time_axis).with_stability_check(self.stability_check)
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::{MaterialKind, TransportProperties};

    #[test]
    fn test_reference_is_valid() {
        let config = SimulationConfig::reference();

        assert!(config.validate().is_ok());
        assert_eq!(config.layers.len(), 11);
        assert_eq!(config.samples.len(), 3);
        assert_eq!(config.samples[0], SampleSpec::layer_midpoint("Gravel_1", 2));
    }

    #[test]
    fn test_partial_json_falls_back_to_reference() {
        let config = SimulationConfig::from_json_str(r#"{ "grid_points": 300 }"#).unwrap();

        assert_eq!(config.grid_points, 300);
        assert_eq!(config.domain_length, 5.0);
        assert_eq!(config.materials, MaterialTable::reference());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_json_round_trip() {
        let config = SimulationConfig {
            samples: vec![SampleSpec::depth("Probe", 1.5)],
            ..SimulationConfig::reference()
        };

        let json = config.to_json_string().unwrap();
        assert!(json.contains("\"depth\": 1.5"));
        assert_eq!(SimulationConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_sample_location_json_shape() {
        let json = r#"{ "samples": [
            { "label": "A", "location": { "layer_midpoint": 6 } },
            { "label": "B", "location": { "depth": 2.0 } }
        ] }"#;
        let config = SimulationConfig::from_json_str(json).unwrap();

        assert_eq!(config.samples[0].location, SampleLocation::LayerMidpoint(6));
        assert_eq!(config.samples[1].location, SampleLocation::Depth(2.0));
    }

    #[test]
    fn test_malformed_json_is_reported() {
        let err = SimulationConfig::from_json_str("{ grid_points: }").unwrap_err();
        assert!(matches!(err, TransportError::Json(_)));
    }

    #[test]
    fn test_grid_points_outside_limits() {
        let config = SimulationConfig {
            grid_points: 50,
            ..SimulationConfig::reference()
        };
        assert!(matches!(config.validate(), Err(TransportError::InvalidGrid(_))));

        let relaxed = SimulationConfig {
            grid_limits: GridLimits {
                min_points: 3,
                max_points: 10_000,
            },
            ..config
        };
        assert!(relaxed.validate().is_ok());
    }

    #[test]
    fn test_stack_thicker_than_domain() {
        let config = SimulationConfig {
            domain_length: 0.5,
            ..SimulationConfig::reference()
        };
        assert!(matches!(config.validate(), Err(TransportError::InvalidLayerStack(_))));
    }

    #[test]
    fn test_missing_material_is_rejected() {
        let config = SimulationConfig {
            materials: MaterialTable::new()
                .with(MaterialKind::Barrier, TransportProperties::new(1e-5, 1e-4, 1e-3)),
            ..SimulationConfig::reference()
        };
        assert!(matches!(config.validate(), Err(TransportError::MissingMaterial(_))));
    }

    #[test]
    fn test_short_horizon_is_rejected() {
        let config = SimulationConfig {
            total_time: 0.1,
            ..SimulationConfig::reference()
        };
        assert!(matches!(config.validate(), Err(TransportError::InvalidTimeAxis(_))));
    }

    #[test]
    fn test_huge_horizon_is_rejected() {
        let config = SimulationConfig {
            total_time: 1e30,
            time_step: 1.0,
            ..SimulationConfig::reference()
        };
        assert!(matches!(config.validate(), Err(TransportError::InvalidTimeAxis(_))));

        // 500 points × 1e6 levels passes the time axis but not the field size
        let config = SimulationConfig {
            grid_points: 500,
            total_time: 1e5,
            ..SimulationConfig::reference()
        };
        assert!(matches!(config.validate(), Err(TransportError::InvalidTimeAxis(_))));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = SimulationConfig::from_json_str(r#"{ "timestep": 0.05 }"#).unwrap_err();
        assert!(matches!(err, TransportError::Json(_)));
        assert!(err.to_string().contains("timestep"));

        let nested = r#"{ "samples": [
            { "label": "A", "location": { "depth": 1.0 }, "lable": "B" }
        ] }"#;
        assert!(SimulationConfig::from_json_str(nested).is_err());
    }

    #[test]
    fn test_duplicate_sample_labels() {
        let config = SimulationConfig {
            samples: vec![SampleSpec::depth("A", 1.0), SampleSpec::depth("A", 2.0)],
            ..SimulationConfig::reference()
        };
        assert!(matches!(config.validate(), Err(TransportError::Config(_))));
    }

    #[test]
    fn test_sample_layer_out_of_range() {
        let config = SimulationConfig {
            samples: vec![SampleSpec::layer_midpoint("Deep", 42)],
            ..SimulationConfig::reference()
        };
        assert!(matches!(config.validate(), Err(TransportError::Sampling(_))));
    }

    #[test]
    fn test_config_file_loading() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.json");
        std::fs::write(&path, r#"{ "total_time": 20.0 }"#).unwrap();

        let config = SimulationConfig::from_path(&path).unwrap();
        assert_eq!(config.total_time, 20.0);

        let missing = SimulationConfig::from_path(dir.path().join("absent.json"));
        assert!(matches!(missing, Err(TransportError::Io(_))));
    }
}
