//! Common utilities for integration tests

#![allow(dead_code)]

use strata_rs::config::SimulationConfig;
use strata_rs::sampling::SampleSeries;

/// Reference scenario truncated to `total_time` days
pub fn reference_until(total_time: f64) -> SimulationConfig {
    SimulationConfig {
        total_time,
        ..SimulationConfig::reference()
    }
}

/// Relative error, falling back to absolute error near zero
pub fn relative_error(computed: f64, expected: f64) -> f64 {
    if expected.abs() < 1e-12 {
        (computed - expected).abs()
    } else {
        ((computed - expected) / expected).abs()
    }
}

/// Find a series by label
pub fn series<'a>(samples: &'a [SampleSeries], label: &str) -> &'a SampleSeries {
    samples
        .iter()
        .find(|s| s.label == label)
        .unwrap_or_else(|| panic!("no sample labelled {}", label))
}
