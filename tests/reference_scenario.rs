//! Integration tests: the reference layered column end to end
//!
//! 5 m column, 200 grid points, 100 days at dt = 0.1 day, uniform
//! initial concentration 100 mg/L and a clean inlet.

use approx::assert_relative_eq;

use strata_rs::config::{SampleSpec, SimulationConfig};
use strata_rs::media::{MaterialKind, map_properties};
use strata_rs::output::export::{CsvExporter, Exporter};
use strata_rs::pipeline::run_simulation;

mod common;
use common::{reference_until, series};

// =================================================================================================
// Full reference run
// =================================================================================================

#[test]
fn test_reference_shape_and_time_axis() {
    let outcome = run_simulation(&SimulationConfig::reference()).unwrap();
    let result = &outcome.result;

    assert_eq!(result.n_points(), 200);
    assert_eq!(result.n_levels(), 1000);
    assert_eq!(result.time_points[0], 0.0);
    assert_relative_eq!(result.time_points[999], 99.9, epsilon = 1e-9);
    assert_eq!(result.masked_cells, 0);
    assert!(result.is_finite());
}

#[test]
fn test_reference_boundaries_hold_at_every_level() {
    let outcome = run_simulation(&SimulationConfig::reference()).unwrap();
    let field = &outcome.result.field;
    let last = field.nrows() - 1;

    for k in 0..field.ncols() {
        assert_eq!(field[(0, k)], 0.0, "inlet at level {}", k);
        if k > 0 {
            assert_eq!(field[(last, k)], field[(last - 1, k)], "outlet at level {}", k);
        }
    }
}

#[test]
fn test_reference_initial_profile() {
    let outcome = run_simulation(&SimulationConfig::reference()).unwrap();
    let initial = outcome.result.profile(0).unwrap();

    assert_eq!(initial[0], 0.0);
    assert!(initial.iter().skip(1).all(|&c| c == 100.0));
}

#[test]
fn test_reference_gravel_samples() {
    let outcome = run_simulation(&SimulationConfig::reference()).unwrap();
    let coords = outcome.discretization.space.coordinates();

    let expected = [("Gravel_1", 0.29), ("Gravel_2", 0.62), ("Gravel_3", 0.95)];
    assert_eq!(outcome.samples.len(), expected.len());

    for (label, depth) in expected {
        let s = series(&outcome.samples, label);
        assert_relative_eq!(s.depth, depth, epsilon = 1e-9);

        // Nearest grid point
        let best = coords
            .iter()
            .map(|x| (x - depth).abs())
            .fold(f64::INFINITY, f64::min);
        assert_relative_eq!((s.coordinate - depth).abs(), best, epsilon = 1e-12);

        assert_eq!(s.len(), 1000);
        assert_eq!(s.concentrations[0], 100.0);
        for &c in &s.concentrations {
            assert!(c.is_finite());
            assert!((0.0..=100.0).contains(&c), "{} out of range: {}", label, c);
        }
    }
}

#[test]
fn test_reference_decays_at_sample_points() {
    let outcome = run_simulation(&SimulationConfig::reference()).unwrap();

    for s in &outcome.samples {
        let final_value = s.final_value().unwrap();
        assert!(final_value < 100.0, "{} did not decay: {}", s.label, final_value);
    }
}

#[test]
fn test_reference_run_is_deterministic() {
    let config = reference_until(20.0);
    let first = run_simulation(&config).unwrap();
    let second = run_simulation(&config).unwrap();

    assert_eq!(first.result.field, second.result.field);
}

#[test]
fn test_coefficients_follow_layers() {
    let outcome = run_simulation(&reference_until(1.0)).unwrap();
    let grid = &outcome.discretization.space;
    let field = &outcome.coefficients;

    let config = SimulationConfig::reference();
    let remapped = map_properties(grid, &config.layer_stack().unwrap(), &config.materials).unwrap();
    assert_eq!(field.dispersion, remapped.dispersion);

    // Grid point nearest to Gravel_2 sits in gravel
    let s = series(&outcome.samples, "Gravel_2");
    assert_eq!(field.material[s.index], MaterialKind::Gravel);
    assert_eq!(field.velocity[s.index], 1e-2);
}

// =================================================================================================
// Variants
// =================================================================================================

#[test]
fn test_custom_depth_sample() {
    let mut config = reference_until(2.0);
    config.samples.push(SampleSpec::depth("Probe", 2.5));

    let outcome = run_simulation(&config).unwrap();
    let probe = series(&outcome.samples, "Probe");

    assert_eq!(outcome.samples.len(), 4);
    assert!((probe.coordinate - 2.5).abs() <= 5.0 / 199.0);
}

#[test]
fn test_config_from_json_runs() {
    let json = r#"{
        "grid_points": 100,
        "total_time": 3.0,
        "samples": [ { "label": "Top", "location": { "depth": 0.0 } } ]
    }"#;
    let config = SimulationConfig::from_json_str(json).unwrap();
    let outcome = run_simulation(&config).unwrap();

    assert_eq!(outcome.result.n_points(), 100);
    assert_eq!(outcome.result.n_levels(), 30);
    let top = series(&outcome.samples, "Top");
    assert_eq!(top.index, 0);
    assert!(top.concentrations.iter().all(|&c| c == 0.0));
}

// =================================================================================================
// Export
// =================================================================================================

#[test]
fn test_samples_export_to_csv() {
    let outcome = run_simulation(&reference_until(5.0)).unwrap();
    let dir = tempfile::tempdir().unwrap();

    let paths = CsvExporter::default()
        .export_samples(&outcome.samples, dir.path())
        .unwrap();

    assert_eq!(paths.len(), 3);
    for (path, s) in paths.iter().zip(outcome.samples.iter()) {
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            format!("{}_Concentration.csv", s.label)
        );

        let contents = std::fs::read_to_string(path).unwrap();
        let data_rows = contents
            .lines()
            .filter(|l| !l.starts_with('#') && !l.is_empty())
            .count();
        // Header + one row per level
        assert_eq!(data_rows, 1 + s.len());
    }
}
