//! Performance benchmarks for the transport solver
//!
//! # What We're Measuring
//!
//! 1. **Operator sweep**: one evaluation of the advection-dispersion-decay
//!    right-hand side, scaling with grid size
//! 2. **Forward Euler march**: full time integration of a homogeneous column
//! 3. **Reference pipeline**: grid, mapping, march and sampling of the
//!    reference layered column (200 points, 1000 levels)
//! 4. **Parallel threshold**: serial vs rayon sweep on a large grid
//!    (only differs when built with `--features parallel`)
//!
//! # Expected Scaling
//!
//! Both the sweep and the march are linear in the number of grid points;
//! the march is also linear in the number of time levels.
//!
//! # Running Benchmarks
//!
//! ```bash
//! # All benchmarks
//! cargo bench --bench solver_performance
//!
//! # Only the march
//! cargo bench --bench solver_performance march
//!
//! # Serial vs parallel sweep
//! cargo bench --bench solver_performance --features parallel threshold
//! ```

use criterion::{BenchmarkId, Criterion, SamplingMode, criterion_group, criterion_main};
use std::hint::black_box;
use std::time::Duration;

use nalgebra::DVector;

use strata_rs::config::SimulationConfig;
use strata_rs::media::TransportProperties;
use strata_rs::models::AdvectionDispersionDecay;
use strata_rs::physics::PhysicalModel;
use strata_rs::pipeline::run_simulation;
use strata_rs::solver::{
    BoundaryConditions, DEFAULT_PARALLEL_THRESHOLD, EulerSolver, Scenario, Solver,
    SolverConfiguration, set_parallel_threshold,
};

/// Gravel coefficients of the reference material table
fn gravel() -> TransportProperties {
    TransportProperties::new(1e-3, 1e-2, 1e-2)
}

/// Homogeneous gravel column of length 5 m
fn gravel_column(points: usize) -> AdvectionDispersionDecay {
    let dx = 5.0 / points as f64;
    AdvectionDispersionDecay::homogeneous(points, dx, gravel(), 100.0).unwrap()
}

/// Linear profile, so every stencil term is non-trivial
fn ramp(points: usize) -> DVector<f64> {
    DVector::from_fn(points, |i, _| 100.0 - i as f64 / points as f64)
}

// =================================================================================================
// Benchmark Functions
// =================================================================================================

/// One right-hand-side evaluation, 100 to 50 000 points
fn benchmark_operator_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("Operator sweep");

    for points in [100, 200, 500, 5_000, 50_000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(points), points, |b, &points| {
            let model = gravel_column(points);
            let state = ramp(points);

            b.iter(|| black_box(model.compute_physics(black_box(&state))));
        });
    }

    group.finish();
}

/// Full march of a homogeneous column, 200 steps at dt = 0.1 day
///
/// dt stays below the stability limit for every size measured
/// (0.16 day at 500 points).
fn benchmark_euler_march(c: &mut Criterion) {
    let mut group = c.benchmark_group("Forward Euler march");

    for points in [100, 200, 500].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(points), points, |b, &points| {
            let scenario = Scenario::new(
                Box::new(gravel_column(points)),
                BoundaryConditions::fixed_inlet(0.0),
            );
            let config = SolverConfiguration::time_evolution(20.0, 0.1).unwrap();
            let solver = EulerSolver::new();

            b.iter(|| black_box(solver.solve(&scenario, &config).unwrap()));
        });
    }

    group.finish();
}

/// Reference layered column end to end
fn benchmark_reference_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("Reference pipeline");

    group.sampling_mode(SamplingMode::Flat);
    group.sample_size(10);
    group.measurement_time(Duration::from_secs(10));

    let config = SimulationConfig::reference();
    group.bench_function("reference", |b| {
        b.iter(|| black_box(run_simulation(black_box(&config)).unwrap()));
    });

    group.finish();
}

/// Same sweep with the parallel path forced off and on
fn benchmark_parallel_threshold(c: &mut Criterion) {
    let mut group = c.benchmark_group("Parallel threshold");

    let points = 200_000;
    let model = gravel_column(points);
    let state = ramp(points);

    for (name, threshold) in [("serial", usize::MAX), ("parallel", 1)] {
        set_parallel_threshold(threshold);
        group.bench_function(name, |b| {
            b.iter(|| black_box(model.compute_physics(black_box(&state))));
        });
    }
    set_parallel_threshold(DEFAULT_PARALLEL_THRESHOLD);

    group.finish();
}

criterion_group!(
    benches,
    benchmark_operator_sweep,
    benchmark_euler_march,
    benchmark_reference_pipeline,
    benchmark_parallel_threshold,
);
criterion_main!(benches);
