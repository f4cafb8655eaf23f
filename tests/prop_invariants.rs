//! Property-based tests using proptest.
//!
//! Covers: grid and time-axis construction, layer mapping coverage,
//! nearest-index resolution and non-finite masking.

use proptest::prelude::*;

use strata_rs::grid::{SpatialGrid, TimeAxis};
use strata_rs::media::{LayerStack, MaterialKind, MaterialTable, map_properties};
use strata_rs::sampling::nearest_index;
use strata_rs::solver::mask_non_finite;

fn material() -> impl Strategy<Value = MaterialKind> {
    prop_oneof![
        Just(MaterialKind::Barrier),
        Just(MaterialKind::Clayey),
        Just(MaterialKind::Gravel),
    ]
}

/// Brute-force nearest coordinate, first minimum wins
fn argmin_distance(coordinates: &[f64], depth: f64) -> usize {
    let mut best = 0;
    for (i, x) in coordinates.iter().enumerate() {
        if (x - depth).abs() < (coordinates[best] - depth).abs() {
            best = i;
        }
    }
    best
}

// ── Grid and time axis ───────────────────────────────────────────────

proptest! {
    /// Coordinates span [0, L] and increase strictly.
    #[test]
    fn grid_coordinates_monotonic(
        length in 0.1f64..100.0,
        points in 3usize..600,
    ) {
        let grid = SpatialGrid::new(length, points).unwrap();
        let x = grid.coordinates();

        prop_assert_eq!(x.len(), points);
        prop_assert_eq!(x[0], 0.0);
        prop_assert_eq!(x[points - 1], length);
        prop_assert!(x.windows(2).all(|w| w[0] < w[1]));
        prop_assert!((grid.dx() - length / points as f64).abs() < 1e-15 * length.max(1.0));
    }

    /// Nt = floor(T / dt) and t[k] = k·dt.
    #[test]
    fn time_axis_levels(
        dt in 0.001f64..2.0,
        levels in 2usize..400,
    ) {
        // Half a step past the last level keeps floor() away from rounding edges
        let total_time = dt * (levels as f64 + 0.5);
        let axis = TimeAxis::new(total_time, dt).unwrap();

        prop_assert_eq!(axis.levels(), levels);
        prop_assert_eq!(axis.steps(), levels - 1);
        for (k, t) in axis.times().iter().enumerate() {
            prop_assert_eq!(*t, k as f64 * dt);
        }
    }
}

// ── Layer mapping ────────────────────────────────────────────────────

proptest! {
    /// Every grid point lands in exactly one layer, in stack order, with
    /// that layer's coefficients.
    #[test]
    fn mapper_covers_every_point(
        layers in prop::collection::vec((0.05f64..2.0, material()), 1..15),
        points in 3usize..400,
    ) {
        let (thicknesses, materials): (Vec<f64>, Vec<MaterialKind>) = layers.into_iter().unzip();
        let stack = LayerStack::from_parts(&thicknesses, &materials).unwrap();
        let length = stack.total_thickness();
        let grid = SpatialGrid::new(length, points).unwrap();
        let table = MaterialTable::reference();

        let field = map_properties(&grid, &stack, &table).unwrap();
        let bounds = stack.bounds();
        let last = bounds.len() - 1;

        prop_assert_eq!(field.len(), points);
        prop_assert!(field.layer_index.windows(2).all(|w| w[0] <= w[1]));

        for (i, &x) in grid.coordinates().iter().enumerate() {
            let j = field.layer_index[i];
            prop_assert!(x >= bounds[j].start);
            if j < last {
                prop_assert!(x < bounds[j].edge);
            }

            let expected = table.get(materials[j]).unwrap();
            prop_assert_eq!(field.material[i], materials[j]);
            prop_assert_eq!(field.dispersion[i], expected.dispersion);
            prop_assert_eq!(field.velocity[i], expected.velocity);
            prop_assert_eq!(field.decay[i], expected.decay);
        }
    }
}

// ── Sampling ─────────────────────────────────────────────────────────

proptest! {
    /// Binary search agrees with a linear scan, ties included.
    #[test]
    fn nearest_index_matches_argmin(
        length in 0.5f64..50.0,
        points in 3usize..500,
        fraction in -0.2f64..1.2,
    ) {
        let grid = SpatialGrid::new(length, points).unwrap();
        let x = grid.coordinates();
        let depth = fraction * length;

        prop_assert_eq!(nearest_index(x, depth).unwrap(), argmin_distance(x, depth));
    }

    /// Depths exactly on a coordinate resolve to that coordinate.
    #[test]
    fn nearest_index_exact_hit(
        points in 3usize..500,
        pick in any::<prop::sample::Index>(),
    ) {
        let grid = SpatialGrid::new(5.0, points).unwrap();
        let x = grid.coordinates();
        let i = pick.index(points);

        prop_assert_eq!(nearest_index(x, x[i]).unwrap(), i);
    }
}

// ── Masking ──────────────────────────────────────────────────────────

proptest! {
    /// Masking zeroes exactly the non-finite values and leaves the rest.
    #[test]
    fn masking_counts_non_finite(
        values in prop::collection::vec(
            prop_oneof![
                4 => -1e6f64..1e6,
                1 => Just(f64::NAN),
                1 => Just(f64::INFINITY),
                1 => Just(f64::NEG_INFINITY),
            ],
            0..200,
        ),
    ) {
        let original = values.clone();
        let mut masked = values;
        let expected = original.iter().filter(|v| !v.is_finite()).count();

        prop_assert_eq!(mask_non_finite(&mut masked), expected);
        for (before, after) in original.iter().zip(masked.iter()) {
            if before.is_finite() {
                prop_assert_eq!(before, after);
            } else {
                prop_assert_eq!(*after, 0.0);
            }
        }
    }
}
