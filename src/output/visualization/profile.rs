//! Depth profiles: concentration vs depth at selected time levels

use std::error::Error;

use plotters::prelude::*;

use crate::output::visualization::config::{NO_TITLE, PlotConfig};
use crate::solver::SimulationResult;

/// `count` time levels spread evenly over `0..n_levels`, last level included
///
/// Returns at most `n_levels` distinct, increasing indices.
pub fn snapshot_levels(n_levels: usize, count: usize) -> Vec<usize> {
    if n_levels == 0 || count == 0 {
        return Vec::new();
    }
    if count == 1 {
        return vec![n_levels - 1];
    }

    let count = count.min(n_levels);
    let last = n_levels - 1;
    let mut levels: Vec<usize> = (0..count).map(|k| k * last / (count - 1)).collect();
    levels.dedup();
    levels
}

/// Plot several named profiles on one depth axis
///
/// Each entry is `(label, depths, concentrations)`.
pub fn plot_profiles(
    profiles: &[(&str, &[f64], &[f64])],
    output_path: &str,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    if profiles.is_empty() {
        return Err("no profiles to plot".into());
    }
    for (label, z, c) in profiles {
        if z.len() != c.len() {
            return Err(format!(
                "profile '{}': {} depths but {} concentrations",
                label,
                z.len(),
                c.len()
            )
            .into());
        }
    }

    let default_config = PlotConfig::depth_profile(NO_TITLE);
    let config = config.unwrap_or(&default_config);

    let ext = std::path::Path::new(output_path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("png");

    match ext {
        "svg" => {
            let backend = SVGBackend::new(output_path, (config.width, config.height));
            plot_profiles_impl(backend, profiles, config)
        }
        _ => {
            let backend = BitMapBackend::new(output_path, (config.width, config.height));
            plot_profiles_impl(backend, profiles, config)
        }
    }
}

fn plot_profiles_impl<DB: DrawingBackend>(
    backend: DB,
    profiles: &[(&str, &[f64], &[f64])],
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let max_z = profiles
        .iter()
        .filter_map(|(_, z, _)| z.last().copied())
        .fold(0.0_f64, f64::max)
        .max(1e-10);
    let max_conc = profiles
        .iter()
        .flat_map(|(_, _, c)| c.iter().copied())
        .filter(|c| c.is_finite())
        .fold(0.0_f64, f64::max)
        .max(1e-10);

    let root = backend.into_drawing_area();
    root.fill(&config.background)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&config.title, ("sans-serif", 40).into_font())
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..max_z, 0.0..(max_conc * 1.1))?;

    if config.show_grid {
        chart
            .configure_mesh()
            .x_desc(&config.xlabel)
            .y_desc(&config.ylabel)
            .x_label_formatter(&|x| format!("{:.2}", x))
            .y_label_formatter(&|y| format!("{:.1}", y))
            .draw()?;
    }

    for (k, (label, z, c)) in profiles.iter().enumerate() {
        let color = config.series_color(k);

        chart
            .draw_series(LineSeries::new(
                z.iter().zip(c.iter()).map(|(z, c)| (*z, *c)),
                ShapeStyle::from(&color).stroke_width(config.line_width),
            ))?
            .label(*label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    chart
        .configure_series_labels()
        .background_style(&config.background.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

/// Plot the profile at `n_snapshots` evenly spaced time levels
///
/// `coordinates` are the grid depths, one per row of the result.
///
/// ```rust,ignore
/// let outcome = run_simulation(&config)?;
/// plot_profile_evolution(
///     &outcome.result,
///     outcome.discretization.space.coordinates(),
///     5,
///     "profiles.png",
///     None,
/// )?;
/// ```
pub fn plot_profile_evolution(
    result: &SimulationResult,
    coordinates: &[f64],
    n_snapshots: usize,
    output_path: &str,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    if result.is_empty() {
        return Err("empty simulation result".into());
    }
    if coordinates.len() != result.n_points() {
        return Err(format!(
            "{} coordinates for {} grid points",
            coordinates.len(),
            result.n_points()
        )
        .into());
    }

    let mut profiles = Vec::new();
    for level in snapshot_levels(result.n_levels(), n_snapshots) {
        let profile = result
            .profile(level)
            .ok_or_else(|| format!("time level {} out of range", level))?;
        profiles.push((
            format!("t = {:.1} d", result.time_points[level]),
            profile.iter().copied().collect::<Vec<f64>>(),
        ));
    }

    let refs: Vec<(&str, &[f64], &[f64])> = profiles
        .iter()
        .map(|(label, c)| (label.as_str(), coordinates, c.as_slice()))
        .collect();

    plot_profiles(&refs, output_path, config)
}

// =================================================================================================
// Tests
// =================================================================================================
