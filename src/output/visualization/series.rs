//! Time-series plot: one line per sample on a shared time axis
//!
//! ```rust,ignore
//! use strata_rs::output::visualization::plot_samples;
//!
//! let outcome = run_simulation(&config)?;
//! plot_samples(&outcome.samples, "gravel.png", None)?;
//! ```

use std::error::Error;

use plotters::prelude::*;

use crate::output::visualization::config::{NO_TITLE, PlotConfig};
use crate::sampling::SampleSeries;

/// Plot area bounds `(t_max, c_min, c_max)` covering every sample
///
/// The concentration range always includes zero and gets 10 % headroom;
/// a flat series still gets a non-empty range.
pub(crate) fn series_bounds(samples: &[SampleSeries]) -> (f64, f64, f64) {
    let t_max = samples
        .iter()
        .filter_map(|s| s.times.last().copied())
        .fold(0.0_f64, f64::max);

    let (c_min, c_max) = samples
        .iter()
        .flat_map(|s| s.concentrations.iter().copied())
        .filter(|c| c.is_finite())
        .fold((0.0_f64, 0.0_f64), |(lo, hi), c| (lo.min(c), hi.max(c)));

    let span = (c_max - c_min).max(1e-10);
    let t_max = if t_max > 0.0 { t_max } else { 1.0 };
    let c_low = if c_min < 0.0 { c_min - 0.05 * span } else { 0.0 };

    (t_max, c_low, c_max + 0.1 * span)
}

/// Plot every sample's concentration history on one chart
///
/// PNG or SVG is chosen from the file extension (PNG when unknown).
///
/// # Errors
///
/// - `samples` is empty
/// - the backend cannot write to `output_path`
pub fn plot_samples(
    samples: &[SampleSeries],
    output_path: &str,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    if samples.is_empty() {
        return Err("no sample series to plot".into());
    }

    let default_config = PlotConfig::time_series(NO_TITLE);
    let config = config.unwrap_or(&default_config);

    let ext = std::path::Path::new(output_path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("png");

    match ext {
        "svg" => {
            let backend = SVGBackend::new(output_path, (config.width, config.height));
            plot_samples_impl(backend, samples, config)
        }
        _ => {
            let backend = BitMapBackend::new(output_path, (config.width, config.height));
            plot_samples_impl(backend, samples, config)
        }
    }
}

fn plot_samples_impl<DB: DrawingBackend>(
    backend: DB,
    samples: &[SampleSeries],
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let (t_max, c_min, c_max) = series_bounds(samples);

    let root = backend.into_drawing_area();
    root.fill(&config.background)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&config.title, ("sans-serif", 40).into_font())
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..t_max, c_min..c_max)?;

    if config.show_grid {
        chart
            .configure_mesh()
            .x_desc(&config.xlabel)
            .y_desc(&config.ylabel)
            .x_label_formatter(&|x| format!("{:.0}", x))
            .y_label_formatter(&|y| format!("{:.2}", y))
            .draw()?;
    }

    for (k, series) in samples.iter().enumerate() {
        let color = config.series_color(k);

        chart
            .draw_series(LineSeries::new(
                series
                    .times
                    .iter()
                    .zip(series.concentrations.iter())
                    .map(|(t, c)| (*t, *c)),
                ShapeStyle::from(&color).stroke_width(config.line_width),
            ))?
            .label(format!("{} ({:.2} m)", series.label, series.depth))
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

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn series(label: &str, concentrations: Vec<f64>) -> SampleSeries {
        let times = (0..concentrations.len()).map(|k| k as f64 * 0.5).collect();
        SampleSeries {
            label: label.to_string(),
            depth: 0.5,
            index: 3,
            coordinate: 0.5,
            times,
            concentrations,
        }
    }

    #[test]
    fn test_bounds_cover_all_series() {
        let samples = vec![
            series("a", vec![100.0, 80.0, 60.0]),
            series("b", vec![100.0, 90.0, 85.0, 82.0]),
        ];
        let (t_max, c_min, c_max) = series_bounds(&samples);

        assert_relative_eq!(t_max, 1.5);
        assert_eq!(c_min, 0.0);
        assert_relative_eq!(c_max, 110.0, epsilon = 1e-12);
    }

    #[test]
    fn test_bounds_flat_zero_series() {
        let (t_max, c_min, c_max) = series_bounds(&[series("z", vec![0.0, 0.0])]);

        assert_relative_eq!(t_max, 0.5);
        assert_eq!(c_min, 0.0);
        assert!(c_max > c_min);
    }

    #[test]
    fn test_bounds_extend_below_zero() {
        let (_, c_min, _) = series_bounds(&[series("n", vec![-10.0, 10.0])]);
        assert!(c_min < -10.0);
    }

    #[test]
    fn test_empty_samples_is_an_error() {
        assert!(plot_samples(&[], "unused.png", None).is_err());
    }

    #[test]
    #[ignore = "needs system fonts for text rendering"]
    fn test_plot_samples_svg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("samples.svg");
        let samples = vec![series("Gravel_1", vec![100.0, 95.0, 91.0])];

        plot_samples(&samples, path.to_str().unwrap(), None).unwrap();
        assert!(path.exists());
    }

    #[test]
    #[ignore = "needs system fonts for text rendering"]
    fn test_plot_samples_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("samples.png");
        let samples = vec![
            series("Gravel_1", vec![100.0, 95.0, 91.0]),
            series("Gravel_2", vec![100.0, 99.0, 97.0]),
        ];

        plot_samples(&samples, path.to_str().unwrap(), None).unwrap();
        assert!(path.exists());
    }
}
