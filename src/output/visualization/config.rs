//! Plot configuration shared across visualization modules

use plotters::prelude::*;

/// Configuration for customizing plots
///
/// Used by both time-series (concentration vs time) and profile
/// (concentration vs depth) plots.
///
/// # Example
///
/// ```rust,ignore
/// use strata_rs::output::visualization::PlotConfig;
/// use plotters::prelude::*;
///
/// let mut config = PlotConfig::time_series("Gravel layers");
/// config.series_colors = Some(vec![RED, BLUE, GREEN]);
/// config.width = 1920;
/// config.height = 1080;
/// ```
#[derive(Clone)]
pub struct PlotConfig {
    /// Image width in pixels (default: 1024)
    pub width: u32,

    /// Image height in pixels (default: 768)
    pub height: u32,

    /// Plot title (default: "Plot")
    pub title: String,

    /// X-axis label (default: auto-set by plot type)
    pub xlabel: String,

    /// Y-axis label (default: "Concentration (mg/L)")
    pub ylabel: String,

    /// Optional colors, one per series
    ///
    /// If None, or shorter than the number of series, the default palette
    /// fills in.
    pub series_colors: Option<Vec<RGBColor>>,

    /// Background color (default: WHITE)
    pub background: RGBColor,

    /// Line width in pixels (default: 2)
    pub line_width: u32,

    /// Show grid lines (default: true)
    pub show_grid: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            title: "Plot".to_string(),
            xlabel: String::new(),
            ylabel: "Concentration (mg/L)".to_string(),
            series_colors: None,
            background: WHITE,
            line_width: 2,
            show_grid: true,
        }
    }
}

/// Helper trait to accept both `String` and `None` for optional titles
pub trait IntoOptionalTitle {
    fn into_optional_title(self) -> Option<String>;
}

impl IntoOptionalTitle for &str {
    fn into_optional_title(self) -> Option<String> {
        Some(self.to_string())
    }
}

impl IntoOptionalTitle for String {
    fn into_optional_title(self) -> Option<String> {
        Some(self)
    }
}

impl<T: IntoOptionalTitle> IntoOptionalTitle for Option<T> {
    fn into_optional_title(self) -> Option<String> {
        self.and_then(|t| t.into_optional_title())
    }
}

/// Constant for no title (default title will be used)
pub const NO_TITLE: Option<&str> = None;

const DEFAULT_PALETTE: [RGBColor; 8] = [
    RED,
    BLUE,
    GREEN,
    MAGENTA,
    CYAN,
    BLACK,
    RGBColor(255, 165, 0), // Orange
    RGBColor(128, 0, 128), // Purple
];

impl PlotConfig {
    /// Concentration vs time, title defaults to "Concentration at Sample Depths"
    pub fn time_series(title: impl IntoOptionalTitle) -> Self {
        Self {
            xlabel: "Time (days)".to_string(),
            title: title
                .into_optional_title()
                .unwrap_or_else(|| "Concentration at Sample Depths".to_string()),
            ..Self::default()
        }
    }

    /// Concentration vs depth, title defaults to "Concentration Profiles"
    pub fn depth_profile(title: impl IntoOptionalTitle) -> Self {
        Self {
            xlabel: "Depth (m)".to_string(),
            title: title
                .into_optional_title()
                .unwrap_or_else(|| "Concentration Profiles".to_string()),
            ..Self::default()
        }
    }

    /// Color of series `index`
    pub(crate) fn series_color(&self, index: usize) -> RGBColor {
        if let Some(colors) = &self.series_colors
            && let Some(color) = colors.get(index)
        {
            return *color;
        }
        DEFAULT_PALETTE[index % DEFAULT_PALETTE.len()]
    }
}

// =================================================================================================
// Tests
// =================================================================================================
