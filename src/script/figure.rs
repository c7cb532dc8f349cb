//! Figure model.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::script::data::IntoSeriesData;
use crate::script::element::{AxisConfig, Legend, LegendPosition};
use crate::script::error::ScriptResult;
use crate::script::layout::SubplotSpec;
use crate::script::series::{
    BarSeries, Categories, ErrorBandSeries, LineSeries, MatrixSeries, Series,
};
use crate::script::style::{Color, StyleConfig};

/// Series drawn against a secondary y-axis sharing the primary x-range.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct TwinAxis {
    /// Secondary y-axis label and limits
    pub y_axis: AxisConfig,
    /// Series drawn on the secondary axis
    pub series: Vec<Series>,
}

impl TwinAxis {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a series to the secondary axis.
    pub fn add(mut self, series: impl Into<Series>) -> Self {
        self.series.push(series.into());
        self
    }

    /// Set the secondary y-axis label.
    pub fn ylabel(mut self, label: impl Into<String>) -> Self {
        self.y_axis.label = Some(label.into());
        self
    }

    /// Set the secondary y-axis limits.
    pub fn ylim(mut self, min: f64, max: f64) -> Self {
        self.y_axis.limits = Some((min, max));
        self
    }
}

/// Kinds accepted by the quick-plot constructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlotKind {
    #[default]
    Line,
    Scatter,
    ErrorLine,
    Bar,
}

/// Declarative description of one figure and its output file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Figure {
    /// Figure title (a super-title when subplots are used)
    pub title: Option<String>,
    /// X-axis label and limits
    pub x_axis: AxisConfig,
    /// Y-axis label and limits
    pub y_axis: AxisConfig,
    /// Legend settings
    pub legend: Legend,
    /// Seaborn styling
    pub style: StyleConfig,
    /// Secondary y-axis; cannot be combined with subplots
    pub twin: Option<TwinAxis>,
    /// Subplot grid
    pub subplots: Option<SubplotSpec>,
    /// Series, drawn in order
    pub series: Vec<Series>,
    /// Saved figure name; `.pdf` is appended when missing
    pub output_name: Option<String>,
    /// Figure size in inches (width, height)
    pub size: Option<(f64, f64)>,
    /// Tick label font size
    pub tick_label_size: Option<f64>,
    /// Save with a tight bounding box when a legend is present
    pub tight: bool,
    /// Open an interactive window after saving
    pub show: bool,
    /// Block until the window is closed
    pub block: bool,
}

impl Default for Figure {
    fn default() -> Self {
        Figure {
            title: None,
            x_axis: AxisConfig::default(),
            y_axis: AxisConfig::default(),
            legend: Legend::default(),
            style: StyleConfig::default(),
            twin: None,
            subplots: None,
            series: Vec::new(),
            output_name: None,
            size: None,
            tick_label_size: None,
            tight: false,
            show: true,
            block: true,
        }
    }
}

impl Figure {
    /// Create an empty figure.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the figure title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the x-axis label.
    pub fn xlabel(mut self, label: impl Into<String>) -> Self {
        self.x_axis.label = Some(label.into());
        self
    }

    /// Set the y-axis label.
    pub fn ylabel(mut self, label: impl Into<String>) -> Self {
        self.y_axis.label = Some(label.into());
        self
    }

    /// Set the x-axis limits.
    pub fn xlim(mut self, min: f64, max: f64) -> Self {
        self.x_axis.limits = Some((min, max));
        self
    }

    /// Set the y-axis limits.
    pub fn ylim(mut self, min: f64, max: f64) -> Self {
        self.y_axis.limits = Some((min, max));
        self
    }

    /// Set the legend position.
    pub fn legend_at(mut self, position: LegendPosition) -> Self {
        self.legend.position = position;
        self
    }

    /// Set the styling flags.
    pub fn style(mut self, style: StyleConfig) -> Self {
        self.style = style;
        self
    }

    /// Enable or disable the grid style.
    pub fn grid(mut self, grid: bool) -> Self {
        self.style.grid = grid;
        self
    }

    /// Choose the dark or white style.
    pub fn dark(mut self, dark: bool) -> Self {
        self.style.dark = dark;
        self
    }

    /// Lay the series out on a subplot grid.
    pub fn subplots(mut self, spec: SubplotSpec) -> Self {
        self.subplots = Some(spec);
        self
    }

    /// Draw a group of series against a secondary y-axis.
    pub fn twin(mut self, twin: TwinAxis) -> Self {
        self.twin = Some(twin);
        self
    }

    /// Add a series.
    pub fn add(mut self, series: impl Into<Series>) -> Self {
        self.series.push(series.into());
        self
    }

    /// Set the saved figure name.
    pub fn output(mut self, name: impl Into<String>) -> Self {
        self.output_name = Some(name.into());
        self
    }

    /// Set the figure size in inches.
    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.size = Some((width, height));
        self
    }

    /// Set the tick label font size.
    pub fn tick_label_size(mut self, size: f64) -> Self {
        self.tick_label_size = Some(size);
        self
    }

    /// Save with a tight bounding box.
    pub fn tight(mut self, tight: bool) -> Self {
        self.tight = tight;
        self
    }

    /// Show the figure interactively, optionally blocking.
    pub fn show(mut self, show: bool, block: bool) -> Self {
        self.show = show;
        self.block = block;
        self
    }

    /// Primary series followed by the twin-axis series.
    pub fn all_series(&self) -> impl Iterator<Item = &Series> {
        self.series
            .iter()
            .chain(self.twin.iter().flat_map(|t| t.series.iter()))
    }

    /// True when any series (primary or twin) adds a legend entry.
    pub fn has_labels(&self) -> bool {
        self.all_series().any(Series::has_label)
    }

    /// Compile and write the script to `path`.
    pub fn save_script(&self, path: impl AsRef<Path>) -> ScriptResult<()> {
        let script = self.compile()?;
        let mut file = File::create(path)?;
        file.write_all(script.as_bytes())?;
        Ok(())
    }

    // Quick-plot constructors

    /// One series of the given kind. `x` doubles as the bar heights for bars,
    /// with `y` as their positions.
    pub fn quick(
        x: impl IntoSeriesData,
        y: Option<Vec<f64>>,
        errors: Option<Vec<f64>>,
        kind: PlotKind,
    ) -> Self {
        Figure::new().add(series_of(kind, x.into_series_data(), y, errors))
    }

    /// A line with a shaded error band.
    pub fn error_plot(
        x: impl IntoSeriesData,
        errors: impl IntoSeriesData,
        y: Option<Vec<f64>>,
    ) -> Self {
        let band = ErrorBandSeries {
            x: Some(x.into_series_data()),
            y,
            errors: Some(errors.into_series_data()),
            ..Default::default()
        };
        Figure::new().add(band)
    }

    /// One labelled series per entry, each drawn against its index.
    pub fn labelled<S: AsRef<str>>(series: &[(S, Vec<f64>)], kind: PlotKind) -> Self {
        series.iter().fold(Figure::new(), |fig, (label, values)| {
            let series = match series_of(kind, values.clone(), None, None) {
                Series::Line(s) => Series::Line(s.label(label.as_ref())),
                Series::Scatter(s) => Series::Scatter(s.label(label.as_ref())),
                Series::ErrorBand(s) => Series::ErrorBand(s.label(label.as_ref())),
                Series::Bar(s) => Series::Bar(s.label(label.as_ref())),
                Series::Matrix(s) => Series::Matrix(s.label(label.as_ref())),
            };
            fig.add(series)
        })
    }

    /// Two series sharing `x`, the second against a twin y-axis. Both draw
    /// their color from the palette so they stay distinguishable.
    pub fn twin_plot(
        x: impl IntoSeriesData,
        y1: Vec<f64>,
        y2: Vec<f64>,
        kind1: PlotKind,
        kind2: PlotKind,
    ) -> Self {
        let x = x.into_series_data();
        let first = with_palette(series_of(kind1, x.clone(), Some(y1), None));
        let second = with_palette(series_of(kind2, x, Some(y2), None));
        Figure::new().add(first).twin(TwinAxis::new().add(second))
    }

    /// A matrix image, without the grid style.
    pub fn mat_show(matrix: Vec<Vec<f64>>) -> Self {
        let fig = Figure::new();
        let style = fig.style.without_grid();
        fig.style(style).add(MatrixSeries::new(matrix))
    }

    /// A Hinton diagram, without the grid style.
    pub fn hinton(matrix: Vec<Vec<f64>>) -> Self {
        let fig = Figure::new();
        let style = fig.style.without_grid();
        fig.style(style).add(MatrixSeries::hinton(matrix))
    }

    /// Sine wave demo figure.
    pub fn demo() -> Self {
        let x: Vec<f64> = (0..200).map(|i| i as f64 / 100.0).collect();
        let y: Vec<f64> = x
            .iter()
            .map(|v| (2.0 * v * std::f64::consts::PI).sin())
            .collect();
        Figure::new()
            .title("Test figure")
            .xlabel("$x$")
            .ylabel(r"$\sin(2 \pi x)$")
            .add(LineSeries::new(x, y))
    }
}

fn series_of(kind: PlotKind, x: Vec<f64>, y: Option<Vec<f64>>, errors: Option<Vec<f64>>) -> Series {
    match kind {
        PlotKind::Line => Series::Line(LineSeries {
            x: Some(x),
            y,
            ..Default::default()
        }),
        PlotKind::Scatter => Series::Scatter(LineSeries {
            x: Some(x),
            y,
            ..Default::default()
        }),
        PlotKind::ErrorLine => Series::ErrorBand(ErrorBandSeries {
            x: Some(x),
            y,
            errors,
            ..Default::default()
        }),
        PlotKind::Bar => Series::Bar(BarSeries {
            values: Some(x),
            categories: y.map(Categories::Numeric),
            errors,
            ..Default::default()
        }),
    }
}

fn with_palette(series: Series) -> Series {
    match series {
        Series::Line(s) => Series::Line(s.color(Color::Palette)),
        Series::Scatter(s) => Series::Scatter(s.color(Color::Palette)),
        Series::ErrorBand(s) => Series::ErrorBand(s.color(Color::Palette)),
        Series::Bar(s) => Series::Bar(s.color(Color::Palette)),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::error::ScriptError;
    use crate::script::series::SeriesRender;

    #[test]
    fn test_builder() {
        let fig = Figure::new()
            .title("T")
            .xlabel("x")
            .xlim(0.0, 1.0)
            .add(LineSeries::values([1, 2]).label("a"))
            .twin(TwinAxis::new().ylabel("right").add(LineSeries::values([3])));
        assert_eq!(fig.title.as_deref(), Some("T"));
        assert_eq!(fig.x_axis.limits, Some((0.0, 1.0)));
        assert_eq!(fig.all_series().count(), 2);
        assert!(fig.has_labels());
        assert!(fig.show && fig.block);
    }

    #[test]
    fn test_quick_bar_uses_x_as_heights() {
        let fig = Figure::quick([3, 4], Some(vec![10.0, 20.0]), None, PlotKind::Bar);
        match &fig.series[0] {
            Series::Bar(b) => {
                assert_eq!(b.values.as_deref(), Some(&[3.0, 4.0][..]));
                assert!(b.validate().is_ok());
            }
            other => panic!("unexpected series {:?}", other),
        }
    }

    #[test]
    fn test_labelled_and_twin_plot() {
        let fig = Figure::labelled(&[("a", vec![1.0]), ("b", vec![2.0])], PlotKind::Line);
        let labels: Vec<_> = fig.series.iter().filter_map(|s| s.label()).collect();
        assert_eq!(labels, ["a", "b"]);

        let twin = Figure::twin_plot([0, 1], vec![1.0, 2.0], vec![5.0, 6.0], PlotKind::Line, PlotKind::Bar);
        assert_eq!(twin.series[0].color(), Some(&Color::Palette));
        let second = &twin.twin.as_ref().unwrap().series[0];
        assert!(matches!(second, Series::Bar(_)));
        assert_eq!(second.color(), Some(&Color::Palette));
    }

    #[test]
    fn test_figure_json_defaults() {
        let fig: Figure = serde_json::from_str(r#"{"title": "T", "series": []}"#).unwrap();
        assert_eq!(fig.title.as_deref(), Some("T"));
        assert!(fig.show);
        assert!(fig.style.styling);
        assert!(fig.subplots.is_none());
    }

    #[test]
    fn test_matrix_constructors_drop_grid() {
        assert_eq!(Figure::mat_show(vec![vec![1.0]]).style.token(), "dark");
        assert!(matches!(&Figure::hinton(vec![vec![1.0]]).series[0], Series::Matrix(m) if m.hinton));
    }

    #[test]
    fn test_save_script_matches_compile() {
        let fig = Figure::demo().output("sine");
        let path = std::env::temp_dir().join("plotscript_save_script_test.py");
        fig.save_script(&path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, fig.compile().unwrap());
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_save_script_into_missing_dir() {
        let path = std::env::temp_dir()
            .join("plotscript_missing_dir")
            .join("nested")
            .join("script.py");
        let result = Figure::demo().save_script(&path);
        assert!(matches!(result, Err(ScriptError::Io(_))));
    }

    #[test]
    fn test_save_script_rejects_invalid_figure() {
        let path = std::env::temp_dir().join("plotscript_invalid_figure.py");
        let result = Figure::new().add(LineSeries::default()).save_script(&path);
        assert!(matches!(result, Err(ScriptError::InvalidSeriesConfiguration(_))));
        assert!(!path.exists());
    }
}
