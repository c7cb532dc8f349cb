//! Series types and their script fragments.

mod bar;
mod band;
mod line;
mod matrix;

pub use bar::{BarSeries, Categories};
pub use band::ErrorBandSeries;
pub use line::LineSeries;
pub use matrix::MatrixSeries;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::script::backend::ScriptWriter;
use crate::script::error::ScriptResult;
use crate::script::layout::{AxisHandle, Position};
use crate::script::literal::py_str;
use crate::script::style::Color;

/// Trait for series that can be rendered into script text.
pub trait SeriesRender {
    /// Get the label for this series (for legends and subplot titles).
    fn label(&self) -> Option<&str>;

    /// Get the subplot cell of this series.
    fn position(&self) -> Position;

    /// Get the explicit color, if any.
    fn color(&self) -> Option<&Color> {
        None
    }

    /// True when the series adds at least one entry to a legend.
    fn has_legend_entry(&self) -> bool {
        self.label().is_some_and(|l| !l.is_empty())
    }

    /// Check that the required values are present and consistent.
    fn validate(&self) -> ScriptResult<()>;

    /// Append the statements drawing this series on `ax`.
    fn render(&self, ax: &AxisHandle, out: &mut ScriptWriter) -> ScriptResult<()>;
}

/// One data trace or visual element of a figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Series {
    Line(LineSeries),
    Scatter(LineSeries),
    Bar(BarSeries),
    ErrorBand(ErrorBandSeries),
    Matrix(MatrixSeries),
}

impl Series {
    /// True when the series carries a non-empty label or band label.
    pub fn has_label(&self) -> bool {
        self.inner().has_legend_entry()
    }

    fn inner(&self) -> &dyn SeriesRender {
        match self {
            Series::Line(s) | Series::Scatter(s) => s as &dyn SeriesRender,
            Series::Bar(s) => s,
            Series::ErrorBand(s) => s,
            Series::Matrix(s) => s,
        }
    }
}

impl SeriesRender for Series {
    fn label(&self) -> Option<&str> {
        self.inner().label()
    }

    fn position(&self) -> Position {
        self.inner().position()
    }

    fn color(&self) -> Option<&Color> {
        self.inner().color()
    }

    fn has_legend_entry(&self) -> bool {
        self.inner().has_legend_entry()
    }

    fn validate(&self) -> ScriptResult<()> {
        self.inner().validate()
    }

    fn render(&self, ax: &AxisHandle, out: &mut ScriptWriter) -> ScriptResult<()> {
        match self {
            Series::Scatter(s) => s.render_scatter(ax, out),
            other => other.inner().render(ax, out),
        }
    }
}

impl From<LineSeries> for Series {
    fn from(s: LineSeries) -> Self {
        Series::Line(s)
    }
}

impl From<BarSeries> for Series {
    fn from(s: BarSeries) -> Self {
        Series::Bar(s)
    }
}

impl From<ErrorBandSeries> for Series {
    fn from(s: ErrorBandSeries) -> Self {
        Series::ErrorBand(s)
    }
}

impl From<MatrixSeries> for Series {
    fn from(s: MatrixSeries) -> Self {
        Series::Matrix(s)
    }
}

/// `, label='...'` when the label is set and non-empty.
pub(crate) fn label_kwarg(label: Option<&str>) -> String {
    match label {
        Some(l) if !l.is_empty() => format!(", label={}", py_str(l)),
        _ => String::new(),
    }
}

/// `, color=...` when a color is set.
pub(crate) fn color_kwarg(color: Option<&Color>) -> String {
    color
        .map(|c| format!(", color={}", c.to_py()))
        .unwrap_or_default()
}
