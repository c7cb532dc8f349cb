//! Line with a shaded error band.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::script::backend::ScriptWriter;
use crate::script::data::IntoSeriesData;
use crate::script::error::{ScriptError, ScriptResult};
use crate::script::layout::{AxisHandle, Position};
use crate::script::literal::{ordinal, py_list, py_num};
use crate::script::series::{SeriesRender, label_kwarg};
use crate::script::style::Color;

/// Default transparency of the band.
pub const DEFAULT_ALPHA: f64 = 0.1;

/// A centre line with a filled band spanning `[y - e, y + e]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ErrorBandSeries {
    /// Independent values; become `y` when no dependent values are given
    pub x: Option<Vec<f64>>,
    /// Dependent values
    pub y: Option<Vec<f64>>,
    /// Error magnitudes
    pub errors: Option<Vec<f64>>,
    /// Band transparency; defaults to 0.1
    pub alpha: Option<f64>,
    /// Legend label for the band itself
    pub error_label: Option<String>,
    /// Label for legend
    pub label: Option<String>,
    /// Color of both the line and the band
    pub color: Option<Color>,
    /// Subplot cell
    pub position: Position,
}

impl ErrorBandSeries {
    /// Create a band from x, y and error values.
    pub fn new(
        x: impl IntoSeriesData,
        y: impl IntoSeriesData,
        errors: impl IntoSeriesData,
    ) -> Self {
        ErrorBandSeries {
            x: Some(x.into_series_data()),
            y: Some(y.into_series_data()),
            errors: Some(errors.into_series_data()),
            ..Default::default()
        }
    }

    /// Create a band along a single sequence, drawn against its index.
    pub fn along(values: impl IntoSeriesData, errors: impl IntoSeriesData) -> Self {
        ErrorBandSeries {
            x: Some(values.into_series_data()),
            errors: Some(errors.into_series_data()),
            ..Default::default()
        }
    }

    /// Set the band transparency.
    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = Some(alpha);
        self
    }

    /// Label the band in the legend.
    pub fn error_label(mut self, label: impl Into<String>) -> Self {
        self.error_label = Some(label.into());
        self
    }

    /// Set the label for the legend.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the color.
    pub fn color(mut self, color: impl Into<Color>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Place the series in a subplot cell.
    pub fn at(mut self, row: usize, column: usize) -> Self {
        self.position = Position::new(row, column);
        self
    }

    /// Resolve (x, y, e), synthesizing x from the index when y is absent.
    fn arrays(&self) -> ScriptResult<(Vec<f64>, Vec<f64>, &[f64])> {
        let x = self
            .x
            .as_deref()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ScriptError::series("error band needs independent values"))?;
        let (x, y) = match self.y.as_deref().filter(|v| !v.is_empty()) {
            Some(y) if y.len() != x.len() => {
                return Err(ScriptError::series(format!(
                    "x has {} values but y has {}",
                    x.len(),
                    y.len()
                )));
            }
            Some(y) => (x.to_vec(), y.to_vec()),
            None => (ordinal(x.len()), x.to_vec()),
        };
        let e = self
            .errors
            .as_deref()
            .ok_or_else(|| ScriptError::series("error band needs error values"))?;
        if e.len() != y.len() {
            return Err(ScriptError::series(format!(
                "error band has {} errors for {} values",
                e.len(),
                y.len()
            )));
        }
        Ok((x, y, e))
    }
}

impl SeriesRender for ErrorBandSeries {
    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    fn position(&self) -> Position {
        self.position
    }

    fn color(&self) -> Option<&Color> {
        self.color.as_ref()
    }

    fn has_legend_entry(&self) -> bool {
        [self.label.as_deref(), self.error_label.as_deref()]
            .into_iter()
            .flatten()
            .any(|l| !l.is_empty())
    }

    fn validate(&self) -> ScriptResult<()> {
        self.arrays().map(|_| ())
    }

    fn render(&self, ax: &AxisHandle, out: &mut ScriptWriter) -> ScriptResult<()> {
        let (x, y, e) = self.arrays()?;
        let ax = ax.var();

        // Line and band share one palette draw.
        let color = match &self.color {
            Some(Color::Palette) => {
                out.line("c = next(palette)");
                ", color=c".to_string()
            }
            Some(named) => format!(", color={}", named.to_py()),
            None => String::new(),
        };

        out.line(format!("x = array({})", py_list(&x)));
        out.line(format!("y = array({})", py_list(&y)));
        out.line(format!("e = array({})", py_list(e)));
        out.line(format!(
            "lines += {}.plot(x, y{}{})",
            ax,
            color,
            label_kwarg(self.label.as_deref())
        ));

        let fill = format!(
            "{}.fill_between(x, y-e, y+e, alpha={}{}{})",
            ax,
            py_num(self.alpha.unwrap_or(DEFAULT_ALPHA)),
            color,
            label_kwarg(self.error_label.as_deref())
        );
        if self.error_label.as_deref().is_some_and(|l| !l.is_empty()) {
            out.line(format!("lines.append({})", fill));
        } else {
            out.line(fill);
        }
        Ok(())
    }
}
