//! Line and scatter series.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::script::backend::ScriptWriter;
use crate::script::data::IntoSeriesData;
use crate::script::error::{ScriptError, ScriptResult};
use crate::script::layout::{AxisHandle, Position};
use crate::script::literal::{ordinal, py_list};
use crate::script::series::{SeriesRender, color_kwarg, label_kwarg};
use crate::script::style::Color;

/// A line (or scatter) trace through x/y values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct LineSeries {
    /// Independent values
    pub x: Option<Vec<f64>>,
    /// Dependent values
    pub y: Option<Vec<f64>>,
    /// Label for legend
    pub label: Option<String>,
    /// Explicit color
    pub color: Option<Color>,
    /// Subplot cell
    pub position: Position,
}

/// Values to draw: an explicit x sequence, or `None` for an implicit index.
type Points<'a> = (Option<&'a [f64]>, &'a [f64]);

impl LineSeries {
    /// Create a series from x and y data.
    pub fn new(x: impl IntoSeriesData, y: impl IntoSeriesData) -> Self {
        LineSeries {
            x: Some(x.into_series_data()),
            y: Some(y.into_series_data()),
            ..Default::default()
        }
    }

    /// Create a series from one sequence, drawn against its index.
    pub fn values(values: impl IntoSeriesData) -> Self {
        LineSeries {
            x: Some(values.into_series_data()),
            ..Default::default()
        }
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

    fn points(&self) -> ScriptResult<Points<'_>> {
        let x = self.x.as_deref().filter(|v| !v.is_empty());
        let y = self.y.as_deref().filter(|v| !v.is_empty());
        match (x, y) {
            (Some(x), Some(y)) if x.len() != y.len() => Err(ScriptError::series(format!(
                "x has {} values but y has {}",
                x.len(),
                y.len()
            ))),
            (Some(x), Some(y)) => Ok((Some(x), y)),
            (Some(only), None) | (None, Some(only)) => Ok((None, only)),
            (None, None) => Err(ScriptError::series("x and y should not both be empty")),
        }
    }

    fn kwargs(&self) -> String {
        format!(
            "{}{}",
            color_kwarg(self.color.as_ref()),
            label_kwarg(self.label.as_deref())
        )
    }

    /// Draw as a scatter plot; a lone sequence gets an explicit index.
    pub(crate) fn render_scatter(&self, ax: &AxisHandle, out: &mut ScriptWriter) -> ScriptResult<()> {
        let (x, y) = self.points()?;
        let x = x.map(<[f64]>::to_vec).unwrap_or_else(|| ordinal(y.len()));
        out.line(format!(
            "lines.append({}.scatter({}, {}{}))",
            ax.var(),
            py_list(&x),
            py_list(y),
            self.kwargs()
        ));
        Ok(())
    }
}

impl SeriesRender for LineSeries {
    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    fn position(&self) -> Position {
        self.position
    }

    fn color(&self) -> Option<&Color> {
        self.color.as_ref()
    }

    fn validate(&self) -> ScriptResult<()> {
        self.points().map(|_| ())
    }

    fn render(&self, ax: &AxisHandle, out: &mut ScriptWriter) -> ScriptResult<()> {
        let args = match self.points()? {
            (Some(x), y) => format!("{}, {}", py_list(x), py_list(y)),
            (None, y) => py_list(y),
        };
        out.line(format!("lines += {}.plot({}{})", ax.var(), args, self.kwargs()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(series: &LineSeries, ax: &AxisHandle) -> Vec<String> {
        let mut out = ScriptWriter::new();
        series.render(ax, &mut out).unwrap();
        out.lines().to_vec()
    }

    #[test]
    fn test_line_with_label() {
        let s = LineSeries::new([0, 1, 2], [0, 1, 4]).label("sq");
        assert_eq!(
            render(&s, &AxisHandle::Primary),
            ["lines += ax.plot([0, 1, 2], [0, 1, 4], label='sq')"]
        );
    }

    #[test]
    fn test_single_sequence_uses_implicit_index() {
        let s = LineSeries::values([3, 5]).color("r");
        assert_eq!(
            render(&s, &AxisHandle::Twin),
            ["lines += ax2.plot([3, 5], color='r')"]
        );

        let only_y = LineSeries {
            y: Some(vec![1.0]),
            ..Default::default()
        };
        assert_eq!(render(&only_y, &AxisHandle::Primary), ["lines += ax.plot([1])"]);
    }

    #[test]
    fn test_scatter_single_sequence() {
        let s = LineSeries::values([7, 8]).label("pts");
        let mut out = ScriptWriter::new();
        s.render_scatter(&AxisHandle::Primary, &mut out).unwrap();
        assert_eq!(
            out.lines(),
            ["lines.append(ax.scatter([0, 1], [7, 8], label='pts'))"]
        );
    }

    #[test]
    fn test_invalid_configurations() {
        let empty = LineSeries::default();
        assert!(matches!(
            empty.validate(),
            Err(ScriptError::InvalidSeriesConfiguration(_))
        ));

        let mismatched = LineSeries::new([1, 2, 3], [1, 2]);
        let err = mismatched.validate().unwrap_err();
        assert!(err.to_string().contains("x has 3 values but y has 2"));

        let mut out = ScriptWriter::new();
        assert!(empty.render(&AxisHandle::Primary, &mut out).is_err());
        assert!(out.is_empty());
    }
}
