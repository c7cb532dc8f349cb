//! Bar series.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::script::backend::ScriptWriter;
use crate::script::data::IntoSeriesData;
use crate::script::error::{ScriptError, ScriptResult};
use crate::script::layout::{AxisHandle, Position};
use crate::script::literal::{ordinal, py_list, py_num, py_str_list};
use crate::script::series::{SeriesRender, label_kwarg};
use crate::script::style::Color;

/// Bar positions along the independent axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum Categories {
    /// Numeric positions, used as given
    Numeric(Vec<f64>),
    /// Text categories; bars go at ordinal positions and these become tick labels
    Labels(Vec<String>),
}

/// Vertical or horizontal bars.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BarSeries {
    /// Bar heights (or lengths when horizontal)
    pub values: Option<Vec<f64>>,
    /// Bar positions or category names
    pub categories: Option<Categories>,
    /// Per-bar error magnitudes
    pub errors: Option<Vec<f64>>,
    /// Bar width; unset or zero means 1.0
    pub width: Option<f64>,
    /// Draw horizontal bars
    pub horizontal: bool,
    /// Label for legend
    pub label: Option<String>,
    /// Bar color; defaults to blue
    pub color: Option<Color>,
    /// Subplot cell
    pub position: Position,
}

impl BarSeries {
    /// Create a bar series from its heights.
    pub fn new(values: impl IntoSeriesData) -> Self {
        BarSeries {
            values: Some(values.into_series_data()),
            ..Default::default()
        }
    }

    /// Set numeric bar positions.
    pub fn positions(mut self, positions: impl IntoSeriesData) -> Self {
        self.categories = Some(Categories::Numeric(positions.into_series_data()));
        self
    }

    /// Set text categories.
    pub fn categories<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.categories = Some(Categories::Labels(
            names.into_iter().map(Into::into).collect(),
        ));
        self
    }

    /// Set per-bar errors.
    pub fn errors(mut self, errors: impl IntoSeriesData) -> Self {
        self.errors = Some(errors.into_series_data());
        self
    }

    /// Set the bar width.
    pub fn width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    /// Draw horizontal bars.
    pub fn horizontal(mut self) -> Self {
        self.horizontal = true;
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

    fn heights(&self) -> ScriptResult<&[f64]> {
        self.values
            .as_deref()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ScriptError::series("bar values should not be empty"))
    }

    fn effective_width(&self) -> f64 {
        match self.width {
            Some(w) if w.abs() >= f64::EPSILON => w,
            _ => 1.0,
        }
    }

    /// Draw call, error keyword and category axis for the orientation.
    fn verbs(&self) -> (&'static str, &'static str, char) {
        if self.horizontal {
            ("barh", "xerr", 'y')
        } else {
            ("bar", "yerr", 'x')
        }
    }

    fn check_len(&self, what: &str, len: usize, expected: usize) -> ScriptResult<()> {
        if len != expected {
            return Err(ScriptError::series(format!(
                "bar {} has {} entries but there are {} values",
                what, len, expected
            )));
        }
        Ok(())
    }
}

impl SeriesRender for BarSeries {
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
        let n = self.heights()?.len();
        match &self.categories {
            Some(Categories::Numeric(p)) => self.check_len("positions", p.len(), n)?,
            Some(Categories::Labels(l)) => self.check_len("categories", l.len(), n)?,
            None => {}
        }
        if let Some(errors) = &self.errors {
            self.check_len("errors", errors.len(), n)?;
        }
        Ok(())
    }

    fn render(&self, ax: &AxisHandle, out: &mut ScriptWriter) -> ScriptResult<()> {
        self.validate()?;
        let heights = self.heights()?;
        let (verb, err_kw, tick_axis) = self.verbs();

        let positions = match &self.categories {
            Some(Categories::Numeric(p)) => p.clone(),
            _ => ordinal(heights.len()),
        };
        let errors = self
            .errors
            .as_deref()
            .map(|e| format!(", {}={}", err_kw, py_list(e)))
            .unwrap_or_default();
        let color = self.color.clone().unwrap_or_else(Color::blue);

        out.line(format!(
            "lines.append({}.{}({}, {}, {}, color={}{}{}))",
            ax.var(),
            verb,
            py_list(&positions),
            py_list(heights),
            py_num(self.effective_width()),
            color.to_py(),
            errors,
            label_kwarg(self.label.as_deref())
        ));

        // Category names go on ticks pinned to the bar positions.
        if let Some(Categories::Labels(names)) = &self.categories {
            out.line(format!("{}.set_{}ticks({})", ax.var(), tick_axis, py_list(&positions)));
            out.line(format!(
                "{}.set_{}ticklabels({})",
                ax.var(),
                tick_axis,
                py_str_list(names)
            ));
        }
        Ok(())
    }
}
