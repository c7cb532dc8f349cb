//! Matrix display and Hinton diagrams.

use log::debug;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::script::backend::ScriptWriter;
use crate::script::error::{ScriptError, ScriptResult};
use crate::script::layout::{AxisHandle, Position};
use crate::script::literal::{py_matrix, py_str};
use crate::script::series::SeriesRender;

/// Default color map of matrix displays.
pub const DEFAULT_COLOR_MAP: &str = "gray";

/// A 2-D grid shown as an image, or as a Hinton diagram.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct MatrixSeries {
    /// Row-major values; every row must have the same length
    pub values: Vec<Vec<f64>>,
    /// Color map name; ignored for Hinton diagrams
    pub color_map: Option<String>,
    /// Draw a Hinton diagram (mpltools) instead of a matrix image
    pub hinton: bool,
    /// Label, used as the subplot title
    pub label: Option<String>,
    /// Subplot cell
    pub position: Position,
}

impl MatrixSeries {
    /// Create a matrix display.
    pub fn new(values: Vec<Vec<f64>>) -> Self {
        MatrixSeries {
            values,
            ..Default::default()
        }
    }

    /// Create a Hinton diagram.
    pub fn hinton(values: Vec<Vec<f64>>) -> Self {
        MatrixSeries {
            values,
            hinton: true,
            ..Default::default()
        }
    }

    /// Set the color map.
    pub fn color_map(mut self, name: impl Into<String>) -> Self {
        self.color_map = Some(name.into());
        self
    }

    /// Set the label.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Place the series in a subplot cell.
    pub fn at(mut self, row: usize, column: usize) -> Self {
        self.position = Position::new(row, column);
        self
    }

    /// Grid dimensions as (rows, columns).
    pub fn shape(&self) -> (usize, usize) {
        (self.values.len(), self.values.first().map_or(0, Vec::len))
    }
}

impl SeriesRender for MatrixSeries {
    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    fn position(&self) -> Position {
        self.position
    }

    fn validate(&self) -> ScriptResult<()> {
        let (rows, columns) = self.shape();
        if rows == 0 || columns == 0 {
            return Err(ScriptError::series("matrix should not be empty"));
        }
        if let Some((i, row)) = self
            .values
            .iter()
            .enumerate()
            .find(|(_, r)| r.len() != columns)
        {
            return Err(ScriptError::series(format!(
                "matrix row {} has {} values, expected {}",
                i,
                row.len(),
                columns
            )));
        }
        Ok(())
    }

    fn render(&self, ax: &AxisHandle, out: &mut ScriptWriter) -> ScriptResult<()> {
        self.validate()?;
        if self.hinton {
            if self.color_map.is_some() {
                debug!("Hinton diagrams ignore the color map");
            }
            out.line(format!("x = array({})", py_matrix(&self.values)));
            out.line("from mpltools import special");
            out.line(format!("sca({})", ax.var()));
            out.line("special.hinton(x)");
        } else {
            let cmap = self.color_map.as_deref().unwrap_or(DEFAULT_COLOR_MAP);
            out.line(format!("x = array({})", py_matrix(&self.values)));
            out.line(format!("{}.matshow(x, cmap={})", ax.var(), py_str(cmap)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Vec<Vec<f64>> {
        vec![vec![1.0, -0.5], vec![0.0, 2.0]]
    }

    #[test]
    fn test_matshow() {
        let mut out = ScriptWriter::new();
        MatrixSeries::new(grid())
            .render(&AxisHandle::Primary, &mut out)
            .unwrap();
        assert_eq!(
            out.lines(),
            ["x = array([[1, -0.5], [0, 2]])", "ax.matshow(x, cmap='gray')"]
        );
    }

    #[test]
    fn test_hinton_ignores_color_map() {
        let mut out = ScriptWriter::new();
        MatrixSeries::hinton(grid())
            .color_map("viridis")
            .render(&AxisHandle::Primary, &mut out)
            .unwrap();
        assert_eq!(
            out.lines(),
            [
                "x = array([[1, -0.5], [0, 2]])",
                "from mpltools import special",
                "sca(ax)",
                "special.hinton(x)",
            ]
        );
        assert!(!out.lines().iter().any(|l| l.contains("viridis")));
    }

    #[test]
    fn test_invalid_grids() {
        assert!(MatrixSeries::new(vec![]).validate().is_err());
        assert!(MatrixSeries::new(vec![vec![]]).validate().is_err());
        let ragged = MatrixSeries::new(vec![vec![1.0, 2.0], vec![3.0]]);
        assert!(ragged
            .validate()
            .unwrap_err()
            .to_string()
            .contains("matrix row 1 has 1 values, expected 2"));
        assert_eq!(ragged.shape(), (2, 2));
    }
}
