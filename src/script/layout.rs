//! Axis addressing for single, twin and subplot layouts.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::script::error::{ScriptError, ScriptResult};
use crate::script::literal::py_bool;

/// Grid of subplots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SubplotSpec {
    pub rows: usize,
    pub columns: usize,
    #[serde(default)]
    pub share_x: bool,
    #[serde(default)]
    pub share_y: bool,
}

impl SubplotSpec {
    pub fn new(rows: usize, columns: usize) -> Self {
        SubplotSpec {
            rows,
            columns,
            share_x: false,
            share_y: false,
        }
    }

    pub fn share_x(mut self, share: bool) -> Self {
        self.share_x = share;
        self
    }

    pub fn share_y(mut self, share: bool) -> Self {
        self.share_y = share;
        self
    }

    /// Grid creation statement.
    pub fn creation(&self) -> String {
        format!(
            "fig, axs = subplots({}, {}, sharex={}, sharey={})",
            self.rows,
            self.columns,
            py_bool(self.share_x),
            py_bool(self.share_y)
        )
    }

    /// Index expression of the cell at `position`.
    ///
    /// 2-D indexing only when both dimensions exceed 1; matplotlib squeezes
    /// single rows/columns to a 1-D array and a 1x1 grid to a bare axes.
    pub fn cell(&self, position: Position) -> ScriptResult<String> {
        let Position { row, column } = position;
        let out_of_grid = ScriptError::InvalidGridAddress {
            rows: self.rows,
            columns: self.columns,
            row,
            column,
        };
        if row >= self.rows || column >= self.columns {
            return Err(out_of_grid);
        }
        match (self.rows, self.columns) {
            (r, c) if r > 1 && c > 1 => Ok(format!("axs[{}, {}]", row, column)),
            (1, c) if c > 1 => Ok(format!("axs[{}]", column)),
            (r, 1) if r > 1 => Ok(format!("axs[{}]", row)),
            (1, 1) => Ok("axs".to_string()),
            _ => Err(out_of_grid),
        }
    }

    /// Fails when the grid has no addressable cells.
    pub fn validate(&self) -> ScriptResult<()> {
        if self.rows == 0 || self.columns == 0 {
            return Err(ScriptError::InvalidGridAddress {
                rows: self.rows,
                columns: self.columns,
                row: 0,
                column: 0,
            });
        }
        Ok(())
    }
}

/// Subplot cell a series is drawn into.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(default)]
pub struct Position {
    pub row: usize,
    pub column: usize,
}

impl Position {
    pub fn new(row: usize, column: usize) -> Self {
        Position { row, column }
    }
}

/// Drawing surface a series fragment targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AxisHandle {
    /// The single axes of a plain figure
    Primary,
    /// Secondary axes sharing the x-range of the primary one
    Twin,
    /// A subplot cell, holding its index expression into `axs`
    Cell(String),
}

impl AxisHandle {
    /// Python variable the draw calls go through.
    ///
    /// Cells are bound to `ax` before their series are rendered.
    pub fn var(&self) -> &'static str {
        match self {
            AxisHandle::Primary | AxisHandle::Cell(_) => "ax",
            AxisHandle::Twin => "ax2",
        }
    }

    /// Binding statement needed before drawing into a cell.
    pub fn binding(&self) -> Option<String> {
        match self {
            AxisHandle::Cell(expr) => Some(format!("ax = {}", expr)),
            _ => None,
        }
    }
}

/// Axes arrangement of a whole figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Single,
    Twin,
    Grid(SubplotSpec),
}

impl Layout {
    /// Determine the layout from the figure's subplot and twin settings.
    pub fn new(subplots: Option<SubplotSpec>, twin: bool) -> ScriptResult<Self> {
        match (subplots, twin) {
            (Some(_), true) => Err(ScriptError::UnsupportedLayoutCombination),
            (Some(spec), false) => {
                spec.validate()?;
                Ok(Layout::Grid(spec))
            }
            (None, true) => Ok(Layout::Twin),
            (None, false) => Ok(Layout::Single),
        }
    }

    /// Resolve the handle for a primary-axis series at `position`.
    pub fn resolve(&self, position: Position) -> ScriptResult<AxisHandle> {
        match self {
            Layout::Single | Layout::Twin => Ok(AxisHandle::Primary),
            Layout::Grid(spec) => spec.cell(position).map(AxisHandle::Cell),
        }
    }

    /// Resolve the handle for a series of the twin group.
    pub fn resolve_twin(&self) -> ScriptResult<AxisHandle> {
        match self {
            Layout::Twin => Ok(AxisHandle::Twin),
            Layout::Grid(_) => Err(ScriptError::UnsupportedLayoutCombination),
            Layout::Single => Ok(AxisHandle::Primary),
        }
    }

    pub fn is_grid(&self) -> bool {
        matches!(self, Layout::Grid(_))
    }
}
