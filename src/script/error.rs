//! Error types for script compilation.

use std::fmt;
use std::io;

/// The main error type for script compilation.
#[derive(Debug)]
pub enum ScriptError {
    /// A series is missing required values, or its values contradict each other
    InvalidSeriesConfiguration(String),
    /// Subplots and a twin axis were requested on the same figure
    UnsupportedLayoutCombination,
    /// Grid shape is not addressable, or a series points outside the grid
    InvalidGridAddress {
        rows: usize,
        columns: usize,
        row: usize,
        column: usize,
    },
    /// Error while writing a compiled script
    Io(io::Error),
}

impl ScriptError {
    pub(crate) fn series(msg: impl Into<String>) -> Self {
        ScriptError::InvalidSeriesConfiguration(msg.into())
    }
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::InvalidSeriesConfiguration(msg) => {
                write!(f, "Invalid series configuration: {}", msg)
            }
            ScriptError::UnsupportedLayoutCombination => {
                write!(f, "Simultaneous subplots and twin axis are not supported")
            }
            ScriptError::InvalidGridAddress {
                rows,
                columns,
                row,
                column,
            } => write!(
                f,
                "Invalid row/column specification: cell ({}, {}) in a {}x{} grid",
                row, column, rows, columns
            ),
            ScriptError::Io(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl std::error::Error for ScriptError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScriptError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for ScriptError {
    fn from(err: io::Error) -> Self {
        ScriptError::Io(err)
    }
}

/// Result type alias for script compilation.
pub type ScriptResult<T> = Result<T, ScriptError>;
