//! Axis configuration.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::script::literal::py_num;

/// Label and limits of one axis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AxisConfig {
    /// Axis label
    pub label: Option<String>,
    /// Manual limits (min, max)
    pub limits: Option<(f64, f64)>,
}

impl AxisConfig {
    /// Create a new axis configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the label.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the limits.
    pub fn limits(mut self, min: f64, max: f64) -> Self {
        self.limits = Some((min, max));
        self
    }

    /// Label text, treating an empty label as unset.
    pub fn label_text(&self) -> Option<&str> {
        self.label.as_deref().filter(|l| !l.is_empty())
    }

    /// Limits as a list literal, e.g. `[0, 10]`.
    pub fn limits_literal(&self) -> Option<String> {
        self.limits
            .map(|(min, max)| format!("[{}, {}]", py_num(min), py_num(max)))
    }
}

/// Which tick set a `tick_params` call targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickSet {
    Major,
    Minor,
}

impl TickSet {
    pub fn name(&self) -> &'static str {
        match self {
            TickSet::Major => "major",
            TickSet::Minor => "minor",
        }
    }
}
