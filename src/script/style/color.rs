//! Series colors.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Color argument for a draw call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    /// Next color of the seaborn palette cycle; needs styling enabled
    Palette,
    /// Any matplotlib color spec (e.g. "r", "C2", "#ff8800")
    Named(String),
}

impl Color {
    /// Default bar color.
    pub fn blue() -> Self {
        Color::Named("b".to_string())
    }

    /// Python expression for this color.
    pub fn to_py(&self) -> String {
        match self {
            Color::Palette => "next(palette)".to_string(),
            Color::Named(name) => format!("'{}'", name),
        }
    }

    pub fn is_palette(&self) -> bool {
        matches!(self, Color::Palette)
    }
}

impl From<&str> for Color {
    fn from(s: &str) -> Self {
        Color::Named(s.to_string())
    }
}

impl From<String> for Color {
    fn from(s: String) -> Self {
        Color::Named(s)
    }
}
