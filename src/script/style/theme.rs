//! Seaborn styling flags.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Styling options for the preamble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct StyleConfig {
    /// Emit the seaborn import, style and palette lines at all
    pub styling: bool,
    /// Dark background ("dark*") instead of white ("white*")
    pub dark: bool,
    /// Draw a grid ("*grid")
    pub grid: bool,
}

impl StyleConfig {
    /// Seaborn style token: `darkgrid`, `dark`, `whitegrid` or `white`.
    pub fn token(&self) -> String {
        let base = if self.dark { "dark" } else { "white" };
        let grid = if self.grid { "grid" } else { "" };
        format!("{}{}", base, grid)
    }

    /// Styling with the grid switched off; used for matrix displays.
    pub fn without_grid(mut self) -> Self {
        self.grid = false;
        self
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        StyleConfig {
            styling: true,
            dark: true,
            grid: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_tokens() {
        let mut s = StyleConfig::default();
        assert_eq!(s.token(), "darkgrid");
        s.grid = false;
        assert_eq!(s.token(), "dark");
        s.dark = false;
        assert_eq!(s.token(), "white");
        s.grid = true;
        assert_eq!(s.token(), "whitegrid");
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let s: StyleConfig = serde_json::from_str("{\"dark\": false}").unwrap();
        assert!(s.styling);
        assert!(s.grid);
        assert_eq!(s.token(), "whitegrid");
    }
}
