//! Legend configuration.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Position of the legend, in matplotlib `loc` code order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum LegendPosition {
    /// Let matplotlib pick the least crowded spot
    #[default]
    Best,
    UpperRight,
    UpperLeft,
    LowerLeft,
    LowerRight,
    Right,
    CenterLeft,
    CenterRight,
    LowerCenter,
    UpperCenter,
    Center,
}

impl LegendPosition {
    /// matplotlib integer location code.
    pub fn loc(&self) -> u8 {
        match self {
            LegendPosition::Best => 0,
            LegendPosition::UpperRight => 1,
            LegendPosition::UpperLeft => 2,
            LegendPosition::LowerLeft => 3,
            LegendPosition::LowerRight => 4,
            LegendPosition::Right => 5,
            LegendPosition::CenterLeft => 6,
            LegendPosition::CenterRight => 7,
            LegendPosition::LowerCenter => 8,
            LegendPosition::UpperCenter => 9,
            LegendPosition::Center => 10,
        }
    }
}

/// Legend settings shared by every legend call of a figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Legend {
    /// Position of the legend
    pub position: LegendPosition,
    /// Font size of the entries
    pub font_size: f64,
}

impl Legend {
    /// Create a legend at the default position.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the position.
    pub fn position(mut self, position: LegendPosition) -> Self {
        self.position = position;
        self
    }

    /// Keyword arguments shared by all legend calls.
    pub fn kwargs(&self) -> String {
        format!(
            "fontsize={}, loc={}",
            crate::script::literal::py_num(self.font_size),
            self.position.loc()
        )
    }
}

impl Default for Legend {
    fn default() -> Self {
        Legend {
            position: LegendPosition::Best,
            font_size: 14.0,
        }
    }
}
