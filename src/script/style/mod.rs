//! Styling module.
//!
//! Series colors and the seaborn style flags used by the preamble.

pub mod color;
pub mod theme;

pub use color::Color;
pub use theme::StyleConfig;
