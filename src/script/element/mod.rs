//! Figure elements configured around the series.

mod axis;
mod legend;

pub use axis::{AxisConfig, TickSet};
pub use legend::{Legend, LegendPosition};
