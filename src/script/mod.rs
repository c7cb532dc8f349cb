//! Figure description to pylab script compiler.
//!
//! A [`Figure`] holds series, axis settings, legend and layout. Compiling it
//! walks the model once and emits a deterministic script.

pub mod backend;
mod compiler;
pub mod data;
pub mod element;
pub mod error;
pub mod figure;
pub mod layout;
pub mod literal;
pub mod naming;
pub mod series;
pub mod style;

pub use data::IntoSeriesData;
pub use error::{ScriptError, ScriptResult};
pub use figure::{Figure, PlotKind, TwinAxis};
pub use layout::{AxisHandle, Layout, Position, SubplotSpec};
pub use series::{
    BarSeries, Categories, ErrorBandSeries, LineSeries, MatrixSeries, Series, SeriesRender,
};
pub use style::{Color, StyleConfig};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::script::data::IntoSeriesData;
    pub use crate::script::element::{AxisConfig, Legend, LegendPosition};
    pub use crate::script::error::{ScriptError, ScriptResult};
    pub use crate::script::figure::{Figure, PlotKind, TwinAxis};
    pub use crate::script::layout::SubplotSpec;
    pub use crate::script::series::{
        BarSeries, ErrorBandSeries, LineSeries, MatrixSeries, Series, SeriesRender,
    };
    pub use crate::script::style::{Color, StyleConfig};
}
