//! Output backends.

mod python;

pub use python::ScriptWriter;
