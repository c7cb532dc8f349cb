pub mod config;
pub mod runner;
pub mod schema;
pub mod script;
