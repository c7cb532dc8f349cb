//! Runner configuration.
//!
//! Loaded from a JSON file; every field is optional.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

/// Default interpreter used to run generated scripts.
pub const DEFAULT_PYTHON: &str = "/usr/bin/python";
/// Default location of the generated script.
pub const DEFAULT_SCRIPT_NAME: &str = "/tmp/script.py";

/// Interpreter and script location for running compiled figures
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct RunnerConfig {
    /// Python interpreter path
    pub python: String,
    /// Script file name; `:` is replaced and `.py` appended when missing
    pub script_name: String,
    /// Directory the interpreter runs in; the current directory when unset
    pub working_dir: Option<PathBuf>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        RunnerConfig {
            python: DEFAULT_PYTHON.to_string(),
            script_name: DEFAULT_SCRIPT_NAME.to_string(),
            working_dir: None,
        }
    }
}

impl RunnerConfig {
    /// Load runner configuration from a JSON file
    pub fn load(path: &str) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("Failed to open config {}", path))?;
        let reader = BufReader::new(file);
        let config: RunnerConfig = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config {}", path))?;
        Ok(config)
    }

    /// Override the interpreter when one is given.
    pub fn with_python(mut self, python: Option<&str>) -> Self {
        if let Some(p) = python {
            self.python = p.to_string();
        }
        self
    }

    /// Override the script name when one is given.
    pub fn with_script_name(mut self, name: Option<&str>) -> Self {
        if let Some(n) = name {
            self.script_name = n.to_string();
        }
        self
    }
}
