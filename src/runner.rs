//! Writing compiled scripts to disk and running them through Python.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use anyhow::{Context, Result};
use log::{info, warn};

use crate::config::RunnerConfig;
use crate::script::naming::script_name;

/// Captured result of one interpreter run.
#[derive(Debug)]
pub struct RunOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl RunOutput {
    pub fn success(&self) -> bool {
        self.status.success()
    }
}

/// Write `script` behind the interpreter header and return the path written.
///
/// The name is sanitized (`:` becomes `-`, `.py` is appended when missing).
/// On Unix the file is marked executable.
pub fn write_script(script: &str, config: &RunnerConfig) -> Result<PathBuf> {
    let path = PathBuf::from(script_name(Some(&config.script_name)));
    let file = File::create(&path)
        .with_context(|| format!("Failed to create script {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    writeln!(writer, "#!{}", config.python)?;
    writeln!(writer, "# -*- coding: utf-8 -*-")?;
    writeln!(writer, "from __future__ import unicode_literals")?;
    writer.write_all(script.as_bytes())?;
    writer.flush()?;
    drop(writer);

    make_executable(&path)?;
    info!("Wrote script to {}", path.display());
    Ok(path)
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = std::fs::metadata(path)?.permissions();
    perms.set_mode(perms.mode() | 0o755);
    std::fs::set_permissions(path, perms)
        .with_context(|| format!("Failed to mark {} executable", path.display()))
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}

/// Write the script and run it with the configured interpreter, waiting for
/// it to finish.
pub fn run_script(script: &str, config: &RunnerConfig) -> Result<RunOutput> {
    let path = write_script(script, config)?;

    let mut command = Command::new(&config.python);
    command.arg(&path);
    if let Some(dir) = &config.working_dir {
        command.current_dir(dir);
    }
    info!("Running {} {}", config.python, path.display());

    let output = command
        .output()
        .with_context(|| format!("Failed to spawn plotting process {}", config.python))?;
    let result = RunOutput {
        status: output.status,
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    };

    if result.success() {
        info!("Plotting process finished: {}", result.status);
    } else {
        warn!(
            "Plotting process exited with {}: {}",
            result.status,
            result.stderr.trim()
        );
    }
    Ok(result)
}
