//! Blocking external command execution.
//!
//! Every external tool the pipeline drives (source-control client,
//! toolchain, obfuscator, distribution CLI) goes through [`run`]. The
//! orchestrator suspends until the child exits; there is no timeout, so a
//! hung tool hangs the run.

use std::path::Path;
use std::process::Command;

use tracing::{debug, info};

use crate::error::{Error, Result};

/// Captured outcome of one external command.
#[derive(Debug)]
pub struct RunOutput {
    /// Whether the command exited with code zero.
    pub success: bool,
    /// Exit code, when the process terminated normally.
    pub code: Option<i32>,
    /// Stdout in full, then stderr. Interleaving between the two streams is
    /// not preserved.
    pub output: String,
}

/// Run an external command to completion, capturing stdout and stderr.
///
/// A non-zero exit is a normal outcome reported through
/// [`RunOutput::success`] with the combined output available for
/// diagnostics. Only failing to start the process at all (tool missing,
/// permission denied) is an error.
pub fn run<S: AsRef<str>>(command: &str, args: &[S], working_dir: &Path) -> Result<RunOutput> {
    let args: Vec<&str> = args.iter().map(AsRef::as_ref).collect();

    info!(command = %command, "running external command");
    debug!(args = %args.join(" "), working_dir = %working_dir.display(), "spawn parameters");

    let output = Command::new(command)
        .args(&args)
        .current_dir(working_dir)
        .output()
        .map_err(|e| Error::ToolNotFound {
            tool: command.to_string(),
            source: e,
        })?;

    let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
    combined.push_str(&String::from_utf8_lossy(&output.stderr));

    Ok(RunOutput {
        success: output.status.success(),
        code: output.status.code(),
        output: combined,
    })
}
