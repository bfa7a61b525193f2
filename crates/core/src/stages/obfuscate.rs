//! Binary hardening against reverse engineering.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::config::{Config, FailurePolicy};
use crate::context::RunContext;
use crate::error::{Error, Result};
use crate::pipeline::Stage;
use crate::process;

/// Protection options passed through to the tool unchanged.
const PROTECTION_FLAGS: &[&str] = &[
    "-antitamp",
    "1",
    "-anti_debug",
    "1",
    "-hide_calls",
    "1",
    "-hide_calls_internals",
    "1",
    "-control_flow",
    "1",
    "-flow_level",
    "9",
    "-resourceencryption",
    "1",
    "-antistrong",
    "1",
    "-virtualization",
    "1",
    "-necrobit",
    "1",
    "-mapping_file",
    "1",
];

/// Hardens the reference platform's binaries, then redistributes the
/// protected auxiliaries into every platform's output directory.
///
/// Only the first platform's primary binary is hardened in place, but all
/// platforms ship the same hardened auxiliary binaries, so the protected
/// copies are **copied**, never moved, over each platform's unprotected
/// versions.
pub struct ObfuscateStage;

impl Stage for ObfuscateStage {
    fn name(&self) -> &'static str {
        "obfuscate"
    }

    fn enabled(&self, config: &Config) -> bool {
        config.obfuscation.enabled
    }

    fn run(&self, ctx: &mut RunContext<'_>) -> Result<()> {
        let config = ctx.config;
        let ob = &config.obfuscation;

        let Some(reference) = ctx.platforms.first() else {
            return Ok(());
        };
        if !reference.state.is_compiled() {
            // Compile already marked the run degraded.
            warn!("reference platform did not compile, skipping obfuscation");
            return Ok(());
        }
        let content = reference.target.output_dir.clone();

        let files_arg = ob
            .protected_binaries
            .iter()
            .map(|name| content.join(name).display().to_string())
            .collect::<Vec<_>>()
            .join(";");

        let mut args = vec![
            "-licensed".to_string(),
            "-file".to_string(),
            content.join(&ob.primary_binary).display().to_string(),
            "-files".to_string(),
            files_arg,
        ];
        args.extend(PROTECTION_FLAGS.iter().map(|flag| flag.to_string()));

        info!(tool = %ob.tool, "hardening reference platform binaries");
        let run = process::run(&ob.tool, &args, ctx.workspace.root())?;
        if !run.success {
            eprintln!("{}", run.output.trim_end());
            match ob.on_failure {
                FailurePolicy::Abort => {
                    return Err(Error::ToolFailed {
                        tool: ob.tool.clone(),
                        code: run.code,
                        output: run.output,
                    });
                }
                FailurePolicy::Warn => {
                    warn!(
                        code = ?run.code,
                        "protection tool failed, shipping unprotected auxiliaries"
                    );
                    ctx.degraded = true;
                    return Ok(());
                }
            }
        }

        for name in &ob.protected_binaries {
            let secured = secure_output_path(&content, name);
            if !secured.exists() {
                return Err(Error::ArtifactMissing { path: secured });
            }

            for platform in &ctx.platforms {
                if !platform.state.is_compiled() {
                    continue;
                }
                fs::copy(&secured, platform.target.output_dir.join(name))?;
            }
        }

        info!("protected binaries redistributed to all platforms");
        Ok(())
    }
}

/// Directory the protection tool deposits a binary's hardened copy into:
/// `Vortex.Server.Client.dll` lands in `Vortex.Server.Client_Secure/`.
pub(crate) fn secure_dir(content_dir: &Path, file_name: &str) -> PathBuf {
    let stem = Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name);
    content_dir.join(format!("{}_Secure", stem))
}

fn secure_output_path(content_dir: &Path, file_name: &str) -> PathBuf {
    secure_dir(content_dir, file_name).join(file_name)
}
