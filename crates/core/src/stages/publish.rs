//! Distribution-platform upload.

use std::fs;
use std::io;
use std::path::PathBuf;

use tracing::{info, warn};

use crate::config::Config;
use crate::context::{RunContext, ValueKind, Workspace};
use crate::error::{Error, Result};
use crate::fsutil;
use crate::pipeline::Stage;
use crate::process;
use crate::stages::obfuscate::secure_dir;

/// Placeholder the descriptor template carries for the version string.
pub const DESCRIPTOR_PLACEHOLDER: &str = "{build_desc}";

/// Renders the deployment descriptor and uploads through the platform CLI.
///
/// A failed CLI invocation is terminal for the run; there is no retry.
pub struct PublishStage;

impl Stage for PublishStage {
    fn name(&self) -> &'static str {
        "publish"
    }

    fn enabled(&self, config: &Config) -> bool {
        config.deploy.enabled
    }

    fn run(&self, ctx: &mut RunContext<'_>) -> Result<()> {
        let config = ctx.config;
        let version = ctx.version()?.to_string();

        let descriptor = render_descriptor(&ctx.workspace, &version)?;
        let code = ctx.provider.supply(ValueKind::AuthCode)?;

        info!(tool = %config.deploy.tool, "uploading build");

        let args = [
            "+login".to_string(),
            config.deploy.username.clone(),
            config.deploy.password.clone(),
            code,
            "+run_app_build_http".to_string(),
            descriptor.display().to_string(),
            "+quit".to_string(),
        ];

        let run = process::run(&config.deploy.tool, &args, ctx.workspace.root())?;
        if !run.success {
            eprintln!("{}", run.output.trim_end());
            return Err(Error::ToolFailed {
                tool: config.deploy.tool.clone(),
                code: run.code,
                output: run.output,
            });
        }

        cleanup_secure_dirs(ctx);
        info!("upload complete");
        Ok(())
    }
}

/// Substitute the version into the descriptor template and write it to the
/// fixed descriptor path, replacing any previous render.
fn render_descriptor(workspace: &Workspace, version: &str) -> Result<PathBuf> {
    let template_path = workspace.descriptor_template();
    let template = fs::read_to_string(&template_path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => Error::DescriptorTemplateMissing {
            path: template_path.clone(),
        },
        _ => Error::Io(e),
    })?;

    if !template.contains(DESCRIPTOR_PLACEHOLDER) {
        return Err(Error::PlaceholderMissing {
            path: template_path,
            placeholder: DESCRIPTOR_PLACEHOLDER,
        });
    }

    let rendered = template.replace(DESCRIPTOR_PLACEHOLDER, version);
    let path = workspace.descriptor_path();
    fs::write(&path, rendered)?;

    info!(descriptor = %path.display(), "descriptor rendered");
    Ok(path)
}

/// Drop the protection tool's transient working directories from the
/// reference platform's output. Best-effort: they simply aren't there when
/// obfuscation was skipped.
fn cleanup_secure_dirs(ctx: &RunContext<'_>) {
    let Some(reference) = ctx.platforms.first() else {
        return;
    };
    let content = &reference.target.output_dir;
    let ob = &ctx.config.obfuscation;

    let mut names = vec![ob.primary_binary.as_str()];
    names.extend(ob.protected_binaries.iter().map(String::as_str));

    for name in names {
        let dir = secure_dir(content, name);
        if let Err(e) = fsutil::remove_dir_if_present(&dir) {
            warn!(dir = %dir.display(), error = %e, "could not remove protection work dir");
        }
    }
}
