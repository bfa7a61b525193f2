//! Per-platform compilation fan-out.

use tracing::{error, info};

use crate::context::RunContext;
use crate::error::Result;
use crate::fsutil;
use crate::pipeline::Stage;
use crate::platform::BuildState;
use crate::process;
use crate::version;

/// Compiles the client once per platform target.
///
/// Fan-out is independent: a platform whose toolchain invocation fails is
/// marked `Failed` and the remaining platforms are still attempted; the
/// run ends degraded instead of aborting. Only a toolchain that cannot be
/// started at all aborts the run.
pub struct CompileStage;

impl Stage for CompileStage {
    fn name(&self) -> &'static str {
        "compile"
    }

    fn run(&self, ctx: &mut RunContext<'_>) -> Result<()> {
        let config = ctx.config;
        let version_label = ctx.version()?.to_string();
        let source_dir = ctx.workspace.source_dir();
        let root = ctx.workspace.root().to_path_buf();

        // Every platform embeds the same stamp, so a bad project file fails
        // the run before any platform is attempted.
        version::stamp_version_file(&source_dir.join(&config.version_file), &version_label)?;

        let configuration = if config.public_branch { "Public" } else { "Release" };
        let mut any_failed = false;

        for platform in &mut ctx.platforms {
            info!(platform = %platform.target.id, "compiling");

            platform.state = BuildState::Preparing;
            fsutil::reset_dir(&platform.target.output_dir)?;

            platform.state = BuildState::Compiling;
            let args = [
                "publish".to_string(),
                source_dir.display().to_string(),
                "-f".to_string(),
                config.framework.clone(),
                "-r".to_string(),
                platform.target.id.clone(),
                "-c".to_string(),
                configuration.to_string(),
                "-o".to_string(),
                platform.target.output_dir.display().to_string(),
                "--self-contained".to_string(),
            ];

            let run = process::run(&config.toolchain, &args, &root)?;
            if run.success {
                platform.state = BuildState::Compiled;
                info!(platform = %platform.target.id, "compiled");
            } else {
                platform.state = BuildState::Failed;
                any_failed = true;
                eprintln!("{}", run.output.trim_end());
                error!(platform = %platform.target.id, code = ?run.code, "toolchain failed");
            }
        }

        if any_failed {
            ctx.degraded = true;
        }
        Ok(())
    }
}
