//! Source retrieval.

use tracing::info;

use crate::config::Config;
use crate::context::RunContext;
use crate::error::{Error, Result};
use crate::pipeline::Stage;
use crate::process;

/// Clones the client repository at the requested branch.
///
/// The source-control client is an opaque external command; a non-zero
/// exit here is fatal to the whole run since every later stage consumes
/// the checkout.
pub struct FetchStage;

impl Stage for FetchStage {
    fn name(&self) -> &'static str {
        "fetch"
    }

    fn enabled(&self, config: &Config) -> bool {
        config.fetch_source
    }

    fn run(&self, ctx: &mut RunContext<'_>) -> Result<()> {
        let branch = ctx.branch()?.to_string();
        let source_dir = ctx.workspace.source_dir();

        info!(branch = %branch, repository = %ctx.config.repository, "cloning source");

        let args = [
            "clone".to_string(),
            "--recurse-submodules".to_string(),
            "-b".to_string(),
            branch,
            "--single-branch".to_string(),
            ctx.config.repository.clone(),
            source_dir.display().to_string(),
        ];

        let run = process::run(&ctx.config.source_control, &args, ctx.workspace.root())?;
        if !run.success {
            eprintln!("{}", run.output.trim_end());
            return Err(Error::ToolFailed {
                tool: ctx.config.source_control.clone(),
                code: run.code,
                output: run.output,
            });
        }

        Ok(())
    }
}
