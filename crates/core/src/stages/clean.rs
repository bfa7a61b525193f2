//! Destructive workspace reset.

use std::fs;

use tracing::info;

use crate::context::RunContext;
use crate::error::Result;
use crate::fsutil;
use crate::pipeline::Stage;

/// Resets the build root (and the source checkout, when it will be
/// re-cloned) and drops any descriptor left over from a previous run.
pub struct CleanStage;

impl Stage for CleanStage {
    fn name(&self) -> &'static str {
        "clean"
    }

    fn run(&self, ctx: &mut RunContext<'_>) -> Result<()> {
        if ctx.config.fetch_source {
            fsutil::reset_dir(&ctx.workspace.source_dir())?;
        }
        fsutil::reset_dir(&ctx.workspace.build_dir())?;

        // A descriptor from a previous run must not survive into this one.
        let descriptor = ctx.workspace.descriptor_path();
        if descriptor.exists() {
            fs::remove_file(&descriptor)?;
        }

        info!("workspace reset");
        Ok(())
    }
}
