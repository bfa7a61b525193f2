//! Build identity resolution.

use tracing::info;

use crate::context::{RunContext, ValueKind};
use crate::error::{Error, Result};
use crate::pipeline::Stage;

/// Resolves the version label and source branch once per run.
///
/// Both come from the injected [`crate::context::ValueProvider`] and are
/// immutable for the rest of the run.
pub struct AcquireStage;

impl Stage for AcquireStage {
    fn name(&self) -> &'static str {
        "acquire"
    }

    fn run(&self, ctx: &mut RunContext<'_>) -> Result<()> {
        let version = ctx.provider.supply(ValueKind::Version)?;
        if version.trim().is_empty() {
            return Err(Error::EmptyValue("version"));
        }

        let branch = ctx.provider.supply(ValueKind::Branch)?;
        if branch.trim().is_empty() {
            return Err(Error::EmptyValue("branch"));
        }

        info!(version = %version, branch = %branch, "build identity resolved");
        ctx.version = Some(version);
        ctx.branch = Some(branch);
        Ok(())
    }
}
