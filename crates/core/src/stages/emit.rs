//! Build record emission.

use tracing::info;

use crate::context::RunContext;
use crate::error::Result;
use crate::pipeline::Stage;

/// Prints the accumulated build records, one line per platform.
///
/// Submission to the build registry is an external collaborator; this
/// stage is the hand-off point and also logs each record's structured
/// form.
pub struct EmitStage;

impl Stage for EmitStage {
    fn name(&self) -> &'static str {
        "emit"
    }

    fn run(&self, ctx: &mut RunContext<'_>) -> Result<()> {
        for record in &ctx.records {
            println!("{}", record);
            info!(
                platform = %record.platform,
                version = %record.version,
                artifacts = record.artifacts.len(),
                "build record"
            );
        }

        info!(count = ctx.records.len(), "build records emitted");
        Ok(())
    }
}
