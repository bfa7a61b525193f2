//! Stage sequencing.

use tracing::info;

use crate::config::Config;
use crate::context::RunContext;
use crate::error::Result;

/// One step of the release pipeline.
///
/// Stages are composed into a fixed, ordered list; each decides from
/// configuration whether it participates in a given run. This replaces
/// conditional branches scattered through one long orchestrator function.
pub trait Stage {
    /// Short name used in logs and progress output.
    fn name(&self) -> &'static str;

    /// Whether this stage runs under the given configuration.
    fn enabled(&self, config: &Config) -> bool {
        let _ = config;
        true
    }

    /// Execute the stage against the shared run context.
    fn run(&self, ctx: &mut RunContext<'_>) -> Result<()>;
}

/// Outcome of a full pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every stage and every platform succeeded.
    Success,
    /// The run completed, but at least one platform failed along the way.
    Degraded,
}

/// Drive every enabled stage in order, stopping at the first fatal error.
///
/// Per-platform failures inside a stage do not surface here; they mark the
/// context degraded and the run keeps going.
pub fn run_pipeline(stages: &[Box<dyn Stage>], ctx: &mut RunContext<'_>) -> Result<RunOutcome> {
    for stage in stages {
        if !stage.enabled(ctx.config) {
            info!(stage = stage.name(), "disabled, skipping");
            continue;
        }

        info!(stage = stage.name(), "starting");
        stage.run(ctx)?;
        info!(stage = stage.name(), "complete");
    }

    Ok(if ctx.degraded {
        RunOutcome::Degraded
    } else {
        RunOutcome::Success
    })
}
