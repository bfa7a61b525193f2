//! Implementation of the `depot run` command.
//!
//! Drives the full release pipeline and prints a per-platform summary.
//! The process exits non-zero when the run aborted or finished degraded.

use std::path::Path;

use anyhow::Result;
use owo_colors::{OwoColorize, Stream};
use tracing::info;

use depot_core::platform::BuildState;
use depot_core::{Config, RunContext, RunOutcome, run_pipeline, stages};

use crate::output::{self, symbols};
use crate::prompts::ConsoleProvider;

pub fn cmd_run(
  root: &Path,
  build_version: Option<String>,
  branch: Option<String>,
  auth_code: Option<String>,
) -> Result<()> {
  let config = match Config::load_or_bootstrap(&root.join(Config::FILE_NAME)) {
    Ok(c) => c,
    Err(e) => {
      output::print_error(&e.to_string());
      std::process::exit(1);
    }
  };

  info!(root = %root.display(), "starting release run");

  let mut provider = ConsoleProvider::new(build_version, branch, auth_code);
  let mut ctx = RunContext::new(&config, root, &mut provider);

  let outcome = run_pipeline(&stages::all(), &mut ctx);

  println!();
  for platform in &ctx.platforms {
    let symbol = match platform.state {
      BuildState::Compiled => symbols::SUCCESS
        .if_supports_color(Stream::Stdout, |s| s.green())
        .to_string(),
      BuildState::Failed => symbols::ERROR
        .if_supports_color(Stream::Stdout, |s| s.red())
        .to_string(),
      _ => symbols::INFO
        .if_supports_color(Stream::Stdout, |s| s.dimmed())
        .to_string(),
    };
    println!("  {} {} ({})", symbol, platform.target.id, state_label(platform.state));
  }
  output::print_stat("Compiled", &ctx.compiled_count().to_string());
  output::print_stat("Failed", &ctx.failed_count().to_string());
  output::print_stat("Records emitted", &ctx.records.len().to_string());

  match outcome {
    Ok(RunOutcome::Success) => {
      output::print_success("Release complete");
      Ok(())
    }
    Ok(RunOutcome::Degraded) => {
      output::print_warning("Release completed with failures");
      std::process::exit(1);
    }
    Err(e) => {
      output::print_error(&e.to_string());
      std::process::exit(1);
    }
  }
}

fn state_label(state: BuildState) -> &'static str {
  match state {
    BuildState::Pending => "pending",
    BuildState::Preparing => "preparing",
    BuildState::Compiling => "compiling",
    BuildState::Compiled => "compiled",
    BuildState::Failed => "failed",
  }
}
