use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;
mod output;
mod prompts;

/// depot - release-build orchestrator for the Vortex client
#[derive(Parser)]
#[command(name = "depot")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Orchestrator root directory (config, checkout, build output)
  #[arg(long, global = true, default_value = ".")]
  root: PathBuf,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Write a template config.json to fill in
  Init,

  /// Run the release pipeline
  Run {
    /// Version label to stamp into the build; prompted for when omitted
    #[arg(long)]
    build_version: Option<String>,

    /// Source branch to build; prompted for when omitted
    #[arg(long)]
    branch: Option<String>,

    /// One-time distribution auth code; prompted for when omitted
    #[arg(long)]
    auth_code: Option<String>,
  },

  /// Show the resolved configuration and platform targets
  Status,
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  let filter = if cli.verbose {
    EnvFilter::new("debug")
  } else {
    EnvFilter::from_default_env()
  };
  tracing_subscriber::fmt().with_env_filter(filter).without_time().init();

  match cli.command {
    Commands::Init => cmd::cmd_init(&cli.root),
    Commands::Run {
      build_version,
      branch,
      auth_code,
    } => cmd::cmd_run(&cli.root, build_version, branch, auth_code),
    Commands::Status => cmd::cmd_status(&cli.root),
  }
}
