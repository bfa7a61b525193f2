//! Implementation of the `depot status` command.

use std::path::Path;

use anyhow::Result;

use depot_core::{Config, Workspace};

use crate::output;

/// Show the resolved configuration and platform targets.
pub fn cmd_status(root: &Path) -> Result<()> {
  let workspace = Workspace::new(root);
  let config = match Config::load_or_bootstrap(&workspace.config_path()) {
    Ok(c) => c,
    Err(e) => {
      output::print_error(&e.to_string());
      std::process::exit(1);
    }
  };

  println!("depot v{}", env!("CARGO_PKG_VERSION"));
  println!();
  output::print_stat("Root", &workspace.root().display().to_string());
  output::print_stat("Repository", &config.repository);
  output::print_stat("Toolchain", &config.toolchain);
  output::print_stat("Framework", &config.framework);
  output::print_stat("Platforms", &config.platforms.join(", "));
  output::print_stat("Artifacts", &config.artifacts.join(", "));
  println!();
  output::print_stat("Fetch source", enabled_str(config.fetch_source));
  output::print_stat("Obfuscation", enabled_str(config.obfuscation.enabled));
  output::print_stat("Packaging", enabled_str(config.packaging.enabled));
  output::print_stat("Deploy", enabled_str(config.deploy.enabled));

  Ok(())
}

fn enabled_str(enabled: bool) -> &'static str {
  if enabled { "enabled" } else { "disabled" }
}
