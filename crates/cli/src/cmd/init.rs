//! Implementation of the `depot init` command.

use std::path::Path;

use anyhow::{Context, Result, bail};

use depot_core::Config;

use crate::output;

/// Write a template configuration for the operator to fill in.
///
/// # Errors
///
/// Fails if a configuration already exists at the root.
pub fn cmd_init(root: &Path) -> Result<()> {
  let path = root.join(Config::FILE_NAME);
  if path.exists() {
    bail!("config already exists: {}", path.display());
  }

  Config::default()
    .save(&path)
    .context("Failed to write template configuration")?;

  output::print_success("Template configuration written");
  output::print_stat("Config", &path.display().to_string());
  println!();
  println!("Next steps:");
  println!("  1. Fill in {}", path.display());
  println!("  2. Run: depot run");

  Ok(())
}
