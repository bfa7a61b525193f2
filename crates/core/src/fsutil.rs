//! Filesystem helpers shared by stages.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::Result;

/// Reset a directory to empty, creating it if needed.
///
/// Destructive and irreversible: prior contents are removed without backup.
/// Precondition: no concurrent readers of the tree.
pub fn reset_dir(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_dir_all(path)?;
    }
    fs::create_dir_all(path)?;

    debug!(path = %path.display(), "directory reset");
    Ok(())
}

/// Remove a directory tree if it exists; absence is fine.
pub fn remove_dir_if_present(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_dir_all(path)?;
    }
    Ok(())
}
