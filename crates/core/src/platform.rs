//! Platform targets and per-platform build state.

use std::path::{Path, PathBuf};

/// One (operating system, architecture) combination the client ships for.
#[derive(Debug, Clone)]
pub struct PlatformTarget {
    /// Runtime identifier, e.g. `win-x64`.
    pub id: String,
    /// Output directory the toolchain publishes into. Exactly one per target.
    pub output_dir: PathBuf,
}

impl PlatformTarget {
    pub fn new(id: &str, build_root: &Path) -> Self {
        Self {
            id: id.to_string(),
            output_dir: build_root.join(format!("content-{}", id)),
        }
    }
}

/// Lifecycle of one platform inside the compile fan-out.
///
/// `Preparing` destroys and recreates the output directory; `Failed` keeps
/// whatever the toolchain left behind for inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuildState {
    #[default]
    Pending,
    Preparing,
    Compiling,
    Compiled,
    Failed,
}

impl BuildState {
    pub fn is_compiled(self) -> bool {
        matches!(self, BuildState::Compiled)
    }

    pub fn is_failed(self) -> bool {
        matches!(self, BuildState::Failed)
    }
}
