//! Run state threaded through the pipeline.
//!
//! All mutable orchestrator state lives in an explicit [`RunContext`] owned
//! by the driver, not in process-wide globals.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::platform::{BuildState, PlatformTarget};
use crate::record::BuildRecord;

/// What a [`ValueProvider`] is being asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Version label stamped into every artifact.
    Version,
    /// Source branch to build from.
    Branch,
    /// One-time authentication code for the distribution platform.
    AuthCode,
}

/// Supplies human-provided values.
///
/// The CLI backs this with console prompts; tests supply fixed strings
/// without simulating console I/O.
pub trait ValueProvider {
    fn supply(&mut self, kind: ValueKind) -> Result<String>;
}

/// Workspace paths derived from the orchestrator root.
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Source checkout directory.
    pub fn source_dir(&self) -> PathBuf {
        self.root.join("source")
    }

    /// Root of the per-platform output directories.
    pub fn build_dir(&self) -> PathBuf {
        self.root.join("build")
    }

    pub fn scripts_dir(&self) -> PathBuf {
        self.root.join("scripts")
    }

    pub fn descriptor_template(&self) -> PathBuf {
        self.scripts_dir().join("app_build.template.vdf")
    }

    /// Fixed path the rendered deployment descriptor is written to.
    pub fn descriptor_path(&self) -> PathBuf {
        self.scripts_dir().join("app_build.vdf")
    }

    pub fn config_path(&self) -> PathBuf {
        self.root.join(Config::FILE_NAME)
    }
}

/// Per-platform progress inside a run.
#[derive(Debug)]
pub struct PlatformBuild {
    pub target: PlatformTarget,
    pub state: BuildState,
}

/// All mutable state for one release run.
///
/// Owned exclusively by the pipeline driver; stages receive it by mutable
/// reference, one at a time. Nothing here is shared across threads.
pub struct RunContext<'a> {
    pub config: &'a Config,
    pub workspace: Workspace,
    pub provider: &'a mut dyn ValueProvider,
    pub(crate) version: Option<String>,
    pub(crate) branch: Option<String>,
    /// Platform targets in build order; the first is the reference platform.
    pub platforms: Vec<PlatformBuild>,
    /// Records accumulate in platform order as hashing succeeds.
    pub records: Vec<BuildRecord>,
    /// Set when a per-platform step failed but the run continued.
    pub degraded: bool,
}

impl<'a> RunContext<'a> {
    pub fn new(config: &'a Config, root: &Path, provider: &'a mut dyn ValueProvider) -> Self {
        let workspace = Workspace::new(root);
        let build_dir = workspace.build_dir();

        let platforms = config
            .platforms
            .iter()
            .map(|id| PlatformBuild {
                target: PlatformTarget::new(id, &build_dir),
                state: BuildState::Pending,
            })
            .collect();

        Self {
            config,
            workspace,
            provider,
            version: None,
            branch: None,
            platforms,
            records: Vec::new(),
            degraded: false,
        }
    }

    /// Version label; only valid once the acquire stage has run.
    pub fn version(&self) -> Result<&str> {
        self.version.as_deref().ok_or(Error::ValueUnset("version"))
    }

    /// Source branch; only valid once the acquire stage has run.
    pub fn branch(&self) -> Result<&str> {
        self.branch.as_deref().ok_or(Error::ValueUnset("branch"))
    }

    pub fn compiled_count(&self) -> usize {
        self.platforms.iter().filter(|p| p.state.is_compiled()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.platforms.iter().filter(|p| p.state.is_failed()).count()
    }
}
