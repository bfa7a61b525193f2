//! Error types for depot-core.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while driving a release run.
///
/// Failures local to one platform (a compile or a hash) are caught by the
/// stage that observed them and recorded against that platform only; every
/// other variant is fatal to the whole run.
#[derive(Debug, Error)]
pub enum Error {
    #[error(
        "config file not found at {}; a template has been written, fill it in and re-run",
        path.display()
    )]
    ConfigMissing { path: PathBuf },

    #[error("failed to parse config {}: {source}", path.display())]
    ConfigInvalid {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to serialize config: {0}")]
    ConfigSerialize(#[from] serde_json::Error),

    #[error("could not start `{tool}`: {source}")]
    ToolNotFound { tool: String, source: std::io::Error },

    #[error("`{tool}` exited with status {code:?}")]
    ToolFailed {
        tool: String,
        code: Option<i32>,
        output: String,
    },

    #[error("artifact not found: {}", path.display())]
    ArtifactMissing { path: PathBuf },

    #[error("failed to read artifact {}: {source}", path.display())]
    ArtifactUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(
        "version file {} has no version element or property group to add one to",
        path.display()
    )]
    VersionFileMalformed { path: PathBuf },

    #[error("output directory {} is missing or empty, nothing to package", path.display())]
    EmptyOutputDir { path: PathBuf },

    #[error("failed to write archive {}: {message}", path.display())]
    Archive { path: PathBuf, message: String },

    #[error("descriptor template not found: {}", path.display())]
    DescriptorTemplateMissing { path: PathBuf },

    #[error(
        "descriptor template {} does not contain the {placeholder} placeholder",
        path.display()
    )]
    PlaceholderMissing {
        path: PathBuf,
        placeholder: &'static str,
    },

    #[error("cannot prompt for {0} in non-interactive mode; pass it as a flag")]
    NonInteractive(String),

    #[error("{0} must not be empty")]
    EmptyValue(&'static str),

    #[error("{0} was not acquired before it was needed")]
    ValueUnset(&'static str),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, Error>;
