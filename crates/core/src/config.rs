//! Build configuration loading and first-run bootstrap.
//!
//! The configuration lives in `config.json` at the orchestrator root. On
//! first run a template with defaults is written and the run aborts so the
//! operator can fill in credentials and tool paths.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Error, Result};

/// Release-run configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// SSH URL of the client repository.
    pub repository: String,
    /// Whether the run clones the source before compiling. Disable to build
    /// an existing checkout in `source/`.
    pub fetch_source: bool,
    /// Source-control client invoked for the clone.
    pub source_control: String,
    /// Toolchain command used to publish the client.
    pub toolchain: String,
    /// Target framework moniker passed to the toolchain.
    pub framework: String,
    /// Compile with the content-distribution public-branch configuration.
    pub public_branch: bool,
    /// Runtime identifiers to fan out over, in build order. The first entry
    /// is the reference platform for obfuscation.
    pub platforms: Vec<String>,
    /// Project file, relative to the source checkout, carrying the version
    /// element that gets stamped each run.
    pub version_file: String,
    /// Binaries every platform's output directory must contain after
    /// compiling, in hashing order.
    pub artifacts: Vec<String>,
    pub obfuscation: ObfuscationConfig,
    pub packaging: PackagingConfig,
    pub deploy: DeployConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObfuscationConfig {
    pub enabled: bool,
    /// Path to the protection tool executable.
    pub tool: String,
    /// Binary whose code is hardened in place on the reference platform.
    pub primary_binary: String,
    /// Binaries hardened alongside the primary and redistributed to every
    /// platform's output directory.
    pub protected_binaries: Vec<String>,
    /// What a protection-tool failure does to the rest of the run.
    pub on_failure: FailurePolicy,
}

/// Policy for a failed optional tool invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Fail the whole run.
    #[default]
    Abort,
    /// Report the failure, mark the run degraded, continue.
    Warn,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PackagingConfig {
    pub enabled: bool,
    /// Marker file written into each output directory so the distribution
    /// target recognizes a debug/offline build.
    pub marker_file: String,
    pub marker_contents: String,
    /// Archives are named `<prefix>-<version>-<platform>.zip`.
    pub archive_prefix: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DeployConfig {
    pub enabled: bool,
    /// Path to the distribution platform CLI.
    pub tool: String,
    pub username: String,
    pub password: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            repository: "git@github.com:vortexgame/client.git".to_string(),
            fetch_source: true,
            source_control: "git".to_string(),
            toolchain: "dotnet".to_string(),
            framework: "net6.0".to_string(),
            public_branch: true,
            platforms: vec![
                "win-x64".to_string(),
                "linux-x64".to_string(),
                "osx-x64".to_string(),
            ],
            version_file: "Vortex/Vortex.csproj".to_string(),
            artifacts: vec![
                "Vortex.Shared.dll".to_string(),
                "Vortex.API.dll".to_string(),
                "Vortex.Server.Common.dll".to_string(),
                "Vortex.Server.Client.dll".to_string(),
            ],
            obfuscation: ObfuscationConfig::default(),
            packaging: PackagingConfig::default(),
            deploy: DeployConfig::default(),
        }
    }
}

impl Default for ObfuscationConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            tool: String::new(),
            primary_binary: "Vortex.dll".to_string(),
            protected_binaries: vec![
                "Vortex.Server.Client.dll".to_string(),
                "Vortex.Server.Common.dll".to_string(),
            ],
            on_failure: FailurePolicy::Abort,
        }
    }
}

impl Default for PackagingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            marker_file: "steam_appid.txt".to_string(),
            marker_contents: "000000".to_string(),
            archive_prefix: "vortex".to_string(),
        }
    }
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            tool: "steamcmd".to_string(),
            username: String::new(),
            password: String::new(),
        }
    }
}

impl Config {
    pub const FILE_NAME: &'static str = "config.json";

    /// Load the configuration, or bootstrap a template on first run.
    ///
    /// When no file exists yet, a template with defaults is written and
    /// [`Error::ConfigMissing`] is returned so the operator can fill it in
    /// and re-run. An existing file is re-saved after loading so fields
    /// added since it was written appear with their defaults.
    pub fn load_or_bootstrap(path: &Path) -> Result<Config> {
        if !path.exists() {
            let template = Config::default();
            template.save(path)?;
            info!(path = %path.display(), "template config written");
            return Err(Error::ConfigMissing {
                path: path.to_path_buf(),
            });
        }

        let text = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&text).map_err(|e| Error::ConfigInvalid {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.save(path)?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn first_run_writes_template_and_aborts() {
        let temp = tempdir().unwrap();
        let path = temp.path().join(Config::FILE_NAME);

        let result = Config::load_or_bootstrap(&path);
        assert!(matches!(result, Err(Error::ConfigMissing { .. })));
        assert!(path.exists());

        // The template itself must load on the second run.
        let config = Config::load_or_bootstrap(&path).unwrap();
        assert_eq!(config.platforms.len(), 3);
        assert_eq!(config.artifacts.len(), 4);
    }

    #[test]
    fn partial_config_fills_in_defaults() {
        let temp = tempdir().unwrap();
        let path = temp.path().join(Config::FILE_NAME);
        fs::write(&path, r#"{ "toolchain": "dotnet8", "fetch_source": false }"#).unwrap();

        let config = Config::load_or_bootstrap(&path).unwrap();
        assert_eq!(config.toolchain, "dotnet8");
        assert!(!config.fetch_source);
        assert_eq!(config.framework, "net6.0");
        assert_eq!(config.obfuscation.on_failure, FailurePolicy::Abort);
    }

    #[test]
    fn malformed_config_is_invalid() {
        let temp = tempdir().unwrap();
        let path = temp.path().join(Config::FILE_NAME);
        fs::write(&path, "{ not json").unwrap();

        let result = Config::load_or_bootstrap(&path);
        assert!(matches!(result, Err(Error::ConfigInvalid { .. })));
    }

    #[test]
    fn failure_policy_round_trips_snake_case() {
        let json = serde_json::to_string(&FailurePolicy::Warn).unwrap();
        assert_eq!(json, r#""warn""#);

        let parsed: FailurePolicy = serde_json::from_str(r#""abort""#).unwrap();
        assert_eq!(parsed, FailurePolicy::Abort);
    }
}
