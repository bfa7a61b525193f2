//! Per-platform build records.

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

use crate::hash::ArtifactDigest;

/// One artifact's name and digest inside a record.
#[derive(Debug, Clone, Serialize)]
pub struct ArtifactEntry {
    pub name: String,
    pub digest: ArtifactDigest,
}

/// Integrity record for one platform's build.
///
/// Created once per platform after its artifact set hashed successfully and
/// never mutated afterwards. The collection across platforms is the run's
/// final output, handed to the build registry.
#[derive(Debug, Clone, Serialize)]
pub struct BuildRecord {
    /// Version label the build was stamped with.
    pub version: String,
    /// Runtime identifier of the platform.
    pub platform: String,
    /// Artifact digests, in the artifact set's defined order.
    pub artifacts: Vec<ArtifactEntry>,
    /// Seconds since the unix epoch at record creation.
    pub created_at: u64,
}

impl BuildRecord {
    pub fn new(version: &str, platform: &str, artifacts: Vec<ArtifactEntry>) -> Self {
        let created_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        Self {
            version: version.to_string(),
            platform: platform.to_string(),
            artifacts,
            created_at,
        }
    }
}

impl fmt::Display for BuildRecord {
    /// The registry's line format: `"<name> <digest> "` repeated per artifact.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.artifacts {
            write!(f, "{} {} ", entry.name, entry.digest)?;
        }
        Ok(())
    }
}
