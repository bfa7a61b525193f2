//! Artifact hashing and record assembly.

use tracing::{error, info};

use crate::context::RunContext;
use crate::error::Result;
use crate::hash;
use crate::pipeline::Stage;
use crate::platform::PlatformTarget;
use crate::record::{ArtifactEntry, BuildRecord};

/// Hashes every compiled platform's artifact set into build records.
///
/// Platforms that never reached `Compiled` are skipped outright — they
/// produce no record, partial or otherwise. A missing or unreadable
/// artifact voids that platform's record the same way and degrades the
/// run; the other platforms still get theirs.
pub struct HashStage;

impl Stage for HashStage {
    fn name(&self) -> &'static str {
        "hash"
    }

    fn run(&self, ctx: &mut RunContext<'_>) -> Result<()> {
        let config = ctx.config;
        let version = ctx.version()?.to_string();

        let mut records = Vec::new();
        let mut any_failed = false;

        for platform in &ctx.platforms {
            if !platform.state.is_compiled() {
                info!(platform = %platform.target.id, "not compiled, no record");
                continue;
            }

            match hash_artifact_set(&platform.target, &config.artifacts) {
                Ok(entries) => {
                    info!(platform = %platform.target.id, "artifacts hashed");
                    records.push(BuildRecord::new(&version, &platform.target.id, entries));
                }
                Err(e) => {
                    error!(platform = %platform.target.id, error = %e, "hashing failed, no record");
                    any_failed = true;
                }
            }
        }

        ctx.records.extend(records);
        if any_failed {
            ctx.degraded = true;
        }
        Ok(())
    }
}

/// Hash one platform's artifact set, in the set's defined order.
///
/// Fails on the first missing or unreadable artifact; callers get either
/// the complete entry list or nothing.
pub fn hash_artifact_set(
    target: &PlatformTarget,
    artifacts: &[String],
) -> Result<Vec<ArtifactEntry>> {
    let mut entries = Vec::with_capacity(artifacts.len());

    for name in artifacts {
        let digest = hash::hash_artifact(&target.output_dir.join(name))?;
        entries.push(ArtifactEntry {
            name: name.clone(),
            digest,
        });
    }

    Ok(entries)
}
