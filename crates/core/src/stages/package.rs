//! Per-platform archive packaging.

use std::fs;

use tracing::info;

use crate::archive;
use crate::config::Config;
use crate::context::RunContext;
use crate::error::Result;
use crate::pipeline::Stage;

/// Archives each compiled platform's output directory.
///
/// The marker file goes in first so the distribution target can recognize
/// a debug/offline build, then the whole tree is zipped under a name
/// derived from version and platform.
pub struct PackageStage;

impl Stage for PackageStage {
    fn name(&self) -> &'static str {
        "package"
    }

    fn enabled(&self, config: &Config) -> bool {
        config.packaging.enabled
    }

    fn run(&self, ctx: &mut RunContext<'_>) -> Result<()> {
        let config = ctx.config;
        let version = ctx.version()?.to_string();

        for platform in &ctx.platforms {
            if !platform.state.is_compiled() {
                continue;
            }
            let out = &platform.target.output_dir;

            fs::write(out.join(&config.packaging.marker_file), &config.packaging.marker_contents)?;

            let archive_name = format!(
                "{}-{}-{}.zip",
                config.packaging.archive_prefix, version, platform.target.id
            );
            let archive_path = ctx.workspace.root().join(&archive_name);
            archive::zip_dir(out, &archive_path)?;

            info!(platform = %platform.target.id, archive = %archive_name, "packaged");
        }

        Ok(())
    }
}
