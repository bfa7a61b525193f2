//! The fixed stages of the release pipeline.

mod acquire;
mod clean;
mod compile;
mod emit;
mod fetch;
mod hash;
mod obfuscate;
mod package;
mod publish;

pub use acquire::AcquireStage;
pub use clean::CleanStage;
pub use compile::CompileStage;
pub use emit::EmitStage;
pub use fetch::FetchStage;
pub use hash::{HashStage, hash_artifact_set};
pub use obfuscate::ObfuscateStage;
pub use package::PackageStage;
pub use publish::{DESCRIPTOR_PLACEHOLDER, PublishStage};

use crate::pipeline::Stage;

/// The release pipeline in execution order.
pub fn all() -> Vec<Box<dyn Stage>> {
    vec![
        Box::new(CleanStage),
        Box::new(AcquireStage),
        Box::new(FetchStage),
        Box::new(CompileStage),
        Box::new(ObfuscateStage),
        Box::new(HashStage),
        Box::new(EmitStage),
        Box::new(PackageStage),
        Box::new(PublishStage),
    ]
}
