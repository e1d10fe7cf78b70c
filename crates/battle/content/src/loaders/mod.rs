//! RON catalog loaders.

mod actors;
mod skills;

pub use actors::{ActorLoader, CombatantTemplate};
pub use skills::{ConditionLoader, SkillLoader};

use std::path::Path;

/// Result alias used by all content loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Reads a content file to a string with path context on failure.
pub fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read content file {}: {}", path.display(), e))
}
