//! Combatant template catalog loader.
//!
//! Templates pair base attributes with skill references by name; the
//! factory resolves them into `CombatantSpec`s at setup time.

use std::path::Path;

use battle_core::BaseStats;
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};

/// Reusable combatant archetype.
#[derive(Debug, Clone, Deserialize)]
pub struct CombatantTemplate {
    #[serde(default)]
    pub stats: BaseStats,
    #[serde(default)]
    pub skills: Vec<String>,
}

/// Loader for the combatant template catalog.
///
/// RON format: `Vec<(String, CombatantTemplate)>`.
pub struct ActorLoader;

impl ActorLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<(String, CombatantTemplate)>> {
        let content = read_file(path)?;
        let templates: Vec<(String, CombatantTemplate)> = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse combatant catalog RON: {}", e))?;
        Ok(templates)
    }
}
