//! Skill and condition catalog loaders.
//!
//! Conditions load standalone; skills reference conditions by name and are
//! resolved against an already-loaded condition catalog.

use std::path::Path;

use battle_core::{ConditionDef, EffectKind, Formula, SkillDef, TargetShape};
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};

/// Loader for the condition catalog.
///
/// RON format: `Vec<ConditionDef>`.
pub struct ConditionLoader;

impl ConditionLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<ConditionDef>> {
        let content = read_file(path)?;
        let conditions: Vec<ConditionDef> = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse condition catalog RON: {}", e))?;
        Ok(conditions)
    }
}

/// On-disk shape of one skill entry; `condition` names an entry of the
/// condition catalog.
#[derive(Debug, Clone, Deserialize)]
struct SkillSpec {
    name: String,
    kind: EffectKind,
    target_shape: TargetShape,
    chance_to_hit: i32,
    mana_cost: u32,
    power: Formula,
    condition: Option<String>,
}

/// Loader for the skill catalog.
///
/// RON format: `Vec<SkillSpec>` with condition references by name.
pub struct SkillLoader;

impl SkillLoader {
    /// Load the skill catalog, resolving condition names against the given
    /// condition catalog.
    pub fn load(path: &Path, conditions: &[ConditionDef]) -> LoadResult<Vec<SkillDef>> {
        let content = read_file(path)?;
        let raw: Vec<SkillSpec> = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse skill catalog RON: {}", e))?;

        let mut skills = Vec::with_capacity(raw.len());
        for spec in raw {
            let condition = match &spec.condition {
                None => None,
                Some(name) => Some(
                    conditions
                        .iter()
                        .find(|c| &c.name == name)
                        .cloned()
                        .ok_or_else(|| {
                            anyhow::anyhow!(
                                "Skill '{}' references unknown condition '{}'",
                                spec.name,
                                name
                            )
                        })?,
                ),
            };
            skills.push(SkillDef {
                name: spec.name,
                kind: spec.kind,
                target_shape: spec.target_shape,
                chance_to_hit: spec.chance_to_hit,
                mana_cost: spec.mana_cost,
                power: spec.power,
                condition,
            });
        }
        Ok(skills)
    }
}
