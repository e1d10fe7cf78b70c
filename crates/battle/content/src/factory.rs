//! Assembles battle setups from the loaded catalogs.

use std::path::Path;

use battle_core::{BattleSetup, CombatantSpec, SkillDef};

use crate::loaders::{ActorLoader, CombatantTemplate, ConditionLoader, LoadResult, SkillLoader};

/// Resolved content catalogs, ready to produce [`BattleSetup`]s.
pub struct ContentFactory {
    skills: Vec<SkillDef>,
    templates: Vec<(String, CombatantTemplate)>,
}

impl ContentFactory {
    /// Loads `conditions.ron`, `skills.ron` and `actors.ron` from a content
    /// directory.
    pub fn load_dir(dir: &Path) -> LoadResult<Self> {
        let conditions = ConditionLoader::load(&dir.join("conditions.ron"))?;
        let skills = SkillLoader::load(&dir.join("skills.ron"), &conditions)?;
        let templates = ActorLoader::load(&dir.join("actors.ron"))?;
        Ok(Self { skills, templates })
    }

    /// Looks up a skill definition by name.
    pub fn skill(&self, name: &str) -> Option<&SkillDef> {
        self.skills.iter().find(|s| s.name == name)
    }

    /// Resolves a template into a setup-ready combatant spec.
    pub fn spec(&self, template: &str) -> LoadResult<CombatantSpec> {
        let (name, template) = self
            .templates
            .iter()
            .find(|(name, _)| name == template)
            .ok_or_else(|| anyhow::anyhow!("Unknown combatant template '{}'", template))?;

        let mut skills = Vec::with_capacity(template.skills.len());
        for skill_name in &template.skills {
            let skill = self.skill(skill_name).cloned().ok_or_else(|| {
                anyhow::anyhow!(
                    "Combatant template '{}' references unknown skill '{}'",
                    name,
                    skill_name
                )
            })?;
            skills.push(skill);
        }

        Ok(CombatantSpec {
            name: name.clone(),
            stats: template.stats,
            skills,
        })
    }

    /// Builds a full battle setup from template names, in roster order.
    pub fn setup(&self, player: &[&str], enemy: &[&str]) -> LoadResult<BattleSetup> {
        Ok(BattleSetup {
            player: player
                .iter()
                .map(|name| self.spec(name))
                .collect::<LoadResult<_>>()?,
            enemy: enemy
                .iter()
                .map(|name| self.spec(name))
                .collect::<LoadResult<_>>()?,
        })
    }
}
