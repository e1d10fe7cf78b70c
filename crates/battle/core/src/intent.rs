//! Action intents: a caller's declared choice, not yet validated.
//!
//! Both the player-facing submission API and AI policies speak in intents;
//! the engine validates and applies them.

use crate::state::CombatantId;

/// A declared action for the active combatant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionIntent {
    /// Plain weapon attack against one combatant.
    Attack { target: CombatantId },

    /// Cast the skill at `skill` (index into the caster's bound skill list)
    /// at a combatant. Skill-specific retargeting may override the target.
    CastSkill { skill: usize, target: CombatantId },
}
