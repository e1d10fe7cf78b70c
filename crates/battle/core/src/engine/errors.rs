//! Error types for action submission and turn processing.

use crate::error::{BattleError, ErrorSeverity};
use crate::state::CombatantId;

/// Errors surfaced while validating or applying an action intent.
///
/// All variants are local, recoverable rejections: the battle state is left
/// untouched and the caller may submit a corrected intent. Internal
/// invariant violations (e.g. a dead combatant selected as active) are
/// bugs in turn processing and assert instead.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionError {
    /// Action submitted for a combatant that is not awaiting input.
    #[error("combatant {actor} may not act; the turn belongs to {active}")]
    InvalidTurn {
        actor: CombatantId,
        active: CombatantId,
    },

    /// Target is dead, unknown, or on the wrong side for the skill's
    /// resolved shape.
    #[error("invalid target {target}")]
    InvalidTarget { target: CombatantId },

    /// No skill is bound at the given index on the caster.
    #[error("no skill bound at index {index}")]
    UnknownSkill { index: usize },

    /// Skill cost exceeds the caster's current mana. The engine rejects
    /// rather than silently downgrading to a basic attack; policies are
    /// expected to pre-filter.
    #[error("skill costs {cost} mana, only {available} available")]
    InsufficientMana { cost: u32, available: u32 },

    /// Any mutating call after the battle reached a terminal outcome.
    #[error("battle already reached a terminal outcome")]
    TerminalState,
}

impl BattleError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        use ActionError::*;
        match self {
            InvalidTurn { .. } | InsufficientMana { .. } | TerminalState => {
                ErrorSeverity::Recoverable
            }
            InvalidTarget { .. } | UnknownSkill { .. } => ErrorSeverity::Validation,
        }
    }
}
