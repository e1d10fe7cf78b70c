//! Authoritative battle state and its initialization.

use super::combatant::{CombatantSpec, CombatantState};
use super::common::{CombatantId, Side};
use super::roster::Rosters;
use crate::config::BattleConfig;
use crate::error::{BattleError, ErrorSeverity};

/// Turn bookkeeping: whose turn it is, which roster slot is acting, and the
/// round counter.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnState {
    /// Side whose roster is currently acting.
    pub active_side: Side,

    /// Roster index of the combatant currently taking its turn.
    pub active_index: usize,

    /// Full-cycle counter; increments every time the turn switches back to
    /// the player side.
    pub round: u32,

    /// Sequential action identifier, incremented once per resolved action.
    ///
    /// Feeds the deterministic seed mixing so every roll in a battle is
    /// unique and replayable.
    pub nonce: u64,
}

impl TurnState {
    pub fn new() -> Self {
        Self {
            active_side: Side::Player,
            active_index: 0,
            round: 1,
            nonce: 0,
        }
    }
}

impl Default for TurnState {
    fn default() -> Self {
        Self::new()
    }
}

/// Terminal status of a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    InProgress,
    PlayerWon,
    EnemyWon,
}

impl Outcome {
    /// The winning side, if the battle is over.
    pub fn winner(self) -> Option<Side> {
        match self {
            Outcome::InProgress => None,
            Outcome::PlayerWon => Some(Side::Player),
            Outcome::EnemyWon => Some(Side::Enemy),
        }
    }
}

/// Setup-time description of a battle: the two ordered rosters.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleSetup {
    pub player: Vec<CombatantSpec>,
    pub enemy: Vec<CombatantSpec>,
}

/// Errors surfaced while building the initial battle state.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SetupError {
    #[error("{side} roster is empty")]
    EmptyRoster { side: Side },

    #[error("{side} roster has {len} members, maximum is {max}")]
    PartyTooLarge { side: Side, len: usize, max: usize },

    #[error("combatant '{name}' has {len} skills, maximum is {max}")]
    TooManySkills { name: String, len: usize, max: usize },
}

impl BattleError for SetupError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }
}

/// Canonical snapshot of a battle.
///
/// Created once at battle start and mutated only through
/// [`crate::engine::BattleEngine`]. Terminal once `outcome` leaves
/// [`Outcome::InProgress`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleState {
    /// RNG seed for deterministic rolls.
    ///
    /// Set once at initialization and never modified. Combined with
    /// `turn.nonce` to derive a unique seed for each roll.
    pub seed: u64,

    pub turn: TurnState,
    pub rosters: Rosters,
    pub outcome: Outcome,
}

impl BattleState {
    /// Builds the initial state from two ordered rosters.
    ///
    /// Ids are allocated sequentially, player roster first. The battle
    /// opens on the player side with its first roster member active.
    pub fn initialize(setup: &BattleSetup, seed: u64) -> Result<Self, SetupError> {
        Self::validate_side(Side::Player, &setup.player)?;
        Self::validate_side(Side::Enemy, &setup.enemy)?;

        let mut rosters = Rosters::default();
        let mut next_id = 0u32;
        for (side, specs) in [(Side::Player, &setup.player), (Side::Enemy, &setup.enemy)] {
            let roster = rosters.side_mut(side);
            for spec in specs.iter() {
                roster.push(CombatantState::new(CombatantId(next_id), side, spec));
                next_id += 1;
            }
        }

        Ok(Self {
            seed,
            turn: TurnState::new(),
            rosters,
            outcome: Outcome::InProgress,
        })
    }

    fn validate_side(side: Side, specs: &[CombatantSpec]) -> Result<(), SetupError> {
        if specs.is_empty() {
            return Err(SetupError::EmptyRoster { side });
        }
        if specs.len() > BattleConfig::MAX_PARTY_SIZE {
            return Err(SetupError::PartyTooLarge {
                side,
                len: specs.len(),
                max: BattleConfig::MAX_PARTY_SIZE,
            });
        }
        for spec in specs {
            if spec.skills.len() > BattleConfig::MAX_SKILLS {
                return Err(SetupError::TooManySkills {
                    name: spec.name.clone(),
                    len: spec.skills.len(),
                    max: BattleConfig::MAX_SKILLS,
                });
            }
        }
        Ok(())
    }

    // ========================================================================
    // Query Surface
    // ========================================================================

    /// The combatant currently taking (or about to take) its turn.
    pub fn active_combatant(&self) -> &CombatantState {
        self.rosters
            .side(self.turn.active_side)
            .get(self.turn.active_index)
            .expect("active_index always points at a roster slot")
    }

    /// Looks up any combatant by id.
    pub fn combatant(&self, id: CombatantId) -> Option<&CombatantState> {
        self.rosters.combatant(id)
    }

    /// Ids of the living members of one side, in roster order.
    pub fn living_members(&self, side: Side) -> Vec<CombatantId> {
        self.rosters.side(side).living().map(|c| c.id).collect()
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// True once the battle reached a terminal outcome.
    pub fn is_over(&self) -> bool {
        self.outcome != Outcome::InProgress
    }
}
