//! Authoritative battle state representation.
//!
//! This module owns the data structures that describe combatants, rosters
//! and turn bookkeeping. Hosts clone or query this state but mutate it
//! exclusively through [`crate::engine::BattleEngine`].
mod battle;
mod combatant;
mod common;
mod roster;

pub use battle::{BattleSetup, BattleState, Outcome, SetupError, TurnState};
pub use combatant::{CombatantSpec, CombatantState};
pub use common::{CombatantId, PoolKind, ResourcePool, Side};
pub use roster::{Roster, Rosters};
