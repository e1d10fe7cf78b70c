//! Rosters: the ordered, fixed membership of each side.
//!
//! A single [`Roster`] type serves both sides; [`Rosters`] indexes the pair
//! by [`Side`] so turn logic is written once instead of per team.

use arrayvec::ArrayVec;

use super::combatant::CombatantState;
use super::common::{CombatantId, Side};
use crate::config::BattleConfig;

/// Ordered, fixed-size sequence of combatants on one side.
///
/// Composition never changes during a battle; members die in place.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Roster {
    members: ArrayVec<CombatantState, { BattleConfig::MAX_PARTY_SIZE }>,
}

impl Roster {
    pub(crate) fn push(&mut self, combatant: CombatantState) {
        self.members.push(combatant);
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CombatantState> {
        self.members.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut CombatantState> {
        self.members.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CombatantState> {
        self.members.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut CombatantState> {
        self.members.iter_mut()
    }

    /// Living members in roster order.
    pub fn living(&self) -> impl Iterator<Item = &CombatantState> {
        self.members.iter().filter(|c| c.is_alive())
    }

    /// True when every member is dead (the side is defeated).
    pub fn is_defeated(&self) -> bool {
        self.members.iter().all(|c| c.is_dead)
    }

    /// Index of the first living member, if any.
    pub fn first_living_index(&self) -> Option<usize> {
        self.members.iter().position(|c| c.is_alive())
    }

    /// Index of the first living member that has not acted this round.
    pub fn first_ready_index(&self) -> Option<usize> {
        self.members
            .iter()
            .position(|c| c.is_alive() && !c.has_acted)
    }

    /// Clears the acted flag for every living member (a fresh round for
    /// this side).
    pub fn reset_acted(&mut self) {
        for member in self.members.iter_mut().filter(|c| c.is_alive()) {
            member.has_acted = false;
        }
    }
}

/// The two rosters of a battle, indexed by [`Side`].
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rosters {
    pub player: Roster,
    pub enemy: Roster,
}

impl Rosters {
    pub fn side(&self, side: Side) -> &Roster {
        match side {
            Side::Player => &self.player,
            Side::Enemy => &self.enemy,
        }
    }

    pub fn side_mut(&mut self, side: Side) -> &mut Roster {
        match side {
            Side::Player => &mut self.player,
            Side::Enemy => &mut self.enemy,
        }
    }

    /// Looks up a combatant anywhere in the battle.
    pub fn combatant(&self, id: CombatantId) -> Option<&CombatantState> {
        self.player
            .iter()
            .chain(self.enemy.iter())
            .find(|c| c.id == id)
    }

    pub fn combatant_mut(&mut self, id: CombatantId) -> Option<&mut CombatantState> {
        self.player
            .iter_mut()
            .chain(self.enemy.iter_mut())
            .find(|c| c.id == id)
    }
}
