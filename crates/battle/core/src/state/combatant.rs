//! Per-combatant state and the mutations the engine performs on it.
//!
//! # Invariants
//!
//! - `is_dead` becomes true exactly when `hp.current` reaches zero and never
//!   reverts, even if the corpse is later healed by an area effect.
//! - At most one active [`ConditionState`] exists per distinct condition
//!   name; re-infliction refreshes the remaining duration instead of
//!   stacking a second instance.

use arrayvec::ArrayVec;

use super::common::{CombatantId, PoolKind, ResourcePool, Side};
use crate::config::BattleConfig;
use crate::event::{BattleEvent, EventQueue};
use crate::skill::{BoundCondition, ConditionState, EffectKind, SkillDef, SkillState};
use crate::stats::{BaseStats, DerivedStats};

/// Setup-time description of one combatant: a display name, base attributes
/// and the skill definitions to bind.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantSpec {
    pub name: String,
    pub stats: BaseStats,
    pub skills: Vec<SkillDef>,
}

/// Complete state of a single combatant.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantState {
    pub id: CombatantId,
    pub side: Side,
    pub name: String,

    // === SSOT: assigned at setup, immutable afterwards ===
    pub stats: BaseStats,
    pub derived: DerivedStats,

    // === Mutable battle state ===
    pub hp: ResourcePool,
    pub mp: ResourcePool,
    pub skills: ArrayVec<SkillState, { BattleConfig::MAX_SKILLS }>,
    pub conditions: ArrayVec<ConditionState, { BattleConfig::MAX_CONDITIONS }>,

    /// Whether this combatant already acted in the current round of its side.
    pub has_acted: bool,

    /// Death latch; set when hp first reaches zero.
    pub is_dead: bool,
}

impl CombatantState {
    /// Builds a combatant from its spec, deriving stats and binding skill
    /// power against the owner's attributes.
    pub fn new(id: CombatantId, side: Side, spec: &CombatantSpec) -> Self {
        let derived = DerivedStats::from_base(&spec.stats);
        let skills = spec
            .skills
            .iter()
            .cloned()
            .map(|def| SkillState::bind(def, &spec.stats))
            .collect();

        Self {
            id,
            side,
            name: spec.name.clone(),
            stats: spec.stats,
            derived,
            hp: ResourcePool::full(derived.hp_max),
            mp: ResourcePool::full(derived.mp_max),
            skills,
            conditions: ArrayVec::new(),
            has_acted: false,
            is_dead: false,
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        !self.is_dead
    }

    /// Bound skill at `index`, if any.
    pub fn skill(&self, index: usize) -> Option<&SkillState> {
        self.skills.get(index)
    }

    /// True if a condition with this name is currently held.
    pub fn has_condition(&self, name: &str) -> bool {
        self.conditions.iter().any(|c| c.def.name == name)
    }

    // ========================================================================
    // Resource Mutation
    // ========================================================================

    /// Applies damage to health, emitting the change and (once) death.
    pub fn apply_damage(&mut self, amount: u32, events: &mut EventQueue) {
        self.hp.damage(amount);
        events.push(BattleEvent::ResourceChanged {
            combatant: self.id,
            pool: PoolKind::Health,
            value: self.hp.current,
        });
        if self.hp.is_empty() && !self.is_dead {
            self.is_dead = true;
            events.push(BattleEvent::CombatantDied { combatant: self.id });
        }
    }

    /// Applies healing to health. Never revives: the death latch stays set.
    pub fn apply_heal(&mut self, amount: u32, events: &mut EventQueue) {
        self.hp.heal(amount);
        events.push(BattleEvent::ResourceChanged {
            combatant: self.id,
            pool: PoolKind::Health,
            value: self.hp.current,
        });
    }

    /// Spends mana, emitting the change.
    pub fn spend_mana(&mut self, amount: u32, events: &mut EventQueue) {
        self.mp.spend(amount);
        events.push(BattleEvent::ResourceChanged {
            combatant: self.id,
            pool: PoolKind::Mana,
            value: self.mp.current,
        });
    }

    // ========================================================================
    // Conditions
    // ========================================================================

    /// Inflicts a condition, or refreshes the duration of an already-active
    /// instance of the same definition.
    ///
    /// A combatant at condition capacity silently ignores new kinds.
    pub fn inflict_condition(&mut self, bound: &BoundCondition, events: &mut EventQueue) {
        if let Some(existing) = self
            .conditions
            .iter_mut()
            .find(|c| c.def.name == bound.def.name)
        {
            existing.refresh();
            events.push(BattleEvent::ConditionApplied {
                combatant: self.id,
                condition: bound.def.name.clone(),
            });
            return;
        }

        if self.conditions.is_full() {
            return;
        }
        self.conditions.push(ConditionState::inflict(bound));
        events.push(BattleEvent::ConditionApplied {
            combatant: self.id,
            condition: bound.def.name.clone(),
        });
    }

    /// Applies every active condition to this combatant and decrements
    /// non-permanent durations. Called at the start of the owner's turn.
    ///
    /// Expiry fires when `remaining` reaches exactly zero after a decrement.
    /// At most one expiring condition is removed per pass: the last one found
    /// in iteration order. An expired-but-unremoved entry stays inert until
    /// refreshed.
    pub fn tick_conditions(&mut self, events: &mut EventQueue) {
        if self.conditions.is_empty() {
            return;
        }

        let mut expired: Option<usize> = None;
        for index in 0..self.conditions.len() {
            let condition = &self.conditions[index];
            let kind = condition.def.kind;
            let power = condition.power;

            if condition.def.is_permanent() {
                self.apply_condition_effect(kind, power, events);
            } else if condition.remaining > 0 {
                self.apply_condition_effect(kind, power, events);
                let condition = &mut self.conditions[index];
                condition.remaining -= 1;
                if condition.remaining == 0 {
                    expired = Some(index);
                }
            }
        }

        if let Some(index) = expired {
            let gone = self.conditions.remove(index);
            events.push(BattleEvent::ConditionExpired {
                combatant: self.id,
                condition: gone.def.name,
            });
        }
    }

    fn apply_condition_effect(&mut self, kind: EffectKind, power: u32, events: &mut EventQueue) {
        match kind {
            EffectKind::Damage => self.apply_damage(power, events),
            EffectKind::Healing => self.apply_heal(power, events),
        }
    }
}
