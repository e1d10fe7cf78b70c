//! Skill and condition definitions, and their per-combatant bound forms.
//!
//! Definitions are immutable data, typically loaded from content catalogs.
//! At setup each definition is *bound* to its owner by evaluating the power
//! formula against the owner's base attributes; the bound power stays fixed
//! for the whole battle (and, for conditions, for the lifetime of the
//! condition on whichever target it lands).

use crate::stats::{BaseStats, Formula};

/// Whether an effect removes or restores health.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EffectKind {
    Damage,
    Healing,
}

/// How a skill selects its targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TargetShape {
    /// One combatant. Healing skills retarget to the neediest living ally.
    Single,
    /// Every living member of the resolved side.
    All,
}

// ============================================================================
// Conditions
// ============================================================================

/// Immutable definition of a status condition (damage-over-time, regen).
///
/// `duration` counts ticks; `-1` marks a permanent condition that never
/// expires and never decrements.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConditionDef {
    pub name: String,
    pub kind: EffectKind,
    /// Base chance for the infliction roll (damage-type conditions only).
    pub hit_ratio: i32,
    pub duration: i32,
    pub power: Formula,
}

impl ConditionDef {
    /// True if this condition never expires.
    pub fn is_permanent(&self) -> bool {
        self.duration < 0
    }
}

/// A condition definition bound to an inflicting combatant.
///
/// The power formula has been evaluated against the inflictor's attributes;
/// every infliction of this bound condition carries the same power.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundCondition {
    pub def: ConditionDef,
    pub power: u32,
}

impl BoundCondition {
    pub fn bind(def: ConditionDef, base: &BaseStats) -> Self {
        let power = def.power.evaluate(base);
        Self { def, power }
    }
}

/// Runtime state of a condition active on a combatant.
///
/// `remaining` is only meaningful for non-permanent conditions; it starts at
/// the definition's duration and decrements once per tick on the owner.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConditionState {
    pub def: ConditionDef,
    pub power: u32,
    pub remaining: i32,
}

impl ConditionState {
    /// Creates a fresh active instance from a bound condition.
    pub fn inflict(bound: &BoundCondition) -> Self {
        Self {
            def: bound.def.clone(),
            power: bound.power,
            remaining: bound.def.duration,
        }
    }

    /// Resets the remaining duration to the definition's duration.
    ///
    /// Power is untouched; a refresh does not re-bind against the inflictor.
    pub fn refresh(&mut self) {
        self.remaining = self.def.duration;
    }
}

// ============================================================================
// Skills
// ============================================================================

/// Immutable definition of a castable skill.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillDef {
    pub name: String,
    pub kind: EffectKind,
    pub target_shape: TargetShape,
    /// Base chance for the per-target hit roll (damage skills; healing
    /// never misses).
    pub chance_to_hit: i32,
    pub mana_cost: u32,
    pub power: Formula,
    /// Condition the skill may inflict on targets it affects.
    pub condition: Option<ConditionDef>,
}

/// A skill definition bound to its owner at setup.
///
/// Power (and attached condition power) are evaluated once against the
/// owner's attributes. This is a static binding, never recomputed per cast.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillState {
    pub def: SkillDef,
    pub power: u32,
    pub condition: Option<BoundCondition>,
}

impl SkillState {
    pub fn bind(def: SkillDef, base: &BaseStats) -> Self {
        let power = def.power.evaluate(base);
        let condition = def
            .condition
            .clone()
            .map(|condition| BoundCondition::bind(condition, base));
        Self {
            def,
            power,
            condition,
        }
    }

    /// Name of the underlying definition.
    pub fn name(&self) -> &str {
        &self.def.name
    }

    pub fn mana_cost(&self) -> u32 {
        self.def.mana_cost
    }
}
