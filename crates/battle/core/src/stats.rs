//! Combatant attributes and the values derived from them.
//!
//! Base attributes are the Single Source of Truth: they are assigned at
//! setup and immutable for the rest of the battle. Everything else
//! (resource maximums, dodge, hit ratio, skill power) is derived from them
//! exactly once when the combatant is built.

// ============================================================================
// Base Attributes
// ============================================================================

/// The five base attributes that define a combatant.
///
/// - **Strength**: flat damage of a plain attack
/// - **Vitality**: health maximum
/// - **Dexterity**: hit ratio (accuracy)
/// - **Agility**: dodge
/// - **Intelligence**: mana maximum, power of most skills
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BaseStats {
    pub strength: i32,
    pub vitality: i32,
    pub dexterity: i32,
    pub agility: i32,
    pub intelligence: i32,
}

impl BaseStats {
    pub fn new(
        strength: i32,
        vitality: i32,
        dexterity: i32,
        agility: i32,
        intelligence: i32,
    ) -> Self {
        Self {
            strength,
            vitality,
            dexterity,
            agility,
            intelligence,
        }
    }

    /// Reads a single attribute by kind.
    pub fn get(&self, kind: StatKind) -> i32 {
        match kind {
            StatKind::Strength => self.strength,
            StatKind::Vitality => self.vitality,
            StatKind::Dexterity => self.dexterity,
            StatKind::Agility => self.agility,
            StatKind::Intelligence => self.intelligence,
        }
    }
}

impl Default for BaseStats {
    /// Default attributes: all 10 (average adventurer).
    fn default() -> Self {
        Self {
            strength: 10,
            vitality: 10,
            dexterity: 10,
            agility: 10,
            intelligence: 10,
        }
    }
}

/// Enum referencing individual base attributes.
///
/// Used by [`Formula`] and content files to name a stat.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StatKind {
    Strength,
    Vitality,
    Dexterity,
    Agility,
    Intelligence,
}

// ============================================================================
// Derived Stats
// ============================================================================

/// Values derived from base attributes.
///
/// Computed once at setup and stored on the combatant; base attributes do
/// not change mid-battle, so these never have to be recomputed.
///
/// Formulas:
/// - `hp_max = 5 + 2 × vitality`
/// - `mp_max = 10 + 3 × intelligence`
/// - `dodge = 5 + 3 × agility`
/// - `hit_ratio = 20 + 4 × dexterity`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DerivedStats {
    /// Health maximum.
    pub hp_max: u32,
    /// Mana maximum.
    pub mp_max: u32,
    /// Dodge, subtracted from incoming hit chances.
    pub dodge: i32,
    /// Hit ratio, added to outgoing hit chances.
    pub hit_ratio: i32,
}

impl DerivedStats {
    /// Computes derived values from base attributes.
    pub fn from_base(base: &BaseStats) -> Self {
        Self {
            hp_max: (5 + 2 * base.vitality).max(1) as u32,
            mp_max: (10 + 3 * base.intelligence).max(0) as u32,
            dodge: 5 + 3 * base.agility,
            hit_ratio: 20 + 4 * base.dexterity,
        }
    }
}

// ============================================================================
// Power Formulas
// ============================================================================

/// Formula for computing a skill's or condition's power from the owner's
/// base attributes.
///
/// Formulas are evaluated exactly once, when the definition is bound to a
/// combatant at setup. The result is a static power value; it is never
/// recomputed per cast.
///
/// ## Examples
///
/// ```ignore
/// // 2 + intelligence
/// Formula::Sum(vec![
///     Formula::Constant(2),
///     Formula::CasterStat { stat: StatKind::Intelligence, percent: 100 },
/// ])
///
/// // 2 × intelligence
/// Formula::CasterStat { stat: StatKind::Intelligence, percent: 200 }
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Formula {
    /// Fixed constant value.
    Constant(u32),

    /// Percentage of the owner's base attribute.
    CasterStat { stat: StatKind, percent: u32 },

    /// Sum of multiple formulas.
    Sum(Vec<Formula>),
}

impl Formula {
    /// Evaluates the formula against the owner's base attributes.
    ///
    /// Negative attributes contribute zero rather than underflowing.
    pub fn evaluate(&self, base: &BaseStats) -> u32 {
        match self {
            Formula::Constant(value) => *value,
            Formula::CasterStat { stat, percent } => {
                (base.get(*stat).max(0) as u32 * percent) / 100
            }
            Formula::Sum(parts) => parts.iter().map(|part| part.evaluate(base)).sum(),
        }
    }
}
