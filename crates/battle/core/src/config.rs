/// Engine configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleConfig {
    /// Base chance-to-hit for plain weapon attacks, before the attacker's
    /// hit ratio and the defender's dodge are applied.
    pub attack_hit_chance: i32,
}

impl BattleConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum combatants per roster side.
    pub const MAX_PARTY_SIZE: usize = 8;
    /// Maximum skills bound to a single combatant.
    pub const MAX_SKILLS: usize = 8;
    /// Maximum simultaneously active conditions on a combatant.
    pub const MAX_CONDITIONS: usize = 8;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_ATTACK_HIT_CHANCE: i32 = 60;

    pub fn new() -> Self {
        Self {
            attack_hit_chance: Self::DEFAULT_ATTACK_HIT_CHANCE,
        }
    }

    pub fn with_attack_hit_chance(attack_hit_chance: i32) -> Self {
        Self { attack_hit_chance }
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}
