use std::fmt;

/// Unique identifier for a combatant within one battle.
///
/// Allocated sequentially at setup: player roster first, then enemy roster,
/// both in supplied order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantId(pub u32);

impl fmt::Display for CombatantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The two opposing sides of a battle.
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
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    /// The opposing side.
    pub fn opponent(self) -> Self {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }
}

/// Which resource pool a notification refers to.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum PoolKind {
    Health,
    Mana,
}

/// Integer resource pool (health, mana) tracked per combatant.
///
/// All mutation clamps `current` to `[0, max]`. Amounts are unsigned, so
/// negative inputs are unrepresentable by construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourcePool {
    pub current: u32,
    pub max: u32,
}

impl ResourcePool {
    /// Creates a pool filled to its maximum.
    pub fn full(max: u32) -> Self {
        Self { current: max, max }
    }

    /// Removes up to `amount`, clamping at zero.
    pub fn damage(&mut self, amount: u32) {
        self.current = self.current.saturating_sub(amount);
    }

    /// Restores up to `amount`, clamping at the maximum.
    pub fn heal(&mut self, amount: u32) {
        self.current = (self.current + amount).min(self.max);
    }

    /// Spends up to `amount` (mana-style pools), clamping at zero.
    pub fn spend(&mut self, amount: u32) {
        self.damage(amount);
    }

    /// Restores up to `amount` (mana-style pools), clamping at the maximum.
    pub fn restore(&mut self, amount: u32) {
        self.heal(amount);
    }

    /// Fill ratio in `[0.0, 1.0]`, for AI heuristics and display.
    pub fn percent(&self) -> f32 {
        if self.max == 0 {
            return 0.0;
        }
        self.current as f32 / self.max as f32
    }

    /// True when the pool is fully drained.
    pub fn is_empty(&self) -> bool {
        self.current == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_clamps_at_zero_and_max() {
        let mut pool = ResourcePool::full(25);

        pool.damage(30);
        assert_eq!(pool.current, 0);
        assert!(pool.is_empty());

        pool.heal(40);
        assert_eq!(pool.current, 25);

        pool.spend(10);
        pool.restore(3);
        assert_eq!(pool.current, 18);
    }

    #[test]
    fn percent_reflects_fill_ratio() {
        let mut pool = ResourcePool::full(40);
        pool.damage(30);
        assert!((pool.percent() - 0.25).abs() < f32::EPSILON);

        let empty = ResourcePool::full(0);
        assert_eq!(empty.percent(), 0.0);
    }

    #[test]
    fn opponent_flips_sides() {
        assert_eq!(Side::Player.opponent(), Side::Enemy);
        assert_eq!(Side::Enemy.opponent(), Side::Player);
    }
}
