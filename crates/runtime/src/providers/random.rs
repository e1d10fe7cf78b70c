//! Uniform-random reference policy.

use std::sync::Mutex;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use battle_core::{ActionIntent, BattleState, CombatantId};

use crate::api::{ActionProvider, Result, RuntimeError};

/// The reference AI: a uniform-random choice among the basic attack and
/// each known skill, against a uniform-random living opponent.
///
/// Skills whose mana cost exceeds the actor's current mana are never
/// submitted; the pick falls back to the basic attack instead, so the
/// engine-level `InsufficientMana` rejection is reserved for buggy callers.
/// Healing skills still take the random opponent as nominal target; the
/// engine's retargeting rules redirect them to the policy's own side.
pub struct RandomPolicy {
    rng: Mutex<StdRng>,
}

impl RandomPolicy {
    /// Policy with OS entropy.
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Deterministic policy for reproducible battles.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for RandomPolicy {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ActionProvider for RandomPolicy {
    async fn provide_intent(
        &self,
        actor: CombatantId,
        state: &BattleState,
    ) -> Result<ActionIntent> {
        let combatant = state
            .combatant(actor)
            .ok_or(RuntimeError::UnknownCombatant(actor))?;
        let foes = state.living_members(combatant.side.opponent());
        debug_assert!(!foes.is_empty(), "policy invoked with no living opponents");

        let mut rng = self.rng.lock().expect("policy rng lock poisoned");
        let target = foes[rng.gen_range(0..foes.len())];

        // 0 is the basic attack; 1..=n pick a skill.
        let pick = rng.gen_range(0..=combatant.skills.len());
        let intent = match pick.checked_sub(1).and_then(|i| combatant.skill(i)) {
            Some(skill) if skill.mana_cost() <= combatant.mp.current => ActionIntent::CastSkill {
                skill: pick - 1,
                target,
            },
            _ => ActionIntent::Attack { target },
        };

        tracing::debug!(%actor, ?intent, "random policy chose intent");
        Ok(intent)
    }
}
