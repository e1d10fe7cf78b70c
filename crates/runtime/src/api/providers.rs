//! Asynchronous abstraction for sourcing combat intent.
//!
//! Runtime users plug in [`ActionProvider`] implementations so the
//! simulation can run with AI policies, scripted fixtures, or any other
//! intent source. Sides without a provider surface their turns to the
//! embedder as awaiting input.

use std::sync::Mutex;

use async_trait::async_trait;

use battle_core::{ActionIntent, BattleState, CombatantId};

use super::errors::{Result, RuntimeError};

/// Trait for providing an action intent based on the current battle state.
///
/// Different implementations can handle:
/// - AI policy decisions
/// - Scripted/replayed actions
/// - Testing fixtures
#[async_trait]
pub trait ActionProvider: Send + Sync {
    /// Provide an intent for the given combatant.
    ///
    /// # Arguments
    /// * `actor` - The combatant whose turn it is
    /// * `state` - Read-only snapshot of the current battle state
    async fn provide_intent(
        &self,
        actor: CombatantId,
        state: &BattleState,
    ) -> Result<ActionIntent>;
}

/// Provider that replays a fixed sequence of intents.
///
/// Useful as a test fixture: errors once the script runs out.
pub struct ScriptedProvider {
    script: Mutex<Vec<ActionIntent>>,
}

impl ScriptedProvider {
    pub fn new(intents: impl IntoIterator<Item = ActionIntent>) -> Self {
        let mut script: Vec<ActionIntent> = intents.into_iter().collect();
        script.reverse();
        Self {
            script: Mutex::new(script),
        }
    }
}

#[async_trait]
impl ActionProvider for ScriptedProvider {
    async fn provide_intent(
        &self,
        actor: CombatantId,
        _state: &BattleState,
    ) -> Result<ActionIntent> {
        self.script
            .lock()
            .expect("scripted provider lock poisoned")
            .pop()
            .ok_or(RuntimeError::ScriptExhausted(actor))
    }
}
