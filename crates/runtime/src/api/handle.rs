//! Client-side handle to the simulation worker.

use tokio::sync::{broadcast, mpsc, oneshot};

use battle_core::{ActionIntent, BattleEvent, BattleState, CombatantId, Side};

use super::errors::{Result, RuntimeError};
use crate::workers::Command;

/// How far the battle advanced after a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnReport {
    /// A provider-less combatant is awaiting an external intent.
    AwaitingInput(CombatantId),

    /// The battle reached a terminal outcome.
    Finished { winner: Side },
}

/// Cloneable handle for interacting with a running battle.
///
/// All mutation happens inside the worker task; the handle only passes
/// commands and receives replies.
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_tx: broadcast::Sender<BattleEvent>,
}

impl RuntimeHandle {
    pub(crate) fn new(
        command_tx: mpsc::Sender<Command>,
        event_tx: broadcast::Sender<BattleEvent>,
    ) -> Self {
        Self {
            command_tx,
            event_tx,
        }
    }

    /// Advances the battle until a combatant awaits external input or the
    /// battle ends. Provider-driven sides resolve autonomously along the
    /// way.
    pub async fn advance(&self) -> Result<TurnReport> {
        self.request(|reply| Command::Advance { reply }).await?
    }

    /// Submits a plain attack for the awaited combatant, then advances.
    pub async fn submit_attack(&self, actor: CombatantId, target: CombatantId) -> Result<TurnReport> {
        self.submit_intent(actor, ActionIntent::Attack { target }).await
    }

    /// Submits a skill cast for the awaited combatant, then advances.
    pub async fn submit_skill(
        &self,
        actor: CombatantId,
        skill: usize,
        target: CombatantId,
    ) -> Result<TurnReport> {
        self.submit_intent(actor, ActionIntent::CastSkill { skill, target })
            .await
    }

    /// Submits an arbitrary intent for the awaited combatant.
    pub async fn submit_intent(
        &self,
        actor: CombatantId,
        intent: ActionIntent,
    ) -> Result<TurnReport> {
        self.request(|reply| Command::SubmitIntent {
            actor,
            intent,
            reply,
        })
        .await?
    }

    /// Read-only snapshot of the current battle state.
    pub async fn state(&self) -> Result<BattleState> {
        self.request(|reply| Command::QueryState { reply }).await
    }

    /// Subscribes to the ordered battle event feed.
    ///
    /// Subscribers are optional; the worker never blocks on them.
    pub fn subscribe(&self) -> broadcast::Receiver<BattleEvent> {
        self.event_tx.subscribe()
    }

    async fn request<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.command_tx
            .send(command(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;
        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }
}
