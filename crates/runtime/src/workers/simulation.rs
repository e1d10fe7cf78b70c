//! Simulation worker that owns the authoritative [`BattleState`].
//!
//! Receives commands from [`crate::RuntimeHandle`], drives turns through
//! [`battle_core::BattleEngine`], auto-resolves provider-driven sides, and
//! publishes [`BattleEvent`] notifications. Confining all mutation to this
//! task keeps the single-threaded turn model intact no matter how many
//! handles exist.

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::{debug, trace, warn};

use battle_core::{
    ActionError, ActionIntent, BattleConfig, BattleEngine, BattleEnv, BattleEvent, BattleState,
    CombatantId, EventQueue, PcgRng, Side, TurnProgress,
};

use crate::api::{ActionProvider, Result, RuntimeError, TurnReport};

/// Commands that can be sent to the simulation worker.
pub(crate) enum Command {
    /// Advance until a combatant awaits external input or the battle ends.
    Advance {
        reply: oneshot::Sender<Result<TurnReport>>,
    },
    /// Apply an externally submitted intent, then continue advancing.
    SubmitIntent {
        actor: CombatantId,
        intent: ActionIntent,
        reply: oneshot::Sender<Result<TurnReport>>,
    },
    /// Query the current battle state (read-only snapshot).
    QueryState { reply: oneshot::Sender<BattleState> },
}

/// Optional intent provider per side. A side without a provider surfaces
/// its turns to the embedder as awaiting input.
pub(crate) struct SideProviders {
    pub player: Option<Arc<dyn ActionProvider>>,
    pub enemy: Option<Arc<dyn ActionProvider>>,
}

impl SideProviders {
    fn for_side(&self, side: Side) -> Option<&Arc<dyn ActionProvider>> {
        match side {
            Side::Player => self.player.as_ref(),
            Side::Enemy => self.enemy.as_ref(),
        }
    }
}

/// Background task that processes battle commands.
pub(crate) struct SimulationWorker {
    state: BattleState,
    events: EventQueue,
    config: BattleConfig,
    rng: PcgRng,
    providers: SideProviders,
    command_rx: mpsc::Receiver<Command>,
    event_tx: broadcast::Sender<BattleEvent>,
    /// Combatant whose turn has begun and is waiting for an external
    /// intent. Submissions for anyone else are invalid-turn rejections.
    awaiting: Option<CombatantId>,
}

impl SimulationWorker {
    pub(crate) fn new(
        state: BattleState,
        config: BattleConfig,
        providers: SideProviders,
        command_rx: mpsc::Receiver<Command>,
        event_tx: broadcast::Sender<BattleEvent>,
    ) -> Self {
        Self {
            state,
            events: EventQueue::new(),
            config,
            rng: PcgRng,
            providers,
            command_rx,
            event_tx,
            awaiting: None,
        }
    }

    /// Main worker loop; exits when every handle is dropped.
    pub(crate) async fn run(mut self) {
        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd).await;
        }
        debug!("simulation worker shutting down");
    }

    async fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Advance { reply } => {
                let result = self.advance().await;
                let _ = reply.send(result);
            }
            Command::SubmitIntent {
                actor,
                intent,
                reply,
            } => {
                let result = self.submit(actor, intent).await;
                let _ = reply.send(result);
            }
            Command::QueryState { reply } => {
                let _ = reply.send(self.state.clone());
            }
        }
    }

    /// Advances turns, resolving provider-driven combatants autonomously,
    /// until external input is needed or the battle ends.
    async fn advance(&mut self) -> Result<TurnReport> {
        if let Some(actor) = self.awaiting {
            return Ok(TurnReport::AwaitingInput(actor));
        }

        loop {
            let progress = {
                let mut engine = BattleEngine::new(&mut self.state, &mut self.events);
                engine.advance_turn()
            };
            self.flush_events();

            match progress {
                TurnProgress::Finished(outcome) => {
                    let winner = outcome
                        .winner()
                        .expect("finished battles always name a winner");
                    debug!(%winner, "battle finished");
                    return Ok(TurnReport::Finished { winner });
                }
                TurnProgress::Acting(actor) => {
                    let side = self
                        .state
                        .combatant(actor)
                        .expect("active combatant exists")
                        .side;
                    let Some(provider) = self.providers.for_side(side) else {
                        debug!(%actor, "combatant awaiting external input");
                        self.awaiting = Some(actor);
                        return Ok(TurnReport::AwaitingInput(actor));
                    };

                    let provider = Arc::clone(provider);
                    let intent = provider.provide_intent(actor, &self.state).await?;
                    trace!(%actor, ?intent, "resolving provider intent");
                    if let Err(source) = self.resolve(actor, &intent) {
                        warn!(%actor, %source, "provider intent rejected");
                        return Err(RuntimeError::RejectedIntent { actor, source });
                    }
                }
            }
        }
    }

    /// Applies an external intent for the awaited combatant, then invokes
    /// the turn-advancement continuation.
    async fn submit(&mut self, actor: CombatantId, intent: ActionIntent) -> Result<TurnReport> {
        if self.state.is_over() {
            return Err(ActionError::TerminalState.into());
        }
        if self.awaiting != Some(actor) {
            let active = self.state.active_combatant().id;
            return Err(ActionError::InvalidTurn { actor, active }.into());
        }

        // A rejected intent keeps the combatant awaiting a corrected one.
        self.resolve(actor, &intent)?;
        self.awaiting = None;
        self.advance().await
    }

    fn resolve(
        &mut self,
        actor: CombatantId,
        intent: &ActionIntent,
    ) -> std::result::Result<(), ActionError> {
        let env = BattleEnv::new(&self.config, &self.rng);
        let mut engine = BattleEngine::new(&mut self.state, &mut self.events);
        let result = engine.resolve_intent(&env, actor, intent);
        self.flush_events();
        result
    }

    fn flush_events(&mut self) {
        for event in self.events.drain() {
            trace!(?event, "battle event");
            // No subscribers is normal, not an error.
            let _ = self.event_tx.send(event);
        }
    }
}
