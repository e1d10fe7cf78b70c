//! Runtime orchestrator and builder.

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

use battle_core::{BattleConfig, BattleSetup, BattleState, Side};

use crate::api::{ActionProvider, Result, RuntimeError, RuntimeHandle};
use crate::workers::{SideProviders, SimulationWorker};

const COMMAND_BUFFER: usize = 32;
const DEFAULT_EVENT_CAPACITY: usize = 128;

/// Builder for [`BattleRuntime`].
///
/// Sides without a provider are driven externally through
/// [`RuntimeHandle::submit_intent`]; sides with one resolve autonomously.
pub struct RuntimeBuilder {
    setup: BattleSetup,
    config: BattleConfig,
    seed: u64,
    player_provider: Option<Arc<dyn ActionProvider>>,
    enemy_provider: Option<Arc<dyn ActionProvider>>,
    event_capacity: usize,
}

impl RuntimeBuilder {
    pub fn new(setup: BattleSetup) -> Self {
        Self {
            setup,
            config: BattleConfig::default(),
            seed: 0,
            player_provider: None,
            enemy_provider: None,
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }

    /// Battle seed; identical seeds and intents replay identically.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn config(mut self, config: BattleConfig) -> Self {
        self.config = config;
        self
    }

    /// Installs an intent provider for one side.
    pub fn provider(mut self, side: Side, provider: Arc<dyn ActionProvider>) -> Self {
        match side {
            Side::Player => self.player_provider = Some(provider),
            Side::Enemy => self.enemy_provider = Some(provider),
        }
        self
    }

    /// Capacity of the broadcast event channel.
    pub fn event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity;
        self
    }

    /// Initializes the battle state and spawns the simulation worker.
    pub fn build(self) -> Result<BattleRuntime> {
        let state = BattleState::initialize(&self.setup, self.seed).map_err(RuntimeError::Setup)?;

        let (command_tx, command_rx) = mpsc::channel(COMMAND_BUFFER);
        let (event_tx, _) = broadcast::channel(self.event_capacity);

        let worker = SimulationWorker::new(
            state,
            self.config,
            SideProviders {
                player: self.player_provider,
                enemy: self.enemy_provider,
            },
            command_rx,
            event_tx.clone(),
        );
        let worker = tokio::spawn(worker.run());

        Ok(BattleRuntime {
            handle: RuntimeHandle::new(command_tx, event_tx),
            worker,
        })
    }
}

/// A running battle: a background simulation worker plus the handle to it.
pub struct BattleRuntime {
    handle: RuntimeHandle,
    worker: JoinHandle<()>,
}

impl BattleRuntime {
    pub fn builder(setup: BattleSetup) -> RuntimeBuilder {
        RuntimeBuilder::new(setup)
    }

    /// Cloneable handle for driving the battle.
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Stops the worker and waits for it to exit.
    pub async fn shutdown(self) {
        drop(self.handle);
        self.worker.abort();
        let _ = self.worker.await;
    }
}
