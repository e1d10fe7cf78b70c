//! Unified error types surfaced by the runtime API.
//!
//! Wraps rejections from the battle engine, provider failures and worker
//! coordination errors so clients can bubble them up with consistent
//! context.

use thiserror::Error;
use tokio::sync::oneshot;

use battle_core::{ActionError, CombatantId, SetupError};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    /// The engine rejected a submitted intent; the caller may correct and
    /// resubmit.
    #[error(transparent)]
    Action(#[from] ActionError),

    #[error("battle setup failed")]
    Setup(#[source] SetupError),

    /// An AI provider produced an intent the engine rejected. Policies are
    /// expected to pre-filter, so this points at a policy bug.
    #[error("provider intent for {actor} rejected")]
    RejectedIntent {
        actor: CombatantId,
        #[source]
        source: ActionError,
    },

    #[error("unknown combatant {0}")]
    UnknownCombatant(CombatantId),

    #[error("scripted provider ran out of intents for {0}")]
    ScriptExhausted(CombatantId),

    #[error("simulation worker command channel closed")]
    CommandChannelClosed,

    #[error("simulation worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),
}
