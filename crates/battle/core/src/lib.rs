//! Deterministic turn-based battle rules shared across hosts.
//!
//! `battle-core` defines the canonical combat rules (stats, skills,
//! conditions, turn order, victory) and exposes pure APIs with no I/O,
//! no wall clock, and no rendering dependency. All state mutation flows
//! through [`engine::BattleEngine`]; hosts observe changes by draining
//! the [`event::EventQueue`] they own and re-publishing however they like.
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod event;
pub mod intent;
pub mod skill;
pub mod state;
pub mod stats;

pub use combat::{calculate_hit_threshold, check_hit};
pub use config::BattleConfig;
pub use engine::{ActionError, BattleEngine, TurnProgress};
pub use env::{BattleEnv, PcgRng, RngOracle, compute_seed};
pub use error::{BattleError, ErrorSeverity};
pub use event::{BattleEvent, EventQueue};
pub use intent::ActionIntent;
pub use skill::{
    BoundCondition, ConditionDef, ConditionState, EffectKind, SkillDef, SkillState, TargetShape,
};
pub use state::{
    BattleSetup, BattleState, CombatantId, CombatantSpec, CombatantState, Outcome, PoolKind,
    ResourcePool, Roster, Rosters, SetupError, Side, TurnState,
};
pub use stats::{BaseStats, DerivedStats, Formula, StatKind};
