//! Runtime orchestration for the deterministic battle simulation.
//!
//! This crate wires the action provider abstraction and a background
//! simulation worker into a cohesive API. Consumers embed
//! [`BattleRuntime`] to drive turns, subscribe to events, and submit player
//! intents through [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`providers`] ships the reference AI policy
//! - `workers` keeps the background task internal to the crate
pub mod api;
pub mod providers;
pub mod runtime;

mod workers;

pub use api::{ActionProvider, Result, RuntimeError, RuntimeHandle, ScriptedProvider, TurnReport};
pub use providers::RandomPolicy;
pub use runtime::{BattleRuntime, RuntimeBuilder};
