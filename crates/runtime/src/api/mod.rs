//! Public surface downstream clients interact with.

pub mod errors;
pub mod handle;
pub mod providers;

pub use errors::{Result, RuntimeError};
pub use handle::{RuntimeHandle, TurnReport};
pub use providers::{ActionProvider, ScriptedProvider};
