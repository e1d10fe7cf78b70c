//! Data-driven battle content and its loaders.
//!
//! This crate houses the skill, condition and combatant catalogs as RON
//! data files and provides loaders that resolve them into `battle-core`
//! types. Content is consumed at setup time only and never appears in
//! battle state.
//!
//! All loaders use battle-core types directly with serde for RON
//! deserialization; cross-references (skill → condition, combatant → skill)
//! are resolved by name at load time and fail with context instead of
//! panicking.

pub mod factory;
pub mod loaders;

pub use factory::ContentFactory;
pub use loaders::{
    ActorLoader, CombatantTemplate, ConditionLoader, LoadResult, SkillLoader,
};
