//! Combat resolution primitives.
//!
//! Pure, deterministic functions shared by plain attacks, skill casts and
//! condition infliction. The engine supplies the roll; nothing here touches
//! state or randomness.

pub mod hit;

pub use hit::{calculate_hit_threshold, check_hit};
