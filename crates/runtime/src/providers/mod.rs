//! Action provider implementations.

pub mod random;

pub use random::RandomPolicy;
