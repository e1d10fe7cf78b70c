//! Host-supplied environment the engine resolves actions against.
//!
//! The environment bundles tunable balance parameters and the RNG oracle.
//! Keeping both outside [`crate::state::BattleState`] keeps the state a pure
//! value: snapshots stay comparable and replays only need the seed.

pub mod rng;

pub use rng::{PcgRng, RngOracle, compute_seed};

use crate::config::BattleConfig;

/// Borrowed bundle of everything the engine needs besides the state.
#[derive(Clone, Copy)]
pub struct BattleEnv<'a> {
    pub config: &'a BattleConfig,
    pub rng: &'a dyn RngOracle,
}

impl<'a> BattleEnv<'a> {
    pub fn new(config: &'a BattleConfig, rng: &'a dyn RngOracle) -> Self {
        Self { config, rng }
    }
}
