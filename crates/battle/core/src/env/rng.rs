//! RNG oracle for deterministic hit rolls.
//!
//! All randomness in a battle flows through a trait-based oracle: given the
//! same battle seed, the same sequence of actions produces the same rolls.
//! This keeps headless simulations, scripted tests and replays exact.

/// RNG oracle for deterministic random number generation.
///
/// Implementations must be deterministic and produce the same values
/// given the same seed.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Roll a d100 (1-100 inclusive).
    ///
    /// Used for every percentage-based hit check.
    fn roll_d100(&self, seed: u64) -> u32 {
        (self.next_u32(seed) % 100) + 1
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG-XSH-RR produces 32-bit output from 64-bit state with a single
/// multiply, an xorshift and a rotate. Deterministic, small, and passes the
/// usual statistical batteries.
///
/// Reference: <https://www.pcg-random.org/>
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    /// Advance the state by one LCG step.
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation.
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        let state = Self::pcg_step(seed);
        Self::pcg_output(state)
    }
}

/// Compute a deterministic seed for one roll.
///
/// Combines the battle seed, the action nonce, the acting combatant and a
/// per-action context counter so that every roll in a battle draws from a
/// distinct seed.
///
/// # Context Values
///
/// Use different context values when one action needs several independent
/// rolls: `0` for the primary hit check, then one per additional roll
/// (per-target checks of an area skill, condition infliction, ...).
pub fn compute_seed(battle_seed: u64, nonce: u64, actor_id: u32, context: u32) -> u64 {
    // SplitMix64 / FxHash multipliers as mixing constants
    let mut hash = battle_seed;

    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (actor_id as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    // Final avalanche step
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rolls_are_deterministic_and_in_range() {
        let rng = PcgRng;
        for seed in 0..200u64 {
            let roll = rng.roll_d100(seed);
            assert!((1..=100).contains(&roll));
            assert_eq!(roll, rng.roll_d100(seed));
        }
    }

    #[test]
    fn seed_mixing_separates_contexts() {
        let a = compute_seed(42, 0, 1, 0);
        let b = compute_seed(42, 0, 1, 1);
        let c = compute_seed(42, 1, 1, 0);
        let d = compute_seed(43, 0, 1, 0);
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }
}
