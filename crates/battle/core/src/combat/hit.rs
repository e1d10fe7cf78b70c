//! Hit chance calculation.

/// Calculate the hit threshold for an attack or skill.
///
/// # Formula
///
/// ```text
/// threshold = base_chance + hit_ratio - dodge
/// ```
///
/// # Arguments
///
/// * `base_chance` - Base chance of the attack or skill (e.g. 60 for a
///   plain attack, the skill's `chance_to_hit` for a cast)
/// * `hit_ratio` - Attacker's hit ratio (from derived stats)
/// * `dodge` - Defender's dodge (from derived stats)
pub fn calculate_hit_threshold(base_chance: i32, hit_ratio: i32, dodge: i32) -> i32 {
    base_chance + hit_ratio - dodge
}

/// Check whether an attack hits, given a d100 roll.
///
/// The comparison is strict: a roll exactly equal to the threshold misses.
/// Rolls are 1..=100, so a threshold above 100 always hits and a threshold
/// of 1 or lower never does.
pub fn check_hit(base_chance: i32, hit_ratio: i32, dodge: i32, roll: u32) -> bool {
    (roll as i32) < calculate_hit_threshold(base_chance, hit_ratio, dodge)
}
