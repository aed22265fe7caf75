//! Seeded randomness shared by every stochastic system
//!
//! Each system owns its own `ChaCha8Rng`. Seeds for a match are derived from
//! a single match seed so a whole match replays identically.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// RNG type used by all gameplay systems
pub type GameRng = ChaCha8Rng;

/// Create a game RNG from a seed
pub fn seeded(seed: u64) -> GameRng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Derive an independent sub-seed (SplitMix64 step)
pub fn derive_seed(seed: u64, stream: u64) -> u64 {
    let mut z = seed.wrapping_add(stream.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Skill-gated roll
///
/// Never succeeds at probability 0.0 and always succeeds at 1.0, since
/// `gen::<f32>()` is drawn from `[0, 1)`.
pub fn roll(rng: &mut impl Rng, probability: f32) -> bool {
    rng.gen::<f32>() < probability
}

/// Uniform value in `[-1, 1)`
pub fn signed_unit(rng: &mut impl Rng) -> f32 {
    rng.gen::<f32>() * 2.0 - 1.0
}
