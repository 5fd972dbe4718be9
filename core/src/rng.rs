//! Stateless seeded randomness.
//!
//! Every draw is a pure function of the seed it is given. Callers derive a distinct seed for
//! each logical draw with [`offset`], so that unrelated draws do not correlate and a puzzle can
//! be reproduced from its seed alone.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::Seed;

/// Derives the seed for a sub-draw.
pub const fn offset(seed: Seed, k: u64) -> Seed {
    seed.wrapping_add(k)
}

/// Float in `[0, 1)`.
pub fn next_float(seed: Seed) -> f64 {
    ChaCha8Rng::seed_from_u64(seed).random::<f64>()
}

/// Integer in `[min, max]`, both inclusive. Returns `min` when the range is empty.
pub fn next_int(min: i64, max: i64, seed: Seed) -> i64 {
    if max <= min {
        return min;
    }
    let span = (max - min + 1) as f64;
    let value = min + (next_float(seed) * span) as i64;
    value.min(max)
}

/// Index in `[0, max]`.
pub fn next_index(max: usize, seed: Seed) -> usize {
    next_int(0, max as i64, seed) as usize
}

/// Fisher-Yates shuffle where step `i` draws from `seed + i`.
///
/// The same seed and the same slice length always produce the same permutation.
pub fn shuffle<T>(items: &mut [T], seed: Seed) {
    for i in (1..items.len()).rev() {
        let j = next_index(i, offset(seed, i as u64));
        items.swap(i, j);
    }
}

/// Shuffled copy of `items`.
pub fn shuffled<T: Clone>(items: &[T], seed: Seed) -> Vec<T> {
    let mut items = items.to_vec();
    shuffle(&mut items, seed);
    items
}
