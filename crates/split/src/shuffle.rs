//! Fisher–Yates shuffle.

use rand::Rng;

/// Shuffles `items` in place, uniformly over all permutations.
pub fn shuffle<T>(items: &mut [T], rng: &mut impl Rng) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}
