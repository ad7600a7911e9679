//! Randomness for dealing: a ChaCha8 generator plus an unbiased Fisher–Yates shuffle.

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Game RNG. Seeded from the browser's crypto source in play, from a fixed seed in tests.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            inner: ChaCha8Rng::from_entropy(),
        }
    }
}

impl RngCore for GameRng {
    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.inner.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.inner.try_fill_bytes(dest)
    }
}

/// In-place Durstenfeld shuffle. Every permutation is equally likely.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// Shuffled copy of `items`; the input is left untouched.
pub fn shuffled<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut out = items.to_vec();
    shuffle(&mut out, rng);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_order() {
        let items: Vec<u32> = (0..20).collect();
        let a = shuffled(&items, &mut GameRng::new(7));
        let b = shuffled(&items, &mut GameRng::new(7));
        assert_eq!(a, b);
    }

    #[test]
    fn short_slices_untouched() {
        let mut rng = GameRng::new(1);
        let mut empty: Vec<u8> = Vec::new();
        shuffle(&mut empty, &mut rng);
        assert!(empty.is_empty());
        let mut one = vec![42];
        shuffle(&mut one, &mut rng);
        assert_eq!(one, vec![42]);
    }

    #[test]
    fn every_position_is_reachable() {
        // Element 0 of a 4-slice should land in every slot over enough runs.
        let mut rng = GameRng::new(99);
        let mut seen = [false; 4];
        for _ in 0..200 {
            let out = shuffled(&[0, 1, 2, 3], &mut rng);
            let pos = out.iter().position(|&v| v == 0).unwrap();
            seen[pos] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }
}
