//! Seeded random sequence used for board setup, turn order, and dice.
//!
//! Every random decision in a match is drawn from one `GameRng`, so the same
//! seed reproduces the same terrain layout, harbors, turn order, deck order,
//! and dice rolls on any platform.
//!
//! The generator is `ChaCha8Rng`, whose output stream is fixed for a given
//! seed. Shuffling is done in this module rather than through
//! `rand::seq::SliceRandom`, whose internal algorithm may change between
//! `rand` releases.

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRng {
    seed: u64,
    inner: ChaCha8Rng,
}

impl GameRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// The seed this sequence started from
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Next value of the sequence
    pub fn next(&mut self) -> u32 {
        self.inner.next_u32()
    }

    /// Next value reduced into `0..bound`
    pub fn below(&mut self, bound: usize) -> usize {
        debug_assert!(bound > 0, "empty range");
        self.next() as usize % bound
    }

    /// Roll one six-sided die
    pub fn die(&mut self) -> u8 {
        1 + self.below(6) as u8
    }

    /// Forward Fisher-Yates: position `i` swaps with a pick from `i..len`
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        let count = items.len();
        for i in 0..count.saturating_sub(1) {
            let j = i + self.below(count - i);
            items.swap(i, j);
        }
    }
}
