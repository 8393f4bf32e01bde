//! Random Replacement Policy.
//!
//! This policy evicts a uniformly random way from the set, independent of
//! history. The generator is a seeded [`StdRng`], so a fixed seed reproduces
//! the exact victim sequence.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::ReplacementPolicy;

/// Random Policy state for one set.
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    /// Number of ways in the set.
    ways: usize,
    /// Victim generator.
    rng: StdRng,
}

impl RandomPolicy {
    /// Creates a new Random policy instance.
    ///
    /// # Arguments
    ///
    /// * `ways` - The associativity (number of ways) of the set.
    /// * `seed` - Seed for the victim generator.
    pub fn new(ways: usize, seed: u64) -> Self {
        Self::with_rng(ways, StdRng::seed_from_u64(seed))
    }

    /// Creates a Random policy drawing victims from `rng`.
    pub const fn with_rng(ways: usize, rng: StdRng) -> Self {
        Self { ways, rng }
    }

    /// Number of ways this policy draws victims from.
    pub const fn ways(&self) -> usize {
        self.ways
    }
}

impl ReplacementPolicy for RandomPolicy {
    fn on_install(&mut self, _way: usize) {}

    fn on_hit(&mut self, _way: usize) {}

    fn victim(&mut self) -> usize {
        if self.ways == 0 {
            return 0;
        }
        self.rng.gen_range(0..self.ways)
    }

    /// The generator keeps its position; there is no ordering to reset.
    fn reset(&mut self) {}

    fn order(&self) -> Option<Vec<usize>> {
        None
    }
}
