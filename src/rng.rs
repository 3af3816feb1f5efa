//! # RandomNumberGenerator
//!
//! The `RandomNumberGenerator` struct wraps the `rand` crate's `StdRng` and
//! provides the draws the search needs: unit-interval coin flips, bounded
//! index draws, and uniform batches.
//!
//! Breeding operations never share one ambient generator. The engine owns a
//! master stream and derives an independent child stream per bred specimen
//! with [`RandomNumberGenerator::fork`], which keeps runs reproducible for a
//! fixed master seed no matter how breeding is later scheduled.
//!
//! ## Example
//!
//! ```rust
//! use cipherbreaker::rng::RandomNumberGenerator;
//!
//! let mut rng = RandomNumberGenerator::from_seed(42);
//! let flips: Vec<bool> = (0..4).map(|_| rng.chance(0.5)).collect();
//! assert_eq!(flips.len(), 4);
//! ```

use rand::{rngs::StdRng, Rng, SeedableRng};
use std::collections::VecDeque;

/// A wrapper around the `rand` crate's `StdRng` that provides the random
/// draws used throughout the evolutionary search.
#[derive(Debug, Clone)]
pub struct RandomNumberGenerator {
    pub rng: StdRng,
}

impl RandomNumberGenerator {
    /// Creates a new `RandomNumberGenerator` seeded from the system entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a new `RandomNumberGenerator` with a specific seed.
    ///
    /// This is useful for reproducible runs, tests and benchmarks.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Derives an independent child stream from this generator.
    ///
    /// The child is seeded by a draw from the parent, so a fixed master seed
    /// fully determines every forked stream. Each bred specimen gets its own
    /// fork instead of sharing the master stream across breeding calls.
    pub fn fork(&mut self) -> Self {
        Self::from_seed(self.rng.gen())
    }

    /// Returns `true` with the given probability.
    ///
    /// A probability of `0.0` never succeeds and `1.0` always does. The
    /// caller is responsible for `probability` lying in `[0.0, 1.0]`.
    pub fn chance(&mut self, probability: f64) -> bool {
        self.rng.gen_bool(probability)
    }

    /// Draws a uniformly random index in `[0, bound)`.
    ///
    /// `bound` must be positive.
    pub fn index_below(&mut self, bound: usize) -> usize {
        self.rng.gen_range(0..bound)
    }

    /// Generates a specified number of random floating-point numbers within
    /// the given range.
    ///
    /// # Parameters
    ///
    /// - `from`: The lower bound of the range (inclusive).
    /// - `to`: The upper bound of the range (exclusive).
    /// - `num`: The number of random numbers to generate.
    ///
    /// # Returns
    ///
    /// A `VecDeque` containing the generated random numbers.
    pub fn fetch_uniform(&mut self, from: f32, to: f32, num: usize) -> VecDeque<f32> {
        let mut uniform_numbers = VecDeque::new();
        uniform_numbers.extend((0..num).map(|_| self.rng.gen_range(from..to)));
        uniform_numbers
    }
}

impl Default for RandomNumberGenerator {
    fn default() -> Self {
        Self::new()
    }
}
