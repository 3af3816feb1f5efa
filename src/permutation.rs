//! # Permutation Utilities
//!
//! Stateless helpers for working with permutations and random draws: sample
//! a uniformly random permutation, draw distinct values from a pool without
//! replacement, shuffle a slice in place, and compute the positional
//! similarity of two equal-length sequences.
//!
//! These are the only primitives the breeding operators need; everything
//! here is a pure function over its inputs plus the supplied random source.
//!
//! ## Example
//!
//! ```rust
//! use cipherbreaker::permutation;
//!
//! let a = [5, 10, 15, 20];
//! let b = [5, 10, 20, 25];
//! assert_eq!(permutation::positional_similarity(&a, &b).unwrap(), 0.5);
//! ```

use rand::seq::SliceRandom;

use crate::error::{BreakerError, Result};
use crate::rng::RandomNumberGenerator;

/// Draws a uniformly random permutation of `0..pool_size`.
///
/// Implemented as a Fisher-Yates shuffle, which is uniform over all
/// `pool_size!` permutations given a uniform random source.
pub fn sample_permutation(pool_size: usize, rng: &mut RandomNumberGenerator) -> Vec<usize> {
    let mut values: Vec<usize> = (0..pool_size).collect();
    values.shuffle(&mut rng.rng);
    values
}

/// Shuffles `values` in place.
pub fn shuffle<T>(values: &mut [T], rng: &mut RandomNumberGenerator) {
    values.shuffle(&mut rng.rng);
}

/// Draws `count` distinct values from `pool` in random order, removing them
/// from the pool. Superfluous elements are left behind.
///
/// # Errors
///
/// Returns [`BreakerError::PoolExhausted`] if `count` exceeds the pool size.
pub fn draw_without_replacement<T>(
    count: usize,
    pool: &mut Vec<T>,
    rng: &mut RandomNumberGenerator,
) -> Result<Vec<T>> {
    if count > pool.len() {
        return Err(BreakerError::PoolExhausted {
            requested: count,
            available: pool.len(),
        });
    }

    let mut drawn = Vec::with_capacity(count);
    for _ in 0..count {
        let index = rng.index_below(pool.len());
        drawn.push(pool.swap_remove(index));
    }
    Ok(drawn)
}

/// Computes the fraction of positions at which `a` and `b` hold equal values.
///
/// # Errors
///
/// Returns [`BreakerError::LengthMismatch`] if the sequences differ in
/// length.
pub fn positional_similarity<T: PartialEq>(a: &[T], b: &[T]) -> Result<f64> {
    if a.len() != b.len() {
        return Err(BreakerError::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    if a.is_empty() {
        // Two empty sequences agree at every position there is.
        return Ok(1.0);
    }

    let matches = a.iter().zip(b.iter()).filter(|(x, y)| x == y).count();
    Ok(matches as f64 / a.len() as f64)
}
