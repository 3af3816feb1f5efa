//! # Error Types
//!
//! This module defines the error type for the cipher-breaking library. Every
//! failure in this crate is local, synchronous and deterministic: there is no
//! I/O on the search path and no retry policy, so errors are reported to the
//! caller immediately instead of being recovered from internally.
//!
//! Running out of iterations before reaching the desired evaluation is *not*
//! an error; see [`TerminationReason`](crate::evolution::TerminationReason).
//!
//! ## Examples
//!
//! ```rust
//! use cipherbreaker::alphabet::Alphabet;
//! use cipherbreaker::error::BreakerError;
//!
//! match Alphabet::new("AAB") {
//!     Err(BreakerError::DuplicateCharacter('A')) => {}
//!     other => panic!("expected a duplicate-character error, got {:?}", other),
//! }
//! ```

use thiserror::Error;

/// Represents errors that can occur while constructing or running the
/// evolutionary search.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BreakerError {
    /// A configured parameter is outside its documented range. Raised before
    /// any population or cryptogram is built.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Name of the offending parameter.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// A character in the input text is not part of the alphabet.
    #[error("unknown character {0:?} is not part of the alphabet")]
    UnknownCharacter(char),

    /// An index in an index sequence does not map back to any character.
    #[error("unknown index {0} exceeds the alphabet length")]
    UnknownIndex(usize),

    /// The same character occurs more than once in an alphabet definition.
    #[error("duplicate character {0:?} in alphabet definition")]
    DuplicateCharacter(char),

    /// Two specimens of different permutation length were compared or bred.
    /// In a single-alphabet run this is a programming-contract violation.
    #[error("incompatible specimens: key lengths {left} and {right} differ")]
    IncompatibleKeyLength {
        /// Key length of the left-hand specimen.
        left: usize,
        /// Key length of the right-hand specimen.
        right: usize,
    },

    /// An element of an encode/decode input lies outside the alphabet range.
    #[error("index {index} out of range for a key of length {length}")]
    IndexOutOfRange {
        /// The offending element.
        index: usize,
        /// Permutation length of the specimen.
        length: usize,
    },

    /// A random draw requested more distinct values than the pool holds.
    /// Indicates an internal invariant break; never retried.
    #[error("cannot draw {requested} distinct values from a pool of {available}")]
    PoolExhausted {
        /// Number of values requested.
        requested: usize,
        /// Number of values available in the pool.
        available: usize,
    },

    /// Two sequences that must be of equal length were not.
    #[error("sequence lengths {left} and {right} differ")]
    LengthMismatch {
        /// Length of the left-hand sequence.
        left: usize,
        /// Length of the right-hand sequence.
        right: usize,
    },

    /// An operation encountered a population with no members.
    #[error("empty population: cannot operate on an empty population")]
    EmptyPopulation,
}

/// A specialized `Result` type for cipher-breaking operations.
pub type Result<T> = std::result::Result<T, BreakerError>;

impl BreakerError {
    pub(crate) fn probability_out_of_range(name: &'static str, value: f64) -> Self {
        BreakerError::InvalidParameter {
            name,
            reason: format!("must lie in [0.0, 1.0], got {}", value),
        }
    }
}

/// Checks that a probability-like parameter lies in the unit interval.
///
/// The range check is disjunctive: a value is rejected when it is below zero
/// *or* above one.
pub(crate) fn ensure_unit_interval(name: &'static str, value: f64) -> Result<()> {
    if value < 0.0 || value > 1.0 || value.is_nan() {
        return Err(BreakerError::probability_out_of_range(name, value));
    }
    Ok(())
}
