//! # Specimen
//!
//! One individual capable of ciphering and deciphering by means of a
//! monoalphabetic substitution cipher. A specimen is built from a key that is
//! a permutation of `0..N`: the value under index `i` is the alphabet index
//! substituted for character `i`. Specimens participate in reproduction,
//! where a child's key is assembled from the keys of its two parents.
//!
//! All operators here are permutation-preserving. Naive crossover (say,
//! positional averaging) would produce keys that are not bijections and thus
//! cannot decode; the operators below instead keep positional agreement and
//! redistribute the disagreeing values from a shared leftover pool.
//!
//! ## Example
//!
//! ```rust
//! use cipherbreaker::rng::RandomNumberGenerator;
//! use cipherbreaker::specimen::Specimen;
//!
//! let mut rng = RandomNumberGenerator::from_seed(42);
//! let specimen = Specimen::random(26, &mut rng).unwrap();
//!
//! let message = vec![7, 4, 11, 11, 14];
//! let cryptogram = specimen.encode(&message).unwrap();
//! assert_eq!(specimen.decode(&cryptogram).unwrap(), message);
//! ```

use std::collections::BTreeSet;

use crate::error::{ensure_unit_interval, BreakerError, Result};
use crate::permutation;
use crate::rng::RandomNumberGenerator;

/// A candidate substitution key, represented as a permutation of `0..N`
/// together with its functional inverse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Specimen {
    /// `key[i]` is the alphabet index substituted for alphabet index `i`.
    key: Vec<usize>,
    /// `inverse[key[i]] == i`; recomputed whenever a key is installed.
    inverse: Vec<usize>,
}

impl Specimen {
    /// Creates a specimen whose key is a uniformly random permutation of
    /// `0..length`, built by drawing every value without replacement from
    /// the full value pool.
    ///
    /// # Errors
    ///
    /// Returns [`BreakerError::InvalidParameter`] if `length` is zero.
    pub fn random(length: usize, rng: &mut RandomNumberGenerator) -> Result<Self> {
        if length == 0 {
            return Err(BreakerError::InvalidParameter {
                name: "key_length",
                reason: "must be positive".to_string(),
            });
        }

        let mut pool: Vec<usize> = (0..length).collect();
        let key = permutation::draw_without_replacement(length, &mut pool, rng)?;
        Ok(Self::from_key(key))
    }

    /// Installs a pre-built key and computes its inverse.
    ///
    /// No validation is performed; the caller is responsible for `key` being
    /// a permutation of `0..key.len()`.
    pub(crate) fn from_key(key: Vec<usize>) -> Self {
        let mut inverse = vec![0; key.len()];
        for (index, &value) in key.iter().enumerate() {
            inverse[value] = index;
        }
        Self { key, inverse }
    }

    /// Permutation length of this specimen, equal to the alphabet size.
    pub fn len(&self) -> usize {
        self.key.len()
    }

    /// Returns `true` if the specimen holds no key material. Cannot occur
    /// for specimens built through [`Specimen::random`].
    pub fn is_empty(&self) -> bool {
        self.key.is_empty()
    }

    /// The substitution key of this specimen.
    pub fn key(&self) -> &[usize] {
        &self.key
    }

    /// Substitutes each element of `sequence` according to the key,
    /// effectively encoding the given message.
    ///
    /// # Errors
    ///
    /// Returns [`BreakerError::IndexOutOfRange`] if any element of
    /// `sequence` lies outside `[0, N)`.
    pub fn encode(&self, sequence: &[usize]) -> Result<Vec<usize>> {
        Self::substitute(sequence, &self.key)
    }

    /// Substitutes each element of `sequence` according to the inverse key,
    /// effectively decoding the given message.
    ///
    /// `decode(encode(s)) == s` for every valid sequence `s`.
    ///
    /// # Errors
    ///
    /// Returns [`BreakerError::IndexOutOfRange`] if any element of
    /// `sequence` lies outside `[0, N)`.
    pub fn decode(&self, sequence: &[usize]) -> Result<Vec<usize>> {
        Self::substitute(sequence, &self.inverse)
    }

    /// Compares this specimen's key with `other`'s, position by position.
    /// The result can be read as a percentage of sameness of the two keys,
    /// not of any decoded text. `evaluate(self, self)` is always `1.0`.
    ///
    /// # Errors
    ///
    /// Returns [`BreakerError::IncompatibleKeyLength`] if the permutation
    /// lengths differ.
    pub fn evaluate(&self, other: &Specimen) -> Result<f64> {
        match permutation::positional_similarity(&self.key, &other.key) {
            Err(BreakerError::LengthMismatch { left, right }) => {
                Err(BreakerError::IncompatibleKeyLength { left, right })
            }
            result => result,
        }
    }

    /// Creates a new specimen based on this one and `partner`.
    ///
    /// Positions where the parents agree keep their value with probability
    /// `equal_stay_probability`. All other values from both parents fall
    /// into a leftover set, which is then assigned to the unfilled positions
    /// via a random bijection. Since each parent is a permutation of the
    /// same value set, the leftovers match the holes one for one and the
    /// child is again a valid permutation. Finally, with probability
    /// `mutation_chance`, two distinct positions of the child swap values;
    /// single-value keys are never mutated.
    ///
    /// # Errors
    ///
    /// Returns [`BreakerError::IncompatibleKeyLength`] if the partner has a
    /// different permutation length, and [`BreakerError::InvalidParameter`]
    /// if either probability lies outside `[0.0, 1.0]`.
    pub fn reproduce(
        &self,
        partner: &Specimen,
        equal_stay_probability: f64,
        mutation_chance: f64,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Specimen> {
        if self.key.len() != partner.key.len() {
            return Err(BreakerError::IncompatibleKeyLength {
                left: self.key.len(),
                right: partner.key.len(),
            });
        }
        ensure_unit_interval("equal_stay_probability", equal_stay_probability)?;
        ensure_unit_interval("mutation_chance", mutation_chance)?;

        let length = self.key.len();
        let mut child_key = vec![0; length];
        let mut empty_positions = Vec::new();
        // Ordered set: duplicates collapse, and iteration order is
        // deterministic so equal seeds breed equal children.
        let mut unused = BTreeSet::new();

        for i in 0..length {
            if self.key[i] == partner.key[i] && rng.chance(equal_stay_probability) {
                child_key[i] = self.key[i];
            } else {
                empty_positions.push(i);
                unused.insert(self.key[i]);
                unused.insert(partner.key[i]);
            }
        }

        // Both parents hold the same value set and unused holds no
        // duplicates, so leftovers and unfilled positions match one to one.
        debug_assert_eq!(unused.len(), empty_positions.len());

        let mut leftovers: Vec<usize> = unused.into_iter().collect();
        permutation::shuffle(&mut leftovers, rng);
        for (&position, value) in empty_positions.iter().zip(leftovers) {
            child_key[position] = value;
        }

        Self::try_for_mutation(&mut child_key, mutation_chance, rng);

        Ok(Self::from_key(child_key))
    }

    /// Substitutes each element of `sequence` through `key`.
    fn substitute(sequence: &[usize], key: &[usize]) -> Result<Vec<usize>> {
        sequence
            .iter()
            .map(|&index| {
                key.get(index)
                    .copied()
                    .ok_or(BreakerError::IndexOutOfRange {
                        index,
                        length: key.len(),
                    })
            })
            .collect()
    }

    /// With probability `mutation_chance`, swaps the values of two distinct
    /// positions of `key`. Keys shorter than two values are left untouched.
    fn try_for_mutation(key: &mut [usize], mutation_chance: f64, rng: &mut RandomNumberGenerator) {
        if key.len() < 2 {
            return;
        }
        if rng.chance(mutation_chance) {
            let first = rng.index_below(key.len());
            let mut second = rng.index_below(key.len());
            while second == first {
                second = rng.index_below(key.len());
            }
            key.swap(first, second);
        }
    }
}
