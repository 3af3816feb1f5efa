//! # Alphabet
//!
//! A bijective mapping between the characters of an alphabet and their
//! indices. The engine works purely on index sequences; this codec is the
//! only place where text enters or leaves the system.
//!
//! One `Alphabet` cannot convert text produced with a different `Alphabet`.
//!
//! ## Example
//!
//! ```rust
//! use cipherbreaker::alphabet::Alphabet;
//!
//! let alphabet = Alphabet::new("ABC").unwrap();
//! let indices = alphabet.to_indices("BAC").unwrap();
//! assert_eq!(indices, vec![1, 0, 2]);
//! assert_eq!(alphabet.to_text(&indices).unwrap(), "BAC");
//! ```

use std::collections::HashMap;

use crate::error::{BreakerError, Result};

/// The character set used when no custom alphabet is configured: upper- and
/// lowercase letters interleaved, comma, full stop, and space.
pub const DEFAULT_CHARACTERS: &str = "AaBbCcDdEeFfGgHhIiJjKkLlMmNnOoPpQqRrSsTtUuVvWwXxYyZz,. ";

/// Assigns a numerical value to each character of an alphabet and converts
/// between text and index sequences in both directions.
#[derive(Debug, Clone)]
pub struct Alphabet {
    /// The characters in index order.
    characters: Vec<char>,
    /// Reverse lookup from character to its index.
    index_of: HashMap<char, usize>,
}

impl Alphabet {
    /// Builds an alphabet from the given characters. Each character of the
    /// string becomes one symbol of the alphabet, indexed by its position.
    ///
    /// # Errors
    ///
    /// Returns [`BreakerError::DuplicateCharacter`] if any character occurs
    /// more than once.
    pub fn new(characters: &str) -> Result<Self> {
        let characters: Vec<char> = characters.chars().collect();
        let mut index_of = HashMap::with_capacity(characters.len());

        for (index, &character) in characters.iter().enumerate() {
            if index_of.insert(character, index).is_some() {
                return Err(BreakerError::DuplicateCharacter(character));
            }
        }

        Ok(Self {
            characters,
            index_of,
        })
    }

    /// Number of characters in this alphabet.
    pub fn len(&self) -> usize {
        self.characters.len()
    }

    /// Returns `true` if the alphabet holds no characters.
    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    /// The characters of this alphabet in index order.
    pub fn characters(&self) -> &[char] {
        &self.characters
    }

    /// Converts `text` to the sequence of alphabet indices of its characters.
    ///
    /// # Errors
    ///
    /// Returns [`BreakerError::UnknownCharacter`] carrying the first
    /// character of `text` that is not part of this alphabet.
    pub fn to_indices(&self, text: &str) -> Result<Vec<usize>> {
        text.chars()
            .map(|character| {
                self.index_of
                    .get(&character)
                    .copied()
                    .ok_or(BreakerError::UnknownCharacter(character))
            })
            .collect()
    }

    /// Converts a sequence of alphabet indices back to text.
    ///
    /// # Errors
    ///
    /// Returns [`BreakerError::UnknownIndex`] carrying the first index that
    /// exceeds the alphabet length.
    pub fn to_text(&self, indices: &[usize]) -> Result<String> {
        indices
            .iter()
            .map(|&index| {
                self.characters
                    .get(index)
                    .copied()
                    .ok_or(BreakerError::UnknownIndex(index))
            })
            .collect()
    }
}
