//! Index types and character ranges.

use serde::{Deserialize, Serialize};

/// A single Unicode code point of the logical text.
pub type Character = char;

/// Index of a character in logical (storage) order, or of a visual
/// position when the context says so.
pub type CharacterIndex = u32;

/// A number of characters.
pub type Length = u32;

/// `true` when the character is right to left.
pub type CharacterDirection = bool;

/// A contiguous, half-open range of characters `[index, index + count)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CharacterRun {
    /// First character of the run.
    pub character_index: CharacterIndex,
    /// Number of characters in the run.
    pub number_of_characters: Length,
}

impl CharacterRun {
    pub fn new(character_index: CharacterIndex, number_of_characters: Length) -> Self {
        Self {
            character_index,
            number_of_characters,
        }
    }

    /// One past the last character of the run.
    #[inline]
    pub fn end(&self) -> CharacterIndex {
        self.character_index.saturating_add(self.number_of_characters)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.number_of_characters == 0
    }

    /// Whether `index` lies inside the run.
    #[inline]
    pub fn contains(&self, index: CharacterIndex) -> bool {
        self.character_index <= index && index < self.end()
    }

    /// Whether the run overlaps `[index, index + length)`. An empty range
    /// overlaps nothing.
    #[inline]
    pub fn intersects(&self, index: CharacterIndex, length: Length) -> bool {
        length > 0 && self.character_index < index.saturating_add(length) && index < self.end()
    }
}

// ===================================================================
// Tests
// ===================================================================
