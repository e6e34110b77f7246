//! Style run lists.
//!
//! A [`RunList`] stores `(range, value)` pairs for one style dimension
//! (color, font, underline, …). Runs are meant to be disjoint but the list
//! does not enforce it: a lookup that finds several runs covering an index
//! returns the one stored **last**. Editors rely on that tie-break while a
//! new run temporarily overlaps an old one.
//!
//! After the character sequence is edited, [`RunList::update`] shifts,
//! grows, shrinks and drops runs so that they keep tagging the same
//! characters.

use serde::{Deserialize, Serialize};

use crate::types::{CharacterIndex, CharacterRun, Length};

/// A character range tagged with one style value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StyleRun<T> {
    pub character_run: CharacterRun,
    pub value: T,
}

impl<T> StyleRun<T> {
    pub fn new(character_index: CharacterIndex, number_of_characters: Length, value: T) -> Self {
        Self {
            character_run: CharacterRun::new(character_index, number_of_characters),
            value,
        }
    }
}

/// Ordered storage of the runs of one style dimension.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunList<T> {
    runs: Vec<StyleRun<T>>,
}

impl<T> Default for RunList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RunList<T> {
    pub fn new() -> Self {
        Self { runs: Vec::new() }
    }

    /// Append a run at the end of the storage order.
    pub fn push(&mut self, run: StyleRun<T>) {
        self.runs.push(run);
    }

    /// Append a run covering `[character_index, character_index + number_of_characters)`.
    pub fn add(&mut self, character_index: CharacterIndex, number_of_characters: Length, value: T) {
        self.runs
            .push(StyleRun::new(character_index, number_of_characters, value));
    }

    /// Replace the whole list.
    pub fn set(&mut self, runs: Vec<StyleRun<T>>) {
        self.runs = runs;
    }

    pub fn clear(&mut self) {
        self.runs.clear();
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    pub fn as_slice(&self) -> &[StyleRun<T>] {
        &self.runs
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StyleRun<T>> {
        self.runs.iter()
    }

    /// The first run, in storage order, covering `index`.
    pub fn find_first(&self, index: CharacterIndex) -> Option<&StyleRun<T>> {
        self.runs
            .iter()
            .find(|run| run.character_run.contains(index))
    }

    /// The last run, in storage order, covering `index`.
    ///
    /// Storage order, not insertion time: a run moved by [`set`](Self::set)
    /// competes by its new position.
    pub fn find_last(&self, index: CharacterIndex) -> Option<&StyleRun<T>> {
        self.runs
            .iter()
            .rev()
            .find(|run| run.character_run.contains(index))
    }

    /// Runs overlapping `[index, index + length)`, in storage order.
    pub fn intersecting(
        &self,
        index: CharacterIndex,
        length: Length,
    ) -> impl Iterator<Item = &StyleRun<T>> + '_ {
        self.runs
            .iter()
            .filter(move |run| run.character_run.intersects(index, length))
    }

    /// Rewrite the runs after `delta` characters were inserted (`delta > 0`)
    /// or removed (`delta < 0`) at `index`.
    ///
    /// `total_characters` is the length of the text **after** the edit; runs
    /// are clipped to it. Runs left with no characters are taken out of the
    /// list and returned, in their previous storage order.
    ///
    /// Insertion: a run that starts at or after `index` is shifted; a run
    /// that contains `index` or ends exactly at it grows.
    /// Removal of `[index, index + n)`: runs after the removed span are
    /// shifted back, overlapping runs lose the overlapping characters and
    /// start no later than `index`.
    pub fn update(
        &mut self,
        index: CharacterIndex,
        delta: i32,
        total_characters: Length,
    ) -> Vec<StyleRun<T>> {
        if delta > 0 {
            let inserted = delta.unsigned_abs();
            for run in &mut self.runs {
                let character_run = &mut run.character_run;
                if index <= character_run.character_index {
                    character_run.character_index += inserted;
                } else if index <= character_run.end() {
                    character_run.number_of_characters += inserted;
                }
            }
        } else if delta < 0 {
            let removed = delta.unsigned_abs();
            let last_index = index.saturating_add(removed);
            for run in &mut self.runs {
                let character_run = &mut run.character_run;
                let end = character_run.end();
                if last_index <= character_run.character_index {
                    character_run.character_index -= removed;
                } else if index < end {
                    let overlap = end.min(last_index) - character_run.character_index.max(index);
                    character_run.number_of_characters -= overlap;
                    character_run.character_index = character_run.character_index.min(index);
                }
            }
        }

        // Clip to the text.
        for run in &mut self.runs {
            let character_run = &mut run.character_run;
            if character_run.character_index >= total_characters {
                character_run.number_of_characters = 0;
            } else if character_run.end() > total_characters {
                character_run.number_of_characters =
                    total_characters - character_run.character_index;
            }
        }

        let (kept, removed): (Vec<_>, Vec<_>) = std::mem::take(&mut self.runs)
            .into_iter()
            .partition(|run| !run.character_run.is_empty());
        self.runs = kept;

        if !removed.is_empty() {
            log::trace!(
                "RunList: edit at {index} ({delta:+}) removed {} run(s)",
                removed.len()
            );
        }
        removed
    }
}

impl<'a, T> IntoIterator for &'a RunList<T> {
    type Item = &'a StyleRun<T>;
    type IntoIter = std::slice::Iter<'a, StyleRun<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.runs.iter()
    }
}

impl<T> From<Vec<StyleRun<T>>> for RunList<T> {
    fn from(runs: Vec<StyleRun<T>>) -> Self {
        Self { runs }
    }
}

// ===================================================================
// Tests
// ===================================================================
