//! Bidirectional reordering tables.
//!
//! The bidi resolution itself is computed elsewhere and handed to the model
//! as two run tables:
//!
//! - [`BidirectionalParagraphInfoRun`]: the base direction of each paragraph
//!   that contains right-to-left text.
//! - [`BidirectionalLineInfoRun`]: for each laid-out line, the visual to
//!   logical permutation of its characters, relative to the line start.
//!
//! [`ReorderTables`] folds those into three whole-text maps: visual to
//! logical, its inverse, and the caret slot map (`N + 1` slots) used to turn
//! a visual caret position into a logical insertion index.

use lumen_core::{CharacterDirection, CharacterIndex, CharacterRun, Length};

// ── Run tables ──────────────────────────────────────────────────────

/// Base direction of a paragraph.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct BidirectionalParagraphInfoRun {
    pub character_run: CharacterRun,
    pub is_right_to_left: bool,
}

impl BidirectionalParagraphInfoRun {
    pub fn new(character_run: CharacterRun, is_right_to_left: bool) -> Self {
        Self {
            character_run,
            is_right_to_left,
        }
    }
}

/// Visual order of one line.
///
/// `visual_to_logical_map[v]` is the logical offset, relative to
/// `character_run.character_index`, of the character shown at visual
/// offset `v`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BidirectionalLineInfoRun {
    pub character_run: CharacterRun,
    pub visual_to_logical_map: Vec<CharacterIndex>,
}

impl BidirectionalLineInfoRun {
    pub fn new(character_run: CharacterRun, visual_to_logical_map: Vec<CharacterIndex>) -> Self {
        Self {
            character_run,
            visual_to_logical_map,
        }
    }
}

/// Whether the paragraph containing `index` is right to left.
///
/// Characters outside every bidi paragraph are left to right.
pub fn is_right_to_left_paragraph(
    paragraphs: &[BidirectionalParagraphInfoRun],
    index: CharacterIndex,
) -> bool {
    paragraphs
        .iter()
        .find(|p| p.character_run.contains(index))
        .is_some_and(|p| p.is_right_to_left)
}

// ── Reorder tables ──────────────────────────────────────────────────

/// The visual/logical/caret maps of a whole text.
///
/// All three maps are empty when the text has no reordering; every lookup
/// then falls back to identity.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReorderTables {
    /// `visual_to_logical[v]` = logical index shown at visual position `v`.
    pub visual_to_logical: Vec<CharacterIndex>,
    /// Inverse of `visual_to_logical`.
    pub logical_to_visual: Vec<CharacterIndex>,
    /// `visual_to_logical_cursor[s]` = logical insertion index for caret slot `s`.
    pub visual_to_logical_cursor: Vec<CharacterIndex>,
}

impl ReorderTables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.visual_to_logical.is_empty()
    }

    pub fn clear(&mut self) {
        self.visual_to_logical.clear();
        self.logical_to_visual.clear();
        self.visual_to_logical_cursor.clear();
    }

    /// Identity maps for a text of `total` characters.
    pub fn reset(&mut self, total: Length) {
        self.visual_to_logical = (0..total).collect();
        self.logical_to_visual = (0..total).collect();
        self.visual_to_logical_cursor = (0..=total).collect();
    }

    /// Rebuild the maps for `[start_index, start_index + number_of_characters)`.
    ///
    /// `line_runs` are the lines of that range, in logical order.
    /// `directions` may be empty (all left to right). An empty `line_runs`
    /// covering the whole text clears every map.
    pub fn rebuild(
        &mut self,
        line_runs: &[BidirectionalLineInfoRun],
        paragraphs: &[BidirectionalParagraphInfoRun],
        directions: &[CharacterDirection],
        total: Length,
        start_index: CharacterIndex,
        number_of_characters: Length,
    ) {
        if start_index > total {
            log::warn!("ReorderTables: start {start_index} past the end of a {total}-character text");
            return;
        }
        let end_index = start_index.saturating_add(number_of_characters).min(total);

        if line_runs.is_empty() && start_index == 0 && end_index == total {
            self.clear();
            return;
        }

        if self.visual_to_logical.len() != total as usize
            || self.visual_to_logical_cursor.len() != total as usize + 1
        {
            self.reset(total);
        }

        self.fill_visual_to_logical(line_runs, start_index, end_index);

        for (visual, &logical) in self.visual_to_logical.iter().enumerate() {
            if let Some(slot) = self.logical_to_visual.get_mut(logical as usize) {
                *slot = visual as CharacterIndex;
            }
        }

        self.fill_cursor_map(paragraphs, directions, start_index, end_index);
    }

    fn fill_visual_to_logical(
        &mut self,
        line_runs: &[BidirectionalLineInfoRun],
        start_index: CharacterIndex,
        end_index: CharacterIndex,
    ) {
        let mut visual = start_index;
        for line in line_runs {
            let run = line.character_run;
            if run.end() <= start_index || run.character_index >= end_index {
                continue;
            }

            // Not reordered between the previous line and this one.
            while visual < run.character_index {
                self.visual_to_logical[visual as usize] = visual;
                visual += 1;
            }

            for offset in 0..run.number_of_characters {
                let position = run.character_index + offset;
                if position < start_index || position >= end_index {
                    continue;
                }
                let logical = match line.visual_to_logical_map.get(offset as usize) {
                    Some(&local) if local < run.number_of_characters => run.character_index + local,
                    _ => position,
                };
                self.visual_to_logical[position as usize] = logical;
            }
            visual = visual.max(run.end().min(end_index));
        }

        while visual < end_index {
            self.visual_to_logical[visual as usize] = visual;
            visual += 1;
        }
    }

    fn fill_cursor_map(
        &mut self,
        paragraphs: &[BidirectionalParagraphInfoRun],
        directions: &[CharacterDirection],
        start_index: CharacterIndex,
        end_index: CharacterIndex,
    ) {
        let direction = |index: CharacterIndex| directions.get(index as usize).copied().unwrap_or(false);

        for slot in start_index..=end_index {
            // The caret slot belongs to the paragraph of the character before it.
            let character = if slot == start_index { start_index } else { slot - 1 };
            let is_rtl_paragraph = is_right_to_left_paragraph(paragraphs, character);

            let logical = if slot == start_index {
                if is_rtl_paragraph { end_index } else { start_index }
            } else if slot == end_index {
                if is_rtl_paragraph { start_index } else { end_index }
            } else {
                let p0 = self.visual_to_logical[slot as usize - 1];
                let p1 = self.visual_to_logical[slot as usize];
                let d0 = direction(p0);
                let d1 = direction(p1);
                if d0 == d1 {
                    if d0 { p0 } else { p1 }
                } else if is_rtl_paragraph {
                    if d1 { p1 + 1 } else { p0 }
                } else if d0 {
                    p1
                } else {
                    p0 + 1
                }
            };
            self.visual_to_logical_cursor[slot as usize] = logical;
        }
    }

    /// Logical index shown at `visual`; identity without a map.
    pub fn logical_index(&self, visual: CharacterIndex) -> CharacterIndex {
        self.visual_to_logical
            .get(visual as usize)
            .copied()
            .unwrap_or(visual)
    }

    /// Visual position of `logical`; identity without a map.
    pub fn visual_index(&self, logical: CharacterIndex) -> CharacterIndex {
        self.logical_to_visual
            .get(logical as usize)
            .copied()
            .unwrap_or(logical)
    }

    /// Logical insertion index for caret `slot`; identity without a map.
    pub fn logical_cursor_index(&self, slot: CharacterIndex) -> CharacterIndex {
        self.visual_to_logical_cursor
            .get(slot as usize)
            .copied()
            .unwrap_or(slot)
    }
}

// ===================================================================
// Tests
// ===================================================================
