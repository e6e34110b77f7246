//! Paragraph table.
//!
//! Paragraphs are delimited by forced line breaks (the breaking character
//! belongs to the paragraph it ends) and tile the text without gaps. The
//! table is rebuilt incrementally after an edit:
//!
//! 1. [`clear_paragraph_info`] drops the paragraphs touched by the edit and
//!    pulls the following ones back over the cleared span.
//! 2. The caller edits the characters and their line-break flags.
//! 3. [`create_paragraph_info`] scans the new characters of that span and
//!    inserts the paragraphs found there, pushing the following ones forward.

use lumen_core::{CharacterIndex, CharacterRun, Length};

/// Index into the paragraph table.
pub type ParagraphRunIndex = u32;

/// Line breaking opportunity after a character, computed externally.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LineBreakInfo {
    /// A forced break (new paragraph) follows this character.
    MustBreak,
    AllowBreak,
    #[default]
    NoBreak,
}

/// One paragraph of the text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ParagraphRun {
    pub character_run: CharacterRun,
}

impl ParagraphRun {
    pub fn new(character_index: CharacterIndex, number_of_characters: Length) -> Self {
        Self {
            character_run: CharacterRun::new(character_index, number_of_characters),
        }
    }
}

/// Insert the paragraphs found in `[start_index, start_index + number_of_characters)`.
///
/// Paragraphs starting at or after `start_index` are shifted forward by
/// `number_of_characters`. A trailing segment without a forced break is
/// merged into the following paragraph, or becomes the last paragraph when
/// nothing follows.
pub fn create_paragraph_info(
    paragraphs: &mut Vec<ParagraphRun>,
    line_break_info: &[LineBreakInfo],
    start_index: CharacterIndex,
    number_of_characters: Length,
) {
    let total = line_break_info.len() as Length;
    let end_index = start_index.saturating_add(number_of_characters).min(total);
    if start_index >= end_index {
        return;
    }

    let insert_at = paragraphs
        .iter()
        .position(|p| p.character_run.character_index >= start_index)
        .unwrap_or(paragraphs.len());

    let mut new_paragraphs = Vec::new();
    let mut first_index = start_index;
    for index in start_index..end_index {
        if line_break_info[index as usize] == LineBreakInfo::MustBreak {
            new_paragraphs.push(ParagraphRun::new(first_index, 1 + index - first_index));
            first_index = index + 1;
        }
    }
    let number_of_new_paragraphs = new_paragraphs.len();

    // Push the following paragraphs past the scanned span.
    let shift = end_index - start_index;
    for paragraph in &mut paragraphs[insert_at..] {
        paragraph.character_run.character_index += shift;
    }

    let tail = CharacterRun::new(first_index, end_index - first_index);
    let mut merged_tail = false;
    if !tail.is_empty() {
        if let Some(next) = paragraphs.get_mut(insert_at) {
            if next.character_run.character_index == end_index {
                next.character_run.character_index = tail.character_index;
                next.character_run.number_of_characters += tail.number_of_characters;
                merged_tail = true;
            }
        }
        if !merged_tail {
            new_paragraphs.push(ParagraphRun { character_run: tail });
        }
    }

    log::debug!(
        "create_paragraph_info: [{start_index}, {end_index}) -> {} paragraph(s){}",
        number_of_new_paragraphs,
        if merged_tail { " + merged tail" } else { "" }
    );

    paragraphs.splice(insert_at..insert_at, new_paragraphs);
}

/// Remove every paragraph intersecting `[start_index, end_index]` (both ends
/// included, so an insertion point clears the paragraph it falls in) and
/// shift the following paragraphs back over the removed span.
///
/// Returns the span the removed paragraphs covered, or `None` when nothing
/// was removed.
pub fn clear_paragraph_info(
    paragraphs: &mut Vec<ParagraphRun>,
    start_index: CharacterIndex,
    end_index: CharacterIndex,
) -> Option<CharacterRun> {
    let first = paragraphs.iter().position(|p| {
        p.character_run.character_index <= end_index && start_index < p.character_run.end()
    })?;
    let last = paragraphs[first..]
        .iter()
        .rposition(|p| {
            p.character_run.character_index <= end_index && start_index < p.character_run.end()
        })
        .map(|offset| first + offset)
        .unwrap_or(first);

    let span_start = paragraphs[first].character_run.character_index;
    let span_end = paragraphs[last].character_run.end();
    let span = CharacterRun::new(span_start, span_end - span_start);

    paragraphs.drain(first..=last);
    for paragraph in &mut paragraphs[first..] {
        paragraph.character_run.character_index -= span.number_of_characters;
    }
    Some(span)
}

/// Indices of the paragraphs intersecting `[index, index + length)`.
pub fn find_paragraphs(
    paragraphs: &[ParagraphRun],
    index: CharacterIndex,
    length: Length,
) -> Vec<ParagraphRunIndex> {
    paragraphs
        .iter()
        .enumerate()
        .filter(|(_, p)| p.character_run.intersects(index, length))
        .map(|(i, _)| i as ParagraphRunIndex)
        .collect()
}

// ===================================================================
// Tests
// ===================================================================
