//! The logical text model.
//!
//! [`LogicalModel`] owns everything about a text that does not depend on
//! layout: the characters in logical order, one run list per style
//! dimension, line-break flags, paragraphs, and the bidi tables with the
//! visual/logical maps derived from them.
//!
//! The model never computes scripts, line breaks or bidi levels itself;
//! those come from the segmentation and bidi passes of the caller.

use lumen_core::{Character, CharacterDirection, CharacterIndex, CharacterRun, Length, RunList};

use crate::bidi::{BidirectionalLineInfoRun, BidirectionalParagraphInfoRun, ReorderTables};
use crate::paragraph::{self, LineBreakInfo, ParagraphRun, ParagraphRunIndex};
use crate::script::{Script, ScriptRun};
use crate::style::{Color, FontDescription, InputStyle, StrikethroughStyle, UnderlineStyle};

/// Characters, style runs, paragraphs and reordering tables of one text.
#[derive(Clone, Debug, Default)]
pub struct LogicalModel {
    /// Characters in logical order.
    pub text: Vec<Character>,

    pub script_runs: RunList<Script>,

    // Style dimensions.
    pub color_runs: RunList<Color>,
    pub font_description_runs: RunList<FontDescription>,
    pub underline_runs: RunList<UnderlineStyle>,
    pub strikethrough_runs: RunList<StrikethroughStyle>,
    pub background_color_runs: RunList<Color>,
    pub character_spacing_runs: RunList<f32>,

    /// One flag per character.
    pub line_break_info: Vec<LineBreakInfo>,
    pub paragraph_info: Vec<ParagraphRun>,

    pub bidirectional_paragraph_info: Vec<BidirectionalParagraphInfoRun>,
    /// One flag per character, `true` = right to left. Empty = all left to right.
    pub character_directions: Vec<CharacterDirection>,
    pub reorder: ReorderTables,
}

impl LogicalModel {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Characters ──────────────────────────────────────────────────

    /// Replace the characters.
    ///
    /// Style runs are kept; everything derived from the old characters
    /// (line breaks, paragraphs, bidi tables) is dropped.
    pub fn set_text(&mut self, text: &str) {
        self.text = text.chars().collect();
        self.line_break_info.clear();
        self.paragraph_info.clear();
        self.bidirectional_paragraph_info.clear();
        self.character_directions.clear();
        self.reorder.clear();
    }

    pub fn text(&self) -> &[Character] {
        &self.text
    }

    pub fn number_of_characters(&self) -> Length {
        self.text.len() as Length
    }

    pub fn get_character(&self, index: CharacterIndex) -> Option<Character> {
        self.text.get(index as usize).copied()
    }

    // ── Scripts ─────────────────────────────────────────────────────

    pub fn set_scripts(&mut self, runs: Vec<ScriptRun>) {
        self.script_runs.set(runs);
    }

    /// Script of the first script run containing `index`, or
    /// [`Script::Unknown`].
    pub fn get_script(&self, index: CharacterIndex) -> Script {
        self.script_runs
            .find_first(index)
            .map(|run| run.value)
            .unwrap_or(Script::Unknown)
    }

    /// Script runs overlapping `[index, index + length)`.
    pub fn get_script_runs(&self, index: CharacterIndex, length: Length) -> Vec<ScriptRun> {
        self.script_runs.intersecting(index, length).cloned().collect()
    }

    // ── Line breaks ─────────────────────────────────────────────────

    pub fn set_line_break_info(&mut self, info: Vec<LineBreakInfo>) {
        if info.len() != self.text.len() {
            log::warn!(
                "LogicalModel: {} line-break flags for {} characters",
                info.len(),
                self.text.len()
            );
        }
        self.line_break_info = info;
    }

    /// Break flag after `index`; [`LineBreakInfo::NoBreak`] out of range.
    pub fn get_line_break_info(&self, index: CharacterIndex) -> LineBreakInfo {
        self.line_break_info
            .get(index as usize)
            .copied()
            .unwrap_or_default()
    }

    // ── Bidi ────────────────────────────────────────────────────────

    pub fn set_bidirectional_info(&mut self, paragraphs: Vec<BidirectionalParagraphInfoRun>) {
        self.bidirectional_paragraph_info = paragraphs;
    }

    /// Bidi paragraphs overlapping `[index, index + length)`.
    pub fn get_bidirectional_info(
        &self,
        index: CharacterIndex,
        length: Length,
    ) -> Vec<BidirectionalParagraphInfoRun> {
        self.bidirectional_paragraph_info
            .iter()
            .filter(|p| p.character_run.intersects(index, length))
            .copied()
            .collect()
    }

    pub fn set_character_directions(&mut self, directions: Vec<CharacterDirection>) {
        self.character_directions = directions;
    }

    /// Directions of `[index, index + length)` clipped to the text. All
    /// `false` when no directions are set.
    pub fn get_character_directions(&self, index: CharacterIndex, length: Length) -> Vec<CharacterDirection> {
        let total = self.number_of_characters();
        let start = index.min(total);
        let end = index.saturating_add(length).min(total);
        (start..end).map(|i| self.get_character_direction(i)).collect()
    }

    /// `true` when the character at `index` is right to left. `false` when
    /// no directions are set or `index` is out of range.
    pub fn get_character_direction(&self, index: CharacterIndex) -> CharacterDirection {
        self.character_directions
            .get(index as usize)
            .copied()
            .unwrap_or(false)
    }

    /// Rebuild the visual/logical maps for `[start_index, start_index + number_of_characters)`
    /// from the reordered lines of that range.
    ///
    /// Passing no lines for the whole text drops the maps and the model
    /// reverts to identity order.
    pub fn set_visual_to_logical_map(
        &mut self,
        bidi_line_infos: &[BidirectionalLineInfoRun],
        start_index: CharacterIndex,
        number_of_characters: Length,
    ) {
        let total = self.number_of_characters();
        self.reorder.rebuild(
            bidi_line_infos,
            &self.bidirectional_paragraph_info,
            &self.character_directions,
            total,
            start_index,
            number_of_characters,
        );
    }

    /// Logical index of the character shown at visual position `visual_index`.
    pub fn get_logical_character_index(&self, visual_index: CharacterIndex) -> CharacterIndex {
        self.reorder.logical_index(visual_index)
    }

    /// Visual position of the character at `logical_index`.
    pub fn get_visual_character_index(&self, logical_index: CharacterIndex) -> CharacterIndex {
        self.reorder.visual_index(logical_index)
    }

    /// Logical insertion index for the caret at visual slot `visual_cursor`
    /// (`0..=N`).
    pub fn get_logical_cursor_index(&self, visual_cursor: CharacterIndex) -> CharacterIndex {
        self.reorder.logical_cursor_index(visual_cursor)
    }

    // ── Style runs ──────────────────────────────────────────────────

    pub fn add_color_run(&mut self, index: CharacterIndex, length: Length, color: Color) {
        self.color_runs.add(index, length, color);
    }

    pub fn add_font_description_run(&mut self, index: CharacterIndex, length: Length, description: FontDescription) {
        self.font_description_runs.add(index, length, description);
    }

    pub fn add_underline_run(&mut self, index: CharacterIndex, length: Length, underline: UnderlineStyle) {
        self.underline_runs.add(index, length, underline);
    }

    pub fn add_strikethrough_run(&mut self, index: CharacterIndex, length: Length, strikethrough: StrikethroughStyle) {
        self.strikethrough_runs.add(index, length, strikethrough);
    }

    pub fn add_background_color_run(&mut self, index: CharacterIndex, length: Length, color: Color) {
        self.background_color_runs.add(index, length, color);
    }

    pub fn add_character_spacing_run(&mut self, index: CharacterIndex, length: Length, spacing: f32) {
        self.character_spacing_runs.add(index, length, spacing);
    }

    /// Update every style dimension after `number_of_characters` characters
    /// were inserted (positive) or removed (negative) at `index`.
    ///
    /// Call after editing [`text`](Self::text): runs are clipped to the new
    /// length. Runs left empty are dropped.
    pub fn update_text_style_runs(&mut self, index: CharacterIndex, number_of_characters: i32) {
        if number_of_characters == 0 {
            return;
        }
        let total = self.number_of_characters();

        let removed = self.color_runs.update(index, number_of_characters, total).len()
            + self.font_description_runs.update(index, number_of_characters, total).len()
            + self.underline_runs.update(index, number_of_characters, total).len()
            + self.strikethrough_runs.update(index, number_of_characters, total).len()
            + self.background_color_runs.update(index, number_of_characters, total).len()
            + self.character_spacing_runs.update(index, number_of_characters, total).len();

        log::debug!(
            "LogicalModel: edit at {index} ({number_of_characters:+}), {total} characters, {removed} style run(s) dropped"
        );
    }

    /// Resolve the style of the character at `index` into `style`.
    ///
    /// For each dimension the last run in storage order covering `index`
    /// wins. Font description fields resolve independently. Fields with no
    /// covering run keep the value already in `style`.
    pub fn retrieve_style(&self, index: CharacterIndex, style: &mut InputStyle) {
        if let Some(run) = self.color_runs.find_last(index) {
            style.text_color = run.value;
        }

        self.retrieve_font_description(index, style);

        if let Some(run) = self.underline_runs.find_last(index) {
            style.underline = Some(run.value);
        }
        if let Some(run) = self.strikethrough_runs.find_last(index) {
            style.strikethrough = Some(run.value);
        }
        if let Some(run) = self.background_color_runs.find_last(index) {
            style.background_color = run.value;
        }
        if let Some(run) = self.character_spacing_runs.find_last(index) {
            style.character_spacing = run.value;
        }
    }

    fn retrieve_font_description(&self, index: CharacterIndex, style: &mut InputStyle) {
        let mut family = None;
        let mut weight = None;
        let mut stretch = None;
        let mut slant = None;
        let mut size = None;

        for run in self.font_description_runs.iter().rev() {
            if !run.character_run.contains(index) {
                continue;
            }
            let desc = &run.value;
            family = family.or(desc.family.as_ref());
            weight = weight.or(desc.weight);
            stretch = stretch.or(desc.stretch);
            slant = slant.or(desc.style);
            size = size.or(desc.size);
        }

        if let Some(family) = family {
            style.family.clone_from(family);
        }
        if let Some(weight) = weight {
            style.weight = weight;
        }
        if let Some(stretch) = stretch {
            style.stretch = stretch;
        }
        if let Some(slant) = slant {
            style.style = slant;
        }
        if let Some(size) = size {
            style.size = size;
        }
    }

    // ── Paragraphs ──────────────────────────────────────────────────

    /// Add the paragraphs of `[start_index, start_index + number_of_characters)`
    /// from the line-break flags, shifting later paragraphs forward.
    pub fn create_paragraph_info(&mut self, start_index: CharacterIndex, number_of_characters: Length) {
        paragraph::create_paragraph_info(
            &mut self.paragraph_info,
            &self.line_break_info,
            start_index,
            number_of_characters,
        );
    }

    /// Remove the paragraphs touching `[start_index, end_index]` and return
    /// the span they covered.
    pub fn clear_paragraph_info(&mut self, start_index: CharacterIndex, end_index: CharacterIndex) -> Option<CharacterRun> {
        paragraph::clear_paragraph_info(&mut self.paragraph_info, start_index, end_index)
    }

    /// Paragraphs overlapping `[index, index + length)`.
    pub fn find_paragraphs(&self, index: CharacterIndex, length: Length) -> Vec<ParagraphRunIndex> {
        paragraph::find_paragraphs(&self.paragraph_info, index, length)
    }

    pub fn number_of_paragraphs(&self) -> Length {
        self.paragraph_info.len() as Length
    }
}

// ===================================================================
// Tests
// ===================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{FontStyle, UnderlineKind, BLACK};

    const RED: Color = [1.0, 0.0, 0.0, 1.0];
    const BLUE: Color = [0.0, 0.0, 1.0, 1.0];

    fn model_with(text: &str) -> LogicalModel {
        let mut model = LogicalModel::new();
        model.set_text(text);
        model
    }

    #[test]
    fn test_get_script() {
        let mut model = model_with("abc אב");
        model.set_scripts(vec![
            ScriptRun::new(0, 4, Script::Latin),
            ScriptRun::new(4, 2, Script::Hebrew),
        ]);
        assert_eq!(model.get_script(0), Script::Latin);
        assert_eq!(model.get_script(5), Script::Hebrew);
        assert_eq!(model.get_script(6), Script::Unknown);
        assert_eq!(model.get_script_runs(3, 2).len(), 2);
    }

    #[test]
    fn test_get_script_first_match() {
        let mut model = model_with("abc");
        model.set_scripts(vec![
            ScriptRun::new(0, 3, Script::Latin),
            ScriptRun::new(1, 1, Script::Greek),
        ]);
        assert_eq!(model.get_script(1), Script::Latin);
    }

    #[test]
    fn test_character_direction_defaults() {
        let mut model = model_with("abc");
        assert!(!model.get_character_direction(0));
        model.set_character_directions(vec![false, true, true]);
        assert!(model.get_character_direction(1));
        assert!(!model.get_character_direction(3));
        assert_eq!(model.get_character_directions(1, 10), vec![true, true]);
    }

    #[test]
    fn test_identity_without_bidi() {
        let model = model_with("hello");
        for i in 0..5 {
            assert_eq!(model.get_logical_character_index(i), i);
            assert_eq!(model.get_visual_character_index(i), i);
        }
        assert_eq!(model.get_logical_cursor_index(5), 5);
    }

    #[test]
    fn test_visual_to_logical_map_mixed() {
        let mut model = model_with("abCDef");
        model.set_character_directions(vec![false, false, true, true, false, false]);
        model.set_bidirectional_info(vec![BidirectionalParagraphInfoRun::new(CharacterRun::new(0, 6), false)]);
        let line = BidirectionalLineInfoRun::new(CharacterRun::new(0, 6), vec![0, 1, 3, 2, 4, 5]);
        model.set_visual_to_logical_map(&[line], 0, 6);

        assert_eq!(model.get_logical_character_index(2), 3);
        assert_eq!(model.get_visual_character_index(3), 2);
        for v in 0..6 {
            let logical = model.get_logical_character_index(v);
            assert_eq!(model.get_visual_character_index(logical), v);
        }
        assert_eq!(model.get_logical_cursor_index(0), 0);
        assert_eq!(model.get_logical_cursor_index(3), 3);
        assert_eq!(model.get_logical_cursor_index(6), 6);

        model.set_visual_to_logical_map(&[], 0, 6);
        assert!(model.reorder.is_empty());
        assert_eq!(model.get_logical_character_index(2), 2);
    }

    #[test]
    fn test_retrieve_style_last_wins() {
        let mut model = model_with("abcdef");
        model.add_color_run(0, 6, RED);
        model.add_color_run(2, 2, BLUE);

        let mut style = InputStyle::default();
        model.retrieve_style(3, &mut style);
        assert_eq!(style.text_color, BLUE);

        let mut style = InputStyle::default();
        model.retrieve_style(5, &mut style);
        assert_eq!(style.text_color, RED);
    }

    #[test]
    fn test_retrieve_style_keeps_defaults() {
        let mut model = model_with("abc");
        model.add_underline_run(0, 1, UnderlineStyle::default());

        let mut style = InputStyle::default();
        model.retrieve_style(2, &mut style);
        assert_eq!(style, InputStyle::default());

        model.retrieve_style(0, &mut style);
        assert_eq!(style.underline.map(|u| u.kind), Some(UnderlineKind::Solid));
        assert_eq!(style.text_color, BLACK);
    }

    #[test]
    fn test_retrieve_style_font_fields_independent() {
        let mut model = model_with("abcdef");
        model.add_font_description_run(0, 6, FontDescription::family("Serif").with_size(12.0));
        model.add_font_description_run(2, 2, FontDescription::default().with_weight(700));
        model.add_font_description_run(3, 1, FontDescription::default().with_style(FontStyle::Italic));

        let mut style = InputStyle::default();
        model.retrieve_style(3, &mut style);
        assert_eq!(style.family, "Serif");
        assert_eq!(style.size, 12.0);
        assert_eq!(style.weight, 700);
        assert_eq!(style.style, FontStyle::Italic);

        let mut style = InputStyle::default();
        model.retrieve_style(5, &mut style);
        assert_eq!(style.weight, 400);
        assert_eq!(style.style, FontStyle::Normal);
    }

    #[test]
    fn test_update_text_style_runs_insert() {
        let mut model = model_with("abcdef");
        model.add_color_run(2, 2, RED);
        model.add_background_color_run(4, 2, BLUE);

        // Insert "XY" at 3, inside the color run.
        model.text.splice(3..3, ['X', 'Y']);
        model.update_text_style_runs(3, 2);

        let color = model.color_runs.as_slice()[0].character_run;
        assert_eq!(color, CharacterRun::new(2, 4));
        let background = model.background_color_runs.as_slice()[0].character_run;
        assert_eq!(background, CharacterRun::new(6, 2));
    }

    #[test]
    fn test_update_text_style_runs_remove_drops_empty() {
        let mut model = model_with("abcdef");
        model.add_color_run(2, 2, RED);
        model.add_character_spacing_run(0, 6, 1.5);

        model.text.drain(1..5);
        model.update_text_style_runs(1, -4);

        assert!(model.color_runs.is_empty());
        assert_eq!(model.character_spacing_runs.as_slice()[0].character_run, CharacterRun::new(0, 2));
    }

    #[test]
    fn test_paragraphs_through_model() {
        let mut model = model_with("ab\ncd");
        model.set_line_break_info(vec![
            LineBreakInfo::NoBreak,
            LineBreakInfo::AllowBreak,
            LineBreakInfo::MustBreak,
            LineBreakInfo::NoBreak,
            LineBreakInfo::NoBreak,
        ]);
        model.create_paragraph_info(0, 5);
        assert_eq!(model.number_of_paragraphs(), 2);
        assert_eq!(model.find_paragraphs(3, 1), vec![1]);
        assert_eq!(model.get_line_break_info(2), LineBreakInfo::MustBreak);
        assert_eq!(model.get_line_break_info(9), LineBreakInfo::NoBreak);

        let span = model.clear_paragraph_info(0, 5);
        assert_eq!(span, Some(CharacterRun::new(0, 5)));
        assert_eq!(model.number_of_paragraphs(), 0);
    }

    #[test]
    fn test_set_text_drops_derived_tables() {
        let mut model = model_with("ab");
        model.set_character_directions(vec![true, true]);
        model.add_color_run(0, 2, RED);
        model.set_text("xyz");
        assert!(model.character_directions.is_empty());
        assert_eq!(model.color_runs.len(), 1);
        assert_eq!(model.get_character(2), Some('z'));
        assert_eq!(model.get_character(3), None);
    }
}
