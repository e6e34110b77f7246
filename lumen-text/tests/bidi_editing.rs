//! Editing a mixed-direction text the way a text controller does.

use lumen_core::CharacterRun;
use lumen_text::{
    BidirectionalLineInfoRun, BidirectionalParagraphInfoRun, Color, InputStyle, LineBreakInfo,
    LogicalModel, Script, ScriptRun,
};

const GREEN: Color = [0.0, 1.0, 0.0, 1.0];

fn line_breaks(model: &LogicalModel) -> Vec<LineBreakInfo> {
    model
        .text()
        .iter()
        .map(|&c| {
            if c == '\n' {
                LineBreakInfo::MustBreak
            } else {
                LineBreakInfo::NoBreak
            }
        })
        .collect()
}

fn paragraphs(model: &LogicalModel) -> Vec<(u32, u32)> {
    model
        .paragraph_info
        .iter()
        .map(|p| (p.character_run.character_index, p.character_run.number_of_characters))
        .collect()
}

/// "ab אב\ncd": a Hebrew word inside a left-to-right paragraph.
fn mixed_model() -> LogicalModel {
    let mut model = LogicalModel::new();
    model.set_text("ab אב\ncd");
    model.set_scripts(vec![
        ScriptRun::new(0, 3, Script::Latin),
        ScriptRun::new(3, 2, Script::Hebrew),
        ScriptRun::new(5, 3, Script::Latin),
    ]);
    let breaks = line_breaks(&model);
    model.set_line_break_info(breaks);
    model.create_paragraph_info(0, model.number_of_characters());

    model.set_bidirectional_info(vec![BidirectionalParagraphInfoRun::new(CharacterRun::new(0, 6), false)]);
    model.set_character_directions(vec![false, false, false, true, true, false, false, false]);
    let line = BidirectionalLineInfoRun::new(CharacterRun::new(0, 6), vec![0, 1, 2, 4, 3, 5]);
    model.set_visual_to_logical_map(&[line], 0, model.number_of_characters());
    model
}

#[test]
fn test_mixed_text_maps() {
    let model = mixed_model();
    assert_eq!(paragraphs(&model), vec![(0, 6), (6, 2)]);
    assert_eq!(model.get_script(4), Script::Hebrew);

    assert_eq!(model.get_logical_character_index(3), 4);
    assert_eq!(model.get_visual_character_index(4), 3);
    for visual in 0..model.number_of_characters() {
        let logical = model.get_logical_character_index(visual);
        assert_eq!(model.get_visual_character_index(logical), visual);
    }

    // Around the Hebrew word: between ' ' and ב the caret inserts after ' ',
    // between ב and א it inserts between them, after א it continues at '\n'.
    assert_eq!(model.get_logical_cursor_index(3), 3);
    assert_eq!(model.get_logical_cursor_index(4), 4);
    assert_eq!(model.get_logical_cursor_index(5), 5);
    assert_eq!(model.get_logical_cursor_index(0), 0);
    assert_eq!(model.get_logical_cursor_index(8), 8);
}

#[test]
fn test_rtl_paragraph_cursor_boundaries() {
    let mut model = LogicalModel::new();
    model.set_text("שלום");
    model.set_bidirectional_info(vec![BidirectionalParagraphInfoRun::new(CharacterRun::new(0, 4), true)]);
    model.set_character_directions(vec![true; 4]);
    let line = BidirectionalLineInfoRun::new(CharacterRun::new(0, 4), vec![3, 2, 1, 0]);
    model.set_visual_to_logical_map(&[line], 0, 4);

    assert_eq!(model.get_logical_cursor_index(0), 4);
    assert_eq!(model.get_logical_cursor_index(4), 0);
    assert_eq!(model.get_logical_character_index(0), 3);

    // Dropping the reordering restores identity.
    model.set_visual_to_logical_map(&[], 0, 4);
    assert_eq!(model.get_logical_cursor_index(0), 0);
    assert_eq!(model.get_logical_character_index(0), 0);
}

#[test]
fn test_insert_new_paragraph() {
    let mut model = mixed_model();
    model.add_color_run(6, 2, GREEN);

    // Insert "xy\n" before "cd".
    let cleared = model.clear_paragraph_info(6, 6).unwrap();
    assert_eq!(cleared, CharacterRun::new(6, 2));

    model.text.splice(6..6, "xy\n".chars());
    model.update_text_style_runs(6, 3);
    let breaks = line_breaks(&model);
    model.set_line_break_info(breaks);
    model.create_paragraph_info(cleared.character_index, cleared.number_of_characters + 3);

    assert_eq!(paragraphs(&model), vec![(0, 6), (6, 3), (9, 2)]);
    assert_eq!(model.find_paragraphs(7, 3), vec![1, 2]);

    // The color run moved with "cd".
    let mut style = InputStyle::default();
    model.retrieve_style(9, &mut style);
    assert_eq!(style.text_color, GREEN);
    let mut style = InputStyle::default();
    model.retrieve_style(6, &mut style);
    assert_eq!(style, InputStyle::default());
}

#[test]
fn test_remove_paragraph_break() {
    let mut model = mixed_model();
    model.add_color_run(0, 8, GREEN);

    // Remove the '\n' at 5: the two paragraphs merge.
    let cleared = model.clear_paragraph_info(5, 6).unwrap();
    assert_eq!(cleared, CharacterRun::new(0, 8));

    model.text.remove(5);
    model.update_text_style_runs(5, -1);
    let breaks = line_breaks(&model);
    model.set_line_break_info(breaks);
    model.create_paragraph_info(cleared.character_index, cleared.number_of_characters - 1);

    assert_eq!(paragraphs(&model), vec![(0, 7)]);
    assert_eq!(model.color_runs.as_slice()[0].character_run, CharacterRun::new(0, 7));

    // Old maps no longer match the text length: rebuilding resets them first.
    let line = BidirectionalLineInfoRun::new(CharacterRun::new(0, 7), vec![0, 1, 2, 4, 3, 5, 6]);
    model.set_character_directions(vec![false, false, false, true, true, false, false]);
    model.set_bidirectional_info(vec![BidirectionalParagraphInfoRun::new(CharacterRun::new(0, 7), false)]);
    model.set_visual_to_logical_map(&[line], 0, 7);
    assert_eq!(model.reorder.visual_to_logical.len(), 7);
    assert_eq!(model.reorder.visual_to_logical_cursor.len(), 8);
}
