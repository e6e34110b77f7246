//! Lumen demo — drives the text model and the glyph atlas the way a text
//! controller does, without a window.
//!
//! Run with `RUST_LOG=debug cargo run -p lumen-demo` to see the atlas
//! allocation trace.

mod glyph_cache;

use log::info;

use lumen_atlas::{stitch_mesh, AtlasManager, CpuTextureBackend, Mesh2D};
use lumen_core::{CharacterIndex, CharacterRun};
use lumen_text::{
    BidirectionalLineInfoRun, BidirectionalParagraphInfoRun, FontDescription, InputStyle,
    LineBreakInfo, LogicalModel, Script, ScriptRun, UnderlineStyle,
};

use glyph_cache::{GlyphCache, GlyphKey};

const TEXT: &str = "Hello שלום world\nמה שלומך fine\n123";
const LINE_HEIGHT: f32 = 20.0;

fn script_of(c: char) -> Script {
    match c {
        '\u{0590}'..='\u{05FF}' => Script::Hebrew,
        '\u{0600}'..='\u{06FF}' => Script::Arabic,
        'a'..='z' | 'A'..='Z' => Script::Latin,
        _ => Script::Common,
    }
}

/// Merge per-character scripts into runs.
fn script_runs(text: &[char]) -> Vec<ScriptRun> {
    let mut runs: Vec<ScriptRun> = Vec::new();
    for (i, &c) in text.iter().enumerate() {
        let script = script_of(c);
        match runs.last_mut() {
            Some(run) if run.value == script => run.character_run.number_of_characters += 1,
            _ => runs.push(ScriptRun::new(i as u32, 1, script)),
        }
    }
    runs
}

/// Toy bidi pass: one line per paragraph, right-to-left letters reversed in
/// place, right-to-left paragraphs mirrored as a whole.
fn resolve_bidi(model: &mut LogicalModel) -> Vec<BidirectionalLineInfoRun> {
    let directions: Vec<bool> = model.text().iter().map(|&c| script_of(c).is_right_to_left()).collect();

    let mut paragraphs = Vec::new();
    let mut lines = Vec::new();
    for paragraph in &model.paragraph_info {
        let run = paragraph.character_run;
        let range = run.character_index as usize..run.end() as usize;
        if !directions[range.clone()].iter().any(|&rtl| rtl) {
            continue;
        }
        let is_rtl = model
            .text()
            .get(range.clone())
            .and_then(|chars| chars.iter().find(|c| c.is_alphabetic()))
            .is_some_and(|&c| script_of(c).is_right_to_left());
        paragraphs.push(BidirectionalParagraphInfoRun::new(run, is_rtl));

        // Visual order of the paragraph: reverse every run of opposite
        // direction, then mirror the whole line for RTL paragraphs.
        let local = &directions[range];
        let mut map: Vec<CharacterIndex> = (0..run.number_of_characters).collect();
        let mut start = 0;
        while start < local.len() {
            let mut end = start;
            while end < local.len() && local[end] == local[start] {
                end += 1;
            }
            if local[start] != is_rtl {
                map[start..end].reverse();
            }
            start = end;
        }
        if is_rtl {
            map.reverse();
        }
        lines.push(BidirectionalLineInfoRun::new(run, map));
    }

    model.set_bidirectional_info(paragraphs);
    model.set_character_directions(directions);
    lines
}

fn build_model() -> LogicalModel {
    let mut model = LogicalModel::new();
    model.set_text(TEXT);

    let runs = script_runs(model.text());
    model.set_scripts(runs);
    let breaks = model
        .text()
        .iter()
        .map(|&c| if c == '\n' { LineBreakInfo::MustBreak } else { LineBreakInfo::NoBreak })
        .collect();
    model.set_line_break_info(breaks);
    model.create_paragraph_info(0, model.number_of_characters());

    model.add_font_description_run(6, 4, FontDescription::default().with_weight(700));
    model.add_color_run(11, 5, [0.1, 0.4, 0.9, 1.0]);
    model.add_underline_run(26, 4, UnderlineStyle::default());

    let lines = resolve_bidi(&mut model);
    model.set_visual_to_logical_map(&lines, 0, model.number_of_characters());
    model
}

fn main() {
    env_logger::init();

    let model = build_model();
    info!(
        "Model: {} characters, {} paragraph(s), {} bidi paragraph(s)",
        model.number_of_characters(),
        model.number_of_paragraphs(),
        model.bidirectional_paragraph_info.len()
    );

    let mut atlas = AtlasManager::new(CpuTextureBackend);
    let mut cache = GlyphCache::new(256);

    for (line_number, paragraph) in model.paragraph_info.iter().enumerate() {
        let run: CharacterRun = paragraph.character_run;
        let mut line = Mesh2D::new();
        let mut pen_x = 0.0f32;
        let mut visual_text = String::new();

        for visual in run.character_index..run.end() {
            let logical = model.get_logical_character_index(visual);
            let Some(character) = model.get_character(logical) else {
                continue;
            };
            if character == '\n' {
                continue;
            }
            visual_text.push(character);

            let mut style = InputStyle::default();
            model.retrieve_style(logical, &mut style);
            let key = GlyphKey {
                character,
                size_px: style.size.round().clamp(8.0, 16.0) as u32,
                bold: style.weight >= 700,
            };

            let image = match cache.get_or_insert(&mut atlas, key) {
                Ok(image) => image,
                Err(err) => {
                    log::error!("Glyph {character:?} not cached: {err}");
                    continue;
                }
            };
            match atlas.generate_mesh_data(image, [pen_x, line_number as f32 * LINE_HEIGHT], false) {
                Ok(quad) => stitch_mesh(&mut line, &quad, true),
                Err(err) => log::error!("Glyph {character:?} has no mesh: {err}"),
            }
            pen_x += key.size_px as f32 / 2.0 + 2.0 + style.character_spacing;
        }

        info!(
            "Line {line_number}: \"{visual_text}\" -> {} vertices, {} indices",
            line.vertices.len(),
            line.indices.len()
        );
    }

    let carets: Vec<String> = (0..=model.number_of_characters())
        .map(|slot| model.get_logical_cursor_index(slot).to_string())
        .collect();
    info!("Caret slots -> logical: [{}]", carets.join(", "));

    let metrics = atlas.get_metrics();
    info!(
        "Atlas: {} atlas(es), {} bytes, {} block(s) used; cache {} glyph(s), {} hits / {} misses / {} evictions",
        metrics.atlas_count,
        metrics.texture_memory_used,
        metrics.total_blocks_used(),
        cache.len(),
        cache.hits,
        cache.misses,
        cache.evictions
    );
    for (i, entry) in metrics.atlas_metrics.iter().enumerate() {
        info!(
            "  atlas {}: {}x{} {:?}, {}/{} blocks ({:.1}%)",
            i + 1,
            entry.size.width,
            entry.size.height,
            entry.pixel_format,
            entry.blocks_used,
            entry.total_blocks,
            entry.occupancy() * 100.0
        );
    }
}
