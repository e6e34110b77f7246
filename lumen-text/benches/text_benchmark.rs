use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use lumen_core::CharacterRun;
use lumen_text::{
    BidirectionalLineInfoRun, BidirectionalParagraphInfoRun, FontDescription, InputStyle,
    LineBreakInfo, LogicalModel,
};

const LENGTH: u32 = 4096;

/// A text of 64-character lines, every line with a reversed 8-character
/// right-to-left word in the middle.
fn mixed_model() -> (LogicalModel, Vec<BidirectionalLineInfoRun>) {
    let mut model = LogicalModel::new();
    let text: String = (0..LENGTH)
        .map(|i| if i % 64 == 63 { '\n' } else { 'a' })
        .collect();
    model.set_text(&text);

    let mut directions = vec![false; LENGTH as usize];
    let mut lines = Vec::new();
    for line in 0..LENGTH / 64 {
        let start = line * 64;
        let mut map: Vec<u32> = (0..64).collect();
        map[24..32].reverse();
        for d in &mut directions[(start + 24) as usize..(start + 32) as usize] {
            *d = true;
        }
        lines.push(BidirectionalLineInfoRun::new(CharacterRun::new(start, 64), map));
    }
    model.set_character_directions(directions);
    model.set_bidirectional_info(vec![BidirectionalParagraphInfoRun::new(CharacterRun::new(0, LENGTH), false)]);
    (model, lines)
}

fn bench_visual_to_logical_map(c: &mut Criterion) {
    let (mut model, lines) = mixed_model();

    c.bench_function("set_visual_to_logical_map_4096", |b| {
        b.iter(|| model.set_visual_to_logical_map(black_box(&lines), 0, LENGTH));
    });
}

fn bench_retrieve_style(c: &mut Criterion) {
    let (mut model, _) = mixed_model();
    for i in 0..128 {
        model.add_color_run(i * 32, 32, [i as f32 / 128.0, 0.0, 0.0, 1.0]);
        model.add_font_description_run(i * 32, 16, FontDescription::default().with_weight(700));
    }

    c.bench_function("retrieve_style_128_runs", |b| {
        let mut index = 0u32;
        b.iter(|| {
            index = (index + 97) % LENGTH;
            let mut style = InputStyle::default();
            model.retrieve_style(black_box(index), &mut style);
            style
        });
    });
}

fn bench_create_paragraph_info(c: &mut Criterion) {
    let (mut model, _) = mixed_model();
    let breaks: Vec<LineBreakInfo> = model
        .text()
        .iter()
        .map(|&ch| if ch == '\n' { LineBreakInfo::MustBreak } else { LineBreakInfo::NoBreak })
        .collect();
    model.set_line_break_info(breaks);

    c.bench_function("create_paragraph_info_4096", |b| {
        b.iter(|| {
            model.paragraph_info.clear();
            model.create_paragraph_info(0, black_box(LENGTH));
        });
    });
}

criterion_group!(
    benches,
    bench_visual_to_logical_map,
    bench_retrieve_style,
    bench_create_paragraph_info
);
criterion_main!(benches);
