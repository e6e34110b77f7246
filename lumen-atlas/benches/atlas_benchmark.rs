use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use std::hint::black_box;
use lumen_atlas::{
    stitch_mesh, AddFailPolicy, AtlasManager, AtlasManagerConfig, AtlasSize, CpuTextureBackend,
    Mesh2D, PixelData, PixelFormat,
};

fn manager() -> AtlasManager<CpuTextureBackend> {
    let config = AtlasManagerConfig {
        new_atlas_size: AtlasSize::new(1024, 1024, 16, 16),
        add_policy: AddFailPolicy::FailOnAddCreates,
    };
    AtlasManager::with_config(CpuTextureBackend, config)
}

fn bench_add_remove(c: &mut Criterion) {
    let glyph = PixelData::filled(12, 14, PixelFormat::A8, 200);

    c.bench_function("atlas_add_remove_12x14", |b| {
        let mut mgr = manager();
        b.iter(|| {
            let Ok(outcome) = mgr.add(black_box(&glyph), None) else {
                return;
            };
            let _ = mgr.remove(outcome.slot.image_id);
        });
    });
}

fn bench_fill_atlas(c: &mut Criterion) {
    let glyph = PixelData::filled(16, 16, PixelFormat::A8, 255);

    c.bench_function("atlas_fill_1024", |b| {
        b.iter_batched(
            manager,
            |mut mgr| {
                for _ in 0..1024 {
                    let _ = mgr.add(black_box(&glyph), None);
                }
                mgr
            },
            BatchSize::LargeInput,
        );
    });
}

fn bench_stitch_line(c: &mut Criterion) {
    let mut mgr = manager();
    let glyph = PixelData::filled(10, 12, PixelFormat::A8, 128);
    let ids: Vec<_> = (0..64)
        .filter_map(|_| mgr.add(&glyph, None).ok())
        .map(|outcome| outcome.slot.image_id)
        .collect();

    c.bench_function("stitch_line_64_glyphs", |b| {
        b.iter(|| {
            let mut line = Mesh2D::new();
            for (i, id) in ids.iter().enumerate() {
                if let Ok(quad) = mgr.generate_mesh_data(*id, [i as f32 * 11.0, 0.0], false) {
                    stitch_mesh(&mut line, &quad, false);
                }
            }
            black_box(line)
        });
    });
}

criterion_group!(benches, bench_add_remove, bench_fill_atlas, bench_stitch_line);
criterion_main!(benches);
