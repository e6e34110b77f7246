use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use std::hint::black_box;
use lumen_core::RunList;

/// A run list tiling `count * 8` characters with 8-character runs.
fn tiled_list(count: u32) -> RunList<u32> {
    let mut list = RunList::new();
    for i in 0..count {
        list.add(i * 8, 8, i);
    }
    list
}

fn bench_find_last(c: &mut Criterion) {
    let list = tiled_list(256);

    c.bench_function("run_list_find_last_256", |b| {
        let mut index = 0u32;
        b.iter(|| {
            index = (index + 37) % (256 * 8);
            list.find_last(black_box(index))
        });
    });
}

fn bench_update_insert(c: &mut Criterion) {
    c.bench_function("run_list_update_insert_256", |b| {
        b.iter_batched(
            || tiled_list(256),
            |mut list| list.update(black_box(1000), 4, 256 * 8 + 4),
            BatchSize::SmallInput,
        );
    });
}

fn bench_update_remove(c: &mut Criterion) {
    c.bench_function("run_list_update_remove_256", |b| {
        b.iter_batched(
            || tiled_list(256),
            |mut list| list.update(black_box(1000), -40, 256 * 8 - 40),
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_find_last, bench_update_insert, bench_update_remove);
criterion_main!(benches);
