//! Performance measurement for tile extraction at varying sample sizes

// Criterion macros generate undocumented functions
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use overlap_wfc::spatial::pixel::Pixel;
use overlap_wfc::spatial::tiles::extract_tiles;
use std::hint::black_box;

fn checkerboard_sample(side: usize) -> Vec<Pixel> {
    let r = Pixel::new(255, 0, 0, 255);
    let g = Pixel::new(0, 255, 0, 255);
    (0..side * side)
        .map(|i| {
            let x = i % side;
            let y = i / side;
            if (x + y) % 2 == 0 { r } else { g }
        })
        .collect()
}

/// Measures `extract_tiles` cost as sample side length grows
fn bench_extract_tiles(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_tiles");

    for side in &[8usize, 16, 32] {
        let sample = checkerboard_sample(*side);
        group.bench_with_input(BenchmarkId::from_parameter(side), side, |b, &side| {
            b.iter(|| {
                let tile_set = extract_tiles(black_box(&sample), side, side, 3);
                black_box(tile_set)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_extract_tiles);
criterion_main!(benches);
