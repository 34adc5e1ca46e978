// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Performance benchmarks for GRIDSTEP
//!
//! Run with: cargo bench
//!
//! These benchmarks measure:
//! - Legality checks and candidate range resolution (per-frame hot path)
//! - Occupancy stripe scanning on a populated grid
//! - Sequence compilation at the transition into playback

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use gridstep::config::StudioConfig;
use gridstep::geometry::Layout;
use gridstep::grid::{can_accept, candidate_range, legal_start, Grid};
use gridstep::music::NoteDuration;
use gridstep::note::NoteBlock;

fn test_grid() -> Grid {
    let config = StudioConfig::default();
    let layout = Layout::new(
        config.canvas_width,
        config.canvas_height,
        config.rows,
        config.cols,
        config.col_offset,
        config.row_offset,
    );
    Grid::new(&config, &layout).unwrap()
}

/// Benchmark the rhythmic legality table across a full measure
fn bench_legal_start(c: &mut Criterion) {
    c.bench_function("legal_start_full_measure", |b| {
        b.iter(|| {
            let mut legal = 0usize;
            for duration in NoteDuration::ALL {
                for index in 0..16 {
                    if legal_start(black_box(index), duration.units(), 16) {
                        legal += 1;
                    }
                }
            }
            black_box(legal)
        })
    });
}

/// Benchmark candidate resolution plus acceptance on an empty grid,
/// the work done once per dragged frame
fn bench_candidate_resolution(c: &mut Criterion) {
    let grid = test_grid();
    let mut group = c.benchmark_group("candidate_resolution");

    for duration in [
        NoteDuration::Sixteenth,
        NoteDuration::Quarter,
        NoteDuration::Whole,
    ] {
        group.bench_with_input(
            BenchmarkId::new("resolve", duration.name()),
            &duration,
            |b, duration| {
                b.iter(|| {
                    let mut accepted = 0usize;
                    for center in 0..grid.len() {
                        if let Some(range) =
                            candidate_range(&grid, black_box(center), duration.units())
                        {
                            if can_accept(&grid, range) {
                                accepted += 1;
                            }
                        }
                    }
                    black_box(accepted)
                })
            },
        );
    }
    group.finish();
}

/// Benchmark compilation of a grid packed with sixteenth notes
fn bench_compile(c: &mut Criterion) {
    let mut grid = test_grid();
    let mut notes = Vec::new();

    // One sixteenth per column, cycling through the rows
    for col in 0..grid.cols() {
        let row = col % grid.rows();
        let index = row * grid.cols() + col;
        let home = grid.slot(index).unwrap().rect;
        let id = notes.len();
        notes.push(NoteBlock::new(id, NoteDuration::Sixteenth, home));
        grid.claim_range(index, 1, id);
    }

    c.bench_function("compile_full_grid", |b| {
        b.iter(|| {
            let sequence = gridstep::playback::compile(black_box(&grid), black_box(&notes));
            black_box(sequence.len())
        })
    });
}

criterion_group!(
    benches,
    bench_legal_start,
    bench_candidate_resolution,
    bench_compile
);
criterion_main!(benches);
