//! Aggregation benchmarks

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use geofold::{projection, CartesianEngine, Geometry};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::hint::black_box;

fn grid_rows(count: usize) -> Vec<(u64, Geometry)> {
    let mut rng = StdRng::seed_from_u64(7);
    (0..count)
        .map(|i| {
            let x = (i % 100) as f64 + rng.gen_range(-0.25..0.25);
            let y = (i / 100) as f64 + rng.gen_range(-0.25..0.25);
            ((i % 8) as u64, Geometry::rectangle(x, y, x + 1.5, y + 1.5))
        })
        .collect()
}

fn bench_union_fold(c: &mut Criterion) {
    let mut group = c.benchmark_group("Union Fold");

    for size in [16_usize, 64, 256].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let geometries: Vec<Geometry> =
                grid_rows(size).into_iter().map(|(_, geometry)| geometry).collect();
            let engine = CartesianEngine;
            b.iter(|| {
                let values = projection()
                    .union()
                    .over(&engine, geometries.clone())
                    .unwrap();
                black_box(values)
            });
        });
    }

    group.finish();
}

fn bench_grouped_projection(c: &mut Criterion) {
    let mut group = c.benchmark_group("Grouped Projection");

    let rows = grid_rows(512);
    let engine = CartesianEngine;

    group.bench_function("count_union_envelope_512", |b| {
        b.iter(|| {
            let results = projection()
                .count()
                .union()
                .envelope()
                .over_grouped(&engine, rows.clone())
                .unwrap();
            black_box(results)
        });
    });

    group.finish();
}

criterion_group!(benches, bench_union_fold, bench_grouped_projection);
criterion_main!(benches);
