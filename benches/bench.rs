// Criterion benchmarks for Growth Engine

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use growth_engine::core::{interpolate, percentile_to_z_score, z_score_to_percentile, GrowthEngine, ReferenceTable};
use growth_engine::models::Sex;

fn bench_interpolate(c: &mut Criterion) {
    let table = ReferenceTable::who_weight_for_age();
    let points = table.for_sex(Sex::Female);

    c.bench_function("interpolate", |b| {
        b.iter(|| interpolate(black_box(27.4), black_box(points)));
    });
}

fn bench_conversions(c: &mut Criterion) {
    c.bench_function("z_score_to_percentile", |b| {
        b.iter(|| z_score_to_percentile(black_box(-1.37)));
    });

    c.bench_function("percentile_to_z_score", |b| {
        b.iter(|| percentile_to_z_score(black_box(0.03)));
    });
}

fn bench_score(c: &mut Criterion) {
    let engine = GrowthEngine::with_defaults();

    c.bench_function("score_measurement", |b| {
        b.iter(|| {
            engine.score(
                black_box(18.5),
                black_box(10.2),
                black_box(Sex::Male),
            )
        });
    });
}

fn bench_curves(c: &mut Criterion) {
    let engine = GrowthEngine::with_defaults();

    let mut group = c.benchmark_group("curves");

    for max_age in [12u32, 24, 60, 240].iter() {
        group.bench_with_input(
            BenchmarkId::new("generate_curves", max_age),
            max_age,
            |b, &max_age| {
                b.iter(|| engine.curves(black_box(Sex::Female), black_box(max_age)));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_interpolate,
    bench_conversions,
    bench_score,
    bench_curves
);

criterion_main!(benches);
