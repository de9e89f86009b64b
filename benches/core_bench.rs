use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec2;
use path_trace::{PathConfig, PathGeometry, PathShape};
use std::hint::black_box;

fn build_path(shape: PathShape) -> PathGeometry {
    let mut path = PathGeometry::new();
    path.rebuild(
        Vec2::new(400.0, 300.0),
        1.5,
        &PathConfig::new(shape, 100.0).with_rotation(0.3),
    );
    path
}

fn build_query_points(count: usize) -> Vec<Vec2> {
    (0..count)
        .map(|i| {
            let x = 250.0 + (i % 300) as f32 + 0.37;
            let y = 150.0 + ((i * 7) % 300) as f32 + 0.63;
            Vec2::new(x, y)
        })
        .collect()
}

fn bench_position_at(c: &mut Criterion) {
    let mut group = c.benchmark_group("position_at");

    for shape in [PathShape::StraightLine, PathShape::Spiral, PathShape::Heart] {
        let path = build_path(shape);
        group.bench_with_input(BenchmarkId::new("sweep_1000", shape.tag()), &path, |b, path| {
            b.iter(|| {
                let mut acc = Vec2::ZERO;
                for i in 0..=1000 {
                    acc += path.position_at(black_box(i as f32 / 1000.0));
                }
                black_box(acc)
            })
        });
    }

    group.finish();
}

fn bench_projection(c: &mut Criterion) {
    let mut group = c.benchmark_group("progress_from_position");
    let query_points = build_query_points(256);

    for shape in [PathShape::Spiral, PathShape::Heart] {
        let path = build_path(shape);
        group.bench_with_input(BenchmarkId::new("batch_256", shape.tag()), &path, |b, path| {
            b.iter(|| {
                let mut sum = 0.0f32;
                for point in &query_points {
                    sum += path.progress_from_position(black_box(*point));
                }
                black_box(sum)
            })
        });
    }

    group.finish();
}

fn bench_sequential_window(c: &mut Criterion) {
    let path = build_path(PathShape::Spiral);
    // Zeiger folgt dem Pfad leicht versetzt
    let samples: Vec<Vec2> = (0..=200)
        .map(|i| path.position_at(i as f32 / 200.0) + Vec2::new(4.0, -3.0))
        .collect();

    c.bench_function("next_valid_progress_trace", |b| {
        b.iter(|| {
            let mut progress = 0.0f32;
            for point in &samples {
                if let Some(next) =
                    path.next_valid_progress(black_box(*point), progress, 0.03, 60.0)
                {
                    progress = next;
                } else if let Some(corrected) =
                    path.backward_correction(black_box(*point), progress, 0.05, 60.0)
                {
                    progress = corrected;
                }
            }
            black_box(progress)
        })
    });
}

criterion_group!(
    benches,
    bench_position_at,
    bench_projection,
    bench_sequential_window
);
criterion_main!(benches);
