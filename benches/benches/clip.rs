// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for `understory_export` clip areas.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Affine, BezPath, Point, Rect};
use peniko::Fill;
use understory_export::{ClipArea, ClipMode, ClipRegion, ExportShape, flatten_polylines};

/// A star polygon with `points` tips, alternating between two radii.
fn star(center: Point, points: usize, outer: f64, inner: f64) -> BezPath {
    let mut path = BezPath::new();
    let steps = points * 2;
    for i in 0..steps {
        let angle = core::f64::consts::TAU * i as f64 / steps as f64;
        let r = if i % 2 == 0 { outer } else { inner };
        let p = center + kurbo::Vec2::from_angle(angle) * r;
        if i == 0 {
            path.move_to(p);
        } else {
            path.line_to(p);
        }
    }
    path.close_path();
    path
}

fn bench_intersect(c: &mut Criterion) {
    let mut group = c.benchmark_group("clip/intersect");

    let a = ClipArea::from_rect(Rect::new(0.0, 0.0, 100.0, 100.0));
    let b = ClipArea::from_rect(Rect::new(50.0, 50.0, 150.0, 150.0));
    group.bench_function("rect_rect", |bench| {
        bench.iter(|| black_box(a.intersect(&b)))
    });

    for points in [5_usize, 20, 80] {
        let s = ClipArea::from_path(
            &star(Point::new(80.0, 80.0), points, 60.0, 25.0),
            Fill::NonZero,
        );
        group.bench_with_input(BenchmarkId::new("rect_star", points), &s, |bench, s| {
            bench.iter(|| black_box(a.intersect(s)))
        });
    }

    group.finish();
}

fn bench_clip_shape(c: &mut Criterion) {
    let mut group = c.benchmark_group("clip/clip_shape");

    let mut region = ClipRegion::new();
    region.set_clip(
        Some(&ExportShape::path(star(Point::new(100.0, 100.0), 12, 90.0, 40.0))),
        Affine::IDENTITY,
    );
    let square = ExportShape::Rect(Rect::new(40.0, 40.0, 180.0, 180.0));

    group.bench_function("fill", |bench| {
        bench.iter(|| black_box(region.clip_shape(&square, ClipMode::Fill)))
    });
    group.bench_function("stroke", |bench| {
        bench.iter(|| black_box(region.clip_shape(&square, ClipMode::Stroke)))
    });

    let area = region.device_clip().cloned().unwrap_or_default();
    let outline = flatten_polylines(&square.to_path(0.1), 0.1);
    group.bench_function("polylines", |bench| {
        bench.iter(|| black_box(area.clip_polylines(&outline)))
    });

    group.finish();
}

criterion_group!(benches, bench_intersect, bench_clip_shape);
criterion_main!(benches);
