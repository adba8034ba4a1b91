// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end benchmarks for `understory_export_slides`.

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Affine, Line, Point, Rect, Size, Stroke};
use peniko::{Brush, Color, ColorStop, Gradient, GradientKind, LinearGradientPosition};
use understory_export::{ExportShape, Font, VectorGraphics};
use understory_export_slides::{ExportOptions, SlideShow, export_slide, slide_to_svg};

const SLIDE: Size = Size::new(720.0, 540.0);

/// A grid of filled and outlined cells with a label each, under a clip.
fn draw_grid(g: &mut impl VectorGraphics, cells: u32) {
    g.set_clip(Some(&ExportShape::Rect(Rect::new(20.0, 20.0, 700.0, 520.0))));
    g.set_stroke(Stroke::new(1.5).with_dashes(0.0, [4.0, 2.0]));
    g.set_font(Font::new("Arial", 9.0));
    let step = 700.0 / f64::from(cells);
    for row in 0..cells {
        for col in 0..cells {
            let x = f64::from(col) * step;
            let y = f64::from(row) * step * 0.75;
            let cell = Rect::new(x, y, x + step * 0.8, y + step * 0.6);
            g.set_color(Color::from_rgba8((row * 16) as u8, (col * 16) as u8, 128, 255));
            g.fill(&ExportShape::Rect(cell));
            g.draw(&ExportShape::Line(Line::new(cell.origin(), (cell.x1, cell.y1))));
            g.draw_string("cell", Point::new(cell.x0 + 2.0, cell.y1 - 2.0));
        }
    }
}

fn bench_export(c: &mut Criterion) {
    let mut group = c.benchmark_group("slides/export");

    for cells in [4_u32, 12] {
        group.bench_with_input(BenchmarkId::new("grid", cells), &cells, |b, &cells| {
            b.iter_batched(
                SlideShow::new,
                |mut doc| {
                    export_slide(&mut doc, SLIDE, Some("Grid"), ExportOptions::default(), |g| {
                        draw_grid(g, cells);
                    });
                    black_box(doc)
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.bench_function("rotated_text", |b| {
        b.iter_batched(
            SlideShow::new,
            |mut doc| {
                export_slide(&mut doc, SLIDE, None, ExportOptions::default(), |g| {
                    for i in 0..32 {
                        let angle = f64::from(i) * 0.2;
                        g.set_transform(Affine::translate((360.0, 270.0)) * Affine::rotate(angle));
                        g.draw_string("rotated label", Point::new(40.0, 0.0));
                    }
                });
                black_box(doc)
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("gradient_fill", |b| {
        let stops = [
            ColorStop::from((0.0, Color::from_rgba8(255, 0, 0, 255))),
            ColorStop::from((1.0, Color::from_rgba8(0, 0, 255, 255))),
        ];
        let gradient = Gradient {
            kind: GradientKind::Linear(LinearGradientPosition::new((0.0, 0.0), (200.0, 0.0))),
            stops: stops.as_slice().into(),
            ..Gradient::default()
        };
        b.iter_batched(
            SlideShow::new,
            |mut doc| {
                export_slide(&mut doc, SLIDE, None, ExportOptions::default(), |g| {
                    g.set_paint(Brush::Gradient(gradient.clone()));
                    g.fill(&ExportShape::Rect(Rect::new(0.0, 0.0, 200.0, 120.0)));
                });
                black_box(doc)
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

fn bench_preview(c: &mut Criterion) {
    let mut doc = SlideShow::new();
    let (slide, ()) = export_slide(&mut doc, SLIDE, Some("Grid"), ExportOptions::default(), |g| {
        draw_grid(g, 12);
    });
    c.bench_function("slides/preview_svg", |b| {
        b.iter(|| black_box(slide_to_svg(&doc, slide)))
    });
}

criterion_group!(benches, bench_export, bench_preview);
criterion_main!(benches);
