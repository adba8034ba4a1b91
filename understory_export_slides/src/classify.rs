// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mapping device-space outlines onto slide shape kinds.

use kurbo::{Ellipse, Line, PathEl, Point, Rect, Shape};
use understory_export::ExportShape;

use crate::shape::ShapeKind;

/// Distance within which a line end point counts as sitting on the anchor's
/// minimum corner.
pub const ALIGN_TOLERANCE: f64 = 0.01;

/// Smallest extent of a freeform anchor.
pub const MIN_FREEFORM_EXTENT: f64 = 3.0;

/// A device-space shape sorted into a slide shape kind.
#[derive(Clone, Debug, PartialEq)]
pub struct Classified {
    /// Anchor in slide coordinates.
    pub anchor: Rect,
    /// Shape kind.
    pub kind: ShapeKind,
}

/// Pick the slide primitive for a device-space `shape`.
///
/// Native kinds map to native primitives. A path made of a single open
/// two-point segment becomes a line; any other path is a freeform.
pub fn classify(shape: &ExportShape) -> Classified {
    match shape {
        ExportShape::Line(line) => classify_line(*line),
        ExportShape::Rect(rect) => Classified {
            anchor: rect.abs(),
            kind: ShapeKind::Rect,
        },
        ExportShape::RoundedRect(rect) => {
            let radii = rect.radii();
            Classified {
                anchor: rect.rect(),
                kind: ShapeKind::RoundRect {
                    radius: radii.as_single_radius().unwrap_or(radii.top_left),
                },
            }
        }
        ExportShape::Ellipse(ellipse) => Classified {
            anchor: ellipse.bounding_box(),
            kind: ShapeKind::Ellipse,
        },
        ExportShape::Arc(arc) => {
            let arc = arc.normalized();
            if arc.is_full_turn() {
                let ellipse = Ellipse::new(arc.arc.center, arc.arc.radii, arc.arc.x_rotation);
                return Classified {
                    anchor: ellipse.bounding_box(),
                    kind: ShapeKind::Ellipse,
                };
            }
            Classified {
                anchor: ExportShape::Arc(arc).bounding_box(),
                kind: ShapeKind::Arc {
                    center: arc.arc.center,
                    radii: arc.arc.radii,
                    start_angle: arc.arc.start_angle,
                    sweep_angle: arc.arc.sweep_angle,
                    closure: arc.closure,
                },
            }
        }
        ExportShape::Path { path, fill_rule } => {
            if let [PathEl::MoveTo(p0), PathEl::LineTo(p1)] = path.elements() {
                return classify_line(Line::new(*p0, *p1));
            }
            let bounds = path.bounding_box();
            Classified {
                anchor: Rect::new(
                    bounds.x0,
                    bounds.y0,
                    bounds.x1.max(bounds.x0 + MIN_FREEFORM_EXTENT),
                    bounds.y1.max(bounds.y0 + MIN_FREEFORM_EXTENT),
                ),
                kind: ShapeKind::Freeform {
                    path: path.clone(),
                    fill_rule: *fill_rule,
                },
            }
        }
    }
}

fn classify_line(line: Line) -> Classified {
    let anchor = Rect::from_points(line.p0, line.p1);
    Classified {
        anchor,
        kind: ShapeKind::Line {
            rotated: !is_well_aligned(line, anchor),
        },
    }
}

/// Returns `true` if one end of `line` sits on the minimum corner of
/// `anchor`, so the line runs along the anchor's main diagonal.
pub fn is_well_aligned(line: Line, anchor: Rect) -> bool {
    let corner = Point::new(anchor.x0, anchor.y0);
    line.p0.distance(corner) <= ALIGN_TOLERANCE || line.p1.distance(corner) <= ALIGN_TOLERANCE
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f64::consts::{FRAC_PI_2, PI, TAU};
    use kurbo::{Arc, BezPath, RoundedRect, Vec2};
    use peniko::Fill;
    use understory_export::{ArcClosure, ArcShape};

    #[test]
    fn lines_flag_anti_diagonals() {
        let down = classify(&ExportShape::Line(Line::new((0.0, 0.0), (10.0, 10.0))));
        assert_eq!(down.kind, ShapeKind::Line { rotated: false });
        let up = classify(&ExportShape::Line(Line::new((0.0, 10.0), (10.0, 0.0))));
        assert_eq!(up.kind, ShapeKind::Line { rotated: true });
        assert_eq!(up.anchor, Rect::new(0.0, 0.0, 10.0, 10.0));
    }

    #[test]
    fn two_point_path_is_a_line() {
        let mut path = BezPath::new();
        path.move_to((5.0, 5.0));
        path.line_to((1.0, 5.0));
        let c = classify(&ExportShape::path(path));
        assert_eq!(c.kind, ShapeKind::Line { rotated: false });
        assert_eq!(c.anchor, Rect::new(1.0, 5.0, 5.0, 5.0));
    }

    #[test]
    fn freeform_anchor_has_minimum_extent() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((1.0, 0.0));
        path.line_to((1.0, 10.0));
        path.close_path();
        let c = classify(&ExportShape::Path {
            path,
            fill_rule: Fill::EvenOdd,
        });
        assert_eq!(c.anchor, Rect::new(0.0, 0.0, 3.0, 10.0));
        assert!(matches!(
            c.kind,
            ShapeKind::Freeform {
                fill_rule: Fill::EvenOdd,
                ..
            }
        ));
    }

    #[test]
    fn full_turn_arc_is_an_ellipse() {
        let arc = Arc::new((10.0, 10.0), Vec2::new(5.0, 3.0), 0.0, TAU, 0.0);
        let c = classify(&ExportShape::Arc(ArcShape::new(arc, ArcClosure::Open)));
        assert_eq!(c.kind, ShapeKind::Ellipse);
        assert_eq!(c.anchor, Rect::new(5.0, 7.0, 15.0, 13.0));
    }

    #[test]
    fn negative_sweep_is_normalized() {
        let arc = Arc::new((0.0, 0.0), Vec2::new(5.0, 5.0), PI, -FRAC_PI_2, 0.0);
        let c = classify(&ExportShape::Arc(ArcShape::new(arc, ArcClosure::Pie)));
        let ShapeKind::Arc {
            start_angle,
            sweep_angle,
            closure,
            ..
        } = c.kind
        else {
            panic!("arc stays an arc");
        };
        assert!((start_angle - FRAC_PI_2).abs() < 1e-12);
        assert!((sweep_angle - FRAC_PI_2).abs() < 1e-12);
        assert_eq!(closure, ArcClosure::Pie);
    }

    #[test]
    fn round_rect_keeps_its_radius() {
        let rect = RoundedRect::new(0.0, 0.0, 20.0, 10.0, 2.5);
        let c = classify(&ExportShape::RoundedRect(rect));
        assert_eq!(c.kind, ShapeKind::RoundRect { radius: 2.5 });
        assert_eq!(c.anchor, Rect::new(0.0, 0.0, 20.0, 10.0));
    }
}
