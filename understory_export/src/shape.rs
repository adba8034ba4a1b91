// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shape vocabulary accepted by drawing calls.

use core::f64::consts::TAU;

use kurbo::{Affine, Arc, BezPath, Ellipse, Line, PathEl, Point, Rect, RoundedRect, Shape, Vec2};
use peniko::Fill;

/// Tolerance used when curves are flattened or converted to paths.
pub const PATH_TOLERANCE: f64 = 0.1;

const AXIS_EPSILON: f64 = 1e-12;

/// How the ends of an [`ArcShape`] are joined.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ArcClosure {
    /// The arc is an open curve.
    Open,
    /// The arc end points are joined by a straight segment.
    Chord,
    /// The arc end points are joined to the center (a pie slice).
    Pie,
}

/// An elliptical arc together with its closure type.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ArcShape {
    /// Arc geometry. Angles are in radians.
    pub arc: Arc,
    /// How the arc is closed.
    pub closure: ArcClosure,
}

impl ArcShape {
    /// Create an arc shape.
    #[inline]
    pub const fn new(arc: Arc, closure: ArcClosure) -> Self {
        Self { arc, closure }
    }

    /// Returns `true` if the sweep covers at least a full turn.
    #[must_use]
    pub fn is_full_turn(&self) -> bool {
        self.arc.sweep_angle.abs() >= TAU - AXIS_EPSILON
    }

    /// The same arc with a non-negative sweep.
    ///
    /// A negative sweep starting at `a` covers the same points as a positive
    /// sweep starting at `a + sweep`.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let mut arc = self.arc;
        if arc.sweep_angle < 0.0 {
            arc.start_angle += arc.sweep_angle;
            arc.sweep_angle = -arc.sweep_angle;
        }
        arc.start_angle = arc.start_angle.rem_euclid(TAU);
        Self { arc, ..*self }
    }

    /// Outline of the arc, honoring its closure.
    pub fn to_path(&self, tolerance: f64) -> BezPath {
        let mut path = BezPath::new();
        let mut elements = self.arc.path_elements(tolerance);
        let Some(PathEl::MoveTo(start)) = elements.next() else {
            return path;
        };
        match self.closure {
            ArcClosure::Pie => {
                path.move_to(self.arc.center);
                path.line_to(start);
            }
            ArcClosure::Open | ArcClosure::Chord => path.move_to(start),
        }
        path.extend(elements);
        if self.closure != ArcClosure::Open {
            path.close_path();
        }
        path
    }
}

/// A shape handed to a drawing call.
///
/// Native kinds are kept as long as a transform preserves them, so the
/// exporter can emit the matching primitive instead of a freeform path.
#[derive(Clone, Debug, PartialEq)]
pub enum ExportShape {
    /// A straight segment.
    Line(Line),
    /// An axis-aligned rectangle.
    Rect(Rect),
    /// An axis-aligned rectangle with rounded corners.
    RoundedRect(RoundedRect),
    /// An ellipse.
    Ellipse(Ellipse),
    /// An elliptical arc.
    Arc(ArcShape),
    /// Any other outline.
    Path {
        /// Outline geometry.
        path: BezPath,
        /// Fill rule used when the path is filled or used as a clip.
        fill_rule: Fill,
    },
}

impl ExportShape {
    /// A path shape filled with the non-zero rule.
    #[inline]
    pub fn path(path: BezPath) -> Self {
        Self::Path {
            path,
            fill_rule: Fill::NonZero,
        }
    }

    /// Returns `true` if the outline draws anything: paths need at least one
    /// segment after their `MoveTo`s.
    #[must_use]
    pub fn has_segments(&self) -> bool {
        match self {
            Self::Path { path, .. } => path
                .elements()
                .iter()
                .any(|el| !matches!(el, PathEl::MoveTo(_) | PathEl::ClosePath)),
            _ => true,
        }
    }

    /// Fill rule of the shape. Only paths carry a non-default rule.
    #[must_use]
    pub fn fill_rule(&self) -> Fill {
        match self {
            Self::Path { fill_rule, .. } => *fill_rule,
            _ => Fill::NonZero,
        }
    }

    /// Bounding box of the outline.
    #[must_use]
    pub fn bounding_box(&self) -> Rect {
        match self {
            Self::Line(line) => line.bounding_box(),
            Self::Rect(rect) => rect.abs(),
            Self::RoundedRect(rect) => rect.bounding_box(),
            Self::Ellipse(ellipse) => ellipse.bounding_box(),
            Self::Arc(arc) => arc.to_path(PATH_TOLERANCE).bounding_box(),
            Self::Path { path, .. } => path.bounding_box(),
        }
    }

    /// Outline of the shape as a path.
    pub fn to_path(&self, tolerance: f64) -> BezPath {
        match self {
            Self::Line(line) => line.to_path(tolerance),
            Self::Rect(rect) => rect.to_path(tolerance),
            Self::RoundedRect(rect) => rect.to_path(tolerance),
            Self::Ellipse(ellipse) => ellipse.to_path(tolerance),
            Self::Arc(arc) => arc.to_path(tolerance),
            Self::Path { path, .. } => path.clone(),
        }
    }

    /// Map the shape through `affine`.
    ///
    /// Lines stay lines. Rectangles and unrotated ellipses keep their kind
    /// under any transform with no rotation or shear, mirroring included.
    /// Rounded rectangles also need a uniform scale, and arcs a positive
    /// one. Anything else becomes a path.
    #[must_use]
    pub fn transformed(&self, affine: Affine) -> Self {
        if let Self::Line(line) = self {
            return Self::Line(Line::new(affine * line.p0, affine * line.p1));
        }
        if let Some((sx, sy)) = axis_aligned_scale(affine) {
            match self {
                Self::Rect(rect) => return Self::Rect(affine.transform_rect_bbox(rect.abs())),
                Self::RoundedRect(rect)
                    if (sx.abs() - sy.abs()).abs() <= AXIS_EPSILON * sx.abs().max(sy.abs()) =>
                {
                    let r = rect.radii();
                    let (mut tl, mut tr, mut br, mut bl) =
                        (r.top_left, r.top_right, r.bottom_right, r.bottom_left);
                    if sx < 0.0 {
                        (tl, tr, br, bl) = (tr, tl, bl, br);
                    }
                    if sy < 0.0 {
                        (tl, tr, br, bl) = (bl, br, tr, tl);
                    }
                    let k = sx.abs();
                    let rect = affine.transform_rect_bbox(rect.rect());
                    return Self::RoundedRect(RoundedRect::from_rect(
                        rect,
                        (tl * k, tr * k, br * k, bl * k),
                    ));
                }
                Self::Ellipse(ellipse) if ellipse.rotation().abs() <= AXIS_EPSILON => {
                    return Self::Ellipse(Ellipse::from_rect(
                        affine.transform_rect_bbox(ellipse.bounding_box()),
                    ));
                }
                Self::Arc(shape)
                    if shape.arc.x_rotation.abs() <= AXIS_EPSILON && sx > 0.0 && sy > 0.0 =>
                {
                    let arc = Arc {
                        center: affine * shape.arc.center,
                        radii: Vec2::new(shape.arc.radii.x * sx, shape.arc.radii.y * sy),
                        ..shape.arc
                    };
                    return Self::Arc(ArcShape::new(arc, shape.closure));
                }
                _ => {}
            }
        }
        Self::Path {
            path: affine * self.to_path(PATH_TOLERANCE),
            fill_rule: self.fill_rule(),
        }
    }
}

/// Signed scale factors of `affine` if it has no rotation or shear and is
/// not singular. Negative factors mean a mirror along that axis.
pub(crate) fn axis_aligned_scale(affine: Affine) -> Option<(f64, f64)> {
    let [a, b, c, d, _, _] = affine.as_coeffs();
    (b.abs() <= AXIS_EPSILON && c.abs() <= AXIS_EPSILON && a != 0.0 && d != 0.0)
        .then_some((a, d))
}

/// Flatten `path` into polylines, one per subpath.
///
/// Closed subpaths repeat their first point at the end.
pub fn flatten_polylines(path: &BezPath, tolerance: f64) -> Vec<Vec<Point>> {
    let mut polylines: Vec<Vec<Point>> = Vec::new();
    let mut current: Vec<Point> = Vec::new();
    kurbo::flatten(path.iter(), tolerance, |el| match el {
        PathEl::MoveTo(p) => {
            if current.len() > 1 {
                polylines.push(core::mem::take(&mut current));
            }
            current.clear();
            current.push(p);
        }
        PathEl::LineTo(p) => {
            if current.last() != Some(&p) {
                current.push(p);
            }
        }
        PathEl::ClosePath => {
            if let Some(&first) = current.first() {
                if current.last() != Some(&first) {
                    current.push(first);
                }
            }
            if current.len() > 1 {
                polylines.push(core::mem::take(&mut current));
            }
            current.clear();
        }
        // `flatten` only emits move, line and close elements.
        PathEl::QuadTo(..) | PathEl::CurveTo(..) => {}
    });
    if current.len() > 1 {
        polylines.push(current);
    }
    polylines
}

impl From<Line> for ExportShape {
    fn from(line: Line) -> Self {
        Self::Line(line)
    }
}

impl From<Rect> for ExportShape {
    fn from(rect: Rect) -> Self {
        Self::Rect(rect)
    }
}

impl From<RoundedRect> for ExportShape {
    fn from(rect: RoundedRect) -> Self {
        Self::RoundedRect(rect)
    }
}

impl From<Ellipse> for ExportShape {
    fn from(ellipse: Ellipse) -> Self {
        Self::Ellipse(ellipse)
    }
}

impl From<ArcShape> for ExportShape {
    fn from(arc: ArcShape) -> Self {
        Self::Arc(arc)
    }
}

impl From<BezPath> for ExportShape {
    fn from(path: BezPath) -> Self {
        Self::path(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f64::consts::FRAC_PI_2;

    #[test]
    fn rect_survives_translate_and_scale() {
        let shape = ExportShape::Rect(Rect::new(0.0, 0.0, 10.0, 10.0));
        let xf = Affine::translate((5.0, 5.0)) * Affine::scale(2.0);
        assert_eq!(
            shape.transformed(xf),
            ExportShape::Rect(Rect::new(5.0, 5.0, 25.0, 25.0))
        );
    }

    #[test]
    fn rect_becomes_path_under_rotation() {
        let shape = ExportShape::Rect(Rect::new(0.0, 0.0, 10.0, 10.0));
        let out = shape.transformed(Affine::rotate(0.3));
        assert!(matches!(out, ExportShape::Path { .. }), "got {out:?}");
    }

    #[test]
    fn line_stays_line_under_rotation() {
        let shape = ExportShape::Line(Line::new((0.0, 0.0), (10.0, 0.0)));
        let ExportShape::Line(line) = shape.transformed(Affine::rotate(FRAC_PI_2)) else {
            panic!("line should stay a line");
        };
        assert!((line.p1.x).abs() < 1e-9, "x = {}", line.p1.x);
        assert!((line.p1.y - 10.0).abs() < 1e-9, "y = {}", line.p1.y);
    }

    #[test]
    fn mirrored_ellipse_stays_ellipse() {
        let shape = ExportShape::Ellipse(Ellipse::from_rect(Rect::new(0.0, 0.0, 4.0, 2.0)));
        let out = shape.transformed(Affine::FLIP_X);
        assert_eq!(
            out,
            ExportShape::Ellipse(Ellipse::from_rect(Rect::new(-4.0, 0.0, 0.0, 2.0)))
        );
    }

    #[test]
    fn rect_survives_y_flip() {
        let flip = Affine::new([1.0, 0.0, 0.0, -1.0, 0.0, 540.0]);
        let shape = ExportShape::Rect(Rect::new(10.0, 10.0, 20.0, 20.0));
        assert_eq!(
            shape.transformed(flip),
            ExportShape::Rect(Rect::new(10.0, 520.0, 20.0, 530.0))
        );
    }

    #[test]
    fn flipped_rounded_rect_mirrors_its_corners() {
        let shape = ExportShape::RoundedRect(RoundedRect::from_rect(
            Rect::new(0.0, 0.0, 10.0, 10.0),
            (1.0, 2.0, 3.0, 4.0),
        ));
        let ExportShape::RoundedRect(out) = shape.transformed(Affine::FLIP_Y * Affine::scale(2.0))
        else {
            panic!("rounded rect should stay a rounded rect");
        };
        assert_eq!(out.rect(), Rect::new(0.0, -20.0, 20.0, 0.0));
        let r = out.radii();
        assert_eq!(
            (r.top_left, r.top_right, r.bottom_right, r.bottom_left),
            (8.0, 6.0, 4.0, 2.0)
        );
    }

    #[test]
    fn paths_without_segments_draw_nothing() {
        assert!(!ExportShape::path(BezPath::new()).has_segments());
        let mut moves = BezPath::new();
        moves.move_to((1.0, 1.0));
        moves.move_to((2.0, 2.0));
        moves.close_path();
        assert!(!ExportShape::path(moves).has_segments());
        assert!(ExportShape::Rect(Rect::ZERO).has_segments());
    }

    #[test]
    fn mirrored_arc_becomes_path() {
        let arc = ArcShape::new(
            Arc::new((0.0, 0.0), (1.0, 1.0), 0.0, FRAC_PI_2, 0.0),
            ArcClosure::Open,
        );
        let out = ExportShape::Arc(arc).transformed(Affine::FLIP_Y);
        assert!(matches!(out, ExportShape::Path { .. }), "got {out:?}");
    }

    #[test]
    fn negative_sweep_is_normalized() {
        let arc = ArcShape::new(
            Arc::new((0.0, 0.0), (1.0, 1.0), 1.0, -0.5, 0.0),
            ArcClosure::Open,
        );
        let n = arc.normalized();
        assert!((n.arc.start_angle - 0.5).abs() < 1e-12, "start = {}", n.arc.start_angle);
        assert!((n.arc.sweep_angle - 0.5).abs() < 1e-12, "sweep = {}", n.arc.sweep_angle);
    }

    #[test]
    fn pie_bounds_include_center() {
        let arc = ArcShape::new(
            Arc::new((10.0, 10.0), (5.0, 5.0), 0.0, FRAC_PI_2, 0.0),
            ArcClosure::Pie,
        );
        let bounds = ExportShape::Arc(arc).bounding_box();
        assert!((bounds.x0 - 10.0).abs() < 1e-9, "bounds = {bounds:?}");
        assert!((bounds.y0 - 10.0).abs() < 1e-9, "bounds = {bounds:?}");
        assert!((bounds.x1 - 15.0).abs() < 1e-6, "bounds = {bounds:?}");
    }

    #[test]
    fn closed_subpath_polyline_repeats_start() {
        let polylines = flatten_polylines(
            &Rect::new(0.0, 0.0, 1.0, 1.0).to_path(PATH_TOLERANCE),
            PATH_TOLERANCE,
        );
        assert_eq!(polylines.len(), 1, "one subpath");
        assert_eq!(polylines[0].first(), polylines[0].last(), "closed");
        assert_eq!(polylines[0].len(), 5, "four corners plus closing point");
    }
}
