// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Polygonal areas with boolean intersection.
//!
//! Outlines are flattened into closed contours. Intersections against an
//! axis-aligned rectangle clip each contour independently
//! (Sutherland–Hodgman), which keeps the subject's fill rule intact. The
//! general case decomposes both operands into horizontal slabs: slab
//! boundaries are placed at every vertex and at every edge crossing, so the
//! left-to-right order of edges is fixed inside a slab and each covered span
//! is a trapezoid. Vertically adjacent trapezoids that share their edges are
//! chained back into polygons.

use kurbo::{Affine, BezPath, PathEl, Point, Rect, Shape};
use peniko::Fill;

use crate::shape::{ExportShape, PATH_TOLERANCE};

const EPSILON: f64 = 1e-9;

/// A region of the plane bounded by closed polygonal contours.
#[derive(Clone, Debug, PartialEq)]
pub struct ClipArea {
    contours: Vec<Vec<Point>>,
    fill_rule: Fill,
    bounds: Rect,
}

impl Default for ClipArea {
    fn default() -> Self {
        Self::empty()
    }
}

impl ClipArea {
    /// The empty area.
    pub fn empty() -> Self {
        Self {
            contours: Vec::new(),
            fill_rule: Fill::NonZero,
            bounds: Rect::ZERO,
        }
    }

    /// The area covered by `rect`. Degenerate rectangles give the empty area.
    pub fn from_rect(rect: Rect) -> Self {
        let rect = rect.abs();
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            return Self::empty();
        }
        Self::from_contours(
            vec![vec![
                Point::new(rect.x0, rect.y0),
                Point::new(rect.x1, rect.y0),
                Point::new(rect.x1, rect.y1),
                Point::new(rect.x0, rect.y1),
            ]],
            Fill::NonZero,
        )
    }

    /// The area enclosed by `path` under `fill_rule`.
    ///
    /// Open subpaths are closed implicitly.
    pub fn from_path(path: &BezPath, fill_rule: Fill) -> Self {
        let mut contours = Vec::new();
        let mut current: Vec<Point> = Vec::new();
        kurbo::flatten(path.iter(), PATH_TOLERANCE, |el| match el {
            PathEl::MoveTo(p) => {
                contours.push(core::mem::take(&mut current));
                current.push(p);
            }
            PathEl::LineTo(p) => current.push(p),
            PathEl::ClosePath => contours.push(core::mem::take(&mut current)),
            PathEl::QuadTo(..) | PathEl::CurveTo(..) => {}
        });
        contours.push(current);
        Self::from_contours(contours, fill_rule)
    }

    /// The area enclosed by `shape`.
    pub fn from_shape(shape: &ExportShape) -> Self {
        match shape {
            ExportShape::Rect(rect) => Self::from_rect(*rect),
            ExportShape::Path { path, fill_rule } => Self::from_path(path, *fill_rule),
            _ => Self::from_path(&shape.to_path(PATH_TOLERANCE), Fill::NonZero),
        }
    }

    fn from_contours(contours: Vec<Vec<Point>>, fill_rule: Fill) -> Self {
        let contours: Vec<Vec<Point>> = contours
            .into_iter()
            .filter_map(|mut contour| {
                clean_contour(&mut contour);
                (contour.len() >= 3).then_some(contour)
            })
            .collect();
        let bounds = contours
            .iter()
            .flatten()
            .map(|p| Rect::from_points(*p, *p))
            .reduce(|a, b| a.union(b))
            .unwrap_or(Rect::ZERO);
        Self {
            contours,
            fill_rule,
            bounds,
        }
    }

    /// Returns `true` if the area has no contours.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contours.is_empty()
    }

    /// Bounding box of all contours.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Fill rule used to decide which points are inside.
    #[must_use]
    pub fn fill_rule(&self) -> Fill {
        self.fill_rule
    }

    /// Closed contours of the area.
    pub fn contours(&self) -> &[Vec<Point>] {
        &self.contours
    }

    /// The rectangle this area covers, if it is a single axis-aligned rectangle.
    #[must_use]
    pub fn as_rect(&self) -> Option<Rect> {
        let [contour] = self.contours.as_slice() else {
            return None;
        };
        if contour.len() != 4 {
            return None;
        }
        let axis = |a: Point, b: Point| {
            let horizontal = (a.y - b.y).abs() <= EPSILON;
            let vertical = (a.x - b.x).abs() <= EPSILON;
            match (horizontal, vertical) {
                (true, false) => Some(true),
                (false, true) => Some(false),
                _ => None,
            }
        };
        let mut previous = axis(contour[3], contour[0])?;
        for pair in contour.windows(2) {
            let current = axis(pair[0], pair[1])?;
            if current == previous {
                return None;
            }
            previous = current;
        }
        Some(self.bounds)
    }

    /// The area mapped through `affine`.
    #[must_use]
    pub fn transform(&self, affine: Affine) -> Self {
        let contours = self
            .contours
            .iter()
            .map(|contour| contour.iter().map(|p| affine * *p).collect())
            .collect();
        Self::from_contours(contours, self.fill_rule)
    }

    /// Outline of the area as closed subpaths.
    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        for contour in &self.contours {
            let mut points = contour.iter();
            if let Some(first) = points.next() {
                path.move_to(*first);
                for p in points {
                    path.line_to(*p);
                }
                path.close_path();
            }
        }
        path
    }

    /// Returns `true` if `point` lies inside the area.
    #[must_use]
    pub fn contains_point(&self, point: Point) -> bool {
        let mut winding = 0;
        for contour in &self.contours {
            for (i, &a) in contour.iter().enumerate() {
                let b = contour[(i + 1) % contour.len()];
                let side = (b - a).cross(point - a);
                if a.y <= point.y {
                    if b.y > point.y && side > 0.0 {
                        winding += 1;
                    }
                } else if b.y <= point.y && side < 0.0 {
                    winding -= 1;
                }
            }
        }
        is_inside(self.fill_rule, winding)
    }

    /// Area of the covered region, honoring the fill rule.
    #[must_use]
    pub fn covered_area(&self) -> f64 {
        if let Some(rect) = self.as_rect() {
            return rect.area();
        }
        let edges = collect_edges(&[self]);
        let rule = self.fill_rule;
        sweep(&edges, |w| is_inside(rule, w[0]))
            .iter()
            .map(Trapezoid::area)
            .sum()
    }

    /// The intersection of `self` and `other`.
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Self {
        if self.is_empty() || other.is_empty() || !overlaps(self.bounds, other.bounds) {
            return Self::empty();
        }
        if let Some(rect) = other.as_rect() {
            return self.clip_to_rect(rect);
        }
        if let Some(rect) = self.as_rect() {
            return other.clip_to_rect(rect);
        }
        let edges = collect_edges(&[self, other]);
        let (a, b) = (self.fill_rule, other.fill_rule);
        let trapezoids = sweep(&edges, |w| is_inside(a, w[0]) && is_inside(b, w[1]));
        Self::from_trapezoids(&trapezoids)
    }

    /// Returns `true` if `rect` lies entirely inside the area.
    #[must_use]
    pub fn contains_rect(&self, rect: Rect) -> bool {
        let rect = rect.abs();
        let b = self.bounds;
        if rect.x0 < b.x0 - EPSILON
            || rect.y0 < b.y0 - EPSILON
            || rect.x1 > b.x1 + EPSILON
            || rect.y1 > b.y1 + EPSILON
        {
            return false;
        }
        let target = rect.area();
        if target <= 0.0 {
            return self.contains_point(rect.center());
        }
        let covered = self.clip_to_rect(rect).covered_area();
        target - covered <= 1e-7 * target.max(1.0)
    }

    /// Returns `true` if `rect` and the area share a region of positive size.
    #[must_use]
    pub fn intersects_rect(&self, rect: Rect) -> bool {
        let rect = rect.abs();
        if self.is_empty() || !overlaps(self.bounds, rect) {
            return false;
        }
        self.clip_to_rect(rect).covered_area() > EPSILON
    }

    /// Clip open or closed polylines to the area, keeping the inside pieces.
    pub fn clip_polylines(&self, polylines: &[Vec<Point>]) -> Vec<Vec<Point>> {
        let mut out = Vec::new();
        for polyline in polylines {
            let closed = polyline.len() > 2 && polyline.first() == polyline.last();
            let start = out.len();
            let mut run: Vec<Point> = Vec::new();
            for segment in polyline.windows(2) {
                let (a, b) = (segment[0], segment[1]);
                let mut ts = vec![0.0, 1.0];
                for contour in &self.contours {
                    for (i, &c) in contour.iter().enumerate() {
                        let d = contour[(i + 1) % contour.len()];
                        if let Some(t) = segment_crossing(a, b, c, d) {
                            ts.push(t);
                        }
                    }
                }
                ts.sort_by(f64::total_cmp);
                ts.dedup_by(|x, y| (*x - *y).abs() <= EPSILON);
                for window in ts.windows(2) {
                    let (p0, p1) = (a.lerp(b, window[0]), a.lerp(b, window[1]));
                    if self.contains_point(p0.midpoint(p1)) {
                        match run.last() {
                            Some(last) if last.distance(p0) <= EPSILON => run.push(p1),
                            _ => {
                                if run.len() > 1 {
                                    out.push(core::mem::take(&mut run));
                                }
                                run = vec![p0, p1];
                            }
                        }
                    } else if run.len() > 1 {
                        out.push(core::mem::take(&mut run));
                    } else {
                        run.clear();
                    }
                }
            }
            if run.len() > 1 {
                out.push(run);
            }
            // Rejoin a closed outline that was split at its start point.
            if closed && out.len() - start >= 2 {
                let first = polyline[0];
                let starts_at_first = out[start][0].distance(first) <= EPSILON;
                let ends_at_first = out
                    .last()
                    .and_then(|r| r.last())
                    .is_some_and(|p| p.distance(first) <= EPSILON);
                if starts_at_first && ends_at_first {
                    let head = out.remove(start);
                    if let Some(tail) = out.last_mut() {
                        tail.extend(head.into_iter().skip(1));
                    }
                }
            }
        }
        out
    }

    fn clip_to_rect(&self, rect: Rect) -> Self {
        if rect_contains(rect, self.bounds) {
            return self.clone();
        }
        let contours = self
            .contours
            .iter()
            .map(|contour| clip_contour_to_rect(contour, rect))
            .collect();
        Self::from_contours(contours, self.fill_rule)
    }

    fn from_trapezoids(trapezoids: &[Trapezoid]) -> Self {
        struct Chain {
            left: Vec<Point>,
            right: Vec<Point>,
            slab: usize,
            bottom: (f64, f64),
        }
        let mut chains: Vec<Chain> = Vec::new();
        for t in trapezoids {
            let continues = chains.iter_mut().find(|c| {
                c.slab + 1 == t.slab
                    && (c.bottom.0 - t.left.0).abs() <= EPSILON
                    && (c.bottom.1 - t.right.0).abs() <= EPSILON
            });
            match continues {
                Some(chain) => {
                    chain.left.push(Point::new(t.left.1, t.y1));
                    chain.right.push(Point::new(t.right.1, t.y1));
                    chain.slab = t.slab;
                    chain.bottom = (t.left.1, t.right.1);
                }
                None => chains.push(Chain {
                    left: vec![Point::new(t.left.0, t.y0), Point::new(t.left.1, t.y1)],
                    right: vec![Point::new(t.right.0, t.y0), Point::new(t.right.1, t.y1)],
                    slab: t.slab,
                    bottom: (t.left.1, t.right.1),
                }),
            }
        }
        let contours = chains
            .into_iter()
            .map(|mut chain| {
                chain.right.reverse();
                chain.left.extend(chain.right);
                chain.left
            })
            .collect();
        Self::from_contours(contours, Fill::NonZero)
    }
}

fn is_inside(rule: Fill, winding: i32) -> bool {
    match rule {
        Fill::NonZero => winding != 0,
        Fill::EvenOdd => winding % 2 != 0,
    }
}

fn overlaps(a: Rect, b: Rect) -> bool {
    a.x0 < b.x1 && b.x0 < a.x1 && a.y0 < b.y1 && b.y0 < a.y1
}

/// Drop repeated points, the closing duplicate and collinear vertices.
fn clean_contour(contour: &mut Vec<Point>) {
    contour.dedup_by(|a, b| a.distance(*b) <= EPSILON);
    while contour.len() > 1 && contour[0].distance(contour[contour.len() - 1]) <= EPSILON {
        contour.pop();
    }
    let mut changed = true;
    while changed && contour.len() >= 3 {
        changed = false;
        let n = contour.len();
        for i in 0..n {
            let prev = contour[(i + n - 1) % n];
            let next = contour[(i + 1) % n];
            let (u, v) = (contour[i] - prev, next - contour[i]);
            if u.cross(v).abs() <= EPSILON * u.hypot().max(1.0) * v.hypot().max(1.0) {
                contour.remove(i);
                changed = true;
                break;
            }
        }
    }
}

#[derive(Copy, Clone, Debug)]
enum Boundary {
    Left(f64),
    Right(f64),
    Top(f64),
    Bottom(f64),
}

impl Boundary {
    fn inside(self, p: Point) -> bool {
        match self {
            Self::Left(x) => p.x >= x,
            Self::Right(x) => p.x <= x,
            Self::Top(y) => p.y >= y,
            Self::Bottom(y) => p.y <= y,
        }
    }

    fn cross(self, a: Point, b: Point) -> Point {
        match self {
            Self::Left(x) | Self::Right(x) => a.lerp(b, (x - a.x) / (b.x - a.x)),
            Self::Top(y) | Self::Bottom(y) => a.lerp(b, (y - a.y) / (b.y - a.y)),
        }
    }
}

fn clip_contour_to_rect(contour: &[Point], rect: Rect) -> Vec<Point> {
    let boundaries = [
        Boundary::Left(rect.x0),
        Boundary::Right(rect.x1),
        Boundary::Top(rect.y0),
        Boundary::Bottom(rect.y1),
    ];
    let mut output = contour.to_vec();
    for boundary in boundaries {
        let input = core::mem::take(&mut output);
        let Some(&last) = input.last() else {
            break;
        };
        let mut previous = last;
        for &current in &input {
            match (boundary.inside(previous), boundary.inside(current)) {
                (true, true) => output.push(current),
                (true, false) => output.push(boundary.cross(previous, current)),
                (false, true) => {
                    output.push(boundary.cross(previous, current));
                    output.push(current);
                }
                (false, false) => {}
            }
            previous = current;
        }
    }
    output
}

fn rect_contains(outer: Rect, inner: Rect) -> bool {
    inner.x0 >= outer.x0 && inner.y0 >= outer.y0 && inner.x1 <= outer.x1 && inner.y1 <= outer.y1
}

/// Parameter along `a..b` where it crosses `c..d`, strictly inside `a..b`.
fn segment_crossing(a: Point, b: Point, c: Point, d: Point) -> Option<f64> {
    let r = b - a;
    let s = d - c;
    let denom = r.cross(s);
    if denom.abs() <= EPSILON {
        return None;
    }
    let t = (c - a).cross(s) / denom;
    let u = (c - a).cross(r) / denom;
    (t > EPSILON && t < 1.0 - EPSILON && (-EPSILON..=1.0 + EPSILON).contains(&u)).then_some(t)
}

#[derive(Copy, Clone, Debug)]
struct Edge {
    top: Point,
    bottom: Point,
    winding: i32,
    operand: usize,
}

impl Edge {
    fn x_at(&self, y: f64) -> f64 {
        let dy = self.bottom.y - self.top.y;
        if dy <= EPSILON {
            return self.top.x;
        }
        self.top.x + (self.bottom.x - self.top.x) * (y - self.top.y) / dy
    }
}

fn collect_edges(areas: &[&ClipArea]) -> Vec<Edge> {
    let mut edges = Vec::new();
    for (operand, area) in areas.iter().enumerate() {
        for contour in &area.contours {
            for (i, &a) in contour.iter().enumerate() {
                let b = contour[(i + 1) % contour.len()];
                if (a.y - b.y).abs() <= EPSILON {
                    continue;
                }
                let (top, bottom, winding) = if a.y < b.y { (a, b, 1) } else { (b, a, -1) };
                edges.push(Edge {
                    top,
                    bottom,
                    winding,
                    operand,
                });
            }
        }
    }
    edges
}

/// Slab boundaries: every vertex height plus every height where two edges cross.
fn breakpoints(edges: &[Edge]) -> Vec<f64> {
    let mut ys: Vec<f64> = edges.iter().flat_map(|e| [e.top.y, e.bottom.y]).collect();
    for (i, e) in edges.iter().enumerate() {
        for f in &edges[i + 1..] {
            let y0 = e.top.y.max(f.top.y);
            let y1 = e.bottom.y.min(f.bottom.y);
            if y1 - y0 <= EPSILON {
                continue;
            }
            let d0 = e.x_at(y0) - f.x_at(y0);
            let d1 = e.x_at(y1) - f.x_at(y1);
            if d0 * d1 < 0.0 {
                ys.push(y0 + (y1 - y0) * d0 / (d0 - d1));
            }
        }
    }
    ys.sort_by(f64::total_cmp);
    ys.dedup_by(|a, b| (*a - *b).abs() <= EPSILON);
    ys
}

#[derive(Copy, Clone, Debug)]
struct Trapezoid {
    slab: usize,
    y0: f64,
    y1: f64,
    /// Left edge x at `y0` and `y1`.
    left: (f64, f64),
    /// Right edge x at `y0` and `y1`.
    right: (f64, f64),
}

impl Trapezoid {
    fn area(&self) -> f64 {
        0.5 * ((self.right.0 - self.left.0) + (self.right.1 - self.left.1)) * (self.y1 - self.y0)
    }
}

fn sweep(edges: &[Edge], inside: impl Fn([i32; 2]) -> bool) -> Vec<Trapezoid> {
    let ys = breakpoints(edges);
    let mut out = Vec::new();
    let mut active: Vec<(f64, usize)> = Vec::new();
    for (slab, pair) in ys.windows(2).enumerate() {
        let (y0, y1) = (pair[0], pair[1]);
        if y1 - y0 <= EPSILON {
            continue;
        }
        let mid = 0.5 * (y0 + y1);
        active.clear();
        active.extend(
            edges
                .iter()
                .enumerate()
                .filter(|(_, e)| e.top.y <= mid && e.bottom.y >= mid)
                .map(|(i, e)| (e.x_at(mid), i)),
        );
        active.sort_by(|a, b| a.0.total_cmp(&b.0));
        let mut winding = [0_i32; 2];
        let mut open: Option<usize> = None;
        for &(_, i) in &active {
            let edge = &edges[i];
            winding[edge.operand] += edge.winding;
            match (open, inside(winding)) {
                (None, true) => open = Some(i),
                (Some(l), false) => {
                    let (left, right) = (&edges[l], edge);
                    let t = Trapezoid {
                        slab,
                        y0,
                        y1,
                        left: (left.x_at(y0), left.x_at(y1)),
                        right: (right.x_at(y0), right.x_at(y1)),
                    };
                    if t.right.0 - t.left.0 > EPSILON || t.right.1 - t.left.1 > EPSILON {
                        out.push(t);
                    }
                    open = None;
                }
                _ => {}
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Circle;

    fn diamond(cx: f64, cy: f64, r: f64) -> ClipArea {
        let mut path = BezPath::new();
        path.move_to((cx, cy - r));
        path.line_to((cx + r, cy));
        path.line_to((cx, cy + r));
        path.line_to((cx - r, cy));
        path.close_path();
        ClipArea::from_path(&path, Fill::NonZero)
    }

    #[test]
    fn rect_path_is_detected_as_rect() {
        let area = ClipArea::from_path(
            &Rect::new(1.0, 2.0, 3.0, 4.0).to_path(PATH_TOLERANCE),
            Fill::NonZero,
        );
        assert_eq!(area.as_rect(), Some(Rect::new(1.0, 2.0, 3.0, 4.0)));
        assert!(diamond(0.0, 0.0, 1.0).as_rect().is_none(), "diamond is not a rect");
    }

    #[test]
    fn rect_intersection_is_rect() {
        let a = ClipArea::from_rect(Rect::new(0.0, 0.0, 10.0, 10.0));
        let b = ClipArea::from_rect(Rect::new(5.0, 5.0, 20.0, 20.0));
        assert_eq!(a.intersect(&b).as_rect(), Some(Rect::new(5.0, 5.0, 10.0, 10.0)));
    }

    #[test]
    fn disjoint_intersection_is_empty() {
        let a = ClipArea::from_rect(Rect::new(0.0, 0.0, 5.0, 5.0));
        let b = ClipArea::from_rect(Rect::new(50.0, 50.0, 60.0, 60.0));
        assert!(a.intersect(&b).is_empty(), "no overlap");
    }

    #[test]
    fn diamonds_intersect_into_square() {
        // Two diamonds of radius 2, centers 2 apart: overlap is a diamond of radius 1.
        let a = diamond(0.0, 0.0, 2.0);
        let b = diamond(2.0, 0.0, 2.0);
        let out = a.intersect(&b);
        assert!((out.covered_area() - 2.0).abs() < 1e-9, "area = {}", out.covered_area());
        let bounds = out.bounds();
        assert!((bounds.x0 - 0.0).abs() < 1e-9, "bounds = {bounds:?}");
        assert!((bounds.x1 - 2.0).abs() < 1e-9, "bounds = {bounds:?}");
        assert!((bounds.y0 + 1.0).abs() < 1e-9, "bounds = {bounds:?}");
        assert_eq!(out.contours().len(), 1, "chains merge into one polygon");
        assert_eq!(out.contours()[0].len(), 4, "collinear points removed");
    }

    #[test]
    fn even_odd_hole_is_excluded() {
        let mut path = Rect::new(0.0, 0.0, 10.0, 10.0).to_path(PATH_TOLERANCE);
        path.extend(Rect::new(3.0, 3.0, 7.0, 7.0).path_elements(PATH_TOLERANCE));
        let ring = ClipArea::from_path(&path, Fill::EvenOdd);
        assert!((ring.covered_area() - 84.0).abs() < 1e-9, "area = {}", ring.covered_area());
        assert!(!ring.contains_point(Point::new(5.0, 5.0)), "hole");
        assert!(ring.contains_point(Point::new(1.0, 1.0)), "ring");
        assert!(!ring.intersects_rect(Rect::new(4.0, 4.0, 6.0, 6.0)), "inside hole");
        assert!(!ring.contains_rect(Rect::new(1.0, 1.0, 9.0, 9.0)), "spans hole");
    }

    #[test]
    fn general_intersection_respects_even_odd() {
        let mut path = Rect::new(0.0, 0.0, 10.0, 10.0).to_path(PATH_TOLERANCE);
        path.extend(Rect::new(3.0, 3.0, 7.0, 7.0).path_elements(PATH_TOLERANCE));
        let ring = ClipArea::from_path(&path, Fill::EvenOdd);
        let d = diamond(5.0, 5.0, 5.0);
        let out = ring.intersect(&d);
        // Diamond area 50, minus the 16-unit hole that lies fully inside it.
        assert!((out.covered_area() - 34.0).abs() < 1e-9, "area = {}", out.covered_area());
    }

    #[test]
    fn circle_contains_and_intersects() {
        let circle = ClipArea::from_shape(&ExportShape::path(
            Circle::new((50.0, 50.0), 20.0).to_path(PATH_TOLERANCE),
        ));
        assert!(circle.contains_rect(Rect::new(45.0, 45.0, 55.0, 55.0)), "center square");
        assert!(circle.intersects_rect(Rect::new(60.0, 45.0, 80.0, 55.0)), "straddles edge");
        assert!(!circle.contains_rect(Rect::new(60.0, 45.0, 80.0, 55.0)), "straddles edge");
        assert!(!circle.intersects_rect(Rect::new(0.0, 0.0, 10.0, 10.0)), "corner");
    }

    #[test]
    fn transform_moves_bounds() {
        let area = ClipArea::from_rect(Rect::new(0.0, 0.0, 2.0, 2.0));
        let moved = area.transform(Affine::translate((3.0, 4.0)));
        assert_eq!(moved.as_rect(), Some(Rect::new(3.0, 4.0, 5.0, 6.0)));
    }

    #[test]
    fn polyline_clipped_to_rect() {
        let area = ClipArea::from_rect(Rect::new(0.0, 0.0, 10.0, 10.0));
        let runs = area.clip_polylines(&[vec![Point::new(-5.0, 5.0), Point::new(15.0, 5.0)]]);
        assert_eq!(runs, vec![vec![Point::new(0.0, 5.0), Point::new(10.0, 5.0)]]);
    }

    #[test]
    fn polyline_leaving_and_reentering_splits() {
        let area = ClipArea::from_rect(Rect::new(0.0, 0.0, 10.0, 10.0));
        let runs = area.clip_polylines(&[vec![
            Point::new(2.0, 5.0),
            Point::new(20.0, 5.0),
            Point::new(20.0, 8.0),
            Point::new(2.0, 8.0),
        ]]);
        assert_eq!(runs.len(), 2, "runs = {runs:?}");
    }

    #[test]
    fn closed_outline_rejoins_at_start() {
        let area = ClipArea::from_rect(Rect::new(0.0, 0.0, 10.0, 5.0));
        let square = vec![
            Point::new(2.0, 2.0),
            Point::new(8.0, 2.0),
            Point::new(8.0, 8.0),
            Point::new(2.0, 8.0),
            Point::new(2.0, 2.0),
        ];
        let runs = area.clip_polylines(&[square]);
        assert_eq!(runs.len(), 1, "runs = {runs:?}");
        assert_eq!(runs[0].first(), Some(&Point::new(2.0, 5.0)));
        assert_eq!(runs[0].last(), Some(&Point::new(8.0, 5.0)));
    }
}
