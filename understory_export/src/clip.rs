// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Device-space clip tracking.

use kurbo::{Affine, BezPath, Rect};

use crate::area::ClipArea;
use crate::shape::{ExportShape, PATH_TOLERANCE, flatten_polylines};
use crate::transform::invert;

/// Bounds thinner than this are widened before clip tests.
pub const MIN_CLIP_EXTENT: f64 = 0.1;

/// How a rectangle relates to the current clip.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ClipState {
    /// There is no clip, or the rectangle lies entirely inside it.
    NotClipped,
    /// The rectangle lies entirely outside the clip.
    Outside,
    /// The rectangle straddles the clip boundary.
    Intersects,
}

/// Whether a shape is clipped as a filled area or as a stroked outline.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ClipMode {
    /// Intersect the enclosed area with the clip.
    Fill,
    /// Keep the parts of the outline that run inside the clip.
    Stroke,
}

/// Result of clipping a device-space shape.
#[derive(Clone, Debug, PartialEq)]
pub enum ClippedShape {
    /// Nothing of the shape is visible.
    Culled,
    /// The shape lies inside the clip and is used as is.
    Unchanged,
    /// The visible part of the shape.
    Clipped(ExportShape),
}

/// Current clip of a drawing context, kept in device space.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClipRegion {
    device: Option<ClipArea>,
}

impl ClipRegion {
    /// No clip.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the clip with `shape` mapped through `transform`.
    ///
    /// `None` removes the clip.
    pub fn set_clip(&mut self, shape: Option<&ExportShape>, transform: Affine) {
        self.device = shape.map(|shape| ClipArea::from_shape(&shape.transformed(transform)));
    }

    /// Intersect the clip with `shape` mapped through `transform`.
    pub fn clip(&mut self, shape: &ExportShape, transform: Affine) {
        let area = ClipArea::from_shape(&shape.transformed(transform));
        self.device = Some(match &self.device {
            Some(current) => current.intersect(&area),
            None => area,
        });
        if self.is_empty() {
            log::trace!("clip intersection is empty; drawing is culled until the clip changes");
        }
    }

    /// The clip in user space for `transform`.
    ///
    /// Returns `None` when there is no clip or `transform` is singular.
    pub fn get_clip(&self, transform: Affine) -> Option<ExportShape> {
        let area = self.device.as_ref()?.transform(invert(transform)?);
        Some(match area.as_rect() {
            Some(rect) => ExportShape::Rect(rect),
            None if area.is_empty() => ExportShape::Rect(Rect::ZERO),
            None => ExportShape::Path {
                path: area.to_path(),
                fill_rule: area.fill_rule(),
            },
        })
    }

    /// The device-space clip area, if any.
    pub fn device_clip(&self) -> Option<&ClipArea> {
        self.device.as_ref()
    }

    /// Returns `true` if a clip is set and covers nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.device.as_ref().is_some_and(ClipArea::is_empty)
    }

    /// How the device-space rectangle `bounds` relates to the clip.
    #[must_use]
    pub fn classify(&self, bounds: Rect) -> ClipState {
        let Some(area) = &self.device else {
            return ClipState::NotClipped;
        };
        let bounds = widen(bounds);
        if area.contains_rect(bounds) {
            ClipState::NotClipped
        } else if area.intersects_rect(bounds) {
            ClipState::Intersects
        } else {
            ClipState::Outside
        }
    }

    /// Clip a device-space shape.
    pub fn clip_shape(&self, shape: &ExportShape, mode: ClipMode) -> ClippedShape {
        let Some(area) = &self.device else {
            return ClippedShape::Unchanged;
        };
        match self.classify(shape.bounding_box()) {
            ClipState::NotClipped => ClippedShape::Unchanged,
            ClipState::Outside => ClippedShape::Culled,
            ClipState::Intersects => match mode {
                ClipMode::Fill => {
                    let visible = area.intersect(&ClipArea::from_shape(shape));
                    if visible.is_empty() {
                        ClippedShape::Culled
                    } else if let Some(rect) = visible.as_rect() {
                        ClippedShape::Clipped(ExportShape::Rect(rect))
                    } else {
                        ClippedShape::Clipped(ExportShape::path(visible.to_path()))
                    }
                }
                ClipMode::Stroke => {
                    let outline = flatten_polylines(&shape.to_path(PATH_TOLERANCE), PATH_TOLERANCE);
                    let runs = area.clip_polylines(&outline);
                    if runs.is_empty() {
                        return ClippedShape::Culled;
                    }
                    let mut path = BezPath::new();
                    for run in runs {
                        let mut points = run.into_iter();
                        if let Some(first) = points.next() {
                            path.move_to(first);
                            for p in points {
                                path.line_to(p);
                            }
                        }
                    }
                    ClippedShape::Clipped(ExportShape::path(path))
                }
            },
        }
    }
}

/// Widen `bounds` so both sides are at least [`MIN_CLIP_EXTENT`].
pub fn widen(bounds: Rect) -> Rect {
    let bounds = bounds.abs();
    Rect::new(
        bounds.x0,
        bounds.y0,
        bounds.x0 + bounds.width().max(MIN_CLIP_EXTENT),
        bounds.y0 + bounds.height().max(MIN_CLIP_EXTENT),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f64::consts::FRAC_PI_4;
    use kurbo::{Line, Shape};

    #[test]
    fn no_clip_leaves_shapes_unchanged() {
        let region = ClipRegion::new();
        let shape = ExportShape::Rect(Rect::new(0.0, 0.0, 5.0, 5.0));
        assert_eq!(region.clip_shape(&shape, ClipMode::Fill), ClippedShape::Unchanged);
        assert!(region.get_clip(Affine::IDENTITY).is_none(), "no clip");
    }

    #[test]
    fn nested_clips_intersect() {
        let mut region = ClipRegion::new();
        region.set_clip(Some(&Rect::new(0.0, 0.0, 10.0, 10.0).into()), Affine::IDENTITY);
        region.clip(&Rect::new(5.0, 0.0, 20.0, 10.0).into(), Affine::IDENTITY);
        assert_eq!(
            region.get_clip(Affine::IDENTITY),
            Some(ExportShape::Rect(Rect::new(5.0, 0.0, 10.0, 10.0)))
        );
    }

    #[test]
    fn disjoint_clip_culls_everything() {
        let mut region = ClipRegion::new();
        region.set_clip(Some(&Rect::new(0.0, 0.0, 5.0, 5.0).into()), Affine::IDENTITY);
        region.clip(&Rect::new(10.0, 10.0, 15.0, 15.0).into(), Affine::IDENTITY);
        assert!(region.is_empty(), "empty intersection");
        let shape = ExportShape::Rect(Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(region.clip_shape(&shape, ClipMode::Fill), ClippedShape::Culled);
    }

    #[test]
    fn clip_is_stored_in_device_space() {
        let mut region = ClipRegion::new();
        let xf = Affine::translate((10.0, 20.0));
        region.set_clip(Some(&Rect::new(0.0, 0.0, 5.0, 5.0).into()), xf);
        assert_eq!(
            region.device_clip().and_then(ClipArea::as_rect),
            Some(Rect::new(10.0, 20.0, 15.0, 25.0))
        );
        assert_eq!(
            region.get_clip(xf),
            Some(ExportShape::Rect(Rect::new(0.0, 0.0, 5.0, 5.0)))
        );
    }

    #[test]
    fn rotated_clip_round_trips_as_path() {
        let mut region = ClipRegion::new();
        let xf = Affine::rotate(FRAC_PI_4);
        region.set_clip(Some(&Rect::new(0.0, 0.0, 5.0, 5.0).into()), xf);
        // Back in user space the clip is the original square, found again as a rect.
        let Some(ExportShape::Rect(rect)) = region.get_clip(xf) else {
            panic!("user-space clip should be a rect");
        };
        assert!((rect.width() - 5.0).abs() < 1e-9, "rect = {rect:?}");
        // Under a different transform it is a rotated path.
        assert!(
            matches!(region.get_clip(Affine::IDENTITY), Some(ExportShape::Path { .. })),
            "device clip is rotated"
        );
    }

    #[test]
    fn singular_transform_has_no_clip() {
        let mut region = ClipRegion::new();
        region.set_clip(Some(&Rect::new(0.0, 0.0, 5.0, 5.0).into()), Affine::IDENTITY);
        assert!(region.get_clip(Affine::scale(0.0)).is_none(), "singular");
    }

    #[test]
    fn fill_partially_clipped_to_rect() {
        let mut region = ClipRegion::new();
        region.set_clip(Some(&Rect::new(0.0, 0.0, 10.0, 10.0).into()), Affine::IDENTITY);
        let shape = ExportShape::Rect(Rect::new(5.0, 5.0, 15.0, 15.0));
        assert_eq!(
            region.clip_shape(&shape, ClipMode::Fill),
            ClippedShape::Clipped(ExportShape::Rect(Rect::new(5.0, 5.0, 10.0, 10.0)))
        );
    }

    #[test]
    fn stroke_is_clipped_as_polyline() {
        let mut region = ClipRegion::new();
        region.set_clip(Some(&Rect::new(0.0, 0.0, 10.0, 10.0).into()), Affine::IDENTITY);
        let shape = ExportShape::Line(Line::new((-10.0, 5.0), (20.0, 5.0)));
        let ClippedShape::Clipped(clipped) = region.clip_shape(&shape, ClipMode::Stroke) else {
            panic!("line crosses the clip boundary");
        };
        let bounds = clipped.bounding_box();
        assert!(bounds.x0.abs() < 1e-9, "bounds = {bounds:?}");
        assert!((bounds.x1 - 10.0).abs() < 1e-9, "bounds = {bounds:?}");
        // A zero-area line has nothing to fill.
        assert_eq!(region.clip_shape(&shape, ClipMode::Fill), ClippedShape::Culled);
    }

    #[test]
    fn thin_bounds_are_widened() {
        let mut region = ClipRegion::new();
        region.set_clip(Some(&Rect::new(0.0, 0.0, 10.0, 10.0).into()), Affine::IDENTITY);
        assert_eq!(
            region.classify(Line::new((2.0, 5.0), (8.0, 5.0)).bounding_box()),
            ClipState::NotClipped
        );
        assert_eq!(widen(Rect::new(1.0, 1.0, 1.0, 3.0)), Rect::new(1.0, 1.0, 1.1, 3.0));
    }
}
