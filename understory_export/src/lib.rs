// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Export: drawing vocabulary for vector exporters.
//!
//! Exporters turn an immediate-mode stream of 2D drawing calls into
//! documents made of discrete objects. This crate holds the parts that do
//! not depend on the destination format:
//!
//! - [`VectorGraphics`]: the capability trait scene traversals draw through.
//! - [`DrawingState`]: transform, clip, paint, stroke and font of one context.
//! - [`TransformState`]: right-multiplying transform stack.
//! - [`ClipRegion`] and [`ClipArea`]: device-space clip tracking with
//!   polygon intersection, shape clipping and rectangle classification.
//! - [`PaintState`]: flat colors versus complex brushes.
//! - [`TextMeasurer`], [`Font`], [`AttributedText`]: text metrics supplied by
//!   the caller and rich-text run segmentation.
//! - [`EffectDesc`] and [`PendingEffect`]: the one-shot effect latch.
//!
//! ## Clipping
//!
//! ```rust
//! use kurbo::{Affine, Rect};
//! use understory_export::{ClipMode, ClipRegion, ClippedShape, ExportShape};
//!
//! let mut clip = ClipRegion::new();
//! clip.set_clip(Some(&Rect::new(0.0, 0.0, 10.0, 10.0).into()), Affine::IDENTITY);
//!
//! // A square half inside the clip is cut down to the visible part.
//! let square = ExportShape::Rect(Rect::new(5.0, 5.0, 15.0, 15.0));
//! assert_eq!(
//!     clip.clip_shape(&square, ClipMode::Fill),
//!     ClippedShape::Clipped(ExportShape::Rect(Rect::new(5.0, 5.0, 10.0, 10.0))),
//! );
//!
//! // A square outside it is culled.
//! let far = ExportShape::Rect(Rect::new(50.0, 50.0, 60.0, 60.0));
//! assert_eq!(clip.clip_shape(&far, ClipMode::Fill), ClippedShape::Culled);
//! ```

mod area;
mod clip;
mod effect;
mod graphics;
mod paint;
mod shape;
mod state;
mod text;
mod transform;

pub use area::ClipArea;
pub use clip::{ClipMode, ClipRegion, ClipState, ClippedShape, MIN_CLIP_EXTENT, widen};
pub use effect::{EffectDesc, PendingEffect, PendingShadow, Shadow, ShadowKind};
pub use graphics::VectorGraphics;
pub use paint::{PaintState, ResolvedPaint, brightest_stop, luma};
pub use shape::{ArcClosure, ArcShape, ExportShape, PATH_TOLERANCE, flatten_polylines};
pub use state::DrawingState;
pub use text::{
    ApproximateMeasurer, AttributedText, Font, LineMetrics, TextAttributes, TextMeasurer, TextRun,
};
pub use transform::{TransformState, invert, rotation_angle};

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{Affine, Point, Rect};
    use peniko::ImageData;

    /// Records device-space bounds of every call, to check the provided methods.
    #[derive(Default)]
    struct RecordingGraphics {
        state: DrawingState,
        drawn: Vec<Rect>,
        effects: PendingEffect,
    }

    impl VectorGraphics for RecordingGraphics {
        type Handle = usize;

        fn state(&self) -> &DrawingState {
            &self.state
        }

        fn state_mut(&mut self) -> &mut DrawingState {
            &mut self.state
        }

        fn draw(&mut self, shape: &ExportShape) -> Option<usize> {
            self.drawn.push(self.state.to_device(shape).bounding_box());
            Some(self.drawn.len() - 1)
        }

        fn fill(&mut self, shape: &ExportShape) -> Option<usize> {
            self.effects.take();
            self.draw(shape)
        }

        fn draw_string(&mut self, _text: &str, _origin: Point) -> Option<usize> {
            None
        }

        fn draw_rich_text(&mut self, _text: &AttributedText, _origin: Point) -> Vec<usize> {
            Vec::new()
        }

        fn draw_image(&mut self, image: &ImageData, transform: Affine) -> Option<usize> {
            let rect = Rect::new(0.0, 0.0, f64::from(image.width), f64::from(image.height));
            self.drawn
                .push((self.state.transform.affine() * transform).transform_rect_bbox(rect));
            Some(self.drawn.len() - 1)
        }

        fn clear_rect(&mut self, rect: Rect) -> Option<usize> {
            self.fill(&rect.into())
        }

        fn start_group(&mut self, _name: &str, _bounds: Rect) -> Option<usize> {
            None
        }

        fn end_group(&mut self) {}

        fn apply_effect(&mut self, effect: &EffectDesc) {
            self.effects.apply(effect);
        }
    }

    fn image(width: u32, height: u32) -> ImageData {
        ImageData {
            data: peniko::Blob::from(vec![0_u8; (width * height * 4) as usize]),
            format: peniko::ImageFormat::Rgba8,
            alpha_type: peniko::ImageAlphaType::Alpha,
            width,
            height,
        }
    }

    #[test]
    fn provided_transform_methods_compose() {
        let mut g = RecordingGraphics::default();
        g.translate(10.0, 10.0);
        g.scale(2.0, 2.0);
        g.draw(&Rect::new(0.0, 0.0, 1.0, 1.0).into());
        assert_eq!(g.drawn, vec![Rect::new(10.0, 10.0, 12.0, 12.0)]);
    }

    #[test]
    fn provided_clip_methods_round_trip() {
        let mut g = RecordingGraphics::default();
        g.translate(3.0, 0.0);
        g.set_clip(Some(&Rect::new(0.0, 0.0, 5.0, 5.0).into()));
        g.clip(&Rect::new(1.0, 1.0, 10.0, 10.0).into());
        assert_eq!(
            g.get_clip(),
            Some(ExportShape::Rect(Rect::new(1.0, 1.0, 5.0, 5.0)))
        );
        g.set_clip(None);
        assert!(g.get_clip().is_none(), "clip removed");
    }

    #[test]
    fn image_rect_scales_into_destination() {
        let mut g = RecordingGraphics::default();
        g.draw_image_rect(&image(4, 2), Rect::new(10.0, 10.0, 30.0, 20.0));
        assert_eq!(g.drawn, vec![Rect::new(10.0, 10.0, 30.0, 20.0)]);
        assert!(g.draw_image_rect(&image(0, 2), Rect::new(0.0, 0.0, 1.0, 1.0)).is_none());
    }
}
