// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drawing capability trait.

use kurbo::{Affine, Point, Rect, Stroke};
use peniko::{Brush, Color, ImageData};

use crate::effect::EffectDesc;
use crate::shape::ExportShape;
use crate::state::DrawingState;
use crate::text::{AttributedText, Font};

/// Immediate-mode drawing surface implemented by each export format.
///
/// State setters have default implementations in terms of
/// [`state_mut`](Self::state_mut); exporters implement the emitting calls.
/// Emitting calls return a handle to the object they created, or `None`
/// when nothing was emitted (culled, rejected as too small, or no document
/// bound).
pub trait VectorGraphics {
    /// Handle to an object in the destination document.
    type Handle;

    /// Current drawing state.
    fn state(&self) -> &DrawingState;

    /// Current drawing state, mutably.
    fn state_mut(&mut self) -> &mut DrawingState;

    /// Stroke the outline of `shape` with the current stroke and paint.
    fn draw(&mut self, shape: &ExportShape) -> Option<Self::Handle>;

    /// Fill `shape` with the current paint.
    fn fill(&mut self, shape: &ExportShape) -> Option<Self::Handle>;

    /// Draw `text` with its baseline starting at `origin`.
    fn draw_string(&mut self, text: &str, origin: Point) -> Option<Self::Handle>;

    /// Draw attributed text, one object per uniform run.
    fn draw_rich_text(&mut self, text: &AttributedText, origin: Point) -> Vec<Self::Handle>;

    /// Draw `image` with its pixel grid mapped through `transform`.
    fn draw_image(&mut self, image: &ImageData, transform: Affine) -> Option<Self::Handle>;

    /// Draw `image` scaled into `dst`.
    fn draw_image_rect(&mut self, image: &ImageData, dst: Rect) -> Option<Self::Handle> {
        if image.width == 0 || image.height == 0 {
            return None;
        }
        let dst = dst.abs();
        let transform = Affine::translate(dst.origin().to_vec2())
            * Affine::scale_non_uniform(
                dst.width() / f64::from(image.width),
                dst.height() / f64::from(image.height),
            );
        self.draw_image(image, transform)
    }

    /// Fill `rect` with the background color, leaving the paint untouched.
    fn clear_rect(&mut self, rect: Rect) -> Option<Self::Handle>;

    /// Open a group covering `bounds`; later objects become its children.
    fn start_group(&mut self, name: &str, bounds: Rect) -> Option<Self::Handle>;

    /// Close the innermost open group.
    fn end_group(&mut self);

    /// Latch `effect` for the next fill.
    fn apply_effect(&mut self, effect: &EffectDesc);

    /// Replace the clip with `shape` in user space. `None` removes the clip.
    fn set_clip(&mut self, shape: Option<&ExportShape>) {
        let transform = self.state().transform.affine();
        self.state_mut().clip.set_clip(shape, transform);
    }

    /// Intersect the clip with `shape` in user space.
    fn clip(&mut self, shape: &ExportShape) {
        let transform = self.state().transform.affine();
        self.state_mut().clip.clip(shape, transform);
    }

    /// The clip in user space.
    fn get_clip(&self) -> Option<ExportShape> {
        let state = self.state();
        state.clip.get_clip(state.transform.affine())
    }

    /// Replace the transform.
    fn set_transform(&mut self, transform: Affine) {
        self.state_mut().transform.set(transform);
    }

    /// Concatenate `transform` to the current transform.
    fn transform(&mut self, transform: Affine) {
        self.state_mut().transform.concatenate(transform);
    }

    /// Concatenate a translation.
    fn translate(&mut self, dx: f64, dy: f64) {
        self.state_mut().transform.translate(dx, dy);
    }

    /// Concatenate a rotation about the origin.
    fn rotate(&mut self, theta: f64) {
        self.state_mut().transform.rotate(theta);
    }

    /// Concatenate a rotation about `center`.
    fn rotate_about(&mut self, theta: f64, center: Point) {
        self.state_mut().transform.rotate_about(theta, center);
    }

    /// Concatenate a scale.
    fn scale(&mut self, sx: f64, sy: f64) {
        self.state_mut().transform.scale(sx, sy);
    }

    /// Concatenate a shear.
    fn shear(&mut self, shx: f64, shy: f64) {
        self.state_mut().transform.shear(shx, shy);
    }

    /// Set the paint.
    fn set_paint(&mut self, brush: Brush) {
        self.state_mut().paint.set_paint(brush);
    }

    /// Set a flat color paint.
    fn set_color(&mut self, color: Color) {
        self.state_mut().paint.set_color(color);
    }

    /// Set the stroke.
    fn set_stroke(&mut self, stroke: Stroke) {
        self.state_mut().stroke = stroke;
    }

    /// Set the font.
    fn set_font(&mut self, font: Font) {
        self.state_mut().font = font;
    }
}
