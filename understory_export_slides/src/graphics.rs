// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The slide drawing context.

use kurbo::{Affine, Point, Rect, Size};
use peniko::{Color, ImageData};
use understory_export::{
    ApproximateMeasurer, AttributedText, ClipMode, ClipState, ClippedShape, DrawingState,
    EffectDesc, ExportShape, Font, PATH_TOLERANCE, PendingEffect, PendingShadow, ResolvedPaint,
    TextMeasurer, VectorGraphics,
};

use crate::classify::{Classified, classify};
use crate::dash::quantize_dash;
use crate::document::{Container, Picture, ShapeId, SlideId, SlideShow};
use crate::effects::ShadowProps;
use crate::group::GroupStack;
use crate::options::ExportOptions;
use crate::raster::{RasterError, Rasterizer};
use crate::shape::{LineStyle, PersistedShape, ShapeKind, TextBox};
use crate::text::{escapement, font_ref, rotation_degrees, text_anchor};

/// The document and slide a context draws into.
#[derive(Debug)]
struct Target<'d> {
    doc: &'d mut SlideShow,
    slide: SlideId,
    groups: GroupStack,
}

/// A [`VectorGraphics`] context that turns drawing calls into slide shapes.
///
/// Every emitting call goes through the same steps: map to device space,
/// clip, classify, style, then add to the innermost open group or the
/// slide. Complex paints, images and hard-clipped text fall back to
/// embedded PNG pictures.
///
/// A context created with [`unbound`](Self::unbound) has no document and
/// emits nothing.
#[derive(Debug)]
pub struct SlideGraphics<'d, M: TextMeasurer = ApproximateMeasurer> {
    target: Option<Target<'d>>,
    options: ExportOptions,
    state: DrawingState,
    effect: PendingEffect,
    raster: Rasterizer,
    measurer: M,
}

impl<'d> SlideGraphics<'d> {
    /// A context drawing into `slide` of `doc`, measuring text with
    /// [`ApproximateMeasurer`].
    pub fn new(doc: &'d mut SlideShow, slide: SlideId, options: ExportOptions) -> Self {
        Self::with_measurer(doc, slide, options, ApproximateMeasurer::default())
    }

    /// A context with no document. Drawing calls only update state.
    pub fn unbound(options: ExportOptions) -> Self {
        let mut state = DrawingState::new();
        state.paint.set_color(options.foreground);
        Self {
            target: None,
            options,
            state,
            effect: PendingEffect::default(),
            raster: Rasterizer::new(),
            measurer: ApproximateMeasurer::default(),
        }
    }
}

impl<'d, M: TextMeasurer> SlideGraphics<'d, M> {
    /// A context drawing into `slide` of `doc` with a custom text measurer.
    ///
    /// When the options carry a background color the whole slide is filled
    /// with it first. The paint then starts as the foreground color.
    pub fn with_measurer(
        doc: &'d mut SlideShow,
        slide: SlideId,
        options: ExportOptions,
        measurer: M,
    ) -> Self {
        let mut graphics = Self {
            target: Some(Target {
                doc,
                slide,
                groups: GroupStack::new(Container::Slide(slide)),
            }),
            options,
            state: DrawingState::new(),
            effect: PendingEffect::default(),
            raster: Rasterizer::new(),
            measurer,
        };
        if let (Some(background), Some(size)) = (graphics.options.background, graphics.slide_size())
        {
            graphics.state.paint.set_color(background);
            graphics.fill_shape(&ExportShape::Rect(size.to_rect()), None);
        }
        graphics.state.paint.set_color(graphics.options.foreground);
        graphics
    }

    /// A context drawing into the same document and current container, with
    /// a copy of this context's state.
    ///
    /// Groups opened in the child nest inside this context's innermost open
    /// group. The pending effect is not inherited.
    pub fn create_child(&mut self) -> SlideGraphics<'_, M>
    where
        M: Clone,
    {
        SlideGraphics {
            target: self.target.as_mut().map(|target| Target {
                doc: &mut *target.doc,
                slide: target.slide,
                groups: GroupStack::new(target.groups.current()),
            }),
            options: self.options.clone(),
            state: self.state.clone(),
            effect: PendingEffect::default(),
            raster: Rasterizer::new(),
            measurer: self.measurer.clone(),
        }
    }

    /// Release scratch raster memory and drop any pending effect.
    ///
    /// The context stays usable.
    pub fn dispose(&mut self) {
        self.raster.release();
        self.effect = PendingEffect::default();
    }

    /// Export options of this context.
    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// The text measurer.
    pub fn measurer(&self) -> &M {
        &self.measurer
    }

    /// The document, if the context is bound to one.
    pub fn document(&self) -> Option<&SlideShow> {
        self.target.as_ref().map(|target| &*target.doc)
    }

    /// The slide drawn into, if the context is bound.
    pub fn slide(&self) -> Option<SlideId> {
        self.target.as_ref().map(|target| target.slide)
    }

    /// Number of groups opened by this context and not yet closed.
    #[must_use]
    pub fn open_groups(&self) -> usize {
        self.target.as_ref().map_or(0, |target| target.groups.depth())
    }

    /// The effect waiting for the next fill.
    pub fn pending_effect(&self) -> Option<&PendingShadow> {
        self.effect.peek()
    }

    fn slide_size(&self) -> Option<Size> {
        let target = self.target.as_ref()?;
        Some(target.doc.slide(target.slide)?.size)
    }

    fn emit(&mut self, shape: PersistedShape) -> Option<ShapeId> {
        let target = self.target.as_mut()?;
        target.doc.add_shape(target.groups.current(), shape)
    }

    fn emit_picture(
        &mut self,
        picture: Result<Picture, RasterError>,
        anchor: Rect,
        shadow: Option<ShadowProps>,
    ) -> Option<ShapeId> {
        let picture = match picture {
            Ok(picture) => picture,
            Err(err) => {
                log::warn!("raster fallback failed, object omitted: {err}");
                return None;
            }
        };
        let target = self.target.as_mut()?;
        let picture = target.doc.add_picture(picture);
        let mut shape = PersistedShape::new(anchor, ShapeKind::Picture { picture });
        shape.style.shadow = shadow;
        target.doc.add_shape(target.groups.current(), shape)
    }

    fn line_style(&self) -> LineStyle {
        let stroke = &self.state.stroke;
        let width = self.options.force_stroke_width.unwrap_or_else(|| {
            stroke.width * self.state.transform.affine().determinant().abs().sqrt()
        });
        let slide_width = self.slide_size().map_or(0.0, |size| size.width);
        LineStyle {
            color: self.state.paint.stroke_color(),
            width,
            dash: quantize_dash(&stroke.dash_pattern, slide_width),
        }
    }

    /// Map `shape` to device space and clip it. `None` when nothing is left.
    fn visible(&self, shape: &ExportShape, mode: ClipMode) -> Option<ExportShape> {
        if !shape.has_segments() {
            log::trace!("{mode:?} of an outline with no segments skipped");
            return None;
        }
        let device = self.state.to_device(shape);
        match self.state.clip.clip_shape(&device, mode) {
            ClippedShape::Culled => {
                log::trace!("{mode:?} culled by the clip");
                None
            }
            ClippedShape::Unchanged => Some(device),
            ClippedShape::Clipped(visible) => Some(visible),
        }
    }

    fn fill_shape(
        &mut self,
        shape: &ExportShape,
        shadow: Option<PendingShadow>,
    ) -> Option<ShapeId> {
        self.target.as_ref()?;
        let device = self.visible(shape, ClipMode::Fill)?;
        let bounds = device.bounding_box();
        if bounds.width() <= 0.0 || bounds.height() <= 0.0 {
            log::trace!("fill of {bounds:?} encloses no area");
            return None;
        }
        if !self.options.accept_small_shapes && (bounds.width() < 1.0 || bounds.height() < 1.0) {
            log::trace!("fill of {bounds:?} rejected as too small");
            return None;
        }
        let shadow = shadow.as_ref().map(ShadowProps::from_pending);
        match self.state.paint.resolve() {
            ResolvedPaint::Solid(color) => {
                let Classified { anchor, kind } = classify(&device);
                let alpha = color.to_rgba8().a;
                let mut shape = PersistedShape::new(anchor, kind);
                shape.style.fill = Some(color);
                shape.style.fill_opacity = (alpha != 255).then(|| u32::from(alpha) << 8);
                shape.style.shadow = shadow;
                self.emit(shape)
            }
            ResolvedPaint::Complex(brush) => {
                let picture = self.raster.fill(
                    &device.to_path(PATH_TOLERANCE),
                    device.fill_rule(),
                    brush,
                    self.state.transform.affine(),
                    bounds,
                );
                self.emit_picture(picture, bounds, shadow)
            }
        }
    }

    fn emit_text(&mut self, text: &str, origin: Point, font: &Font, color: Color) -> Option<ShapeId> {
        self.target.as_ref()?;
        if text.is_empty() {
            return None;
        }
        let transform = self.state.transform.affine();
        let rot = escapement(transform);
        let descent = self.measurer.line_metrics(font).descent;
        let ink = self.measurer.ink_bounds(text, font) + origin.to_vec2();
        let device = transform.transform_rect_bbox(ink);
        let anchor = text_anchor(
            &self.measurer,
            text,
            font,
            Point::new(device.x0, device.y0 + descent),
            rot,
        );
        if !self.options.accept_small_shapes && (anchor.width() < 1.0 || anchor.height() < 1.0) {
            log::trace!("text box {anchor:?} rejected as too small");
            return None;
        }

        match self.state.clip.classify(anchor) {
            ClipState::Outside => {
                log::trace!("text {text:?} lies outside the clip");
                None
            }
            ClipState::Intersects if self.options.hard_clip_text => {
                self.rasterize_text(text, origin, font, color)
            }
            ClipState::NotClipped | ClipState::Intersects => {
                let target = self.target.as_mut()?;
                let mut text_box =
                    TextBox::new(text, font.size, font_ref(target.doc.font_table(), font), color);
                text_box.bold = font.bold;
                text_box.italic = font.italic;
                let mut shape = PersistedShape::new(anchor, ShapeKind::TextBox(text_box));
                shape.rotation = rotation_degrees(rot);
                target.doc.add_shape(target.groups.current(), shape)
            }
        }
    }

    /// Render glyph outlines clipped to the device clip into a picture
    /// covering the clip bounds.
    fn rasterize_text(
        &mut self,
        text: &str,
        origin: Point,
        font: &Font,
        color: Color,
    ) -> Option<ShapeId> {
        let clip = self.state.clip.device_clip()?;
        let bounds = clip.bounds();
        let outline = Affine::translate(origin.to_vec2()) * self.measurer.outline(text, font);
        let picture = self.raster.text(
            &outline,
            color,
            self.state.transform.affine(),
            &clip.to_path(),
            bounds,
        );
        self.emit_picture(picture, bounds, None)
    }
}

impl<M: TextMeasurer> VectorGraphics for SlideGraphics<'_, M> {
    type Handle = ShapeId;

    fn state(&self) -> &DrawingState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut DrawingState {
        &mut self.state
    }

    fn draw(&mut self, shape: &ExportShape) -> Option<ShapeId> {
        self.target.as_ref()?;
        let device = self.visible(shape, ClipMode::Stroke)?;
        let bounds = device.bounding_box();
        if !self.options.accept_small_shapes && bounds.width() < 1.0 && bounds.height() < 1.0 {
            log::trace!("stroke of {bounds:?} rejected as too small");
            return None;
        }
        let Classified { anchor, kind } = classify(&device);
        let mut shape = PersistedShape::new(anchor, kind);
        shape.style.line = Some(self.line_style());
        self.emit(shape)
    }

    fn fill(&mut self, shape: &ExportShape) -> Option<ShapeId> {
        let shadow = self.effect.take();
        self.fill_shape(shape, shadow)
    }

    fn draw_string(&mut self, text: &str, origin: Point) -> Option<ShapeId> {
        let font = self.state.font.clone();
        let color = self.state.paint.color();
        self.emit_text(text, origin, &font, color)
    }

    fn draw_rich_text(&mut self, text: &AttributedText, origin: Point) -> Vec<ShapeId> {
        let mut handles = Vec::new();
        let mut pen = origin.x;
        for run in text.runs() {
            let font = run
                .attributes
                .font
                .clone()
                .unwrap_or_else(|| self.state.font.clone());
            let color = run
                .attributes
                .color
                .unwrap_or_else(|| self.state.paint.color());
            let offset = font.transform.translation();
            let at = Point::new(pen + offset.x, origin.y + offset.y);
            handles.extend(self.emit_text(run.text, at, &font, color));
            pen += self.measurer.advance(run.text, &font);
        }
        handles
    }

    fn draw_image(&mut self, image: &ImageData, transform: Affine) -> Option<ShapeId> {
        self.target.as_ref()?;
        if image.width == 0 || image.height == 0 {
            return None;
        }
        let to_device = self.state.transform.affine() * transform;
        let pixels = Rect::new(0.0, 0.0, f64::from(image.width), f64::from(image.height));
        let mut bounds = to_device.transform_rect_bbox(pixels);
        let clip = match self.state.clip.classify(bounds) {
            ClipState::Outside => return None,
            ClipState::NotClipped => None,
            ClipState::Intersects => {
                let area = self.state.clip.device_clip()?;
                bounds = bounds.intersect(area.bounds());
                Some(area.to_path())
            }
        };
        if bounds.width() <= 0.0 || bounds.height() <= 0.0 {
            return None;
        }
        if !self.options.accept_small_shapes && (bounds.width() < 1.0 || bounds.height() < 1.0) {
            return None;
        }
        let picture = self.raster.image(image, to_device, clip.as_ref(), bounds);
        self.emit_picture(picture, bounds, None)
    }

    fn clear_rect(&mut self, rect: Rect) -> Option<ShapeId> {
        let saved = self.state.paint.clone();
        self.state
            .paint
            .set_color(self.options.background.unwrap_or(Color::WHITE));
        let id = self.fill_shape(&ExportShape::Rect(rect), None);
        self.state.paint = saved;
        id
    }

    fn start_group(&mut self, name: &str, bounds: Rect) -> Option<ShapeId> {
        if !self.options.support_groups {
            return None;
        }
        let anchor = self.state.transform.affine().transform_rect_bbox(bounds);
        let target = self.target.as_mut()?;
        let group = PersistedShape::new(
            anchor,
            ShapeKind::Group {
                name: name.into(),
                children: Vec::new(),
            },
        );
        let id = target.doc.add_shape(target.groups.current(), group)?;
        target.groups.push(id);
        log::trace!("opened group {name:?} at depth {}", target.groups.depth());
        Some(id)
    }

    fn end_group(&mut self) {
        if !self.options.support_groups {
            return;
        }
        if let Some(target) = self.target.as_mut() {
            if target.groups.pop().is_none() {
                log::debug!("end_group without an open group");
            }
        }
    }

    fn apply_effect(&mut self, effect: &EffectDesc) {
        self.effect.apply(effect);
    }
}
