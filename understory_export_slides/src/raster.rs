// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raster fallback for content slides cannot express natively.
//!
//! Complex-paint fills, image blits and hard-clipped text are rendered with
//! `vello_cpu` into a surface covering their device bounds (one device unit
//! per pixel), then encoded as PNG.

use kurbo::{Affine, BezPath, PathEl, Rect};
use peniko::{Brush, Color, Fill, ImageData, ImageSampler};
use vello_cpu::kurbo::{Affine as CpuAffine, BezPath as CpuBezPath, Rect as CpuRect};
use vello_cpu::{Image as CpuImage, ImageSource, Pixmap, RenderContext, RenderMode, RenderSettings};

use crate::document::{Picture, PictureFormat};

/// Failure to produce a raster picture.
#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    /// The surface would be larger than the renderer supports, or not finite.
    #[error("raster surface of {width}x{height} units is out of range")]
    InvalidSize {
        /// Requested width.
        width: f64,
        /// Requested height.
        height: f64,
    },
    /// There is nothing to draw.
    #[error("nothing to rasterize")]
    Empty,
    /// PNG encoding failed.
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] png::EncodingError),
}

/// Renders pictures, reusing a scratch pixel buffer between calls.
#[derive(Debug, Default)]
pub struct Rasterizer {
    scratch: Vec<u8>,
}

impl Rasterizer {
    /// A rasterizer with no buffers allocated.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill the device-space `path` with `brush`, cropped to the device
    /// rectangle `bounds`.
    ///
    /// `paint_transform` maps the brush geometry (gradient end points, image
    /// pixels) into device space.
    pub fn fill(
        &mut self,
        path: &BezPath,
        fill_rule: Fill,
        brush: &Brush,
        paint_transform: Affine,
        bounds: Rect,
    ) -> Result<Picture, RasterError> {
        if path.elements().is_empty() {
            return Err(RasterError::Empty);
        }
        let path = to_cpu_path(path);
        self.render(bounds, |ctx, origin| {
            ctx.set_transform(to_cpu_affine(origin));
            ctx.set_paint_transform(to_cpu_affine(paint_transform));
            ctx.set_fill_rule(fill_rule);
            set_brush(ctx, brush);
            ctx.fill_path(&path);
        })
    }

    /// Draw `image` with its pixel grid mapped to device space by
    /// `transform`, clipped to the device outline `clip` and cropped to
    /// `bounds`.
    pub fn image(
        &mut self,
        image: &ImageData,
        transform: Affine,
        clip: Option<&BezPath>,
        bounds: Rect,
    ) -> Result<Picture, RasterError> {
        if image.width == 0 || image.height == 0 {
            return Err(RasterError::Empty);
        }
        let clip = clip.map(to_cpu_path);
        self.render(bounds, |ctx, origin| {
            if let Some(clip) = &clip {
                ctx.set_transform(to_cpu_affine(origin));
                ctx.push_clip_layer(clip);
            }
            ctx.set_transform(to_cpu_affine(origin * transform));
            ctx.set_paint(CpuImage {
                image: ImageSource::from_peniko_image_data(image),
                sampler: ImageSampler::default(),
            });
            ctx.fill_rect(&CpuRect::new(
                0.0,
                0.0,
                f64::from(image.width),
                f64::from(image.height),
            ));
            if clip.is_some() {
                ctx.pop_layer();
            }
        })
    }

    /// Fill glyph outlines (user space) with `color` under `transform`,
    /// clipped to the device outline `clip` and cropped to `bounds`.
    pub fn text(
        &mut self,
        outline: &BezPath,
        color: Color,
        transform: Affine,
        clip: &BezPath,
        bounds: Rect,
    ) -> Result<Picture, RasterError> {
        if outline.elements().is_empty() {
            return Err(RasterError::Empty);
        }
        let outline = to_cpu_path(outline);
        let clip = to_cpu_path(clip);
        self.render(bounds, |ctx, origin| {
            ctx.set_transform(to_cpu_affine(origin));
            ctx.push_clip_layer(&clip);
            ctx.set_transform(to_cpu_affine(origin * transform));
            ctx.set_fill_rule(Fill::NonZero);
            ctx.set_paint(color);
            ctx.fill_path(&outline);
            ctx.pop_layer();
        })
    }

    /// Free the scratch buffer.
    pub fn release(&mut self) {
        self.scratch = Vec::new();
    }

    /// Bytes currently held by the scratch buffer.
    #[must_use]
    pub fn scratch_capacity(&self) -> usize {
        self.scratch.capacity()
    }

    fn render(
        &mut self,
        bounds: Rect,
        draw: impl FnOnce(&mut RenderContext, Affine),
    ) -> Result<Picture, RasterError> {
        let (width, height) = surface_size(bounds)?;
        let settings = RenderSettings {
            render_mode: RenderMode::OptimizeSpeed,
            ..RenderSettings::default()
        };
        let mut ctx = RenderContext::new_with(width, height, settings);
        draw(&mut ctx, Affine::translate(-bounds.origin().to_vec2()));
        ctx.flush();

        let mut pixmap = Pixmap::new(width, height);
        ctx.render_to_pixmap(&mut pixmap);
        self.scratch.clear();
        for p in pixmap.take_unpremultiplied() {
            self.scratch.extend_from_slice(&[p.r, p.g, p.b, p.a]);
        }

        let (width, height) = (u32::from(width), u32::from(height));
        let data = encode_png(&self.scratch, width, height)?;
        log::trace!("rasterized {width}x{height} picture ({} bytes)", data.len());
        Ok(Picture {
            format: PictureFormat::Png,
            width,
            height,
            data,
        })
    }
}

/// Pixel size of a surface covering `bounds`, rounded up.
fn surface_size(bounds: Rect) -> Result<(u16, u16), RasterError> {
    let bounds = bounds.abs();
    let (width, height) = (bounds.width(), bounds.height());
    if !(width.is_finite() && height.is_finite()) {
        return Err(RasterError::InvalidSize { width, height });
    }
    if width <= 0.0 || height <= 0.0 {
        return Err(RasterError::Empty);
    }
    match (pixels(width), pixels(height)) {
        (Some(w), Some(h)) => Ok((w, h)),
        _ => Err(RasterError::InvalidSize { width, height }),
    }
}

#[allow(clippy::cast_possible_truncation, reason = "range checked before the cast")]
fn pixels(extent: f64) -> Option<u16> {
    let extent = extent.ceil().max(1.0);
    (extent <= f64::from(u16::MAX)).then(|| extent as u16)
}

/// Encode unpremultiplied RGBA8 pixels as PNG.
pub fn encode_png(rgba: &[u8], width: u32, height: u32) -> Result<Vec<u8>, RasterError> {
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(rgba)?;
        writer.finish()?;
    }
    Ok(out)
}

fn to_cpu_affine(xf: Affine) -> CpuAffine {
    CpuAffine::new(xf.as_coeffs())
}

fn to_cpu_path(path: &BezPath) -> CpuBezPath {
    let mut out = CpuBezPath::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => out.move_to((p.x, p.y)),
            PathEl::LineTo(p) => out.line_to((p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to((p1.x, p1.y), (p2.x, p2.y)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to((p1.x, p1.y), (p2.x, p2.y), (p3.x, p3.y));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn set_brush(ctx: &mut RenderContext, brush: &Brush) {
    match brush {
        Brush::Solid(color) => ctx.set_paint(*color),
        Brush::Gradient(gradient) => ctx.set_paint(gradient.clone()),
        Brush::Image(image_brush) => ctx.set_paint(CpuImage {
            image: ImageSource::from_peniko_image_data(&image_brush.image),
            sampler: image_brush.sampler,
        }),
    }
}
