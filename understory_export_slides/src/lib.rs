// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Export Slides: a slide-document backend for
//! [`VectorGraphics`](understory_export::VectorGraphics).
//!
//! [`SlideGraphics`] turns immediate-mode drawing calls into discrete slide
//! shapes held in a [`SlideShow`] arena:
//!
//! - Outlines are clipped in device space and classified into lines,
//!   rectangles, rounded rectangles, ellipses, arcs or freeform paths.
//! - Strokes become line styles with a width scaled by the transform and a
//!   dash pattern quantized to the fixed set slides support ([`LineDash`]).
//! - Text becomes positioned, possibly rotated text boxes, padded so the
//!   viewer's own font metrics do not cut glyphs off.
//! - Gradient and image fills, image blits and hard-clipped text fall back
//!   to PNG pictures rendered with `vello_cpu`.
//! - Nested groups and one-shot drop shadows follow the scene's structure.
//!
//! [`slide_to_svg`] renders a slide as SVG for inspection.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Affine, Line, Rect, Size};
//! use peniko::Color;
//! use understory_export::{ExportShape, VectorGraphics};
//! use understory_export_slides::{
//!     Container, ExportOptions, ShapeKind, SlideGraphics, SlideShow, slide_to_svg,
//! };
//!
//! let mut doc = SlideShow::new();
//! let slide = doc.create_slide(Size::new(720.0, 540.0));
//! let mut g = SlideGraphics::new(&mut doc, slide, ExportOptions::default().with_background(None));
//!
//! g.set_color(Color::from_rgba8(200, 0, 0, 255));
//! g.fill(&ExportShape::Rect(Rect::new(20.0, 20.0, 120.0, 80.0)));
//!
//! g.set_transform(Affine::translate((300.0, 200.0)));
//! g.draw(&ExportShape::Line(Line::new((0.0, 0.0), (100.0, 0.0))));
//!
//! let shapes = doc.children(Container::Slide(slide));
//! assert_eq!(shapes.len(), 2);
//! assert_eq!(doc.shape(shapes[0]).unwrap().kind, ShapeKind::Rect);
//! assert_eq!(
//!     doc.shape(shapes[1]).unwrap().anchor,
//!     Rect::new(300.0, 200.0, 400.0, 200.0)
//! );
//!
//! let svg = slide_to_svg(&doc, slide).unwrap();
//! assert!(svg.contains("<line"));
//! ```

mod classify;
mod dash;
mod document;
mod effects;
mod export;
mod graphics;
mod group;
mod options;
mod preview;
mod raster;
mod shape;
mod text;

pub use classify::{ALIGN_TOLERANCE, Classified, MIN_FREEFORM_EXTENT, classify, is_well_aligned};
pub use dash::{DOT_DASH_RATIO, LineDash, quantize_dash};
pub use document::{
    Container, FontTable, Picture, PictureFormat, PictureId, ShapeId, Slide, SlideId, SlideShow,
};
pub use effects::{
    DROP_SHADOW_SCALE, SHADOW_OBSCURED, SHADOW_TYPE_OFFSET, ShadowProps, to_fixed_point,
};
pub use export::export_slide;
pub use graphics::SlideGraphics;
pub use group::GroupStack;
pub use options::ExportOptions;
pub use preview::slide_to_svg;
pub use raster::{RasterError, Rasterizer, encode_png};
pub use shape::{
    FontRef, LineStyle, PersistedShape, ShapeKind, ShapeStyle, TextAlign, TextBox,
    VerticalAlignment,
};
pub use text::{
    TEXT_MIN_ESCAPE, escapement, font_ref, is_rotated, rotation_degrees, slack, text_anchor,
};
