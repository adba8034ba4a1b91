// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Size;

use crate::document::{SlideId, SlideShow};
use crate::graphics::SlideGraphics;
use crate::options::ExportOptions;

/// Run one export pass into a new slide of `doc`.
///
/// Creates a slide of `size` and hands a bound [`SlideGraphics`] to `draw`.
/// The context is disposed when `draw` returns, then the title is added on
/// top of the drawn shapes when one is given. Returns the new slide and
/// whatever `draw` returned.
///
/// ```rust
/// use kurbo::{Rect, Size};
/// use peniko::Color;
/// use understory_export::{ExportShape, VectorGraphics};
/// use understory_export_slides::{Container, ExportOptions, ShapeKind, SlideShow, export_slide};
///
/// let mut doc = SlideShow::new();
/// let options = ExportOptions::default().with_background(None);
/// let (slide, _) = export_slide(&mut doc, Size::new(720.0, 540.0), None, options, |g| {
///     g.set_color(Color::from_rgba8(255, 0, 0, 255));
///     g.fill(&ExportShape::Rect(Rect::new(10.0, 10.0, 20.0, 20.0)))
/// });
///
/// let shapes = doc.children(Container::Slide(slide));
/// assert_eq!(shapes.len(), 1);
/// assert_eq!(doc.shape(shapes[0]).unwrap().kind, ShapeKind::Rect);
/// ```
pub fn export_slide<R>(
    doc: &mut SlideShow,
    size: Size,
    title: Option<&str>,
    options: ExportOptions,
    draw: impl FnOnce(&mut SlideGraphics<'_>) -> R,
) -> (SlideId, R) {
    let slide = doc.create_slide(size);
    let mut graphics = SlideGraphics::new(doc, slide, options);
    let result = draw(&mut graphics);
    graphics.dispose();
    if let Some(title) = title {
        doc.set_title(slide, title);
    }
    log::debug!("exported slide {} ({size:?})", slide.0);
    (slide, result)
}
