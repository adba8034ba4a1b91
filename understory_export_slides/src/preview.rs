// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! SVG preview of a slide, for inspecting exports without a presentation
//! viewer.

use core::fmt::Write as _;

use base64::{Engine as _, engine::general_purpose};
use kurbo::{Arc, BezPath, PathEl, Rect};
use peniko::{Color, Fill};
use understory_export::{ArcShape, PATH_TOLERANCE};

use crate::dash::LineDash;
use crate::document::{PictureFormat, ShapeId, SlideId, SlideShow};
use crate::shape::{FontRef, PersistedShape, ShapeKind, ShapeStyle, TextAlign, TextBox};

/// Render `slide` as an SVG document. Returns `None` if the slide does not
/// exist.
///
/// Shapes are drawn in z-order with their fill, outline and rotation. Groups
/// become `<g>` elements, pictures are inlined as data URLs and shadows use
/// `feDropShadow`.
pub fn slide_to_svg(doc: &SlideShow, slide: SlideId) -> Option<String> {
    let info = doc.slide(slide)?;
    let (width, height) = (info.size.width, info.size.height);
    let mut writer = Writer {
        doc,
        defs: String::new(),
        body: String::new(),
        filters: 0,
    };
    for &id in &info.children {
        writer.shape(id);
    }

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">",
        w = fmt_f64(width),
        h = fmt_f64(height),
    );
    if !writer.defs.is_empty() {
        svg.push_str("<defs>");
        svg.push_str(&writer.defs);
        svg.push_str("</defs>");
    }
    svg.push_str(&writer.body);
    svg.push_str("</svg>");
    Some(svg)
}

struct Writer<'a> {
    doc: &'a SlideShow,
    defs: String,
    body: String,
    filters: u32,
}

impl Writer<'_> {
    fn shape(&mut self, id: ShapeId) {
        let doc = self.doc;
        let Some(shape) = doc.shape(id) else {
            return;
        };
        let attrs = self.common_attrs(shape);
        let a = shape.anchor;
        match &shape.kind {
            ShapeKind::Group { name, children } => {
                let _ = write!(self.body, "<g data-name=\"{}\"{attrs}>", escape(name));
                for &child in children {
                    self.shape(child);
                }
                self.body.push_str("</g>");
            }
            ShapeKind::Rect => {
                let _ = write!(
                    self.body,
                    "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"{attrs}/>",
                    fmt_f64(a.x0),
                    fmt_f64(a.y0),
                    fmt_f64(a.width()),
                    fmt_f64(a.height()),
                );
            }
            ShapeKind::RoundRect { radius } => {
                let _ = write!(
                    self.body,
                    "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" rx=\"{}\"{attrs}/>",
                    fmt_f64(a.x0),
                    fmt_f64(a.y0),
                    fmt_f64(a.width()),
                    fmt_f64(a.height()),
                    fmt_f64(*radius),
                );
            }
            ShapeKind::Ellipse => {
                let c = a.center();
                let _ = write!(
                    self.body,
                    "<ellipse cx=\"{}\" cy=\"{}\" rx=\"{}\" ry=\"{}\"{attrs}/>",
                    fmt_f64(c.x),
                    fmt_f64(c.y),
                    fmt_f64(a.width() / 2.0),
                    fmt_f64(a.height() / 2.0),
                );
            }
            ShapeKind::Line { rotated } => {
                let (y1, y2) = if *rotated { (a.y1, a.y0) } else { (a.y0, a.y1) };
                let _ = write!(
                    self.body,
                    "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\"{attrs}/>",
                    fmt_f64(a.x0),
                    fmt_f64(y1),
                    fmt_f64(a.x1),
                    fmt_f64(y2),
                );
            }
            ShapeKind::Arc {
                center,
                radii,
                start_angle,
                sweep_angle,
                closure,
            } => {
                let arc = ArcShape::new(
                    Arc {
                        center: *center,
                        radii: *radii,
                        start_angle: *start_angle,
                        sweep_angle: *sweep_angle,
                        x_rotation: 0.0,
                    },
                    *closure,
                );
                let d = path_d(&arc.to_path(PATH_TOLERANCE));
                let _ = write!(self.body, "<path d=\"{d}\"{attrs}/>");
            }
            ShapeKind::Freeform { path, fill_rule } => {
                let rule = match fill_rule {
                    Fill::NonZero => "nonzero",
                    Fill::EvenOdd => "evenodd",
                };
                let _ = write!(
                    self.body,
                    "<path d=\"{}\" fill-rule=\"{rule}\"{attrs}/>",
                    path_d(path)
                );
            }
            ShapeKind::Picture { picture } => {
                let Some(picture) = doc.picture(*picture) else {
                    return;
                };
                let mime = match picture.format {
                    PictureFormat::Png => "image/png",
                };
                let _ = write!(
                    self.body,
                    "<image x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" preserveAspectRatio=\"none\" href=\"data:{mime};base64,{}\"{attrs}/>",
                    fmt_f64(a.x0),
                    fmt_f64(a.y0),
                    fmt_f64(a.width()),
                    fmt_f64(a.height()),
                    general_purpose::STANDARD.encode(&picture.data),
                );
            }
            ShapeKind::TextBox(text_box) => self.text(a, text_box, &attrs),
        }
    }

    fn text(&mut self, anchor: Rect, text_box: &TextBox, attrs: &str) {
        let (x, text_anchor) = match text_box.align {
            TextAlign::Left => (anchor.x0 + text_box.inset, "start"),
            TextAlign::Center => (anchor.center().x, "middle"),
            TextAlign::Right => (anchor.x1 - text_box.inset, "end"),
        };
        let family = match &text_box.font {
            FontRef::Index(index) => self
                .doc
                .font_table()
                .names()
                .get(usize::from(*index))
                .map_or("sans-serif", String::as_str),
            FontRef::Family(family) => family.as_str(),
        };
        let (color, alpha) = color_to_svg(text_box.color);
        let _ = write!(
            self.body,
            "<text x=\"{}\" y=\"{}\" font-family=\"{}\" font-size=\"{}\" fill=\"{color}\" text-anchor=\"{text_anchor}\" dominant-baseline=\"hanging\"",
            fmt_f64(x),
            fmt_f64(anchor.y0 + text_box.inset),
            escape(family),
            fmt_f64(text_box.font_size),
        );
        if alpha < 1.0 {
            let _ = write!(self.body, " fill-opacity=\"{}\"", fmt_f64(alpha));
        }
        if text_box.bold {
            self.body.push_str(" font-weight=\"bold\"");
        }
        if text_box.italic {
            self.body.push_str(" font-style=\"italic\"");
        }
        let _ = write!(self.body, "{attrs}>{}</text>", escape(&text_box.text));
    }

    /// Paint, rotation and shadow attributes shared by every element.
    fn common_attrs(&mut self, shape: &PersistedShape) -> String {
        let mut attrs = String::new();
        if !matches!(
            shape.kind,
            ShapeKind::Group { .. } | ShapeKind::Picture { .. } | ShapeKind::TextBox(_)
        ) {
            style_attrs(&mut attrs, &shape.style);
        }
        if shape.rotation != 0 {
            let c = shape.anchor.center();
            let _ = write!(
                attrs,
                " transform=\"rotate({} {} {})\"",
                shape.rotation,
                fmt_f64(c.x),
                fmt_f64(c.y)
            );
        }
        if let Some(shadow) = &shape.style.shadow {
            self.filters += 1;
            let id = format!("shadow{}", self.filters);
            let (color, _) = color_to_svg(shadow.color);
            let _ = write!(
                self.defs,
                "<filter id=\"{id}\"><feDropShadow dx=\"{}\" dy=\"{}\" stdDeviation=\"{}\" flood-color=\"{color}\" flood-opacity=\"{}\"/></filter>",
                shadow.offset_x,
                shadow.offset_y,
                fmt_f64(from_fixed_point(shadow.weight)),
                fmt_f64(from_fixed_point(shadow.opacity)),
            );
            let _ = write!(attrs, " filter=\"url(#{id})\"");
        }
        attrs
    }
}

fn style_attrs(attrs: &mut String, style: &ShapeStyle) {
    match style.fill {
        Some(fill) => {
            let (color, alpha) = color_to_svg(fill);
            let _ = write!(attrs, " fill=\"{color}\"");
            if alpha < 1.0 {
                let _ = write!(attrs, " fill-opacity=\"{}\"", fmt_f64(alpha));
            }
        }
        None => attrs.push_str(" fill=\"none\""),
    }
    if let Some(line) = &style.line {
        let (color, alpha) = color_to_svg(line.color);
        let _ = write!(
            attrs,
            " stroke=\"{color}\" stroke-width=\"{}\"",
            fmt_f64(line.width)
        );
        if alpha < 1.0 {
            let _ = write!(attrs, " stroke-opacity=\"{}\"", fmt_f64(alpha));
        }
        if let Some(dashes) = dash_array(line.dash, line.width) {
            let _ = write!(attrs, " stroke-dasharray=\"{dashes}\"");
        }
    }
}

/// SVG dash array approximating a slide dash pattern at `width`.
fn dash_array(dash: LineDash, width: f64) -> Option<String> {
    let unit = width.max(1.0);
    let pattern: &[f64] = match dash {
        LineDash::Solid => return None,
        LineDash::Dot => &[1.0, 1.0],
        LineDash::Dash => &[4.0, 3.0],
        LineDash::DashDot => &[4.0, 3.0, 1.0, 3.0],
        LineDash::LongDashDot => &[8.0, 3.0, 1.0, 3.0],
        LineDash::LongDashDotDot => &[8.0, 3.0, 1.0, 3.0, 1.0, 3.0],
    };
    let parts: Vec<String> = pattern.iter().map(|v| fmt_f64(v * unit)).collect();
    Some(parts.join(" "))
}

fn from_fixed_point(value: i32) -> f64 {
    f64::from(value) / 65536.0
}

fn color_to_svg(color: Color) -> (String, f64) {
    let rgba = color.to_rgba8();
    (
        format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b),
        f64::from(rgba.a) / 255.0,
    )
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

fn path_d(path: &BezPath) -> String {
    let mut d = String::new();
    for el in path.iter() {
        match el {
            PathEl::MoveTo(p) => {
                let _ = write!(d, "M{} {}", fmt_f64(p.x), fmt_f64(p.y));
            }
            PathEl::LineTo(p) => {
                let _ = write!(d, "L{} {}", fmt_f64(p.x), fmt_f64(p.y));
            }
            PathEl::QuadTo(p1, p2) => {
                let _ = write!(
                    d,
                    "Q{} {} {} {}",
                    fmt_f64(p1.x),
                    fmt_f64(p1.y),
                    fmt_f64(p2.x),
                    fmt_f64(p2.y)
                );
            }
            PathEl::CurveTo(p1, p2, p3) => {
                let _ = write!(
                    d,
                    "C{} {} {} {} {} {}",
                    fmt_f64(p1.x),
                    fmt_f64(p1.y),
                    fmt_f64(p2.x),
                    fmt_f64(p2.y),
                    fmt_f64(p3.x),
                    fmt_f64(p3.y)
                );
            }
            PathEl::ClosePath => d.push('Z'),
        }
    }
    d
}

/// Whole numbers print without a fraction; others keep at most three
/// decimals.
fn fmt_f64(v: f64) -> String {
    if !v.is_finite() {
        return format!("{v}");
    }
    let rounded = v.round();
    if (rounded - v).abs() < 1e-6 {
        return format!("{}", rounded + 0.0);
    }
    let mut s = format!("{v:.3}");
    while s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.pop();
    }
    s
}
