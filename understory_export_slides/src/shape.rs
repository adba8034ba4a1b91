// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Persisted slide shapes.

use kurbo::{BezPath, Rect};
use peniko::{Color, Fill};
use understory_export::ArcClosure;

use crate::dash::LineDash;
use crate::document::{PictureId, ShapeId};
use crate::effects::ShadowProps;

/// A shape stored in a [`SlideShow`](crate::SlideShow).
#[derive(Clone, Debug, PartialEq)]
pub struct PersistedShape {
    /// Bounding rectangle in slide coordinates.
    pub anchor: Rect,
    /// Clockwise rotation in whole degrees, applied about the anchor center.
    pub rotation: i32,
    /// Geometry or content.
    pub kind: ShapeKind,
    /// Fill, line and shadow.
    pub style: ShapeStyle,
}

impl PersistedShape {
    /// An unstyled, unrotated shape.
    pub fn new(anchor: Rect, kind: ShapeKind) -> Self {
        Self {
            anchor,
            rotation: 0,
            kind,
            style: ShapeStyle::default(),
        }
    }

    /// Child shapes, if this is a group.
    pub fn children(&self) -> &[ShapeId] {
        match &self.kind {
            ShapeKind::Group { children, .. } => children,
            _ => &[],
        }
    }
}

/// The kinds of shape a slide can hold.
#[derive(Clone, Debug, PartialEq)]
pub enum ShapeKind {
    /// A straight line across the anchor.
    Line {
        /// The line runs from the anchor's bottom-left to top-right corner
        /// instead of top-left to bottom-right.
        rotated: bool,
    },
    /// A rectangle filling the anchor.
    Rect,
    /// A rounded rectangle filling the anchor.
    RoundRect {
        /// Corner radius in slide units.
        radius: f64,
    },
    /// An ellipse inscribed in the anchor.
    Ellipse,
    /// An elliptical arc.
    Arc {
        /// Center in slide coordinates.
        center: kurbo::Point,
        /// Radii in slide units.
        radii: kurbo::Vec2,
        /// Start angle in radians.
        start_angle: f64,
        /// Non-negative sweep in radians.
        sweep_angle: f64,
        /// How the ends are joined.
        closure: ArcClosure,
    },
    /// An arbitrary outline in slide coordinates.
    Freeform {
        /// Outline geometry.
        path: BezPath,
        /// Fill rule.
        fill_rule: Fill,
    },
    /// An embedded raster picture stretched over the anchor.
    Picture {
        /// Picture data in the document.
        picture: PictureId,
    },
    /// A box of text.
    TextBox(TextBox),
    /// A group of shapes.
    Group {
        /// Group name.
        name: String,
        /// Children in z-order.
        children: Vec<ShapeId>,
    },
}

/// Fill, line and shadow of a shape. `None` means "not drawn".
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShapeStyle {
    /// Flat fill color.
    pub fill: Option<Color>,
    /// Fill opacity as `alpha << 8` for translucent fills.
    pub fill_opacity: Option<u32>,
    /// Outline.
    pub line: Option<LineStyle>,
    /// Shadow.
    pub shadow: Option<ShadowProps>,
}

/// Outline of a shape.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LineStyle {
    /// Line color.
    pub color: Color,
    /// Width in slide units.
    pub width: f64,
    /// Dash pattern.
    pub dash: LineDash,
}

/// How a text box refers to its font.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FontRef {
    /// Index into the document font table.
    Index(u16),
    /// Family name not present in the font table.
    Family(String),
}

/// Vertical placement of text inside its box.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum VerticalAlignment {
    /// Text starts at the top of the box.
    #[default]
    Top,
    /// Text is centered.
    Middle,
    /// Text ends at the bottom of the box.
    Bottom,
}

/// Horizontal alignment of a paragraph.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextAlign {
    /// Left aligned.
    #[default]
    Left,
    /// Centered.
    Center,
    /// Right aligned.
    Right,
}

/// Text content and formatting of a text box.
#[derive(Clone, Debug, PartialEq)]
pub struct TextBox {
    /// The text.
    pub text: String,
    /// Font size in points.
    pub font_size: f64,
    /// Font reference.
    pub font: FontRef,
    /// Bold.
    pub bold: bool,
    /// Italic.
    pub italic: bool,
    /// Text color.
    pub color: Color,
    /// Wrap lines at the box width.
    pub word_wrap: bool,
    /// Inner padding on all four sides.
    pub inset: f64,
    /// Vertical alignment.
    pub vertical_alignment: VerticalAlignment,
    /// Paragraph alignment.
    pub align: TextAlign,
}

impl TextBox {
    /// A single-line box: no wrapping, no insets, top-left aligned.
    pub fn new(text: impl Into<String>, font_size: f64, font: FontRef, color: Color) -> Self {
        Self {
            text: text.into(),
            font_size,
            font,
            bold: false,
            italic: false,
            color,
            word_wrap: false,
            inset: 0.0,
            vertical_alignment: VerticalAlignment::Top,
            align: TextAlign::Left,
        }
    }
}
