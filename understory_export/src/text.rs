// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fonts, text measurement and attributed text.
//!
//! Exporters do not shape text themselves. Metrics and glyph outlines come
//! from a [`TextMeasurer`] supplied by the caller; [`ApproximateMeasurer`]
//! is a fixed-ratio stand-in useful for tests and previews.

use core::ops::Range;

use kurbo::{Affine, BezPath, Rect, Shape};
use peniko::Color;

/// A font selection.
#[derive(Clone, Debug, PartialEq)]
pub struct Font {
    /// Family name, e.g. `"Arial"`.
    pub family: String,
    /// Face name, e.g. `"Arial Bold"`. Used first when looking fonts up.
    pub face_name: String,
    /// Size in user units.
    pub size: f64,
    /// Bold weight.
    pub bold: bool,
    /// Italic style.
    pub italic: bool,
    /// Transform applied to glyphs; its translation offsets rich-text runs.
    pub transform: Affine,
}

impl Default for Font {
    fn default() -> Self {
        Self::new("Arial", 12.0)
    }
}

impl Font {
    /// A regular font whose face name equals its family.
    pub fn new(family: impl Into<String>, size: f64) -> Self {
        let family = family.into();
        Self {
            face_name: family.clone(),
            family,
            size,
            bold: false,
            italic: false,
            transform: Affine::IDENTITY,
        }
    }

    /// Set the face name.
    #[must_use]
    pub fn with_face_name(mut self, face_name: impl Into<String>) -> Self {
        self.face_name = face_name.into();
        self
    }

    /// Set the bold flag.
    #[must_use]
    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    /// Set the italic flag.
    #[must_use]
    pub fn with_italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }

    /// Set the glyph transform.
    #[must_use]
    pub fn with_transform(mut self, transform: Affine) -> Self {
        self.transform = transform;
        self
    }
}

/// Vertical metrics of a line of text.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct LineMetrics {
    /// Distance from the baseline to the top of the line.
    pub ascent: f64,
    /// Distance from the baseline to the bottom of the line.
    pub descent: f64,
    /// Extra space between lines.
    pub leading: f64,
}

impl LineMetrics {
    /// Total line height.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.ascent + self.descent + self.leading
    }
}

/// Source of text metrics and glyph outlines.
///
/// All rectangles and paths are relative to the baseline origin, with y
/// growing downward.
pub trait TextMeasurer {
    /// Line metrics of `font`.
    fn line_metrics(&self, font: &Font) -> LineMetrics;

    /// Advance width of `text`.
    fn advance(&self, text: &str, font: &Font) -> f64;

    /// Bounds of the glyph ink of `text`.
    fn ink_bounds(&self, text: &str, font: &Font) -> Rect;

    /// Glyph outlines of `text`.
    fn outline(&self, text: &str, font: &Font) -> BezPath;

    /// Logical bounds: the advance by the full line height.
    fn logical_bounds(&self, text: &str, font: &Font) -> Rect {
        let m = self.line_metrics(font);
        Rect::new(0.0, -m.ascent, self.advance(text, font), m.descent + m.leading)
    }
}

/// A measurer with fixed per-character proportions.
///
/// Every character advances by `advance_ratio * size`; visible characters
/// are drawn as boxes of cap height.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ApproximateMeasurer {
    /// Advance per character, as a fraction of the font size.
    pub advance_ratio: f64,
    /// Ascent as a fraction of the font size.
    pub ascent_ratio: f64,
    /// Descent as a fraction of the font size.
    pub descent_ratio: f64,
    /// Cap height as a fraction of the font size.
    pub cap_ratio: f64,
}

impl Default for ApproximateMeasurer {
    fn default() -> Self {
        Self {
            advance_ratio: 0.6,
            ascent_ratio: 0.8,
            descent_ratio: 0.2,
            cap_ratio: 0.7,
        }
    }
}

impl TextMeasurer for ApproximateMeasurer {
    fn line_metrics(&self, font: &Font) -> LineMetrics {
        LineMetrics {
            ascent: self.ascent_ratio * font.size,
            descent: self.descent_ratio * font.size,
            leading: 0.0,
        }
    }

    fn advance(&self, text: &str, font: &Font) -> f64 {
        let count = text.chars().count() as f64;
        count * self.advance_ratio * font.size
    }

    fn ink_bounds(&self, text: &str, font: &Font) -> Rect {
        self.outline(text, font).bounding_box()
    }

    fn outline(&self, text: &str, font: &Font) -> BezPath {
        let advance = self.advance_ratio * font.size;
        let cap = self.cap_ratio * font.size;
        let inset = 0.1 * advance;
        let mut path = BezPath::new();
        let mut x = 0.0;
        for c in text.chars() {
            if !c.is_whitespace() {
                let glyph = Rect::new(x + inset, -cap, x + advance - inset, 0.0);
                path.extend(glyph.path_elements(0.1));
            }
            x += advance;
        }
        path
    }
}

/// Attribute overrides for a span of [`AttributedText`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextAttributes {
    /// Font override.
    pub font: Option<Font>,
    /// Color override.
    pub color: Option<Color>,
}

impl TextAttributes {
    fn overlay(&mut self, other: &Self) {
        if other.font.is_some() {
            self.font.clone_from(&other.font);
        }
        if other.color.is_some() {
            self.color = other.color;
        }
    }
}

/// A string with attribute spans.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AttributedText {
    text: String,
    spans: Vec<(Range<usize>, TextAttributes)>,
}

/// A maximal range of text with uniform attributes.
#[derive(Clone, Debug, PartialEq)]
pub struct TextRun<'a> {
    /// The run's text.
    pub text: &'a str,
    /// Byte range of the run in the full string.
    pub range: Range<usize>,
    /// Effective attributes. Fields left `None` use the context's state.
    pub attributes: TextAttributes,
}

impl AttributedText {
    /// Text with no attribute spans.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            spans: Vec::new(),
        }
    }

    /// Add a span over the byte range `range`. Later spans override earlier ones.
    #[must_use]
    pub fn with_span(mut self, range: Range<usize>, attributes: TextAttributes) -> Self {
        self.spans.push((range, attributes));
        self
    }

    /// The full string.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Split the text into maximal runs of uniform attributes.
    pub fn runs(&self) -> Vec<TextRun<'_>> {
        let len = self.text.len();
        let mut cuts = vec![0, len];
        for (range, _) in &self.spans {
            cuts.push(self.floor_boundary(range.start));
            cuts.push(self.floor_boundary(range.end));
        }
        cuts.sort_unstable();
        cuts.dedup();

        let mut runs: Vec<TextRun<'_>> = Vec::new();
        for pair in cuts.windows(2) {
            let range = pair[0]..pair[1];
            if range.is_empty() {
                continue;
            }
            let mut attributes = TextAttributes::default();
            for (span, attrs) in &self.spans {
                if span.start <= range.start && range.end <= span.end {
                    attributes.overlay(attrs);
                }
            }
            match runs.last_mut() {
                Some(last) if last.attributes == attributes => {
                    last.range.end = range.end;
                    last.text = &self.text[last.range.clone()];
                }
                _ => runs.push(TextRun {
                    text: &self.text[range.clone()],
                    range,
                    attributes,
                }),
            }
        }
        runs
    }

    fn floor_boundary(&self, mut index: usize) -> usize {
        index = index.min(self.text.len());
        while !self.text.is_char_boundary(index) {
            index -= 1;
        }
        index
    }
}

impl From<&str> for AttributedText {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approximate_metrics_scale_with_size() {
        let m = ApproximateMeasurer::default();
        let font = Font::new("Arial", 10.0);
        assert!((m.advance("Hi", &font) - 12.0).abs() < 1e-12, "advance");
        let ink = m.ink_bounds("Hi", &font);
        assert!((ink.y0 + 7.0).abs() < 1e-12, "cap height, got {ink:?}");
        assert_eq!(ink.y1, 0.0);
        let logical = m.logical_bounds("Hi", &font);
        assert!((logical.height() - 10.0).abs() < 1e-12, "line height, got {logical:?}");
    }

    #[test]
    fn whitespace_has_no_ink() {
        let m = ApproximateMeasurer::default();
        assert!(m.outline("   ", &Font::default()).is_empty(), "no glyph boxes");
    }

    #[test]
    fn runs_merge_equal_attributes() {
        let red = TextAttributes {
            color: Some(Color::from_rgba8(255, 0, 0, 255)),
            ..TextAttributes::default()
        };
        let text = AttributedText::new("abcdef")
            .with_span(0..2, red.clone())
            .with_span(2..4, red.clone());
        let runs = text.runs();
        assert_eq!(runs.len(), 2, "runs = {runs:?}");
        assert_eq!(runs[0].text, "abcd");
        assert_eq!(runs[0].attributes, red);
        assert_eq!(runs[1].text, "ef");
        assert_eq!(runs[1].attributes, TextAttributes::default());
    }

    #[test]
    fn later_spans_override_earlier() {
        let bold = TextAttributes {
            font: Some(Font::new("Arial", 12.0).with_bold(true)),
            ..TextAttributes::default()
        };
        let big = TextAttributes {
            font: Some(Font::new("Arial", 20.0)),
            ..TextAttributes::default()
        };
        let text = AttributedText::new("abc")
            .with_span(0..3, bold)
            .with_span(1..2, big.clone());
        let runs = text.runs();
        assert_eq!(runs.len(), 3, "runs = {runs:?}");
        assert_eq!(runs[1].attributes.font, big.font);
    }

    #[test]
    fn span_boundaries_snap_to_chars() {
        let text = AttributedText::new("é!").with_span(1..3, TextAttributes::default());
        let runs = text.runs();
        assert_eq!(runs.len(), 1, "runs = {runs:?}");
        assert_eq!(runs[0].text, "é!");
    }
}
