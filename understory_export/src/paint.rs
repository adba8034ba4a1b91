// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Active paint and its resolution into flat colors or complex brushes.

use peniko::{Brush, Color, Gradient};

/// The paint a drawing context fills and strokes with.
///
/// The last flat color is remembered separately: text and image-brush
/// strokes keep using it while a gradient or image brush is active.
#[derive(Clone, Debug)]
pub struct PaintState {
    color: Color,
    brush: Brush,
}

impl Default for PaintState {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            brush: Brush::Solid(Color::BLACK),
        }
    }
}

/// How the active paint is emitted.
#[derive(Copy, Clone, Debug)]
pub enum ResolvedPaint<'a> {
    /// A flat color, emitted as a native fill.
    Solid(Color),
    /// A gradient or image brush; fills are rasterized.
    Complex(&'a Brush),
}

impl PaintState {
    /// Black solid paint.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `color` the active paint.
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
        self.brush = Brush::Solid(color);
    }

    /// Make `brush` the active paint. Solid brushes also set the color.
    pub fn set_paint(&mut self, brush: Brush) {
        match brush {
            Brush::Solid(color) => self.set_color(color),
            other => self.brush = other,
        }
    }

    /// The last flat color set.
    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    /// The active brush.
    pub fn brush(&self) -> &Brush {
        &self.brush
    }

    /// Classify the active paint.
    pub fn resolve(&self) -> ResolvedPaint<'_> {
        match &self.brush {
            Brush::Solid(color) => ResolvedPaint::Solid(*color),
            other => ResolvedPaint::Complex(other),
        }
    }

    /// Color used for outlines: the brightest stop of a gradient, else the
    /// current color.
    #[must_use]
    pub fn stroke_color(&self) -> Color {
        match &self.brush {
            Brush::Gradient(gradient) => brightest_stop(gradient).unwrap_or(self.color),
            Brush::Solid(color) => *color,
            Brush::Image(_) => self.color,
        }
    }
}

/// Rec. 601 luma of `color` in `[0, 1]`.
pub fn luma(color: Color) -> f64 {
    let rgba = color.to_rgba8();
    (0.299 * f64::from(rgba.r) + 0.587 * f64::from(rgba.g) + 0.114 * f64::from(rgba.b)) / 255.0
}

/// The gradient stop color with the highest luma. Later stops win ties.
pub fn brightest_stop(gradient: &Gradient) -> Option<Color> {
    gradient
        .stops
        .iter()
        .map(|stop| stop.color.to_alpha_color::<peniko::color::Srgb>())
        .max_by(|a, b| luma(*a).total_cmp(&luma(*b)))
}
