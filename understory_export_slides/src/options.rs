// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use peniko::Color;

/// Settings for one slide export.
///
/// Construct with [`ExportOptions::default`] and adjust with the `with_*`
/// methods.
#[derive(Clone, Debug, PartialEq)]
pub struct ExportOptions {
    /// Keep shapes smaller than one slide unit. Default `true`.
    pub accept_small_shapes: bool,
    /// Rasterize text that straddles the clip boundary instead of emitting
    /// an unclipped text box. Default `false`.
    pub hard_clip_text: bool,
    /// Emit group shapes for [`start_group`](understory_export::VectorGraphics::start_group).
    /// Default `false`.
    pub support_groups: bool,
    /// Line width used for every stroke instead of the stroke's own width.
    pub force_stroke_width: Option<f64>,
    /// Color the slide is filled with when a context is created, and the
    /// color used by `clear_rect`. Default white.
    pub background: Option<Color>,
    /// Initial paint color. Default black.
    pub foreground: Color,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            accept_small_shapes: true,
            hard_clip_text: false,
            support_groups: false,
            force_stroke_width: None,
            background: Some(Color::WHITE),
            foreground: Color::BLACK,
        }
    }
}

impl ExportOptions {
    /// Keep or drop sub-unit shapes.
    #[must_use]
    pub fn with_accept_small_shapes(mut self, accept: bool) -> Self {
        self.accept_small_shapes = accept;
        self
    }

    /// Rasterize partially clipped text.
    #[must_use]
    pub fn with_hard_clip_text(mut self, hard_clip: bool) -> Self {
        self.hard_clip_text = hard_clip;
        self
    }

    /// Emit group shapes.
    #[must_use]
    pub fn with_groups(mut self, support: bool) -> Self {
        self.support_groups = support;
        self
    }

    /// Force every stroke to `width`.
    #[must_use]
    pub fn with_force_stroke_width(mut self, width: Option<f64>) -> Self {
        self.force_stroke_width = width;
        self
    }

    /// Set or remove the background color.
    #[must_use]
    pub fn with_background(mut self, background: Option<Color>) -> Self {
        self.background = background;
        self
    }

    /// Set the initial paint color.
    #[must_use]
    pub fn with_foreground(mut self, foreground: Color) -> Self {
        self.foreground = foreground;
        self
    }
}
