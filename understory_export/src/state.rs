// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-context drawing state.

use kurbo::Stroke;

use crate::clip::ClipRegion;
use crate::paint::PaintState;
use crate::shape::ExportShape;
use crate::text::Font;
use crate::transform::TransformState;

/// Ambient state of one drawing context.
///
/// Owned by exactly one context. Child contexts receive a clone, so changes
/// made in a child never leak back into its parent.
#[derive(Clone, Debug, Default)]
pub struct DrawingState {
    /// User-to-device transform.
    pub transform: TransformState,
    /// Device-space clip.
    pub clip: ClipRegion,
    /// Fill and stroke paint.
    pub paint: PaintState,
    /// Stroke geometry: width, joins, caps and dashes.
    pub stroke: Stroke,
    /// Font used by text calls.
    pub font: Font,
}

impl DrawingState {
    /// Default state: identity transform, no clip, black paint, 1-unit stroke.
    pub fn new() -> Self {
        Self::default()
    }

    /// `shape` mapped into device space.
    pub fn to_device(&self, shape: &ExportShape) -> ExportShape {
        shape.transformed(self.transform.affine())
    }
}
