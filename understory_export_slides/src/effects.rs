// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shadow properties written onto filled shapes.

use peniko::Color;
use understory_export::{PendingShadow, ShadowKind};

/// Offset shadow type.
pub const SHADOW_TYPE_OFFSET: u32 = 2;
/// Shadow-obscured flag word: "shadow on" plus "use the shadow flag".
pub const SHADOW_OBSCURED: u32 = 0x0002_0002;
/// Scale of a drop shadow, in 16.16 fixed point (slightly above 1).
pub const DROP_SHADOW_SCALE: i32 = 66_847;

/// Convert to 16.16 fixed point.
///
/// The integral part fills the high half; the fractional part is rounded to
/// the nearest 1/65536 (ties to even) and masked into the low half.
pub fn to_fixed_point(value: f64) -> i32 {
    let fraction = value % 1.0;
    let integral = (value - fraction).floor();
    #[allow(
        clippy::cast_possible_truncation,
        reason = "shadow parameters are small; out-of-range values saturate"
    )]
    let (i, f) = (integral as i32, (fraction * 65536.0).round_ties_even() as i32);
    i.wrapping_shl(16) | (f & 0xFFFF)
}

/// Shadow as stored on a slide shape.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ShadowProps {
    /// Drop or inner.
    pub kind: ShadowKind,
    /// Shadow type; always [`SHADOW_TYPE_OFFSET`].
    pub shadow_type: u32,
    /// Shadow color with its alpha cleared.
    pub color: Color,
    /// Opacity in 16.16 fixed point.
    pub opacity: i32,
    /// Obscured flag word; always [`SHADOW_OBSCURED`].
    pub obscured: u32,
    /// Blur weight in 16.16 fixed point.
    pub weight: i32,
    /// Horizontal offset.
    pub offset_x: i32,
    /// Vertical offset.
    pub offset_y: i32,
    /// Horizontal scale in 16.16 fixed point.
    pub scale_x: i32,
    /// Vertical scale in 16.16 fixed point.
    pub scale_y: i32,
}

impl ShadowProps {
    /// Map a latched shadow onto slide shadow properties.
    ///
    /// Opacity is halved and the blur width becomes a weight of half its
    /// value. Drop shadows are scaled up slightly; inner shadows are scaled
    /// to 95%.
    pub fn from_pending(pending: &PendingShadow) -> Self {
        let shadow = &pending.shadow;
        let scale = match pending.kind {
            ShadowKind::Drop => DROP_SHADOW_SCALE,
            ShadowKind::Inner => to_fixed_point(0.95),
        };
        let rgba = shadow.color.to_rgba8();
        Self {
            kind: pending.kind,
            shadow_type: SHADOW_TYPE_OFFSET,
            color: Color::from_rgba8(rgba.r, rgba.g, rgba.b, 0),
            opacity: to_fixed_point(shadow.opacity * 0.5),
            obscured: SHADOW_OBSCURED,
            weight: to_fixed_point(shadow.width / 2.0),
            offset_x: 0,
            offset_y: 0,
            scale_x: scale,
            scale_y: scale,
        }
    }
}
