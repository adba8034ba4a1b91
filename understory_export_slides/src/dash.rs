// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quantization of dash arrays onto the fixed slide dash patterns.

/// Dash lengths below this fraction of the slide width draw as dots.
pub const DOT_DASH_RATIO: f64 = 4.0 / 348.0;

/// The dash patterns a slide line can carry.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum LineDash {
    /// Continuous line.
    #[default]
    Solid,
    /// Round dots.
    Dot,
    /// Dashes.
    Dash,
    /// Alternating dash and dot.
    DashDot,
    /// Alternating long dash and dot.
    LongDashDot,
    /// Long dash followed by two dots.
    LongDashDotDot,
}

/// Pick the dash pattern closest to `pattern` on a slide `slide_width` wide.
///
/// Only the number of entries matters, except for two-entry patterns where
/// the first dash length relative to the slide width picks between dots and
/// dashes. A non-positive or non-finite width selects [`LineDash::Dash`] for
/// two-entry patterns.
pub fn quantize_dash(pattern: &[f64], slide_width: f64) -> LineDash {
    match pattern.len() {
        0 | 1 => LineDash::Solid,
        2 => {
            if !(slide_width.is_finite() && slide_width > 0.0) {
                return LineDash::Dash;
            }
            if pattern[0] / slide_width < DOT_DASH_RATIO {
                LineDash::Dot
            } else {
                LineDash::Dash
            }
        }
        3 => LineDash::DashDot,
        4 => LineDash::LongDashDot,
        _ => LineDash::LongDashDotDot,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buckets_by_length() {
        assert_eq!(quantize_dash(&[], 348.0), LineDash::Solid);
        assert_eq!(quantize_dash(&[5.0], 348.0), LineDash::Solid);
        assert_eq!(quantize_dash(&[1.0, 2.0, 3.0], 348.0), LineDash::DashDot);
        assert_eq!(quantize_dash(&[1.0; 4], 348.0), LineDash::LongDashDot);
        assert_eq!(quantize_dash(&[1.0; 5], 348.0), LineDash::LongDashDotDot);
        assert_eq!(quantize_dash(&[1.0; 9], 348.0), LineDash::LongDashDotDot);
    }

    #[test]
    fn pairs_split_on_relative_length() {
        assert_eq!(quantize_dash(&[0.2, 1.0], 348.0), LineDash::Dot);
        assert_eq!(quantize_dash(&[2.0, 1.0], 348.0), LineDash::Dot);
        assert_eq!(quantize_dash(&[10.0, 1.0], 348.0), LineDash::Dash);
        assert_eq!(quantize_dash(&[10.0, 1.0], 0.0), LineDash::Dash);
        assert_eq!(quantize_dash(&[0.1, 1.0], f64::NAN), LineDash::Dash);
    }
}
