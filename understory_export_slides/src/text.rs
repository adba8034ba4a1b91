// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text box placement.
//!
//! Slide text boxes are positioned by their top-left corner and rendered by
//! the viewer with its own font metrics, so the box is padded generously to
//! keep glyphs from being cut off, especially when rotated.

use core::f64::consts::PI;

use kurbo::{Affine, Point, Rect};
use understory_export::{Font, TextMeasurer, rotation_angle};

use crate::document::FontTable;
use crate::shape::FontRef;

/// Escapements at or below this magnitude are treated as unrotated.
pub const TEXT_MIN_ESCAPE: f64 = PI / 180.0;

/// Text rotation under `transform`, in radians, counter-clockwise positive.
pub fn escapement(transform: Affine) -> f64 {
    -rotation_angle(transform)
}

/// Returns `true` if text at escapement `rot` needs a rotated box.
pub fn is_rotated(rot: f64) -> bool {
    rot.abs() > TEXT_MIN_ESCAPE
}

/// Clockwise shape rotation in whole degrees for escapement `rot`.
///
/// Fractional degrees are truncated toward zero.
#[allow(
    clippy::cast_possible_truncation,
    reason = "an angle within one turn fits in i32"
)]
pub fn rotation_degrees(rot: f64) -> i32 {
    if !is_rotated(rot) {
        return 0;
    }
    let degrees = -rot.to_degrees();
    // Snap values a rounding error away from a whole degree.
    let whole = if (degrees - degrees.round()).abs() < 1e-9 {
        degrees.round()
    } else {
        degrees.trunc()
    };
    whole as i32
}

/// Extra width added to every box: half a character per character plus
/// one, measured with `X`.
pub fn slack<M: TextMeasurer + ?Sized>(measurer: &M, text: &str, font: &Font) -> f64 {
    let chars = text.chars().count() / 2 + 1;
    chars as f64 * measurer.advance("X", font)
}

/// Anchor of a text box whose ink top-left lands near `position`.
///
/// `position` is the device-space top-left corner of the ink bounds, moved
/// down by the font descent. Rotated boxes are grown by the slack in both
/// dimensions and shifted by the rotation so the glyphs stay inside.
pub fn text_anchor<M: TextMeasurer + ?Sized>(
    measurer: &M,
    text: &str,
    font: &Font,
    position: Point,
    rot: f64,
) -> Rect {
    let metrics = measurer.line_metrics(font);
    let logical = measurer.logical_bounds(text, font);
    let ink = measurer.ink_bounds(text, font);
    let advance = measurer.advance(text, font);
    let slack = slack(measurer, text, font);

    let (supp, delta_x, delta_y) = if is_rotated(rot) {
        (
            slack,
            logical.width() * rot.cos(),
            -ink.height() * rot.sin(),
        )
    } else {
        (0.0, 0.0, 0.0)
    };
    let width = logical.width() + slack + supp;
    let height = ink.height() + supp;
    let delta_pos =
        logical.height() - ink.height() - metrics.ascent + metrics.descent - metrics.leading;

    let x = position.x + logical.width() - advance + delta_x;
    let y = position.y - ink.height() + metrics.leading - delta_pos + delta_y;
    Rect::new(x, y, x + width, y + height)
}

/// Font reference for `font`: its index when the face name is registered,
/// else its family name.
pub fn font_ref(fonts: &FontTable, font: &Font) -> FontRef {
    match fonts.lookup(&font.face_name) {
        Some(index) => FontRef::Index(index),
        None => {
            log::debug!(
                "font {:?} is not in the font table; falling back to family {:?}",
                font.face_name,
                font.family
            );
            FontRef::Family(font.family.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f64::consts::FRAC_PI_4;
    use understory_export::ApproximateMeasurer;

    #[test]
    fn escapement_follows_the_transform() {
        assert_eq!(escapement(Affine::IDENTITY), 0.0);
        let rot = escapement(Affine::rotate(-FRAC_PI_4));
        assert!((rot - FRAC_PI_4).abs() < 1e-12);
        assert_eq!(rotation_degrees(rot), -45);
        assert_eq!(rotation_degrees(0.01), 0);
        assert!(!is_rotated(PI / 180.0));
    }

    #[test]
    fn slack_grows_with_length() {
        let m = ApproximateMeasurer::default();
        let font = Font::new("Arial", 10.0);
        // One `X` is 6 units wide.
        assert_eq!(slack(&m, "", &font), 6.0);
        assert_eq!(slack(&m, "Hi", &font), 12.0);
        assert_eq!(slack(&m, "Hello", &font), 18.0);
    }

    #[test]
    fn unrotated_anchor() {
        let m = ApproximateMeasurer::default();
        let font = Font::new("Arial", 10.0);
        // "Hi": advance 12, logical height 10, ink height 7.
        let anchor = text_anchor(&m, "Hi", &font, Point::new(100.0, 50.0), 0.0);
        // delta_pos = 10 - 7 - 8 + 2 - 0 = -3
        assert!((anchor.x0 - 100.0).abs() < 1e-9, "{anchor:?}");
        assert!((anchor.y0 - 46.0).abs() < 1e-9, "{anchor:?}");
        assert!((anchor.width() - 24.0).abs() < 1e-9, "{anchor:?}");
        assert!((anchor.height() - 7.0).abs() < 1e-9, "{anchor:?}");
    }

    #[test]
    fn rotated_anchor_is_padded() {
        let m = ApproximateMeasurer::default();
        let font = Font::new("Arial", 10.0);
        let flat = text_anchor(&m, "Hi", &font, Point::ZERO, 0.0);
        let turned = text_anchor(&m, "Hi", &font, Point::ZERO, FRAC_PI_4);
        assert!((turned.width() - flat.width() - 12.0).abs() < 1e-9);
        assert!((turned.height() - flat.height() - 12.0).abs() < 1e-9);
    }

    #[test]
    fn unknown_faces_fall_back_to_family() {
        let fonts = FontTable::default();
        assert_eq!(font_ref(&fonts, &Font::new("Arial", 12.0)), FontRef::Index(0));
        let custom = Font::new("Fira Sans", 12.0).with_face_name("Fira Sans Bold");
        assert_eq!(
            font_ref(&fonts, &custom),
            FontRef::Family(String::from("Fira Sans"))
        );
    }
}
