// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Effect descriptors and the one-shot effect latch.

use peniko::Color;

/// Parameters shared by drop and inner shadows.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Shadow {
    /// Shadow color. Alpha is carried by `opacity`.
    pub color: Color,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Blur width in user units.
    pub width: f64,
}

/// An effect requested by the scene for the next filled shape.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum EffectDesc {
    /// A shadow cast behind the shape.
    DropShadow(Shadow),
    /// A shadow inside the shape's outline.
    InnerShadow(Shadow),
    /// Gaussian blur. Not representable as a shape property.
    Blur {
        /// Blur radius in user units.
        radius: f64,
    },
    /// Glow. Not representable as a shape property.
    Glow {
        /// Glow level in `[0, 1]`.
        level: f64,
    },
}

/// Which side of the outline a shadow falls on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ShadowKind {
    /// Outside the shape.
    Drop,
    /// Inside the shape.
    Inner,
}

/// A shadow waiting to be attached to the next filled shape.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PendingShadow {
    /// Drop or inner.
    pub kind: ShadowKind,
    /// Shadow parameters.
    pub shadow: Shadow,
}

/// One-shot latch for the most recent effect.
///
/// Setting an effect replaces whatever was pending. The next fill takes the
/// latch whether or not it emits anything.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PendingEffect {
    pending: Option<PendingShadow>,
}

impl PendingEffect {
    /// Replace the pending effect. Effects without a shadow form clear it.
    pub fn apply(&mut self, effect: &EffectDesc) {
        self.pending = match *effect {
            EffectDesc::DropShadow(shadow) => Some(PendingShadow {
                kind: ShadowKind::Drop,
                shadow,
            }),
            EffectDesc::InnerShadow(shadow) => Some(PendingShadow {
                kind: ShadowKind::Inner,
                shadow,
            }),
            EffectDesc::Blur { .. } | EffectDesc::Glow { .. } => {
                log::trace!("effect {effect:?} has no shape form; dropped");
                None
            }
        };
    }

    /// Take the pending shadow, leaving the latch empty.
    pub fn take(&mut self) -> Option<PendingShadow> {
        self.pending.take()
    }

    /// The pending shadow, if any.
    pub fn peek(&self) -> Option<&PendingShadow> {
        self.pending.as_ref()
    }
}
