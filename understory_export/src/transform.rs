// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Active user-to-device transform.

use kurbo::{Affine, Point};

/// Determinants smaller than this are treated as singular.
const SINGULAR_EPSILON: f64 = 1e-12;

/// The active transform of a drawing context.
///
/// Every modifier right-multiplies the current matrix, so the most recently
/// applied operation acts first on user coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TransformState {
    current: Affine,
}

impl Default for TransformState {
    fn default() -> Self {
        Self {
            current: Affine::IDENTITY,
        }
    }
}

impl TransformState {
    /// Identity transform.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current user-to-device matrix.
    #[must_use]
    #[inline]
    pub fn affine(&self) -> Affine {
        self.current
    }

    /// Replace the current matrix.
    pub fn set(&mut self, affine: Affine) {
        self.current = affine;
    }

    /// Right-multiply the current matrix by `affine`.
    pub fn concatenate(&mut self, affine: Affine) {
        self.current *= affine;
    }

    /// Concatenate a translation.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.concatenate(Affine::translate((dx, dy)));
    }

    /// Concatenate a (possibly non-uniform) scale.
    pub fn scale(&mut self, sx: f64, sy: f64) {
        self.concatenate(Affine::scale_non_uniform(sx, sy));
    }

    /// Concatenate a rotation by `theta` radians about the origin.
    pub fn rotate(&mut self, theta: f64) {
        self.concatenate(Affine::rotate(theta));
    }

    /// Concatenate a rotation by `theta` radians about `center`.
    pub fn rotate_about(&mut self, theta: f64, center: Point) {
        self.concatenate(Affine::rotate_about(theta, center));
    }

    /// Concatenate a shear: `x' = x + shx * y`, `y' = shy * x + y`.
    pub fn shear(&mut self, shx: f64, shy: f64) {
        self.concatenate(Affine::skew(shx, shy));
    }

    /// Rotation angle of the matrix, `atan2(b, a)`, in radians.
    #[must_use]
    pub fn rotation_angle(&self) -> f64 {
        rotation_angle(self.current)
    }

    /// Inverse of the current matrix, or `None` if it is singular.
    #[must_use]
    pub fn inverse(&self) -> Option<Affine> {
        invert(self.current)
    }
}

/// Rotation angle of `affine`, `atan2(b, a)`, in radians.
pub fn rotation_angle(affine: Affine) -> f64 {
    let [a, b, ..] = affine.as_coeffs();
    b.atan2(a)
}

/// Inverse of `affine`, or `None` when it is singular or not finite.
pub fn invert(affine: Affine) -> Option<Affine> {
    let det = affine.determinant();
    (det.is_finite() && det.abs() > SINGULAR_EPSILON).then(|| affine.inverse())
}
