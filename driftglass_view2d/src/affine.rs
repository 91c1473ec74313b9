// Copyright 2026 the Driftglass Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Affine camera primitive: a 2×2 linear part plus a translation.
//!
//! [`AffineTransform`] maps world coordinates into screen coordinates as
//! `screen = M·world + t`. Every operation returns a new value; nothing in
//! this module mutates a transform in place.

use core::ops::{Add, Mul, Sub};

use kurbo::{Affine, Point, Vec2};

/// Determinant magnitude below which a transform is treated as singular.
pub const DET_EPSILON: f64 = 1e-8;

/// General tolerance for vector lengths and per-cell matrix comparisons.
pub const EPSILON: f64 = 1e-4;

/// A 2×2 matrix in row-major naming (`m<row><col>`).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mat2 {
    /// Row 0, column 0.
    pub m00: f64,
    /// Row 0, column 1.
    pub m01: f64,
    /// Row 1, column 0.
    pub m10: f64,
    /// Row 1, column 1.
    pub m11: f64,
}

impl Mat2 {
    /// The identity matrix.
    pub const IDENTITY: Self = Self::new(1.0, 0.0, 0.0, 1.0);

    /// Creates a matrix from its four cells.
    #[must_use]
    pub const fn new(m00: f64, m01: f64, m10: f64, m11: f64) -> Self {
        Self { m00, m01, m10, m11 }
    }

    /// Creates a matrix whose columns are `c0` and `c1`.
    #[must_use]
    pub const fn from_cols(c0: Vec2, c1: Vec2) -> Self {
        Self::new(c0.x, c1.x, c0.y, c1.y)
    }

    /// Uniform scale by `scale` followed by a counter-clockwise rotation by `angle` radians.
    #[must_use]
    pub fn rotation_scale(angle: f64, scale: f64) -> Self {
        let dir = Vec2::from_angle(angle) * scale;
        Self::new(dir.x, -dir.y, dir.y, dir.x)
    }

    /// Determinant `m00·m11 − m01·m10`.
    #[must_use]
    pub fn determinant(&self) -> f64 {
        self.m00 * self.m11 - self.m01 * self.m10
    }

    /// Inverse, or `None` when `|det| < min_det`.
    #[must_use]
    pub fn inverse(&self, min_det: f64) -> Option<Self> {
        let det = self.determinant();
        if det.abs() < min_det {
            return None;
        }
        let inv = 1.0 / det;
        Some(Self::new(
            self.m11 * inv,
            -self.m01 * inv,
            -self.m10 * inv,
            self.m00 * inv,
        ))
    }

    /// Multiplies every cell by `s`.
    #[must_use]
    pub fn scale(&self, s: f64) -> Self {
        Self::new(self.m00 * s, self.m01 * s, self.m10 * s, self.m11 * s)
    }

    /// Applies the matrix to a vector.
    #[must_use]
    pub fn apply(&self, v: Vec2) -> Vec2 {
        Vec2::new(
            self.m00 * v.x + self.m01 * v.y,
            self.m10 * v.x + self.m11 * v.y,
        )
    }

    /// First column `(m00, m10)`.
    #[must_use]
    pub fn col0(&self) -> Vec2 {
        Vec2::new(self.m00, self.m10)
    }

    /// Second column `(m01, m11)`.
    #[must_use]
    pub fn col1(&self) -> Vec2 {
        Vec2::new(self.m01, self.m11)
    }

    /// Largest absolute per-cell difference to `other`.
    #[must_use]
    pub fn max_abs_diff(&self, other: &Self) -> f64 {
        (self.m00 - other.m00)
            .abs()
            .max((self.m01 - other.m01).abs())
            .max((self.m10 - other.m10).abs())
            .max((self.m11 - other.m11).abs())
    }

    /// Frobenius norm.
    #[must_use]
    pub fn norm(&self) -> f64 {
        // Two hypot calls keep this usable without `std` float intrinsics.
        Vec2::new(self.col0().length(), self.col1().length()).length()
    }

    /// Column-major cells, the layout GLSL `mat2` uniforms expect.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "shader uniforms are single precision"
    )]
    pub fn to_cols_f32(&self) -> [f32; 4] {
        [
            self.m00 as f32,
            self.m10 as f32,
            self.m01 as f32,
            self.m11 as f32,
        ]
    }

    /// Returns `true` when every cell is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.m00.is_finite() && self.m01.is_finite() && self.m10.is_finite() && self.m11.is_finite()
    }
}

impl Default for Mat2 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Mat2 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.m00 * rhs.m00 + self.m01 * rhs.m10,
            self.m00 * rhs.m01 + self.m01 * rhs.m11,
            self.m10 * rhs.m00 + self.m11 * rhs.m10,
            self.m10 * rhs.m01 + self.m11 * rhs.m11,
        )
    }
}

impl Add for Mat2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(
            self.m00 + rhs.m00,
            self.m01 + rhs.m01,
            self.m10 + rhs.m10,
            self.m11 + rhs.m11,
        )
    }
}

impl Sub for Mat2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(
            self.m00 - rhs.m00,
            self.m01 - rhs.m01,
            self.m10 - rhs.m10,
            self.m11 - rhs.m11,
        )
    }
}

/// World → screen camera transform, `screen = M·world + t`.
///
/// Values are replaced wholesale on every gesture update or frame. The
/// inverse never produces non-finite values: a near-singular transform
/// inverts to [`AffineTransform::IDENTITY`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AffineTransform {
    /// Linear part, row 0 column 0.
    pub m00: f64,
    /// Linear part, row 0 column 1.
    pub m01: f64,
    /// Linear part, row 1 column 0.
    pub m10: f64,
    /// Linear part, row 1 column 1.
    pub m11: f64,
    /// Translation along x.
    pub tx: f64,
    /// Translation along y.
    pub ty: f64,
}

impl AffineTransform {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        m00: 1.0,
        m01: 0.0,
        m10: 0.0,
        m11: 1.0,
        tx: 0.0,
        ty: 0.0,
    };

    /// Returns [`AffineTransform::IDENTITY`].
    #[must_use]
    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    /// Builds a transform from a linear part and a translation.
    #[must_use]
    pub const fn from_parts(linear: Mat2, translation: Vec2) -> Self {
        Self {
            m00: linear.m00,
            m01: linear.m01,
            m10: linear.m10,
            m11: linear.m11,
            tx: translation.x,
            ty: translation.y,
        }
    }

    /// Pure translation.
    #[must_use]
    pub const fn translate(t: Vec2) -> Self {
        Self::from_parts(Mat2::IDENTITY, t)
    }

    /// Keeps `linear` and solves the translation so that `world` lands on `screen`.
    #[must_use]
    pub fn pinned(linear: Mat2, world: Point, screen: Point) -> Self {
        let mapped = linear.apply(world.to_vec2());
        Self::from_parts(linear, screen.to_vec2() - mapped)
    }

    /// The 2×2 linear part.
    #[must_use]
    pub const fn linear(&self) -> Mat2 {
        Mat2::new(self.m00, self.m01, self.m10, self.m11)
    }

    /// The translation part.
    #[must_use]
    pub const fn translation(&self) -> Vec2 {
        Vec2::new(self.tx, self.ty)
    }

    /// Determinant of the linear part.
    #[must_use]
    pub fn determinant(&self) -> f64 {
        self.linear().determinant()
    }

    /// Maps a world point to the screen.
    #[must_use]
    pub fn apply(&self, p: Point) -> Point {
        Point::new(
            self.m00 * p.x + self.m01 * p.y + self.tx,
            self.m10 * p.x + self.m11 * p.y + self.ty,
        )
    }

    /// Maps a vector through the linear part only.
    #[must_use]
    pub fn apply_linear(&self, v: Vec2) -> Vec2 {
        self.linear().apply(v)
    }

    /// Inverse transform, or the identity when `|det| < DET_EPSILON`.
    ///
    /// Singular transforms show up transiently at gesture edge cases, so they
    /// are treated as "no transform" instead of an error.
    #[must_use]
    pub fn invert(&self) -> Self {
        let Some(inv) = self.linear().inverse(DET_EPSILON) else {
            return Self::IDENTITY;
        };
        let t = inv.apply(self.translation());
        Self::from_parts(inv, -t)
    }

    /// Mean of the two column norms of the linear part.
    ///
    /// Used for point-size falloff; it never clamps anything.
    #[must_use]
    pub fn effective_scale(&self) -> f64 {
        let linear = self.linear();
        0.5 * (linear.col0().length() + linear.col1().length())
    }

    /// Returns `true` when all six coefficients are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.linear().is_finite() && self.tx.is_finite() && self.ty.is_finite()
    }

    /// Returns `true` when every coefficient is within `eps` of `other`'s.
    #[must_use]
    pub fn approx_eq(&self, other: &Self, eps: f64) -> bool {
        self.linear().max_abs_diff(&other.linear()) <= eps
            && (self.tx - other.tx).abs() <= eps
            && (self.ty - other.ty).abs() <= eps
    }

    /// Column-major 3×3 matrix, the layout GLSL `mat3` uniforms expect.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "shader uniforms are single precision"
    )]
    pub fn to_mat3(&self) -> [f32; 9] {
        [
            self.m00 as f32,
            self.m10 as f32,
            0.0,
            self.m01 as f32,
            self.m11 as f32,
            0.0,
            self.tx as f32,
            self.ty as f32,
            1.0,
        ]
    }
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// `a * b` applies `b` first, then `a`.
impl Mul for AffineTransform {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let linear = self.linear() * rhs.linear();
        let t = self.linear().apply(rhs.translation()) + self.translation();
        Self::from_parts(linear, t)
    }
}

impl From<AffineTransform> for Affine {
    fn from(t: AffineTransform) -> Self {
        Self::new([t.m00, t.m10, t.m01, t.m11, t.tx, t.ty])
    }
}

impl From<Affine> for AffineTransform {
    fn from(a: Affine) -> Self {
        let [m00, m10, m01, m11, tx, ty] = a.as_coeffs();
        Self {
            m00,
            m01,
            m10,
            m11,
            tx,
            ty,
        }
    }
}
