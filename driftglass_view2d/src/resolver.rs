// Copyright 2026 the Driftglass Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture resolver: fit a camera transform to pointer correspondences.
//!
//! Each active pointer contributes a [`Correspondence`]: the world point it
//! grabbed when the gesture epoch began, and where it is on screen now. The
//! resolver finds a transform that carries every world anchor onto its
//! current screen position:
//!
//! | Pointers | Fit | Degenerate when |
//! |----------|-----|-----------------|
//! | 0 | nothing | always |
//! | 1 | translation only, base linear part kept | never |
//! | 2 | rotation + uniform scale composed onto the base linear part | either pointer pair vector is shorter than `epsilon` |
//! | ≥3 | unconstrained affine from the first three | the world edge matrix has `|det| < epsilon` |
//!
//! A degenerate configuration yields `None` ("leave the camera alone").
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use driftglass_view2d::{AffineTransform, Correspondence, GestureResolver};
//!
//! let resolver = GestureResolver::default();
//! let base = AffineTransform::IDENTITY;
//!
//! // Two fingers on (-10, 0) and (10, 0) spread to twice the distance.
//! let fitted = resolver
//!     .resolve(
//!         &base,
//!         &[
//!             Correspondence::new(Point::new(-10.0, 0.0), Point::new(-20.0, 0.0)),
//!             Correspondence::new(Point::new(10.0, 0.0), Point::new(20.0, 0.0)),
//!         ],
//!     )
//!     .unwrap();
//! assert!((fitted.effective_scale() - 2.0).abs() < 1e-9);
//! ```

use kurbo::Point;

use crate::affine::{AffineTransform, EPSILON, Mat2};
use crate::config::ResolverMode;

/// A world anchor and the screen position currently holding it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Correspondence {
    /// World point captured at the start of the epoch.
    pub world: Point,
    /// Current screen position of the pointer.
    pub screen: Point,
}

impl Correspondence {
    /// Creates a correspondence.
    #[must_use]
    pub const fn new(world: Point, screen: Point) -> Self {
        Self { world, screen }
    }
}

/// Fits camera transforms to pointer correspondences.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureResolver {
    mode: ResolverMode,
    epsilon: f64,
}

impl Default for GestureResolver {
    fn default() -> Self {
        Self::new(ResolverMode::Affine, EPSILON)
    }
}

impl GestureResolver {
    /// Creates a resolver with the given mode and degeneracy threshold.
    #[must_use]
    pub const fn new(mode: ResolverMode, epsilon: f64) -> Self {
        Self { mode, epsilon }
    }

    /// Returns the fitting mode.
    #[must_use]
    pub fn mode(&self) -> ResolverMode {
        self.mode
    }

    /// Fits a new transform relative to `base`, the transform at epoch start.
    ///
    /// `pointers` is in insertion order; with three or more only the first
    /// three take part. Returns `None` for degenerate input.
    #[must_use]
    pub fn resolve(
        &self,
        base: &AffineTransform,
        pointers: &[Correspondence],
    ) -> Option<AffineTransform> {
        let fitted = match (self.mode, pointers) {
            (_, []) => None,
            (_, [a]) => Some(pan(base, a)),
            (ResolverMode::Affine, [a, b]) => self.similarity(base, a, b, None),
            (ResolverMode::Affine, [a, b, c, ..]) => self.affine(a, b, c),
            (ResolverMode::Similarity { min_zoom, max_zoom }, [a, b, ..]) => {
                self.similarity(base, a, b, Some((min_zoom, max_zoom)))
            }
        };
        // Never hand out a transform that would poison later inversions.
        fitted.filter(AffineTransform::is_finite)
    }

    /// Rotation and uniform scale from the pointer pair, composed onto the base linear part.
    ///
    /// Composing onto `base` rather than the identity carries any existing
    /// skew forward unchanged.
    fn similarity(
        &self,
        base: &AffineTransform,
        a: &Correspondence,
        b: &Correspondence,
        zoom_limits: Option<(f64, f64)>,
    ) -> Option<AffineTransform> {
        let base_vec = base.apply_linear(b.world - a.world);
        let cur_vec = b.screen - a.screen;
        let base_len = base_vec.length();
        let cur_len = cur_vec.length();
        if base_len < self.epsilon || cur_len < self.epsilon {
            tracing::trace!(base_len, cur_len, "similarity fit skipped: pointers coincide");
            return None;
        }

        let mut scale = cur_len / base_len;
        if let Some((min_zoom, max_zoom)) = zoom_limits {
            let base_zoom = base.effective_scale();
            if base_zoom >= self.epsilon {
                scale = clamp_zoom(base_zoom * scale, min_zoom, max_zoom) / base_zoom;
            }
        }
        let angle = cur_vec.atan2() - base_vec.atan2();
        let linear = Mat2::rotation_scale(angle, scale) * base.linear();
        Some(AffineTransform::pinned(linear, a.world, a.screen))
    }

    /// Exact affine map of the triangle `(a, b, c)` onto its screen positions.
    fn affine(
        &self,
        a: &Correspondence,
        b: &Correspondence,
        c: &Correspondence,
    ) -> Option<AffineTransform> {
        let world_edges = Mat2::from_cols(b.world - a.world, c.world - a.world);
        let screen_edges = Mat2::from_cols(b.screen - a.screen, c.screen - a.screen);
        let Some(inv) = world_edges.inverse(self.epsilon) else {
            tracing::trace!(
                det = world_edges.determinant(),
                "affine fit skipped: anchors are collinear"
            );
            return None;
        };
        let linear = screen_edges * inv;
        Some(AffineTransform::pinned(linear, a.world, a.screen))
    }
}

fn pan(base: &AffineTransform, a: &Correspondence) -> AffineTransform {
    AffineTransform::pinned(base.linear(), a.world, a.screen)
}

/// Clamps `zoom` between two limits given in either order.
///
/// A NaN limit leaves that side unbounded.
fn clamp_zoom(zoom: f64, min_zoom: f64, max_zoom: f64) -> f64 {
    let a = if min_zoom.is_nan() { f64::NEG_INFINITY } else { min_zoom };
    let b = if max_zoom.is_nan() { f64::INFINITY } else { max_zoom };
    zoom.clamp(a.min(b), a.max(b))
}
