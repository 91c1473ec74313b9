// Copyright 2026 the Driftglass Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Decaying visual warp derived from the camera's linear part.
//!
//! The warp is a presentation-only 2×2 matrix the background grid applies
//! to local cell coordinates. It snaps to the area-normalized camera linear
//! part whenever that changes, then eases back to the identity while the
//! camera holds still. It never feeds back into the camera or hit testing.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use crate::affine::{AffineTransform, EPSILON, Mat2};
use crate::config::WARP_RELAXATION;

/// Warp relaxation state, advanced once per frame with [`WarpState::update`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WarpState {
    active: Mat2,
    reference: Mat2,
    previous: Option<AffineTransform>,
    rate: f64,
    epsilon: f64,
}

impl Default for WarpState {
    fn default() -> Self {
        Self::new(WARP_RELAXATION, EPSILON)
    }
}

impl WarpState {
    /// Creates an identity warp relaxing at `rate` per still frame.
    ///
    /// `rate` is clamped into `[0, 1]`.
    #[must_use]
    pub fn new(rate: f64, epsilon: f64) -> Self {
        Self {
            active: Mat2::IDENTITY,
            reference: Mat2::IDENTITY,
            previous: None,
            rate: rate.clamp(0.0, 1.0),
            epsilon,
        }
    }

    /// The warp to hand to the renderer this frame.
    #[must_use]
    pub fn active(&self) -> Mat2 {
        self.active
    }

    /// The camera linear part the warp was last derived from.
    #[must_use]
    pub fn reference(&self) -> Mat2 {
        self.reference
    }

    /// Relaxation rate per still frame.
    #[must_use]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Advances one frame against the camera transform `transform`.
    ///
    /// Returns `true` when the warp was re-derived from a changed linear part.
    pub fn update(&mut self, transform: &AffineTransform) -> bool {
        let linear = transform.linear();
        let rederived = linear.max_abs_diff(&self.reference) > self.epsilon;
        if rederived {
            let det = linear.determinant();
            if det.abs() >= self.epsilon {
                // Area-preserving: divide out sign(det)·sqrt(|det|).
                let s = det.signum() * det.abs().sqrt();
                self.active = linear.scale(1.0 / s);
            }
            self.reference = linear;
        }

        let still = self
            .previous
            .is_some_and(|prev| prev.approx_eq(transform, self.epsilon));
        if still {
            self.relax();
        }
        self.previous = Some(*transform);
        rederived
    }

    /// Sets the active warp directly, leaving the reference untouched.
    pub fn set_active(&mut self, warp: Mat2) {
        self.active = warp;
    }

    fn relax(&mut self) {
        self.active = self.active + (Mat2::IDENTITY - self.active).scale(self.rate);
    }
}
