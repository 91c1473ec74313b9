// Copyright 2026 the Driftglass Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::affine::EPSILON;

/// Default zoom floor for [`ResolverMode::Similarity`].
pub const MIN_ZOOM: f64 = 0.5;
/// Default zoom ceiling for [`ResolverMode::Similarity`].
pub const MAX_ZOOM: f64 = 4.0;
/// Default per-frame relaxation rate of the visual warp.
pub const WARP_RELAXATION: f64 = 0.1;

/// Which family of transforms a gesture may produce.
///
/// This is shared by [`crate::GestureResolver`] and
/// [`crate::ViewportEngine`].
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResolverMode {
    /// Pan with one pointer, similarity with two, unconstrained affine with
    /// three or more. Zoom is unbounded so that skew can be expressed.
    #[default]
    Affine,
    /// Legacy pan/zoom/rotate only.
    ///
    /// Pointers past the second are ignored, and the effective scale of the
    /// result is clamped into `[min_zoom, max_zoom]`.
    Similarity {
        /// Smallest allowed effective scale.
        min_zoom: f64,
        /// Largest allowed effective scale.
        max_zoom: f64,
    },
}

impl ResolverMode {
    /// Similarity mode with the stock zoom limits.
    #[must_use]
    pub const fn similarity() -> Self {
        Self::Similarity {
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
        }
    }
}

/// Tuning knobs for a [`crate::ViewportEngine`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Degeneracy threshold for gesture vectors and the stillness test.
    pub epsilon: f64,
    /// Fraction of the remaining distance to identity the warp covers per still frame.
    pub warp_relaxation: f64,
    /// Gesture fitting mode.
    pub mode: ResolverMode,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            epsilon: EPSILON,
            warp_relaxation: WARP_RELAXATION,
            mode: ResolverMode::default(),
        }
    }
}
