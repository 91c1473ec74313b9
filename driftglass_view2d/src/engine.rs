// Copyright 2026 the Driftglass Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;

use crate::affine::{AffineTransform, Mat2};
use crate::config::EngineConfig;
use crate::resolver::GestureResolver;
use crate::session::{GestureSession, PointerId};
use crate::warp::WarpState;

/// Viewport engine: camera transform, gesture session, and visual warp.
///
/// `ViewportEngine` is the single owner of the camera. Pointer handlers feed
/// it events; the render step calls [`ViewportEngine::frame`] once per tick
/// and uploads the returned [`FrameUniforms`]. Each handler applies its whole
/// state transition before returning, so a reader never observes a camera
/// halfway through an update.
///
/// Screen space is whatever the host feeds in. The grid shader expects the
/// origin at the canvas centre, which is also where
/// [`ViewportEngine::follow`] parks a followed point.
#[derive(Clone, Debug)]
pub struct ViewportEngine {
    config: EngineConfig,
    transform: AffineTransform,
    session: GestureSession,
    warp: WarpState,
}

impl Default for ViewportEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl ViewportEngine {
    /// Creates an engine with an identity camera.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            transform: AffineTransform::IDENTITY,
            session: GestureSession::new(GestureResolver::new(config.mode, config.epsilon)),
            warp: WarpState::new(config.warp_relaxation, config.epsilon),
        }
    }

    /// Returns the configuration the engine was built with.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Current world → screen transform.
    #[must_use]
    pub fn transform(&self) -> AffineTransform {
        self.transform
    }

    /// Current screen → world transform.
    #[must_use]
    pub fn inverse(&self) -> AffineTransform {
        self.transform.invert()
    }

    /// Replaces the camera transform.
    ///
    /// Non-finite transforms are rejected. An in-flight gesture keeps its
    /// epoch; the next pointer count change re-anchors against the new camera.
    pub fn set_transform(&mut self, transform: AffineTransform) {
        if transform.is_finite() {
            self.transform = transform;
        }
    }

    /// The gesture session, for inspection.
    #[must_use]
    pub fn session(&self) -> &GestureSession {
        &self.session
    }

    /// The warp state, for inspection.
    #[must_use]
    pub fn warp(&self) -> &WarpState {
        &self.warp
    }

    /// Maps a screen point into world space.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        self.inverse().apply(screen)
    }

    /// Maps a world point onto the screen.
    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        self.transform.apply(world)
    }

    /// A pointer landed.
    pub fn pointer_down(&mut self, id: PointerId, screen: Point) {
        self.session.pointer_down(id, screen, &self.transform);
    }

    /// A pointer moved. Returns `true` when the camera changed.
    pub fn pointer_move(&mut self, id: PointerId, screen: Point) -> bool {
        match self.session.pointer_move(id, screen) {
            Some(next) => {
                self.transform = next;
                true
            }
            None => false,
        }
    }

    /// A pointer lifted.
    pub fn pointer_up(&mut self, id: PointerId) {
        self.session.pointer_up(id, &self.transform);
    }

    /// A pointer was cancelled by the host.
    pub fn pointer_cancel(&mut self, id: PointerId) {
        self.session.pointer_cancel(id, &self.transform);
    }

    /// Locks the camera translation onto `world`, keeping the linear part.
    ///
    /// `world` is placed at the screen origin. Returns that screen anchor so
    /// an attached editor panel can position itself.
    pub fn follow(&mut self, world: Point) -> Point {
        let pinned = AffineTransform::pinned(self.transform.linear(), world, Point::ORIGIN);
        if pinned.is_finite() {
            self.transform = pinned;
        }
        self.transform.apply(world)
    }

    /// Advances the warp one frame and snapshots everything the renderer needs.
    pub fn frame(&mut self) -> FrameUniforms {
        self.warp.update(&self.transform);
        let inverse = self.transform.invert();
        FrameUniforms {
            transform: self.transform,
            inverse,
            effective_scale: self.transform.effective_scale(),
            camera_world: inverse.apply(Point::ORIGIN),
            warp: self.warp.active(),
        }
    }
}

/// Per-frame renderer inputs, computed once by [`ViewportEngine::frame`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameUniforms {
    /// World → screen camera.
    pub transform: AffineTransform,
    /// Screen → world camera.
    pub inverse: AffineTransform,
    /// Mean axis scale of the camera, for point-size falloff.
    pub effective_scale: f64,
    /// World point under the screen origin.
    pub camera_world: Point,
    /// Decaying background-grid warp.
    pub warp: Mat2,
}

impl FrameUniforms {
    /// `u_transform`, column-major.
    #[must_use]
    pub fn transform_mat3(&self) -> [f32; 9] {
        self.transform.to_mat3()
    }

    /// `u_invTransform`, column-major.
    #[must_use]
    pub fn inverse_mat3(&self) -> [f32; 9] {
        self.inverse.to_mat3()
    }

    /// `u_warp`, column-major.
    #[must_use]
    pub fn warp_mat2(&self) -> [f32; 4] {
        self.warp.to_cols_f32()
    }
}
