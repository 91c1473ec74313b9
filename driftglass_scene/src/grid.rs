// Copyright 2026 the Driftglass Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hexagonal background dot grid.
//!
//! The grid is normally drawn by a fragment shader. [`HexGrid`] evaluates the
//! same per-pixel test on the CPU so hosts without a GPU path, and tests, can
//! ask whether a screen point falls inside a dot.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::Point;

use driftglass_view2d::FrameUniforms;

use crate::hit::{BASE_POINT_SIZE, SIZE_FALLOFF};

/// Horizontal distance between neighbouring dots, in world units.
pub const GRID_SPACING: f64 = 48.0;

/// A hex lattice of dots: rows `spacing·√3/2` apart, odd rows shifted by half
/// a spacing.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HexGrid {
    /// Distance between dots in a row.
    pub spacing: f64,
    /// Dot radius at unit scale, in pixels.
    pub dot_size: f64,
    /// Size falloff per world unit of distance from the camera.
    pub falloff: f64,
}

impl Default for HexGrid {
    fn default() -> Self {
        Self {
            spacing: GRID_SPACING,
            dot_size: BASE_POINT_SIZE,
            falloff: SIZE_FALLOFF,
        }
    }
}

impl HexGrid {
    /// Distance between rows.
    #[must_use]
    pub fn vertical_spacing(&self) -> f64 {
        self.spacing * 3.0_f64.sqrt() * 0.5
    }

    /// Shift applied to odd rows.
    #[must_use]
    pub fn half_spacing(&self) -> f64 {
        self.spacing * 0.5
    }

    /// Centre of the dot cell containing `world`.
    ///
    /// Rounds to the nearest row first, then to the nearest column within
    /// that row. Near row boundaries this is not always the closest dot; the
    /// shader makes the same choice.
    #[must_use]
    pub fn nearest_center(&self, world: Point) -> Point {
        let vs = self.vertical_spacing();
        let row = round_half_up(world.y / vs);
        let parity = row - 2.0 * (row * 0.5).floor();
        let offset = parity * self.half_spacing();
        let col = round_half_up((world.x - offset) / self.spacing);
        Point::new(col * self.spacing + offset, row * vs)
    }

    /// Rendered dot radius at `center` for this frame.
    ///
    /// Unlike mover heads, grid dots have no minimum size.
    #[must_use]
    pub fn dot_radius(&self, center: Point, uniforms: &FrameUniforms) -> f64 {
        let distance = (center - uniforms.camera_world).hypot();
        self.dot_size * uniforms.effective_scale / (1.0 + self.falloff * distance)
    }

    /// Returns `true` when the screen point `screen` is covered by a dot.
    ///
    /// The offset from the dot centre is measured in world units and passed
    /// through the frame's warp before it is compared with the radius.
    #[must_use]
    pub fn covers(&self, screen: Point, uniforms: &FrameUniforms) -> bool {
        let world = uniforms.inverse.apply(screen);
        let center = self.nearest_center(world);
        let warped = uniforms.warp.apply(world - center);
        warped.hypot() <= self.dot_radius(center, uniforms)
    }
}

fn round_half_up(v: f64) -> f64 {
    (v + 0.5).floor()
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Vec2};

    use driftglass_view2d::{AffineTransform, Mat2, ViewportEngine};

    use super::HexGrid;

    #[test]
    fn even_and_odd_rows() {
        let grid = HexGrid::default();
        let vs = grid.vertical_spacing();
        assert_eq!(grid.nearest_center(Point::new(3.0, 2.0)), Point::ORIGIN);
        let odd = grid.nearest_center(Point::new(20.0, vs + 1.0));
        assert!((odd - Point::new(24.0, vs)).hypot() < 1e-9);
        let negative_odd = grid.nearest_center(Point::new(-20.0, -vs));
        assert!((negative_odd - Point::new(-24.0, -vs)).hypot() < 1e-9);
    }

    #[test]
    fn ties_round_up() {
        let grid = HexGrid::default();
        let c = grid.nearest_center(Point::new(24.0, 0.0));
        assert_eq!(c, Point::new(48.0, 0.0));
    }

    #[test]
    fn identity_frame_covers_dot_centres_only() {
        let grid = HexGrid::default();
        let uniforms = ViewportEngine::default().frame();
        assert!(grid.covers(Point::ORIGIN, &uniforms));
        assert!(grid.covers(Point::new(9.9, 0.0), &uniforms));
        assert!(!grid.covers(Point::new(10.1, 0.0), &uniforms));
        assert!(!grid.covers(Point::new(24.0, 10.0), &uniforms));
    }

    #[test]
    fn zoom_grows_dots_on_screen() {
        let grid = HexGrid::default();
        let mut engine = ViewportEngine::default();
        engine.set_transform(AffineTransform::from_parts(
            Mat2::new(2.0, 0.0, 0.0, 2.0),
            Vec2::ZERO,
        ));
        let uniforms = engine.frame();
        assert!((grid.dot_radius(Point::ORIGIN, &uniforms) - 20.0).abs() < 1e-12);
        // Screen offsets are halved going back into world space.
        assert!(grid.covers(Point::new(39.0, 0.0), &uniforms));
        assert!(!grid.covers(Point::new(41.0, 0.0), &uniforms));
    }

    #[test]
    fn warp_stretches_the_dot_test() {
        let grid = HexGrid::default();
        let mut uniforms = ViewportEngine::default().frame();
        let wide = Point::new(6.0, 0.0);
        let tall = Point::new(0.0, 15.0);
        assert!(grid.covers(wide, &uniforms));
        assert!(!grid.covers(tall, &uniforms));
        uniforms.warp = Mat2::new(2.0, 0.0, 0.0, 0.5);
        assert!(!grid.covers(wide, &uniforms));
        assert!(grid.covers(tall, &uniforms));
    }
}
