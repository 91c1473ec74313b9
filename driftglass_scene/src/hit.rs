// Copyright 2026 the Driftglass Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Screen-space point sizing and mover picking.
//!
//! Rendered point sizes shrink with world distance from the camera. Picking
//! compares a click against each mover head's last rendered screen position
//! and radius; no transform is involved in the test itself.

use kurbo::Point;

/// Grid point diameter at unit scale, in pixels.
pub const BASE_POINT_SIZE: f64 = 10.0;
/// Mover head diameter at unit scale, in pixels.
pub const HEAD_POINT_SIZE: f64 = 24.0;
/// Smallest rendered point diameter, in pixels.
pub const MIN_POINT_SIZE: f64 = 1.5;
/// Size falloff per world unit of distance from the camera.
pub const SIZE_FALLOFF: f64 = 0.0004;
/// Extra pick tolerance around a mover head, in pixels.
pub const HIT_MARGIN: f64 = 8.0;

/// Point-size falloff curve.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PointSizing {
    /// Grid point diameter at unit scale.
    pub base_size: f64,
    /// Mover head diameter at unit scale.
    pub head_size: f64,
    /// Diameter floor.
    pub min_size: f64,
    /// Falloff per world unit of distance from the camera.
    pub falloff: f64,
}

impl Default for PointSizing {
    fn default() -> Self {
        Self {
            base_size: BASE_POINT_SIZE,
            head_size: HEAD_POINT_SIZE,
            min_size: MIN_POINT_SIZE,
            falloff: SIZE_FALLOFF,
        }
    }
}

impl PointSizing {
    /// Rendered diameter of a point of nominal size `size` at `world`.
    ///
    /// `size · scale / (1 + falloff · ‖world − camera_world‖)`, floored at
    /// `min_size`.
    #[must_use]
    pub fn size(&self, size: f64, scale: f64, world: Point, camera_world: Point) -> f64 {
        let distance = (world - camera_world).hypot();
        (size * scale / (1.0 + self.falloff * distance)).max(self.min_size)
    }

    /// Rendered radius of a mover head at `world`.
    #[must_use]
    pub fn head_radius(&self, scale: f64, world: Point, camera_world: Point) -> f64 {
        0.5 * self.size(self.head_size, scale, world, camera_world)
    }
}

/// A mover head as it was last drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenMover {
    /// Screen position of the head.
    pub screen: Point,
    /// Rendered radius in pixels.
    pub radius: f64,
}

/// Picks mover heads by screen distance.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HitTester {
    /// Tolerance added to every head radius.
    pub margin: f64,
}

impl Default for HitTester {
    fn default() -> Self {
        Self { margin: HIT_MARGIN }
    }
}

impl HitTester {
    /// Creates a tester with the given margin.
    #[must_use]
    pub const fn new(margin: f64) -> Self {
        Self { margin }
    }

    /// Returns `true` when `screen` lies within `radius + margin` of `target`.
    #[must_use]
    pub fn hits(&self, screen: Point, target: &ScreenMover) -> bool {
        (screen - target.screen).hypot() <= target.radius + self.margin
    }

    /// Index of the first head that `screen` hits, in slice order.
    #[must_use]
    pub fn pick(&self, screen: Point, heads: &[ScreenMover]) -> Option<usize> {
        heads.iter().position(|head| self.hits(screen, head))
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Point;

    use super::{HitTester, PointSizing, ScreenMover};

    fn head(x: f64, y: f64, radius: f64) -> ScreenMover {
        ScreenMover {
            screen: Point::new(x, y),
            radius,
        }
    }

    #[test]
    fn exact_position_always_hits() {
        let heads = [head(40.0, -12.0, 0.0)];
        for margin in [0.0, 1.0, 8.0, 100.0] {
            let tester = HitTester::new(margin);
            assert_eq!(tester.pick(Point::new(40.0, -12.0), &heads), Some(0));
        }
    }

    #[test]
    fn just_outside_reach_misses() {
        let heads = [head(0.0, 0.0, 12.0)];
        let tester = HitTester::default();
        let reach = 12.0 + tester.margin;
        assert_eq!(tester.pick(Point::new(reach, 0.0), &heads), Some(0));
        assert_eq!(tester.pick(Point::new(reach + 1.0, 0.0), &heads), None);
    }

    #[test]
    fn first_hit_in_order_wins() {
        let heads = [head(0.0, 0.0, 10.0), head(5.0, 0.0, 10.0)];
        let tester = HitTester::default();
        assert_eq!(tester.pick(Point::new(4.0, 0.0), &heads), Some(0));
        assert_eq!(tester.pick(Point::new(22.0, 0.0), &heads), Some(1));
    }

    #[test]
    fn size_falls_off_with_distance() {
        let sizing = PointSizing::default();
        let camera = Point::new(0.0, 0.0);
        let near = sizing.size(10.0, 1.0, camera, camera);
        let far = sizing.size(10.0, 1.0, Point::new(2500.0, 0.0), camera);
        assert!((near - 10.0).abs() < 1e-12);
        assert!((far - 5.0).abs() < 1e-12);
        assert!((sizing.head_radius(2.0, camera, camera) - 24.0).abs() < 1e-12);
    }

    #[test]
    fn size_is_floored() {
        let sizing = PointSizing::default();
        let tiny = sizing.size(10.0, 0.01, Point::ORIGIN, Point::ORIGIN);
        assert_eq!(tiny, sizing.min_size);
    }
}
