// Copyright 2026 the Driftglass Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use kurbo::Point;

use driftglass_view2d::{EngineConfig, FrameUniforms, ViewportEngine};

use crate::editor::{EditError, EditorPanel, MoverEdit};
use crate::hit::{HitTester, PointSizing, ScreenMover};
use crate::mover::Mover;
use crate::trail::{TrailConfig, TrailSampler};

/// Everything needed to build a [`Scene`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SceneConfig {
    /// Viewport engine settings.
    pub engine: EngineConfig,
    /// Trail window shared by all movers.
    pub trail: TrailConfig,
    /// Point-size falloff.
    pub sizing: PointSizing,
    /// Click tolerance.
    pub hit: HitTester,
}

/// Result of [`Scene::frame`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneFrame {
    /// Camera and warp uniforms for this frame.
    pub uniforms: FrameUniforms,
    /// Screen anchor of the followed mover, when one is active.
    pub follow_anchor: Option<Point>,
}

/// The viewport engine plus its movers and their trails.
///
/// Per frame, [`Scene::frame`] samples every trail, locks the camera onto the
/// active mover, and records where each head landed on screen. Clicks are
/// resolved against those recorded heads, so a pick always matches what was
/// last drawn.
#[derive(Clone, Debug)]
pub struct Scene {
    engine: ViewportEngine,
    movers: Vec<Mover>,
    trails: Vec<TrailSampler>,
    heads: Vec<ScreenMover>,
    sizing: PointSizing,
    hit: HitTester,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(SceneConfig::default(), Mover::defaults())
    }
}

impl Scene {
    /// Creates a scene with one trail per mover.
    #[must_use]
    pub fn new(config: SceneConfig, movers: Vec<Mover>) -> Self {
        let trails = movers.iter().map(|_| TrailSampler::new(config.trail)).collect();
        Self {
            engine: ViewportEngine::new(config.engine),
            heads: Vec::with_capacity(movers.len()),
            movers,
            trails,
            sizing: config.sizing,
            hit: config.hit,
        }
    }

    /// The viewport engine.
    #[must_use]
    pub fn engine(&self) -> &ViewportEngine {
        &self.engine
    }

    /// The viewport engine, for feeding pointer events.
    pub fn engine_mut(&mut self) -> &mut ViewportEngine {
        &mut self.engine
    }

    /// All movers, in pick order.
    #[must_use]
    pub fn movers(&self) -> &[Mover] {
        &self.movers
    }

    /// Last sampled trail of mover `index`, oldest first.
    #[must_use]
    pub fn trail(&self, index: usize) -> Option<&[Point]> {
        self.trails.get(index).map(TrailSampler::points)
    }

    /// Last sampled trail of mover `index` as interleaved `x, y` floats.
    #[must_use]
    pub fn trail_flat(&self, index: usize) -> Option<&[f32]> {
        self.trails.get(index).map(TrailSampler::flat)
    }

    /// Mover heads as placed by the last [`Scene::frame`].
    #[must_use]
    pub fn screen_heads(&self) -> &[ScreenMover] {
        &self.heads
    }

    /// Advances the scene to `time` seconds.
    ///
    /// When `active` names a mover, the camera translation is locked so its
    /// trail head sits at the screen origin. An out-of-range `active` is
    /// ignored.
    pub fn frame(&mut self, time: f64, active: Option<usize>) -> SceneFrame {
        for (mover, trail) in self.movers.iter().zip(&mut self.trails) {
            trail.sample(mover, time);
        }

        let follow_anchor = active
            .and_then(|index| self.trails.get(index))
            .and_then(TrailSampler::head)
            .map(|head| self.engine.follow(head));

        let uniforms = self.engine.frame();

        self.heads.clear();
        for trail in &self.trails {
            // An empty trail still occupies its slot so indices line up.
            let head = match trail.head() {
                Some(world) => ScreenMover {
                    screen: uniforms.transform.apply(world),
                    radius: self.sizing.head_radius(
                        uniforms.effective_scale,
                        world,
                        uniforms.camera_world,
                    ),
                },
                None => ScreenMover {
                    screen: Point::new(f64::NAN, f64::NAN),
                    radius: 0.0,
                },
            };
            self.heads.push(head);
        }

        SceneFrame {
            uniforms,
            follow_anchor,
        }
    }

    /// Same as [`Scene::frame`], following the panel's mover and moving the
    /// panel next to it.
    pub fn frame_with_panel<P: EditorPanel + ?Sized>(
        &mut self,
        time: f64,
        panel: &mut P,
    ) -> SceneFrame {
        let frame = self.frame(time, panel.active_mover());
        if let Some(anchor) = frame.follow_anchor {
            panel.place_at(anchor);
        }
        frame
    }

    /// Index of the mover head under `screen`, if any.
    #[must_use]
    pub fn pick(&self, screen: Point) -> Option<usize> {
        self.hit.pick(screen, &self.heads)
    }

    /// Handles a click: on a hit, opens `panel` on that mover.
    pub fn click<P: EditorPanel + ?Sized>(&self, screen: Point, panel: &mut P) -> Option<usize> {
        let index = self.pick(screen)?;
        tracing::debug!(index, "mover selected");
        panel.set_from_mover(index, &MoverEdit::from_mover(&self.movers[index]));
        Some(index)
    }

    /// Applies `edit` to mover `index`.
    pub fn apply_edit(&mut self, index: usize, edit: &MoverEdit) -> Result<(), EditError> {
        let len = self.movers.len();
        let mover = self
            .movers
            .get_mut(index)
            .ok_or(EditError::NoSuchMover { index, len })?;
        edit.apply_to(mover)
    }

    /// Pulls a pending edit from `panel` and applies it to the panel's mover.
    ///
    /// Returns the edited index, or `None` when the panel is closed or had
    /// nothing pending.
    pub fn apply_panel_edit<P: EditorPanel + ?Sized>(
        &mut self,
        panel: &mut P,
    ) -> Result<Option<usize>, EditError> {
        let Some(index) = panel.active_mover() else {
            return Ok(None);
        };
        let Some(edit) = panel.take_edit() else {
            return Ok(None);
        };
        self.apply_edit(index, &edit)?;
        Ok(Some(index))
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use kurbo::Point;

    use super::{Scene, SceneConfig};
    use crate::editor::{EditError, MoverEdit};
    use crate::mover::Mover;

    #[test]
    fn frame_places_one_head_per_mover() {
        let mut scene = Scene::default();
        scene.frame(3.0, None);
        assert_eq!(scene.screen_heads().len(), 3);
        assert_eq!(scene.trail(0).map(<[Point]>::len), Some(120));
        assert_eq!(scene.trail_flat(2).map(<[f32]>::len), Some(240));
        assert!(scene.trail(3).is_none());
    }

    #[test]
    fn following_parks_head_at_origin() {
        let mut scene = Scene::default();
        let frame = scene.frame(4.0, Some(1));
        let anchor = frame.follow_anchor.unwrap();
        assert!(anchor.to_vec2().hypot() < 1e-9);
        assert!(scene.screen_heads()[1].screen.to_vec2().hypot() < 1e-9);
        assert_eq!(scene.pick(Point::new(1.0, 1.0)), Some(1));
    }

    #[test]
    fn out_of_range_follow_is_ignored() {
        let mut scene = Scene::default();
        let frame = scene.frame(1.0, Some(9));
        assert_eq!(frame.follow_anchor, None);
    }

    #[test]
    fn apply_edit_rejects_bad_index() {
        let mut scene = Scene::new(SceneConfig::default(), vec![]);
        let edit = MoverEdit::from_mover(&Mover::defaults()[0]);
        assert_eq!(
            scene.apply_edit(0, &edit),
            Err(EditError::NoSuchMover { index: 0, len: 0 })
        );
    }
}
