// Copyright 2026 the Driftglass Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `driftglass_scene` crate.
//!
//! These drive a [`Scene`] the way a host would: pointer gestures through the
//! engine, clicks through a recording editor panel, and per-frame following.

use driftglass_scene::driftglass_view2d::PointerId;
use driftglass_scene::{
    EditError, EditorPanel, FreqVector, Mover, MoverEdit, Scene, SceneConfig, Trajectory,
};
use kurbo::Point;

#[derive(Default)]
struct RecordingPanel {
    active: Option<usize>,
    shown: Option<MoverEdit>,
    placed: Vec<Point>,
    pending: Option<MoverEdit>,
}

impl EditorPanel for RecordingPanel {
    fn active_mover(&self) -> Option<usize> {
        self.active
    }

    fn set_from_mover(&mut self, index: usize, edit: &MoverEdit) {
        self.active = Some(index);
        self.shown = Some(edit.clone());
    }

    fn place_at(&mut self, screen: Point) {
        self.placed.push(screen);
    }

    fn take_edit(&mut self) -> Option<MoverEdit> {
        self.pending.take()
    }
}

#[test]
fn click_on_head_opens_panel() {
    let mut scene = Scene::default();
    let mut panel = RecordingPanel::default();
    scene.frame(1.0, None);

    let head = scene.screen_heads()[2].screen;
    let picked = scene.click(head + kurbo::Vec2::new(3.0, -2.0), &mut panel);
    assert_eq!(picked, Some(2));
    assert_eq!(panel.active, Some(2));
    assert_eq!(
        panel.shown,
        Some(MoverEdit::from_mover(&scene.movers()[2]))
    );
}

#[test]
fn click_on_empty_space_leaves_panel_alone() {
    let mut scene = Scene::default();
    let mut panel = RecordingPanel::default();
    scene.frame(1.0, None);

    assert_eq!(scene.click(Point::new(5000.0, 5000.0), &mut panel), None);
    assert_eq!(panel.active, None);
    assert!(panel.shown.is_none());
}

#[test]
fn panel_follows_selected_mover_every_frame() {
    let mut scene = Scene::default();
    let mut panel = RecordingPanel {
        active: Some(0),
        ..RecordingPanel::default()
    };

    for tick in 0..5 {
        let frame = scene.frame_with_panel(2.0 + f64::from(tick) / 60.0, &mut panel);
        let anchor = frame.follow_anchor.unwrap();
        assert!(anchor.to_vec2().hypot() < 1e-9);
    }
    assert_eq!(panel.placed.len(), 5);

    // The camera keeps the head under the origin as it moves.
    let head = scene.trail(0).unwrap().last().copied().unwrap();
    assert!(scene.engine().world_to_screen(head).to_vec2().hypot() < 1e-9);
}

#[test]
fn follow_keeps_gesture_zoom() {
    let mut scene = Scene::default();
    let engine = scene.engine_mut();
    engine.pointer_down(PointerId(1), Point::new(-50.0, 0.0));
    engine.pointer_down(PointerId(2), Point::new(50.0, 0.0));
    engine.pointer_move(PointerId(2), Point::new(50.0, 0.0));
    engine.pointer_move(PointerId(2), Point::new(150.0, 0.0));
    engine.pointer_up(PointerId(1));
    engine.pointer_up(PointerId(2));
    let zoom = scene.engine().transform().effective_scale();
    assert!((zoom - 2.0).abs() < 1e-9);

    let frame = scene.frame(3.0, Some(1));
    assert!((frame.uniforms.effective_scale - zoom).abs() < 1e-9);
    assert!(scene.screen_heads()[1].screen.to_vec2().hypot() < 1e-9);
}

#[test]
fn pending_edit_reaches_active_mover() {
    let mut scene = Scene::default();
    let mut panel = RecordingPanel {
        active: Some(1),
        pending: Some(MoverEdit {
            color: "#ffffff".into(),
            frequencies: "0.5".into(),
            vectors: vec![FreqVector::new(20.0, 0.0)],
        }),
        ..RecordingPanel::default()
    };

    assert_eq!(scene.apply_panel_edit(&mut panel), Ok(Some(1)));
    let mover = &scene.movers()[1];
    assert_eq!(mover.freqs, vec![0.5]);
    assert_eq!(mover.color, [1.0, 1.0, 1.0, 1.0]);
    let y = mover.evaluate(1.0).y;
    assert!((y - 20.0 * 0.5_f64.sin()).abs() < 1e-12);

    // Nothing pending the second time round.
    assert_eq!(scene.apply_panel_edit(&mut panel), Ok(None));
}

#[test]
fn closed_panel_edits_nothing() {
    let mut scene = Scene::default();
    let before: Vec<Mover> = scene.movers().to_vec();
    let mut panel = RecordingPanel {
        pending: Some(MoverEdit::from_mover(&before[0])),
        ..RecordingPanel::default()
    };
    assert_eq!(scene.apply_panel_edit(&mut panel), Ok(None));
    assert_eq!(scene.movers(), &before[..]);
}

#[test]
fn bad_colour_is_reported_and_mover_kept() {
    let mut scene = Scene::new(SceneConfig::default(), Mover::defaults());
    let before = scene.movers()[0].clone();
    let mut edit = MoverEdit::from_mover(&before);
    edit.color = "#12".into();
    let err = scene.apply_edit(0, &edit).unwrap_err();
    assert!(matches!(err, EditError::InvalidColor(_)));
    assert_eq!(scene.movers()[0], before);
}
