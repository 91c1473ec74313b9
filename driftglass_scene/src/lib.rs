// Copyright 2026 the Driftglass Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Driftglass Scene: movers, trails, and picking on top of a viewport engine.
//!
//! [`driftglass_view2d`] owns the camera. This crate owns what the camera
//! looks at:
//! - [`Mover`]s, whose world position is a pure function of time
//!   ([`Trajectory`]).
//! - A fading trail per mover, re-sampled every frame into reusable buffers
//!   ([`TrailSampler`]).
//! - Screen-space head sizing and click picking ([`PointSizing`],
//!   [`HitTester`]).
//! - The CPU side of the hexagonal background grid ([`HexGrid`]).
//! - The contract with a host editor panel ([`EditorPanel`], [`MoverEdit`]).
//!
//! [`Scene`] wires these together. A host typically does, per animation tick:
//!
//! ```rust
//! use kurbo::Point;
//! use driftglass_scene::Scene;
//!
//! let mut scene = Scene::default();
//! let frame = scene.frame(2.5, Some(0));
//!
//! // Upload `frame.uniforms`, draw `scene.trail_flat(i)` for every mover...
//! assert_eq!(scene.trail_flat(0).map(|f| f.len()), Some(240));
//!
//! // ...and resolve clicks against the heads just drawn.
//! assert_eq!(scene.pick(Point::ORIGIN), Some(0));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod editor;
mod grid;
mod hit;
mod mover;
mod scene;
mod trail;

pub use editor::{EditError, EditorPanel, MoverEdit, PAD_MAX_AMP, color_to_hex, hex_to_color};
pub use grid::{GRID_SPACING, HexGrid};
pub use hit::{
    BASE_POINT_SIZE, HEAD_POINT_SIZE, HIT_MARGIN, HitTester, MIN_POINT_SIZE, PointSizing,
    SIZE_FALLOFF, ScreenMover,
};
pub use mover::{FreqVector, MOVER_X_OFFSET, Mover, Rgba, Trajectory};
pub use scene::{Scene, SceneConfig, SceneFrame};
pub use trail::{TRAIL_DURATION, TRAIL_SAMPLES, TrailConfig, TrailSampler};

pub use driftglass_view2d;
