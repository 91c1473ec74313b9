// Copyright 2026 the Driftglass Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Driftglass View 2D: a multi-pointer affine viewport engine.
//!
//! This crate turns a stream of raw pointer events into a 2D affine camera
//! transform and keeps that transform continuous while fingers come and go.
//! It focuses on:
//! - The [`AffineTransform`] / [`Mat2`] value types, with an inverse that
//!   falls back to the identity instead of producing NaN.
//! - Fitting a camera to 1, 2, or 3+ pointer correspondences
//!   ([`GestureResolver`]): pan, similarity (zoom + rotate), or full affine.
//! - Re-anchoring every pointer whenever the pointer count changes
//!   ([`GestureSession`]), so adding or lifting a finger never makes the view
//!   jump.
//! - A decaying, area-normalized "visual warp" ([`WarpState`]) for ambient
//!   background distortion.
//!
//! [`ViewportEngine`] bundles all of that behind pointer handlers and a
//! per-frame [`ViewportEngine::frame`] call.
//!
//! It does **not** render anything. Callers are expected to:
//! - Translate host events (DOM, winit, …) into [`PointerId`] + screen point
//!   calls.
//! - Upload [`FrameUniforms`] to their shaders.
//! - Do their own picking in screen space.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Point;
//! use driftglass_view2d::{PointerId, ViewportEngine};
//!
//! let mut engine = ViewportEngine::default();
//!
//! // Two-finger pinch: both land, then spread apart.
//! engine.pointer_down(PointerId(1), Point::new(-10.0, 0.0));
//! engine.pointer_down(PointerId(2), Point::new(10.0, 0.0));
//! engine.pointer_move(PointerId(1), Point::new(-10.0, 0.0));
//! engine.pointer_move(PointerId(1), Point::new(-20.0, 0.0));
//! engine.pointer_move(PointerId(2), Point::new(20.0, 0.0));
//!
//! let uniforms = engine.frame();
//! assert!((uniforms.effective_scale - 2.0).abs() < 1e-9);
//!
//! // Screen -> world for panning/anchoring logic.
//! let world = engine.screen_to_world(Point::new(20.0, 0.0));
//! assert!((world.x - 10.0).abs() < 1e-9);
//! ```
//!
//! ## Design notes
//!
//! - Transforms are immutable values; every operation returns a new one.
//! - The affine path does not clamp zoom, so skew can be expressed. The
//!   legacy [`ResolverMode::Similarity`] mode clamps zoom and never shears.
//! - A two-pointer fit composes its rotation and scale onto the epoch's base
//!   linear part. Skew introduced by a three-pointer gesture therefore
//!   survives later two-pointer gestures and can compound.
//! - Degenerate geometry never surfaces as an error: inversion falls back to
//!   the identity and fits are skipped.
//!
//! This crate is `no_std`.

#![no_std]

mod affine;
mod config;
mod engine;
mod resolver;
mod session;
mod warp;

pub use affine::{AffineTransform, DET_EPSILON, EPSILON, Mat2};
pub use config::{EngineConfig, MAX_ZOOM, MIN_ZOOM, ResolverMode, WARP_RELAXATION};
pub use engine::{FrameUniforms, ViewportEngine};
pub use resolver::{Correspondence, GestureResolver};
pub use session::{Anchor, GestureEpoch, GestureSession, GestureState, PointerId, PointerRecord};
pub use warp::WarpState;
