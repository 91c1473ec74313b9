// Copyright 2026 the Driftglass Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture session: pointer lifecycle and epoch re-anchoring.
//!
//! ## Usage
//!
//! 1) Call [`GestureSession::pointer_down`] with the camera transform as it
//!    stands when a pointer lands.
//! 2) Call [`GestureSession::pointer_move`] on every move; when it returns a
//!    transform, that replaces the camera.
//! 3) Call [`GestureSession::pointer_up`] (or `pointer_cancel`) when a
//!    pointer lifts.
//!
//! Every change in the number of active pointers starts a new epoch: the
//! current camera becomes the base transform and every active pointer is
//! re-anchored to the world point under it. The session then sits in
//! [`GestureState::Settling`] until the next move, which only records the
//! new screen position. Fitting resumes on the move after that.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use driftglass_view2d::{AffineTransform, GestureSession, PointerId};
//!
//! let mut session = GestureSession::default();
//! let camera = AffineTransform::IDENTITY;
//!
//! session.pointer_down(PointerId(1), Point::new(10.0, 10.0), &camera);
//! // First move after an epoch reset is absorbed.
//! assert_eq!(session.pointer_move(PointerId(1), Point::new(12.0, 10.0)), None);
//! let next = session.pointer_move(PointerId(1), Point::new(15.0, 10.0)).unwrap();
//! assert_eq!(next.tx, 5.0);
//! ```

use hashbrown::HashMap;
use kurbo::Point;
use smallvec::SmallVec;

use crate::affine::AffineTransform;
use crate::resolver::{Correspondence, GestureResolver};

/// Host-assigned pointer identifier (touch identifier or mouse pointer id).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointerId(pub u64);

/// An active pointer and its latest screen position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerRecord {
    /// Pointer identifier.
    pub id: PointerId,
    /// Latest screen position.
    pub screen: Point,
}

/// What a pointer was holding when the current epoch began.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Anchor {
    /// Screen position at the epoch start.
    pub screen_at_start: Point,
    /// World point under the pointer at the epoch start.
    pub world_at_start: Point,
}

/// Base transform and anchors shared by every fit within one epoch.
#[derive(Clone, Debug, PartialEq)]
pub struct GestureEpoch {
    base: AffineTransform,
    anchors: HashMap<PointerId, Anchor>,
}

impl GestureEpoch {
    /// Captures `base` and anchors every pointer against its inverse.
    fn capture(base: AffineTransform, pointers: &[PointerRecord]) -> Self {
        let inverse = base.invert();
        let anchors = pointers
            .iter()
            .map(|p| {
                let anchor = Anchor {
                    screen_at_start: p.screen,
                    world_at_start: inverse.apply(p.screen),
                };
                (p.id, anchor)
            })
            .collect();
        Self { base, anchors }
    }

    /// Camera transform at the start of the epoch.
    #[must_use]
    pub fn base(&self) -> &AffineTransform {
        &self.base
    }

    /// Anchor for `id`, if it was active when the epoch began.
    #[must_use]
    pub fn anchor(&self, id: PointerId) -> Option<&Anchor> {
        self.anchors.get(&id)
    }

    /// Number of anchored pointers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    /// Returns `true` when no pointer is anchored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }
}

/// Gesture state machine.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum GestureState {
    /// No pointers are down.
    #[default]
    Idle,
    /// Pointers were just re-anchored; the next move is absorbed.
    Settling(GestureEpoch),
    /// Moves are fitted against the epoch.
    Tracking(GestureEpoch),
}

impl GestureState {
    /// The current epoch, if a gesture is in progress.
    #[must_use]
    pub fn epoch(&self) -> Option<&GestureEpoch> {
        match self {
            Self::Idle => None,
            Self::Settling(epoch) | Self::Tracking(epoch) => Some(epoch),
        }
    }
}

/// Owns the active pointers and turns their movement into camera transforms.
#[derive(Clone, Debug, Default)]
pub struct GestureSession {
    resolver: GestureResolver,
    pointers: SmallVec<[PointerRecord; 4]>,
    state: GestureState,
}

impl GestureSession {
    /// Creates an idle session that fits with `resolver`.
    #[must_use]
    pub fn new(resolver: GestureResolver) -> Self {
        Self {
            resolver,
            pointers: SmallVec::new(),
            state: GestureState::Idle,
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &GestureState {
        &self.state
    }

    /// Active pointers in the order they went down.
    #[must_use]
    pub fn pointers(&self) -> &[PointerRecord] {
        &self.pointers
    }

    /// Number of active pointers.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.pointers.len()
    }

    /// Returns `true` when no pointer is down.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self.state, GestureState::Idle)
    }

    /// Returns `true` when `id` is being tracked.
    #[must_use]
    pub fn is_tracking(&self, id: PointerId) -> bool {
        self.position(id).is_some()
    }

    /// The resolver used for fitting.
    #[must_use]
    pub fn resolver(&self) -> &GestureResolver {
        &self.resolver
    }

    /// Registers a pointer landing at `screen` while the camera is `current`.
    ///
    /// A new id starts a new epoch. A repeated down for an id that is already
    /// tracked only updates its position; the pointer count did not change.
    pub fn pointer_down(&mut self, id: PointerId, screen: Point, current: &AffineTransform) {
        if let Some(index) = self.position(id) {
            tracing::debug!(?id, "pointer down for a tracked pointer; position updated");
            self.pointers[index].screen = screen;
            return;
        }
        self.pointers.push(PointerRecord { id, screen });
        self.reset_epoch(current);
    }

    /// Records a move and fits a new camera transform.
    ///
    /// Returns `None` when the pointer is unknown, when the session is
    /// settling after a re-anchor, when an active pointer has no anchor, or
    /// when the configuration is degenerate.
    pub fn pointer_move(&mut self, id: PointerId, screen: Point) -> Option<AffineTransform> {
        let index = self.position(id)?;
        self.pointers[index].screen = screen;

        match core::mem::take(&mut self.state) {
            GestureState::Idle => None,
            GestureState::Settling(epoch) => {
                tracing::trace!(?id, "first move after re-anchoring absorbed");
                self.state = GestureState::Tracking(epoch);
                None
            }
            GestureState::Tracking(epoch) => {
                let fitted = self.fit(&epoch);
                self.state = GestureState::Tracking(epoch);
                fitted
            }
        }
    }

    /// Removes a lifted pointer.
    ///
    /// Remaining pointers are re-anchored against `current`; when none
    /// remain the session goes idle and the camera stays where it is.
    pub fn pointer_up(&mut self, id: PointerId, current: &AffineTransform) {
        let Some(index) = self.position(id) else {
            return;
        };
        // `remove` keeps insertion order, which decides the three fitting pointers.
        self.pointers.remove(index);
        if self.pointers.is_empty() {
            tracing::debug!(?id, "last pointer lifted; gesture ended");
            self.state = GestureState::Idle;
        } else {
            self.reset_epoch(current);
        }
    }

    /// Same as [`GestureSession::pointer_up`].
    pub fn pointer_cancel(&mut self, id: PointerId, current: &AffineTransform) {
        self.pointer_up(id, current);
    }

    /// Drops every pointer and returns to [`GestureState::Idle`].
    pub fn clear(&mut self) {
        self.pointers.clear();
        self.state = GestureState::Idle;
    }

    fn reset_epoch(&mut self, current: &AffineTransform) {
        tracing::debug!(pointers = self.pointers.len(), "gesture epoch reset");
        let epoch = GestureEpoch::capture(*current, &self.pointers);
        self.state = GestureState::Settling(epoch);
    }

    fn fit(&self, epoch: &GestureEpoch) -> Option<AffineTransform> {
        let mut pairs: SmallVec<[Correspondence; 4]> = SmallVec::new();
        for pointer in &self.pointers {
            let Some(anchor) = epoch.anchor(pointer.id) else {
                tracing::trace!(id = ?pointer.id, "pointer has no anchor in this epoch; fit skipped");
                return None;
            };
            pairs.push(Correspondence::new(anchor.world_at_start, pointer.screen));
        }
        self.resolver.resolve(epoch.base(), &pairs)
    }

    fn position(&self, id: PointerId) -> Option<usize> {
        self.pointers.iter().position(|p| p.id == id)
    }
}
