// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Pointer input capability and gesture arbitration.
//!
//! The frontend delivers one normalized `PointerState` per frame;
//! edge flags mark the frames where a press starts and ends. The
//! `GestureArbiter` replaces a shared mutable touched-object field:
//! elements claim the gesture during the initial-touch frame and the
//! claim holds until the session controller releases it.

use crate::geometry::{Point, Rect};
use crate::grid::NoteId;

/// Normalized pointer state for one frame
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerState {
    /// Pointer position in canvas coordinates
    pub position: Point,
    /// Press started this frame
    pub initial_touch: bool,
    /// Press currently held
    pub press: bool,
    /// Press ended this frame
    pub release: bool,
}

impl PointerState {
    /// An idle pointer at a position
    pub fn idle(x: f32, y: f32) -> Self {
        Self {
            position: Point::new(x, y),
            ..Default::default()
        }
    }

    /// The frame where a press starts
    pub fn touch_down(x: f32, y: f32) -> Self {
        Self {
            position: Point::new(x, y),
            initial_touch: true,
            press: true,
            release: false,
        }
    }

    /// A held press
    pub fn held(x: f32, y: f32) -> Self {
        Self {
            position: Point::new(x, y),
            initial_touch: false,
            press: true,
            release: false,
        }
    }

    /// The frame where a press ends
    pub fn touch_up(x: f32, y: f32) -> Self {
        Self {
            position: Point::new(x, y),
            initial_touch: false,
            press: false,
            release: true,
        }
    }
}

/// Hit-test arbitration for the current press cycle.
///
/// Only one element may hold the touched role at a time. Claims are
/// accepted only during the initial-touch frame; when several stacked
/// elements claim in the same frame, the last claimant wins, matching
/// update order (the element drawn on top updates last).
#[derive(Debug, Clone, Copy, Default)]
pub struct GestureArbiter {
    touched: Option<NoteId>,
}

impl GestureArbiter {
    /// Create an arbiter with no active gesture
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the gesture for an element whose bounds contain the
    /// pointer on the initial-touch frame. Returns whether the claim
    /// was taken.
    pub fn claim(&mut self, id: NoteId, bounds: Rect, pointer: &PointerState) -> bool {
        if pointer.initial_touch && bounds.contains(pointer.position) {
            self.touched = Some(id);
            true
        } else {
            false
        }
    }

    /// Element currently holding the gesture, if any
    pub fn holder(&self) -> Option<NoteId> {
        self.touched
    }

    /// Whether the given element holds the gesture
    pub fn is_held_by(&self, id: NoteId) -> bool {
        self.touched == Some(id)
    }

    /// End the press cycle
    pub fn release(&mut self) {
        self.touched = None;
    }
}
