// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Draggable note block model.
//!
//! Each block is a template instance for one rhythmic duration. It
//! owns the drag/drop/snap state machine: claiming the gesture on
//! press, releasing its occupied slots on pickup, negotiating a
//! candidate range with the placement resolver while dragged, and
//! snapping into the grid or back home on release.

use crate::geometry::{Point, Rect};
use crate::grid::{can_accept, candidate_range, Grid, Highlight, NoteId};
use crate::input::{GestureArbiter, PointerState};
use crate::music::NoteDuration;

/// Alpha applied while a block is dragged
const DRAG_ALPHA: f32 = 0.75;

/// Alpha applied to unplaced blocks while editing is locked
const DISABLED_ALPHA: f32 = 0.0075;

/// A draggable note block
#[derive(Debug, Clone)]
pub struct NoteBlock {
    id: NoteId,
    duration: NoteDuration,
    rect: Rect,
    home: Point,
    slotted: bool,
    leftmost_slot: Option<usize>,
    can_drop: bool,
    enabled: bool,
    alpha: f32,
}

impl NoteBlock {
    /// Create a block at its home position in the tray
    pub fn new(id: NoteId, duration: NoteDuration, home: Rect) -> Self {
        Self {
            id,
            duration,
            rect: home,
            home: Point::new(home.min_x, home.min_y),
            slotted: false,
            leftmost_slot: None,
            can_drop: false,
            enabled: true,
            alpha: 1.0,
        }
    }

    /// Block identifier
    pub fn id(&self) -> NoteId {
        self.id
    }

    /// Rhythmic duration of this block
    pub fn duration(&self) -> NoteDuration {
        self.duration
    }

    /// Current bounding box
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Home position in the tray
    pub fn home(&self) -> Point {
        self.home
    }

    /// Whether the block is snapped into the grid
    pub fn is_slotted(&self) -> bool {
        self.slotted
    }

    /// Leftmost slot of the occupied range while placed, or the
    /// current candidate while dragged
    pub fn leftmost_slot(&self) -> Option<usize> {
        self.leftmost_slot
    }

    /// Whether the current candidate range is droppable
    pub fn can_drop(&self) -> bool {
        self.can_drop
    }

    /// Whether the block accepts pointer input
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Lock or unlock interaction (during playback)
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Draw alpha: dragged blocks are dimmed, disabled unplaced blocks
    /// are near-invisible, placed blocks stay fully visible
    pub fn alpha(&self) -> f32 {
        if !self.enabled && !self.slotted {
            DISABLED_ALPHA
        } else {
            self.alpha
        }
    }

    /// Per-frame update of the drag/drop/snap state machine
    pub fn update(&mut self, pointer: &PointerState, arbiter: &mut GestureArbiter, grid: &mut Grid) {
        if !self.enabled {
            return;
        }

        arbiter.claim(self.id, self.rect, pointer);

        if arbiter.is_held_by(self.id) {
            self.drag(pointer, grid);
        } else if !self.slotted {
            self.drop(grid);
        }
    }

    /// Follow the pointer and negotiate a candidate range
    fn drag(&mut self, pointer: &PointerState, grid: &mut Grid) {
        self.slotted = false;
        self.can_drop = false;

        // Occupancy is released the instant the block is picked back
        // up, before the candidate range is recomputed
        if let Some(leftmost) = self.leftmost_slot {
            grid.release_range(leftmost, self.duration.units(), self.id);
        }
        self.leftmost_slot = None;

        self.rect.center_on(pointer.position);
        self.alpha = DRAG_ALPHA;

        let Some(hit) = grid.hit_slot(self.rect.center()) else {
            return;
        };
        let Some(range) = candidate_range(grid, hit, self.duration.units()) else {
            return;
        };

        self.leftmost_slot = Some(range.leftmost);
        let accepted = can_accept(grid, range);
        self.can_drop = accepted;

        let highlight = if accepted {
            Highlight::Legal
        } else {
            Highlight::Blocked
        };
        grid.highlight_range(range, highlight);
    }

    /// Snap into the candidate slot range, or spring back home
    fn drop(&mut self, grid: &mut Grid) {
        self.alpha = 1.0;

        match self.leftmost_slot {
            Some(leftmost) if self.can_drop => {
                if let Some(slot) = grid.slot(leftmost) {
                    self.rect.move_to(slot.rect.min_x, slot.rect.min_y);
                }
                grid.claim_range(leftmost, self.duration.units(), self.id);
                self.slotted = true;
            }
            _ => {
                self.rect.move_to(self.home.x, self.home.y);
            }
        }
    }

    /// Release any occupied slots and snap back home (explicit clear)
    pub fn reset(&mut self, grid: &mut Grid) {
        self.rect.move_to(self.home.x, self.home.y);
        if let Some(leftmost) = self.leftmost_slot {
            grid.release_range(leftmost, self.duration.units(), self.id);
        }
        self.leftmost_slot = None;
        self.slotted = false;
        self.can_drop = false;
    }
}
