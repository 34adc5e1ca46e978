// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Grid slot model.
//!
//! This module provides:
//! - The fixed array of discrete (pitch-row, time-column) cells
//! - Per-slot rhythmic legality rules keyed off the measure subdivision
//! - Occupancy state and the leftmost-slot back-reference to notes
//! - Transient highlight state reset at the start of every frame

pub mod placement;

pub use placement::{can_accept, candidate_range, stripe_occupied, SlotRange};

use crate::config::{ConfigError, StudioConfig};
use crate::geometry::{Layout, Point, Rect};
use crate::music::Pitch;

/// Identifier of a note block (index into the studio's note list)
pub type NoteId = usize;

/// Transient per-frame slot highlight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    /// No drag hovering over this slot
    Neutral,
    /// Hovered candidate range is droppable
    Legal,
    /// Hovered candidate range is rejected
    Blocked,
}

impl Highlight {
    /// Fill color as RGBA
    pub fn rgba(self) -> [u8; 4] {
        match self {
            Highlight::Neutral => [0, 0, 0, 0],
            Highlight::Legal => [0, 255, 0, 128],
            Highlight::Blocked => [255, 0, 0, 128],
        }
    }
}

/// One discrete (pitch-row, time-column) cell
#[derive(Debug, Clone)]
pub struct Slot {
    /// Flat row-major position in the grid
    pub index: usize,
    /// Pitch of this slot's row
    pub pitch: Pitch,
    /// Pixel rectangle
    pub rect: Rect,
    /// Whether any note's occupied range covers this slot
    pub occupied: bool,
    /// Back-reference held only by the leftmost slot of a placed note
    pub contained_note: Option<NoteId>,
    /// Transient highlight, reset every frame
    pub highlight: Highlight,
}

/// Whether a note of the given width may begin at a slot index.
///
/// The rules keep every note metrically aligned: a note may not
/// straddle a beat, half-bar, or bar boundary it does not evenly
/// divide.
pub fn legal_start(index: usize, units: usize, measure_len: usize) -> bool {
    if measure_len == 0 {
        return false;
    }
    match units {
        1 => true,
        2 => index % 4 != 3,
        3 => index % 4 < 2,
        4 => index % 4 == 0,
        6 | 8 => index % 4 == 0 && index % measure_len < measure_len.saturating_sub(4),
        12 => index % 4 == 0 && index % measure_len < measure_len.saturating_sub(8),
        16 => index % measure_len == 0,
        _ => false,
    }
}

/// The fixed array of grid slots
#[derive(Debug, Clone)]
pub struct Grid {
    slots: Vec<Slot>,
    rows: usize,
    cols: usize,
    measure_len: usize,
}

impl Grid {
    /// Build the grid for a validated configuration and layout
    pub fn new(config: &StudioConfig, layout: &Layout) -> Result<Self, ConfigError> {
        config.validate()?;

        let rows = config.rows;
        let cols = config.cols;
        let mut slots = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            let pitch = Pitch::for_row(row).ok_or(ConfigError::BadRowCount {
                rows,
                max: Pitch::ALL.len(),
            })?;
            for col in 0..cols {
                let index = row * cols + col;
                slots.push(Slot {
                    index,
                    pitch,
                    rect: layout.slot_rect(index),
                    occupied: false,
                    contained_note: None,
                    highlight: Highlight::Neutral,
                });
            }
        }

        Ok(Self {
            slots,
            rows,
            cols,
            measure_len: config.measure_len,
        })
    }

    /// Number of pitch rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of time columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Columns per measure
    pub fn measure_len(&self) -> usize {
        self.measure_len
    }

    /// Total number of slots
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the grid has no slots
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// All slots in row-major order
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Slot by flat index
    pub fn slot(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    /// Mutable slot by flat index
    pub fn slot_mut(&mut self, index: usize) -> Option<&mut Slot> {
        self.slots.get_mut(index)
    }

    /// Row of a flat index
    pub fn row_of(&self, index: usize) -> usize {
        index / self.cols
    }

    /// Column of a flat index
    pub fn col_of(&self, index: usize) -> usize {
        index % self.cols
    }

    /// Clear all transient highlight state; called once per frame
    /// before the note blocks update
    pub fn begin_frame(&mut self) {
        for slot in &mut self.slots {
            slot.highlight = Highlight::Neutral;
        }
    }

    /// Whether a note of the given width may begin at a slot
    pub fn legal_start(&self, index: usize, units: usize) -> bool {
        index < self.slots.len() && legal_start(index, units, self.measure_len)
    }

    /// First slot whose rectangle contains the point
    pub fn hit_slot(&self, p: Point) -> Option<usize> {
        self.slots
            .iter()
            .find(|slot| slot.rect.contains(p))
            .map(|slot| slot.index)
    }

    /// Mark a contiguous range occupied and store the back-reference
    /// on its leftmost slot
    pub fn claim_range(&mut self, leftmost: usize, units: usize, note: NoteId) {
        for i in leftmost..leftmost + units {
            if let Some(slot) = self.slots.get_mut(i) {
                slot.occupied = true;
            }
        }
        if let Some(slot) = self.slots.get_mut(leftmost) {
            slot.contained_note = Some(note);
        }
    }

    /// Release a contiguous range if the leftmost back-reference is
    /// held by the given note; a stale release is a no-op
    pub fn release_range(&mut self, leftmost: usize, units: usize, note: NoteId) {
        let held = self
            .slots
            .get(leftmost)
            .map(|slot| slot.contained_note == Some(note))
            .unwrap_or(false);
        if !held {
            return;
        }
        for i in leftmost..leftmost + units {
            if let Some(slot) = self.slots.get_mut(i) {
                slot.occupied = false;
            }
        }
        if let Some(slot) = self.slots.get_mut(leftmost) {
            slot.contained_note = None;
        }
    }

    /// Set the highlight on a contiguous range
    pub fn highlight_range(&mut self, range: SlotRange, highlight: Highlight) {
        for i in range.indices() {
            if let Some(slot) = self.slots.get_mut(i) {
                slot.highlight = highlight;
            }
        }
    }
}
