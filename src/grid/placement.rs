// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Placement and collision resolution.
//!
//! Pure logic invoked from the note model while dragging: computes the
//! candidate contiguous slot range under the pointer, clamps it to the
//! hovered row, and validates it against the leftmost slot's legality
//! rules and cross-row column occupancy.

use super::Grid;

/// A contiguous range of slots within one grid row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotRange {
    /// Flat index of the leftmost slot
    pub leftmost: usize,
    /// Width in slots
    pub units: usize,
}

impl SlotRange {
    /// Create a new range
    pub fn new(leftmost: usize, units: usize) -> Self {
        Self { leftmost, units }
    }

    /// Flat index of the rightmost slot
    pub fn rightmost(&self) -> usize {
        self.leftmost + self.units.saturating_sub(1)
    }

    /// Iterator over the flat indices in the range
    pub fn indices(&self) -> std::ops::Range<usize> {
        self.leftmost..self.leftmost + self.units
    }
}

/// Candidate range for a note of the given width whose drag center
/// hovers over `center`. The range is centered on the hovered slot and
/// clamped so it never crosses the row boundary on either side.
///
/// Returns `None` when the note is wider than a row and cannot fit.
pub fn candidate_range(grid: &Grid, center: usize, units: usize) -> Option<SlotRange> {
    let cols = grid.cols();
    if units == 0 || units > cols || center >= grid.len() {
        return None;
    }

    let row = grid.row_of(center);
    let row_start = row * cols;
    let row_end = row_start + cols - 1;

    let half = units / 2;
    let mut leftmost = center as isize - half as isize;
    let mut rightmost = leftmost + units as isize - 1;

    if leftmost < row_start as isize {
        leftmost = row_start as isize;
        rightmost = leftmost + units as isize - 1;
    }
    if rightmost > row_end as isize {
        rightmost = row_end as isize;
        leftmost = rightmost - (units as isize - 1);
    }

    Some(SlotRange::new(leftmost as usize, units))
}

/// Column-stripe occupancy scan: true when any slot in the candidate's
/// column window is occupied in any pitch row. This keeps a
/// time-column sounding a single subdivision pattern across all rows.
pub fn stripe_occupied(grid: &Grid, range: SlotRange) -> bool {
    let cols = grid.cols();
    let start_col = grid.col_of(range.leftmost);
    for row in 0..grid.rows() {
        let base = row * cols + start_col;
        for i in 0..range.units {
            if let Some(slot) = grid.slot(base + i) {
                if slot.occupied {
                    return true;
                }
            }
        }
    }
    false
}

/// Whether a candidate range may be dropped: its leftmost slot must
/// pass the legality rules for the note's width, and no other note may
/// occupy its column stripe. A picked-up note releases its own
/// occupancy before this is evaluated, so it never conflicts with
/// itself.
pub fn can_accept(grid: &Grid, range: SlotRange) -> bool {
    grid.legal_start(range.leftmost, range.units) && !stripe_occupied(grid, range)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StudioConfig;
    use crate::geometry::Layout;

    fn test_grid() -> Grid {
        let config = StudioConfig::default();
        let layout = Layout::new(1280.0, 720.0, config.rows, config.cols, 40.0, 120.0);
        Grid::new(&config, &layout).unwrap()
    }

    #[test]
    fn test_candidate_centered() {
        let grid = test_grid();
        // A quarter (4 units) centered on slot 10 starts two to the left
        let range = candidate_range(&grid, 10, 4).unwrap();
        assert_eq!(range.leftmost, 8);
        assert_eq!(range.rightmost(), 11);

        // Odd widths keep the extra slot on the right
        let range = candidate_range(&grid, 10, 3).unwrap();
        assert_eq!(range.leftmost, 9);
        assert_eq!(range.rightmost(), 11);
    }

    #[test]
    fn test_candidate_clamped_left() {
        let grid = test_grid();
        // Centered on the first column, the range would cross the row
        // start; it clamps to the row's first column
        let range = candidate_range(&grid, 0, 4).unwrap();
        assert_eq!(range.leftmost, 0);
        assert_eq!(range.rightmost(), 3);

        // Same on a lower row
        let range = candidate_range(&grid, 64, 8).unwrap();
        assert_eq!(range.leftmost, 64);
        assert_eq!(range.rightmost(), 71);
    }

    #[test]
    fn test_candidate_clamped_right() {
        let grid = test_grid();
        // Centered on the last column of row 0
        let range = candidate_range(&grid, 63, 4).unwrap();
        assert_eq!(range.rightmost(), 63);
        assert_eq!(range.leftmost, 60);

        // A whole note near the end of row 1 clamps to the row tail
        let range = candidate_range(&grid, 127, 16).unwrap();
        assert_eq!(range.rightmost(), 127);
        assert_eq!(range.leftmost, 112);
    }

    #[test]
    fn test_candidate_stays_in_row() {
        let grid = test_grid();
        for center in 0..grid.len() {
            for units in [1usize, 2, 3, 4, 6, 8, 12, 16] {
                let range = candidate_range(&grid, center, units).unwrap();
                assert_eq!(
                    grid.row_of(range.leftmost),
                    grid.row_of(range.rightmost()),
                    "range for center {} units {} crossed a row",
                    center,
                    units
                );
                assert_eq!(grid.row_of(range.leftmost), grid.row_of(center));
            }
        }
    }

    #[test]
    fn test_candidate_wider_than_row() {
        let config = StudioConfig {
            cols: 16,
            measure_len: 16,
            ..Default::default()
        };
        let layout = Layout::new(1280.0, 720.0, config.rows, config.cols, 40.0, 120.0);
        let grid = Grid::new(&config, &layout).unwrap();

        assert_eq!(candidate_range(&grid, 0, 32), None);
        assert!(candidate_range(&grid, 0, 16).is_some());
    }

    #[test]
    fn test_stripe_conflict_same_row() {
        let mut grid = test_grid();
        grid.claim_range(4, 4, 0);

        // Overlapping window in the same row conflicts
        assert!(stripe_occupied(&grid, SlotRange::new(6, 4)));
        // Disjoint columns do not
        assert!(!stripe_occupied(&grid, SlotRange::new(8, 4)));
    }

    #[test]
    fn test_stripe_conflict_across_rows() {
        let mut grid = test_grid();
        // Occupy columns 4..8 on row 3
        grid.claim_range(3 * 64 + 4, 4, 0);

        // The same column window on any other row conflicts
        assert!(stripe_occupied(&grid, SlotRange::new(4, 4)));
        assert!(stripe_occupied(&grid, SlotRange::new(10 * 64 + 4, 4)));
        // A window that merely touches one occupied column conflicts
        assert!(stripe_occupied(&grid, SlotRange::new(7, 2)));
        // A window in clear columns does not
        assert!(!stripe_occupied(&grid, SlotRange::new(8, 4)));
    }

    #[test]
    fn test_can_accept_requires_legal_start() {
        let grid = test_grid();
        // A quarter on the beat is accepted, off the beat rejected
        assert!(can_accept(&grid, SlotRange::new(4, 4)));
        assert!(!can_accept(&grid, SlotRange::new(5, 4)));
    }

    #[test]
    fn test_can_accept_rejects_occupied_stripe() {
        let mut grid = test_grid();
        assert!(can_accept(&grid, SlotRange::new(0, 4)));

        grid.claim_range(5 * 64, 4, 0);
        assert!(!can_accept(&grid, SlotRange::new(0, 4)));
    }

    #[test]
    fn test_no_overlap_between_accepted_ranges() {
        let mut grid = test_grid();
        grid.claim_range(0, 4, 0);
        grid.claim_range(8, 8, 1);

        // Every remaining acceptable range avoids both column stripes
        for start in 0..32 {
            let range = SlotRange::new(start, 4);
            if can_accept(&grid, range) {
                assert!(range.leftmost >= 4);
                assert!(range.rightmost() < 8 || range.leftmost >= 16);
            }
        }
    }
}
