// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Geometry primitives and studio layout.
//!
//! This module provides:
//! - Point and axis-aligned rectangle types with the intersection test
//!   used by every interactive element
//! - The pixel layout of the studio, scaled against a 1280x720
//!   reference canvas

use crate::music::NoteDuration;

/// Reference canvas width all layout constants are expressed against
pub const REFERENCE_WIDTH: f32 = 1280.0;

/// Reference canvas height all layout constants are expressed against
pub const REFERENCE_HEIGHT: f32 = 720.0;

/// A point in canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Create a new point
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge
    pub min_x: f32,
    /// Top edge
    pub min_y: f32,
    /// Width in pixels
    pub width: f32,
    /// Height in pixels
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle from its top-left corner and size
    pub fn new(min_x: f32, min_y: f32, width: f32, height: f32) -> Self {
        Self {
            min_x,
            min_y,
            width,
            height,
        }
    }

    /// Right edge
    pub fn max_x(&self) -> f32 {
        self.min_x + self.width
    }

    /// Bottom edge
    pub fn max_y(&self) -> f32 {
        self.min_y + self.height
    }

    /// Center point
    pub fn center(&self) -> Point {
        Point::new(self.min_x + self.width / 2.0, self.min_y + self.height / 2.0)
    }

    /// Test whether a point lies inside the rectangle (edges inclusive)
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min_x && p.x <= self.max_x() && p.y >= self.min_y && p.y <= self.max_y()
    }

    /// Move the rectangle so its top-left corner is at the given point
    pub fn move_to(&mut self, x: f32, y: f32) {
        self.min_x = x;
        self.min_y = y;
    }

    /// Move the rectangle so its center is at the given point
    pub fn center_on(&mut self, p: Point) {
        self.min_x = p.x - self.width / 2.0;
        self.min_y = p.y - self.height / 2.0;
    }
}

/// Pixel layout of the studio for a given canvas and grid size
#[derive(Debug, Clone)]
pub struct Layout {
    /// Canvas width in pixels
    pub canvas_width: f32,
    /// Canvas height in pixels
    pub canvas_height: f32,
    /// Horizontal scale factor relative to the reference canvas
    pub x_scale: f32,
    /// Vertical scale factor relative to the reference canvas
    pub y_scale: f32,
    /// Horizontal margin on either side of the grid
    pub col_offset: f32,
    /// Vertical margin above the grid
    pub row_offset: f32,
    /// Width of one slot
    pub slot_width: f32,
    /// Height of one slot
    pub slot_height: f32,
    /// Pitch rows in the grid
    pub rows: usize,
    /// Time columns in the grid
    pub cols: usize,
}

impl Layout {
    /// Compute the layout for a canvas and grid size. Offsets are given
    /// in reference-canvas pixels and scaled to the actual canvas.
    pub fn new(
        canvas_width: f32,
        canvas_height: f32,
        rows: usize,
        cols: usize,
        col_offset: f32,
        row_offset: f32,
    ) -> Self {
        let x_scale = canvas_width / REFERENCE_WIDTH;
        let y_scale = canvas_height / REFERENCE_HEIGHT;
        let col_offset = x_scale * col_offset;
        let row_offset = y_scale * row_offset;
        let slot_width = (canvas_width - 2.0 * col_offset) / cols as f32;
        let slot_height = (canvas_height - 2.0 * row_offset) / rows as f32;

        Self {
            canvas_width,
            canvas_height,
            x_scale,
            y_scale,
            col_offset,
            row_offset,
            slot_width,
            slot_height,
            rows,
            cols,
        }
    }

    /// Rectangle of the slot at a row-major index
    pub fn slot_rect(&self, index: usize) -> Rect {
        let row = index / self.cols;
        let col = index % self.cols;
        Rect::new(
            self.col_offset + col as f32 * self.slot_width,
            self.row_offset + row as f32 * self.slot_height,
            self.slot_width,
            self.slot_height,
        )
    }

    /// Left edge of the grid (playhead start)
    pub fn grid_start_x(&self) -> f32 {
        self.col_offset
    }

    /// Right edge of the grid (playhead end)
    pub fn grid_end_x(&self) -> f32 {
        self.canvas_width - self.col_offset
    }

    /// Top edge of the grid
    pub fn grid_top_y(&self) -> f32 {
        self.row_offset
    }

    /// Bottom edge of the grid
    pub fn grid_bottom_y(&self) -> f32 {
        self.row_offset + self.rows as f32 * self.slot_height
    }

    /// Rectangle of the playhead bar at its start position
    pub fn playhead_rect(&self) -> Rect {
        Rect::new(
            self.grid_start_x(),
            self.grid_top_y(),
            self.x_scale * 3.0,
            self.slot_height * self.rows as f32,
        )
    }

    /// Home positions for the tray of draggable duration templates.
    ///
    /// Templates sit in a row along the bottom of the canvas; the
    /// leftover width after all block widths is distributed evenly
    /// across the gaps between them. When the blocks alone exceed the
    /// tray width the gaps collapse to zero, so templates may run off
    /// the right edge but never overlap one another.
    pub fn tray_positions(&self, durations: &[NoteDuration]) -> Vec<Rect> {
        let tray_min_x = self.x_scale * 20.0;
        let tray_max_x = self.canvas_width - tray_min_x;
        let tray_y = self.y_scale * 660.0;

        let total_units: usize = durations.iter().map(|d| d.units()).sum();
        let gaps = durations.len().saturating_sub(1).max(1) as f32;
        let separation =
            (((tray_max_x - tray_min_x) - total_units as f32 * self.slot_width) / gaps).max(0.0);

        let mut rects = Vec::with_capacity(durations.len());
        let mut offset_units = 0usize;
        for (i, duration) in durations.iter().enumerate() {
            let x = tray_min_x + offset_units as f32 * self.slot_width + i as f32 * separation;
            rects.push(Rect::new(
                x,
                tray_y,
                duration.units() as f32 * self.slot_width,
                self.slot_height,
            ));
            offset_units += duration.units();
        }
        rects
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains() {
        let rect = Rect::new(10.0, 10.0, 20.0, 10.0);

        assert!(rect.contains(Point::new(10.0, 10.0))); // corner inclusive
        assert!(rect.contains(Point::new(30.0, 20.0))); // far corner inclusive
        assert!(rect.contains(Point::new(15.0, 15.0)));
        assert!(!rect.contains(Point::new(9.9, 15.0)));
        assert!(!rect.contains(Point::new(15.0, 20.1)));
    }

    #[test]
    fn test_rect_center() {
        let rect = Rect::new(0.0, 0.0, 10.0, 20.0);
        assert_eq!(rect.center(), Point::new(5.0, 10.0));
    }

    #[test]
    fn test_center_on() {
        let mut rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        rect.center_on(Point::new(50.0, 50.0));
        assert_eq!(rect.min_x, 45.0);
        assert_eq!(rect.min_y, 45.0);
    }

    #[test]
    fn test_layout_slot_grid() {
        let layout = Layout::new(1280.0, 720.0, 15, 32, 40.0, 120.0);

        assert_eq!(layout.x_scale, 1.0);
        assert_eq!(layout.y_scale, 1.0);
        assert_eq!(layout.slot_width, (1280.0 - 80.0) / 32.0);

        // First slot at the grid origin
        let first = layout.slot_rect(0);
        assert_eq!(first.min_x, 40.0);
        assert_eq!(first.min_y, 120.0);

        // Second row starts one slot height down
        let below = layout.slot_rect(32);
        assert_eq!(below.min_x, 40.0);
        assert_eq!(below.min_y, 120.0 + layout.slot_height);
    }

    #[test]
    fn test_layout_scales_with_canvas() {
        let layout = Layout::new(2560.0, 1440.0, 15, 32, 40.0, 120.0);
        assert_eq!(layout.x_scale, 2.0);
        assert_eq!(layout.y_scale, 2.0);
        assert_eq!(layout.col_offset, 80.0);
        assert_eq!(layout.grid_end_x(), 2560.0 - 80.0);
    }

    #[test]
    fn test_tray_positions_spacing() {
        let layout = Layout::new(1280.0, 720.0, 15, 64, 40.0, 120.0);
        let rects = layout.tray_positions(&NoteDuration::ALL);

        assert_eq!(rects.len(), 8);
        // Blocks are laid out left to right without overlap, with a
        // real gap between neighbors
        for pair in rects.windows(2) {
            assert!(pair[1].min_x > pair[0].max_x());
        }
        // The row starts at the tray margin and fits the canvas
        assert!(rects[0].min_x >= 20.0);
        assert!(rects[7].max_x() <= 1280.0 - 20.0 + 0.001);
        // Widths follow the duration units
        assert_eq!(rects[0].width, layout.slot_width);
        assert_eq!(rects[7].width, 16.0 * layout.slot_width);
    }

    #[test]
    fn test_tray_cramped_layout_never_overlaps() {
        // With few columns the slots are wide and the blocks alone
        // exceed the tray width; the gaps collapse instead of going
        // negative
        let layout = Layout::new(1280.0, 720.0, 15, 16, 40.0, 120.0);
        let rects = layout.tray_positions(&NoteDuration::ALL);

        assert!(rects[0].min_x >= 20.0);
        for pair in rects.windows(2) {
            assert!(pair[1].min_x >= pair[0].max_x());
        }
    }
}
