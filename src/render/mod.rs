// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Rendering of the studio onto an opaque 2D surface.
//!
//! The studio core never draws directly; frontends implement the
//! `Surface` trait and the routines here describe the scene: slot
//! highlights, grid rules, pitch labels, note blocks, and the
//! playhead bar.

pub mod raster;

pub use raster::ImageSurface;

use crate::geometry::Rect;
use crate::studio::Studio;

/// RGBA color, straight alpha
pub type Rgba = [u8; 4];

const BLACK: Rgba = [0, 0, 0, 255];

/// Opaque 2D drawing capability implemented by frontends
pub trait Surface {
    /// Fill a rectangle, blending by alpha
    fn fill_rect(&mut self, rect: Rect, color: Rgba);

    /// Stroke an axis-aligned line of the given width
    fn stroke_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, width: f32, color: Rgba);

    /// Draw centered text; raster exports may ignore this
    fn draw_text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Rgba);
}

/// Draw the whole studio scene
pub fn draw_studio(studio: &Studio, surface: &mut dyn Surface) {
    draw_slots(studio, surface);
    draw_pitch_labels(studio, surface);
    draw_notes(studio, surface);
    draw_grid_rules(studio, surface);
    draw_playhead(studio, surface);
}

/// Slot interiors (transient highlights) and their bottom edges
fn draw_slots(studio: &Studio, surface: &mut dyn Surface) {
    for slot in studio.grid().slots() {
        surface.fill_rect(slot.rect, slot.highlight.rgba());
        surface.stroke_line(
            slot.rect.min_x,
            slot.rect.max_y(),
            slot.rect.max_x(),
            slot.rect.max_y(),
            1.0,
            BLACK,
        );
    }
}

/// Letter labels along the left margin, one per pitch row
fn draw_pitch_labels(studio: &Studio, surface: &mut dyn Surface) {
    let layout = studio.layout();
    for row in 0..studio.grid().rows() {
        let Some(slot) = studio.grid().slot(row * studio.grid().cols()) else {
            continue;
        };
        surface.draw_text(
            &slot.pitch.letter().to_string(),
            layout.col_offset / 2.0,
            slot.rect.min_y + layout.slot_height / 2.0,
            layout.slot_height,
            BLACK,
        );
    }
}

/// Note blocks; the dragged block is drawn last so it sits on top
fn draw_notes(studio: &Studio, surface: &mut dyn Surface) {
    let dragged = studio.dragged_note();
    for note in studio.notes() {
        if Some(note.id()) == dragged {
            continue;
        }
        draw_note(note.rect(), note.duration().color(), note.alpha(), surface);
    }
    if let Some(id) = dragged {
        if let Some(note) = studio.notes().get(id) {
            draw_note(note.rect(), note.duration().color(), note.alpha(), surface);
        }
    }
}

fn draw_note(rect: Rect, color: [u8; 3], alpha: f32, surface: &mut dyn Surface) {
    let a = (alpha.clamp(0.0, 1.0) * 255.0) as u8;
    surface.fill_rect(rect, [color[0], color[1], color[2], a]);
}

/// Top rule, heavy start/end and measure lines, lighter half-measure
/// lines
fn draw_grid_rules(studio: &Studio, surface: &mut dyn Surface) {
    let layout = studio.layout();
    let top = layout.grid_top_y();
    let bottom = layout.grid_bottom_y();
    let measure_len = studio.grid().measure_len();
    let cols = studio.grid().cols();

    surface.stroke_line(
        layout.grid_start_x(),
        top,
        layout.grid_end_x(),
        top,
        1.0,
        BLACK,
    );
    surface.stroke_line(layout.grid_start_x(), top, layout.grid_start_x(), bottom, 4.0, BLACK);
    surface.stroke_line(layout.grid_end_x(), top, layout.grid_end_x(), bottom, 4.0, BLACK);

    for i in 1..cols / measure_len {
        let x = layout.grid_start_x() + i as f32 * layout.slot_width * measure_len as f32;
        surface.stroke_line(x, top, x, bottom, 4.0, BLACK);
    }
    for i in 1..cols / 4 {
        let x = layout.grid_start_x() + i as f32 * layout.slot_width * 4.0;
        surface.stroke_line(x, top, x, bottom, 2.0, BLACK);
    }
}

/// The sweeping playback bar
fn draw_playhead(studio: &Studio, surface: &mut dyn Surface) {
    let layout = studio.layout();
    let mut rect = layout.playhead_rect();
    rect.min_x = studio.playhead().position();
    surface.fill_rect(rect, [255, 0, 0, 255]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::NullPlayer;
    use crate::config::StudioConfig;

    /// Surface that records draw calls for assertions
    #[derive(Default)]
    struct RecordingSurface {
        fills: Vec<(Rect, Rgba)>,
        lines: Vec<(f32, f32, f32, f32, f32)>,
        texts: Vec<String>,
    }

    impl Surface for RecordingSurface {
        fn fill_rect(&mut self, rect: Rect, color: Rgba) {
            self.fills.push((rect, color));
        }

        fn stroke_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, width: f32, _color: Rgba) {
            self.lines.push((x0, y0, x1, y1, width));
        }

        fn draw_text(&mut self, text: &str, _x: f32, _y: f32, _size: f32, _color: Rgba) {
            self.texts.push(text.to_string());
        }
    }

    #[test]
    fn test_scene_draw_counts() {
        let studio = Studio::new(StudioConfig::default(), Box::new(NullPlayer)).unwrap();
        let mut surface = RecordingSurface::default();
        draw_studio(&studio, &mut surface);

        // One fill per slot, one per note, one for the playhead
        let expected_fills = studio.grid().len() + studio.notes().len() + 1;
        assert_eq!(surface.fills.len(), expected_fills);

        // One label per pitch row
        assert_eq!(surface.texts.len(), studio.grid().rows());
        assert_eq!(surface.texts[0], "C");
    }

    #[test]
    fn test_playhead_drawn_at_position() {
        let mut studio = Studio::new(StudioConfig::default(), Box::new(NullPlayer)).unwrap();
        studio.update(&crate::input::PointerState::idle(0.0, 0.0), 0.0);

        let mut surface = RecordingSurface::default();
        draw_studio(&studio, &mut surface);

        let playhead_fill = surface.fills.last().unwrap();
        assert_eq!(playhead_fill.0.min_x, studio.playhead().position());
        assert_eq!(playhead_fill.1, [255, 0, 0, 255]);
    }

    #[test]
    fn test_measure_lines_present() {
        // 64 columns at measure 16: three interior measure lines,
        // fifteen interior beat lines
        let studio = Studio::new(StudioConfig::default(), Box::new(NullPlayer)).unwrap();
        let mut surface = RecordingSurface::default();
        draw_grid_rules(&studio, &mut surface);

        let heavy = surface.lines.iter().filter(|l| l.4 == 4.0).count();
        assert_eq!(heavy, 5); // start, end, three measure boundaries

        let medium = surface.lines.iter().filter(|l| l.4 == 2.0).count();
        assert_eq!(medium, 15);
    }

    #[test]
    fn test_neutral_slots_are_transparent() {
        let studio = Studio::new(StudioConfig::default(), Box::new(NullPlayer)).unwrap();
        let mut surface = RecordingSurface::default();
        draw_slots(&studio, &mut surface);
        assert!(surface.fills.iter().all(|(_, c)| c[3] == 0));
    }
}
