// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Studio session controller.
//!
//! Owns every subsystem and drives one fixed update order per frame:
//! poll audio, arbitrate the gesture, clear transient grid state,
//! update the note blocks, then advance playback and fire triggers.
//! The frontend only delivers pointer state and a clock and draws the
//! result.

use std::path::Path;

use anyhow::Result;
use tracing::{debug, info};

use crate::audio::AudioPlayer;
use crate::config::{ConfigError, StudioConfig};
use crate::geometry::Layout;
use crate::grid::{Grid, NoteId};
use crate::input::{GestureArbiter, PointerState};
use crate::music::{sound_id, NoteDuration, Pitch};
use crate::note::NoteBlock;
use crate::playback::{compile, fire_due, stop_all, Playhead, TriggerEntry};
use crate::render::{draw_studio, ImageSurface};

/// The whole interactive session
pub struct Studio {
    config: StudioConfig,
    layout: Layout,
    grid: Grid,
    notes: Vec<NoteBlock>,
    arbiter: GestureArbiter,
    playhead: Playhead,
    sequence: Vec<TriggerEntry>,
    audio: Box<dyn AudioPlayer>,
}

impl Studio {
    /// Build a session from a validated configuration and an audio
    /// backend, preloading every sound the grid can produce
    pub fn new(config: StudioConfig, audio: Box<dyn AudioPlayer>) -> Result<Self, ConfigError> {
        config.validate()?;

        let layout = Layout::new(
            config.canvas_width,
            config.canvas_height,
            config.rows,
            config.cols,
            config.col_offset,
            config.row_offset,
        );
        let grid = Grid::new(&config, &layout)?;
        let durations = tray_durations(config.measure_len);
        let notes = build_notes(&layout, &durations, config.cols);
        let playhead = Playhead::new(
            layout.grid_start_x(),
            layout.grid_end_x(),
            config.bpm,
            config.beat_count(),
        );

        let mut studio = Self {
            config,
            layout,
            grid,
            notes,
            arbiter: GestureArbiter::new(),
            playhead,
            sequence: Vec::new(),
            audio,
        };
        studio.preload_sounds();
        Ok(studio)
    }

    /// Request every pitch/duration sound up front so placement never
    /// races a first load
    fn preload_sounds(&mut self) {
        for pitch in Pitch::ALL {
            for duration in tray_durations(self.config.measure_len) {
                self.audio.load(&sound_id(pitch, duration));
            }
        }
    }

    /// Session configuration
    pub fn config(&self) -> &StudioConfig {
        &self.config
    }

    /// Pixel layout
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Slot grid
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// All note blocks, tray templates and placed alike
    pub fn notes(&self) -> &[NoteBlock] {
        &self.notes
    }

    /// The sweep bar
    pub fn playhead(&self) -> &Playhead {
        &self.playhead
    }

    /// Compiled triggers from the last transition into playback
    pub fn sequence(&self) -> &[TriggerEntry] {
        &self.sequence
    }

    /// The note currently held by the pointer, if any
    pub fn dragged_note(&self) -> Option<NoteId> {
        self.arbiter.holder()
    }

    /// Whether blocks currently accept pointer input
    pub fn is_editing(&self) -> bool {
        self.playhead.is_paused() && self.playhead.at_start()
    }

    /// Advance the session one frame
    pub fn update(&mut self, pointer: &PointerState, now_ms: f64) {
        self.audio.tick();

        let editing = self.is_editing();
        for note in &mut self.notes {
            note.set_enabled(editing);
        }

        if pointer.release {
            self.arbiter.release();
        }

        self.grid.begin_frame();
        for note in &mut self.notes {
            note.update(pointer, &mut self.arbiter, &mut self.grid);
        }

        if !self.playhead.is_paused() {
            fire_due(&mut self.sequence, self.playhead.position(), &mut *self.audio);
        }
        // The playhead sees the clock every frame, running or not;
        // its frame delta must never span an idle stretch
        let completed = self.playhead.update(now_ms);
        if completed {
            // Entries at the right edge still owe a trigger
            fire_due(&mut self.sequence, self.playhead.end_x(), &mut *self.audio);
            info!("Playback pass complete");
        }
    }

    /// Compile the placed notes and start the sweep. A no-op while a
    /// pass is already running.
    pub fn play(&mut self) {
        if !self.playhead.is_paused() {
            return;
        }
        if self.playhead.at_start() {
            self.sequence = compile(&self.grid, &self.notes);
            debug!("Compiled {} triggers", self.sequence.len());
        }
        self.playhead.resume();
    }

    /// Stop every sounding note, clear the fired flags, and return the
    /// sweep to the left edge
    pub fn restart(&mut self) {
        self.playhead.reset();
        stop_all(&mut self.sequence, &mut *self.audio);
    }

    /// Return every block to the tray. Ignored while a pass is running.
    pub fn clear(&mut self) {
        if !self.is_editing() {
            return;
        }
        self.arbiter.release();
        for note in &mut self.notes {
            note.reset(&mut self.grid);
        }
        self.sequence.clear();
    }

    /// Rebuild the session around new grid dimensions and tempo. The
    /// placed arrangement does not survive; everything returns to the
    /// tray.
    pub fn reconfigure(
        &mut self,
        rows: usize,
        cols: usize,
        measure_len: usize,
        bpm: f64,
    ) -> Result<(), ConfigError> {
        let mut config = self.config.clone();
        config.rows = rows;
        config.cols = cols;
        config.measure_len = measure_len;
        config.bpm = bpm;
        config.validate()?;

        self.layout = Layout::new(
            config.canvas_width,
            config.canvas_height,
            config.rows,
            config.cols,
            config.col_offset,
            config.row_offset,
        );
        self.grid = Grid::new(&config, &self.layout)?;
        let durations = tray_durations(config.measure_len);
        self.notes = build_notes(&self.layout, &durations, config.cols);
        self.playhead = Playhead::new(
            self.layout.grid_start_x(),
            self.layout.grid_end_x(),
            config.bpm,
            config.beat_count(),
        );
        self.sequence.clear();
        self.arbiter = GestureArbiter::new();
        self.audio.set_tempo(config.bpm);
        self.config = config;
        self.preload_sounds();
        info!(
            "Reconfigured studio: {} rows, {} cols, {} bpm",
            self.config.rows, self.config.cols, self.config.bpm
        );
        Ok(())
    }

    /// Render the current scene to a PNG file
    pub fn export_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut surface = ImageSurface::new(
            self.config.canvas_width as u32,
            self.config.canvas_height as u32,
        );
        draw_studio(self, &mut surface);
        surface.save(path.as_ref())
    }
}

/// Durations offered in the tray. Blocks longer than one measure can
/// never be placed, so they are not offered.
fn tray_durations(measure_len: usize) -> Vec<NoteDuration> {
    NoteDuration::ALL
        .into_iter()
        .filter(|d| d.units() <= measure_len)
        .collect()
}

/// Build the pool of note blocks: a stack of copies per duration, all
/// homed at that duration's tray position, so the tray never runs dry
fn build_notes(layout: &Layout, durations: &[NoteDuration], cols: usize) -> Vec<NoteBlock> {
    let homes = layout.tray_positions(durations);
    let copies = cols + 2;

    let mut notes = Vec::with_capacity(durations.len() * copies);
    for (duration, home) in durations.iter().zip(homes) {
        for _ in 0..copies {
            notes.push(NoteBlock::new(notes.len(), *duration, home));
        }
    }
    notes
}
