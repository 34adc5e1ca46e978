// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Playhead model.
//!
//! A single marker sweeping the grid left to right at a constant
//! speed derived from the tempo, so one full traversal takes exactly
//! the configured beat count. Motion is frame-delta based and
//! therefore frame-rate independent.

/// The moving playback marker
#[derive(Debug, Clone)]
pub struct Playhead {
    start_x: f32,
    end_x: f32,
    position: f32,
    /// Pixels per millisecond
    speed: f32,
    paused: bool,
    last_update_ms: Option<f64>,
}

impl Playhead {
    /// Create a paused playhead at the grid start. Speed is derived
    /// so that traversing `end_x - start_x` takes `beat_count` beats
    /// at `bpm`.
    pub fn new(start_x: f32, end_x: f32, bpm: f64, beat_count: usize) -> Self {
        let traversal_secs = 60.0 * beat_count as f64 / bpm;
        let speed = ((end_x - start_x) as f64 / (traversal_secs * 1000.0)) as f32;

        Self {
            start_x,
            end_x,
            position: start_x,
            speed,
            paused: true,
            last_update_ms: None,
        }
    }

    /// Current sweep position
    pub fn position(&self) -> f32 {
        self.position
    }

    /// Start of the sweep
    pub fn start_x(&self) -> f32 {
        self.start_x
    }

    /// End of the sweep
    pub fn end_x(&self) -> f32 {
        self.end_x
    }

    /// Speed in pixels per millisecond
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Whether the playhead is paused
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Whether the playhead sits at its start position
    pub fn at_start(&self) -> bool {
        self.position == self.start_x
    }

    /// Resume the sweep
    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Force the playhead back to the start, paused
    pub fn reset(&mut self) {
        self.position = self.start_x;
        self.paused = true;
    }

    /// Advance by the time elapsed since the previous update. Must be
    /// called every frame: while paused it only refreshes the clock
    /// baseline. Returns true when the sweep reached the end this
    /// frame; the position is then reset to the start and the playhead
    /// pauses.
    pub fn update(&mut self, now_ms: f64) -> bool {
        let dt = match self.last_update_ms {
            Some(last) => (now_ms - last).max(0.0),
            None => 0.0,
        };
        self.last_update_ms = Some(now_ms);

        if self.paused {
            return false;
        }

        self.position = (self.position + self.speed * dt as f32).min(self.end_x);
        if self.position >= self.end_x {
            self.reset();
            return true;
        }
        false
    }
}
