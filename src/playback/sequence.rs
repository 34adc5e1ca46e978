// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Sequence compiler and trigger firing.
//!
//! Converts placed notes into a flat ordered list of (sound id,
//! trigger position) pairs consumed by the playhead. Firing is
//! position-comparison driven, not time-sorted: an entry fires the
//! first frame the playhead position reaches its trigger position and
//! never again until an explicit restart.

use crate::audio::AudioPlayer;
use crate::grid::Grid;
use crate::music::sound_id;
use crate::note::NoteBlock;

/// One compiled playback trigger
#[derive(Debug, Clone, PartialEq)]
pub struct TriggerEntry {
    /// Sound identifier, pitch token plus duration token
    pub sound_id: String,
    /// Sweep position at which the entry fires
    pub trigger_x: f32,
    /// Whether the entry has fired on the current pass
    pub fired: bool,
}

/// Compile the trigger list from the grid's leftmost back-references.
///
/// Scans columns outer, rows inner; ordering only affects scan order,
/// not firing correctness. Must be recomputed on every transition into
/// playback, never cached across edits.
pub fn compile(grid: &Grid, notes: &[NoteBlock]) -> Vec<TriggerEntry> {
    let mut sequence = Vec::new();
    for col in 0..grid.cols() {
        for row in 0..grid.rows() {
            let Some(slot) = grid.slot(row * grid.cols() + col) else {
                continue;
            };
            let Some(note_id) = slot.contained_note else {
                continue;
            };
            let Some(note) = notes.get(note_id) else {
                continue;
            };
            sequence.push(TriggerEntry {
                sound_id: sound_id(slot.pitch, note.duration()),
                trigger_x: slot.rect.min_x,
                fired: false,
            });
        }
    }
    sequence
}

/// Fire every entry whose trigger position the sweep has reached and
/// that has not fired on this pass
pub fn fire_due(sequence: &mut [TriggerEntry], position: f32, audio: &mut dyn AudioPlayer) {
    for entry in sequence.iter_mut() {
        if !entry.fired && position >= entry.trigger_x {
            audio.play(&entry.sound_id);
            entry.fired = true;
        }
    }
}

/// Stop every compiled sound and clear the fired flags (restart)
pub fn stop_all(sequence: &mut [TriggerEntry], audio: &mut dyn AudioPlayer) {
    for entry in sequence.iter_mut() {
        audio.stop(&entry.sound_id);
        entry.fired = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StudioConfig;
    use crate::geometry::{Layout, Rect};
    use crate::music::NoteDuration;

    #[derive(Default)]
    struct RecordingPlayer {
        played: Vec<String>,
        stopped: Vec<String>,
    }

    impl AudioPlayer for RecordingPlayer {
        fn load(&mut self, _sound_id: &str) {}

        fn play(&mut self, sound_id: &str) {
            self.played.push(sound_id.to_string());
        }

        fn stop(&mut self, sound_id: &str) {
            self.stopped.push(sound_id.to_string());
        }
    }

    fn test_grid() -> Grid {
        let config = StudioConfig::default();
        let layout = Layout::new(1280.0, 720.0, config.rows, config.cols, 40.0, 120.0);
        Grid::new(&config, &layout).unwrap()
    }

    fn placed_note(id: usize, duration: NoteDuration, grid: &mut Grid, leftmost: usize) -> NoteBlock {
        let note = NoteBlock::new(id, duration, Rect::new(20.0, 660.0, 40.0, 10.0));
        grid.claim_range(leftmost, duration.units(), id);
        note
    }

    #[test]
    fn test_compile_empty_grid() {
        let grid = test_grid();
        assert!(compile(&grid, &[]).is_empty());
    }

    #[test]
    fn test_compile_scan_order_and_ids() {
        let mut grid = test_grid();
        let notes = vec![
            placed_note(0, NoteDuration::Quarter, &mut grid, 8), // row 0 (C5), col 8
            placed_note(1, NoteDuration::Eighth, &mut grid, 7 * 64), // row 7 (C4), col 0
        ];

        let sequence = compile(&grid, &notes);
        assert_eq!(sequence.len(), 2);

        // Columns outer: the col-0 note comes first
        assert_eq!(sequence[0].sound_id, "C48th");
        assert_eq!(sequence[1].sound_id, "C54th");
        assert_eq!(
            sequence[0].trigger_x,
            grid.slot(7 * 64).unwrap().rect.min_x
        );
        assert!(!sequence[0].fired);
    }

    #[test]
    fn test_only_leftmost_slot_emits() {
        let mut grid = test_grid();
        let notes = vec![placed_note(0, NoteDuration::Whole, &mut grid, 0)];

        // Sixteen occupied slots, one back-reference, one entry
        let sequence = compile(&grid, &notes);
        assert_eq!(sequence.len(), 1);
        assert_eq!(sequence[0].sound_id, "C5whole");
    }

    #[test]
    fn test_fire_due_at_most_once() {
        let mut sequence = vec![TriggerEntry {
            sound_id: "C34th".to_string(),
            trigger_x: 100.0,
            fired: false,
        }];
        let mut audio = RecordingPlayer::default();

        fire_due(&mut sequence, 50.0, &mut audio);
        assert!(audio.played.is_empty());

        fire_due(&mut sequence, 100.0, &mut audio);
        fire_due(&mut sequence, 150.0, &mut audio);
        assert_eq!(audio.played, vec!["C34th".to_string()]);
        assert!(sequence[0].fired);
    }

    #[test]
    fn test_fire_order_independent_of_scan_order() {
        // Entries out of positional order still fire correctly
        let mut sequence = vec![
            TriggerEntry {
                sound_id: "late".to_string(),
                trigger_x: 200.0,
                fired: false,
            },
            TriggerEntry {
                sound_id: "early".to_string(),
                trigger_x: 100.0,
                fired: false,
            },
        ];
        let mut audio = RecordingPlayer::default();

        fire_due(&mut sequence, 120.0, &mut audio);
        assert_eq!(audio.played, vec!["early".to_string()]);

        fire_due(&mut sequence, 250.0, &mut audio);
        assert_eq!(audio.played, vec!["early".to_string(), "late".to_string()]);
    }

    #[test]
    fn test_stop_all_clears_fired() {
        let mut sequence = vec![
            TriggerEntry {
                sound_id: "a".to_string(),
                trigger_x: 0.0,
                fired: true,
            },
            TriggerEntry {
                sound_id: "b".to_string(),
                trigger_x: 10.0,
                fired: false,
            },
        ];
        let mut audio = RecordingPlayer::default();

        stop_all(&mut sequence, &mut audio);
        assert_eq!(audio.stopped, vec!["a".to_string(), "b".to_string()]);
        assert!(sequence.iter().all(|e| !e.fired));
    }
}
