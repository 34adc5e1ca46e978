// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Pitch and rhythm vocabulary for the studio.
//!
//! Provides the fixed diatonic pitch sequence backing the grid rows,
//! the eight rhythmic duration values offered as draggable blocks,
//! and the sound identifier format consumed by the audio capability.

use serde::{Deserialize, Serialize};

/// One of the fifteen diatonic pitches spanning C3..C5
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pitch {
    C3,
    D3,
    E3,
    F3,
    G3,
    A3,
    B3,
    C4,
    D4,
    E4,
    F4,
    G4,
    A4,
    B4,
    C5,
}

impl Pitch {
    /// All pitches in ascending order
    pub const ALL: [Pitch; 15] = [
        Pitch::C3,
        Pitch::D3,
        Pitch::E3,
        Pitch::F3,
        Pitch::G3,
        Pitch::A3,
        Pitch::B3,
        Pitch::C4,
        Pitch::D4,
        Pitch::E4,
        Pitch::F4,
        Pitch::G4,
        Pitch::A4,
        Pitch::B4,
        Pitch::C5,
    ];

    /// Token used in sound identifiers (e.g. "C3")
    pub fn as_str(self) -> &'static str {
        match self {
            Pitch::C3 => "C3",
            Pitch::D3 => "D3",
            Pitch::E3 => "E3",
            Pitch::F3 => "F3",
            Pitch::G3 => "G3",
            Pitch::A3 => "A3",
            Pitch::B3 => "B3",
            Pitch::C4 => "C4",
            Pitch::D4 => "D4",
            Pitch::E4 => "E4",
            Pitch::F4 => "F4",
            Pitch::G4 => "G4",
            Pitch::A4 => "A4",
            Pitch::B4 => "B4",
            Pitch::C5 => "C5",
        }
    }

    /// Letter name for row labels
    pub fn letter(self) -> char {
        self.as_str().chars().next().unwrap_or('?')
    }

    /// Fundamental frequency in Hz (equal temperament, A4 = 440)
    pub fn frequency(self) -> f32 {
        match self {
            Pitch::C3 => 130.81,
            Pitch::D3 => 146.83,
            Pitch::E3 => 164.81,
            Pitch::F3 => 174.61,
            Pitch::G3 => 196.00,
            Pitch::A3 => 220.00,
            Pitch::B3 => 246.94,
            Pitch::C4 => 261.63,
            Pitch::D4 => 293.66,
            Pitch::E4 => 329.63,
            Pitch::F4 => 349.23,
            Pitch::G4 => 392.00,
            Pitch::A4 => 440.00,
            Pitch::B4 => 493.88,
            Pitch::C5 => 523.25,
        }
    }

    /// Pitch for a grid row. Row 0 is the top of the grid, so the
    /// mapping runs high to low (row 0 = C5).
    pub fn for_row(row: usize) -> Option<Pitch> {
        let last = Pitch::ALL.len() - 1;
        if row > last {
            return None;
        }
        Some(Pitch::ALL[last - row])
    }

    /// Parse a pitch token (e.g. "G4")
    pub fn parse(s: &str) -> Option<Pitch> {
        Pitch::ALL.iter().copied().find(|p| p.as_str() == s)
    }
}

/// One of the eight rhythmic duration values, measured in grid units
/// (a unit is one sixteenth note)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NoteDuration {
    Sixteenth,
    Eighth,
    DottedEighth,
    Quarter,
    DottedQuarter,
    Half,
    DottedHalf,
    Whole,
}

impl NoteDuration {
    /// All durations in ascending length
    pub const ALL: [NoteDuration; 8] = [
        NoteDuration::Sixteenth,
        NoteDuration::Eighth,
        NoteDuration::DottedEighth,
        NoteDuration::Quarter,
        NoteDuration::DottedQuarter,
        NoteDuration::Half,
        NoteDuration::DottedHalf,
        NoteDuration::Whole,
    ];

    /// Width in grid units
    pub fn units(self) -> usize {
        match self {
            NoteDuration::Sixteenth => 1,
            NoteDuration::Eighth => 2,
            NoteDuration::DottedEighth => 3,
            NoteDuration::Quarter => 4,
            NoteDuration::DottedQuarter => 6,
            NoteDuration::Half => 8,
            NoteDuration::DottedHalf => 12,
            NoteDuration::Whole => 16,
        }
    }

    /// Token used in sound identifiers
    pub fn name(self) -> &'static str {
        match self {
            NoteDuration::Sixteenth => "16th",
            NoteDuration::Eighth => "8th",
            NoteDuration::DottedEighth => "dotted8th",
            NoteDuration::Quarter => "4th",
            NoteDuration::DottedQuarter => "dotted4th",
            NoteDuration::Half => "half",
            NoteDuration::DottedHalf => "dottedhalf",
            NoteDuration::Whole => "whole",
        }
    }

    /// Block color as RGB
    pub fn color(self) -> [u8; 3] {
        match self {
            NoteDuration::Sixteenth => [103, 0, 255],
            NoteDuration::Eighth => [208, 69, 233],
            NoteDuration::DottedEighth => [0, 104, 255],
            NoteDuration::Quarter => [0, 195, 255],
            NoteDuration::DottedQuarter => [17, 207, 17],
            NoteDuration::Half => [255, 255, 0],
            NoteDuration::DottedHalf => [255, 185, 0],
            NoteDuration::Whole => [255, 23, 0],
        }
    }

    /// Length in beats (four units to the beat)
    pub fn beats(self) -> f64 {
        self.units() as f64 / 4.0
    }

    /// Parse a duration token (e.g. "dotted8th")
    pub fn parse(s: &str) -> Option<NoteDuration> {
        NoteDuration::ALL.iter().copied().find(|d| d.name() == s)
    }
}

/// Sound identifier for a pitch and duration, e.g. "C34th"
pub fn sound_id(pitch: Pitch, duration: NoteDuration) -> String {
    format!("{}{}", pitch.as_str(), duration.name())
}

/// Split a sound identifier back into its pitch and duration tokens
pub fn parse_sound_id(id: &str) -> Option<(Pitch, NoteDuration)> {
    let pitch = Pitch::parse(id.get(..2)?)?;
    let duration = NoteDuration::parse(id.get(2..)?)?;
    Some((pitch, duration))
}
