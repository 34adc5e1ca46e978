// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Audio capability for the studio.
//!
//! This module provides:
//! - The injected `AudioPlayer` interface consumed by playback, with
//!   explicit per-call sound identifiers
//! - A cpal-backed tone sampler implementation
//! - A silent player for headless runs

pub mod sampler;

pub use sampler::ToneSampler;

/// Audio playback capability.
///
/// Loading is asynchronous and fire-and-forget; a play request for a
/// sound that is still loading must be queued and replayed once the
/// load completes. Load failures are non-fatal: the sound simply
/// never fires.
pub trait AudioPlayer {
    /// Begin loading a sound
    fn load(&mut self, sound_id: &str);

    /// Play a sound, or queue it if still loading
    fn play(&mut self, sound_id: &str);

    /// Stop a sound if it is currently sounding
    fn stop(&mut self, sound_id: &str);

    /// Per-frame poll hook for asynchronous load completion
    fn tick(&mut self) {}

    /// Adopt a new session tempo; sounds loaded afterwards use it
    fn set_tempo(&mut self, _bpm: f64) {}
}

/// Silent player for headless sessions and tooling
#[derive(Debug, Default)]
pub struct NullPlayer;

impl AudioPlayer for NullPlayer {
    fn load(&mut self, _sound_id: &str) {}

    fn play(&mut self, _sound_id: &str) {}

    fn stop(&mut self, _sound_id: &str) {}
}

/// Audio subsystem errors
#[derive(Debug)]
pub enum AudioError {
    /// No audio device available
    NoDevice,
    /// Device offers no supported sample format
    UnsupportedFormat,
    /// Failed to build or start the output stream
    StreamFailed(String),
}

impl std::fmt::Display for AudioError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AudioError::NoDevice => write!(f, "No audio device available"),
            AudioError::UnsupportedFormat => write!(f, "No supported output sample format"),
            AudioError::StreamFailed(msg) => write!(f, "Audio stream failed: {}", msg),
        }
    }
}

impl std::error::Error for AudioError {}
