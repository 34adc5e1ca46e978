// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Playback engine for the studio.
//!
//! This module provides:
//! - The playhead: a frame-delta-driven constant-speed sweep across
//!   the grid with pause/resume/reset semantics
//! - The sequence compiler: flattens placed notes into an ordered
//!   trigger list with at-most-once firing

pub mod playhead;
pub mod sequence;

pub use playhead::Playhead;
pub use sequence::{compile, fire_due, stop_all, TriggerEntry};
