// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! GRIDSTEP - Grid Step Sequencer
//!
//! An interactive step sequencer built around a pitch/time slot grid.
//! Note blocks are dragged from a tray and snapped into the grid under
//! rhythmic legality and collision rules; a playhead sweeps the grid
//! and fires the placed notes through an injected audio backend.
//!
//! The crate is frontend-agnostic: a host delivers normalized pointer
//! state and a millisecond clock to [`studio::Studio::update`] and
//! draws the scene through the [`render::Surface`] trait.

pub mod audio;
pub mod config;
pub mod geometry;
pub mod grid;
pub mod input;
pub mod music;
pub mod note;
pub mod playback;
pub mod render;
pub mod studio;

pub use audio::{AudioPlayer, NullPlayer, ToneSampler};
pub use config::StudioConfig;
pub use input::PointerState;
pub use studio::Studio;
