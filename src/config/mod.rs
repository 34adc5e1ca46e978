// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Configuration system for GRIDSTEP.
//!
//! Provides the studio configuration (canvas size, grid dimensions,
//! time signature subdivision and tempo), YAML load/save, and the
//! validation that rejects grids the engine cannot lay out.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::music::Pitch;

/// Validation failures for a studio configuration
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("column count {cols} is not divisible by measure length {measure_len}")]
    ColumnsNotDivisible { cols: usize, measure_len: usize },
    #[error("column count must be at least one measure ({measure_len}), got {cols}")]
    TooFewColumns { cols: usize, measure_len: usize },
    #[error("measure length must be a positive multiple of 4, got {0}")]
    BadMeasureLength(usize),
    #[error("row count must be between 1 and {max}, got {rows}")]
    BadRowCount { rows: usize, max: usize },
    #[error("tempo must be between 20 and 300 BPM, got {0}")]
    BadTempo(f64),
    #[error("canvas size must be positive, got {width}x{height}")]
    BadCanvas { width: f32, height: f32 },
}

/// Studio configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StudioConfig {
    /// Canvas width in pixels
    #[serde(default = "default_canvas_width")]
    pub canvas_width: f32,
    /// Canvas height in pixels
    #[serde(default = "default_canvas_height")]
    pub canvas_height: f32,
    /// Pitch rows in the grid (at most one per pitch in the sequence)
    #[serde(default = "default_rows")]
    pub rows: usize,
    /// Time columns in the grid, one per sixteenth-note unit
    #[serde(default = "default_cols")]
    pub cols: usize,
    /// Horizontal grid margin in reference-canvas pixels
    #[serde(default = "default_col_offset")]
    pub col_offset: f32,
    /// Vertical grid margin in reference-canvas pixels
    #[serde(default = "default_row_offset")]
    pub row_offset: f32,
    /// Columns per measure (time-signature subdivision)
    #[serde(default = "default_measure_len")]
    pub measure_len: usize,
    /// Tempo in BPM
    #[serde(default = "default_bpm")]
    pub bpm: f64,
}

fn default_canvas_width() -> f32 {
    1280.0
}

fn default_canvas_height() -> f32 {
    720.0
}

fn default_rows() -> usize {
    15
}

fn default_cols() -> usize {
    64
}

fn default_col_offset() -> f32 {
    40.0
}

fn default_row_offset() -> f32 {
    120.0
}

fn default_measure_len() -> usize {
    16
}

fn default_bpm() -> f64 {
    120.0
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            canvas_width: default_canvas_width(),
            canvas_height: default_canvas_height(),
            rows: default_rows(),
            cols: default_cols(),
            col_offset: default_col_offset(),
            row_offset: default_row_offset(),
            measure_len: default_measure_len(),
            bpm: default_bpm(),
        }
    }
}

impl StudioConfig {
    /// Load a configuration from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        Self::from_yaml(&contents)
    }

    /// Parse a configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse YAML configuration")
    }

    /// Serialize to a YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize configuration to YAML")
    }

    /// Save the configuration to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml = self.to_yaml()?;
        fs::write(path.as_ref(), yaml)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))
    }

    /// Reject configurations the grid engine cannot lay out.
    ///
    /// A column count that does not divide evenly into measures would
    /// leave the bar lines (and the legality rules keyed off them)
    /// undefined, so it is refused here rather than at render time.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.canvas_width <= 0.0 || self.canvas_height <= 0.0 {
            return Err(ConfigError::BadCanvas {
                width: self.canvas_width,
                height: self.canvas_height,
            });
        }
        let max_rows = Pitch::ALL.len();
        if self.rows == 0 || self.rows > max_rows {
            return Err(ConfigError::BadRowCount {
                rows: self.rows,
                max: max_rows,
            });
        }
        if self.measure_len == 0 || self.measure_len % 4 != 0 {
            return Err(ConfigError::BadMeasureLength(self.measure_len));
        }
        if self.cols < self.measure_len {
            return Err(ConfigError::TooFewColumns {
                cols: self.cols,
                measure_len: self.measure_len,
            });
        }
        if self.cols % self.measure_len != 0 {
            return Err(ConfigError::ColumnsNotDivisible {
                cols: self.cols,
                measure_len: self.measure_len,
            });
        }
        if !(20.0..=300.0).contains(&self.bpm) {
            return Err(ConfigError::BadTempo(self.bpm));
        }
        Ok(())
    }

    /// Beats the playhead spends on one full traversal of the grid
    pub fn beat_count(&self) -> usize {
        self.measure_len
    }
}
