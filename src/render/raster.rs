// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Raster `Surface` backed by an RGBA image buffer, used for PNG
//! export. Text drawing is a no-op here.

use std::path::Path;

use anyhow::{Context, Result};
use image::{Rgba, RgbaImage};

use crate::geometry::Rect;
use crate::render::Surface;

/// In-memory raster surface
pub struct ImageSurface {
    image: RgbaImage,
}

impl ImageSurface {
    /// Create a surface filled with opaque white
    pub fn new(width: u32, height: u32) -> Self {
        let mut image = RgbaImage::new(width, height);
        for pixel in image.pixels_mut() {
            *pixel = Rgba([255, 255, 255, 255]);
        }
        Self { image }
    }

    /// Write the surface to a PNG file
    pub fn save(&self, path: &Path) -> Result<()> {
        self.image
            .save(path)
            .with_context(|| format!("failed to write image to {}", path.display()))
    }

    /// Pixel color at a coordinate, for inspection
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.image.get_pixel(x, y).0
    }

    fn blend_pixel(&mut self, x: u32, y: u32, color: [u8; 4]) {
        if x >= self.image.width() || y >= self.image.height() {
            return;
        }
        let alpha = color[3] as f32 / 255.0;
        if alpha <= 0.0 {
            return;
        }
        let dst = self.image.get_pixel(x, y).0;
        let mut out = [0u8; 4];
        for i in 0..3 {
            let blended = color[i] as f32 * alpha + dst[i] as f32 * (1.0 - alpha);
            out[i] = blended.round() as u8;
        }
        out[3] = 255;
        self.image.put_pixel(x, y, Rgba(out));
    }

    fn blend_rect(&mut self, min_x: f32, min_y: f32, max_x: f32, max_y: f32, color: [u8; 4]) {
        let x0 = min_x.max(0.0) as u32;
        let y0 = min_y.max(0.0) as u32;
        let x1 = (max_x.ceil().max(0.0) as u32).min(self.image.width());
        let y1 = (max_y.ceil().max(0.0) as u32).min(self.image.height());
        for y in y0..y1 {
            for x in x0..x1 {
                self.blend_pixel(x, y, color);
            }
        }
    }
}

impl Surface for ImageSurface {
    fn fill_rect(&mut self, rect: Rect, color: [u8; 4]) {
        self.blend_rect(rect.min_x, rect.min_y, rect.max_x(), rect.max_y(), color);
    }

    fn stroke_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, width: f32, color: [u8; 4]) {
        // Axis-aligned lines only, drawn as thin rectangles centered
        // on the segment
        let half = width / 2.0;
        if (y0 - y1).abs() < f32::EPSILON {
            let (lo, hi) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
            self.blend_rect(lo, y0 - half, hi, y0 + half, color);
        } else {
            let (lo, hi) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };
            self.blend_rect(x0 - half, lo, x0 + half, hi, color);
        }
    }

    fn draw_text(&mut self, _text: &str, _x: f32, _y: f32, _size: f32, _color: [u8; 4]) {}
}
