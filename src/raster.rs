//! In-memory pixel surface.
//!
//! Rasterizes draw commands onto a grid of optional colours. Used by the
//! terminal viewer and anywhere a frame has to be inspected headlessly.

use crate::controller::Surface;
use crate::waveform::{DrawCommand, HexColor};

/// A `width` x `height` grid of pixels; `None` is background.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    width: usize,
    height: usize,
    pixels: Vec<Option<HexColor>>,
}

impl Raster {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![None; width * height],
        }
    }

    /// Resizes the grid, clearing it if the dimensions change.
    pub fn resize(&mut self, width: usize, height: usize) {
        if width != self.width || height != self.height {
            *self = Raster::new(width, height);
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<HexColor> {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x]
        } else {
            None
        }
    }
}

/// Pixel indices whose centres fall inside `[start, start + length)`, clipped to `0..limit`.
fn covered(start: f64, length: f64, limit: usize) -> std::ops::Range<usize> {
    if length.is_nan() || length <= 0.0 || !start.is_finite() {
        return 0..0;
    }
    let first = (start - 0.5).ceil().max(0.0);
    let end = (start + length - 0.5).ceil().clamp(0.0, limit as f64);
    if first >= end {
        return 0..0;
    }
    first as usize..end as usize
}

impl Surface for Raster {
    fn size(&self) -> (f64, f64) {
        (self.width as f64, self.height as f64)
    }

    fn clear(&mut self) {
        self.pixels.fill(None);
    }

    fn fill_rect(&mut self, command: &DrawCommand) {
        let columns = covered(command.x, command.width, self.width);
        for y in covered(command.y, command.height, self.height) {
            let row = y * self.width;
            for pixel in &mut self.pixels[row + columns.start..row + columns.end] {
                *pixel = Some(command.fill);
            }
        }
    }
}
