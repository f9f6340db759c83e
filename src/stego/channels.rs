// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! RGB image ↔ per-channel real-valued planes.

use image::{Rgb, RgbImage};

/// Number of colour channels the codec operates on.
pub const CHANNELS: usize = 3;

/// One colour channel as a row-major grid of `f64` samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    width: usize,
    height: usize,
    samples: Vec<f64>,
}

impl Plane {
    /// Create a plane filled with `value`.
    pub fn filled(width: usize, height: usize, value: f64) -> Self {
        Self {
            width,
            height,
            samples: vec![value; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.samples[self.index(row, col)]
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        let idx = self.index(row, col);
        self.samples[idx] = value;
    }

    fn index(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.height, "row {row} >= {}", self.height);
        debug_assert!(col < self.width, "col {col} >= {}", self.width);
        row * self.width + col
    }
}

/// Clip to [0, 255] and round to the nearest integer intensity.
///
/// This is the only quantization the codec applies; blocks are pushed
/// through it right after reconstruction so that what gets verified is
/// exactly what ends up in the image.
pub fn quantize_sample(value: f64) -> u8 {
    value.clamp(0.0, 255.0).round() as u8
}

/// Split an RGB image into independent R, G, B planes.
pub fn split(image: &RgbImage) -> [Plane; CHANNELS] {
    let (w, h) = image.dimensions();
    let (w, h) = (w as usize, h as usize);
    let mut planes = [
        Plane::filled(w, h, 0.0),
        Plane::filled(w, h, 0.0),
        Plane::filled(w, h, 0.0),
    ];
    for (x, y, px) in image.enumerate_pixels() {
        for (plane, &v) in planes.iter_mut().zip(px.0.iter()) {
            plane.set(y as usize, x as usize, f64::from(v));
        }
    }
    planes
}

/// Stack three planes back into an RGB image, clipping and rounding every
/// sample with [`quantize_sample`].
pub fn merge(planes: &[Plane; CHANNELS]) -> RgbImage {
    let (w, h) = (planes[0].width(), planes[0].height());
    debug_assert!(planes.iter().all(|p| p.width() == w && p.height() == h));
    RgbImage::from_fn(w as u32, h as u32, |x, y| {
        let (row, col) = (y as usize, x as usize);
        Rgb([
            quantize_sample(planes[0].get(row, col)),
            quantize_sample(planes[1].get(row, col)),
            quantize_sample(planes[2].get(row, col)),
        ])
    })
}
