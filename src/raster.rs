// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Image decoding and encoding at the edge of the codec.
//!
//! Everything entering the codec is normalized to 8-bit RGB (alpha dropped,
//! gray replicated, 16-bit reduced). Stego images leave as PNG: any lossy
//! format destroys the embedded bits.

use std::io::Cursor;

use image::{ImageFormat, RgbImage};

use crate::stego::error::StegoError;

/// Decode any supported image format into 8-bit RGB.
///
/// # Errors
/// [`StegoError::InvalidImage`] if the bytes are not a decodable image.
pub fn load_rgb(bytes: &[u8]) -> Result<RgbImage, StegoError> {
    Ok(image::load_from_memory(bytes)?.to_rgb8())
}

/// Encode an RGB image as PNG.
///
/// # Errors
/// [`StegoError::Encode`] if the PNG encoder fails.
pub fn encode_png(img: &RgbImage) -> Result<Vec<u8>, StegoError> {
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png).map_err(StegoError::Encode)?;
    Ok(out.into_inner())
}

/// Build an RGB image from a raw interleaved buffer with 1 (gray),
/// 3 (RGB) or 4 (RGBA) channels.
///
/// # Errors
/// [`StegoError::UnsupportedLayout`] for other channel counts or when
/// `data.len()` does not equal `width * height * channels`.
pub fn from_raw(width: u32, height: u32, channels: u8, data: &[u8]) -> Result<RgbImage, StegoError> {
    let layout_err = || StegoError::UnsupportedLayout { width, height, channels, len: data.len() };

    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|px| px.checked_mul(channels as usize))
        .ok_or_else(layout_err)?;
    if data.len() != expected {
        return Err(layout_err());
    }

    let rgb: Vec<u8> = match channels {
        1 => data.iter().flat_map(|&v| [v, v, v]).collect(),
        3 => data.to_vec(),
        4 => data.chunks_exact(4).flat_map(|px| [px[0], px[1], px[2]]).collect(),
        _ => return Err(layout_err()),
    };
    RgbImage::from_raw(width, height, rgb).ok_or_else(layout_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, Rgba, RgbaImage};

    #[test]
    fn png_roundtrip_is_lossless() {
        let img = RgbImage::from_fn(9, 7, |x, y| Rgb([(x * 25) as u8, (y * 30) as u8, 201]));
        let png = encode_png(&img).unwrap();
        assert_eq!(&png[1..4], b"PNG");
        assert_eq!(load_rgb(&png).unwrap(), img);
    }

    #[test]
    fn alpha_is_dropped_on_load() {
        let rgba = RgbaImage::from_pixel(3, 2, Rgba([10, 20, 30, 0]));
        let mut bytes = Cursor::new(Vec::new());
        rgba.write_to(&mut bytes, ImageFormat::Png).unwrap();
        let rgb = load_rgb(bytes.get_ref()).unwrap();
        assert_eq!(rgb.get_pixel(2, 1).0, [10, 20, 30]);
    }

    #[test]
    fn garbage_is_a_format_error() {
        assert!(matches!(load_rgb(b"definitely not an image"), Err(StegoError::InvalidImage(_))));
    }

    #[test]
    fn raw_layouts() {
        let gray = from_raw(2, 1, 1, &[5, 9]).unwrap();
        assert_eq!(gray.get_pixel(1, 0).0, [9, 9, 9]);

        let rgba = from_raw(1, 2, 4, &[1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
        assert_eq!(rgba.get_pixel(0, 1).0, [5, 6, 7]);

        let rgb = from_raw(1, 1, 3, &[7, 8, 9]).unwrap();
        assert_eq!(rgb.get_pixel(0, 0).0, [7, 8, 9]);
    }

    #[test]
    fn raw_layout_errors() {
        assert!(matches!(from_raw(2, 2, 3, &[0; 11]), Err(StegoError::UnsupportedLayout { .. })));
        assert!(matches!(from_raw(1, 1, 2, &[0; 2]), Err(StegoError::UnsupportedLayout { channels: 2, .. })));
    }
}
