// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Steganographic encoding and decoding pipelines.
//!
//! The codec hides text in the singular-value spectra of small pixel blocks:
//!
//! - [`frame`]: message ↔ bitstream with a zero-byte sentinel.
//! - [`channels`]: RGB image ↔ three real-valued planes.
//! - [`blocks`]: plane ↔ `N×N` blocks in row-major scan order.
//! - [`svd`]: per-block singular-value modulation and readout.
//! - [`pipeline`] (re-exported here): `embed` / `extract` orchestration.
//!
//! Encoder and decoder must share the same [`StegoConfig`].

pub mod error;
pub mod config;
pub mod frame;
pub mod channels;
pub mod blocks;
pub mod svd;
pub mod capacity;
mod pipeline;

pub use error::StegoError;
pub use config::StegoConfig;

/// Largest accepted cover width or height, in pixels.
pub const MAX_DIMENSION: u32 = 8192;

/// Largest accepted cover area, in pixels.
pub const MAX_PIXELS: u32 = 16_000_000;

/// Reject covers too large to embed into.
///
/// Small covers pass; they simply carry little or nothing, which [`embed`]
/// reports as [`StegoError::Capacity`].
///
/// # Errors
/// [`StegoError::ImageTooLarge`] if a side exceeds [`MAX_DIMENSION`] or the
/// area exceeds [`MAX_PIXELS`].
pub fn validate_encode_dimensions(width: u32, height: u32) -> Result<(), StegoError> {
    let area = u64::from(width) * u64::from(height);
    if width.max(height) > MAX_DIMENSION || area > u64::from(MAX_PIXELS) {
        return Err(StegoError::ImageTooLarge);
    }
    Ok(())
}

pub use pipeline::{embed, embed_with_report, extract, encode_bytes, decode_bytes, EmbedReport};
pub use capacity::{capacity_bits, max_message_len};
