// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Codec configuration.
//!
//! Encoder and decoder must use the same [`StegoConfig`]; nothing about it is
//! stored in the stego image.

use crate::stego::error::StegoError;

/// Default block edge length `N`.
pub const DEFAULT_BLOCK_SIZE: usize = 4;

/// Default quantization step for singular values.
///
/// Rounding a reconstructed `N×N` block back to integers moves each singular
/// value by at most `0.5 * N` (Weyl's inequality bounds it by the Frobenius
/// norm of the rounding error). A bit survives while that shift stays below
/// half a step, so any step above `N` round-trips. 6.0 leaves a margin of one
/// unit over the bound for 4×4 blocks.
pub const DEFAULT_QUANT_STEP: f64 = 6.0;

/// Largest accepted block edge length.
pub const MAX_BLOCK_SIZE: usize = 64;

/// Parameters shared by [`embed`](crate::embed) and [`extract`](crate::extract).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StegoConfig {
    /// Block edge length `N`; planes are tiled with `N×N` blocks.
    pub block_size: usize,
    /// Number of trailing singular values modulated per block (`K`).
    /// `None` uses every singular value of the block.
    pub singular_values: Option<usize>,
    /// Width of one quantization cell in singular-value space.
    /// `1.0` makes the bit the LSB of the integer part.
    pub quant_step: f64,
}

impl Default for StegoConfig {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
            singular_values: None,
            quant_step: DEFAULT_QUANT_STEP,
        }
    }
}

impl StegoConfig {
    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size;
        self
    }

    pub fn with_singular_values(mut self, k: usize) -> Self {
        self.singular_values = Some(k);
        self
    }

    pub fn with_quant_step(mut self, quant_step: f64) -> Self {
        self.quant_step = quant_step;
        self
    }

    /// Check that the configuration can drive the codec.
    ///
    /// # Errors
    /// [`StegoError::InvalidConfig`] for a zero or oversized block, `K = 0`,
    /// or a non-positive / non-finite step.
    pub fn validate(&self) -> Result<(), StegoError> {
        if self.block_size == 0 {
            return Err(StegoError::InvalidConfig("block size must be at least 1"));
        }
        if self.block_size > MAX_BLOCK_SIZE {
            return Err(StegoError::InvalidConfig("block size exceeds 64"));
        }
        if self.singular_values == Some(0) {
            return Err(StegoError::InvalidConfig("at least one singular value per block must be modulated"));
        }
        if !self.quant_step.is_finite() || self.quant_step <= 0.0 {
            return Err(StegoError::InvalidConfig("quantization step must be positive and finite"));
        }
        Ok(())
    }

    /// Number of bits a `rows × cols` block carries.
    ///
    /// A block has `min(rows, cols)` singular values; `K` is clamped to that.
    pub fn slots(&self, rows: usize, cols: usize) -> usize {
        let available = rows.min(cols);
        match self.singular_values {
            Some(k) => k.min(available),
            None => available,
        }
    }

    /// Whether integer rounding of a full block can never flip a decoded bit.
    pub fn survives_rounding(&self) -> bool {
        self.quant_step > self.block_size as f64
    }
}
