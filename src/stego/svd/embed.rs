// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Block embedding: decompose, modulate trailing singular values, recompose.

use nalgebra::{DMatrix, DVector};

use super::{cell_centre, decompose, read_bits, recompose, target_cell};
use crate::stego::channels::quantize_sample;

/// Re-embedding rounds run on a block's own clipped output before it is
/// pulled away from the intensity limits.
const REFINE_ROUNDS: usize = 4;

/// Result of embedding bits into one block.
#[derive(Debug, Clone)]
pub struct EmbeddedBlock {
    /// Reconstructed block, already clipped and rounded to 8-bit intensities.
    pub block: DMatrix<f64>,
    /// Whether re-decomposing `block` yields the embedded bits.
    pub verified: bool,
    /// Whether the first attempt clipped and a repair pass was needed.
    pub repaired: bool,
}

/// Write `bits` into the trailing singular values of `s` in place.
///
/// `bits[0]` goes to the smallest value, `bits[1]` to the next one up, and so
/// on. Values above the last bit are left untouched.
///
/// Cells never decrease going up the spectrum, and they step up by one
/// wherever two neighbouring bits differ, so re-sorting the modulated values
/// cannot mix bits. A value whose nearest matching cell already satisfies
/// that moves by at most one cell. Otherwise it is lifted to the lowest
/// allowed cell, which for the `j`-th value from the bottom is at most
/// `j + 1.5` cells above where it started.
pub fn modulate(s: &mut DVector<f64>, bits: &[u8], delta: f64) {
    let n = s.len();
    debug_assert!(bits.len() <= n, "{} bits for {n} singular values", bits.len());
    let bits = &bits[..bits.len().min(n)];
    let mut min_cell = 0i64;
    for (j, &bit) in bits.iter().enumerate() {
        let i = n - 1 - j;
        let cell = target_cell(s[i], delta, bit, min_cell);
        s[i] = cell_centre(cell, delta);
        min_cell = match bits.get(j + 1) {
            Some(&next) if next & 1 == bit & 1 => cell,
            _ => cell + 1,
        };
    }
}

/// Largest singular-value shift [`modulate`] can cause for `slots` bits.
///
/// `U` and `Vᵀ` are orthonormal, so no sample moves by more than the largest
/// shift. A block kept at least this far inside [0, 255] never clips.
pub fn max_shift(slots: usize, delta: f64) -> f64 {
    (slots as f64 + 0.5) * delta
}

/// Embed `bits` into `block` and return the quantized result.
///
/// An empty `bits` returns the block unchanged; it is never round-tripped
/// through the decomposition.
///
/// Blocks near black or white can clip when recomposed, which loses the
/// modulation. Such a block is first re-embedded on its own clipped output a
/// few times. If it still fails, its samples are clamped away from 0 and 255
/// by a growing margin, up to [`max_shift`], and embedded again. Past that
/// margin clipping is impossible, so with a rounding-safe step the block
/// verifies whenever its modulated values keep their rank.
pub fn embed_block(block: &DMatrix<f64>, bits: &[u8], delta: f64) -> EmbeddedBlock {
    if bits.is_empty() {
        return EmbeddedBlock { block: block.clone(), verified: true, repaired: false };
    }

    let mut attempt = embed_once(block, bits, delta);
    if attempt.verified {
        return attempt;
    }
    attempt.repaired = true;

    for _ in 0..REFINE_ROUNDS {
        attempt = embed_once(&attempt.block, bits, delta);
        attempt.repaired = true;
        if attempt.verified {
            return attempt;
        }
    }

    let limit = max_shift(bits.len(), delta).min(127.5);
    let mut margin = delta.min(limit);
    loop {
        let pulled = block.map(|v| v.clamp(margin, 255.0 - margin));
        attempt = embed_once(&pulled, bits, delta);
        attempt.repaired = true;
        if attempt.verified || margin >= limit {
            return attempt;
        }
        margin = (margin * 2.0).min(limit);
    }
}

/// One decompose, modulate, recompose, quantize and verify pass.
fn embed_once(block: &DMatrix<f64>, bits: &[u8], delta: f64) -> EmbeddedBlock {
    let Some(mut dec) = decompose(block) else {
        return EmbeddedBlock { block: block.clone(), verified: false, repaired: false };
    };
    modulate(&mut dec.singular_values, bits, delta);

    let stego = recompose(&dec).map(|v| f64::from(quantize_sample(v)));
    let verified = read_bits(&super::singular_values(&stego), bits.len(), delta) == bits;
    EmbeddedBlock { block: stego, verified, repaired: false }
}
