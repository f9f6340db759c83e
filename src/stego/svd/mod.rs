// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Singular-value modulation of image blocks.
//!
//! Each block `A` is factored as `A = U · diag(S) · Vᵀ` with `S` sorted in
//! descending order. Bits live in the trailing (smallest) singular values,
//! one bit per value, starting from the very smallest:
//!
//! ```text
//! S = [ s0  s1  ...  s(n-k) ... s(n-2)  s(n-1) ]
//!                    bit k-1 ...  bit 1   bit 0
//! ```
//!
//! A value is read on a lattice of step `delta`: the bit is the parity of
//! `floor(s / delta)`. Embedding moves the value to the centre of the nearest
//! cell with the right parity, which changes it by at most one cell. Cells
//! must also never decrease from `bit 0` upward, and must step up wherever
//! neighbouring bits differ, so the modulated values keep their bit order
//! when the block is decomposed again. On clustered spectra (flat or smooth
//! blocks) that rule can lift a value by more than one cell; see
//! [`modulate`] for the bound.
//!
//! The embedder quantizes the reconstructed block to 8-bit integers itself
//! and decodes it once more, so a block is only reported as verified when
//! the extractor is certain to read the same bits from the final image.
//! Blocks that clip at black or white are repaired in [`embed_block`].

pub mod embed;
pub mod extract;

use nalgebra::{DMatrix, DVector};

pub use embed::{embed_block, max_shift, modulate, EmbeddedBlock};
pub use extract::{extract_block, read_bits};

/// The `(U, S, Vᵀ)` factors of one block.
#[derive(Debug, Clone)]
pub struct Decomposition {
    pub u: DMatrix<f64>,
    /// Non-negative, descending.
    pub singular_values: DVector<f64>,
    pub v_t: DMatrix<f64>,
}

/// Thin SVD of `block`. `None` if the factors could not be computed.
pub fn decompose(block: &DMatrix<f64>) -> Option<Decomposition> {
    let svd = block.clone().svd(true, true);
    let (u, v_t) = (svd.u?, svd.v_t?);
    Some(Decomposition {
        u,
        singular_values: svd.singular_values,
        v_t,
    })
}

/// Singular values of `block` alone, descending.
pub fn singular_values(block: &DMatrix<f64>) -> DVector<f64> {
    block.clone().svd(false, false).singular_values
}

/// `U · diag(S) · Vᵀ`.
pub fn recompose(dec: &Decomposition) -> DMatrix<f64> {
    &dec.u * DMatrix::from_diagonal(&dec.singular_values) * &dec.v_t
}

/// Lattice cell containing `value`.
pub fn cell_index(value: f64, delta: f64) -> i64 {
    (value / delta).floor() as i64
}

/// Bit carried by `value`: parity of its cell.
pub fn cell_bit(value: f64, delta: f64) -> u8 {
    cell_index(value, delta).rem_euclid(2) as u8
}

/// Midpoint of `cell`; the point furthest from both cell boundaries.
pub fn cell_centre(cell: i64, delta: f64) -> f64 {
    (cell as f64 + 0.5) * delta
}

/// Cell whose parity is `bit`, nearest to `value`, and no lower than
/// `min_cell`.
pub fn target_cell(value: f64, delta: f64, bit: u8, min_cell: i64) -> i64 {
    let bit = i64::from(bit & 1);
    let units = value / delta;
    let floor = units.floor() as i64;
    let nearest = if floor.rem_euclid(2) == bit {
        floor
    } else if units - (floor as f64) < 0.5 {
        floor - 1
    } else {
        floor + 1
    };
    if nearest >= min_cell {
        nearest
    } else {
        min_cell + (bit - min_cell).rem_euclid(2)
    }
}
