// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Block extraction: the decoder counterpart to [`super::embed`].
//!
//! Only the singular values are needed; `U` and `Vᵀ` are never computed.

use nalgebra::{DMatrix, DVector};

use super::{cell_bit, singular_values};

/// Read up to `slots` bits from the trailing singular values of `block`.
pub fn extract_block(block: &DMatrix<f64>, slots: usize, delta: f64) -> Vec<u8> {
    read_bits(&singular_values(block), slots, delta)
}

/// Read up to `slots` bits from descending singular values `s`, smallest
/// value first.
pub fn read_bits(s: &DVector<f64>, slots: usize, delta: f64) -> Vec<u8> {
    let n = s.len();
    (0..slots.min(n)).map(|j| cell_bit(s[n - 1 - j], delta)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_smallest_first() {
        // Cells (delta 1): 9 -> 1, 4 -> 0, 2 -> 0, 1 -> 1, read from the end.
        let s = DVector::from_vec(vec![9.5, 4.5, 2.5, 1.5]);
        assert_eq!(read_bits(&s, 4, 1.0), vec![1, 0, 0, 1]);
        assert_eq!(read_bits(&s, 2, 1.0), vec![1, 0]);
    }

    #[test]
    fn slots_clamped_to_spectrum() {
        let s = DVector::from_vec(vec![7.5, 3.5]);
        assert_eq!(read_bits(&s, 16, 1.0).len(), 2);
    }

    #[test]
    fn deterministic_for_same_block() {
        let block = DMatrix::from_fn(4, 4, |r, c| ((r * 31 + c * 17) % 200) as f64);
        assert_eq!(extract_block(&block, 4, 6.0), extract_block(&block.clone(), 4, 6.0));
    }
}
