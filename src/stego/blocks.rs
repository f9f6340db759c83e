// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Block tiling of a plane.
//!
//! A plane is covered by `N×N` blocks in row-major block order. Where the
//! plane size is not a multiple of `N`, the last block row/column is
//! truncated to what remains, so every sample belongs to exactly one block.
//! The scan order returned by [`regions`] is the global bit order within a
//! plane and must never change between encoder and decoder.

use nalgebra::DMatrix;

use crate::stego::channels::Plane;

/// Position and extent of one block inside a plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockRegion {
    pub row: usize,
    pub col: usize,
    pub rows: usize,
    pub cols: usize,
}

/// Block regions of a `height × width` plane in scan order.
pub fn regions(height: usize, width: usize, block_size: usize) -> Vec<BlockRegion> {
    debug_assert!(block_size > 0);
    let mut out = Vec::with_capacity(height.div_ceil(block_size) * width.div_ceil(block_size));
    for row in (0..height).step_by(block_size) {
        let rows = block_size.min(height - row);
        for col in (0..width).step_by(block_size) {
            let cols = block_size.min(width - col);
            out.push(BlockRegion { row, col, rows, cols });
        }
    }
    out
}

/// Copy the samples under `region` into a matrix.
pub fn read_block(plane: &Plane, region: &BlockRegion) -> DMatrix<f64> {
    DMatrix::from_fn(region.rows, region.cols, |r, c| {
        plane.get(region.row + r, region.col + c)
    })
}

/// Blocks of `plane` in scan order, each paired with its region.
pub fn partition(plane: &Plane, block_size: usize) -> impl Iterator<Item = (BlockRegion, DMatrix<f64>)> + '_ {
    regions(plane.height(), plane.width(), block_size)
        .into_iter()
        .map(move |region| {
            let block = read_block(plane, &region);
            (region, block)
        })
}

/// Write `block` back at `region`'s offset.
///
/// Only cells covered by both the block and the plane are written.
pub fn reassemble(plane: &mut Plane, region: &BlockRegion, block: &DMatrix<f64>) {
    let rows = block.nrows().min(plane.height().saturating_sub(region.row));
    let cols = block.ncols().min(plane.width().saturating_sub(region.col));
    for r in 0..rows {
        for c in 0..cols {
            plane.set(region.row + r, region.col + c, block[(r, c)]);
        }
    }
}
