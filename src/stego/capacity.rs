// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Modulation capacity.
//!
//! Every block carries `min(K, rows, cols)` bits, and all three channels are
//! used. An image smaller than one block in either dimension carries nothing.

use crate::stego::blocks::regions;
use crate::stego::channels::CHANNELS;
use crate::stego::config::StegoConfig;
use crate::stego::frame::SYMBOL_BITS;

/// Bits a single `height × width` plane can carry.
pub fn plane_capacity_bits(width: usize, height: usize, config: &StegoConfig) -> usize {
    let n = config.block_size;
    if n == 0 || width < n || height < n {
        return 0;
    }
    regions(height, width, n)
        .iter()
        .map(|r| config.slots(r.rows, r.cols))
        .sum()
}

/// Total bits an RGB image of the given size can carry, sentinel included.
pub fn capacity_bits(width: u32, height: u32, config: &StegoConfig) -> usize {
    CHANNELS * plane_capacity_bits(width as usize, height as usize, config)
}

/// Longest message (in characters) that fits, leaving room for the sentinel.
pub fn max_message_len(width: u32, height: u32, config: &StegoConfig) -> usize {
    (capacity_bits(width, height, config) / SYMBOL_BITS).saturating_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_block_image() {
        let cfg = StegoConfig::default().with_singular_values(4);
        assert_eq!(capacity_bits(4, 4, &cfg), 12);
        assert_eq!(max_message_len(4, 4, &cfg), 0);
    }

    #[test]
    fn exact_tiling_matches_closed_form() {
        let cfg = StegoConfig::default();
        // 3 channels × (16 × 8) blocks × 4 values.
        assert_eq!(capacity_bits(64, 32, &cfg), 3 * 128 * 4);
        let cfg = cfg.with_singular_values(2);
        assert_eq!(capacity_bits(64, 32, &cfg), 3 * 128 * 2);
    }

    #[test]
    fn truncated_blocks_carry_fewer_bits() {
        let cfg = StegoConfig::default();
        // 6×5: blocks 4×4, 4×2, 1×4, 1×2 -> 4 + 2 + 1 + 1 per channel.
        assert_eq!(capacity_bits(6, 5, &cfg), 3 * 8);
    }

    #[test]
    fn smaller_than_one_block_is_zero() {
        let cfg = StegoConfig::default();
        assert_eq!(capacity_bits(3, 100, &cfg), 0);
        assert_eq!(capacity_bits(100, 3, &cfg), 0);
        assert_eq!(max_message_len(3, 3, &cfg), 0);
    }

    #[test]
    fn max_message_len_accounts_for_sentinel() {
        let cfg = StegoConfig::default();
        // 8×8 -> 48 bits -> 6 symbols -> 5 characters.
        assert_eq!(max_message_len(8, 8, &cfg), 5);
    }
}
