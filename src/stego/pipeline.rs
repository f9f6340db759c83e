// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Embed/extract pipeline.
//!
//! Embedding:
//! 1. Frame the message (8-bit symbols + zero sentinel) and check capacity
//!    before anything is written.
//! 2. Split the cover into R, G, B planes.
//! 3. Walk channels in order R, G, B and, within each plane, blocks in
//!    row-major scan order, drawing `min(K, rows, cols)` bits per block from
//!    one shared [`BitCursor`].
//! 4. Modulate each block's trailing singular values, recompose, quantize,
//!    and write it back. Once the cursor is exhausted the remaining blocks
//!    are left as they are.
//! 5. Merge the planes into the stego image.
//!
//! Extraction walks the same order, decoding bits until the sentinel byte.

use image::RgbImage;
use log::{debug, warn};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::raster;
use crate::stego::blocks::{self, BlockRegion};
use crate::stego::capacity::{capacity_bits, plane_capacity_bits};
use crate::stego::channels::{self, Plane};
use crate::stego::config::StegoConfig;
use crate::stego::error::StegoError;
use crate::stego::frame::{self, BitCursor, MessageDecoder};
use crate::stego::svd::{embed_block, extract_block, EmbeddedBlock};

/// Summary of one embedding run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmbedReport {
    /// Bits written, sentinel included.
    pub bits_embedded: usize,
    /// Blocks whose singular values were modulated.
    pub blocks_modulated: usize,
    /// Modulated blocks that clipped at black or white and needed a repair
    /// pass before they verified (or before giving up).
    pub repaired_blocks: usize,
    /// Modulated blocks whose quantized result still does not decode to the
    /// embedded bits.
    pub unverified_blocks: usize,
}

impl EmbedReport {
    /// `true` when every modulated block decodes back to its bits.
    pub fn is_exact(&self) -> bool {
        self.unverified_blocks == 0
    }
}

/// Hide `message` in `cover`.
///
/// # Errors
/// - [`StegoError::InvalidConfig`] if `config` is unusable.
/// - [`StegoError::ImageTooLarge`] if the cover exceeds the dimension limits.
/// - [`StegoError::UnsupportedCharacter`] for characters above U+00FF.
/// - [`StegoError::Capacity`] if the framed message does not fit.
/// - [`StegoError::Unverified`] if some block would not decode back to its
///   bits, so the result could not be extracted correctly.
pub fn embed(cover: &RgbImage, message: &str, config: &StegoConfig) -> Result<RgbImage, StegoError> {
    let (stego, report) = embed_with_report(cover, message, config)?;
    if !report.is_exact() {
        return Err(StegoError::Unverified {
            failed_blocks: report.unverified_blocks,
            modulated_blocks: report.blocks_modulated,
        });
    }
    Ok(stego)
}

/// [`embed`], also returning an [`EmbedReport`].
///
/// Unlike [`embed`], a run with unverified blocks still returns the image;
/// check [`EmbedReport::is_exact`] before relying on it.
pub fn embed_with_report(
    cover: &RgbImage,
    message: &str,
    config: &StegoConfig,
) -> Result<(RgbImage, EmbedReport), StegoError> {
    config.validate()?;
    let (width, height) = cover.dimensions();
    super::validate_encode_dimensions(width, height)?;

    let bits = frame::message_to_bits(message)?;
    let available = capacity_bits(width, height, config);
    if bits.len() > available {
        return Err(StegoError::Capacity {
            required_bits: bits.len(),
            available_bits: available,
        });
    }
    if !config.survives_rounding() {
        warn!(
            "quantization step {} does not exceed block size {}; rounding may corrupt bits",
            config.quant_step, config.block_size
        );
    }
    debug!("embedding {} bits into {width}x{height} cover (capacity {available})", bits.len());

    let mut planes = channels::split(cover);
    let mut cursor = BitCursor::new(&bits);
    let mut report = EmbedReport::default();

    for (channel, plane) in planes.iter_mut().enumerate() {
        if cursor.is_exhausted() {
            break;
        }
        embed_plane(plane, &mut cursor, config, &mut report);
        debug!("channel {channel}: {} bits consumed so far", cursor.position());
    }
    report.bits_embedded = cursor.position();

    if report.repaired_blocks > 0 {
        debug!("{} blocks clipped and were repaired", report.repaired_blocks);
    }
    if !report.is_exact() {
        warn!(
            "{} of {} modulated blocks failed verification",
            report.unverified_blocks, report.blocks_modulated
        );
    }

    Ok((channels::merge(&planes), report))
}

/// One block's share of the bitstream.
type BlockJob<'a> = (BlockRegion, &'a [u8]);

/// Modulate the blocks of one plane with bits drawn from `cursor`.
///
/// Bit ranges are assigned serially in scan order before any block is
/// touched, so the per-block work can run in any order.
fn embed_plane(plane: &mut Plane, cursor: &mut BitCursor<'_>, config: &StegoConfig, report: &mut EmbedReport) {
    let mut jobs: Vec<BlockJob<'_>> = Vec::new();
    for region in blocks::regions(plane.height(), plane.width(), config.block_size) {
        if cursor.is_exhausted() {
            break;
        }
        let chunk = cursor.take(config.slots(region.rows, region.cols));
        jobs.push((region, chunk));
    }

    #[cfg(feature = "parallel")]
    let results = embed_blocks_parallel(plane, &jobs, config.quant_step);
    #[cfg(not(feature = "parallel"))]
    let results = embed_blocks_serial(plane, &jobs, config.quant_step);

    for ((region, chunk), result) in jobs.iter().zip(results) {
        report.blocks_modulated += 1;
        if result.repaired {
            report.repaired_blocks += 1;
        }
        if !result.verified {
            report.unverified_blocks += 1;
            warn!(
                "block at ({}, {}) does not decode to its {} embedded bits",
                region.row,
                region.col,
                chunk.len()
            );
        }
        blocks::reassemble(plane, region, &result.block);
    }
}

fn embed_job(plane: &Plane, (region, chunk): &BlockJob<'_>, delta: f64) -> EmbeddedBlock {
    embed_block(&blocks::read_block(plane, region), chunk, delta)
}

#[cfg_attr(feature = "parallel", allow(dead_code))]
fn embed_blocks_serial(plane: &Plane, jobs: &[BlockJob<'_>], delta: f64) -> Vec<EmbeddedBlock> {
    jobs.iter().map(|job| embed_job(plane, job, delta)).collect()
}

#[cfg(feature = "parallel")]
fn embed_blocks_parallel(plane: &Plane, jobs: &[BlockJob<'_>], delta: f64) -> Vec<EmbeddedBlock> {
    jobs.par_iter().map(|job| embed_job(plane, job, delta)).collect()
}

/// Recover a message hidden by [`embed`] with the same `config`.
///
/// Stops as soon as the sentinel byte has been read.
///
/// # Errors
/// - [`StegoError::InvalidConfig`] if `config` is unusable.
/// - [`StegoError::IncompleteMessage`] if the image ends before the
///   sentinel; the partial text is included.
pub fn extract(stego: &RgbImage, config: &StegoConfig) -> Result<String, StegoError> {
    config.validate()?;
    let (width, height) = stego.dimensions();
    if plane_capacity_bits(width as usize, height as usize, config) == 0 {
        return Err(StegoError::IncompleteMessage { partial: String::new() });
    }

    let mut decoder = MessageDecoder::new();

    let planes = channels::split(stego);
    for plane in &planes {
        for (region, block) in blocks::partition(plane, config.block_size) {
            let slots = config.slots(region.rows, region.cols);
            for bit in extract_block(&block, slots, config.quant_step) {
                if decoder.push(bit) {
                    let message = decoder.into_text();
                    debug!("extracted {} characters", message.chars().count());
                    return Ok(message);
                }
            }
        }
    }

    let partial = decoder.into_text();
    debug!("image exhausted without sentinel after {} characters", partial.chars().count());
    Err(StegoError::IncompleteMessage { partial })
}

/// Hide `message` in an encoded cover image and return the stego image as
/// PNG bytes.
///
/// # Errors
/// [`StegoError::InvalidImage`] if `image_bytes` cannot be decoded, plus
/// everything [`embed`] and PNG encoding can return.
pub fn encode_bytes(image_bytes: &[u8], message: &str, config: &StegoConfig) -> Result<Vec<u8>, StegoError> {
    let cover = raster::load_rgb(image_bytes)?;
    let stego = embed(&cover, message, config)?;
    raster::encode_png(&stego)
}

/// Recover a message from an encoded stego image.
///
/// # Errors
/// [`StegoError::InvalidImage`] if `stego_bytes` cannot be decoded, plus
/// everything [`extract`] can return.
pub fn decode_bytes(stego_bytes: &[u8], config: &StegoConfig) -> Result<String, StegoError> {
    let stego = raster::load_rgb(stego_bytes)?;
    extract(&stego, config)
}
