// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Capacity boundaries, error paths, and a manual trace of the pipeline.

use image::{Rgb, RgbImage};
use phasm_svd::stego::frame::{self, BitCursor};
use phasm_svd::stego::{blocks, channels, svd};
use phasm_svd::{
    capacity_bits, embed, embed_with_report, extract, max_message_len, raster, StegoConfig, StegoError,
};

fn flat(width: u32, height: u32, value: u8) -> RgbImage {
    RgbImage::from_pixel(width, height, Rgb([value, value, value]))
}

/// Read every slot of `image` in scan order, without interpreting framing.
fn raw_bits(image: &RgbImage, config: &StegoConfig) -> Vec<u8> {
    let mut bits = Vec::new();
    for plane in &channels::split(image) {
        for (region, block) in blocks::partition(plane, config.block_size) {
            bits.extend(svd::extract_block(&block, config.slots(region.rows, region.cols), config.quant_step));
        }
    }
    bits
}

#[test]
fn hi_in_flat_8x8_cover() {
    let cover = flat(8, 8, 100);
    // K larger than the block: every block carries min(16, 4, 4) = 4 bits.
    let config = StegoConfig::default().with_singular_values(16);
    assert_eq!(capacity_bits(8, 8, &config), 48);

    let (stego, report) = embed_with_report(&cover, "Hi", &config).unwrap();
    assert_eq!(report.bits_embedded, 24);
    assert!(report.is_exact());

    let expected: Vec<u8> = "010010000110100100000000".bytes().map(|b| b - b'0').collect();
    assert_eq!(frame::message_to_bits("Hi").unwrap(), expected);
    assert_eq!(&raw_bits(&stego, &config)[..24], expected.as_slice());
    assert_eq!(extract(&stego, &config).unwrap(), "Hi");
}

#[test]
fn single_block_cover_rejects_two_characters() {
    let cover = flat(4, 4, 100);
    let config = StegoConfig::default().with_singular_values(4);
    match embed(&cover, "Hi", &config) {
        Err(StegoError::Capacity { required_bits, available_bits }) => {
            assert_eq!((required_bits, available_bits), (24, 12));
        }
        other => panic!("expected Capacity, got {other:?}"),
    }
}

#[test]
fn exact_fit_and_one_past() {
    let cover = flat(8, 8, 120);
    let config = StegoConfig::default();
    assert_eq!(max_message_len(8, 8, &config), 5);

    let stego = embed(&cover, "Hello", &config).unwrap();
    assert_eq!(extract(&stego, &config).unwrap(), "Hello");

    match embed(&cover, "Hello!", &config) {
        Err(StegoError::Capacity { required_bits, available_bits }) => {
            assert_eq!((required_bits, available_bits), (56, 48));
        }
        other => panic!("expected Capacity, got {other:?}"),
    }
}

#[test]
fn wide_characters_rejected_before_capacity() {
    // Too small for anything, but the character check comes first.
    let cover = flat(4, 4, 100);
    match embed(&cover, "snow ☃", &StegoConfig::default()) {
        Err(StegoError::UnsupportedCharacter(c)) => assert_eq!(c, '☃'),
        other => panic!("expected UnsupportedCharacter, got {other:?}"),
    }
}

#[test]
fn missing_sentinel_returns_partial_text() {
    let cover = flat(8, 8, 100);
    let config = StegoConfig::default();
    // 48 bits fill the image exactly and leave no room for a sentinel.
    let payload = frame::bytes_to_bits(b"abcdef");
    assert_eq!(payload.len(), capacity_bits(8, 8, &config));

    let mut planes = channels::split(&cover);
    let mut cursor = BitCursor::new(&payload);
    for plane in planes.iter_mut() {
        for region in blocks::regions(plane.height(), plane.width(), config.block_size) {
            let chunk = cursor.take(config.slots(region.rows, region.cols));
            let out = svd::embed_block(&blocks::read_block(plane, &region), chunk, config.quant_step);
            assert!(out.verified);
            blocks::reassemble(plane, &region, &out.block);
        }
    }
    assert!(cursor.is_exhausted());
    let stego = channels::merge(&planes);

    match extract(&stego, &config) {
        Err(StegoError::IncompleteMessage { partial }) => assert_eq!(partial, "abcdef"),
        other => panic!("expected IncompleteMessage, got {other:?}"),
    }
}

#[test]
fn grayscale_buffer_roundtrip() {
    let gray = vec![100u8; 8 * 8];
    let cover = raster::from_raw(8, 8, 1, &gray).unwrap();
    let config = StegoConfig::default();
    let stego = embed(&cover, "Hi", &config).unwrap();
    assert_eq!(extract(&stego, &config).unwrap(), "Hi");
}

#[test]
fn oversized_cover_rejected() {
    let cover = flat(8193, 1, 100);
    assert!(matches!(
        embed(&cover, "x", &StegoConfig::default()),
        Err(StegoError::ImageTooLarge)
    ));
}
