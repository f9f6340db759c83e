// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! # phasm-svd
//!
//! Pure-Rust steganography engine that hides text messages in RGB images by
//! modulating the singular values of small pixel blocks.
//!
//! Each colour channel is tiled into `N×N` blocks. Every block is factored
//! as `U · diag(S) · Vᵀ`, and the smallest singular values are nudged onto a
//! quantization lattice whose cell parity carries one message bit each. The
//! block is recomposed, rounded back to 8-bit pixels, and re-checked so the
//! decoder (which only sees the pixels) reads the same bits.
//!
//! This is concealment only: there is no encryption and no robustness to
//! lossy recompression or resizing. Stego images must be stored losslessly
//! (PNG).
//!
//! # Quick start
//!
//! ```rust,ignore
//! use phasm_svd::{encode_bytes, decode_bytes, StegoConfig};
//!
//! let cover_png = std::fs::read("photo.png").unwrap();
//! let config = StegoConfig::default();
//! let stego = encode_bytes(&cover_png, "secret message", &config).unwrap();
//! let decoded = decode_bytes(&stego, &config).unwrap();
//! assert_eq!(decoded, "secret message");
//! ```

pub mod raster;
pub mod stego;

pub use stego::{embed, embed_with_report, extract, encode_bytes, decode_bytes, EmbedReport};
pub use stego::{capacity_bits, max_message_len, StegoConfig, StegoError};
pub use stego::{validate_encode_dimensions, MAX_DIMENSION, MAX_PIXELS};
pub use stego::config::{DEFAULT_BLOCK_SIZE, DEFAULT_QUANT_STEP};
pub use stego::frame::{SENTINEL, SYMBOL_BITS};
