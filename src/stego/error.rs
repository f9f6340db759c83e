// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Error types for the steganography pipeline.
//!
//! [`StegoError`] covers all failure modes from image decoding through
//! singular-value modulation and message extraction.

use core::fmt;

/// Errors that can occur during steganographic encoding or decoding.
#[derive(Debug)]
pub enum StegoError {
    /// The cover image could not be decoded.
    InvalidImage(image::ImageError),
    /// A raw pixel buffer cannot be normalized to 3-channel 8-bit RGB.
    UnsupportedLayout {
        width: u32,
        height: u32,
        channels: u8,
        len: usize,
    },
    /// The framed message needs more modulation slots than the image offers.
    /// Also raised when the image is smaller than one block.
    Capacity {
        required_bits: usize,
        available_bits: usize,
    },
    /// A message character does not fit the 8-bit symbol width.
    UnsupportedCharacter(char),
    /// Some modulated blocks still decode to the wrong bits after every
    /// repair attempt, so the stego image would not yield the message.
    Unverified {
        failed_blocks: usize,
        modulated_blocks: usize,
    },
    /// The image ended before the end-of-message sentinel was read.
    /// `partial` holds everything decoded up to that point.
    IncompleteMessage { partial: String },
    /// The codec configuration is unusable.
    InvalidConfig(&'static str),
    /// The image dimensions exceed the maximum allowed (8192px / 16MP).
    ImageTooLarge,
    /// The stego image could not be encoded as PNG.
    Encode(image::ImageError),
}

impl fmt::Display for StegoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidImage(e) => write!(f, "invalid image: {e}"),
            Self::UnsupportedLayout { width, height, channels, len } => write!(
                f,
                "cannot normalize {len}-byte buffer to RGB ({width}x{height}, {channels} channels)"
            ),
            Self::Capacity { required_bits, available_bits } => write!(
                f,
                "message needs {required_bits} bits but the image holds {available_bits}"
            ),
            Self::UnsupportedCharacter(c) => {
                write!(f, "character {c:?} (U+{:04X}) does not fit in 8 bits", *c as u32)
            }
            Self::Unverified { failed_blocks, modulated_blocks } => write!(
                f,
                "{failed_blocks} of {modulated_blocks} modulated blocks do not decode to their bits"
            ),
            Self::IncompleteMessage { partial } => write!(
                f,
                "no end-of-message marker found ({} characters recovered)",
                partial.chars().count()
            ),
            Self::InvalidConfig(msg) => write!(f, "invalid configuration: {msg}"),
            Self::ImageTooLarge => write!(f, "image too large (max 8192px / 16MP)"),
            Self::Encode(e) => write!(f, "failed to encode stego image: {e}"),
        }
    }
}

impl std::error::Error for StegoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidImage(e) | Self::Encode(e) => Some(e),
            _ => None,
        }
    }
}

impl From<image::ImageError> for StegoError {
    fn from(e: image::ImageError) -> Self {
        Self::InvalidImage(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_message_names_both_sides() {
        let e = StegoError::Capacity { required_bits: 24, available_bits: 12 };
        let text = e.to_string();
        assert!(text.contains("24") && text.contains("12"), "got: {text}");
    }

    #[test]
    fn incomplete_counts_characters() {
        let e = StegoError::IncompleteMessage { partial: "héllo".into() };
        assert!(e.to_string().contains("5 characters"), "got: {e}");
    }

    #[test]
    fn unverified_reports_block_counts() {
        let e = StegoError::Unverified { failed_blocks: 3, modulated_blocks: 40 };
        assert_eq!(e.to_string(), "3 of 40 modulated blocks do not decode to their bits");
    }

    #[test]
    fn unsupported_character_shows_code_point() {
        let e = StegoError::UnsupportedCharacter('€');
        assert!(e.to_string().contains("U+20AC"), "got: {e}");
    }
}
