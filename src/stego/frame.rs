// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Message framing.
//!
//! A message is embedded as a plain bitstream, one 8-bit symbol per
//! character, terminated by an all-zero sentinel byte:
//!
//! ```text
//! [8 bits] char 0 (code point, MSB first)
//! [8 bits] char 1
//! ...
//! [8 bits] 0x00 sentinel
//! ```
//!
//! There is no length prefix and no escaping. A NUL character inside the
//! message reads back as the sentinel, so extraction stops there.

use crate::stego::error::StegoError;

/// Bits per message symbol.
pub const SYMBOL_BITS: usize = 8;

/// End-of-message marker.
pub const SENTINEL: u8 = 0x00;

/// Number of bits `message` occupies once framed (sentinel included).
///
/// # Errors
/// [`StegoError::UnsupportedCharacter`] for code points above 255.
pub fn framed_bit_len(message: &str) -> Result<usize, StegoError> {
    let mut symbols = 1usize;
    for c in message.chars() {
        symbol_for(c)?;
        symbols += 1;
    }
    Ok(symbols * SYMBOL_BITS)
}

/// Encode `message` as a bitstream with a trailing sentinel.
///
/// # Errors
/// [`StegoError::UnsupportedCharacter`] for code points above 255.
pub fn message_to_bits(message: &str) -> Result<Vec<u8>, StegoError> {
    let mut bytes = Vec::with_capacity(message.len() + 1);
    for c in message.chars() {
        bytes.push(symbol_for(c)?);
    }
    bytes.push(SENTINEL);
    Ok(bytes_to_bits(&bytes))
}

/// Decode a bitstream produced by [`message_to_bits`].
///
/// Stops at the first sentinel. Trailing bits that do not form a full symbol
/// are dropped.
pub fn bits_to_message(bits: &[u8]) -> String {
    let mut decoder = MessageDecoder::new();
    for &bit in bits {
        if decoder.push(bit) {
            break;
        }
    }
    decoder.into_text()
}

/// Convert bytes to a bit vector (MSB first within each byte).
pub fn bytes_to_bits(bytes: &[u8]) -> Vec<u8> {
    let mut bits = Vec::with_capacity(bytes.len() * 8);
    for &byte in bytes {
        for bit_pos in (0..8).rev() {
            bits.push((byte >> bit_pos) & 1);
        }
    }
    bits
}

fn symbol_for(c: char) -> Result<u8, StegoError> {
    u8::try_from(u32::from(c)).map_err(|_| StegoError::UnsupportedCharacter(c))
}

/// Read position into a framed bitstream.
///
/// The embed pipeline draws each block's bits from one cursor shared across
/// all channels, so the consumption order is the scan order.
#[derive(Debug, Clone)]
pub struct BitCursor<'a> {
    bits: &'a [u8],
    pos: usize,
}

impl<'a> BitCursor<'a> {
    pub fn new(bits: &'a [u8]) -> Self {
        Self { bits, pos: 0 }
    }

    /// Next `n` bits without advancing. Shorter than `n` near the end.
    pub fn peek(&self, n: usize) -> &'a [u8] {
        let end = (self.pos + n).min(self.bits.len());
        &self.bits[self.pos..end]
    }

    /// Next `n` bits, advancing past them. Shorter than `n` near the end.
    pub fn take(&mut self, n: usize) -> &'a [u8] {
        let chunk = self.peek(n);
        self.pos += chunk.len();
        chunk
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.bits.len() - self.pos
    }

    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.bits.len()
    }
}

/// Incremental decoder: accepts one bit at a time, assembles symbols, and
/// reports when the sentinel arrives.
#[derive(Debug, Default)]
pub struct MessageDecoder {
    text: String,
    pending: u8,
    filled: usize,
    terminated: bool,
}

impl MessageDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one bit. Returns `true` once the sentinel has been read; further
    /// bits are ignored.
    pub fn push(&mut self, bit: u8) -> bool {
        if self.terminated {
            return true;
        }
        self.pending = (self.pending << 1) | (bit & 1);
        self.filled += 1;
        if self.filled == SYMBOL_BITS {
            if self.pending == SENTINEL {
                self.terminated = true;
            } else {
                self.text.push(char::from(self.pending));
            }
            self.pending = 0;
            self.filled = 0;
        }
        self.terminated
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// Characters decoded so far, sentinel excluded.
    pub fn into_text(self) -> String {
        self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hi_bit_pattern() {
        let bits = message_to_bits("Hi").unwrap();
        let expected: Vec<u8> = "010010000110100100000000"
            .bytes()
            .map(|b| b - b'0')
            .collect();
        assert_eq!(bits, expected);
        assert_eq!(framed_bit_len("Hi").unwrap(), 24);
    }

    #[test]
    fn empty_message_is_just_the_sentinel() {
        assert_eq!(message_to_bits("").unwrap(), vec![0u8; 8]);
        assert_eq!(bits_to_message(&[0u8; 8]), "");
    }

    #[test]
    fn decode_stops_at_sentinel() {
        let mut bits = message_to_bits("ok").unwrap();
        bits.extend(bytes_to_bits(b"junk"));
        assert_eq!(bits_to_message(&bits), "ok");
    }

    #[test]
    fn trailing_partial_symbol_dropped() {
        let mut bits = bytes_to_bits(b"AB");
        bits.extend_from_slice(&[0, 1, 0]);
        assert_eq!(bits_to_message(&bits), "AB");
    }

    #[test]
    fn latin1_roundtrip() {
        let bits = message_to_bits("café ÿ").unwrap();
        assert_eq!(bits_to_message(&bits), "café ÿ");
    }

    #[test]
    fn wide_characters_rejected() {
        assert!(matches!(message_to_bits("1 €"), Err(StegoError::UnsupportedCharacter('€'))));
        assert!(framed_bit_len("日本").is_err());
    }

    #[test]
    fn embedded_nul_truncates() {
        let bits = message_to_bits("ab\0cd").unwrap();
        assert_eq!(bits.len(), 48);
        assert_eq!(bits_to_message(&bits), "ab");
    }

    #[test]
    fn cursor_take_and_peek() {
        let bits = [1u8, 0, 1, 1, 0];
        let mut cursor = BitCursor::new(&bits);
        assert_eq!(cursor.peek(2), &[1, 0]);
        assert_eq!(cursor.position(), 0);
        assert_eq!(cursor.take(2), &[1, 0]);
        assert_eq!(cursor.remaining(), 3);
        assert_eq!(cursor.take(4), &[1, 1, 0]);
        assert!(cursor.is_exhausted());
        assert!(cursor.take(4).is_empty());
        assert_eq!(cursor.position(), 5);
    }

    #[test]
    fn decoder_ignores_bits_after_sentinel() {
        let mut decoder = MessageDecoder::new();
        for &bit in &bytes_to_bits(b"A\0") {
            decoder.push(bit);
        }
        assert!(decoder.is_terminated());
        assert!(decoder.push(1));
        assert_eq!(decoder.into_text(), "A");
    }
}
