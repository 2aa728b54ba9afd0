//! Generator state: the ordered 4-word seed of a Xorshift128 sequence.
//!
//! A [`State`] is what the external debugger session hands over: four raw
//! memory words read little-endian from the target process. Two identical
//! `State` values always reproduce the same output sequence.

use crate::error::RngError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered 4-tuple of unsigned 32-bit words (s0, s1, s2, s3).
///
/// Cheap to copy; clone freely to fork lookahead branches. All arithmetic on
/// the words wraps modulo 2^32 — overflow never panics or saturates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct State(pub [u32; 4]);

impl State {
    /// Creates a state from four seed words.
    pub fn new(s0: u32, s1: u32, s2: u32, s3: u32) -> Self {
        Self([s0, s1, s2, s3])
    }

    /// Interprets 16 raw bytes as four little-endian words, in memory order.
    ///
    /// This is the layout of the generator block in the target process.
    /// Returns [`RngError::MalformedSeed`] for any other length.
    pub fn from_le_bytes(bytes: &[u8]) -> Result<Self, RngError> {
        if bytes.len() != 16 {
            return Err(RngError::MalformedSeed(format!(
                "expected 16 bytes, got {}",
                bytes.len()
            )));
        }
        let mut words = [0u32; 4];
        for (i, chunk) in bytes.chunks_exact(4).enumerate() {
            // chunks_exact(4) on a 16-byte slice always yields 4-byte chunks
            let mut word = [0u8; 4];
            word.copy_from_slice(chunk);
            words[i] = u32::from_le_bytes(word);
        }
        Ok(Self(words))
    }

    /// Parses four hexadecimal seed words (with or without a `0x` prefix).
    ///
    /// Returns [`RngError::MalformedSeed`] when a word is missing, extra, or
    /// does not fit an unsigned 32-bit integer.
    pub fn from_hex_words(words: &[&str]) -> Result<Self, RngError> {
        if words.len() != 4 {
            return Err(RngError::MalformedSeed(format!(
                "expected 4 seed words, got {}",
                words.len()
            )));
        }
        let mut parsed = [0u32; 4];
        for (i, raw) in words.iter().enumerate() {
            let digits = raw
                .strip_prefix("0x")
                .or_else(|| raw.strip_prefix("0X"))
                .unwrap_or(raw);
            parsed[i] = u32::from_str_radix(digits, 16).map_err(|_| {
                RngError::MalformedSeed(format!("word {i}: '{raw}' is not a 32-bit hex value"))
            })?;
        }
        Ok(Self(parsed))
    }

    /// The four words in order.
    pub fn words(&self) -> [u32; 4] {
        self.0
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:08X} {:08X} {:08X} {:08X}",
            self.0[0], self.0[1], self.0[2], self.0[3]
        )
    }
}
