// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-bluvib project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Raw sample buffer and calibration context
//!
//! The sensor streams its acceleration trace as hexadecimal fragments, four
//! hex characters (one 16-bit little-endian offset-binary word) per sample.
//! The fragments are joined in arrival order into a [`RawSampleBuffer`]; the
//! [`CalibrationContext`] collected from other characteristics tells how to
//! interpret it.

use serde::{Deserialize, Serialize};

use super::CombineError;

/// Number of hexadecimal characters encoding one sample
pub const HEX_CHARS_PER_SAMPLE: usize = 4;

/// Offset-binary code of a zero sample
pub const OFFSET_BINARY_ZERO: i32 = 0x8000;

/// Assembled hexadecimal sample buffer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawSampleBuffer(String);

impl RawSampleBuffer {
    /// Build a buffer from a single hexadecimal string
    pub fn new(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    /// Concatenate fragments in the order they were received
    pub fn from_fragments<I, S>(fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut buffer = Self::default();
        for fragment in fragments {
            buffer.push_fragment(fragment.as_ref());
        }
        buffer
    }

    /// Append one fragment to the end of the buffer
    pub fn push_fragment(&mut self, fragment: &str) {
        self.0.push_str(fragment.trim());
    }

    /// Number of hexadecimal characters in the buffer
    pub fn hex_len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decode every 16-bit little-endian word of the buffer
    ///
    /// ### Errors
    ///
    /// * [`CombineError::EmptyBuffer`] when nothing has been received
    /// * [`CombineError::PartialSample`] when the length is not a whole
    ///   number of samples
    /// * [`CombineError::InvalidHex`] when a character is not hexadecimal
    pub fn decode_words(&self) -> Result<Vec<u16>, CombineError> {
        if self.is_empty() {
            return Err(CombineError::EmptyBuffer);
        }
        if self.hex_len() % HEX_CHARS_PER_SAMPLE != 0 {
            return Err(CombineError::PartialSample(self.hex_len()));
        }

        let bytes = hex::decode(&self.0)?;
        Ok(bytes
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect())
    }
}

/// Out-of-band parameters needed to interpret a [`RawSampleBuffer`]
///
/// Every field is optional because the characteristics carrying them may not
/// have been read yet; [`super::VibrationCombiner::combine`] checks them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalibrationContext {
    /// Calibration scale code, must be a positive integer
    pub calibration: Option<i32>,

    /// Declared number of samples per axis
    pub number_of_samples: Option<u32>,

    /// Sampling rate in Hz, when known
    pub sampling_rate_hz: Option<f64>,
}

impl CalibrationContext {
    pub fn new(calibration: i32, number_of_samples: u32, sampling_rate_hz: Option<f64>) -> Self {
        Self {
            calibration: Some(calibration),
            number_of_samples: Some(number_of_samples),
            sampling_rate_hz,
        }
    }

    /// Scale from offset-binary counts to acceleration, `250000 / (65536 · calibration)`
    pub fn conversion_factor(calibration: u32) -> f64 {
        250_000.0 / (65_536.0 * calibration as f64)
    }
}
