// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-bluvib project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Velocity overall analysis configuration
//!
//! This module defines the parameters of the band-limited velocity
//! integration applied to each acceleration axis.

use serde::{Deserialize, Serialize};

use crate::vibration::velocity::{ISO_BAND_HIGH_HZ, ISO_BAND_LOW_HZ, MAX_SEGMENTS, MIN_SEGMENT_LENGTH};

/// Configuration of the velocity overall computation.
///
/// The defaults follow ISO 20816: velocity is integrated over the 10 Hz to
/// 1000 Hz band, averaging up to four segments of at least 256 samples.
///
/// # Example
///
/// ```
/// use rust_bluvib::config::AnalysisConfig;
///
/// let analysis = AnalysisConfig {
///     band_low_hz: 2.0,
///     band_high_hz: 1000.0,
///     min_segment_length: 512,
///     max_segments: 8,
/// };
/// assert!(analysis.band_low_hz < analysis.band_high_hz);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Lower edge of the integration band in Hz (inclusive)
    #[serde(default = "default_band_low_hz")]
    pub band_low_hz: f64,

    /// Upper edge of the integration band in Hz (inclusive)
    #[serde(default = "default_band_high_hz")]
    pub band_high_hz: f64,

    /// Minimum FFT segment length, a power of two
    #[serde(default = "default_min_segment_length")]
    pub min_segment_length: usize,

    /// Maximum number of segments averaged per axis
    #[serde(default = "default_max_segments")]
    pub max_segments: usize,
}

fn default_band_low_hz() -> f64 {
    ISO_BAND_LOW_HZ
}

fn default_band_high_hz() -> f64 {
    ISO_BAND_HIGH_HZ
}

fn default_min_segment_length() -> usize {
    MIN_SEGMENT_LENGTH
}

fn default_max_segments() -> usize {
    MAX_SEGMENTS
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            band_low_hz: default_band_low_hz(),
            band_high_hz: default_band_high_hz(),
            min_segment_length: default_min_segment_length(),
            max_segments: default_max_segments(),
        }
    }
}
