// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-bluvib project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Hann windowing
//!
//! Windowing tapers the edges of a segment before the FFT to reduce spectral
//! leakage. The symmetric Hann window used here spreads noise energy over a
//! wider equivalent bandwidth; callers converting windowed spectrum energy
//! back to an amplitude divide by [`HANN_NOISE_BANDWIDTH_CORRECTION`].

use std::f64::consts::PI;

/// Equivalent noise bandwidth of the Hann window, in bins
pub const HANN_NOISE_BANDWIDTH: f64 = 1.5;

/// Amplitude correction for the Hann noise bandwidth, `√1.5`
pub const HANN_NOISE_BANDWIDTH_CORRECTION: f64 = 1.224_744_871_391_589;

/// Apply a symmetric Hann window to a segment
///
/// Sample `n` of an `N`-sample segment is multiplied by
/// `0.5 · (1 − cos(2πn / (N − 1)))`, so the first and last samples are
/// driven to zero. A one-sample segment has no taper span and maps to zero.
///
/// ### Example
///
/// ```
/// use rust_bluvib::spectral::window::apply_hann_window;
///
/// let windowed = apply_hann_window(&[1.0; 5]);
/// assert_eq!(windowed.len(), 5);
/// assert!(windowed[0].abs() < 1e-12);
/// assert!((windowed[2] - 1.0).abs() < 1e-12);
/// ```
pub fn apply_hann_window(samples: &[f64]) -> Vec<f64> {
    let n = samples.len();
    if n < 2 {
        return vec![0.0; n];
    }

    let span = (n - 1) as f64;
    samples
        .iter()
        .enumerate()
        .map(|(i, &sample)| sample * 0.5 * (1.0 - (2.0 * PI * i as f64 / span).cos()))
        .collect()
}
