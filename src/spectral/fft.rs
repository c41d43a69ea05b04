// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-bluvib project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Fast Fourier Transform (FFT) for segment spectra
//!
//! This module turns one windowed, power-of-two-length segment of an
//! acceleration time series into its single-sided amplitude spectrum. It is
//! shaped for the velocity-overall analysis and nothing else:
//!
//! - Only power-of-two lengths are accepted
//! - Bins `0 ..= N/2` are returned, DC first, Nyquist last
//! - Magnitudes are normalized as `2·|X[k]| / N`, so a bin-centered sine of
//!   amplitude `A` analysed with a rectangular window peaks at `A`
//!
//! Failures are reported through [`SpectralError`] instead of a sentinel
//! spectrum, so a failed segment can never be mistaken for silence.
//!
//! # Example
//!
//! ```
//! use rust_bluvib::spectral::fft::forward_fft;
//!
//! let sample_rate = 1024.0;
//! let signal: Vec<f64> = (0..1024)
//!     .map(|n| (2.0 * std::f64::consts::PI * 64.0 * n as f64 / sample_rate).sin())
//!     .collect();
//!
//! let spectrum = forward_fft(&signal, sample_rate).unwrap();
//! assert_eq!(spectrum.frequencies.len(), 513);
//! assert!((spectrum.magnitudes[64] - 1.0).abs() < 1e-9);
//! ```

use rustfft::{num_complex::Complex64, FftPlanner};
use thiserror::Error;

/// Reasons a segment cannot be transformed
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpectralError {
    /// The segment holds no samples
    #[error("cannot transform an empty segment")]
    EmptySegment,

    /// The segment length is not a power of two
    #[error("segment length {0} is not a power of two")]
    NotPowerOfTwo(usize),

    /// The sampling rate is missing, zero, negative or not finite
    #[error("invalid sampling rate: {0} Hz")]
    InvalidSamplingRate(f64),
}

/// Single-sided amplitude spectrum of one segment
///
/// `frequencies` and `magnitudes` always have the same length, `N/2 + 1` for
/// an `N`-sample segment. Index `k` holds bin `k`, centered at
/// `k · sample_rate / N` Hz.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectrumData {
    /// Bin center frequencies in Hz, from 0 (DC) to the Nyquist frequency
    pub frequencies: Vec<f64>,

    /// Bin magnitudes, normalized as `2·|X[k]| / N`
    pub magnitudes: Vec<f64>,

    /// Sampling rate of the transformed segment in Hz
    pub sample_rate: f64,
}

impl SpectrumData {
    /// Frequency resolution (bin spacing) in Hz
    pub fn resolution(&self) -> f64 {
        match self.frequencies.get(1) {
            Some(first) => *first,
            None => self.sample_rate,
        }
    }

    /// Iterate over `(frequency, magnitude)` pairs whose frequency lies in
    /// the closed interval `[low_hz, high_hz]`
    pub fn bins_in_band(&self, low_hz: f64, high_hz: f64) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.frequencies
            .iter()
            .zip(self.magnitudes.iter())
            .filter(move |(f, _)| **f >= low_hz && **f <= high_hz)
            .map(|(f, m)| (*f, *m))
    }
}

/// Compute the single-sided amplitude spectrum of a real segment
///
/// ### Parameters
///
/// * `samples` - Time-domain segment, its length must be a power of two
/// * `sampling_rate_hz` - Sampling rate of the segment in Hz
///
/// ### Errors
///
/// * [`SpectralError::EmptySegment`] when `samples` is empty
/// * [`SpectralError::NotPowerOfTwo`] when the length is not a power of two
/// * [`SpectralError::InvalidSamplingRate`] when the rate is not a finite
///   positive number
pub fn forward_fft(samples: &[f64], sampling_rate_hz: f64) -> Result<SpectrumData, SpectralError> {
    if samples.is_empty() {
        return Err(SpectralError::EmptySegment);
    }
    if !samples.len().is_power_of_two() {
        return Err(SpectralError::NotPowerOfTwo(samples.len()));
    }
    if !sampling_rate_hz.is_finite() || sampling_rate_hz <= 0.0 {
        return Err(SpectralError::InvalidSamplingRate(sampling_rate_hz));
    }

    let fft_output = compute_fft(samples);
    Ok(fft_to_spectrum(&fft_output, sampling_rate_hz))
}

/// Run the complex forward transform on a real input
fn compute_fft(signal: &[f64]) -> Vec<Complex64> {
    let mut buffer: Vec<Complex64> = signal.iter().map(|&x| Complex64::new(x, 0.0)).collect();

    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(signal.len());
    fft.process(&mut buffer);

    buffer
}

/// Keep bins `0 ..= N/2` and normalize their magnitudes
fn fft_to_spectrum(fft_output: &[Complex64], sample_rate: f64) -> SpectrumData {
    let n = fft_output.len();
    let df = sample_rate / n as f64;
    let useful_bins = n / 2 + 1;

    let mut frequencies = Vec::with_capacity(useful_bins);
    let mut magnitudes = Vec::with_capacity(useful_bins);

    for (i, value) in fft_output.iter().take(useful_bins).enumerate() {
        frequencies.push(i as f64 * df);
        // Multiply by 2 to account for negative frequencies
        magnitudes.push(value.norm() / n as f64 * 2.0);
    }

    SpectrumData {
        frequencies,
        magnitudes,
        sample_rate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn create_sine(amplitude: f64, freq: f64, sample_rate: f64, num_samples: usize) -> Vec<f64> {
        (0..num_samples)
            .map(|n| {
                let t = n as f64 / sample_rate;
                amplitude * (2.0 * std::f64::consts::PI * freq * t).sin()
            })
            .collect()
    }

    #[test]
    fn test_bins_cover_dc_to_nyquist() {
        let spectrum = forward_fft(&vec![0.0; 256], 2560.0).unwrap();
        assert_eq!(spectrum.frequencies.len(), 129);
        assert_eq!(spectrum.magnitudes.len(), 129);
        assert_eq!(spectrum.frequencies[0], 0.0);
        assert_relative_eq!(spectrum.frequencies[1], 10.0);
        assert_relative_eq!(spectrum.frequencies[128], 1280.0);
        assert_relative_eq!(spectrum.resolution(), 10.0);
    }

    #[test]
    fn test_sine_has_expected_amplitude() {
        let sample_rate = 1024.0;
        let signal = create_sine(3.0, 100.0, sample_rate, 1024);
        let spectrum = forward_fft(&signal, sample_rate).unwrap();

        assert_relative_eq!(spectrum.magnitudes[100], 3.0, epsilon = 1e-9);
        assert!(spectrum.magnitudes[99] < 1e-9);
        assert!(spectrum.magnitudes[101] < 1e-9);
    }

    #[test]
    fn test_band_filter_is_inclusive() {
        let spectrum = forward_fft(&vec![1.0; 256], 2560.0).unwrap();
        let freqs: Vec<f64> = spectrum.bins_in_band(10.0, 1000.0).map(|(f, _)| f).collect();
        assert_eq!(freqs.len(), 100);
        assert_relative_eq!(freqs[0], 10.0);
        assert_relative_eq!(*freqs.last().unwrap(), 1000.0);
    }

    #[test]
    fn test_empty_segment_fails() {
        assert_eq!(forward_fft(&[], 256.0), Err(SpectralError::EmptySegment));
    }

    #[test]
    fn test_non_power_of_two_fails() {
        assert_eq!(
            forward_fft(&vec![0.0; 300], 256.0),
            Err(SpectralError::NotPowerOfTwo(300))
        );
    }

    #[test]
    fn test_invalid_sampling_rate_fails() {
        let signal = vec![0.0; 256];
        assert!(matches!(
            forward_fft(&signal, 0.0),
            Err(SpectralError::InvalidSamplingRate(_))
        ));
        assert!(matches!(
            forward_fft(&signal, -256.0),
            Err(SpectralError::InvalidSamplingRate(_))
        ));
        assert!(matches!(
            forward_fft(&signal, f64::NAN),
            Err(SpectralError::InvalidSamplingRate(_))
        ));
    }

    #[test]
    fn test_single_sample_transform() {
        let spectrum = forward_fft(&[0.5], 100.0).unwrap();
        assert_eq!(spectrum.frequencies, vec![0.0]);
        assert_relative_eq!(spectrum.magnitudes[0], 1.0);
    }
}
