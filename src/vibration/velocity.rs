// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-bluvib project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Velocity overall calculation
//!
//! The velocity overall of an axis is the RMS vibration velocity integrated
//! over the ISO 20816 band (10 Hz to 1000 Hz by default). The acceleration
//! series is split into power-of-two segments; each segment is windowed,
//! transformed, integrated in the frequency domain and reduced to one RMS
//! value; the segment values are then averaged.
//!
//! ### Units
//!
//! Input samples are accelerations in g. They are converted to m/s² with
//! [`STANDARD_GRAVITY`], so the resulting velocity is in m/s.

use log::debug;
use std::f64::consts::PI;

use crate::config::AnalysisConfig;
use crate::spectral::{
    apply_hann_window, forward_fft, remove_dc_offset, segment_into_power_of_two_blocks,
    SpectralError, HANN_NOISE_BANDWIDTH_CORRECTION,
};

/// Standard gravity in m/s² (g to m/s² conversion)
pub const STANDARD_GRAVITY: f64 = 9.80665;

/// Lower edge of the ISO 20816 integration band in Hz
pub const ISO_BAND_LOW_HZ: f64 = 10.0;

/// Upper edge of the ISO 20816 integration band in Hz
pub const ISO_BAND_HIGH_HZ: f64 = 1000.0;

/// Minimum number of samples in one FFT segment
pub const MIN_SEGMENT_LENGTH: usize = 256;

/// Maximum number of segments averaged per axis
pub const MAX_SEGMENTS: usize = 4;

/// Per-axis velocity overall calculator
///
/// The calculator only holds its analysis parameters; every call is
/// independent.
///
/// ### Example
///
/// ```
/// use rust_bluvib::vibration::VelocityOverallCalculator;
///
/// let calculator = VelocityOverallCalculator::default();
/// let still = vec![0.0; 1024];
/// assert_eq!(calculator.average_velocity_overall(&still, 2560.0), 0.0);
///
/// // Too short for a single 256-sample segment
/// assert!(calculator.average_velocity_overall(&[0.0; 64], 2560.0).is_nan());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct VelocityOverallCalculator {
    band_low_hz: f64,
    band_high_hz: f64,
    min_segment_length: usize,
    max_segments: usize,
}

impl Default for VelocityOverallCalculator {
    fn default() -> Self {
        Self {
            band_low_hz: ISO_BAND_LOW_HZ,
            band_high_hz: ISO_BAND_HIGH_HZ,
            min_segment_length: MIN_SEGMENT_LENGTH,
            max_segments: MAX_SEGMENTS,
        }
    }
}

impl From<&AnalysisConfig> for VelocityOverallCalculator {
    fn from(config: &AnalysisConfig) -> Self {
        Self {
            band_low_hz: config.band_low_hz,
            band_high_hz: config.band_high_hz,
            min_segment_length: config.min_segment_length,
            max_segments: config.max_segments,
        }
    }
}

impl VelocityOverallCalculator {
    /// Average velocity overall of one axis
    ///
    /// ### Parameters
    ///
    /// * `axis_samples` - Calibrated acceleration series of one axis, in g
    /// * `sampling_rate_hz` - Sampling rate of the series
    ///
    /// ### Returns
    ///
    /// The mean of the per-segment velocity overall values, in m/s. `NaN`
    /// when no segment could be cut from the series or when any segment
    /// failed to transform; a failed segment is never skipped.
    pub fn average_velocity_overall(&self, axis_samples: &[f64], sampling_rate_hz: f64) -> f64 {
        let centered = remove_dc_offset(axis_samples);
        let segments =
            segment_into_power_of_two_blocks(&centered, self.min_segment_length, self.max_segments);

        if segments.is_empty() {
            debug!(
                "No analyzable segment in {} samples (minimum {})",
                axis_samples.len(),
                self.min_segment_length
            );
            return f64::NAN;
        }

        let total: f64 = segments
            .iter()
            .map(|segment| {
                let metres_per_s2: Vec<f64> =
                    segment.iter().map(|&g| g * STANDARD_GRAVITY).collect();
                match self.velocity_overall(&metres_per_s2, sampling_rate_hz) {
                    Ok(velocity) => velocity,
                    Err(err) => {
                        debug!("Segment of {} samples failed: {}", segment.len(), err);
                        f64::NAN
                    }
                }
            })
            .sum();

        total / segments.len() as f64
    }

    /// Velocity overall of one segment of accelerations in m/s²
    ///
    /// The segment is Hann-windowed and transformed; every bin inside the
    /// closed integration band is integrated (`magnitude / 2πf`), the
    /// squared contributions are summed and doubled for the discarded
    /// negative frequencies, and the root is corrected for the Hann noise
    /// bandwidth. A band holding no bin gives `0.0`.
    ///
    /// ### Errors
    ///
    /// Propagates the [`SpectralError`] of the transform.
    pub fn velocity_overall(&self, segment: &[f64], sampling_rate_hz: f64) -> Result<f64, SpectralError> {
        let windowed = apply_hann_window(segment);
        let spectrum = forward_fft(&windowed, sampling_rate_hz)?;

        let energy: f64 = spectrum
            .bins_in_band(self.band_low_hz, self.band_high_hz)
            .map(|(frequency, magnitude)| {
                let velocity = magnitude / (2.0 * PI * frequency);
                velocity * velocity
            })
            .sum();

        Ok((2.0 * energy).sqrt() / HANN_NOISE_BANDWIDTH_CORRECTION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sine_g(amplitude_g: f64, freq: f64, sample_rate: f64, num_samples: usize) -> Vec<f64> {
        (0..num_samples)
            .map(|n| amplitude_g * (2.0 * PI * freq * n as f64 / sample_rate).sin())
            .collect()
    }

    /// RMS velocity of a pure acceleration sine, in m/s
    fn expected_velocity(amplitude_g: f64, freq: f64) -> f64 {
        amplitude_g * STANDARD_GRAVITY / (2.0 * PI * freq) / 2f64.sqrt()
    }

    #[test]
    fn test_sine_velocity_matches_analytic_rms() {
        let calculator = VelocityOverallCalculator::default();
        let sample_rate = 1024.0;
        let samples = sine_g(1.0, 100.0, sample_rate, 1024);

        let velocity = calculator.average_velocity_overall(&samples, sample_rate);
        assert_relative_eq!(velocity, expected_velocity(1.0, 100.0), max_relative = 0.02);
    }

    #[test]
    fn test_velocity_scales_linearly_with_amplitude() {
        let calculator = VelocityOverallCalculator::default();
        let low = calculator.average_velocity_overall(&sine_g(0.5, 160.0, 2560.0, 2048), 2560.0);
        let high = calculator.average_velocity_overall(&sine_g(1.5, 160.0, 2560.0, 2048), 2560.0);
        assert_relative_eq!(high, 3.0 * low, max_relative = 1e-9);
    }

    #[test]
    fn test_dc_offset_does_not_contribute() {
        let calculator = VelocityOverallCalculator::default();
        let plain = sine_g(1.0, 100.0, 1024.0, 1024);
        let shifted: Vec<f64> = plain.iter().map(|x| x + 1.0).collect();
        assert_relative_eq!(
            calculator.average_velocity_overall(&plain, 1024.0),
            calculator.average_velocity_overall(&shifted, 1024.0),
            max_relative = 1e-9
        );
    }

    #[test]
    fn test_out_of_band_tone_is_ignored() {
        let calculator = VelocityOverallCalculator::default();
        // 1200 Hz lies above the 1000 Hz band edge
        let samples = sine_g(1.0, 1200.0, 5120.0, 1024);
        let velocity = calculator.average_velocity_overall(&samples, 5120.0);
        assert!(velocity < expected_velocity(1.0, 1200.0) * 0.01);
    }

    #[test]
    fn test_constant_series_gives_zero() {
        let calculator = VelocityOverallCalculator::default();
        assert_eq!(calculator.average_velocity_overall(&vec![0.5; 1024], 256.0), 0.0);
    }

    #[test]
    fn test_short_series_gives_nan() {
        let calculator = VelocityOverallCalculator::default();
        assert!(calculator.average_velocity_overall(&vec![0.1; 255], 256.0).is_nan());
    }

    #[test]
    fn test_failed_segment_voids_average() {
        let calculator = VelocityOverallCalculator::default();
        let samples = sine_g(1.0, 100.0, 1024.0, 1024);
        assert!(calculator.average_velocity_overall(&samples, 0.0).is_nan());
    }

    #[test]
    fn test_empty_band_gives_zero() {
        let calculator = VelocityOverallCalculator::from(&AnalysisConfig {
            band_low_hz: 2000.0,
            band_high_hz: 3000.0,
            ..AnalysisConfig::default()
        });
        let segment = sine_g(9.8, 100.0, 256.0, 256);
        assert_eq!(calculator.velocity_overall(&segment, 256.0), Ok(0.0));
    }

    #[test]
    fn test_segment_failure_propagates() {
        let calculator = VelocityOverallCalculator::default();
        assert_eq!(
            calculator.velocity_overall(&vec![0.0; 100], 256.0),
            Err(SpectralError::NotPowerOfTwo(100))
        );
    }
}
