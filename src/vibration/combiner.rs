// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-bluvib project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Vibration combiner
//!
//! Turns an assembled [`RawSampleBuffer`] and its [`CalibrationContext`] into
//! a [`VibrationRecord`]: calibrated per-axis time series, per-axis mean
//! acceleration and, when the sampling rate is known and every axis yields a
//! finite value, the per-axis velocity overall.
//!
//! ### Failure policy
//!
//! Missing or invalid calibration data is an expected state while the
//! characteristics of a capture are still being read, and a buffer that does
//! not split into one or three axes is malformed input. Both are reported as
//! a [`CombineError`]; [`VibrationCombiner::combine_or_drop`] turns them into
//! an absent record after logging the reason.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::sample_buffer::{CalibrationContext, RawSampleBuffer, OFFSET_BINARY_ZERO};
use super::velocity::VelocityOverallCalculator;

/// Reasons a buffer cannot be turned into a [`VibrationRecord`]
#[derive(Debug, Error)]
pub enum CombineError {
    #[error("calibration must be a positive integer, got {0:?}")]
    InvalidCalibration(Option<i32>),

    #[error("number of samples must be a positive integer, got {0:?}")]
    InvalidNumberOfSamples(Option<u32>),

    #[error("sample buffer is empty")]
    EmptyBuffer,

    #[error("sample buffer is not valid hexadecimal: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("sample buffer of {0} hex characters is not a whole number of 16-bit samples")]
    PartialSample(usize),

    #[error("{total_samples} samples do not split into 1 or 3 axes of {number_of_samples}")]
    AxisCountMismatch {
        total_samples: usize,
        number_of_samples: usize,
    },
}

impl CombineError {
    /// True when the error only means that not enough data has arrived yet
    pub fn is_precondition(&self) -> bool {
        !matches!(self, CombineError::AxisCountMismatch { .. })
    }
}

/// Processed vibration capture
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VibrationRecord {
    /// Mean acceleration of each axis, in g
    pub acceleration: Vec<f64>,

    /// Calibrated acceleration series of each axis, in g
    pub acceleration_time_series: Vec<Vec<f64>>,

    /// Velocity overall of each axis, in m/s
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub velocity_overall: Option<Vec<f64>>,
}

impl VibrationRecord {
    pub fn axis_count(&self) -> usize {
        self.acceleration_time_series.len()
    }
}

/// Decodes calibrated axes and aggregates them into a [`VibrationRecord`]
#[derive(Debug, Clone, Default)]
pub struct VibrationCombiner {
    calculator: VelocityOverallCalculator,
}

impl VibrationCombiner {
    pub fn new(calculator: VelocityOverallCalculator) -> Self {
        Self { calculator }
    }

    /// Decode and aggregate one capture
    ///
    /// ### Errors
    ///
    /// Returns a [`CombineError`] when the calibration or sample count is
    /// not a positive integer, when the buffer is not valid hexadecimal, or
    /// when the buffer does not hold exactly one or three axes of the
    /// declared sample count.
    ///
    /// ### Example
    ///
    /// ```
    /// use rust_bluvib::vibration::{CalibrationContext, RawSampleBuffer, VibrationCombiner};
    ///
    /// let combiner = VibrationCombiner::default();
    /// let buffer = RawSampleBuffer::new("0080".repeat(3 * 256));
    /// let context = CalibrationContext::new(5000, 256, Some(2560.0));
    ///
    /// let record = combiner.combine(&buffer, &context).unwrap();
    /// assert_eq!(record.acceleration, vec![0.0, 0.0, 0.0]);
    /// assert_eq!(record.velocity_overall, Some(vec![0.0, 0.0, 0.0]));
    /// ```
    pub fn combine(
        &self,
        buffer: &RawSampleBuffer,
        context: &CalibrationContext,
    ) -> Result<VibrationRecord, CombineError> {
        let calibration = match context.calibration {
            Some(calibration) if calibration > 0 => calibration as u32,
            other => return Err(CombineError::InvalidCalibration(other)),
        };
        let number_of_samples = match context.number_of_samples {
            Some(count) if count > 0 => count as usize,
            other => return Err(CombineError::InvalidNumberOfSamples(other)),
        };

        let words = buffer.decode_words()?;
        let total_samples = words.len();
        let axis_count = total_samples / number_of_samples;
        if total_samples % number_of_samples != 0 || !matches!(axis_count, 1 | 3) {
            return Err(CombineError::AxisCountMismatch {
                total_samples,
                number_of_samples,
            });
        }

        let factor = CalibrationContext::conversion_factor(calibration);
        let acceleration_time_series: Vec<Vec<f64>> = words
            .chunks_exact(number_of_samples)
            .map(|axis| {
                axis.iter()
                    .map(|&word| (i32::from(word) - OFFSET_BINARY_ZERO) as f64 * factor)
                    .collect()
            })
            .collect();

        let acceleration = acceleration_time_series.iter().map(|axis| mean(axis)).collect();

        let velocity_overall = context.sampling_rate_hz.and_then(|rate| {
            let values = acceleration_time_series
                .iter()
                .map(|axis| self.calculator.average_velocity_overall(axis, rate))
                .collect();
            attach_if_all_finite(values)
        });

        debug!(
            "Combined {} axis(es) of {} samples, velocity overall {}",
            axis_count,
            number_of_samples,
            if velocity_overall.is_some() { "attached" } else { "absent" }
        );

        Ok(VibrationRecord {
            acceleration,
            acceleration_time_series,
            velocity_overall,
        })
    }

    /// Same as [`combine`](Self::combine), logging and discarding failures
    pub fn combine_or_drop(
        &self,
        buffer: &RawSampleBuffer,
        context: &CalibrationContext,
    ) -> Option<VibrationRecord> {
        match self.combine(buffer, context) {
            Ok(record) => Some(record),
            Err(err) if err.is_precondition() => {
                debug!("Sample buffer dropped: {}", err);
                None
            }
            Err(err) => {
                warn!("Malformed sample buffer dropped: {}", err);
                None
            }
        }
    }
}

/// Keep per-axis values only if every axis produced a finite number
///
/// A single failed axis voids the result for all axes so that a partial
/// severity reading is never reported.
pub fn attach_if_all_finite(values: Vec<f64>) -> Option<Vec<f64>> {
    if !values.is_empty() && values.iter().all(|v| v.is_finite()) {
        Some(values)
    } else {
        None
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}
