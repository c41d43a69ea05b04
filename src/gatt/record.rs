// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-bluvib project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Decoded BluVib record and its builder
//!
//! Characteristics of one capture arrive one by one. The
//! [`BluVibRecordBuilder`] collects the decoded [`BluVibField`]s and the raw
//! acceleration fragments, then produces a single immutable [`BluVibRecord`]
//! in which the vibration fields have been computed by a
//! [`VibrationCombiner`]. The raw hexadecimal buffer is never part of the
//! record.

use log::debug;
use serde::Serialize;

use super::bluvib::BluVibField;
use super::tables::OperatingMode;
use crate::vibration::{CalibrationContext, RawSampleBuffer, VibrationCombiner, VibrationRecord};

/// Decoded sensor state for one capture
///
/// Every field is optional; absent fields are omitted when serialized, so a
/// record built from no characteristic serializes to `{}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BluVibRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gain: Option<u32>,
    /// Sampling rate in Hz
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_rate: Option<u32>,
    /// Samples per axis
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_samples: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calibration: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_axes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operating_mode: Option<OperatingMode>,
    /// Internal temperature in °C
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Battery voltage in V
    #[serde(skip_serializing_if = "Option::is_none")]
    pub battery_voltage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<u32>,

    /// Acceleration, time series and velocity overall when the capture
    /// could be combined
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub vibration: Option<VibrationRecord>,
}

/// Accumulates decoded fields until the capture is complete
#[derive(Debug, Clone, Default)]
pub struct BluVibRecordBuilder {
    record: BluVibRecord,
    samples: RawSampleBuffer,
}

impl BluVibRecordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one field
    ///
    /// Scalar fields overwrite any earlier value; acceleration fragments are
    /// appended to the sample buffer.
    pub fn push(&mut self, field: BluVibField) -> &mut Self {
        let record = &mut self.record;
        match field {
            BluVibField::SerialNumber(serial) => record.serial_number = Some(serial),
            BluVibField::AccelerationSamples(fragment) => self.samples.push_fragment(&fragment),
            BluVibField::Gain(gain) => record.gain = Some(gain),
            BluVibField::SampleRate(rate) => record.sample_rate = Some(rate),
            BluVibField::NumberOfSamples(count) => record.number_of_samples = Some(count),
            BluVibField::Calibration(calibration) => record.calibration = Some(calibration),
            BluVibField::NumberOfAxes(axes) => record.number_of_axes = Some(axes),
            BluVibField::OperatingMode(mode) => record.operating_mode = Some(mode),
            BluVibField::Temperature(temperature) => record.temperature = Some(temperature),
            BluVibField::BatteryVoltage(voltage) => record.battery_voltage = Some(voltage),
            BluVibField::ErrorCode(code) => record.error_code = Some(code),
        }
        self
    }

    /// Merge every field of an iterator, in order
    pub fn extend<I: IntoIterator<Item = BluVibField>>(&mut self, fields: I) -> &mut Self {
        for field in fields {
            self.push(field);
        }
        self
    }

    /// Calibration parameters gathered so far
    pub fn calibration_context(&self) -> CalibrationContext {
        CalibrationContext {
            calibration: self.record.calibration,
            number_of_samples: self.record.number_of_samples,
            sampling_rate_hz: self.record.sample_rate.map(f64::from),
        }
    }

    /// Raw acceleration buffer gathered so far
    pub fn samples(&self) -> &RawSampleBuffer {
        &self.samples
    }

    /// Finish the record
    ///
    /// When acceleration data was received it is combined with the gathered
    /// calibration; a capture that cannot be combined leaves the vibration
    /// fields absent.
    pub fn build(self, combiner: &VibrationCombiner) -> BluVibRecord {
        let context = self.calibration_context();
        let mut record = self.record;
        if self.samples.is_empty() {
            debug!("No acceleration data received, vibration fields omitted");
        } else {
            record.vibration = combiner.combine_or_drop(&self.samples, &context);
        }
        record
    }
}
