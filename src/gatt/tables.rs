// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-bluvib project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! BluVib code tables
//!
//! The sensor reports sampling rate, trace length and operating mode as
//! small integer codes. The tables below are fixed for the lifetime of the
//! process; a code outside a table, or a reserved entry, yields `None`.

use serde::{Deserialize, Serialize};

/// Sampling rates in Hz indexed by the `sample_rate` code (code 0 is reserved)
pub static SAMPLE_RATES_HZ: [Option<u32>; 8] = [
    None,
    Some(25_600),
    Some(12_800),
    Some(5_120),
    Some(2_560),
    Some(1_280),
    Some(512),
    Some(256),
];

/// Samples per axis indexed by the `trace_len` code
pub static NUMBERS_OF_SAMPLES: [u32; 16] = [
    64, 128, 256, 512, 1_024, 2_048, 4_096, 8_192, 16_384, 32_768, 65_536, 131_072, 262_144,
    524_288, 1_048_576, 2_097_152,
];

/// Sensor operating mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperatingMode {
    Continuous,
    Wakeup,
    #[serde(rename = "Wakeup+")]
    WakeupPlus,
    Ready,
    #[serde(rename = "Event/Triggered")]
    EventTriggered,
}

/// Operating modes indexed by the `mode` code (code 0 is reserved)
pub static OPERATING_MODES: [Option<OperatingMode>; 6] = [
    None,
    Some(OperatingMode::Continuous),
    Some(OperatingMode::Wakeup),
    Some(OperatingMode::WakeupPlus),
    Some(OperatingMode::Ready),
    Some(OperatingMode::EventTriggered),
];

/// Sampling rate in Hz for a `sample_rate` code
///
/// ```
/// use rust_bluvib::gatt::tables::sample_rate_hz;
///
/// assert_eq!(sample_rate_hz(0x07), Some(256));
/// assert_eq!(sample_rate_hz(0x08), None);
/// ```
pub fn sample_rate_hz(code: u32) -> Option<u32> {
    lookup(&SAMPLE_RATES_HZ, code).flatten()
}

/// Samples per axis for a `trace_len` code
///
/// ```
/// use rust_bluvib::gatt::tables::number_of_samples;
///
/// assert_eq!(number_of_samples(0x04), Some(1024));
/// assert_eq!(number_of_samples(0x10), None);
/// ```
pub fn number_of_samples(code: u32) -> Option<u32> {
    lookup(&NUMBERS_OF_SAMPLES, code)
}

/// Operating mode for a `mode` code
pub fn operating_mode(code: u32) -> Option<OperatingMode> {
    lookup(&OPERATING_MODES, code).flatten()
}

fn lookup<T: Copy>(table: &[T], code: u32) -> Option<T> {
    usize::try_from(code).ok().and_then(|index| table.get(index).copied())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_rate_table() {
        assert_eq!(sample_rate_hz(0), None);
        assert_eq!(sample_rate_hz(1), Some(25_600));
        assert_eq!(sample_rate_hz(7), Some(256));
        assert_eq!(sample_rate_hz(8), None);
        assert_eq!(sample_rate_hz(u32::MAX), None);
    }

    #[test]
    fn test_number_of_samples_table() {
        assert_eq!(number_of_samples(0), Some(64));
        assert_eq!(number_of_samples(4), Some(1024));
        assert_eq!(number_of_samples(15), Some(2_097_152));
        assert_eq!(number_of_samples(16), None);
        assert!(NUMBERS_OF_SAMPLES.iter().all(|n| n.is_power_of_two()));
    }

    #[test]
    fn test_operating_mode_table() {
        assert_eq!(operating_mode(0), None);
        assert_eq!(operating_mode(2), Some(OperatingMode::Wakeup));
        assert_eq!(operating_mode(5), Some(OperatingMode::EventTriggered));
        assert_eq!(operating_mode(6), None);
    }

    #[test]
    fn test_operating_mode_names() {
        assert_eq!(
            serde_json::to_string(&OperatingMode::WakeupPlus).unwrap(),
            "\"Wakeup+\""
        );
        assert_eq!(
            serde_json::to_string(&OperatingMode::EventTriggered).unwrap(),
            "\"Event/Triggered\""
        );
        assert_eq!(serde_json::to_string(&OperatingMode::Wakeup).unwrap(), "\"Wakeup\"");
    }
}
