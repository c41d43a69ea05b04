// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-bluvib project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! BluVib characteristic decoder
//!
//! BluVib UUIDs share one 128-bit base, `1c93xxxx-d459-11e7-9296-b8e856369374`,
//! where `xxxx` identifies the service or characteristic. The decoder maps
//! each known characteristic of the four BluVib services to a typed
//! [`BluVibField`].

use log::debug;

use super::characteristic::GattCharacteristic;
use super::tables::{number_of_samples, operating_mode, sample_rate_hz, OperatingMode};
use crate::utility::{convert_to_hex_string, parse_hex_integer, read_i16_le, read_u16_le};

const UUID_PREFIX: &str = "1c93";
const UUID_SUFFIX: &str = "d45911e79296b8e856369374";

/// Sensor information service (serial number, firmware versions)
pub const SENSOR_INFORMATION_SERVICE: u16 = 0x0001;
/// Vibration service (trace data and acquisition settings)
pub const VIBRATION_SERVICE: u16 = 0x0002;
/// Configuration service (mode, temperature, battery)
pub const CONFIG_SERVICE: u16 = 0x0003;
/// System service (error reporting)
pub const SYSTEM_SERVICE: u16 = 0x0004;

/// Full UUIDs of the services handled by this decoder
pub static SUPPORTED_SERVICE_UUIDS: [&str; 4] = [
    "1c930001d45911e79296b8e856369374",
    "1c930002d45911e79296b8e856369374",
    "1c930003d45911e79296b8e856369374",
    "1c930004d45911e79296b8e856369374",
];

/// One decoded BluVib value
#[derive(Debug, Clone, PartialEq)]
pub enum BluVibField {
    SerialNumber(String),
    /// Hexadecimal acceleration trace fragments, joined in arrival order
    AccelerationSamples(String),
    Gain(u32),
    SampleRate(u32),
    NumberOfSamples(u32),
    Calibration(i32),
    /// Axis count reported by the sensor (informational)
    NumberOfAxes(u32),
    OperatingMode(OperatingMode),
    /// Internal temperature in °C
    Temperature(f64),
    /// Battery voltage in V
    BatteryVoltage(f64),
    ErrorCode(u32),
}

/// Check whether a service UUID belongs to BluVib
pub fn is_supported_service(service_uuid: &str) -> bool {
    SUPPORTED_SERVICE_UUIDS
        .iter()
        .any(|uuid| uuid.eq_ignore_ascii_case(service_uuid.trim()))
}

/// Extract the 16-bit identifier of a BluVib UUID
fn short_id(uuid: &str) -> Option<u16> {
    let uuid = uuid.trim().to_ascii_lowercase();
    if uuid.len() != 32 || !uuid.starts_with(UUID_PREFIX) || !uuid.ends_with(UUID_SUFFIX) {
        return None;
    }
    u16::from_str_radix(&uuid[4..8], 16).ok()
}

/// Decode one characteristic
///
/// ### Returns
///
/// * `None` when the service or characteristic is not a BluVib one
/// * `Some(fields)` otherwise; `fields` is empty for reserved
///   characteristics and for payloads that cannot be decoded
///
/// ### Example
///
/// ```
/// use rust_bluvib::gatt::bluvib::{process, BluVibField};
/// use rust_bluvib::gatt::GattCharacteristic;
///
/// let calibration = GattCharacteristic::new(
///     "1c930002d45911e79296b8e856369374",
///     "1c930029d45911e79296b8e856369374",
///     "8813",
/// );
/// assert_eq!(process(&calibration), Some(vec![BluVibField::Calibration(5000)]));
/// ```
pub fn process(characteristic: &GattCharacteristic) -> Option<Vec<BluVibField>> {
    let service = short_id(&characteristic.service_uuid)?;
    let id = short_id(&characteristic.characteristic_uuid)?;
    let value = characteristic.payload();

    let field = match (service, id) {
        (SENSOR_INFORMATION_SERVICE, 0x0010) => {
            convert_to_hex_string(value, 4, true).map(BluVibField::SerialNumber)
        }
        // Firmware, hardware, BLE and sensor type strings
        (SENSOR_INFORMATION_SERVICE, 0x0011..=0x0015) => None,

        (VIBRATION_SERVICE, 0x0020) => {
            let samples: String = characteristic.fragments().concat();
            (!samples.is_empty()).then_some(BluVibField::AccelerationSamples(samples))
        }
        (VIBRATION_SERVICE, 0x0022) => parse_hex_integer(value).map(BluVibField::Gain),
        (VIBRATION_SERVICE, 0x0023) => parse_hex_integer(value)
            .and_then(sample_rate_hz)
            .map(BluVibField::SampleRate),
        (VIBRATION_SERVICE, 0x0024) => parse_hex_integer(value)
            .and_then(number_of_samples)
            .map(BluVibField::NumberOfSamples),
        (VIBRATION_SERVICE, 0x0029) => {
            read_i16_le(value).map(|raw| BluVibField::Calibration(i32::from(raw)))
        }
        (VIBRATION_SERVICE, 0x002b) => parse_hex_integer(value).map(BluVibField::NumberOfAxes),
        // data_set, trigger_delay, sequence
        (VIBRATION_SERVICE, 0x0021 | 0x0025 | 0x002a) => None,

        (CONFIG_SERVICE, 0x0031) => parse_hex_integer(value)
            .and_then(operating_mode)
            .map(BluVibField::OperatingMode),
        (CONFIG_SERVICE, 0x0032) => {
            read_i16_le(value).map(|raw| BluVibField::Temperature(f64::from(raw) / 256.0))
        }
        (CONFIG_SERVICE, 0x0038) => {
            read_u16_le(value).map(|raw| BluVibField::BatteryVoltage(f64::from(raw) / 1000.0))
        }
        // release, time, wakeup settings, capture time, holdoff interval
        (CONFIG_SERVICE, 0x0030 | 0x0033 | 0x0035..=0x0037 | 0x0039 | 0x003a) => None,

        (SYSTEM_SERVICE, 0x0043) => parse_hex_integer(value).map(BluVibField::ErrorCode),

        _ => {
            debug!(
                "Unknown BluVib characteristic {} in service {}",
                characteristic.characteristic_uuid, characteristic.service_uuid
            );
            return None;
        }
    };

    Some(field.into_iter().collect())
}
