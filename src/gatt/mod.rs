// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-bluvib project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! GATT protocol-specific data decoding
//!
//! A BLE scanner reports the characteristics it read from a device as a
//! JSON object carrying a `gatt` array:
//!
//! ```json
//! {
//!   "type": "ble",
//!   "gatt": [
//!     { "serviceUuid": "1c930002d45911e79296b8e856369374",
//!       "characteristicUuid": "1c930029d45911e79296b8e856369374",
//!       "value": "8813" }
//!   ]
//! }
//! ```
//!
//! This module routes each characteristic to the BluVib decoder and merges
//! the results into a single [`BluVibRecord`].

pub mod bluvib;
pub mod characteristic;
pub mod record;
pub mod tables;

use log::{debug, trace};
use serde_json::Value;

use crate::vibration::VibrationCombiner;

pub use bluvib::BluVibField;
pub use characteristic::GattCharacteristic;
pub use record::{BluVibRecord, BluVibRecordBuilder};
pub use tables::OperatingMode;

/// Decode GATT protocol-specific data with the default analysis settings
///
/// ### Parameters
///
/// * `data` - JSON object with a `gatt` array of characteristic reads
///
/// ### Returns
///
/// `None` when `data` is not an object with a `gatt` array, otherwise the
/// decoded record (possibly empty).
///
/// ### Example
///
/// ```
/// use rust_bluvib::gatt::process_protocol_specific_data;
/// use serde_json::json;
///
/// let record = process_protocol_specific_data(&json!({ "type": "ble", "gatt": [] })).unwrap();
/// assert_eq!(serde_json::to_value(&record).unwrap(), json!({}));
///
/// assert!(process_protocol_specific_data(&json!({ "type": "ble" })).is_none());
/// ```
pub fn process_protocol_specific_data(data: &Value) -> Option<BluVibRecord> {
    process_protocol_specific_data_with(data, &VibrationCombiner::default())
}

/// Decode GATT protocol-specific data, combining the acceleration data with
/// the given combiner
pub fn process_protocol_specific_data_with(
    data: &Value,
    combiner: &VibrationCombiner,
) -> Option<BluVibRecord> {
    let characteristics = data.as_object()?.get("gatt")?.as_array()?;

    let mut builder = BluVibRecordBuilder::new();
    for entry in characteristics {
        let characteristic: GattCharacteristic = match serde_json::from_value(entry.clone()) {
            Ok(characteristic) => characteristic,
            Err(err) => {
                debug!("Skipping malformed GATT entry: {}", err);
                continue;
            }
        };
        if !bluvib::is_supported_service(&characteristic.service_uuid) {
            trace!("Skipping unsupported service {}", characteristic.service_uuid);
            continue;
        }
        if let Some(fields) = bluvib::process(&characteristic) {
            builder.extend(fields);
        }
    }

    Some(builder.build(combiner))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn characteristic(id: &str, value: &str) -> Value {
        json!({
            "serviceUuid": format!("1c93{}d45911e79296b8e856369374", service_for(id)),
            "characteristicUuid": format!("1c93{}d45911e79296b8e856369374", id),
            "value": value,
        })
    }

    /// Services own the characteristics `00s0`..`00sf`
    fn service_for(id: &str) -> &'static str {
        match id.as_bytes()[2] {
            b'1' => "0001",
            b'2' => "0002",
            b'3' => "0003",
            _ => "0004",
        }
    }

    #[test]
    fn test_rejects_inputs_without_gatt_array() {
        assert!(process_protocol_specific_data(&Value::Null).is_none());
        assert!(process_protocol_specific_data(&json!("gatt")).is_none());
        assert!(process_protocol_specific_data(&json!({ "type": "ble" })).is_none());
        assert!(process_protocol_specific_data(&json!({ "gatt": "8813" })).is_none());
        assert!(process_protocol_specific_data(&json!([])).is_none());
    }

    #[test]
    fn test_empty_gatt_gives_empty_record() {
        let record = process_protocol_specific_data(&json!({ "type": "ble", "gatt": [] })).unwrap();
        assert_eq!(record, BluVibRecord::default());
        assert_eq!(serde_json::to_value(&record).unwrap(), json!({}));
    }

    #[test]
    fn test_scalar_fields_are_decoded() {
        let data = json!({
            "type": "ble",
            "gatt": [
                characteristic("0010", "78563412"),
                characteristic("0022", "04"),
                characteristic("0023", "07"),
                characteristic("0024", "04"),
                characteristic("0029", "8813"),
                characteristic("0031", "02"),
                characteristic("0032", "c019"),
                characteristic("0038", "480d"),
                characteristic("0043", "45"),
            ]
        });
        let value = serde_json::to_value(process_protocol_specific_data(&data).unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "serialNumber": "12345678",
                "gain": 4,
                "sampleRate": 256,
                "numberOfSamples": 1024,
                "calibration": 5000,
                "operatingMode": "Wakeup",
                "temperature": 25.75,
                "batteryVoltage": 3.4,
                "errorCode": 69,
            })
        );
    }

    #[test]
    fn test_malformed_and_foreign_entries_are_skipped() {
        let data = json!({
            "gatt": [
                { "value": "04" },
                42,
                {
                    "serviceUuid": "0000180f00001000800000805f9b34fb",
                    "characteristicUuid": "00002a1900001000800000805f9b34fb",
                    "value": "64"
                },
                characteristic("0022", "04"),
            ]
        });
        let record = process_protocol_specific_data(&data).unwrap();
        assert_eq!(record, BluVibRecord { gain: Some(4), ..BluVibRecord::default() });
    }

    #[test]
    fn test_uppercase_uuids_are_accepted() {
        let data = json!({
            "gatt": [{
                "serviceUuid": "1C930002D45911E79296B8E856369374",
                "characteristicUuid": "1C930029D45911E79296B8E856369374",
                "value": "8813"
            }]
        });
        let record = process_protocol_specific_data(&data).unwrap();
        assert_eq!(record.calibration, Some(5000));
    }
}
