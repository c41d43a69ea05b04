// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-bluvib project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! GATT characteristic read as delivered by the BLE layer

use serde::{Deserialize, Serialize};

/// One characteristic read: service and characteristic UUIDs plus its
/// hexadecimal payload
///
/// Long values, such as the acceleration trace, are delivered as several
/// fragments in `values`; short ones come as a single `value`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GattCharacteristic {
    pub service_uuid: String,
    pub characteristic_uuid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<String>>,
}

impl GattCharacteristic {
    pub fn new(service_uuid: &str, characteristic_uuid: &str, value: &str) -> Self {
        Self {
            service_uuid: service_uuid.to_string(),
            characteristic_uuid: characteristic_uuid.to_string(),
            value: Some(value.to_string()),
            values: None,
        }
    }

    pub fn with_fragments<I, S>(service_uuid: &str, characteristic_uuid: &str, fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            service_uuid: service_uuid.to_string(),
            characteristic_uuid: characteristic_uuid.to_string(),
            value: None,
            values: Some(fragments.into_iter().map(Into::into).collect()),
        }
    }

    /// Single payload, empty when the read carried none
    pub fn payload(&self) -> &str {
        self.value.as_deref().unwrap_or_default()
    }

    /// All payload fragments in arrival order: `values` when present,
    /// otherwise the single `value`
    pub fn fragments(&self) -> Vec<&str> {
        match (&self.values, &self.value) {
            (Some(values), _) => values.iter().map(String::as_str).collect(),
            (None, Some(value)) => vec![value.as_str()],
            (None, None) => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_camel_case() {
        let json = r#"{
            "serviceUuid": "1c930002d45911e79296b8e856369374",
            "characteristicUuid": "1c930022d45911e79296b8e856369374",
            "value": "04"
        }"#;
        let characteristic: GattCharacteristic = serde_json::from_str(json).unwrap();
        assert_eq!(characteristic.payload(), "04");
        assert_eq!(characteristic.fragments(), vec!["04"]);
    }

    #[test]
    fn test_fragments_prefer_values() {
        let characteristic = GattCharacteristic {
            value: Some("ignored".to_string()),
            values: Some(vec!["aa".to_string(), "bb".to_string()]),
            ..GattCharacteristic::default()
        };
        assert_eq!(characteristic.fragments(), vec!["aa", "bb"]);
        assert!(GattCharacteristic::default().fragments().is_empty());
        assert_eq!(GattCharacteristic::default().payload(), "");
    }

    #[test]
    fn test_missing_uuid_is_rejected() {
        let json = r#"{ "serviceUuid": "1c930002d45911e79296b8e856369374" }"#;
        assert!(serde_json::from_str::<GattCharacteristic>(json).is_err());
    }
}
