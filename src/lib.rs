// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-bluvib project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Rust BluVib library
//!
//! This library decodes the GATT characteristics of BluVib vibration sensors
//! and computes the ISO 20816 velocity overall of each acceleration axis.
//!
//! The pipeline reads, from the outside in:
//!
//! - [`gatt`]: routes characteristic reads to the BluVib decoder and merges
//!   the decoded fields into a [`gatt::BluVibRecord`]
//! - [`vibration`]: turns the assembled sample buffer into calibrated axes,
//!   mean acceleration and velocity overall
//! - [`spectral`]: DC removal, segmentation, Hann windowing and FFT
//! - [`config`]: YAML configuration of the analysis parameters
//!
//! ```
//! use rust_bluvib::gatt::process_protocol_specific_data;
//! use serde_json::json;
//!
//! let data = json!({
//!     "type": "ble",
//!     "gatt": [{
//!         "serviceUuid": "1c930003d45911e79296b8e856369374",
//!         "characteristicUuid": "1c930038d45911e79296b8e856369374",
//!         "value": "480d"
//!     }]
//! });
//! let record = process_protocol_specific_data(&data).unwrap();
//! assert_eq!(record.battery_voltage, Some(3.4));
//! ```

pub mod config;
pub mod gatt;
pub mod spectral;
pub mod utility;
pub mod vibration;
