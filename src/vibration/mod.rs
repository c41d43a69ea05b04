// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-bluvib project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Vibration processing module
//!
//! This module turns an assembled acceleration buffer into the values a
//! condition-monitoring system reports:
//!
//! - [`sample_buffer`]: the raw hexadecimal buffer and its calibration context
//! - [`velocity`]: ISO 20816 velocity overall of one axis
//! - [`combiner`]: decoding, per-axis aggregation and the all-axes-or-nothing
//!   attachment of velocity overall

pub mod combiner;
pub mod sample_buffer;
pub mod velocity;

pub use combiner::{attach_if_all_finite, CombineError, VibrationCombiner, VibrationRecord};
pub use sample_buffer::{CalibrationContext, RawSampleBuffer};
pub use velocity::VelocityOverallCalculator;
