// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-bluvib project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Configuration utilities
//!
//! This module provides utility functions for working with configuration
//! settings, including validation and schema management.

use anyhow::{Context, Result};
use log::debug;

use super::{Config, CONFIG_SCHEMA};

/// Output the embedded JSON schema to the console.
///
/// This function is called when the `--show-config-schema` flag is provided
/// on the command line.
///
/// # Example
///
/// ```bash
/// ./rust_bluvib --show-config-schema > config_schema.json
/// ```
pub fn output_config_schema() -> Result<()> {
    let schema: serde_json::Value =
        serde_json::from_str(CONFIG_SCHEMA).context("Failed to parse JSON schema")?;

    let formatted_schema =
        serde_json::to_string_pretty(&schema).context("Failed to format JSON schema")?;

    println!("{}", formatted_schema);

    Ok(())
}

/// Validates the configuration against rules the JSON schema cannot express.
///
/// # Validation Rules
///
/// - **Integration band**: `0 < band_low_hz < band_high_hz`, both finite
/// - **Segment length**: `min_segment_length` is a power of two of at least 2
/// - **Segment count**: `max_segments` is at least 1
///
/// # Returns
///
/// * `Ok(())` if all validations pass
/// * `Err(anyhow::Error)` with a descriptive message otherwise
pub fn validate_specific_rules(config: &Config) -> Result<()> {
    debug!("Performing additional validation checks");
    let analysis = &config.analysis;

    if !analysis.band_low_hz.is_finite() || !analysis.band_high_hz.is_finite() {
        anyhow::bail!(
            "Integration band edges must be finite, got {} and {}",
            analysis.band_low_hz,
            analysis.band_high_hz
        );
    }
    if analysis.band_low_hz <= 0.0 {
        anyhow::bail!(
            "Integration band low edge must be positive, got {}",
            analysis.band_low_hz
        );
    }
    if analysis.band_low_hz >= analysis.band_high_hz {
        anyhow::bail!(
            "Integration band low edge {} must be below high edge {}",
            analysis.band_low_hz,
            analysis.band_high_hz
        );
    }

    if analysis.min_segment_length < 2 || !analysis.min_segment_length.is_power_of_two() {
        anyhow::bail!(
            "Minimum segment length must be a power of two of at least 2, got {}",
            analysis.min_segment_length
        );
    }

    if analysis.max_segments == 0 {
        anyhow::bail!("Maximum segments must be at least 1");
    }

    Ok(())
}
