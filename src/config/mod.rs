// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-bluvib project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Configuration management for the BluVib decoder
//!
//! This module provides functionality for loading, validating, and applying
//! configuration settings for the decoder. The configuration is backed by a
//! YAML file and validated against a JSON schema for robustness.
//!
//! ## Configuration Structure
//!
//! - `analysis`: Settings of the velocity overall computation
//! - `output`: Settings of the JSON output
//!
//! ## Usage
//!
//! ```no_run
//! use rust_bluvib::config::Config;
//! use std::path::Path;
//!
//! // Load config from file, creates a default if not found
//! let mut config = Config::from_file(Path::new("config.yaml")).unwrap();
//!
//! // Apply command line overrides if needed
//! config.apply_args(
//!     Some(2.0),  // Band low edge
//!     None,       // Band high edge
//!     Some(512),  // Minimum segment length
//!     None,       // Maximum segments
//!     false,      // Compact output
//! );
//!
//! println!("Integration band: {} Hz", config.analysis.band_low_hz);
//! ```

pub mod analysis;
pub mod output;
pub mod utils;

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, error};
use serde::{Deserialize, Serialize};

pub use analysis::AnalysisConfig;
pub use output::OutputConfig;
pub use utils::{output_config_schema, validate_specific_rules};

/// Embedded JSON schema of the configuration file
pub(crate) const CONFIG_SCHEMA: &str = include_str!("../../resources/config.schema.json");

/// Root configuration structure of the decoder.
///
/// # Default Values
///
/// Each section uses default values when not explicitly specified in the
/// configuration file, so an empty file is a valid configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Velocity overall computation settings.
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// JSON output settings.
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Helper method to create a sample config file when validation fails
    fn create_sample_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        let sample_path = path.with_extension("sample.yaml");
        debug!("Creating sample configuration file at {:?}", sample_path);

        if let Some(parent) = sample_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).with_context(|| {
                    format!(
                        "Failed to create parent directory for sample config at {:?}",
                        sample_path
                    )
                })?;
            }
        }

        Self::default()
            .save_to_file(&sample_path)
            .with_context(|| format!("Failed to save sample config to {:?}", sample_path))?;

        error!(
            "Sample configuration file created at {:?}\nPlease edit and rename it",
            sample_path
        );
        Ok(())
    }

    /// Load configuration from a file
    ///
    /// A missing file is created with the default configuration. A file
    /// that fails validation leaves a `<name>.sample.yaml` with the defaults
    /// next to it and yields an error.
    ///
    /// ### Errors
    ///
    /// Returns an error when the file cannot be read, is not valid YAML,
    /// does not match the schema, or breaks a rule checked by
    /// [`validate_specific_rules`].
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(
                "Configuration file not found at {:?}, creating default",
                path
            );
            let default_config = Self::default();
            default_config.save_to_file(path)?;
            return Ok(default_config);
        }

        debug!("Loading configuration from {:?}", path);
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file at {:?}", path))?;

        let yaml_value: serde_yml::Value = serde_yml::from_str(&contents)
            .with_context(|| format!("Failed to parse YAML configuration from {:?}", path))?;

        // An empty document parses as null; treat it as an empty mapping
        let json_value = match serde_json::to_value(&yaml_value).with_context(|| {
            format!("Failed to convert YAML to JSON for validation: {:?}", path)
        })? {
            serde_json::Value::Null => serde_json::Value::Object(Default::default()),
            value => value,
        };

        let schema: serde_json::Value =
            serde_json::from_str(CONFIG_SCHEMA).context("Failed to parse JSON schema")?;

        let validator = jsonschema::draft202012::options()
            .should_validate_formats(true)
            .build(&schema)?;

        debug!("Validating {} configuration against schema", path.display());
        if let Err(error) = validator.validate(&json_value) {
            error!("Configuration validation error before deserialization");
            Self::create_sample_config(path)?;
            anyhow::bail!("Configuration validation failed: {}", error);
        }

        debug!("Schema validation passed, deserializing into Config structure");
        let config: Config = match serde_json::from_value(json_value) {
            Ok(config) => config,
            Err(err) => {
                error!("Configuration deserialization error: {}", err);
                if let Err(e) = Self::create_sample_config(path) {
                    error!("Failed to create sample config: {}", e);
                }
                return Err(anyhow::anyhow!(
                    "Failed to deserialize configuration from {}: {}",
                    path.display(),
                    err
                ));
            }
        };

        if let Err(err) = validate_specific_rules(&config) {
            error!("Configuration specific validation error: {}", err);
            Self::create_sample_config(path)?;
            return Err(err);
        }

        Ok(config)
    }

    /// Save the configuration to a file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml =
            serde_yml::to_string(self).context("Failed to serialize configuration to YAML")?;

        let mut file = File::create(path.as_ref())
            .with_context(|| format!("Failed to create config file at {:?}", path.as_ref()))?;

        file.write_all(yaml.as_bytes())
            .with_context(|| format!("Failed to write configuration to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Apply command line arguments to override configuration values.
    ///
    /// Only arguments that were provided override the loaded values.
    ///
    /// # Parameters
    ///
    /// * `band_low_hz` - Lower edge of the integration band in Hz
    /// * `band_high_hz` - Upper edge of the integration band in Hz
    /// * `min_segment_length` - Minimum FFT segment length
    /// * `max_segments` - Maximum number of segments averaged per axis
    /// * `compact` - If true, disables pretty-printed output
    pub fn apply_args(
        &mut self,
        band_low_hz: Option<f64>,
        band_high_hz: Option<f64>,
        min_segment_length: Option<usize>,
        max_segments: Option<usize>,
        compact: bool,
    ) {
        if let Some(low) = band_low_hz {
            debug!("Overriding band low edge from command line: {}", low);
            self.analysis.band_low_hz = low;
        }
        if let Some(high) = band_high_hz {
            debug!("Overriding band high edge from command line: {}", high);
            self.analysis.band_high_hz = high;
        }
        if let Some(length) = min_segment_length {
            debug!("Overriding minimum segment length from command line: {}", length);
            self.analysis.min_segment_length = length;
        }
        if let Some(count) = max_segments {
            debug!("Overriding maximum segments from command line: {}", count);
            self.analysis.max_segments = count;
        }
        if compact {
            self.output.pretty = false;
        }
    }
}
