// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-bluvib project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

// Main entry point for the BluVib GATT decoder
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info, warn};
use serde_json::Value;

use rust_bluvib::config::{self, Config};
use rust_bluvib::gatt::process_protocol_specific_data_with;
use rust_bluvib::vibration::{VelocityOverallCalculator, VibrationCombiner};

/// Decode BluVib GATT characteristics into vibration records
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Input JSON file with GATT protocol-specific data (default: stdin)
    #[arg(long)]
    input: Option<PathBuf>,

    /// Output file for decoded records (default: stdout)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Path to configuration file (YAML format)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Path to a configuration to validate and exit
    #[arg(long)]
    validate_config: Option<PathBuf>,

    /// Output the configuration schema as JSON and exit
    #[arg(long)]
    show_config_schema: bool,

    /// Lower edge of the integration band in Hz
    #[arg(long)]
    band_low_hz: Option<f64>,

    /// Upper edge of the integration band in Hz
    #[arg(long)]
    band_high_hz: Option<f64>,

    /// Minimum FFT segment length (power of two)
    #[arg(long)]
    min_segment_length: Option<usize>,

    /// Maximum number of segments averaged per axis
    #[arg(long)]
    max_segments: Option<usize>,

    /// Write compact JSON instead of pretty-printed JSON
    #[arg(long)]
    compact: bool,

    /// Enable verbose logging (debug level)
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,

    /// Disable all logging output
    #[arg(short = 'q', long = "quiet")]
    quiet: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.quiet {
        log::LevelFilter::Off
    } else if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    if args.show_config_schema {
        return config::output_config_schema();
    }

    if let Some(validate_path) = args.validate_config {
        if !validate_path.exists() {
            return Err(anyhow::anyhow!(
                "Configuration file does not exist: {}",
                validate_path.display()
            ));
        }

        Config::from_file(&validate_path)
            .map_err(|err| anyhow::anyhow!("Configuration validation failed: {}", err))?;
        println!("Configuration file is valid: {}", validate_path.display());
        return Ok(());
    }

    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from("config.yaml"));
    let mut config = Config::from_file(&config_path)?;

    config.apply_args(
        args.band_low_hz,
        args.band_high_hz,
        args.min_segment_length,
        args.max_segments,
        args.compact,
    );
    // Command line overrides are held to the same rules as the file
    config::validate_specific_rules(&config)?;

    let input = read_input(args.input.as_ref())?;
    let data: Value = serde_json::from_str(&input).context("Input is not valid JSON")?;

    let combiner = VibrationCombiner::new(VelocityOverallCalculator::from(&config.analysis));
    let decoded = decode(&data, &combiner)?;

    let rendered = if config.output.pretty {
        serde_json::to_string_pretty(&decoded)
    } else {
        serde_json::to_string(&decoded)
    }
    .context("Failed to serialize decoded records")?;

    match &args.output {
        Some(path) => {
            info!("Saving decoded records to: {}", path.display());
            fs::write(path, rendered + "\n")
                .with_context(|| format!("Failed to write output to {:?}", path))?;
        }
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{}", rendered).context("Failed to write to stdout")?;
        }
    }

    Ok(())
}

/// Read the whole input from a file, or from stdin when no file is given
fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => {
            debug!("Reading GATT data from {}", path.display());
            fs::read_to_string(path).with_context(|| format!("Failed to read input file {:?}", path))
        }
        None => {
            debug!("Reading GATT data from stdin");
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read stdin")?;
            Ok(buffer)
        }
    }
}

/// Decode one protocol-specific data object, or each element of an array
///
/// Rejected inputs are written as `null`.
fn decode(data: &Value, combiner: &VibrationCombiner) -> Result<Value> {
    let decode_one = |item: &Value| -> Result<Value> {
        match process_protocol_specific_data_with(item, combiner) {
            Some(record) => Ok(serde_json::to_value(record)?),
            None => {
                warn!("Input is not GATT protocol-specific data, skipped");
                Ok(Value::Null)
            }
        }
    };

    match data {
        Value::Array(items) => {
            info!("Decoding {} GATT reports", items.len());
            Ok(Value::Array(
                items.iter().map(decode_one).collect::<Result<Vec<_>>>()?,
            ))
        }
        item => decode_one(item),
    }
}
