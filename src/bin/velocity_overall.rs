// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-bluvib project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

// Velocity overall of a raw BluVib acceleration buffer
// Decodes one hexadecimal trace and prints the vibration record as JSON

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;

use rust_bluvib::vibration::{CalibrationContext, RawSampleBuffer, VibrationCombiner};

/// Velocity overall of a raw BluVib acceleration buffer
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Hexadecimal sample buffer (4 hex characters per sample)
    #[arg(value_name = "HEX", required_unless_present = "file")]
    hex: Option<String>,

    /// Read the hexadecimal sample buffer from a file instead
    #[arg(short, long, value_name = "FILE", conflicts_with = "hex")]
    file: Option<PathBuf>,

    /// Calibration scale code of the sensor
    #[arg(short, long)]
    calibration: i32,

    /// Number of samples per axis
    #[arg(short, long)]
    number_of_samples: u32,

    /// Sampling rate in Hz; velocity overall is only computed when given
    #[arg(short, long)]
    sample_rate: Option<f64>,

    /// Enable verbose logging (debug level)
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    let hex = match (&args.hex, &args.file) {
        (Some(hex), _) => hex.clone(),
        (None, Some(path)) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read sample buffer from {:?}", path))?,
        (None, None) => anyhow::bail!("No sample buffer given"),
    };

    let buffer = RawSampleBuffer::from_fragments(hex.split_whitespace());
    let context = CalibrationContext::new(args.calibration, args.number_of_samples, args.sample_rate);

    let record = VibrationCombiner::default()
        .combine(&buffer, &context)
        .context("Failed to decode the sample buffer")?;

    println!(
        "{}",
        serde_json::to_string_pretty(&record).context("Failed to serialize the record")?
    );

    Ok(())
}
