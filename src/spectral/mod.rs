// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-bluvib project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! # Spectral Analysis Module
//!
//! Stateless numeric primitives used by the velocity-overall calculation:
//!
//! - [`segment::remove_dc_offset`] removes the mean of an axis
//! - [`segment::segment_into_power_of_two_blocks`] cuts an axis into
//!   FFT-sized segments
//! - [`window::apply_hann_window`] tapers a segment
//! - [`fft::forward_fft`] computes the single-sided amplitude spectrum
//!
//! None of these functions keep state between calls, so they can be used
//! from any number of threads at once.
//!
//! ## Usage
//!
//! ```
//! use rust_bluvib::spectral;
//!
//! let sample_rate = 2560.0;
//! let axis: Vec<f64> = (0..1024)
//!     .map(|n| 0.2 + (2.0 * std::f64::consts::PI * 160.0 * n as f64 / sample_rate).sin())
//!     .collect();
//!
//! let centered = spectral::remove_dc_offset(&axis);
//! for segment in spectral::segment_into_power_of_two_blocks(&centered, 256, 4) {
//!     let windowed = spectral::apply_hann_window(segment);
//!     let spectrum = spectral::forward_fft(&windowed, sample_rate).unwrap();
//!     println!("Frequency resolution: {:.2} Hz", spectrum.resolution());
//! }
//! ```

pub mod fft;
pub mod segment;
pub mod window;

pub use fft::{forward_fft, SpectralError, SpectrumData};
pub use segment::{remove_dc_offset, segment_into_power_of_two_blocks};
pub use window::{apply_hann_window, HANN_NOISE_BANDWIDTH_CORRECTION};
