// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-bluvib project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Utility module for common utilities used throughout the project

pub mod hex_string;

// Re-exports for use in other modules
pub use hex_string::{convert_to_hex_string, parse_hex_integer, read_i16_le, read_u16_le};
