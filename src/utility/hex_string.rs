// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-bluvib project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Hexadecimal payload helpers
//!
//! GATT characteristic values arrive as hexadecimal strings. These helpers
//! read the integer layouts used by the sensor. Every function returns
//! `None` for a payload it cannot read instead of guessing.

/// Parse a whole hexadecimal string as an unsigned integer
///
/// ```
/// use rust_bluvib::utility::hex_string::parse_hex_integer;
///
/// assert_eq!(parse_hex_integer("45"), Some(69));
/// assert_eq!(parse_hex_integer("0x45"), None);
/// ```
pub fn parse_hex_integer(value: &str) -> Option<u32> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    u32::from_str_radix(value, 16).ok()
}

/// Read the first two bytes of a hex payload as a little-endian `i16`
pub fn read_i16_le(value: &str) -> Option<i16> {
    first_two_bytes(value).map(i16::from_le_bytes)
}

/// Read the first two bytes of a hex payload as a little-endian `u16`
pub fn read_u16_le(value: &str) -> Option<u16> {
    first_two_bytes(value).map(u16::from_le_bytes)
}

fn first_two_bytes(value: &str) -> Option<[u8; 2]> {
    let bytes = hex::decode(value.trim()).ok()?;
    match bytes.as_slice() {
        [first, second, ..] => Some([*first, *second]),
        _ => None,
    }
}

/// Left-pad a hex payload to `length` bytes, optionally reversing byte order
///
/// Payloads longer than `length` bytes are kept whole.
///
/// ```
/// use rust_bluvib::utility::hex_string::convert_to_hex_string;
///
/// assert_eq!(convert_to_hex_string("78563412", 4, true), Some("12345678".to_string()));
/// assert_eq!(convert_to_hex_string("abc", 2, false), Some("0abc".to_string()));
/// ```
pub fn convert_to_hex_string(value: &str, length: usize, reverse_endianness: bool) -> Option<String> {
    let value = value.trim().to_lowercase();
    let padded = format!("{:0>width$}", value, width = length * 2);
    let mut bytes = hex::decode(&padded).ok()?;
    if reverse_endianness {
        bytes.reverse();
    }
    Some(hex::encode(bytes))
}
