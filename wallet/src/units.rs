//! Exact conversion between decimal strings and integer base units.
//!
//! All arithmetic is done on `u128`, so amounts are never rounded.

use crate::error::{Result, WalletError};

/// Decimals of one ether in wei.
pub const ETHER_DECIMALS: u32 = 18;

/// Decimals of one gwei in wei.
pub const GWEI_DECIMALS: u32 = 9;

/// Parses a non-negative decimal string into base units.
///
/// Fails when the string is not plain digits with an optional fractional
/// part, when it has more fractional digits than `decimals`, or when the
/// result overflows `u128`.
pub fn parse_units(s: &str, decimals: u32) -> Result<u128> {
    let s = s.trim();
    let invalid = || WalletError::InvalidAmount(s.to_string());

    let (whole, frac) = match s.split_once('.') {
        Some((w, f)) => (w, f),
        None => (s, ""),
    };
    if whole.is_empty() {
        return Err(invalid());
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    if s.ends_with('.') || frac.len() > decimals as usize {
        return Err(invalid());
    }

    let scale = 10u128.checked_pow(decimals).ok_or_else(invalid)?;
    let whole_units = whole.parse::<u128>().map_err(|_| invalid())?;

    let mut frac_units = 0u128;
    if !frac.is_empty() {
        let padded = format!("{frac:0<width$}", width = decimals as usize);
        frac_units = padded.parse::<u128>().map_err(|_| invalid())?;
    }

    whole_units
        .checked_mul(scale)
        .and_then(|v| v.checked_add(frac_units))
        .ok_or_else(invalid)
}

/// Formats base units as a decimal string.
///
/// Trailing fractional zeros are trimmed but one digit always remains
/// after the point, so one ether formats as `"1.0"`.
pub fn format_units(value: u128, decimals: u32) -> String {
    if decimals == 0 {
        return format!("{value}.0");
    }
    // Past 38 decimals the scale exceeds u128, so every value is fractional.
    let (whole, frac) = match 10u128.checked_pow(decimals) {
        Some(scale) => (value / scale, value % scale),
        None => (0, value),
    };

    let frac = format!("{frac:0>width$}", width = decimals as usize);
    let trimmed = frac.trim_end_matches('0');
    if trimmed.is_empty() {
        format!("{whole}.0")
    } else {
        format!("{whole}.{trimmed}")
    }
}

pub fn parse_ether(s: &str) -> Result<u128> {
    parse_units(s, ETHER_DECIMALS)
}

pub fn format_ether(wei: u128) -> String {
    format_units(wei, ETHER_DECIMALS)
}
