//! Cell decoders for register tables
//!
//! Integer literals follow the usual prefixed notation (`0x`, `0o`, `0b`,
//! `_` separators) and have no upper bound. None of these decoders fail
//! hard: bit ranges report a [`FieldSkip`], reset values and offsets fall
//! back to "absent" and zero.

use num_bigint::{BigInt, BigUint};
use num_traits::{One, ToPrimitive};
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, warn};

use crate::constants::MAX_RESET_MASK_BITS;
use crate::models::{BitRange, FieldSkip, ResetValue};

/// Prefixed integer literal. Decimal literals may not carry leading zeros.
static INTEGER_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^([+-]?)(?:0[xX]((?:_?[0-9a-fA-F])+)|0[oO]((?:_?[0-7])+)|0[bB]((?:_?[01])+)|([1-9](?:_?[0-9])*|0(?:_?0)*))$",
    )
    .expect("integer literal pattern is valid")
});

/// Parse an integer literal with base prefix detection
pub fn parse_integer(text: &str) -> Option<BigInt> {
    let captures = INTEGER_LITERAL.captures(text.trim())?;

    let (digits, radix) = if let Some(hex) = captures.get(2) {
        (hex.as_str(), 16)
    } else if let Some(octal) = captures.get(3) {
        (octal.as_str(), 8)
    } else if let Some(binary) = captures.get(4) {
        (binary.as_str(), 2)
    } else {
        (captures.get(5)?.as_str(), 10)
    };

    let digits: String = digits.chars().filter(|c| *c != '_').collect();
    let magnitude = BigInt::parse_bytes(digits.as_bytes(), radix)?;

    if &captures[1] == "-" {
        Some(-magnitude)
    } else {
        Some(magnitude)
    }
}

/// Parse one bit position: plain decimal first, prefixed literal second
fn parse_bit_position(text: &str) -> Option<i64> {
    let trimmed = text.trim();
    trimmed
        .parse::<i64>()
        .ok()
        .or_else(|| parse_integer(trimmed).and_then(|v| v.to_i64()))
}

/// Decode a `Bit` cell such as `"7:0"` or `"3"`.
///
/// High and low are split on the first `:` and not checked against each
/// other; an inverted range yields a non-positive width.
pub fn parse_bit_range(cell: Option<&str>) -> Result<BitRange, FieldSkip> {
    let text = cell.map(str::trim).unwrap_or_default();
    if text.is_empty() {
        return Err(FieldSkip::InvalidBits(String::new()));
    }

    let invalid = || FieldSkip::InvalidBits(text.to_string());

    match text.split_once(':') {
        Some((high, low)) => {
            let high = parse_bit_position(high).ok_or_else(invalid)?;
            let low = parse_bit_position(low).ok_or_else(invalid)?;
            Ok(BitRange { high, low })
        }
        None => {
            let bit = parse_bit_position(text).ok_or_else(invalid)?;
            Ok(BitRange {
                high: bit,
                low: bit,
            })
        }
    }
}

/// Decode a `ResetValue` cell; malformed values are treated as absent
pub fn parse_reset_value(cell: Option<&str>) -> Option<BigInt> {
    let text = cell.map(str::trim).filter(|s| !s.is_empty())?;

    let value = parse_integer(text);
    if value.is_none() {
        debug!("Ignoring unparsable reset value '{}'", text);
    }
    value
}

/// Truncate a reset value to `width` bits.
///
/// Negative values wrap in two's complement. Non-positive widths have no
/// mask and yield no reset.
pub fn mask_reset_value(value: BigInt, width: i128) -> Option<ResetValue> {
    if width <= 0 {
        return None;
    }
    let width_bits = u64::try_from(width).ok()?;

    let masked = match value.to_biguint() {
        Some(unsigned) if unsigned.bits() <= width_bits => unsigned,
        _ if width_bits > MAX_RESET_MASK_BITS => {
            warn!(
                "Dropping reset value {} of a {}-bit field: mask wider than {} bits",
                value, width, MAX_RESET_MASK_BITS
            );
            return None;
        }
        _ => {
            let mask = (BigInt::one() << width_bits) - 1u32;
            (value & mask).to_biguint()?
        }
    };

    Some(ResetValue {
        width,
        value: masked,
    })
}

/// Decode a register offset; anything unparsable or negative is zero
pub fn parse_offset(text: &str) -> BigUint {
    match parse_integer(text).and_then(|v| v.to_biguint()) {
        Some(offset) => offset,
        None => {
            if !text.trim().is_empty() {
                debug!("Register offset '{}' is not a valid integer, using 0", text);
            }
            BigUint::default()
        }
    }
}
