//! Scaled-integer arithmetic matching the option market contracts.
//!
//! Every scaled quantity is an `I256` holding `value * 1e18`. Multiplication
//! and division truncate toward zero, exactly like the on-chain
//! `multiplyDecimal` / `divideDecimal` helpers.

use std::str::FromStr;

use alloy::primitives::{I256, U256};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

use crate::constants::{UNIT, UNIT_DECIMALS};
use crate::error::{Error, Result};

/// `a * b / UNIT`, truncating.
pub fn scaled_mul(a: I256, b: I256) -> Result<I256> {
    Ok(a.checked_mul(b).ok_or(Error::Overflow)? / UNIT)
}

/// `a * UNIT / b`, truncating.
pub fn scaled_div(a: I256, b: I256) -> Result<I256> {
    if b.is_zero() {
        return Err(Error::DivideByZero);
    }
    Ok(a.checked_mul(UNIT).ok_or(Error::Overflow)? / b)
}

/// Lift a plain integer into `I256` without scaling.
pub fn from_int(value: i64) -> I256 {
    let magnitude = I256::from_raw(U256::from(value.unsigned_abs()));
    if value < 0 { -magnitude } else { magnitude }
}

/// Lift a plain integer into fixed point (`value * UNIT`).
pub fn units(value: i64) -> I256 {
    from_int(value) * UNIT
}

/// `mantissa * 10^-decimals` in fixed point, e.g. `from_parts(105, 2)` is 1.05.
/// `decimals` above 18 are treated as 18.
pub fn from_parts(mantissa: i64, decimals: u32) -> I256 {
    from_int(mantissa) * pow10(UNIT_DECIMALS.saturating_sub(decimals))
}

/// Reinterpret an on-chain `uint256` as a signed scaled value.
pub fn from_uint(value: U256) -> Result<I256> {
    let signed = I256::from_raw(value);
    if signed.is_negative() {
        return Err(Error::invalid_argument(format!(
            "uint256 {value} does not fit in int256"
        )));
    }
    Ok(signed)
}

fn from_i128(value: i128) -> I256 {
    let magnitude = I256::from_raw(U256::from(value.unsigned_abs()));
    if value < 0 { -magnitude } else { magnitude }
}

fn pow10(exp: u32) -> I256 {
    from_i128(10i128.pow(exp))
}

fn from_decimal(decimal: Decimal) -> Result<I256> {
    let scale = decimal.scale();
    if scale > UNIT_DECIMALS {
        return Err(Error::invalid_argument(format!(
            "{decimal} has more than {UNIT_DECIMALS} decimals"
        )));
    }
    Ok(from_i128(decimal.mantissa()) * pow10(UNIT_DECIMALS - scale))
}

/// Convert a float (Black-Scholes output) into fixed point, rounding to 18 decimals.
pub fn to_fixed(value: f64) -> Result<I256> {
    let decimal = Decimal::from_f64(value).ok_or(Error::NonFinite { value })?;
    from_decimal(decimal.round_dp(UNIT_DECIMALS))
}

/// Convert a fixed-point value into a float for the Black-Scholes boundary.
pub fn from_fixed(value: I256) -> f64 {
    format_units(value).parse().unwrap_or(0.0)
}

/// Parse an exact decimal string (`"1.5"`, `"-0.25"`) into fixed point.
pub fn parse_units(value: &str) -> Result<I256> {
    let decimal = Decimal::from_str(value.trim())
        .map_err(|e| Error::invalid_argument(format!("invalid decimal `{value}`: {e}")))?;
    from_decimal(decimal.normalize())
}

/// Render a fixed-point value as a decimal string without trailing zeros.
pub fn format_units(value: I256) -> String {
    let sign = if value.is_negative() { "-" } else { "" };
    let magnitude = value.unsigned_abs();
    let unit = UNIT.unsigned_abs();
    let whole = magnitude / unit;
    let frac = (magnitude % unit).to::<u64>();
    if frac == 0 {
        return format!("{sign}{whole}");
    }
    let frac = format!("{frac:018}");
    format!("{sign}{whole}.{}", frac.trim_end_matches('0'))
}
