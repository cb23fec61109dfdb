// In crates/core-types/src/validation.rs

//! Checks for the raw values an operator types on the command line.
//!
//! Every validator takes the unparsed string and returns either the typed
//! value or a `Validation` error with a message fit to show the operator.
//! Malformed input is an expected outcome here, so nothing in this module panics.

use crate::types::{Side, Symbol};
use crate::{Error, Result};
use rust_decimal::Decimal;
use std::str::FromStr;

const SYMBOL_MIN_LEN: usize = 4;
const SYMBOL_MAX_LEN: usize = 12;

/// Accepts 4-12 characters, each an ASCII uppercase letter or a digit (e.g. `BTCUSDT`).
pub fn validate_symbol(raw: &str) -> Result<Symbol> {
    let len_ok = (SYMBOL_MIN_LEN..=SYMBOL_MAX_LEN).contains(&raw.len());
    let chars_ok = raw
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit());

    if !len_ok || !chars_ok {
        return Err(Error::validation(
            "symbol",
            "Symbol should be 4-12 chars alphanumeric uppercase (e.g., BTCUSDT)",
        ));
    }
    Ok(Symbol(raw.to_string()))
}

/// Accepts `BUY` or `SELL` in any letter case.
pub fn validate_side(raw: &str) -> Result<Side> {
    match raw.to_ascii_uppercase().as_str() {
        "BUY" => Ok(Side::Buy),
        "SELL" => Ok(Side::Sell),
        _ => Err(Error::validation("side", "Side must be BUY or SELL")),
    }
}

pub fn validate_quantity(raw: &str) -> Result<Decimal> {
    parse_positive(raw, "quantity", "Quantity")
}

pub fn validate_price(raw: &str) -> Result<Decimal> {
    parse_positive(raw, "price", "Price")
}

/// Parses a decimal (plain or scientific notation) and requires it to be strictly positive.
///
/// Positive numbers that `Decimal` cannot hold (too large, or so small they
/// round to zero) are rejected with their own reason.
fn parse_positive(raw: &str, field: &'static str, label: &str) -> Result<Decimal> {
    let trimmed = raw.trim();
    let parsed = Decimal::from_str(trimmed).or_else(|_| Decimal::from_scientific(trimmed));
    // Finite-float reading of the input, used only to classify rejections.
    let approx = trimmed.parse::<f64>().ok().filter(|v| v.is_finite());

    match (parsed, approx) {
        (Ok(value), _) if value > Decimal::ZERO => Ok(value),
        (Ok(_), Some(v)) | (Err(_), Some(v)) if v > 0.0 => Err(Error::validation(
            field,
            format!("{label} is out of supported range/precision"),
        )),
        (Ok(_), _) | (Err(_), Some(_)) => {
            Err(Error::validation(field, format!("{label} must be > 0")))
        }
        (Err(_), None) => Err(Error::validation(field, format!("{label} must be a number"))),
    }
}
