// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Canonical text encoding of the axiom weights.
//!
//! The ledger anchor was produced from this exact byte sequence, so every rule
//! here is part of the protocol. Any change shows up as permanent drift.
//!
//! Numbers are rendered with the ECMAScript `Number::toString` layout over the
//! shortest round-trip digit string. The rendered strings are then encoded as a
//! compact JSON array: `["1","2","3.0000001"]`.

use serde_json::Value;

use crate::axioms::AxiomConfiguration;

/// Largest decimal exponent rendered without scientific notation.
const MAX_PLAIN_EXPONENT: i32 = 21;
/// Smallest decimal exponent rendered without scientific notation.
const MIN_PLAIN_EXPONENT: i32 = -6;

/// Renders one finite weight in canonical decimal form.
pub fn canonical_decimal(value: f64) -> String {
    debug_assert!(value.is_finite());
    if value == 0.0 {
        // Covers negative zero.
        return "0".to_string();
    }

    // `{:e}` yields the shortest digits that round-trip, e.g. "1.2345e3", "-5e-7".
    let sci = format!("{:e}", value.abs());
    let (mantissa, exponent) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();

    let k = digits.len() as i32;
    let n = exponent + 1;

    let body = if k <= n && n <= MAX_PLAIN_EXPONENT {
        let mut s = digits;
        s.extend(std::iter::repeat('0').take((n - k) as usize));
        s
    } else if 0 < n && n <= MAX_PLAIN_EXPONENT {
        let (int_part, frac_part) = digits.split_at(n as usize);
        format!("{}.{}", int_part, frac_part)
    } else if MIN_PLAIN_EXPONENT < n && n <= 0 {
        format!("0.{}{}", "0".repeat((-n) as usize), digits)
    } else {
        let sign = if n - 1 < 0 { '-' } else { '+' };
        let (first, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{}e{}{}", first, sign, (n - 1).abs())
        } else {
            format!("{}.{}e{}{}", first, rest, sign, (n - 1).abs())
        }
    };

    if value.is_sign_negative() {
        format!("-{}", body)
    } else {
        body
    }
}

/// Canonical serialization of the full configuration: a whitespace-free JSON
/// array of canonical decimal strings, in configuration order.
pub fn canonical_serialization(config: &AxiomConfiguration) -> String {
    let items = config
        .weights()
        .iter()
        .map(|w| Value::String(canonical_decimal(*w)))
        .collect();
    Value::Array(items).to_string()
}
