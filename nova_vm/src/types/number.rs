// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Number <-> string conversions and the integer-narrowing rules
//! (`ToInt32`, `ToUint32`, `ToIndex`, ...) used by typed-array element
//! stores and array-length checks.

use crate::engine::{Agent, ExceptionType, JsResult};

/// ### ToString applied to a Number (NumberToString)
pub(crate) fn number_to_string(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    ryu_js::Buffer::new().format(n).to_string()
}

/// ### StringToNumber
pub(crate) fn string_to_number(s: &str) -> f64 {
    let trimmed = s.trim_matches(|c: char| c.is_whitespace());
    if trimmed.is_empty() {
        return 0.0;
    }
    if let Some(hex) = trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X")) {
        return i64::from_str_radix(hex, 16).map(|v| v as f64).unwrap_or(f64::NAN);
    }
    if let Some(oct) = trimmed.strip_prefix("0o").or_else(|| trimmed.strip_prefix("0O")) {
        return i64::from_str_radix(oct, 8).map(|v| v as f64).unwrap_or(f64::NAN);
    }
    if let Some(bin) = trimmed.strip_prefix("0b").or_else(|| trimmed.strip_prefix("0B")) {
        return i64::from_str_radix(bin, 2).map(|v| v as f64).unwrap_or(f64::NAN);
    }
    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    fast_float::parse(trimmed).unwrap_or(f64::NAN)
}

/// ### ToInteger (via ToIntegerOrInfinity, saturated to a safe f64 integer)
pub fn to_integer(n: f64) -> f64 {
    if n.is_nan() {
        0.0
    } else if n.is_infinite() {
        n
    } else {
        n.trunc()
    }
}

/// ### ToInt32
pub fn to_int32(n: f64) -> i32 {
    if !n.is_finite() || n == 0.0 {
        return 0;
    }
    let int = to_integer(n);
    let modulo = int.rem_euclid(2f64.powi(32));
    if modulo >= 2f64.powi(31) {
        (modulo - 2f64.powi(32)) as i32
    } else {
        modulo as i32
    }
}

/// ### ToUint32
pub fn to_uint32(n: f64) -> u32 {
    if !n.is_finite() || n == 0.0 {
        return 0;
    }
    let int = to_integer(n);
    int.rem_euclid(2f64.powi(32)) as u32
}

/// ### ToLength
pub fn to_length(n: f64) -> u64 {
    let int = to_integer(n);
    if int <= 0.0 {
        0
    } else {
        int.min(2f64.powi(53) - 1.0) as u64
    }
}

/// ### ToIndex
pub fn to_index(agent: &mut Agent, n: f64) -> JsResult<u64> {
    let int = to_integer(n);
    if int < 0.0 || int > 2f64.powi(53) - 1.0 {
        return Err(agent.throw_exception(ExceptionType::RangeError, "index out of range"));
    }
    Ok(int as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_integers_without_a_decimal_point() {
        assert_eq!(number_to_string(3.0), "3");
        assert_eq!(number_to_string(-0.0), "0");
    }

    #[test]
    fn parses_radix_prefixed_literals() {
        assert_eq!(string_to_number("0x10"), 16.0);
        assert_eq!(string_to_number("0o10"), 8.0);
        assert_eq!(string_to_number("0b10"), 2.0);
        assert_eq!(string_to_number("   "), 0.0);
        assert!(string_to_number("abc").is_nan());
    }

    #[test]
    fn to_int32_wraps() {
        assert_eq!(to_int32(4294967296.0 + 5.0), 5);
        assert_eq!(to_int32(2147483648.0), i32::MIN);
    }
}
