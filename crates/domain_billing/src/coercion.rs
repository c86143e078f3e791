//! Loose numeric coercion for caller-supplied JSON
//!
//! Bills arrive from clients that send amounts as numbers, as strings, or
//! occasionally as something else entirely. Nothing is rejected here: values
//! that do not read as a number become NaN and travel through the
//! statistics unchanged.
//!
//! The rules follow the JavaScript `Number()` conversion the service's
//! clients are written against:
//!
//! | Input | Result |
//! |---|---|
//! | number | itself |
//! | `""` or whitespace | `0` |
//! | decimal / exponent / `0x` hex / `Infinity` string | parsed value |
//! | any other string | `NaN` |
//! | `true` / `false` | `1` / `0` |
//! | `null` | `0` |
//! | `[]` / `[x]` | `0` / coercion of `x` as text |
//! | other arrays, objects | `NaN` |

use serde_json::Value;

/// Coerces a JSON value to `f64`
pub fn to_number(value: &Value) -> f64 {
    match value {
        Value::Null => 0.0,
        Value::Bool(true) => 1.0,
        Value::Bool(false) => 0.0,
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => parse_number(s),
        Value::Array(items) => match items.as_slice() {
            [] | [Value::Null] => 0.0,
            [Value::Number(n)] => n.as_f64().unwrap_or(f64::NAN),
            [Value::String(s)] => parse_number(s),
            _ => f64::NAN,
        },
        Value::Object(_) => f64::NAN,
    }
}

/// Parses a string the way a browser would for `Number(s)`
pub fn parse_number(raw: &str) -> f64 {
    let s = raw.trim();
    if s.is_empty() {
        return 0.0;
    }

    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        return parse_radix(hex, 16);
    }
    if let Some(oct) = s.strip_prefix("0o").or_else(|| s.strip_prefix("0O")) {
        return parse_radix(oct, 8);
    }
    if let Some(bin) = s.strip_prefix("0b").or_else(|| s.strip_prefix("0B")) {
        return parse_radix(bin, 2);
    }

    // Rust's float parser also accepts "inf" and "nan"; those are not numbers here.
    let decimal_chars = s
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));
    if !decimal_chars {
        return f64::NAN;
    }

    s.parse::<f64>().unwrap_or(f64::NAN)
}

fn parse_radix(digits: &str, radix: u32) -> f64 {
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return f64::NAN;
    }
    digits
        .chars()
        .filter_map(|c| c.to_digit(radix))
        .fold(0.0, |acc, d| acc * f64::from(radix) + f64::from(d))
}

/// Returns whether a JSON value counts as "present" under a truthiness test
///
/// `null`, `false`, `0` and `""` are falsy; everything else, including empty
/// arrays and objects, is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
