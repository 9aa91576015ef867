// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Lenient numeric coercion for storage-safe exact decimals.
//!
//! Handles:
//! - Coercing loosely-typed JSON values (numbers, numeric strings) to `Decimal`
//! - Converting exact decimals back to native JSON numbers at the response boundary
//! - Sanitizing the open-ended `extra` map into storable values
//!
//! Conversion always goes through the value's textual form, never through a
//! binary float intermediate, so `19.99` stays `19.99` rather than
//! `19.989999999999998436...`.

use crate::models::record::AttrValue;
use rust_decimal::prelude::*;
use serde_json::Value;
use std::collections::BTreeMap;
use std::str::FromStr;

/// Coerce a JSON value to an exact decimal, or `None` when it is not numeric.
///
/// Numbers convert via their textual representation. Strings are first probed
/// with a float parse for numeric-ness; the conversion itself stays textual.
/// Callers supply the fallback (`unwrap_or`), matching the "never block
/// ingestion on a bad number" policy.
pub fn parse_numeric_lenient(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => decimal_from_text(&n.to_string()),
        Value::String(s) => {
            let text = s.trim();
            if text.parse::<f64>().is_ok() {
                decimal_from_text(text)
            } else {
                None
            }
        }
        _ => None,
    }
}

/// Parse decimal text, accepting scientific notation.
fn decimal_from_text(text: &str) -> Option<Decimal> {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

/// Convert an exact decimal to a native JSON number for response bodies.
///
/// Integral values become JSON integers, fractional values floats. Only used
/// at the outward boundary; persisted records keep the exact decimal form.
pub fn decimal_to_number(value: Decimal) -> serde_json::Number {
    if value.fract().is_zero() {
        if let Some(i) = value.to_i64() {
            return serde_json::Number::from(i);
        }
    }
    value
        .to_f64()
        .and_then(serde_json::Number::from_f64)
        .unwrap_or_else(|| serde_json::Number::from(0))
}

/// Sanitize the auxiliary `extra` map into values the storage layer accepts.
///
/// Per key:
/// - nulls are dropped entirely
/// - numbers and numeric-looking strings become exact decimals
/// - other strings pass through unchanged
/// - anything structured (arrays, objects, bools) is serialized to a JSON
///   string, falling back to its display form
///
/// Intentionally lossy for exotic types: never errors, always produces a
/// storable value.
pub fn sanitize_extra(extra: BTreeMap<String, Value>) -> BTreeMap<String, AttrValue> {
    let mut cleaned = BTreeMap::new();

    for (key, value) in extra {
        let sanitized = match &value {
            Value::Null => continue,
            Value::Number(_) => match parse_numeric_lenient(&value) {
                Some(dec) => AttrValue::Number(dec),
                None => AttrValue::Text(value.to_string()),
            },
            Value::String(s) => match parse_numeric_lenient(&value) {
                Some(dec) => AttrValue::Number(dec),
                None => AttrValue::Text(s.clone()),
            },
            other => {
                AttrValue::Text(serde_json::to_string(other).unwrap_or_else(|_| other.to_string()))
            }
        };
        cleaned.insert(key, sanitized);
    }

    cleaned
}
