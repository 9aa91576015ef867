// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Inbound activity event parsing.
//!
//! The payload is untrusted: every field is optional and `distance` may arrive
//! as an integer, a float, or a numeric string. Defaults are applied here so
//! the rest of the pipeline works with concrete values.

use crate::error::AppError;
use crate::numeric::parse_numeric_lenient;
use crate::time_utils::utc_now_iso;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

/// Raw event shape as received; all fields optional, unknown fields ignored.
#[derive(Debug, Default, Deserialize)]
struct RawEvent {
    user_id: Option<String>,
    activity_type: Option<String>,
    city: Option<String>,
    timestamp: Option<String>,
    mode: Option<String>,
    distance: Option<Value>,
}

/// Parsed activity event with defaults applied.
#[derive(Debug, Clone)]
pub struct ActivityEvent {
    pub user_id: String,
    pub activity_type: String,
    pub city: String,
    pub timestamp: String,
    pub mode: String,
    /// Distance in km; coercion failures fall back to zero.
    pub distance: Decimal,
}

impl ActivityEvent {
    /// Parse an inbound payload: either a JSON object or a JSON-encoded string
    /// of one (CLI-style invocation).
    ///
    /// A string that fails to parse degrades to the all-defaults event rather
    /// than failing the request. A payload that is structured but not an
    /// object is a hard failure.
    pub fn from_payload(payload: Value) -> Result<Self, AppError> {
        let value = match payload {
            Value::String(raw) => {
                serde_json::from_str(&raw).unwrap_or_else(|_| Value::Object(Default::default()))
            }
            other => other,
        };

        if !value.is_object() {
            return Err(AppError::Internal(anyhow::anyhow!(
                "event payload must be a JSON object"
            )));
        }

        let raw: RawEvent = serde_json::from_value(value)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("malformed event payload: {}", e)))?;

        Ok(Self::from_raw(raw))
    }

    fn from_raw(raw: RawEvent) -> Self {
        Self {
            user_id: raw.user_id.unwrap_or_else(|| "anonymous".to_string()),
            activity_type: raw.activity_type.unwrap_or_else(|| "travel".to_string()),
            city: raw.city.unwrap_or_else(|| "Unknown".to_string()),
            timestamp: raw.timestamp.unwrap_or_else(utc_now_iso),
            mode: raw.mode.unwrap_or_else(|| "car".to_string()),
            distance: raw
                .distance
                .as_ref()
                .and_then(parse_numeric_lenient)
                .unwrap_or(Decimal::ZERO),
        }
    }
}
