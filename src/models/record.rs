// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Stored record models.
//!
//! Numeric fields are `Decimal` so values round-trip through storage without
//! binary-float approximation. Optional fields are skipped when absent: no
//! null-valued field is ever written.

use crate::numeric::decimal_to_number;
use crate::time_utils::utc_now_iso;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Sanitized auxiliary value: exact decimal or plain text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Number(Decimal),
    Text(String),
}

/// Emission record stored per inbound activity event.
///
/// Keyed by (user_id, timestamp); a second write with the same pair replaces
/// the first. Immutable from this pipeline's perspective after the write.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub user_id: String,
    pub timestamp: String,
    pub activity_type: String,
    pub mode: String,
    pub city: String,
    pub distance: Decimal,
    pub co2_emission: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<Decimal>,
    /// Enrichment annotations (e.g. per-source error strings); only attached
    /// when non-empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra: Option<BTreeMap<String, AttrValue>>,
}

impl ActivityRecord {
    /// Document ID derived from the natural key (user_id, timestamp).
    pub fn document_id(&self) -> String {
        format!("{}_{}", self.user_id, urlencoding::encode(&self.timestamp))
    }

    /// Response-body view of the record with every exact decimal converted to
    /// a native JSON number. Never used for the persisted form.
    pub fn to_response_item(&self) -> Value {
        let mut item = Map::new();
        item.insert("user_id".to_string(), Value::String(self.user_id.clone()));
        item.insert(
            "timestamp".to_string(),
            Value::String(self.timestamp.clone()),
        );
        item.insert(
            "activity_type".to_string(),
            Value::String(self.activity_type.clone()),
        );
        item.insert("mode".to_string(), Value::String(self.mode.clone()));
        item.insert("city".to_string(), Value::String(self.city.clone()));
        item.insert(
            "distance".to_string(),
            Value::Number(decimal_to_number(self.distance)),
        );
        item.insert(
            "co2_emission".to_string(),
            Value::Number(decimal_to_number(self.co2_emission)),
        );

        if let Some(temp) = self.temperature {
            item.insert(
                "temperature".to_string(),
                Value::Number(decimal_to_number(temp)),
            );
        }

        if let Some(extra) = &self.extra {
            let extra_map: Map<String, Value> = extra
                .iter()
                .map(|(k, v)| {
                    let value = match v {
                        AttrValue::Number(dec) => Value::Number(decimal_to_number(*dec)),
                        AttrValue::Text(s) => Value::String(s.clone()),
                    };
                    (k.clone(), value)
                })
                .collect();
            item.insert("extra".to_string(), Value::Object(extra_map));
        }

        Value::Object(item)
    }
}

/// Weather snapshot record written by the batch city poller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CityWeatherRecord {
    pub user_id: String,
    pub timestamp: String,
    pub activity_type: String,
    pub city: String,
    pub record_id: String,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<Decimal>,
}

impl CityWeatherRecord {
    pub fn new(city: &str, temperature: Option<Decimal>) -> Self {
        Self {
            user_id: format!("city_{}", city),
            timestamp: utc_now_iso(),
            activity_type: "city_weather".to_string(),
            city: city.to_string(),
            record_id: uuid::Uuid::new_v4().to_string(),
            source: "fetch_city_data".to_string(),
            temperature,
        }
    }

    /// Document ID using the same (user_id, timestamp) key scheme as
    /// [`ActivityRecord`].
    pub fn document_id(&self) -> String {
        format!("{}_{}", self.user_id, urlencoding::encode(&self.timestamp))
    }
}
