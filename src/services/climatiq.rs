// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Climatiq API client for carbon-emission estimates.
//!
//! Best-effort enrichment: the ingest pipeline catches every error from this
//! client and records it under `extra.climatiq_error` instead of failing the
//! record. Requests are bounded by a single timeout and never retried.

use crate::error::AppError;
use crate::numeric::{decimal_to_number, parse_numeric_lenient};
use crate::services::REQUEST_TIMEOUT;
use rust_decimal::Decimal;
use serde_json::Value;

/// Fixed Climatiq activity id used for travel legs.
const VEHICLE_ACTIVITY_ID: &str =
    "passenger_vehicle-vehicle_type_car-fuel_source_na-distance_na-engine_size_na";

/// Ordered extraction strategies for the emission value. Climatiq responses
/// have placed it at `co2e`, `co2`, or `data.co2e` depending on API version;
/// first match wins.
const CO2E_PATHS: [fn(&Value) -> Option<Decimal>; 3] = [
    |v| v.get("co2e").and_then(parse_numeric_lenient),
    |v| v.get("co2").and_then(parse_numeric_lenient),
    |v| {
        v.get("data")
            .and_then(|d| d.get("co2e"))
            .and_then(parse_numeric_lenient)
    },
];

/// Climatiq API client.
#[derive(Clone)]
pub struct ClimatiqClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl ClimatiqClient {
    /// Create a new client with the given API key.
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, "https://beta3.api.climatiq.io".to_string())
    }

    /// Create a client against a non-default endpoint (tests).
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            api_key,
        }
    }

    /// Request an emission estimate for a travel distance in km.
    ///
    /// Returns `Ok(None)` when the response succeeds but carries no usable
    /// emission value under any known path.
    pub async fn estimate(&self, distance_km: Decimal) -> Result<Option<Decimal>, AppError> {
        let url = format!("{}/estimate", self.base_url);
        let body = serde_json::json!({
            "emission_factor": {
                "activity_id": VEHICLE_ACTIVITY_ID,
            },
            "parameters": {
                "distance": decimal_to_number(distance_km),
                "distance_unit": "km",
            },
        });

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| AppError::ClimatiqApi(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ClimatiqApi(format!("HTTP {}: {}", status, body)));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| AppError::ClimatiqApi(format!("JSON parse error: {}", e)))?;

        Ok(extract_co2e(&payload))
    }
}

/// Apply the extraction strategies in order; first usable value wins.
fn extract_co2e(payload: &Value) -> Option<Decimal> {
    CO2E_PATHS.iter().find_map(|path| path(payload))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    #[test]
    fn test_extract_top_level_co2e() {
        let payload = json!({"co2e": 1.23, "co2e_unit": "kg"});
        assert_eq!(
            extract_co2e(&payload),
            Some(Decimal::from_str("1.23").unwrap())
        );
    }

    #[test]
    fn test_extract_top_level_co2() {
        let payload = json!({"co2": "0.5"});
        assert_eq!(
            extract_co2e(&payload),
            Some(Decimal::from_str("0.5").unwrap())
        );
    }

    #[test]
    fn test_extract_nested_data_co2e() {
        let payload = json!({"data": {"co2e": 2}});
        assert_eq!(extract_co2e(&payload), Some(Decimal::from(2)));
    }

    #[test]
    fn test_extraction_order_is_first_match_wins() {
        let payload = json!({"co2e": 1, "co2": 2, "data": {"co2e": 3}});
        assert_eq!(extract_co2e(&payload), Some(Decimal::ONE));

        let payload = json!({"co2": 2, "data": {"co2e": 3}});
        assert_eq!(extract_co2e(&payload), Some(Decimal::from(2)));
    }

    #[test]
    fn test_no_usable_value_yields_none() {
        assert_eq!(extract_co2e(&json!({})), None);
        assert_eq!(extract_co2e(&json!({"co2e": "not a number"})), None);
        assert_eq!(extract_co2e(&json!({"data": {"co2": 3}})), None);
    }
}
