// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! OpenWeather API client for current city temperature.
//!
//! Same best-effort contract as the Climatiq client: callers catch failures
//! and annotate the record instead of aborting. Bounded timeout, no retry.

use crate::error::AppError;
use crate::numeric::parse_numeric_lenient;
use crate::services::REQUEST_TIMEOUT;
use rust_decimal::Decimal;
use serde::Deserialize;

/// OpenWeather current-weather response; only `main.temp` is consumed.
#[derive(Debug, Deserialize)]
struct WeatherResponse {
    #[serde(default)]
    main: WeatherMain,
}

#[derive(Debug, Default, Deserialize)]
struct WeatherMain {
    temp: Option<serde_json::Value>,
}

/// OpenWeather API client.
#[derive(Clone)]
pub struct WeatherClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl WeatherClient {
    /// Create a new client with the given API key.
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(
            api_key,
            "https://api.openweathermap.org/data/2.5".to_string(),
        )
    }

    /// Create a client against a non-default endpoint (tests).
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            api_key,
        }
    }

    /// Current temperature (°C) for a city, by free-text name.
    ///
    /// Returns `Ok(None)` when the response succeeds but has no numeric
    /// `main.temp` field.
    pub async fn current_temperature(&self, city: &str) -> Result<Option<Decimal>, AppError> {
        let url = format!("{}/weather", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| AppError::WeatherApi(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::WeatherApi(format!("HTTP {}: {}", status, body)));
        }

        let payload: WeatherResponse = response
            .json()
            .await
            .map_err(|e| AppError::WeatherApi(format!("JSON parse error: {}", e)))?;

        Ok(payload.main.temp.as_ref().and_then(parse_numeric_lenient))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_response_parsing_extracts_temp() {
        let payload: WeatherResponse =
            serde_json::from_str(r#"{"main": {"temp": 28.5, "humidity": 40}, "name": "Delhi"}"#)
                .unwrap();
        assert_eq!(
            payload.main.temp.as_ref().and_then(parse_numeric_lenient),
            Some(Decimal::from_str("28.5").unwrap())
        );
    }

    #[test]
    fn test_missing_main_block_yields_none() {
        let payload: WeatherResponse = serde_json::from_str(r#"{"name": "Delhi"}"#).unwrap();
        assert!(payload.main.temp.is_none());
    }

    #[test]
    fn test_non_numeric_temp_yields_none() {
        let payload: WeatherResponse =
            serde_json::from_str(r#"{"main": {"temp": "warm"}}"#).unwrap();
        assert_eq!(payload.main.temp.as_ref().and_then(parse_numeric_lenient), None);
    }
}
