// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Batch weather poller for the configured city list.
//!
//! Fetches current weather for each city in turn and writes one snapshot
//! record per city. Failures are isolated per city into the results list; one
//! broken city never stops the rest of the batch.

use crate::db::FirestoreDb;
use crate::error::AppError;
use crate::models::CityWeatherRecord;
use crate::numeric::decimal_to_number;
use crate::services::WeatherClient;
use rust_decimal::Decimal;
use serde::Serialize;

/// Per-city outcome of a poll run.
#[derive(Debug, Serialize)]
pub struct CityPollResult {
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<serde_json::Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Polls weather for configured cities and stores one record each.
#[derive(Clone)]
pub struct CityWeatherService {
    weather: Option<WeatherClient>,
    db: FirestoreDb,
    cities: Vec<String>,
}

impl CityWeatherService {
    pub fn new(weather: Option<WeatherClient>, db: FirestoreDb, cities: Vec<String>) -> Self {
        Self {
            weather,
            db,
            cities,
        }
    }

    /// Poll every configured city sequentially, collecting per-city outcomes.
    pub async fn poll(&self) -> Vec<CityPollResult> {
        let mut results = Vec::with_capacity(self.cities.len());

        for city in &self.cities {
            let city = city.trim();
            if city.is_empty() {
                continue;
            }

            match self.poll_city(city).await {
                Ok(temperature) => {
                    tracing::info!(city, "City weather stored");
                    results.push(CityPollResult {
                        city: city.to_string(),
                        temperature: temperature.map(decimal_to_number),
                        error: None,
                    });
                }
                Err(e) => {
                    tracing::warn!(city, error = %e, "City weather poll failed");
                    results.push(CityPollResult {
                        city: city.to_string(),
                        temperature: None,
                        error: Some(e.to_string()),
                    });
                }
            }
        }

        results
    }

    /// Fetch and store the snapshot for one city.
    async fn poll_city(&self, city: &str) -> Result<Option<Decimal>, AppError> {
        let client = self
            .weather
            .as_ref()
            .ok_or_else(|| AppError::WeatherApi("OPENWEATHER_KEY not set".to_string()))?;

        let temperature = client.current_temperature(city).await?;

        let record = CityWeatherRecord::new(city, temperature);
        self.db.upsert_city_weather(&record).await?;

        Ok(temperature)
    }
}
