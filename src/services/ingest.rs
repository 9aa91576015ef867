// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Ingest pipeline service.
//!
//! Handles the core workflow:
//! 1. Parse the inbound event (defaults for anything missing or malformed)
//! 2. Compute the baseline emission estimate from the static factor table
//! 3. Run optional enrichments (Climatiq, OpenWeather), isolating failures
//! 4. Assemble the storage-safe record
//! 5. Upsert into Firestore keyed by (user_id, timestamp)
//!
//! Enrichment failures are data, not control flow: they land in the record's
//! `extra` map and the record is still persisted. Only the storage write (or
//! an unexpected parse error) fails the request.

use crate::config::Config;
use crate::db::FirestoreDb;
use crate::error::AppError;
use crate::models::{ActivityEvent, ActivityRecord};
use crate::numeric::sanitize_extra;
use crate::services::{emission, ClimatiqClient, WeatherClient};
use serde_json::Value;
use std::collections::BTreeMap;

/// Orchestrates enrichment and persistence for one event at a time.
#[derive(Clone)]
pub struct IngestService {
    db: FirestoreDb,
    climatiq: Option<ClimatiqClient>,
    weather: Option<WeatherClient>,
}

impl IngestService {
    /// Create the service with explicit enrichment clients. `None` means the
    /// corresponding credential is not configured and the lookup is skipped
    /// silently.
    pub fn new(
        db: FirestoreDb,
        climatiq: Option<ClimatiqClient>,
        weather: Option<WeatherClient>,
    ) -> Self {
        Self {
            db,
            climatiq,
            weather,
        }
    }

    /// Build the service from configuration, constructing a client per
    /// configured API key.
    pub fn from_config(config: &Config, db: FirestoreDb) -> Self {
        Self::new(
            db,
            config.climatiq_key.clone().map(ClimatiqClient::new),
            config.openweather_key.clone().map(WeatherClient::new),
        )
    }

    /// Process one inbound event end-to-end: parse, enrich, persist.
    pub async fn ingest(&self, payload: Value) -> Result<ActivityRecord, AppError> {
        let event = ActivityEvent::from_payload(payload)?;
        let record = self.build_record(&event).await;

        self.db.upsert_record(&record).await?;

        tracing::info!(
            user_id = %record.user_id,
            timestamp = %record.timestamp,
            mode = %record.mode,
            co2_emission = %record.co2_emission,
            "Record stored"
        );

        Ok(record)
    }

    /// Assemble the record for an event: baseline estimate plus best-effort
    /// enrichments. Infallible by design; enrichment errors are annotated
    /// into `extra`.
    pub async fn build_record(&self, event: &ActivityEvent) -> ActivityRecord {
        let is_travel = event.activity_type == "travel";

        let mut co2_emission = if is_travel {
            emission::estimate(event.distance, &event.mode)
        } else {
            rust_decimal::Decimal::ZERO
        };

        let mut extra: BTreeMap<String, Value> = BTreeMap::new();

        // Climatiq enrichment: a usable response overrides the baseline.
        if is_travel {
            if let Some(client) = &self.climatiq {
                match client.estimate(event.distance).await {
                    Ok(Some(value)) => {
                        tracing::debug!(co2e = %value, "Climatiq estimate overrides baseline");
                        co2_emission = value;
                    }
                    // Response had no usable emission value; keep the baseline.
                    Ok(None) => {}
                    Err(e) => {
                        tracing::warn!(error = %e, "Climatiq enrichment failed");
                        extra.insert("climatiq_error".to_string(), Value::String(e.to_string()));
                    }
                }
            }
        }

        // Weather enrichment: attaches temperature on success only.
        let mut temperature = None;
        if let Some(client) = &self.weather {
            match client.current_temperature(&event.city).await {
                Ok(temp) => temperature = temp,
                Err(e) => {
                    tracing::warn!(error = %e, city = %event.city, "Weather enrichment failed");
                    extra.insert("openweather_error".to_string(), Value::String(e.to_string()));
                }
            }
        }

        let extra = if extra.is_empty() {
            None
        } else {
            Some(sanitize_extra(extra))
        };

        ActivityRecord {
            user_id: event.user_id.clone(),
            timestamp: event.timestamp.clone(),
            activity_type: event.activity_type.clone(),
            mode: event.mode.clone(),
            city: event.city.clone(),
            distance: event.distance,
            co2_emission,
            temperature,
            extra,
        }
    }
}
