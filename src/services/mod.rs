// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod city_weather;
pub mod climatiq;
pub mod emission;
pub mod ingest;
pub mod weather;

pub use city_weather::{CityPollResult, CityWeatherService};
pub use climatiq::ClimatiqClient;
pub use ingest::IngestService;
pub use weather::WeatherClient;

use std::time::Duration;

/// Bound on every outbound API request. There are no retries; a timeout
/// surfaces as the enrichment's own isolated failure.
pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
