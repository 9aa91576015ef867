// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Emissions-Tracker: smart-city carbon emission ingestion
//!
//! This crate provides the backend API for ingesting activity events,
//! computing CO2e estimates with optional Climatiq/OpenWeather enrichment,
//! and persisting exact-decimal records to Firestore.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod numeric;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::FirestoreDb;
use services::{CityWeatherService, IngestService};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    pub ingest: IngestService,
    pub city_weather: CityWeatherService,
}
