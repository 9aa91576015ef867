// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Emissions-Tracker API Server
//!
//! Ingests activity events, computes carbon-emission estimates with optional
//! Climatiq/OpenWeather enrichment, and stores one record per event in
//! Firestore.

use emissions_tracker::{
    config::Config,
    db::FirestoreDb,
    services::{CityWeatherService, IngestService, WeatherClient},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging for GCP
    init_logging();

    // Load configuration from environment
    let config = Config::from_env();
    tracing::info!(
        port = config.port,
        table = %config.emissions_table,
        climatiq = config.climatiq_key.is_some(),
        openweather = config.openweather_key.is_some(),
        "Starting Emissions-Tracker API"
    );

    // Initialize Firestore database
    let db = FirestoreDb::new(&config.gcp_project_id, &config.emissions_table)
        .await
        .expect("Failed to connect to Firestore");

    // Initialize the ingest pipeline (enrichment clients built per configured key)
    let ingest = IngestService::from_config(&config, db.clone());

    // Initialize the batch city weather poller
    let city_weather = CityWeatherService::new(
        config.openweather_key.clone().map(WeatherClient::new),
        db.clone(),
        config.cities.clone(),
    );
    tracing::info!(cities = config.cities.len(), "City weather poller initialized");

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        ingest,
        city_weather,
    });

    // Build router
    let app = emissions_tracker::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging (GCP-compliant).
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("emissions_tracker=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
