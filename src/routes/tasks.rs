// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Scheduler-invoked batch job routes.

use crate::services::CityPollResult;
use crate::AppState;
use axum::{extract::State, routing::post, Json, Router};
use serde::Serialize;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/tasks/fetch-cities", post(fetch_cities))
}

#[derive(Serialize)]
pub struct FetchCitiesResponse {
    pub status: String,
    pub results: Vec<CityPollResult>,
}

/// Poll weather for all configured cities and store one record per city.
///
/// Always returns 200: per-city failures are reported inside `results`, not
/// as an overall error.
async fn fetch_cities(State(state): State<Arc<AppState>>) -> Json<FetchCitiesResponse> {
    tracing::info!("Running city weather batch poll");
    let results = state.city_weather.poll().await;

    Json(FetchCitiesResponse {
        status: "ok".to_string(),
        results,
    })
}
